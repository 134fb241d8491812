pub mod page;
pub mod quotes;
