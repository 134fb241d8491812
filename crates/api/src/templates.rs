//! HTML templates compiled into the binary.

use tera::Tera;

/// Name of the quotes page template.
pub const INDEX_TEMPLATE: &str = "index.html";

/// Build the template registry. Names ending in `.html` are auto-escaped.
pub fn build_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;
    Ok(tera)
}
