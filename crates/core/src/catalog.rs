//! Template catalog: themes, sentence skeletons, authors and image styles.
//!
//! A [`Catalog`] is built once at startup (either [`Catalog::builtin`] or a
//! JSON file) and is read-only afterwards. Skeletons use `{slot}` for
//! placeholders; `{{` and `}}` produce literal braces.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// One themed sentence skeleton with its candidate words and keyword tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTemplate {
    pub theme: String,
    pub skeleton: String,
    /// Slot name -> candidate words. Slots missing here render as `""`.
    #[serde(default)]
    pub words: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl QuoteTemplate {
    /// Split the skeleton into literal text and slot references.
    pub fn parts(&self) -> Result<Vec<SkeletonPart>, String> {
        parse_skeleton(&self.skeleton)
    }

    /// Keyword tags joined with commas, as stored on a record.
    pub fn keyword_string(&self) -> String {
        self.keywords.join(",")
    }
}

/// A parsed piece of a skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkeletonPart {
    Literal(String),
    Slot(String),
}

/// Parse a skeleton string into literal and slot parts.
///
/// Rejects unclosed, empty and nested braces as well as a stray `}`.
pub fn parse_skeleton(skeleton: &str) -> Result<Vec<SkeletonPart>, String> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut chars = skeleton.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                literal.push('{');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') => return Err("nested braces are not allowed".to_string()),
                        Some(ch) => name.push(ch),
                        None => return Err("unclosed brace".to_string()),
                    }
                }
                if name.is_empty() {
                    return Err("empty braces".to_string());
                }
                if !literal.is_empty() {
                    parts.push(SkeletonPart::Literal(std::mem::take(&mut literal)));
                }
                parts.push(SkeletonPart::Slot(name));
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                literal.push('}');
            }
            '}' => return Err("unmatched closing brace".to_string()),
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        parts.push(SkeletonPart::Literal(literal));
    }

    Ok(parts)
}

/// The full set of synthesis inputs shared by both synthesizers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub templates: Vec<QuoteTemplate>,
    pub authors: Vec<String>,
    pub styles: Vec<String>,
}

impl Catalog {
    /// The three built-in themes with their authors and image styles.
    pub fn builtin() -> Self {
        let templates = vec![
            template(
                "inspiration",
                "{adjective} {noun}, {verb} with {quality} to {goal}.",
                &["inspiration", "motivation", "success", "hope", "dream big"],
                &[
                    ("adjective", &["Courageous", "Visionary", "Resilient", "Bold", "Wise"]),
                    ("noun", &["hearts", "minds", "souls", "dreamers", "spirits"]),
                    ("verb", &["forge ahead", "rise above", "embrace", "pursue", "inspire"]),
                    (
                        "quality",
                        &[
                            "unwavering determination",
                            "boundless passion",
                            "relentless hope",
                            "fearless resolve",
                            "enduring faith",
                        ],
                    ),
                    (
                        "goal",
                        &[
                            "achieve greatness",
                            "shape a brighter future",
                            "leave a legacy",
                            "reach new heights",
                            "create change",
                        ],
                    ),
                ],
            ),
            template(
                "philosophy",
                "To {verb} is to {action} the {aspect} of {concept}.",
                &["philosophy", "wisdom", "life lessons", "truth", "self reflection"],
                &[
                    ("verb", &["live", "exist", "thrive", "question", "reflect"]),
                    ("action", &["embrace", "challenge", "unravel", "seek", "define"]),
                    ("aspect", &["essence", "truth", "mystery", "depth", "core"]),
                    ("concept", &["life", "destiny", "humanity", "existence", "wisdom"]),
                ],
            ),
            template(
                "motivation",
                "The {noun} to {source} lies in {action} with {quality}.",
                &["motivation", "success", "productivity", "growth", "inspire"],
                &[
                    ("noun", &["path", "journey", "secret", "key", "power"]),
                    ("source", &["success", "happiness", "fulfillment", "victory", "growth"]),
                    (
                        "action",
                        &[
                            "moving forward",
                            "persisting",
                            "dreaming big",
                            "taking risks",
                            "never giving up",
                        ],
                    ),
                    ("quality", &["courage", "resilience", "passion", "grit", "heart"]),
                ],
            ),
        ];

        Self {
            templates,
            authors: strings(&[
                "Philosopher Sage",
                "Modern Visionary",
                "Timeless Poet",
                "Inspirational Leader",
                "Eternal Dreamer",
            ]),
            styles: strings(&[
                "cinematic",
                "surreal",
                "impressionist",
                "futuristic",
                "classic painting",
            ]),
        }
    }

    /// Load and validate a catalog from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Parse and validate a catalog from a JSON string.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check that the catalog can always produce a record.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.templates.is_empty() {
            return Err(CatalogError::Invalid("no templates".to_string()));
        }
        if self.authors.is_empty() {
            return Err(CatalogError::Invalid("no authors".to_string()));
        }
        if self.styles.is_empty() {
            return Err(CatalogError::Invalid("no image styles".to_string()));
        }

        for template in &self.templates {
            let parts = template.parts().map_err(|reason| {
                CatalogError::Invalid(format!("template '{}': {reason}", template.theme))
            })?;
            for part in &parts {
                if let SkeletonPart::Slot(slot) = part {
                    if template.words.get(slot).is_some_and(Vec::is_empty) {
                        return Err(CatalogError::Invalid(format!(
                            "template '{}': slot '{slot}' has no candidates",
                            template.theme
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

fn template(
    theme: &str,
    skeleton: &str,
    keywords: &[&str],
    words: &[(&str, &[&str])],
) -> QuoteTemplate {
    QuoteTemplate {
        theme: theme.to_string(),
        skeleton: skeleton.to_string(),
        words: words
            .iter()
            .map(|(slot, candidates)| (slot.to_string(), strings(candidates)))
            .collect(),
        keywords: strings(keywords),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
