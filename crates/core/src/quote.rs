//! Quote synthesis from the template catalog.

use std::collections::HashMap;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::catalog::{Catalog, QuoteTemplate, SkeletonPart};
use crate::error::SynthesisError;

/// Maximum stored quote length (in characters) when short-form mode is on.
pub const SHORTS_MAX_CHARS: usize = 40;

/// Appended to quotes cut down to [`SHORTS_MAX_CHARS`].
pub const ELLIPSIS: &str = "...";

/// A quote ready to be paired with an image prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedQuote {
    pub text: String,
    pub author: String,
    /// Comma-joined keyword tags of the chosen template.
    pub keywords: String,
    pub theme: String,
}

/// Pick a template, fill its slots, apply short-form truncation and pick an
/// author.
///
/// Every random choice is drawn from `rng`, so a seeded generator makes the
/// result reproducible.
pub fn synthesize_quote<R: Rng + ?Sized>(
    catalog: &Catalog,
    rng: &mut R,
    shorts_mode: bool,
) -> Result<SynthesizedQuote, SynthesisError> {
    let template = catalog
        .templates
        .choose(rng)
        .ok_or(SynthesisError::NoTemplates)?;

    let raw = fill_template(template, rng)?;
    let text = if shorts_mode {
        truncate_for_shorts(&raw)
    } else {
        raw
    };

    let author = catalog.authors.choose(rng).ok_or(SynthesisError::NoAuthors)?;

    Ok(SynthesizedQuote {
        text,
        author: author.clone(),
        keywords: template.keyword_string(),
        theme: template.theme.clone(),
    })
}

/// Substitute one random candidate per distinct slot into the skeleton.
///
/// A slot that appears twice gets the same word both times. A slot with no
/// entry in the word map renders as an empty string.
pub fn fill_template<R: Rng + ?Sized>(
    template: &QuoteTemplate,
    rng: &mut R,
) -> Result<String, SynthesisError> {
    let parts = template
        .parts()
        .map_err(|reason| SynthesisError::MalformedSkeleton {
            theme: template.theme.clone(),
            reason,
        })?;

    let mut chosen: HashMap<&str, &str> = HashMap::new();
    let mut out = String::with_capacity(template.skeleton.len() * 2);

    for part in &parts {
        match part {
            SkeletonPart::Literal(text) => out.push_str(text),
            SkeletonPart::Slot(slot) => {
                let word = match chosen.get(slot.as_str()) {
                    Some(word) => *word,
                    None => {
                        let word = pick_word(template, slot, rng)?;
                        chosen.insert(slot.as_str(), word);
                        word
                    }
                };
                out.push_str(word);
            }
        }
    }

    Ok(out)
}

fn pick_word<'t, R: Rng + ?Sized>(
    template: &'t QuoteTemplate,
    slot: &str,
    rng: &mut R,
) -> Result<&'t str, SynthesisError> {
    match template.words.get(slot) {
        None => Ok(""),
        Some(candidates) => candidates.choose(rng).map(String::as_str).ok_or_else(|| {
            SynthesisError::EmptyCandidates {
                theme: template.theme.clone(),
                slot: slot.to_string(),
            }
        }),
    }
}

/// Cap `text` at [`SHORTS_MAX_CHARS`] characters.
///
/// Longer text keeps its first 37 characters followed by [`ELLIPSIS`];
/// anything at or under the cap is returned unchanged.
pub fn truncate_for_shorts(text: &str) -> String {
    if text.chars().count() <= SHORTS_MAX_CHARS {
        return text.to_string();
    }

    let keep = SHORTS_MAX_CHARS - ELLIPSIS.len();
    let mut short: String = text.chars().take(keep).collect();
    short.push_str(ELLIPSIS);
    short
}
