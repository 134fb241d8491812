//! Image-generation prompt synthesis.
//!
//! A quote is classified into one of four scenes by keyword, checked in a
//! fixed priority order, and the scene's sentence is rendered with a random
//! visual style and the author's name.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::catalog::Catalog;
use crate::error::SynthesisError;

const WARRIOR_WORDS: &[&str] = &["courage", "resilient", "grit", "resolve"];
const DREAMSCAPE_WORDS: &[&str] = &["dream", "vision", "hope", "future"];
const LIBRARY_WORDS: &[&str] = &["wisdom", "truth", "philosophy", "reflect"];

/// Scene chosen for an image prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptScene {
    Warrior,
    Dreamscape,
    Library,
    Cityscape,
}

impl PromptScene {
    /// Classify a quote by case-insensitive substring match.
    ///
    /// Warrior words win over dreamscape words, which win over library
    /// words; anything else is a cityscape.
    pub fn classify(quote: &str) -> Self {
        let lower = quote.to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|word| lower.contains(word));

        if mentions(WARRIOR_WORDS) {
            Self::Warrior
        } else if mentions(DREAMSCAPE_WORDS) {
            Self::Dreamscape
        } else if mentions(LIBRARY_WORDS) {
            Self::Library
        } else {
            Self::Cityscape
        }
    }

    pub fn render(self, style: &str, author: &str) -> String {
        match self {
            Self::Warrior => format!(
                "A {style} scene of a lone warrior on a cliff at sunrise, armor glinting, \
                 stormy sky parting to reveal hope, inspired by {author}'s words."
            ),
            Self::Dreamscape => format!(
                "A {style} dreamscape with floating islands, glowing stars, and a figure \
                 reaching for a radiant horizon, capturing {author}'s vision."
            ),
            Self::Library => format!(
                "A {style} library bathed in golden light, a sage pondering glowing \
                 manuscripts, reflecting {author}'s philosophical depth."
            ),
            Self::Cityscape => format!(
                "A {style} cityscape at twilight, a dreamer gazing at stars, embodying \
                 {author}'s timeless inspiration."
            ),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warrior => "warrior",
            Self::Dreamscape => "dreamscape",
            Self::Library => "library",
            Self::Cityscape => "cityscape",
        }
    }
}

/// A rendered image prompt and the style it was rendered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedPrompt {
    pub text: String,
    pub style: String,
    pub scene: PromptScene,
}

/// Build an image prompt for `quote` attributed to `author`.
///
/// The quote is lower-cased for matching only; `author` is embedded as given.
pub fn synthesize_prompt<R: Rng + ?Sized>(
    catalog: &Catalog,
    rng: &mut R,
    quote: &str,
    author: &str,
) -> Result<SynthesizedPrompt, SynthesisError> {
    let style = catalog.styles.choose(rng).ok_or(SynthesisError::NoStyles)?;
    let scene = PromptScene::classify(quote);

    Ok(SynthesizedPrompt {
        text: scene.render(style, author),
        style: style.clone(),
        scene,
    })
}
