//! Static prompt catalog.
//!
//! # Responsibility
//! - Define the fixed, ordered list of writing prompts.
//! - Resolve prompts by position and by key.
//!
//! # Invariants
//! - `key` is unique across the catalog.
//! - Catalog order is fixed and defines default navigation order.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// One thematic writing cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptDefinition {
    /// Short stable identifier, used as the response map key.
    pub key: &'static str,
    /// Native-language term.
    pub label_primary: &'static str,
    /// Translated term.
    pub label_secondary: &'static str,
    /// Hint shown while no response exists.
    pub placeholder: &'static str,
}

/// Hint shown in reflection view while the reflection is empty.
pub const REFLECTION_PLACEHOLDER: &str = "Let your thoughts flow... How do these elements connect? What story emerges from your GHOST SCRAMBLE?";

const CATALOG: &[PromptDefinition] = &[
    prompt(
        "G",
        "Gedanke",
        "Thought",
        "What thought keeps returning to you today?",
    ),
    prompt(
        "H",
        "Herz",
        "Heart",
        "What does your heart feel right now?",
    ),
    prompt(
        "O",
        "Objekt",
        "Object",
        "What object holds meaning for you today?",
    ),
    prompt(
        "S",
        "Stimmung",
        "Mood",
        "How would you describe the atmosphere around you?",
    ),
    prompt(
        "T",
        "Text",
        "Text",
        "What words, quote, or text resonates with you?",
    ),
    prompt(
        "S2",
        "Symbol",
        "Logo/Symbol",
        "What symbol or image represents this moment?",
    ),
    prompt(
        "C",
        "Crux",
        "Crux of the Matter",
        "What is the heart of what you're experiencing?",
    ),
    prompt(
        "R",
        "Richtung",
        "Direction",
        "Where do you feel yourself moving toward?",
    ),
    prompt(
        "A",
        "Abwesenheit",
        "Absence",
        "What is missing or what do you long for?",
    ),
    prompt(
        "M",
        "Mensch",
        "Person",
        "Who comes to mind? What person influences this moment?",
    ),
    prompt(
        "B",
        "Bild",
        "Picture",
        "What image or scene do you see in your mind?",
    ),
    prompt(
        "L",
        "Lied",
        "Song",
        "What music or rhythm matches your inner state?",
    ),
    prompt(
        "E",
        "Erinnerungsort",
        "Memory Place",
        "What place - real or imagined - holds significance?",
    ),
];

const fn prompt(
    key: &'static str,
    label_primary: &'static str,
    label_secondary: &'static str,
    placeholder: &'static str,
) -> PromptDefinition {
    PromptDefinition {
        key,
        label_primary,
        label_secondary,
        placeholder,
    }
}

/// Invalid catalog reference passed by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Index is not in `[0, catalog_size)`.
    OutOfRange { index: usize, len: usize },
    /// Key does not name any catalog prompt.
    UnknownPromptKey(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "prompt index {index} out of range (catalog size {len})")
            }
            Self::UnknownPromptKey(key) => write!(f, "unknown prompt key: `{key}`"),
        }
    }
}

impl Error for CatalogError {}

/// Returns all prompts in navigation order.
pub fn catalog() -> &'static [PromptDefinition] {
    CATALOG
}

/// Returns the fixed prompt count.
pub fn catalog_size() -> usize {
    CATALOG.len()
}

/// Returns the prompt at `index`.
pub fn prompt_at(index: usize) -> Result<&'static PromptDefinition, CatalogError> {
    CATALOG.get(index).ok_or(CatalogError::OutOfRange {
        index,
        len: CATALOG.len(),
    })
}

/// Returns the catalog position of `key`.
pub fn prompt_index(key: &str) -> Result<usize, CatalogError> {
    CATALOG
        .iter()
        .position(|prompt| prompt.key == key)
        .ok_or_else(|| CatalogError::UnknownPromptKey(key.to_string()))
}
