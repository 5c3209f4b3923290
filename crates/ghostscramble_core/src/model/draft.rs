//! In-progress session state and prompt navigation.
//!
//! # Responsibility
//! - Hold responses, reflection, title, and the navigation cursor.
//! - Provide edit and navigation operations over the static catalog.
//!
//! # Invariants
//! - `responses` only holds catalog keys.
//! - `Cursor::Prompt(index)` always satisfies `index < catalog_size()`.
//! - Navigation never touches responses, reflection, or title.

use crate::model::prompt::{catalog, catalog_size, prompt_at, prompt_index};
use crate::model::prompt::{CatalogError, PromptDefinition};
use rand::Rng;
use std::collections::BTreeMap;

/// Which view the draft is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Editing the prompt at this catalog index.
    Prompt(usize),
    /// Editing the closing reflection.
    Reflection,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::Prompt(0)
    }
}

/// Mutable, unsaved editing state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftBuffer {
    responses: BTreeMap<String, String>,
    reflection: String,
    title: String,
    cursor: Cursor,
}

impl DraftBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a draft from copies of saved fields, cursor at the first prompt.
    ///
    /// Keys outside the catalog are dropped.
    pub fn from_parts(
        responses: &BTreeMap<String, String>,
        reflection: &str,
        title: impl Into<String>,
    ) -> Self {
        let responses = responses
            .iter()
            .filter(|(key, _)| prompt_index(key).is_ok())
            .map(|(key, text)| (key.clone(), text.clone()))
            .collect();
        Self {
            responses,
            reflection: reflection.to_string(),
            title: title.into(),
            cursor: Cursor::default(),
        }
    }

    /// Resets every field to its empty default.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn responses(&self) -> &BTreeMap<String, String> {
        &self.responses
    }

    pub fn response(&self, key: &str) -> Option<&str> {
        self.responses.get(key).map(String::as_str)
    }

    pub fn reflection(&self) -> &str {
        &self.reflection
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn is_reflection_view(&self) -> bool {
        self.cursor == Cursor::Reflection
    }

    /// Returns the prompt under the cursor, `None` in reflection view.
    pub fn current_prompt(&self) -> Option<&'static PromptDefinition> {
        match self.cursor {
            Cursor::Prompt(index) => prompt_at(index).ok(),
            Cursor::Reflection => None,
        }
    }

    pub fn set_response(&mut self, key: &str, text: impl Into<String>) -> Result<(), CatalogError> {
        prompt_index(key)?;
        self.responses.insert(key.to_string(), text.into());
        Ok(())
    }

    pub fn set_reflection(&mut self, text: impl Into<String>) {
        self.reflection = text.into();
    }

    pub fn set_title(&mut self, text: impl Into<String>) {
        self.title = text.into();
    }

    /// Writes `text` into whichever view the cursor is on.
    pub fn set_current_response(&mut self, text: impl Into<String>) {
        match self.current_prompt() {
            Some(prompt) => {
                self.responses.insert(prompt.key.to_string(), text.into());
            }
            None => self.reflection = text.into(),
        }
    }

    /// Returns whether `key` has a non-empty response.
    pub fn is_prompt_completed(&self, key: &str) -> bool {
        self.responses
            .get(key)
            .is_some_and(|text| !text.is_empty())
    }

    /// Number of catalog prompts with a non-empty response.
    pub fn completed_count(&self) -> usize {
        catalog()
            .iter()
            .filter(|prompt| self.is_prompt_completed(prompt.key))
            .count()
    }

    /// `completed_count / catalog_size`, in `[0, 1]`.
    pub fn progress_fraction(&self) -> f64 {
        self.completed_count() as f64 / catalog_size() as f64
    }

    /// True when nothing would be lost by discarding this draft.
    ///
    /// Any present response key counts, even a blanked one. Reflection and
    /// title count only when they hold non-whitespace text.
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
            && self.reflection.trim().is_empty()
            && self.title.trim().is_empty()
    }

    pub fn select_prompt(&mut self, index: usize) -> Result<(), CatalogError> {
        prompt_at(index)?;
        self.cursor = Cursor::Prompt(index);
        Ok(())
    }

    pub fn select_reflection(&mut self) {
        self.cursor = Cursor::Reflection;
    }

    /// Jumps to a uniformly random prompt; may repeat the current one.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    pub fn shuffle_with<R: Rng>(&mut self, rng: &mut R) {
        self.cursor = Cursor::Prompt(rng.gen_range(0..catalog_size()));
    }

    /// Advances with wrap-around; reflection view moves to the first prompt.
    pub fn next_prompt(&mut self) {
        self.cursor = match self.cursor {
            Cursor::Prompt(index) => Cursor::Prompt((index + 1) % catalog_size()),
            Cursor::Reflection => Cursor::Prompt(0),
        };
    }

    /// Steps back with wrap-around; reflection view moves to the last prompt.
    pub fn previous_prompt(&mut self) {
        let last = catalog_size() - 1;
        self.cursor = match self.cursor {
            Cursor::Prompt(0) | Cursor::Reflection => Cursor::Prompt(last),
            Cursor::Prompt(index) => Cursor::Prompt(index - 1),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::{Cursor, DraftBuffer};
    use crate::model::prompt::CatalogError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn set_response_rejects_unknown_key_without_mutation() {
        let mut draft = DraftBuffer::new();
        let err = draft.set_response("Z", "text").unwrap_err();
        assert_eq!(err, CatalogError::UnknownPromptKey("Z".to_string()));
        assert!(draft.is_empty());
    }

    #[test]
    fn blank_responses_do_not_count_as_completed() {
        let mut draft = DraftBuffer::new();
        draft.set_response("G", "thought").unwrap();
        draft.set_response("H", "").unwrap();

        assert_eq!(draft.completed_count(), 1);
        assert!(draft.is_prompt_completed("G"));
        assert!(!draft.is_prompt_completed("H"));
        assert!((draft.progress_fraction() - 1.0 / 13.0).abs() < f64::EPSILON);
        assert!(!draft.is_empty());
    }

    #[test]
    fn whitespace_reflection_and_title_leave_draft_empty() {
        let mut draft = DraftBuffer::new();
        draft.set_reflection(" \n\t ");
        draft.set_title("   ");
        assert!(draft.is_empty());

        draft.set_reflection(" it connects ");
        assert!(!draft.is_empty());
    }

    #[test]
    fn select_prompt_out_of_range_keeps_cursor() {
        let mut draft = DraftBuffer::new();
        draft.select_reflection();
        assert!(draft.select_prompt(13).is_err());
        assert_eq!(draft.cursor(), Cursor::Reflection);

        draft.select_prompt(4).unwrap();
        assert_eq!(draft.cursor(), Cursor::Prompt(4));
        assert!(!draft.is_reflection_view());
    }

    #[test]
    fn next_and_previous_wrap_around_catalog() {
        let mut draft = DraftBuffer::new();
        draft.previous_prompt();
        assert_eq!(draft.cursor(), Cursor::Prompt(12));
        draft.next_prompt();
        assert_eq!(draft.cursor(), Cursor::Prompt(0));

        draft.select_reflection();
        draft.next_prompt();
        assert_eq!(draft.cursor(), Cursor::Prompt(0));
    }

    #[test]
    fn shuffle_stays_in_prompt_range_and_leaves_content() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut draft = DraftBuffer::new();
        draft.set_title("kept");
        draft.select_reflection();

        for _ in 0..200 {
            draft.shuffle_with(&mut rng);
            match draft.cursor() {
                Cursor::Prompt(index) => assert!(index < 13),
                Cursor::Reflection => panic!("shuffle must never select reflection"),
            }
        }
        assert_eq!(draft.title(), "kept");
    }

    #[test]
    fn set_current_response_follows_cursor() {
        let mut draft = DraftBuffer::new();
        draft.select_prompt(1).unwrap();
        draft.set_current_response("warm");
        draft.select_reflection();
        draft.set_current_response("it connects");

        assert_eq!(draft.response("H"), Some("warm"));
        assert_eq!(draft.reflection(), "it connects");
    }
}
