//! Explicit state for one in-progress inline edit.
//!
//! A view that enters edit mode snapshots the current value into a `Draft`
//! and edits the copy; committing yields the edited value, cancelling yields
//! the untouched original. Nothing else holds edit-mode state.
#![allow(dead_code)]

#[derive(Debug, Clone)]
pub struct Draft<T> {
    original: T,
    value: T,
}

impl<T: Clone + PartialEq> Draft<T> {
    pub fn begin(original: T) -> Self {
        Draft {
            value: original.clone(),
            original,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
    }

    pub fn is_dirty(&self) -> bool {
        self.value != self.original
    }

    /// Ends the edit, yielding the edited value.
    pub fn commit(self) -> T {
        self.value
    }

    /// Ends the edit, discarding changes.
    pub fn cancel(self) -> T {
        self.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rich_text::RichText;

    #[test]
    fn test_fresh_draft_is_clean() {
        let draft = Draft::begin(RichText::plain("hello"));
        assert!(!draft.is_dirty());
        assert_eq!(draft.value(), &RichText::plain("hello"));
    }

    #[test]
    fn test_commit_yields_edited_value() {
        let mut draft = Draft::begin("\\section{Old}".to_string());
        draft.set("\\section{New}".to_string());
        assert!(draft.is_dirty());
        assert_eq!(draft.commit(), "\\section{New}");
    }

    #[test]
    fn test_cancel_yields_original() {
        let mut draft = Draft::begin(RichText::plain("keep me"));
        draft.set(RichText::plain("scratch"));
        assert_eq!(draft.cancel(), RichText::plain("keep me"));
    }

    #[test]
    fn test_setting_back_to_original_is_clean() {
        let mut draft = Draft::begin(1);
        draft.set(2);
        draft.set(1);
        assert!(!draft.is_dirty());
    }
}
