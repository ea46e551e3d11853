//! Note domain models

use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Category assigned when none is chosen
pub const DEFAULT_CATEGORY: &str = "general";

/// Categories offered by the note editor
pub const NOTE_CATEGORIES: &[&str] = &[
    "general", "work", "personal", "ideas", "research", "meeting", "project",
];

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn validate_category(category: &str) -> std::result::Result<(), validator::ValidationError> {
    if NOTE_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("unknown_category"))
    }
}

/// Note as returned by the API. Identity and timestamps are server-owned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub content: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating or updating a note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NoteInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(custom(function = "validate_category"))]
    pub category: String,
    pub tags: Vec<String>,
    pub is_public: bool,
}

/// List filters for `GET /notes`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Editor-side working copy of a note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub is_public: bool,
}

impl Default for NoteDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            category: default_category(),
            tags: Vec::new(),
            is_public: false,
        }
    }
}

impl From<&Note> for NoteDraft {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            category: note.category.clone(),
            tags: note.tags.clone(),
            is_public: note.is_public,
        }
    }
}

impl NoteDraft {
    /// Add a tag. Blank and duplicate tags are ignored; returns whether it was added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    pub fn toggle_public(&mut self) {
        self.is_public = !self.is_public;
    }

    /// Build the request payload: trims text, falls back to the default
    /// category and rejects a draft without title or content.
    pub fn to_input(&self) -> Result<NoteInput> {
        let title = self.title.trim();
        let content = self.content.trim();
        if title.is_empty() || content.is_empty() {
            return Err(AppError::Validation(
                "Please provide both a title and content for your note".to_string(),
            ));
        }

        let category = match self.category.trim() {
            "" => default_category(),
            c => c.to_string(),
        };

        let input = NoteInput {
            title: title.to_string(),
            content: content.to_string(),
            category,
            tags: self.tags.clone(),
            is_public: self.is_public,
        };
        input.validate()?;
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_deserialize_defaults() {
        let note: Note = serde_json::from_str(
            r#"{"id":"n1","title":"Hello","content":"World","createdAt":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(note.category, DEFAULT_CATEGORY);
        assert!(note.tags.is_empty());
        assert!(!note.is_public);
        assert!(note.created_at.is_some());
        assert!(note.account_id.is_none());
    }

    #[test]
    fn test_input_serializes_camel_case() {
        let input = NoteInput {
            title: "t".into(),
            content: "c".into(),
            category: "work".into(),
            tags: vec!["a".into()],
            is_public: true,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["isPublic"], true);
        assert_eq!(value["category"], "work");
    }

    #[test]
    fn test_draft_requires_title_and_content() {
        let draft = NoteDraft {
            title: "   ".into(),
            content: "body".into(),
            ..Default::default()
        };
        assert!(matches!(draft.to_input(), Err(AppError::Validation(_))));

        let draft = NoteDraft {
            title: "Title".into(),
            content: "\n".into(),
            ..Default::default()
        };
        assert!(draft.to_input().is_err());
    }

    #[test]
    fn test_draft_trims_and_defaults_category() {
        let draft = NoteDraft {
            title: "  Title ".into(),
            content: " Body\n".into(),
            category: String::new(),
            ..Default::default()
        };
        let input = draft.to_input().unwrap();
        assert_eq!(input.title, "Title");
        assert_eq!(input.content, "Body");
        assert_eq!(input.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_draft_rejects_unknown_category() {
        let draft = NoteDraft {
            title: "Title".into(),
            content: "Body".into(),
            category: "recipes".into(),
            ..Default::default()
        };
        assert!(matches!(draft.to_input(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_tags_are_trimmed_and_deduplicated() {
        let mut draft = NoteDraft::default();
        assert!(draft.add_tag(" rust "));
        assert!(!draft.add_tag("rust"));
        assert!(!draft.add_tag("   "));
        assert!(draft.add_tag("notes"));
        assert_eq!(draft.tags, vec!["rust", "notes"]);

        draft.remove_tag("rust");
        assert_eq!(draft.tags, vec!["notes"]);
    }

    #[test]
    fn test_draft_from_note() {
        let note = Note {
            id: Some("n1".into()),
            title: "T".into(),
            content: "C".into(),
            category: "ideas".into(),
            tags: vec!["x".into()],
            is_public: true,
            account_id: None,
            created_at: None,
            updated_at: None,
        };
        let mut draft = NoteDraft::from(&note);
        assert_eq!(draft.category, "ideas");
        draft.toggle_public();
        assert!(!draft.is_public);
    }

    #[test]
    fn test_query_skips_empty_filters() {
        let query = NoteQuery {
            tag: Some("rust".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value, serde_json::json!({ "tag": "rust" }));
    }
}
