// Form answer values
//
// The source of truth for "what did the user type" across every step of a wizard.
// Values are grouped by shape, not by widget: the owning FieldSpec's kind decides which
// shapes are legal for a given key (see forms::steps).

use std::collections::BTreeMap;

use serde_json::Value;

/// All answers for one open form, keyed by UI (camelCase) field name.
pub type FormAnswers = BTreeMap<String, FieldValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Short text, long text, a single-select token, or a single color.
    Text(String),
    /// Tags, selected checkbox tokens, or a color list. Order is preserved.
    List(Vec<String>),
    /// A structured object (e.g. a parsed `primaryLocation`).
    Structured(Value),
    /// One uploaded (or about-to-be-uploaded) file.
    File(FileValue),
    /// Several files under one field.
    Files(Vec<FileValue>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileValue {
    /// Reference to a file the backend already holds (URL or storage key).
    Uploaded(String),
    /// A file picked in this session but not yet persisted. Never serialized into a
    /// JSON body; it travels as its own multipart part.
    Pending(FileAttachment),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Emptiness as the required-field check sees it.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Structured(v) => v.is_null(),
            FieldValue::File(_) => false,
            FieldValue::Files(files) => files.is_empty(),
        }
    }

    /// True when this value carries bytes that still need a multipart upload.
    pub fn has_pending_files(&self) -> bool {
        match self {
            FieldValue::File(f) => matches!(f, FileValue::Pending(_)),
            FieldValue::Files(files) => files.iter().any(|f| matches!(f, FileValue::Pending(_))),
            _ => false,
        }
    }
}

impl FileValue {
    pub fn pending(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        FileValue::Pending(FileAttachment {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_text_counts_as_empty() {
        assert!(FieldValue::text("   ").is_empty());
        assert!(!FieldValue::text("a@b.com").is_empty());
    }

    #[test]
    fn empty_list_counts_as_empty() {
        assert!(FieldValue::List(vec![]).is_empty());
        assert!(!FieldValue::list(["modern"]).is_empty());
    }

    #[test]
    fn pending_files_are_detected_inside_lists() {
        let v = FieldValue::Files(vec![
            FileValue::Uploaded("https://cdn.example.com/logo.png".to_string()),
            FileValue::pending("draft.png", "image/png", vec![1, 2, 3]),
        ]);
        assert!(v.has_pending_files());

        let all_uploaded = FieldValue::Files(vec![FileValue::Uploaded("k".to_string())]);
        assert!(!all_uploaded.has_pending_files());
    }
}
