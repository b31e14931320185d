// Form state store
//
// In-memory record of every answer across a wizard session. Only the currently
// rendered step's input controls write here (single writer, enforced by `&mut self`).
// The store performs no validation or coercion; values are held exactly as the input
// control produced them until the persistence adapter transforms them.

use crate::models::answers::{FieldValue, FormAnswers};

#[derive(Debug, Clone, Default)]
pub struct FormStateStore {
    answers: FormAnswers,
}

impl FormStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_answers(answers: FormAnswers) -> Self {
        Self { answers }
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.answers.get(key)
    }

    pub fn set_field(&mut self, key: impl Into<String>, value: FieldValue) {
        self.answers.insert(key.into(), value);
    }

    pub fn answers(&self) -> &FormAnswers {
        &self.answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_returns_exact_value() {
        let mut store = FormStateStore::new();
        store.set_field("businessEmail", FieldValue::text("a@b.com"));
        assert_eq!(
            store.field("businessEmail"),
            Some(&FieldValue::text("a@b.com"))
        );
        assert!(store.field("missing").is_none());
    }

    #[test]
    fn overwriting_replaces_without_coercion() {
        let mut store = FormStateStore::new();
        store.set_field("tags", FieldValue::list(["a"]));
        store.set_field("tags", FieldValue::List(vec![]));
        // An emptied list is held as-is; the mapping layer decides what it means.
        assert_eq!(store.field("tags"), Some(&FieldValue::List(vec![])));
    }
}
