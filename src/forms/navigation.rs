// Form navigation controller
//
// State machine over Step(1)..Step(N). `next` validates and saves, `previous` never
// does either, `save_progress` saves without validating (partial progress must never
// be lost), and `next` at the terminal step is submit. A save in flight blocks further
// navigation structurally: every mutating operation takes `&mut self` and is awaited,
// so a second save cannot start while one is pending.

use log::info;
use uuid::Uuid;

use crate::api::FormPersistence;
use crate::error::PortalError;
use crate::forms::form_type::FormType;
use crate::forms::mapping::{to_persistence, to_ui, PersistedRecord};
use crate::forms::steps::{step_fields, visible_fields};
use crate::forms::store::FormStateStore;
use crate::models::answers::FormAnswers;
use crate::models::progress::WizardProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOutcome {
    /// Moved to the given step after saving the previous one.
    Advanced(u32),
    /// Terminal step saved and the form marked complete.
    Submitted,
}

pub struct WizardSession<P> {
    form: FormType,
    user_id: i64,
    store: FormStateStore,
    progress: WizardProgress,
    persistence: P,
}

impl<P: FormPersistence> WizardSession<P> {
    /// Fresh session at step 1 with no answers.
    pub fn start(form: FormType, user_id: i64, persistence: P) -> Self {
        Self {
            form,
            user_id,
            store: FormStateStore::new(),
            progress: WizardProgress::start(form.total_steps()),
            persistence,
        }
    }

    /// Reopen a form: fetch the stored snapshot and reconstruct answers through the
    /// inverse field mapping. Unsaved answers from a previous session are gone by
    /// design; the backend is the only durable store.
    pub async fn load(form: FormType, user_id: i64, persistence: P) -> Result<Self, PortalError> {
        let snapshot = persistence.fetch_form(form, user_id).await?;
        let total = form.total_steps();
        let completed = snapshot
            .completed
            .unwrap_or(snapshot.current_step >= total);
        let record = PersistedRecord::from_json(&snapshot.form_data);
        Ok(Self {
            form,
            user_id,
            store: FormStateStore::from_answers(to_ui(form, &record)),
            progress: WizardProgress::resume(snapshot.current_step.max(1), total, completed),
            persistence,
        })
    }

    pub fn form(&self) -> FormType {
        self.form
    }

    pub fn progress(&self) -> WizardProgress {
        self.progress
    }

    pub fn store(&self) -> &FormStateStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FormStateStore {
        &mut self.store
    }

    /// Advance, or submit when already on the terminal step. Rejected (with no network
    /// call) if a visible required field on the current step is empty.
    pub async fn next(&mut self) -> Result<NextOutcome, PortalError> {
        self.validate_current_step()?;

        let step = self.progress.current_step;
        let correlation_id = Uuid::new_v4().simple().to_string();
        info!(
            "[PHASE: wizard] [STEP: next] saving {:?} step {} (correlation_id={})",
            self.form, step, correlation_id
        );

        self.persistence
            .save_step(self.form, self.user_id, step, &self.current_step_record())
            .await?;

        if self.progress.is_terminal() {
            self.persistence
                .mark_complete(self.form, self.user_id)
                .await?;
            self.progress.completed = true;
            info!(
                "[PHASE: wizard] [STEP: submit] {:?} submitted at step {} (correlation_id={})",
                self.form, step, correlation_id
            );
            return Ok(NextOutcome::Submitted);
        }

        self.progress.current_step = step + 1;
        Ok(NextOutcome::Advanced(self.progress.current_step))
    }

    /// Back navigation is non-destructive: no validation, no save. A no-op at step 1.
    pub fn previous(&mut self) -> u32 {
        if self.progress.current_step > 1 {
            self.progress.current_step -= 1;
        }
        self.progress.current_step
    }

    /// Explicit "Save Progress" escape hatch: saves the current step even when
    /// invalid or incomplete, and does not change state.
    pub async fn save_progress(&mut self) -> Result<(), PortalError> {
        let step = self.progress.current_step;
        info!(
            "[PHASE: wizard] [STEP: save] saving {:?} step {} without validation",
            self.form, step
        );
        self.persistence
            .save_step(self.form, self.user_id, step, &self.current_step_record())
            .await?;
        Ok(())
    }

    /// Entered only via the status checker's redirect; bypasses next/previous.
    pub fn jump_to_start(&mut self) {
        self.progress.current_step = 1;
    }

    fn validate_current_step(&self) -> Result<(), PortalError> {
        let answers = self.store.answers();
        for spec in visible_fields(self.form, self.progress.current_step, answers) {
            if !spec.required {
                continue;
            }
            let missing = answers.get(spec.key).map_or(true, |v| v.is_empty());
            if missing {
                return Err(PortalError::MissingField {
                    key: spec.key.to_string(),
                    label: spec.label.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Only the fields owned by the current step are sent; hidden gated values are
    /// included as-is (stale but inert, never cleared).
    fn current_step_record(&self) -> PersistedRecord {
        let owned: FormAnswers = step_fields(self.form, self.progress.current_step)
            .iter()
            .filter_map(|spec| {
                self.store
                    .field(spec.key)
                    .map(|v| (spec.key.to_string(), v.clone()))
            })
            .collect();
        to_persistence(self.form, &owned)
    }
}
