// Wizard progress
//
// Mirrored to the backend as the single source of truth for "how far did this user
// get". `current_step` is 1-based and clamped; `completed` flips only after the
// terminal step's save succeeds.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardProgress {
    pub current_step: u32,
    pub total_steps: u32,
    pub completed: bool,
}

impl WizardProgress {
    pub fn start(total_steps: u32) -> Self {
        Self {
            current_step: 1,
            total_steps,
            completed: false,
        }
    }

    /// Build from an untrusted backend snapshot, clamping the step into range.
    pub fn resume(current_step: u32, total_steps: u32, completed: bool) -> Self {
        Self {
            current_step: current_step.clamp(1, total_steps),
            total_steps,
            completed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.current_step == self.total_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_clamps_out_of_range_steps() {
        assert_eq!(WizardProgress::resume(0, 11, false).current_step, 1);
        assert_eq!(WizardProgress::resume(99, 11, false).current_step, 11);
        assert_eq!(WizardProgress::resume(7, 11, false).current_step, 7);
    }

    #[test]
    fn start_begins_incomplete_at_step_one() {
        let p = WizardProgress::start(12);
        assert_eq!(p.current_step, 1);
        assert!(!p.completed);
        assert!(!p.is_terminal());
    }
}
