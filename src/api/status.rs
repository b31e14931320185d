// Completion/status checker
//
// Queries every form type independently and aggregates completion. One form's failing
// query degrades that form to "not started"; it must never abort the checks for the
// others. The result gates whether a user lands on the dashboard or is redirected into
// a form at step 1.

use std::collections::HashMap;

use futures::future::join_all;
use log::warn;

use crate::api::FormPersistence;
use crate::forms::form_type::{FormType, ALL_FORM_TYPES};
use crate::models::responses::FormDataResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormStatus {
    pub completed: bool,
    /// 0 means not started.
    pub current_step: u32,
    pub total_steps: u32,
}

impl FormStatus {
    fn not_started(form: FormType) -> Self {
        Self {
            completed: false,
            current_step: 0,
            total_steps: form.total_steps(),
        }
    }

    fn from_snapshot(form: FormType, snapshot: &FormDataResponse) -> Self {
        let total = form.total_steps();
        Self {
            // Older backends omit the flag; a form is then complete when its stored
            // step reached the terminal step count.
            completed: snapshot
                .completed
                .unwrap_or(snapshot.current_step >= total),
            current_step: snapshot.current_step.min(total),
            total_steps: total,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusReport {
    statuses: HashMap<FormType, FormStatus>,
}

impl StatusReport {
    pub fn status(&self, form: FormType) -> FormStatus {
        self.statuses
            .get(&form)
            .copied()
            .unwrap_or_else(|| FormStatus::not_started(form))
    }

    pub fn has_any_completed(&self) -> bool {
        self.statuses.values().any(|s| s.completed)
    }
}

/// Where to send the user after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    /// Land on step 1 of the designated form, bypassing normal navigation.
    StartForm(FormType),
}

pub async fn check_all_form_status<P>(persistence: &P, user_id: i64) -> StatusReport
where
    P: FormPersistence + Sync,
{
    let checks = ALL_FORM_TYPES.map(|form| async move {
        let status = match persistence.fetch_form(form, user_id).await {
            Ok(snapshot) => FormStatus::from_snapshot(form, &snapshot),
            Err(err) => {
                warn!(
                    "[PHASE: status] [STEP: check] {:?} status query failed, treating as not started: {}",
                    form, err
                );
                FormStatus::not_started(form)
            }
        };
        (form, status)
    });

    StatusReport {
        statuses: join_all(checks).await.into_iter().collect(),
    }
}

/// Users with no completed form are redirected into the Brand Kit wizard at step 1;
/// everyone else gets the dashboard.
pub fn route_after_login(report: &StatusReport) -> Route {
    if report.has_any_completed() {
        Route::Dashboard
    } else {
        Route::StartForm(FormType::BrandKit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PortalError;
    use crate::forms::mapping::PersistedRecord;
    use crate::models::responses::SaveStepResponse;
    use async_trait::async_trait;
    use serde_json::Map;
    use std::collections::HashSet;

    /// Fake that fails the configured form types and answers for the rest.
    struct FlakyPersistence {
        failing: HashSet<FormType>,
        steps: HashMap<FormType, u32>,
    }

    #[async_trait]
    impl FormPersistence for FlakyPersistence {
        async fn fetch_form(
            &self,
            form: FormType,
            _user_id: i64,
        ) -> Result<FormDataResponse, PortalError> {
            if self.failing.contains(&form) {
                return Err(PortalError::Backend("status query exploded".to_string()));
            }
            Ok(FormDataResponse {
                current_step: self.steps.get(&form).copied().unwrap_or(0),
                form_data: Map::new(),
                completed: None,
            })
        }

        async fn save_step(
            &self,
            _form: FormType,
            _user_id: i64,
            _step: u32,
            _record: &PersistedRecord,
        ) -> Result<SaveStepResponse, PortalError> {
            unreachable!("status checker never saves")
        }

        async fn mark_complete(&self, _form: FormType, _user_id: i64) -> Result<(), PortalError> {
            unreachable!("status checker never completes")
        }
    }

    #[tokio::test]
    async fn one_failing_form_does_not_abort_the_others() {
        let fake = FlakyPersistence {
            failing: HashSet::from([FormType::Organization]),
            steps: HashMap::from([
                (FormType::BrandKit, 11),
                (FormType::ProductService, 2),
                (FormType::Questionnaire, 0),
            ]),
        };

        let report = check_all_form_status(&fake, 42).await;

        let org = report.status(FormType::Organization);
        assert!(!org.completed);
        assert_eq!(org.current_step, 0, "failed query reads as not started");

        assert!(
            report.status(FormType::BrandKit).completed,
            "step 11 of 11 counts as complete"
        );
        let ps = report.status(FormType::ProductService);
        assert!(!ps.completed);
        assert_eq!(ps.current_step, 2);
    }

    #[tokio::test]
    async fn has_any_completed_is_an_or_over_all_forms() {
        let none_done = FlakyPersistence {
            failing: HashSet::new(),
            steps: HashMap::from([(FormType::BrandKit, 3)]),
        };
        let report = check_all_form_status(&none_done, 1).await;
        assert!(!report.has_any_completed());
        assert_eq!(
            route_after_login(&report),
            Route::StartForm(FormType::BrandKit)
        );

        let one_done = FlakyPersistence {
            failing: HashSet::new(),
            steps: HashMap::from([(FormType::ProductService, 5)]),
        };
        let report = check_all_form_status(&one_done, 1).await;
        assert!(report.has_any_completed());
        assert_eq!(route_after_login(&report), Route::Dashboard);
    }

    #[tokio::test]
    async fn all_queries_failing_still_yields_a_full_report() {
        let fake = FlakyPersistence {
            failing: HashSet::from(ALL_FORM_TYPES),
            steps: HashMap::new(),
        };
        let report = check_all_form_status(&fake, 7).await;
        for form in ALL_FORM_TYPES {
            let status = report.status(form);
            assert!(!status.completed);
            assert_eq!(status.total_steps, form.total_steps());
        }
    }
}
