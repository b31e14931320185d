// Backend REST surface
//
// `FormPersistence` is the seam between the wizard engine and the transport. The real
// implementation is `PortalClient` (reqwest); tests substitute fakes.

pub mod client;
pub mod forms;
pub mod status;

use async_trait::async_trait;

use crate::error::PortalError;
use crate::forms::form_type::FormType;
use crate::forms::mapping::PersistedRecord;
use crate::models::responses::{FormDataResponse, SaveStepResponse};

#[async_trait]
pub trait FormPersistence {
    /// `GET /{form}/data/{userId}` — the stored snapshot for one form.
    async fn fetch_form(
        &self,
        form: FormType,
        user_id: i64,
    ) -> Result<FormDataResponse, PortalError>;

    /// `PUT /{form}/save` — persist one step's answers (JSON or multipart, decided by
    /// the record's file content).
    async fn save_step(
        &self,
        form: FormType,
        user_id: i64,
        step: u32,
        record: &PersistedRecord,
    ) -> Result<SaveStepResponse, PortalError>;

    /// `PUT /{form}/complete/{userId}` — mark the form finished.
    async fn mark_complete(&self, form: FormType, user_id: i64) -> Result<(), PortalError>;
}
