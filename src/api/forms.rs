// Form persistence over REST
//
// `build_save_body` is the pure half: it decides between a single JSON body and a
// multipart request (needed iff the step carries not-yet-uploaded file bytes, since a
// JSON body cannot carry binary attachments). The impl below is the transport half.

use async_trait::async_trait;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::api::client::PortalClient;
use crate::api::FormPersistence;
use crate::error::PortalError;
use crate::forms::form_type::FormType;
use crate::forms::mapping::{PersistedRecord, PersistedValue};
use crate::models::answers::FileValue;
use crate::models::requests::SaveStepRequest;
use crate::models::responses::{ApiResponse, FormDataResponse, SaveStepResponse};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FilePart {
    pub field_key: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SaveBody {
    Json(SaveStepRequest),
    Multipart {
        user_id: i64,
        current_step: u32,
        /// Non-file fields, serialized as one `stepData` text part.
        step_data: Map<String, Value>,
        files: Vec<FilePart>,
    },
}

/// Split a persistence record into a wire body. Already-uploaded references are plain
/// strings and stay inside `stepData`; pending attachments force multipart and each
/// becomes its own part. `userId` and `currentStep` always travel alongside the field
/// payload, never inside it.
pub(crate) fn build_save_body(user_id: i64, current_step: u32, record: &PersistedRecord) -> SaveBody {
    let mut step_data = Map::new();
    let mut files = Vec::new();

    for (key, value) in &record.0 {
        match value {
            PersistedValue::Json(v) => {
                step_data.insert(key.clone(), v.clone());
            }
            PersistedValue::File(f) => {
                split_file(key, f, &mut step_data, &mut files);
            }
            PersistedValue::Files(fs) => {
                let mut kept: Vec<Value> = Vec::new();
                for f in fs {
                    match f {
                        FileValue::Uploaded(reference) => {
                            kept.push(Value::String(reference.clone()))
                        }
                        FileValue::Pending(att) => files.push(FilePart {
                            field_key: key.clone(),
                            file_name: att.file_name.clone(),
                            content_type: att.content_type.clone(),
                            bytes: att.bytes.clone(),
                        }),
                    }
                }
                if !kept.is_empty() {
                    step_data.insert(key.clone(), Value::Array(kept));
                }
            }
        }
    }

    if files.is_empty() {
        SaveBody::Json(SaveStepRequest {
            user_id,
            current_step,
            step_data,
        })
    } else {
        SaveBody::Multipart {
            user_id,
            current_step,
            step_data,
            files,
        }
    }
}

fn split_file(
    key: &str,
    file: &FileValue,
    step_data: &mut Map<String, Value>,
    files: &mut Vec<FilePart>,
) {
    match file {
        FileValue::Uploaded(reference) => {
            step_data.insert(key.to_string(), Value::String(reference.clone()));
        }
        FileValue::Pending(att) => files.push(FilePart {
            field_key: key.to_string(),
            file_name: att.file_name.clone(),
            content_type: att.content_type.clone(),
            bytes: att.bytes.clone(),
        }),
    }
}

#[async_trait]
impl FormPersistence for PortalClient {
    async fn fetch_form(
        &self,
        form: FormType,
        user_id: i64,
    ) -> Result<FormDataResponse, PortalError> {
        let url = self.endpoint(&format!("{}/data/{}", form.path_segment(), user_id))?;
        let correlation_id = Uuid::new_v4().simple().to_string();
        info!(
            "[PHASE: persistence] [STEP: fetch] GET {:?} data for user {} (correlation_id={})",
            form, user_id, correlation_id
        );
        let resp = self.get(url).send().await?;
        expect_data(resp).await
    }

    async fn save_step(
        &self,
        form: FormType,
        user_id: i64,
        step: u32,
        record: &PersistedRecord,
    ) -> Result<SaveStepResponse, PortalError> {
        let url = self.endpoint(&format!("{}/save", form.path_segment()))?;
        let correlation_id = Uuid::new_v4().simple().to_string();

        let resp = match build_save_body(user_id, step, record) {
            SaveBody::Json(body) => {
                info!(
                    "[PHASE: persistence] [STEP: save] PUT {:?} step {} as JSON (correlation_id={})",
                    form, step, correlation_id
                );
                self.put(url).json(&body).send().await?
            }
            SaveBody::Multipart {
                user_id,
                current_step,
                step_data,
                files,
            } => {
                info!(
                    "[PHASE: persistence] [STEP: save] PUT {:?} step {} as multipart with {} file(s) (correlation_id={})",
                    form,
                    step,
                    files.len(),
                    correlation_id
                );
                let mut multipart = reqwest::multipart::Form::new()
                    .text("userId", user_id.to_string())
                    .text("currentStep", current_step.to_string())
                    .text("stepData", Value::Object(step_data).to_string());
                for part in files {
                    let file_part = reqwest::multipart::Part::bytes(part.bytes)
                        .file_name(part.file_name)
                        .mime_str(&part.content_type)?;
                    multipart = multipart.part(part.field_key, file_part);
                }
                self.put(url).multipart(multipart).send().await?
            }
        };
        expect_data(resp).await
    }

    async fn mark_complete(&self, form: FormType, user_id: i64) -> Result<(), PortalError> {
        let url = self.endpoint(&format!("{}/complete/{}", form.path_segment(), user_id))?;
        info!(
            "[PHASE: persistence] [STEP: complete] PUT {:?} complete for user {}",
            form, user_id
        );
        let resp = self.put(url).send().await?;
        let envelope = read_envelope::<Value>(resp).await?;
        if envelope.success {
            Ok(())
        } else {
            Err(backend_failure(envelope.message))
        }
    }
}

async fn read_envelope<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<ApiResponse<T>, PortalError> {
    let status = resp.status();
    match resp.json::<ApiResponse<T>>().await {
        Ok(envelope) => Ok(envelope),
        Err(err) if status.is_success() => Err(PortalError::Transport(err)),
        Err(_) => {
            warn!(
                "[PHASE: persistence] [STEP: response] HTTP {} with unreadable body",
                status.as_u16()
            );
            Err(PortalError::Backend(format!(
                "The server returned an error (HTTP {}).",
                status.as_u16()
            )))
        }
    }
}

async fn expect_data<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, PortalError> {
    let envelope = read_envelope::<T>(resp).await?;
    if !envelope.success {
        return Err(backend_failure(envelope.message));
    }
    envelope
        .data
        .ok_or_else(|| backend_failure(envelope.message))
}

fn backend_failure(message: Option<String>) -> PortalError {
    PortalError::Backend(
        message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "Something went wrong. Please try again.".to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::form_type::FormType;
    use crate::forms::mapping::to_persistence;
    use crate::models::answers::{FieldValue, FileValue, FormAnswers};
    use serde_json::json;

    fn record_with(answers: FormAnswers) -> PersistedRecord {
        to_persistence(FormType::BrandKit, &answers)
    }

    // -------------------------------------------------------------------------
    // Multipart switch
    // -------------------------------------------------------------------------

    #[test]
    fn no_files_produces_single_json_body() {
        let mut answers = FormAnswers::new();
        answers.insert("brandName".into(), FieldValue::text("Solara"));
        answers.insert("brandColors".into(), FieldValue::list(["#FF6B35"]));

        match build_save_body(42, 6, &record_with(answers)) {
            SaveBody::Json(req) => {
                assert_eq!(req.user_id, 42);
                assert_eq!(req.current_step, 6);
                assert_eq!(req.step_data.get("brand_name"), Some(&json!("Solara")));
                assert_eq!(req.step_data.get("brand_colors"), Some(&json!(["#FF6B35"])));
            }
            other => panic!("expected JSON body, got {:?}", other),
        }
    }

    #[test]
    fn pending_file_switches_to_multipart_with_identical_non_file_values() {
        let mut answers = FormAnswers::new();
        answers.insert("brandName".into(), FieldValue::text("Solara"));
        answers.insert(
            "logoFiles".into(),
            FieldValue::Files(vec![FileValue::pending("logo.png", "image/png", vec![9, 9])]),
        );

        match build_save_body(42, 8, &record_with(answers)) {
            SaveBody::Multipart {
                user_id,
                current_step,
                step_data,
                files,
            } => {
                assert_eq!(user_id, 42);
                assert_eq!(current_step, 8);
                // Non-file values identical to the JSON-body case.
                assert_eq!(step_data.get("brand_name"), Some(&json!("Solara")));
                assert_eq!(files.len(), 1);
                assert_eq!(files[0].field_key, "logo_files");
                assert_eq!(files[0].file_name, "logo.png");
            }
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    #[test]
    fn already_uploaded_references_stay_in_the_json_body() {
        let mut answers = FormAnswers::new();
        answers.insert(
            "logoFiles".into(),
            FieldValue::Files(vec![FileValue::Uploaded(
                "https://cdn.example.com/logo.png".into(),
            )]),
        );

        match build_save_body(1, 8, &record_with(answers)) {
            SaveBody::Json(req) => {
                assert_eq!(
                    req.step_data.get("logo_files"),
                    Some(&json!(["https://cdn.example.com/logo.png"])),
                    "uploaded references are plain strings, no multipart needed"
                );
            }
            other => panic!("expected JSON body, got {:?}", other),
        }
    }

    #[test]
    fn cleared_file_list_sends_an_explicit_null_not_nothing() {
        let mut answers = FormAnswers::new();
        answers.insert("logoFiles".into(), FieldValue::Files(vec![]));

        match build_save_body(1, 8, &record_with(answers)) {
            SaveBody::Json(req) => {
                assert_eq!(
                    req.step_data.get("logo_files"),
                    Some(&Value::Null),
                    "backend must be able to tell cleared apart from never touched"
                );
            }
            other => panic!("expected JSON body, got {:?}", other),
        }
    }

    #[test]
    fn mixed_uploads_split_between_body_and_parts() {
        let mut answers = FormAnswers::new();
        answers.insert(
            "logoFiles".into(),
            FieldValue::Files(vec![
                FileValue::Uploaded("https://cdn.example.com/old.png".into()),
                FileValue::pending("new.png", "image/png", vec![1]),
            ]),
        );

        match build_save_body(1, 8, &record_with(answers)) {
            SaveBody::Multipart {
                step_data, files, ..
            } => {
                assert_eq!(
                    step_data.get("logo_files"),
                    Some(&json!(["https://cdn.example.com/old.png"]))
                );
                assert_eq!(files.len(), 1);
                assert_eq!(files[0].file_name, "new.png");
            }
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    // -------------------------------------------------------------------------
    // Identifier separation
    // -------------------------------------------------------------------------

    #[test]
    fn user_id_never_collides_with_field_namespace() {
        // A persistence field literally named user_id must not be confused with the
        // envelope's userId.
        let mut answers = FormAnswers::new();
        answers.insert("user_id".into(), FieldValue::text("field-value"));

        match build_save_body(42, 1, &record_with(answers)) {
            SaveBody::Json(req) => {
                assert_eq!(req.user_id, 42);
                assert_eq!(req.step_data.get("user_id"), Some(&json!("field-value")));
            }
            other => panic!("expected JSON body, got {:?}", other),
        }
    }
}
