// Field mapping tables
//
// The UI speaks camelCase, the backend speaks snake_case. Each form type owns a static
// bidirectional table; within one table the mapping is a bijection (tested). Keys
// absent from a table pass through unchanged, which permits forward-compatible
// extension at the cost of silently admitting typos — unmapped keys are therefore
// logged in development builds.

use std::collections::BTreeMap;

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::forms::form_type::FormType;
use crate::forms::steps::{field_spec, FieldKind};
use crate::models::answers::{FieldValue, FileValue, FormAnswers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMappingEntry {
    pub ui_key: &'static str,
    pub persistence_key: &'static str,
}

const fn entry(ui_key: &'static str, persistence_key: &'static str) -> FieldMappingEntry {
    FieldMappingEntry {
        ui_key,
        persistence_key,
    }
}

/// Persistence-side fields that may arrive as a JSON-encoded string and should be
/// parsed into a structured object when possible.
const STRUCTURED_PERSISTENCE_FIELDS: &[&str] = &["primary_location"];

const BRAND_KIT_MAP: &[FieldMappingEntry] = &[
    entry("brandName", "brand_name"),
    entry("tagline", "tagline"),
    entry("missionStatement", "mission_statement"),
    entry("visionStatement", "vision_statement"),
    entry("brandStory", "brand_story"),
    entry("fullBusinessName", "full_business_name"),
    entry("businessEmail", "business_email"),
    entry("businessPhone", "business_phone"),
    entry("primaryLocation", "primary_location"),
    entry("targetAudience", "target_audience"),
    entry("audienceAgeRanges", "audience_age_ranges"),
    entry("audienceNotes", "audience_notes"),
    entry("brandPersonality", "brand_personality"),
    entry("brandVoice", "brand_voice"),
    entry("brandVoiceOther", "brand_voice_other"),
    entry("brandColors", "brand_colors"),
    entry("avoidColors", "avoid_colors"),
    entry("fontPreference", "font_preference"),
    entry("designStyle", "design_style"),
    entry("logoFiles", "logo_files"),
    entry("inspirationFiles", "inspiration_files"),
    entry("existingBrandAssets", "existing_brand_assets"),
    entry("assetNotes", "asset_notes"),
    entry("competitorUrls", "competitor_urls"),
    entry("differentiators", "differentiators"),
    entry("socialPlatforms", "social_platforms"),
    entry("instagramHandle", "instagram_handle"),
    entry("deliverableFormats", "deliverable_formats"),
    entry("launchTimeline", "launch_timeline"),
    entry("additionalNotes", "additional_notes"),
];

const QUESTIONNAIRE_MAP: &[FieldMappingEntry] = &[
    entry("businessDescription", "business_description"),
    entry("productsOverview", "products_overview"),
    entry("revenueModel", "revenue_model"),
    entry("idealCustomer", "ideal_customer"),
    entry("customerPainPoints", "customer_pain_points"),
    entry("brandValues", "brand_values"),
    entry("brandPromise", "brand_promise"),
    entry("competitors", "competitors"),
    entry("marketPosition", "market_position"),
    entry("toneWords", "tone_words"),
    entry("avoidWords", "avoid_words"),
    entry("colorPreferences", "color_preferences"),
    entry("colorMeaning", "color_meaning"),
    entry("logoIdeas", "logo_ideas"),
    entry("logoAvoid", "logo_avoid"),
    entry("sketchFiles", "sketch_files"),
    entry("typographyPreference", "typography_preference"),
    entry("typographyNotes", "typography_notes"),
    entry("inspirationLinks", "inspiration_links"),
    entry("inspirationFiles", "inspiration_files"),
    entry("marketingChannels", "marketing_channels"),
    entry("emailListSize", "email_list_size"),
    entry("successCriteria", "success_criteria"),
    entry("finalComments", "final_comments"),
];

const ORGANIZATION_MAP: &[FieldMappingEntry] = &[
    entry("companyName", "company_name"),
    entry("companyWebsite", "company_website"),
    entry("companyEmail", "company_email"),
    entry("companyPhone", "company_phone"),
    entry("primaryLocation", "primary_location"),
    entry("industryType", "industry_type"),
    entry("industryOther", "industry_other"),
    entry("companySize", "company_size"),
    entry("billingAddress", "billing_address"),
    entry("taxId", "tax_id"),
    entry("teamMembers", "team_members"),
    entry("preferredContactMethod", "preferred_contact_method"),
    entry("logoFile", "logo_file"),
    entry("brandGuidelinesFile", "brand_guidelines_file"),
];

const PRODUCT_SERVICE_MAP: &[FieldMappingEntry] = &[
    entry("offeringName", "offering_name"),
    entry("offeringType", "offering_type"),
    entry("offeringDescription", "offering_description"),
    entry("uniqueSellingPoints", "unique_selling_points"),
    entry("pricingModel", "pricing_model"),
    entry("priceRange", "price_range"),
    entry("customPricingNotes", "custom_pricing_notes"),
    entry("targetMarket", "target_market"),
    entry("launchDate", "launch_date"),
    entry("productImages", "product_images"),
    entry("additionalNotes", "additional_notes"),
];

pub fn mapping_table(form: FormType) -> &'static [FieldMappingEntry] {
    match form {
        FormType::BrandKit => BRAND_KIT_MAP,
        FormType::Questionnaire => QUESTIONNAIRE_MAP,
        FormType::Organization => ORGANIZATION_MAP,
        FormType::ProductService => PRODUCT_SERVICE_MAP,
    }
}

fn to_persistence_key(form: FormType, ui_key: &str) -> Option<&'static str> {
    mapping_table(form)
        .iter()
        .find(|e| e.ui_key == ui_key)
        .map(|e| e.persistence_key)
}

fn to_ui_key(form: FormType, persistence_key: &str) -> Option<&'static str> {
    mapping_table(form)
        .iter()
        .find(|e| e.persistence_key == persistence_key)
        .map(|e| e.ui_key)
}

// =========================
// Persistence-format record
// =========================

/// A step's answers translated into persistence format. File values stay separate from
/// JSON-able values so the adapter can decide between a plain body and multipart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedRecord(pub BTreeMap<String, PersistedValue>);

#[derive(Debug, Clone, PartialEq)]
pub enum PersistedValue {
    Json(Value),
    File(FileValue),
    Files(Vec<FileValue>),
}

impl PersistedRecord {
    pub fn has_pending_files(&self) -> bool {
        self.0.values().any(|v| match v {
            PersistedValue::File(f) => matches!(f, FileValue::Pending(_)),
            PersistedValue::Files(fs) => fs.iter().any(|f| matches!(f, FileValue::Pending(_))),
            PersistedValue::Json(_) => false,
        })
    }

    /// Reconstruct a record from a backend JSON object (e.g. `formData` in a fetch
    /// response). Raw JSON cannot carry pending attachments, so every value lands as
    /// `Json`; `to_ui` coerces shapes using the form schema.
    pub fn from_json(map: &Map<String, Value>) -> Self {
        PersistedRecord(
            map.iter()
                .map(|(k, v)| (k.clone(), PersistedValue::Json(v.clone())))
                .collect(),
        )
    }
}

// =========================
// UI -> persistence
// =========================

/// Translate UI answers into persistence format. Two value-level conversions apply:
/// an empty ordered sequence becomes an explicit `null` marker (so "cleared" is
/// distinguishable from "sequence-typed field"), and file values are carried as-is for
/// the adapter to split out.
pub fn to_persistence(form: FormType, answers: &FormAnswers) -> PersistedRecord {
    let mut record = BTreeMap::new();
    for (ui_key, value) in answers {
        let key = match to_persistence_key(form, ui_key) {
            Some(k) => k.to_string(),
            None => {
                if cfg!(debug_assertions) {
                    warn!(
                        "[PHASE: mapping] [STEP: to_persistence] unmapped field '{}' passed through for {:?}",
                        ui_key, form
                    );
                }
                ui_key.clone()
            }
        };
        let persisted = match value {
            FieldValue::Text(s) => PersistedValue::Json(Value::String(s.clone())),
            FieldValue::List(items) if items.is_empty() => PersistedValue::Json(Value::Null),
            FieldValue::List(items) => PersistedValue::Json(Value::Array(
                items.iter().map(|s| Value::String(s.clone())).collect(),
            )),
            FieldValue::Structured(v) => PersistedValue::Json(v.clone()),
            FieldValue::File(f) => PersistedValue::File(f.clone()),
            FieldValue::Files(fs) if fs.is_empty() => PersistedValue::Json(Value::Null),
            FieldValue::Files(fs) => PersistedValue::Files(fs.clone()),
        };
        record.insert(key, persisted);
    }
    PersistedRecord(record)
}

// =========================
// Persistence -> UI
// =========================

/// Inverse translation, schema-aware: the owning field's kind decides how raw JSON
/// shapes coerce back into answer values. `null` markers are treated as unset and
/// dropped. Malformed JSON in a structured field is tolerated; the raw string is
/// retained.
pub fn to_ui(form: FormType, record: &PersistedRecord) -> FormAnswers {
    let mut answers = FormAnswers::new();
    for (pkey, pvalue) in &record.0 {
        let ui_key = match to_ui_key(form, pkey) {
            Some(k) => k.to_string(),
            None => {
                debug!(
                    "[PHASE: mapping] [STEP: to_ui] unmapped field '{}' passed through for {:?}",
                    pkey, form
                );
                pkey.clone()
            }
        };
        let value = match pvalue {
            PersistedValue::File(f) => Some(FieldValue::File(f.clone())),
            PersistedValue::Files(fs) => Some(FieldValue::Files(fs.clone())),
            PersistedValue::Json(raw) => coerce_json(form, pkey, &ui_key, raw),
        };
        if let Some(v) = value {
            answers.insert(ui_key, v);
        }
    }
    answers
}

fn coerce_json(form: FormType, pkey: &str, ui_key: &str, raw: &Value) -> Option<FieldValue> {
    let kind = field_spec(form, ui_key).map(|f| f.kind);
    match raw {
        Value::Null => None,
        Value::String(s) => {
            if STRUCTURED_PERSISTENCE_FIELDS.contains(&pkey) {
                // Only an object counts as a successful parse; "123" stays text.
                return Some(match serde_json::from_str::<Value>(s) {
                    Ok(v) if v.is_object() => FieldValue::Structured(v),
                    _ => FieldValue::Text(s.clone()),
                });
            }
            if kind == Some(FieldKind::FileUpload) {
                return Some(FieldValue::File(FileValue::Uploaded(s.clone())));
            }
            Some(FieldValue::Text(s.clone()))
        }
        Value::Array(items) => {
            if kind == Some(FieldKind::FileUpload) {
                let files = items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .map(|s| FileValue::Uploaded(s.to_string()))
                    .collect();
                return Some(FieldValue::Files(files));
            }
            if items.iter().all(|v| v.is_string()) {
                let strings = items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .map(str::to_string)
                    .collect();
                return Some(FieldValue::List(strings));
            }
            Some(FieldValue::Structured(raw.clone()))
        }
        Value::Object(_) => Some(FieldValue::Structured(raw.clone())),
        // Numbers/bools are not produced by any field kind; keep them rather than drop
        // data the backend chose to send.
        other => Some(FieldValue::Structured(other.clone())),
    }
}
