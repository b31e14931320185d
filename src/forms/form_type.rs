// Form types
//
// Each independent questionnaire flow the portal exposes. The path segment and the
// terminal step count are fixed per type.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormType {
    BrandKit,
    Questionnaire,
    Organization,
    ProductService,
}

pub const ALL_FORM_TYPES: [FormType; 4] = [
    FormType::BrandKit,
    FormType::Questionnaire,
    FormType::Organization,
    FormType::ProductService,
];

impl FormType {
    /// REST path segment: `PUT /{segment}/save`, `GET /{segment}/data/{userId}`.
    pub fn path_segment(&self) -> &'static str {
        match self {
            FormType::BrandKit => "brand-kit",
            FormType::Questionnaire => "brand-kit-questionnaire",
            FormType::Organization => "organization",
            FormType::ProductService => "product-service",
        }
    }

    pub fn total_steps(&self) -> u32 {
        match self {
            FormType::BrandKit => 11,
            FormType::Questionnaire => 12,
            FormType::Organization => 6,
            FormType::ProductService => 5,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FormType::BrandKit => "Brand Kit",
            FormType::Questionnaire => "Brand Kit Questionnaire",
            FormType::Organization => "Organization",
            FormType::ProductService => "Product / Service",
        }
    }
}
