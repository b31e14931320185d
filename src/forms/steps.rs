// Step definitions
//
// One page of a wizard owns a fixed, ordered subset of fields. Definitions are static
// data; the only thing computed from prior answers is the `depends_on` visibility
// check. A field hidden by an unmet gate keeps its value (stale but inert) and its
// `required` flag is not enforced while hidden.

use crate::forms::form_type::FormType;
use crate::models::answers::{FieldValue, FormAnswers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    ShortText,
    LongText,
    SingleSelect,
    MultiSelectCheckbox,
    TagList,
    ColorList,
    FileUpload,
}

impl FieldKind {
    /// Which value shapes an input of this kind may produce. A `ShortText` field also
    /// admits `Structured` because `primaryLocation` can load as a parsed object.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        match self {
            FieldKind::ShortText => {
                matches!(value, FieldValue::Text(_) | FieldValue::Structured(_))
            }
            FieldKind::LongText | FieldKind::SingleSelect => matches!(value, FieldValue::Text(_)),
            FieldKind::MultiSelectCheckbox | FieldKind::TagList | FieldKind::ColorList => {
                matches!(value, FieldValue::List(_))
            }
            FieldKind::FileUpload => {
                matches!(value, FieldValue::File(_) | FieldValue::Files(_))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependsOn {
    pub key: &'static str,
    pub match_value: &'static str,
}

impl DependsOn {
    /// Met when the gating answer equals (text) or contains (list) the match value.
    pub fn is_met(&self, answers: &FormAnswers) -> bool {
        match answers.get(self.key) {
            Some(FieldValue::Text(v)) => v == self.match_value,
            Some(FieldValue::List(items)) => items.iter().any(|v| v == self.match_value),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub options: &'static [&'static str],
    pub required: bool,
    pub depends_on: Option<DependsOn>,
}

impl FieldSpec {
    /// Visible unless an unmet `depends_on` gate hides it.
    pub fn is_visible(&self, answers: &FormAnswers) -> bool {
        match &self.depends_on {
            Some(gate) => gate.is_met(answers),
            None => true,
        }
    }
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind,
        options: &[],
        required: false,
        depends_on: None,
    }
}

const fn required(mut spec: FieldSpec) -> FieldSpec {
    spec.required = true;
    spec
}

const fn with_options(mut spec: FieldSpec, options: &'static [&'static str]) -> FieldSpec {
    spec.options = options;
    spec
}

const fn gated(mut spec: FieldSpec, key: &'static str, match_value: &'static str) -> FieldSpec {
    spec.depends_on = Some(DependsOn { key, match_value });
    spec
}

// =========================
// Brand Kit (11 steps)
// =========================

const BRAND_KIT_STEPS: [&[FieldSpec]; 11] = [
    // 1. Brand basics
    &[
        required(field("brandName", "Brand Name", FieldKind::ShortText)),
        field("tagline", "Tagline", FieldKind::ShortText),
    ],
    // 2. Brand story
    &[
        field("missionStatement", "Mission Statement", FieldKind::LongText),
        field("visionStatement", "Vision Statement", FieldKind::LongText),
        field("brandStory", "Brand Story", FieldKind::LongText),
    ],
    // 3. Contact details
    &[
        required(field("fullBusinessName", "Full Business Name", FieldKind::ShortText)),
        required(field("businessEmail", "Business Email", FieldKind::ShortText)),
        field("businessPhone", "Business Phone", FieldKind::ShortText),
        field("primaryLocation", "Primary Location", FieldKind::ShortText),
    ],
    // 4. Audience
    &[
        field("targetAudience", "Target Audience", FieldKind::LongText),
        with_options(
            field("audienceAgeRanges", "Audience Age Ranges", FieldKind::MultiSelectCheckbox),
            &["Under 18", "18-24", "25-34", "35-44", "45-54", "55+"],
        ),
        field("audienceNotes", "Audience Notes", FieldKind::LongText),
    ],
    // 5. Personality & voice
    &[
        with_options(
            field("brandPersonality", "Brand Personality", FieldKind::MultiSelectCheckbox),
            &["Bold", "Playful", "Elegant", "Minimal", "Rustic", "Luxurious", "Friendly", "Professional"],
        ),
        with_options(
            field("brandVoice", "Brand Voice", FieldKind::SingleSelect),
            &["Casual", "Professional", "Witty", "Authoritative", "Other"],
        ),
        required(gated(
            field("brandVoiceOther", "Describe Your Brand Voice", FieldKind::ShortText),
            "brandVoice",
            "Other",
        )),
    ],
    // 6. Colors
    &[
        field("brandColors", "Brand Colors", FieldKind::ColorList),
        field("avoidColors", "Colors to Avoid", FieldKind::ColorList),
    ],
    // 7. Typography & style
    &[
        with_options(
            field("fontPreference", "Font Preference", FieldKind::SingleSelect),
            &["Serif", "Sans-serif", "Script", "Display", "No preference"],
        ),
        with_options(
            field("designStyle", "Design Style", FieldKind::MultiSelectCheckbox),
            &["Modern", "Classic", "Vintage", "Hand-drawn", "Geometric", "Organic"],
        ),
    ],
    // 8. Existing assets
    &[
        field("logoFiles", "Current Logo Files", FieldKind::FileUpload),
        field("inspirationFiles", "Inspiration Files", FieldKind::FileUpload),
        with_options(
            field("existingBrandAssets", "Do You Have Existing Brand Assets?", FieldKind::SingleSelect),
            &["Yes", "No"],
        ),
        gated(
            field("assetNotes", "Tell Us About Your Assets", FieldKind::LongText),
            "existingBrandAssets",
            "Yes",
        ),
    ],
    // 9. Competitors
    &[
        field("competitorUrls", "Competitor Websites", FieldKind::TagList),
        field("differentiators", "What Sets You Apart", FieldKind::LongText),
    ],
    // 10. Social presence
    &[
        with_options(
            field("socialPlatforms", "Social Platforms", FieldKind::MultiSelectCheckbox),
            &["Instagram", "Facebook", "TikTok", "LinkedIn", "X", "YouTube"],
        ),
        gated(
            field("instagramHandle", "Instagram Handle", FieldKind::ShortText),
            "socialPlatforms",
            "Instagram",
        ),
    ],
    // 11. Wrap-up
    &[
        with_options(
            field("deliverableFormats", "Deliverable Formats", FieldKind::MultiSelectCheckbox),
            &["PNG", "SVG", "PDF", "Full brand guide"],
        ),
        required(with_options(
            field("launchTimeline", "Launch Timeline", FieldKind::SingleSelect),
            &["ASAP", "1-3 months", "3-6 months", "Flexible"],
        )),
        field("additionalNotes", "Additional Notes", FieldKind::LongText),
    ],
];

// =========================
// Brand Kit Questionnaire (12 steps)
// =========================

const QUESTIONNAIRE_STEPS: [&[FieldSpec]; 12] = [
    // 1. The business
    &[required(field("businessDescription", "Describe Your Business", FieldKind::LongText))],
    // 2. Offering & revenue
    &[
        field("productsOverview", "Products / Services Overview", FieldKind::LongText),
        with_options(
            field("revenueModel", "Revenue Model", FieldKind::SingleSelect),
            &["Products", "Services", "Both", "Subscriptions"],
        ),
    ],
    // 3. Customers
    &[
        field("idealCustomer", "Ideal Customer", FieldKind::LongText),
        field("customerPainPoints", "Customer Pain Points", FieldKind::TagList),
    ],
    // 4. Values & promise
    &[
        field("brandValues", "Brand Values", FieldKind::TagList),
        field("brandPromise", "Brand Promise", FieldKind::LongText),
    ],
    // 5. Market
    &[
        field("competitors", "Competitors", FieldKind::TagList),
        with_options(
            field("marketPosition", "Market Position", FieldKind::SingleSelect),
            &["Budget", "Mid-range", "Premium", "Luxury"],
        ),
    ],
    // 6. Tone
    &[
        field("toneWords", "Words That Describe Your Tone", FieldKind::TagList),
        field("avoidWords", "Words to Avoid", FieldKind::TagList),
    ],
    // 7. Color
    &[
        field("colorPreferences", "Color Preferences", FieldKind::ColorList),
        field("colorMeaning", "What Should Your Colors Convey", FieldKind::LongText),
    ],
    // 8. Logo direction
    &[
        field("logoIdeas", "Logo Ideas", FieldKind::LongText),
        field("logoAvoid", "Logo Directions to Avoid", FieldKind::LongText),
        field("sketchFiles", "Sketches or Drafts", FieldKind::FileUpload),
    ],
    // 9. Typography
    &[
        with_options(
            field("typographyPreference", "Typography Preference", FieldKind::SingleSelect),
            &["Serif", "Sans-serif", "Script", "No preference"],
        ),
        field("typographyNotes", "Typography Notes", FieldKind::LongText),
    ],
    // 10. Inspiration
    &[
        field("inspirationLinks", "Inspiration Links", FieldKind::TagList),
        field("inspirationFiles", "Inspiration Files", FieldKind::FileUpload),
    ],
    // 11. Marketing
    &[
        with_options(
            field("marketingChannels", "Marketing Channels", FieldKind::MultiSelectCheckbox),
            &["Email", "Social", "Paid ads", "Events", "SEO"],
        ),
        with_options(
            gated(
                field("emailListSize", "Email List Size", FieldKind::SingleSelect),
                "marketingChannels",
                "Email",
            ),
            &["Under 500", "500-5k", "5k-50k", "50k+"],
        ),
    ],
    // 12. Wrap-up
    &[
        field("successCriteria", "What Does Success Look Like", FieldKind::LongText),
        field("finalComments", "Final Comments", FieldKind::LongText),
    ],
];

// =========================
// Organization (6 steps)
// =========================

const ORGANIZATION_STEPS: [&[FieldSpec]; 6] = [
    // 1. Company
    &[
        required(field("companyName", "Company Name", FieldKind::ShortText)),
        field("companyWebsite", "Company Website", FieldKind::ShortText),
    ],
    // 2. Contact
    &[
        required(field("companyEmail", "Company Email", FieldKind::ShortText)),
        field("companyPhone", "Company Phone", FieldKind::ShortText),
        field("primaryLocation", "Primary Location", FieldKind::ShortText),
    ],
    // 3. Profile
    &[
        with_options(
            field("industryType", "Industry", FieldKind::SingleSelect),
            &["Retail", "Food & Beverage", "Health & Wellness", "Technology", "Professional Services", "Real Estate", "Other"],
        ),
        required(gated(
            field("industryOther", "Describe Your Industry", FieldKind::ShortText),
            "industryType",
            "Other",
        )),
        with_options(
            field("companySize", "Company Size", FieldKind::SingleSelect),
            &["1-10", "11-50", "51-200", "200+"],
        ),
    ],
    // 4. Billing
    &[
        field("billingAddress", "Billing Address", FieldKind::LongText),
        field("taxId", "Tax ID", FieldKind::ShortText),
    ],
    // 5. Team
    &[
        field("teamMembers", "Team Member Emails", FieldKind::TagList),
        with_options(
            field("preferredContactMethod", "Preferred Contact Method", FieldKind::SingleSelect),
            &["Email", "Phone", "Slack"],
        ),
    ],
    // 6. Assets
    &[
        field("logoFile", "Company Logo", FieldKind::FileUpload),
        field("brandGuidelinesFile", "Brand Guidelines", FieldKind::FileUpload),
    ],
];

// =========================
// Product / Service (5 steps)
// =========================

const PRODUCT_SERVICE_STEPS: [&[FieldSpec]; 5] = [
    // 1. The offering
    &[
        required(field("offeringName", "Product or Service Name", FieldKind::ShortText)),
        required(with_options(
            field("offeringType", "Offering Type", FieldKind::SingleSelect),
            &["Product", "Service"],
        )),
    ],
    // 2. Description
    &[
        field("offeringDescription", "Description", FieldKind::LongText),
        field("uniqueSellingPoints", "Unique Selling Points", FieldKind::TagList),
    ],
    // 3. Pricing
    &[
        with_options(
            field("pricingModel", "Pricing Model", FieldKind::SingleSelect),
            &["One-time", "Subscription", "Tiered", "Custom"],
        ),
        field("priceRange", "Price Range", FieldKind::ShortText),
        gated(
            field("customPricingNotes", "Custom Pricing Notes", FieldKind::LongText),
            "pricingModel",
            "Custom",
        ),
    ],
    // 4. Market
    &[
        field("targetMarket", "Target Market", FieldKind::LongText),
        field("launchDate", "Launch Date", FieldKind::ShortText),
    ],
    // 5. Media
    &[
        field("productImages", "Product Images", FieldKind::FileUpload),
        field("additionalNotes", "Additional Notes", FieldKind::LongText),
    ],
];

/// Fields owned by one step, in display order. `step` is 1-based and must be within
/// `form.total_steps()`.
pub fn step_fields(form: FormType, step: u32) -> &'static [FieldSpec] {
    let idx = step.saturating_sub(1) as usize;
    match form {
        FormType::BrandKit => BRAND_KIT_STEPS.get(idx).copied().unwrap_or(&[]),
        FormType::Questionnaire => QUESTIONNAIRE_STEPS.get(idx).copied().unwrap_or(&[]),
        FormType::Organization => ORGANIZATION_STEPS.get(idx).copied().unwrap_or(&[]),
        FormType::ProductService => PRODUCT_SERVICE_STEPS.get(idx).copied().unwrap_or(&[]),
    }
}

/// The fields a renderer should actually show for this step given current answers.
pub fn visible_fields(
    form: FormType,
    step: u32,
    answers: &FormAnswers,
) -> Vec<&'static FieldSpec> {
    step_fields(form, step)
        .iter()
        .filter(|f| f.is_visible(answers))
        .collect()
}

/// Look up a field's spec anywhere in the form (used for schema-aware value coercion).
pub fn field_spec(form: FormType, ui_key: &str) -> Option<&'static FieldSpec> {
    (1..=form.total_steps())
        .flat_map(|step| step_fields(form, step).iter())
        .find(|f| f.key == ui_key)
}
