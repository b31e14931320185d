// Input validation utilities

use anyhow::Result;
use regex::Regex;

/// Validate a brand color entered in the palette picker. Accepts #RGB and #RRGGBB.
pub fn validate_hex_color(value: &str) -> Result<()> {
    let s = value.trim();
    if s.is_empty() {
        return Err(anyhow::anyhow!("Color is required"));
    }

    let color_re = Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$")
        .map_err(|e| anyhow::anyhow!("Internal error: failed to compile color regex: {}", e))?;
    if !color_re.is_match(s) {
        return Err(anyhow::anyhow!(
            "'{}' is not a valid hex color (expected #RGB or #RRGGBB)",
            s
        ));
    }

    Ok(())
}

/// Validate an email address (basic shape check, not deliverability).
pub fn validate_email(value: &str) -> Result<()> {
    let s = value.trim();
    if s.is_empty() {
        return Err(anyhow::anyhow!("Email is required"));
    }

    // One @, a non-empty local part, and a dotted domain. The backend does the real
    // verification; this only catches typos before a save round-trip.
    let email_re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
        .map_err(|e| anyhow::anyhow!("Internal error: failed to compile email regex: {}", e))?;
    if !email_re.is_match(s) {
        return Err(anyhow::anyhow!("'{}' is not a valid email address", s));
    }

    Ok(())
}

/// Validate a phone number loosely. Digits, spaces, and common punctuation only.
pub fn validate_phone(value: &str) -> Result<()> {
    let s = value.trim();
    if s.is_empty() {
        return Err(anyhow::anyhow!("Phone number is required"));
    }

    let digits = s.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < 7 {
        return Err(anyhow::anyhow!("Phone number is too short"));
    }
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '+' | '.'))
    {
        return Err(anyhow::anyhow!(
            "Phone number contains invalid characters"
        ));
    }

    Ok(())
}
