// Logging utilities
// Structured logging with JSON and human-readable formats

use log::Level;
use serde_json::json;
use std::collections::HashMap;

/// Mask sensitive data in logs
pub fn mask_sensitive(input: &str) -> String {
    // Counted in chars, not bytes, so multibyte input cannot split a boundary.
    let chars: Vec<char> = input.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }

    let visible = 4;
    let start: String = chars[..visible].iter().collect();
    let end: String = chars[chars.len() - visible..].iter().collect();

    format!("{}...{}", start, end)
}

/// Mask a bearer token for log output. Keeps enough of the token to correlate log
/// lines without ever writing a usable credential.
pub fn mask_token(token: &str) -> String {
    let t = token.trim();
    if t.is_empty() {
        return String::new();
    }
    // "Bearer xyz" and bare tokens both show up in headers; mask only the secret part.
    if let Some(rest) = t.strip_prefix("Bearer ") {
        return format!("Bearer {}", mask_sensitive(rest.trim()));
    }
    mask_sensitive(t)
}

/// Mask an email address, keeping the domain visible for troubleshooting.
pub fn mask_email(email: &str) -> String {
    let e = email.trim();
    match e.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            format!("{}@{}", mask_sensitive(local), domain)
        }
        _ => mask_sensitive(e),
    }
}

/// Parse phase and step from log message
/// Extracts [PHASE: ...] and [STEP: ...] patterns
pub fn parse_log_metadata(message: &str) -> (Option<String>, Option<String>, String) {
    let mut phase = None;
    let mut step = None;
    let mut cleaned_message = message.to_string();

    // Extract [PHASE: ...]
    if let Some(start) = message.find("[PHASE:") {
        if let Some(end) = message[start..].find(']') {
            let phase_str = &message[start + 7..start + end].trim();
            phase = Some(phase_str.to_string());
            cleaned_message = format!("{} {}", &message[..start], &message[start + end + 1..])
                .trim()
                .to_string();
        }
    }

    // Extract [STEP: ...]
    if let Some(start) = cleaned_message.find("[STEP:") {
        if let Some(end) = cleaned_message[start..].find(']') {
            let step_str = &cleaned_message[start + 6..start + end].trim();
            step = Some(step_str.to_string());
            cleaned_message = format!(
                "{} {}",
                &cleaned_message[..start],
                &cleaned_message[start + end + 1..]
            )
            .trim()
            .to_string();
        }
    }

    (phase, step, cleaned_message)
}

/// Format log entry as JSON for structured logging
pub fn format_json_log(
    timestamp: &str,
    level: Level,
    target: &str,
    message: &str,
    phase: Option<&str>,
    step: Option<&str>,
    details: Option<&HashMap<String, serde_json::Value>>,
) -> String {
    let mut log_entry = json!({
        "timestamp": timestamp,
        "level": level.as_str(),
        "target": target,
        "message": message,
    });

    if let Some(phase) = phase {
        log_entry["phase"] = json!(phase);
    }

    if let Some(step) = step {
        log_entry["step"] = json!(step);
    }

    if let Some(details) = details {
        log_entry["details"] = json!(details);
    }

    serde_json::to_string(&log_entry).unwrap_or_else(|_| "{}".to_string())
}

/// Format log entry as human-readable text
pub fn format_human_readable_log(
    timestamp: &str,
    level: Level,
    target: &str,
    message: &str,
    phase: Option<&str>,
    step: Option<&str>,
) -> String {
    let mut log_line = format!("[{}] [{}]", timestamp, level.as_str());

    if let Some(phase) = phase {
        log_line.push_str(&format!(" [PHASE: {}]", phase));
    }

    if let Some(step) = step {
        log_line.push_str(&format!(" [STEP: {}]", step));
    }

    log_line.push_str(&format!(" [{}] {}", target, message));
    log_line
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // A) Secret masking (lock down "no secrets leak" rule)
    // -------------------------------------------------------------------------

    #[test]
    fn mask_token_never_leaks_the_secret() {
        let masked = mask_token("Bearer eyJhbGciOiJIUzI1NiJ9.payload.signature");
        assert!(masked.starts_with("Bearer "), "prefix kept: {}", masked);
        assert!(
            !masked.contains("payload"),
            "token body leaked: {}",
            masked
        );
        assert!(masked.contains("..."), "partially visible: {}", masked);
    }

    #[test]
    fn mask_token_short_values_fully_masked() {
        assert_eq!(mask_token("abc123"), "***");
        assert_eq!(mask_token(""), "");
    }

    #[test]
    fn mask_email_keeps_the_domain() {
        let masked = mask_email("samantha.ortiz@example.com");
        assert!(
            masked.ends_with("@example.com"),
            "domain should stay visible: {}",
            masked
        );
        assert!(
            !masked.contains("samantha.ortiz"),
            "local part leaked: {}",
            masked
        );
    }

    #[test]
    fn mask_email_handles_multibyte_local_parts() {
        let masked = mask_email("日本語テスト@example.com");
        assert!(
            masked.ends_with("@example.com"),
            "domain should stay visible: {}",
            masked
        );
        assert_eq!(masked, "***@example.com", "short local part fully masked");

        let long = mask_email("日本語テスト日本語テスト@example.com");
        assert!(long.contains("..."), "long local part partially masked: {}", long);
        assert!(!long.contains("テスト日本"), "middle must be hidden: {}", long);
    }

    #[test]
    fn mask_sensitive_long_values_partially_masked() {
        let masked = mask_sensitive("abcdefghijklmnop");
        assert!(masked.starts_with("abcd"), "start visible: {}", masked);
        assert!(masked.ends_with("mnop"), "end visible: {}", masked);
        assert!(masked.contains("..."), "middle hidden: {}", masked);
    }

    // -------------------------------------------------------------------------
    // B) Message metadata parsing
    // -------------------------------------------------------------------------

    #[test]
    fn parse_log_metadata_extracts_phase_and_step() {
        let (phase, step, cleaned) =
            parse_log_metadata("[PHASE: navigation] [STEP: next] advancing to step 4");
        assert_eq!(phase.as_deref(), Some("navigation"));
        assert_eq!(step.as_deref(), Some("next"));
        assert_eq!(cleaned, "advancing to step 4");
    }

    #[test]
    fn parse_log_metadata_leaves_plain_messages_alone() {
        let (phase, step, cleaned) = parse_log_metadata("nothing structured here");
        assert!(phase.is_none());
        assert!(step.is_none());
        assert_eq!(cleaned, "nothing structured here");
    }

    #[test]
    fn format_human_readable_log_includes_phase_markers() {
        let line = format_human_readable_log(
            "2026-08-23 10:00:00",
            Level::Info,
            "portal_client::forms",
            "saved",
            Some("persistence"),
            Some("save"),
        );
        assert!(line.contains("[PHASE: persistence]"));
        assert!(line.contains("[STEP: save]"));
        assert!(line.contains("saved"));
    }

    #[test]
    fn format_json_log_is_valid_json_with_metadata() {
        let raw = format_json_log(
            "2026-08-23 10:00:00",
            Level::Warn,
            "portal_client::api",
            "status query failed",
            Some("status"),
            Some("check"),
            None,
        );
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["level"], "WARN");
        assert_eq!(parsed["phase"], "status");
        assert_eq!(parsed["step"], "check");
    }
}
