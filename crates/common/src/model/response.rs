//! Generic response wrapper
//!
//! Carries a machine-readable code, a human-readable message, and an optional
//! payload. Message templates use `{}` placeholders filled positionally, in
//! the style of logging macros.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Code carried by successful responses.
pub const CODE_SUCCESS: &str = "SUCCESS";
/// Code carried by failed responses that do not set their own.
pub const CODE_FAIL: &str = "FAIL";

const MSG_SUCCESS: &str = "operation succeeded";
const MSG_FAIL: &str = "operation failed";

/// Response wrapper for service and API boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response code; [`CODE_SUCCESS`] on the happy path.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Payload, absent on most failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn success(data: T) -> Self {
        Self { code: CODE_SUCCESS.to_string(), message: MSG_SUCCESS.to_string(), data: Some(data) }
    }

    /// Successful response with a templated message.
    ///
    /// Each `{}` in `template` is replaced by the next argument in order;
    /// an empty template falls back to the default success message.
    pub fn success_fmt(data: T, template: &str, args: &[&dyn Display]) -> Self {
        Self {
            code: CODE_SUCCESS.to_string(),
            message: format_template(template, MSG_SUCCESS, args),
            data: Some(data),
        }
    }

    /// Failed response with the default fail code.
    pub fn fail(message: impl Into<String>) -> Self {
        Self::fail_with_code(CODE_FAIL, message)
    }

    /// Failed response with an explicit code.
    pub fn fail_with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() { MSG_FAIL.to_string() } else { message };
        Self { code: code.into(), message, data: None }
    }

    /// Failed response with a templated message.
    pub fn fail_fmt(template: &str, args: &[&dyn Display]) -> Self {
        Self {
            code: CODE_FAIL.to_string(),
            message: format_template(template, MSG_FAIL, args),
            data: None,
        }
    }

    /// Success when `affected_rows > 0`, failure otherwise. Mirrors the
    /// common "did the update touch anything" persistence idiom.
    pub fn from_affected_rows(affected_rows: u64) -> Self {
        if affected_rows > 0 {
            Self {
                code: CODE_SUCCESS.to_string(),
                message: format!("operation succeeded ({affected_rows} rows affected)"),
                data: None,
            }
        } else {
            Self::fail("operation failed (0 rows affected)")
        }
    }

    /// Whether this response carries the success code.
    pub fn is_success(&self) -> bool {
        self.code == CODE_SUCCESS
    }

    /// Whether this response carries any failure code.
    pub fn is_fail(&self) -> bool {
        !self.is_success()
    }
}

/// Replace each `{}` in `template` with the next argument, in order.
/// Surplus placeholders stay as-is; surplus arguments are ignored.
fn format_template(template: &str, default_msg: &str, args: &[&dyn Display]) -> String {
    if template.is_empty() {
        return default_msg.to_string();
    }
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut next_arg = 0;
    while let Some(index) = rest.find("{}") {
        if next_arg >= args.len() {
            break;
        }
        out.push_str(&rest[..index]);
        out.push_str(&args[next_arg].to_string());
        next_arg += 1;
        rest = &rest[index + 2..];
    }
    out.push_str(rest);
    out
}
