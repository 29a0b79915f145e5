//! Deck passcode gate
//!
//! The investor deck sits behind a shared passcode checked by the backend at
//! `POST /api/verify-passcode`. This module holds the wire types, the verdict
//! rule the backend applies, and (on web) the client that asks for it.

use serde::{Deserialize, Serialize};

/// Endpoint path
pub const VERIFY_PATH: &str = "/api/verify-passcode";

/// Environment variable holding the expected passcode
pub const PASSCODE_ENV: &str = "DECK_PASSCODE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasscodeRequest {
    pub passcode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasscodeReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of a passcode check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Granted,
    Denied,
    /// No passcode configured on the server
    Unconfigured,
}

impl Verdict {
    /// HTTP status the backend answers with
    pub fn status(&self) -> u16 {
        match self {
            Verdict::Granted => 200,
            Verdict::Denied => 401,
            Verdict::Unconfigured => 503,
        }
    }

    pub fn reply(&self) -> PasscodeReply {
        match self {
            Verdict::Granted => PasscodeReply { success: true, error: None },
            Verdict::Denied => PasscodeReply { success: false, error: None },
            Verdict::Unconfigured => PasscodeReply {
                success: false,
                error: Some("Passcode not configured".to_string()),
            },
        }
    }
}

/// Passcode as it should be sent: surrounding whitespace dropped, `None`
/// when nothing is left
pub fn submitted_passcode(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Check a submitted passcode against the configured one. An unset or empty
/// secret never grants access.
pub fn verify_passcode(expected: Option<&str>, request: &PasscodeRequest) -> Verdict {
    match expected {
        None | Some("") => Verdict::Unconfigured,
        Some(expected) if request.passcode == expected => Verdict::Granted,
        Some(_) => Verdict::Denied,
    }
}

/// Configured passcode from the environment (native only)
#[cfg(not(target_arch = "wasm32"))]
pub fn expected_from_env() -> Option<String> {
    std::env::var(PASSCODE_ENV).ok()
}

/// Ask the backend whether `passcode` opens the deck (WASM only)
#[cfg(target_arch = "wasm32")]
pub async fn request_deck_access(passcode: &str) -> Result<bool, crate::error::GateError> {
    use crate::error::GateError;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    let body = serde_json::to_string(&PasscodeRequest {
        passcode: passcode.to_string(),
    })?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(&body));
    let request = Request::new_with_str_and_init(VERIFY_PATH, &init).map_err(GateError::network)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(GateError::network)?;

    let window = web_sys::window().ok_or_else(|| GateError::Network("no window".into()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(GateError::network)?
        .dyn_into()
        .map_err(GateError::network)?;

    if response.ok() {
        return Ok(true);
    }

    // Denied or unconfigured; the body only adds detail for the log
    let status = response.status();
    let text = JsFuture::from(response.text().map_err(GateError::network)?)
        .await
        .map_err(GateError::network)?
        .as_string()
        .unwrap_or_default();
    match serde_json::from_str::<PasscodeReply>(&text) {
        Ok(PasscodeReply { error: Some(error), .. }) => {
            log::warn!("Deck gate answered {}: {}", status, error)
        }
        Ok(_) => log::debug!("Deck gate answered {}", status),
        Err(e) => log::warn!("Deck gate answered {} with an unreadable body: {}", status, e),
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(passcode: &str) -> PasscodeRequest {
        PasscodeRequest {
            passcode: passcode.to_string(),
        }
    }

    #[test]
    fn test_verdicts() {
        assert_eq!(verify_passcode(Some("olympus"), &req("olympus")), Verdict::Granted);
        assert_eq!(verify_passcode(Some("olympus"), &req("Olympus")), Verdict::Denied);
        assert_eq!(verify_passcode(None, &req("olympus")), Verdict::Unconfigured);
        assert_eq!(verify_passcode(Some(""), &req("")), Verdict::Unconfigured);
    }

    #[test]
    fn test_status_and_reply_json() {
        assert_eq!(Verdict::Granted.status(), 200);
        assert_eq!(Verdict::Denied.status(), 401);
        assert_eq!(Verdict::Unconfigured.status(), 503);

        assert_eq!(
            serde_json::to_string(&Verdict::Granted.reply()).unwrap(),
            r#"{"success":true}"#
        );
        assert_eq!(
            serde_json::to_string(&Verdict::Unconfigured.reply()).unwrap(),
            r#"{"success":false,"error":"Passcode not configured"}"#
        );
    }

    #[test]
    fn test_submitted_passcode_is_trimmed() {
        assert_eq!(submitted_passcode("olympus "), Some("olympus"));
        assert_eq!(submitted_passcode("\t olympus\n"), Some("olympus"));
        assert_eq!(submitted_passcode("two words"), Some("two words"));
        assert_eq!(submitted_passcode(""), None);
        assert_eq!(submitted_passcode("   "), None);
    }

    #[test]
    fn test_trailing_space_still_grants() {
        let typed = "olympus ";
        let request = req(submitted_passcode(typed).unwrap());
        assert_eq!(verify_passcode(Some("olympus"), &request), Verdict::Granted);
    }

    #[test]
    fn test_reply_without_error_field() {
        let reply: PasscodeReply = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert_eq!(reply, Verdict::Denied.reply());
    }
}
