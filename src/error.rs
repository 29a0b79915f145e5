//! Error types
//!
//! The simulation itself cannot fail; these cover mounting into the page,
//! frame scheduling, profile decoding and the deck passcode client.

use thiserror::Error;

/// Errors from mounting or driving the orb backdrop
#[derive(Error, Debug)]
pub enum OrbError {
    /// No global `window` (not running in a browser main thread)
    #[error("no window available")]
    NoWindow,

    /// Window has no document
    #[error("no document available")]
    NoDocument,

    /// A required element was not found in the page
    #[error("element not found: {0}")]
    MissingElement(String),

    /// A DOM call was rejected
    #[error("DOM operation failed: {0}")]
    Dom(String),

    /// The host refused a redraw request
    #[error("frame request failed: {0}")]
    FrameRequest(String),

    /// The frame callback was already released
    #[error("frame loop detached")]
    Detached,

    /// Profile JSON could not be decoded
    #[error("invalid profile: {0}")]
    ProfileDecode(#[from] serde_json::Error),

    /// Profile decoded but holds unusable values
    #[error("invalid profile value {field}: {value}")]
    ProfileValue {
        /// Offending field name
        field: &'static str,
        /// Rejected value
        value: f64,
    },
}

/// Errors from the deck passcode client
#[derive(Error, Debug)]
pub enum GateError {
    /// Request could not be built or sent
    #[error("network error: {0}")]
    Network(String),

    /// Reply body was not the expected JSON
    #[error("malformed reply: {0}")]
    BadReply(#[from] serde_json::Error),
}

#[cfg(target_arch = "wasm32")]
impl OrbError {
    /// Wrap a rejected DOM call
    pub(crate) fn dom(err: wasm_bindgen::JsValue) -> Self {
        OrbError::Dom(format!("{:?}", err))
    }
}

#[cfg(target_arch = "wasm32")]
impl GateError {
    pub(crate) fn network(err: wasm_bindgen::JsValue) -> Self {
        GateError::Network(format!("{:?}", err))
    }
}
