//! Typed error hierarchy for the encoder bootstrap.
//!
//! Uses `thiserror` for library-grade errors.  Application code should wrap
//! these in `anyhow::Result` at call sites.
//!
//! Every variant is terminal to a single bootstrap call: the only retries
//! the subsystem performs are the two bounded dequeue polls inside the
//! handshake itself.

use crate::types::CodecId;

/// All errors originating from the hardware-encoder bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    // ── Format resolution ─────────────────────────────────────────────
    #[error("codec {0:?} has no platform mime mapping")]
    UnsupportedCodec(CodecId),

    // ── Session lifecycle ─────────────────────────────────────────────
    #[error("platform refused to create an encoder session for mime {mime}")]
    SessionCreate { mime: &'static str },

    #[error("encoder configure failed with platform status {status}")]
    Configure { status: i32 },

    #[error("encoder start failed with platform status {status}")]
    Start { status: i32 },

    // ── Buffer-exchange handshake ─────────────────────────────────────
    #[error("no input slot became available within {retries} retries")]
    InputTimeout { retries: u32 },

    #[error("no codec config buffer arrived within {retries} retries")]
    ConfigTimeout { retries: u32 },

    #[error("backing memory window for slot {slot} was unavailable")]
    GetBuffer { slot: usize },
}

impl CodecError {
    /// Stable integer error code for structured telemetry.
    ///
    /// Codes are grouped by category:
    /// - 1xx: format resolution
    /// - 2xx: session lifecycle
    /// - 3xx: buffer-exchange handshake
    pub fn error_code(&self) -> u32 {
        match self {
            Self::UnsupportedCodec(_) => 100,
            Self::SessionCreate { .. } => 200,
            Self::Configure { .. } => 201,
            Self::Start { .. } => 202,
            Self::InputTimeout { .. } => 300,
            Self::ConfigTimeout { .. } => 301,
            Self::GetBuffer { .. } => 302,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_grouped_by_category() {
        assert_eq!(CodecError::UnsupportedCodec(CodecId::Av1).error_code(), 100);
        assert_eq!(
            CodecError::SessionCreate { mime: "video/avc" }.error_code(),
            200
        );
        assert_eq!(CodecError::Configure { status: -1 }.error_code(), 201);
        assert_eq!(CodecError::Start { status: -1 }.error_code(), 202);
        assert_eq!(CodecError::InputTimeout { retries: 3 }.error_code(), 300);
        assert_eq!(CodecError::ConfigTimeout { retries: 3 }.error_code(), 301);
        assert_eq!(CodecError::GetBuffer { slot: 0 }.error_code(), 302);
    }

    #[test]
    fn display_includes_retry_budget() {
        let msg = CodecError::ConfigTimeout { retries: 7 }.to_string();
        assert!(msg.contains('7'), "message should carry the budget: {msg}");
    }
}
