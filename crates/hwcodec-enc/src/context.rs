//! Caller-owned persistent encoder state.
//!
//! The context outlives individual bootstrap calls.  Its config record is
//! session-wide state with a replace-before-free discipline: installing a
//! new record drops the prior one, so repeated bootstraps never leak or
//! append.

use hwcodec_core::types::{ConfigRecord, FormatDescriptor};

use crate::stats::Stats;

/// Long-lived state for one encoder session, owned by the caller.
///
/// Mutated only by the bootstrap: a successful call installs the extracted
/// config record and the format descriptor it configured the session with;
/// a failed call leaves both untouched.
#[derive(Debug, Default)]
pub struct EncoderContext {
    config: Option<ConfigRecord>,
    format: Option<FormatDescriptor>,
    /// Buffer-exchange counters for this session.
    pub stats: Stats,
}

impl EncoderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently installed codec configuration header, if any.
    pub fn config_record(&self) -> Option<&ConfigRecord> {
        self.config.as_ref()
    }

    /// The descriptor the last successful bootstrap configured with.
    pub fn format_descriptor(&self) -> Option<&FormatDescriptor> {
        self.format.as_ref()
    }

    /// Install a freshly extracted config record, dropping any prior one.
    pub(crate) fn install_config(&mut self, record: ConfigRecord) {
        self.config = Some(record);
    }

    pub(crate) fn install_format(&mut self, format: FormatDescriptor) {
        self.format = Some(format);
    }
}
