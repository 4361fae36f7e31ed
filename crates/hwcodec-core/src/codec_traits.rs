//! Abstract surface of a queue-based platform hardware codec.
//!
//! These traits are the seam between the bootstrap logic and whatever
//! platform library actually backs the encoder.  They model the codec the
//! way the platform exposes it: an indexed buffer queue on each side,
//! borrowed memory windows, and negative dequeue statuses for "nothing
//! yet" and "queue topology changed".
//!
//! The surface is a contract, not a binding — tests drive the bootstrap
//! with scripted in-memory sessions.

use crate::types::FormatDescriptor;

// ─── Status words ────────────────────────────────────────────────────────

/// Platform status word returned by non-dequeue session operations.
/// Zero is success; anything else is a platform error code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MediaStatus(pub i32);

impl MediaStatus {
    pub const OK: MediaStatus = MediaStatus(0);

    #[inline]
    pub fn is_ok(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn raw(self) -> i32 {
        self.0
    }
}

/// Negative result of a dequeue attempt.
///
/// `FormatChanged` and `BuffersChanged` are renegotiation signals, not
/// errors: the queue topology moved under the caller and the dequeue must
/// simply be reissued.  Which statuses count as transient is decided by
/// the poll site, not here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueStatus {
    /// Nothing available within the attempt's timeout.
    TryAgainLater,
    /// The output format object was replaced.
    FormatChanged,
    /// The output buffer set was reallocated.
    BuffersChanged,
    /// Any other platform error code.
    Error(i32),
}

// ─── Buffer metadata ─────────────────────────────────────────────────────

/// Keyframe (sync) buffer.
pub const BUFFER_FLAG_KEY_FRAME: u32 = 1 << 0;
/// Buffer carries the out-of-band codec configuration header.
pub const BUFFER_FLAG_CODEC_CONFIG: u32 = 1 << 1;
/// Last buffer of the stream.
pub const BUFFER_FLAG_END_OF_STREAM: u32 = 1 << 2;

/// Metadata attached to a dequeued output buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BufferInfo {
    /// Byte offset of the payload inside the backing window.
    pub offset: usize,
    /// Payload length in bytes.
    pub size: usize,
    /// Presentation timestamp in microseconds.
    pub pts_us: i64,
    /// `BUFFER_FLAG_*` bits.
    pub flags: u32,
}

impl BufferInfo {
    #[inline]
    pub fn is_codec_config(&self) -> bool {
        self.flags & BUFFER_FLAG_CODEC_CONFIG != 0
    }

    #[inline]
    pub fn is_keyframe(&self) -> bool {
        self.flags & BUFFER_FLAG_KEY_FRAME != 0
    }

    #[inline]
    pub fn is_end_of_stream(&self) -> bool {
        self.flags & BUFFER_FLAG_END_OF_STREAM != 0
    }
}

// ─── Capability traits ───────────────────────────────────────────────────

/// Factory half of the platform surface.
pub trait CodecDevice {
    type Session: CodecSession;

    /// Instantiate a hardware encoder for `mime`.
    ///
    /// Returns `None` when the platform refuses (no such codec, resources
    /// exhausted, ...).
    fn create_encoder(&mut self, mime: &str) -> Option<Self::Session>;
}

/// A live hardware encoder instance.
///
/// Buffer windows returned by `input_buffer` / `output_buffer` are
/// borrowed from the session and must be given back exactly once per
/// acquisition: input slots via `queue_input`, output slots via
/// `release_output`.
///
/// Teardown ordering is flush, then stop, then delete — `delete` consumes
/// the session so nothing can be called after it.
pub trait CodecSession {
    fn configure(&mut self, format: &FormatDescriptor) -> MediaStatus;
    fn start(&mut self) -> MediaStatus;

    /// Wait up to `timeout_us` for a free input slot.
    fn dequeue_input(&mut self, timeout_us: i64) -> Result<usize, QueueStatus>;
    /// Backing memory window of an acquired input slot.
    fn input_buffer(&mut self, index: usize) -> Option<&mut [u8]>;
    /// Submit an acquired input slot back to the codec.
    fn queue_input(&mut self, index: usize, len: usize, pts_us: i64, flags: u32) -> MediaStatus;

    /// Wait up to `timeout_us` for a filled output slot.
    fn dequeue_output(&mut self, timeout_us: i64) -> Result<(usize, BufferInfo), QueueStatus>;
    /// Backing memory window of a dequeued output slot.
    fn output_buffer(&mut self, index: usize) -> Option<&[u8]>;
    /// Return a dequeued output slot to the codec.
    fn release_output(&mut self, index: usize) -> MediaStatus;

    fn flush(&mut self) -> MediaStatus;
    fn stop(&mut self) -> MediaStatus;
    fn delete(self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_info_flag_predicates() {
        let info = BufferInfo {
            flags: BUFFER_FLAG_CODEC_CONFIG | BUFFER_FLAG_KEY_FRAME,
            ..BufferInfo::default()
        };
        assert!(info.is_codec_config());
        assert!(info.is_keyframe());
        assert!(!info.is_end_of_stream());
    }

    #[test]
    fn media_status_zero_is_ok() {
        assert!(MediaStatus::OK.is_ok());
        assert!(!MediaStatus(-10_000).is_ok());
        assert_eq!(MediaStatus(-3).raw(), -3);
    }
}
