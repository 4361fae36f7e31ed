//! Passive counters of buffer-exchange outcomes.
//!
//! One recorder belongs to one encoder session.  Counters are monotonic
//! and only reset by constructing a fresh recorder at session
//! (re)initialization.  The bootstrap updates them as it drives the
//! handshake; the steady-state encode loop feeds the same recorder once it
//! takes over.

use std::time::{Duration, Instant};

use hwcodec_core::codec_traits::{BufferInfo, MediaStatus, QueueStatus};

/// Classification of a successfully dequeued output buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputKind {
    /// Out-of-band codec configuration header.
    Config,
    /// Keyframe (sync) payload.
    Keyframe,
    /// Last buffer of the stream.
    EndOfStream,
    /// Ordinary frame payload.
    Frame,
}

impl OutputKind {
    /// Classify from buffer flags.  Config wins over the other bits: a
    /// config buffer is never counted as a frame.
    pub fn from_info(info: &BufferInfo) -> Self {
        if info.is_codec_config() {
            OutputKind::Config
        } else if info.is_end_of_stream() {
            OutputKind::EndOfStream
        } else if info.is_keyframe() {
            OutputKind::Keyframe
        } else {
            OutputKind::Frame
        }
    }
}

/// Cumulative buffer-exchange counters for one session.
#[derive(Debug)]
pub struct Stats {
    started: Instant,

    // Input-slot acquisition (dequeue_input attempts).
    acquire_ok: u64,
    acquire_fail: u64,

    // Input submission (queue_input calls).
    submit_ok: u64,
    submit_fail: u64,
    submit_again: u64,

    // Output dequeue successes, by payload kind.
    out_frame: u64,
    out_config: u64,
    out_keyframe: u64,
    out_eos: u64,

    // Output dequeue failures, by status.
    out_again: u64,
    out_format_changed: u64,
    out_buffers_changed: u64,
    out_other: u64,
}

impl Stats {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            acquire_ok: 0,
            acquire_fail: 0,
            submit_ok: 0,
            submit_fail: 0,
            submit_again: 0,
            out_frame: 0,
            out_config: 0,
            out_keyframe: 0,
            out_eos: 0,
            out_again: 0,
            out_format_changed: 0,
            out_buffers_changed: 0,
            out_other: 0,
        }
    }

    /// One input-slot dequeue attempt.
    pub fn record_acquire(&mut self, ok: bool) {
        if ok {
            self.acquire_ok += 1;
        } else {
            self.acquire_fail += 1;
        }
    }

    /// One input submission outcome.
    pub fn record_submit(&mut self, status: MediaStatus) {
        if status.is_ok() {
            self.submit_ok += 1;
        } else {
            self.submit_fail += 1;
        }
    }

    /// An input submission the codec asked to have reissued.
    ///
    /// The bootstrap never reissues a submission — its one primer buffer
    /// either queues or fails terminally.  This counter belongs to the
    /// steady-state encode loop, which feeds the same recorder once it
    /// takes over the session.
    pub fn record_submit_again(&mut self) {
        self.submit_again += 1;
    }

    /// One successfully dequeued output buffer.
    pub fn record_output(&mut self, kind: OutputKind) {
        match kind {
            OutputKind::Frame => self.out_frame += 1,
            OutputKind::Config => self.out_config += 1,
            OutputKind::Keyframe => self.out_keyframe += 1,
            OutputKind::EndOfStream => self.out_eos += 1,
        }
    }

    /// One failed output dequeue attempt.
    pub fn record_output_wait(&mut self, status: QueueStatus) {
        match status {
            QueueStatus::TryAgainLater => self.out_again += 1,
            QueueStatus::FormatChanged => self.out_format_changed += 1,
            QueueStatus::BuffersChanged => self.out_buffers_changed += 1,
            QueueStatus::Error(_) => self.out_other += 1,
        }
    }

    /// Immutable view of the counters plus the recorder's alive duration.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            alive: self.started.elapsed(),
            acquire_ok: self.acquire_ok,
            acquire_fail: self.acquire_fail,
            submit_ok: self.submit_ok,
            submit_fail: self.submit_fail,
            submit_again: self.submit_again,
            out_frame: self.out_frame,
            out_config: self.out_config,
            out_keyframe: self.out_keyframe,
            out_eos: self.out_eos,
            out_again: self.out_again,
            out_format_changed: self.out_format_changed,
            out_buffers_changed: self.out_buffers_changed,
            out_other: self.out_other,
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of [`Stats`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Time since the recorder was constructed.
    pub alive: Duration,
    pub acquire_ok: u64,
    pub acquire_fail: u64,
    pub submit_ok: u64,
    pub submit_fail: u64,
    pub submit_again: u64,
    pub out_frame: u64,
    pub out_config: u64,
    pub out_keyframe: u64,
    pub out_eos: u64,
    pub out_again: u64,
    pub out_format_changed: u64,
    pub out_buffers_changed: u64,
    pub out_other: u64,
}

impl StatsSnapshot {
    /// Total output dequeue failures across all sub-reasons.
    pub fn out_fail_total(&self) -> u64 {
        self.out_again + self.out_format_changed + self.out_buffers_changed + self.out_other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwcodec_core::codec_traits::{
        BUFFER_FLAG_CODEC_CONFIG, BUFFER_FLAG_END_OF_STREAM, BUFFER_FLAG_KEY_FRAME,
    };

    fn info(flags: u32) -> BufferInfo {
        BufferInfo {
            flags,
            ..BufferInfo::default()
        }
    }

    #[test]
    fn output_kind_classification_priority() {
        assert_eq!(
            OutputKind::from_info(&info(BUFFER_FLAG_CODEC_CONFIG | BUFFER_FLAG_KEY_FRAME)),
            OutputKind::Config
        );
        assert_eq!(
            OutputKind::from_info(&info(BUFFER_FLAG_END_OF_STREAM)),
            OutputKind::EndOfStream
        );
        assert_eq!(
            OutputKind::from_info(&info(BUFFER_FLAG_KEY_FRAME)),
            OutputKind::Keyframe
        );
        assert_eq!(OutputKind::from_info(&info(0)), OutputKind::Frame);
    }

    #[test]
    fn counters_accumulate_without_reset() {
        let mut stats = Stats::new();
        stats.record_acquire(true);
        stats.record_acquire(false);
        stats.record_submit(MediaStatus::OK);
        stats.record_submit(MediaStatus(-1));
        stats.record_submit_again();
        stats.record_output(OutputKind::Config);
        stats.record_output(OutputKind::Frame);
        stats.record_output(OutputKind::Keyframe);
        stats.record_output(OutputKind::EndOfStream);
        stats.record_output_wait(QueueStatus::TryAgainLater);
        stats.record_output_wait(QueueStatus::FormatChanged);
        stats.record_output_wait(QueueStatus::BuffersChanged);
        stats.record_output_wait(QueueStatus::Error(-7));

        let snap = stats.snapshot();
        assert_eq!(snap.acquire_ok, 1);
        assert_eq!(snap.acquire_fail, 1);
        assert_eq!(snap.submit_ok, 1);
        assert_eq!(snap.submit_fail, 1);
        assert_eq!(snap.submit_again, 1);
        assert_eq!(snap.out_config, 1);
        assert_eq!(snap.out_frame, 1);
        assert_eq!(snap.out_keyframe, 1);
        assert_eq!(snap.out_eos, 1);
        assert_eq!(snap.out_fail_total(), 4);

        // A second snapshot only moves time forward.
        let later = stats.snapshot();
        assert_eq!(later.out_config, 1);
        assert!(later.alive >= snap.alive);
    }
}
