//! Caller-facing parameter and descriptor types.
//!
//! [`CodecParameters`] is the caller's immutable encoding intent;
//! [`FormatDescriptor`] is the platform-consumable translation of it,
//! produced once per bootstrap by `hwcodec-enc::format::build`.

// ─── Codec identity ──────────────────────────────────────────────────────

/// Which compressed bitstream format the caller wants out of the encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CodecId {
    H264,
    Hevc,
    Vp8,
    Vp9,
    Av1,
}

impl CodecId {
    /// The platform mime identity used to instantiate a hardware encoder,
    /// or `None` when the platform registry has no encoder for this codec.
    pub fn mime(self) -> Option<&'static str> {
        match self {
            CodecId::H264 => Some("video/avc"),
            CodecId::Hevc => Some("video/hevc"),
            CodecId::Vp8 => Some("video/x-vnd.on2.vp8"),
            CodecId::Vp9 => Some("video/x-vnd.on2.vp9"),
            // No AV1 hardware encoder in the platform registry.
            CodecId::Av1 => None,
        }
    }
}

// ─── Frame rate ──────────────────────────────────────────────────────────

/// Exact frame rate as a rational number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rational {
    pub num: u32,
    pub den: u32,
}

impl Rational {
    pub const fn new(num: u32, den: u32) -> Self {
        Self { num, den }
    }

    /// Floating quotient, as consumed by the platform format object.
    /// A zero denominator yields 0.0 rather than a NaN/inf descriptor field.
    pub fn as_f64(self) -> f64 {
        if self.den == 0 {
            0.0
        } else {
            f64::from(self.num) / f64::from(self.den)
        }
    }
}

// ─── Platform enumerations ───────────────────────────────────────────────

/// Raw-frame color format, using the platform's integer enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum ColorFormat {
    Yuv420Planar = 19,
    Yuv420SemiPlanar = 21,
    Surface = 0x7F00_0789,
}

impl ColorFormat {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Rate-control mode, using the platform's integer enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum RateControlMode {
    ConstantQuality = 0,
    VariableBitrate = 1,
    ConstantBitrate = 2,
}

impl RateControlMode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

// ─── Caller parameters ───────────────────────────────────────────────────

/// Encoder bootstrap parameters.
///
/// Owned by the caller and read-only for the whole bootstrap call.  The
/// per-phase timeout/retry pairs bound the two dequeue polls of the
/// handshake (input primer, output drain).
#[derive(Clone, Debug)]
pub struct CodecParameters {
    pub codec: CodecId,
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// Average bitrate in bits/sec.
    pub bitrate: u32,
    /// Exact frame rate.
    pub frame_rate: Rational,
    /// Raw-frame color format handed to the encoder.
    pub color_format: ColorFormat,
    /// Rate-control mode.
    pub rc_mode: RateControlMode,
    /// Per-attempt input dequeue timeout in microseconds.
    pub input_timeout_us: i64,
    /// Per-attempt output dequeue timeout in microseconds.
    pub output_timeout_us: i64,
    /// Retry budget for the input primer phase.
    pub input_retries: u32,
    /// Retry budget for the output drain phase.
    pub output_retries: u32,
}

// ─── Format descriptor ───────────────────────────────────────────────────

/// Platform-codec configuration object.
///
/// Built once per bootstrap call and consumed by the session configure
/// step.  Profile and level are pinned constants — callers needing a
/// different profile must extend the descriptor, not the builder.
#[derive(Clone, Debug, PartialEq)]
pub struct FormatDescriptor {
    pub mime: &'static str,
    pub width: u32,
    pub height: u32,
    pub bitrate: u32,
    /// Frame rate as a floating quotient of the caller's rational.
    pub frame_rate: f64,
    /// Keyframe interval in seconds.  Fixed at 1 so the encoder emits its
    /// config header promptly after the primer buffer.
    pub i_frame_interval: i32,
    pub color_format: ColorFormat,
    pub rc_mode: RateControlMode,
    pub profile: i32,
    pub level: i32,
}

// ─── Extracted header ────────────────────────────────────────────────────

/// Out-of-band codec configuration header (e.g. SPS/PPS parameter sets).
///
/// Owned by the caller's persistent context once installed; replacing an
/// installed record drops the prior one, so repeated bootstrap calls never
/// leak or append.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigRecord {
    bytes: Vec<u8>,
}

impl ConfigRecord {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_lookup_covers_platform_registry() {
        assert_eq!(CodecId::H264.mime(), Some("video/avc"));
        assert_eq!(CodecId::Hevc.mime(), Some("video/hevc"));
        assert_eq!(CodecId::Vp8.mime(), Some("video/x-vnd.on2.vp8"));
        assert_eq!(CodecId::Vp9.mime(), Some("video/x-vnd.on2.vp9"));
        assert_eq!(CodecId::Av1.mime(), None);
    }

    #[test]
    fn rational_quotient() {
        assert_eq!(Rational::new(30, 1).as_f64(), 30.0);
        assert_eq!(Rational::new(30_000, 1_001).as_f64(), 30_000.0 / 1_001.0);
        assert_eq!(Rational::new(1, 0).as_f64(), 0.0);
    }

    #[test]
    fn platform_enum_values_match_registry() {
        assert_eq!(ColorFormat::Yuv420SemiPlanar.as_i32(), 21);
        assert_eq!(ColorFormat::Yuv420Planar.as_i32(), 19);
        assert_eq!(RateControlMode::VariableBitrate.as_i32(), 1);
    }
}
