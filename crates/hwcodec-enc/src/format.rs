//! Translation of caller parameters into the platform format descriptor.
//!
//! Pure — no I/O, no mutation of the input.  The only failure is a codec
//! identity with no platform mime mapping.

use hwcodec_core::error::{CodecError, Result};
use hwcodec_core::types::{CodecParameters, FormatDescriptor};

/// H.264 High profile, in the platform's profile enumeration.
pub const PROFILE_HIGH: i32 = 0x08;
/// H.264 level 3.1, in the platform's level enumeration.
pub const LEVEL_31: i32 = 0x200;

/// Keyframe interval handed to every bootstrap session.  One second keeps
/// the config header arriving right after the primer buffer.
const I_FRAME_INTERVAL_S: i32 = 1;

/// Build the platform format descriptor for `params`.
///
/// Profile and level are pinned constants, not negotiated: callers that
/// need a different profile must extend [`FormatDescriptor`], not this
/// builder.
pub fn build(params: &CodecParameters) -> Result<FormatDescriptor> {
    let mime = params
        .codec
        .mime()
        .ok_or(CodecError::UnsupportedCodec(params.codec))?;

    Ok(FormatDescriptor {
        mime,
        width: params.width,
        height: params.height,
        bitrate: params.bitrate,
        frame_rate: params.frame_rate.as_f64(),
        i_frame_interval: I_FRAME_INTERVAL_S,
        color_format: params.color_format,
        rc_mode: params.rc_mode,
        profile: PROFILE_HIGH,
        level: LEVEL_31,
    })
}
