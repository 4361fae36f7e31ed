//! Hardware encoder session bootstrap — config-header extraction.
//!
//! # Protocol
//!
//! ```text
//! CodecParameters ──▸ format::build ──▸ FormatDescriptor
//!                                            │
//!                                   create_encoder(mime)
//!                                            │
//!                                   configure ─▸ start
//!                                            │
//!                              input primer (Poller, 1 slot)
//!                                            │
//!                              output drain (Poller, transient-aware)
//!                                            │
//!                              ConfigRecord ─▸ EncoderContext
//!                                            │
//!                              flush ─▸ stop ─▸ delete   (always)
//! ```
//!
//! Hardware encoders emit their out-of-band configuration header only
//! after receiving input, so the bootstrap queues exactly one empty primer
//! buffer to unblock the pipeline, then drains the output queue until the
//! buffer carrying the codec-config flag arrives.  Ordinary frame data
//! observed before the header is released and discarded.
//!
//! Teardown runs whenever a session was created, on success and on every
//! error path, in flush → stop → delete order.

use tracing::{debug, info, warn};

use hwcodec_core::codec_traits::{BufferInfo, CodecDevice, CodecSession, QueueStatus};
use hwcodec_core::error::{CodecError, Result};
use hwcodec_core::types::{CodecParameters, ConfigRecord, FormatDescriptor};

use crate::context::EncoderContext;
use crate::format;
use crate::poll::Poller;
use crate::stats::{OutputKind, Stats};

/// Output statuses that signal queue renegotiation rather than failure.
/// They are retried without consuming retry credit.
const OUTPUT_TRANSIENT: [QueueStatus; 2] =
    [QueueStatus::FormatChanged, QueueStatus::BuffersChanged];

/// Bootstrap an encoder session for `params` and install its config header
/// into `ctx`.
///
/// On success `ctx` holds the extracted [`ConfigRecord`] (replacing any
/// prior one) and the [`FormatDescriptor`] the session was configured
/// with.  On failure neither is touched.  Every error is terminal to this
/// call; the only retries performed are the two bounded dequeue polls.
pub fn extract_codec_config<D: CodecDevice>(
    device: &mut D,
    ctx: &mut EncoderContext,
    params: &CodecParameters,
) -> Result<()> {
    let format = format::build(params)?;
    info!(
        mime = format.mime,
        width = format.width,
        height = format.height,
        bitrate = format.bitrate,
        in_timeout_us = params.input_timeout_us,
        ou_timeout_us = params.output_timeout_us,
        "starting encoder bootstrap"
    );

    let mut session = device
        .create_encoder(format.mime)
        .ok_or(CodecError::SessionCreate { mime: format.mime })?;

    let result = drive_handshake(&mut session, ctx, params, &format);

    // The session exists, so teardown runs no matter how the handshake ended.
    teardown(session);

    match &result {
        Ok(()) => {
            let size = ctx.config_record().map(ConfigRecord::len).unwrap_or(0);
            info!(size, "codec config header installed");
            ctx.install_format(format);
        }
        Err(err) => {
            warn!(code = err.error_code(), error = %err, "encoder bootstrap failed");
        }
    }
    result
}

/// CONFIGURED → STARTED → AWAIT_INPUT_ACK → AWAIT_CONFIG, as a sequence of
/// fallible steps.  The caller owns teardown.
fn drive_handshake<S: CodecSession>(
    session: &mut S,
    ctx: &mut EncoderContext,
    params: &CodecParameters,
    format: &FormatDescriptor,
) -> Result<()> {
    let status = session.configure(format);
    if !status.is_ok() {
        return Err(CodecError::Configure {
            status: status.raw(),
        });
    }
    debug!(mime = format.mime, "encoder configured");

    let status = session.start();
    if !status.is_ok() {
        return Err(CodecError::Start {
            status: status.raw(),
        });
    }
    debug!("encoder started");

    prime_input(session, &mut ctx.stats, params)?;
    drain_config(session, ctx, params)
}

/// Submit exactly one empty input buffer to unblock the encoder pipeline.
///
/// Zero payload, zero timestamp, zero flags: the buffer exists purely so
/// the encoder starts producing output, not to encode content.
fn prime_input<S: CodecSession>(
    session: &mut S,
    stats: &mut Stats,
    params: &CodecParameters,
) -> Result<()> {
    let mut poller = Poller::new(params.input_timeout_us, params.input_retries, &[]);
    let slot = poller
        .acquire(|timeout| match session.dequeue_input(timeout) {
            Ok(slot) => {
                stats.record_acquire(true);
                Ok(slot)
            }
            Err(status) => {
                stats.record_acquire(false);
                debug!(?status, "no input slot yet");
                Err(status)
            }
        })
        .map_err(|exhausted| {
            warn!(last = ?exhausted.last, "input primer budget exhausted");
            CodecError::InputTimeout {
                retries: params.input_retries,
            }
        })?;

    if session.input_buffer(slot).is_none() {
        // Return the slot before aborting; an empty submission releases it.
        let _ = session.queue_input(slot, 0, 0, 0);
        return Err(CodecError::GetBuffer { slot });
    }

    let status = session.queue_input(slot, 0, 0, 0);
    stats.record_submit(status);
    if status.is_ok() {
        debug!(slot, "primer buffer queued");
    } else {
        // The drain may still produce the header; the submission status is
        // recorded but not terminal.
        warn!(status = status.raw(), slot, "primer submission rejected");
    }
    Ok(())
}

/// Poll the output queue until the codec-config buffer arrives or the
/// retry budget is exhausted.
fn drain_config<S: CodecSession>(
    session: &mut S,
    ctx: &mut EncoderContext,
    params: &CodecParameters,
) -> Result<()> {
    // One budget spans the whole drain: ordinary frames do not refill it.
    let mut poller = Poller::new(
        params.output_timeout_us,
        params.output_retries,
        &OUTPUT_TRANSIENT,
    );

    loop {
        let mut last_info = BufferInfo::default();
        let stats = &mut ctx.stats;
        let slot = poller
            .acquire(|timeout| match session.dequeue_output(timeout) {
                Ok((slot, info)) => {
                    last_info = info;
                    Ok(slot)
                }
                Err(status) => {
                    stats.record_output_wait(status);
                    debug!(?status, "output not ready");
                    Err(status)
                }
            })
            .map_err(|exhausted| {
                warn!(last = ?exhausted.last, "output drain budget exhausted");
                CodecError::ConfigTimeout {
                    retries: params.output_retries,
                }
            })?;

        let kind = OutputKind::from_info(&last_info);

        // Copy what we need out of the borrowed window before giving the
        // slot back; the window is only valid until release_output.
        let extracted: Result<Option<Vec<u8>>> = match session.output_buffer(slot) {
            None => Err(CodecError::GetBuffer { slot }),
            Some(window) if kind == OutputKind::Config => last_info
                .offset
                .checked_add(last_info.size)
                .and_then(|end| window.get(last_info.offset..end))
                .map(|payload| Some(payload.to_vec()))
                .ok_or(CodecError::GetBuffer { slot }),
            Some(_) => Ok(None),
        };

        // Exactly one release per acquired slot, on every path including
        // the fatal one.
        let status = session.release_output(slot);
        if !status.is_ok() {
            warn!(status = status.raw(), slot, "release_output failed");
        }

        match extracted {
            Err(err) => return Err(err),
            Ok(Some(bytes)) => {
                ctx.stats.record_output(OutputKind::Config);
                info!(
                    size = bytes.len(),
                    pts_us = last_info.pts_us,
                    "got codec config buffer"
                );
                ctx.install_config(ConfigRecord::new(bytes));
                return Ok(());
            }
            Ok(None) => {
                ctx.stats.record_output(kind);
                debug!(slot, ?kind, size = last_info.size, "pre-header output discarded");
            }
        }
    }
}

/// Flush, stop, delete — in that order, unconditionally.
///
/// Deleting before flushing risks leaving the driver stuck, and a flush or
/// stop failure must not skip the steps after it; teardown failures are
/// logged, never propagated.
fn teardown<S: CodecSession>(mut session: S) {
    let status = session.flush();
    if !status.is_ok() {
        warn!(status = status.raw(), "flush failed during teardown");
    }
    let status = session.stop();
    if !status.is_ok() {
        warn!(status = status.raw(), "stop failed during teardown");
    }
    session.delete();
    debug!("encoder session deleted");
}
