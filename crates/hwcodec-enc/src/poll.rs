//! Bounded-retry polling over an indexed buffer-queue dequeue.
//!
//! The hardware codec is internally asynchronous; the contract exposed to
//! the bootstrap is blocking-with-bounded-retry.  A [`Poller`] repeatedly
//! invokes a dequeue operation that yields either a slot index or a
//! negative [`QueueStatus`]:
//!
//! - a status in the poller's transient set is retried immediately and
//!   consumes nothing — the queue topology changed under us, which is a
//!   renegotiation signal, not a failure;
//! - any other status consumes one retry credit;
//! - the credit pool reaching zero yields [`Exhausted`].
//!
//! Credits persist across successive [`Poller::acquire`] calls so a single
//! budget can span a whole drain loop rather than one slot.

use hwcodec_core::codec_traits::QueueStatus;

/// Budget exhaustion: the dequeue kept failing until no credits remained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exhausted {
    /// The terminal status observed on the final attempt.
    pub last: QueueStatus,
}

/// Bounded-retry dequeue driver.
///
/// One instance serves one polling phase; the input primer uses an empty
/// transient set, the output drain passes the two renegotiation statuses.
pub struct Poller<'a> {
    timeout_us: i64,
    credits: u32,
    transient: &'a [QueueStatus],
}

impl<'a> Poller<'a> {
    pub fn new(timeout_us: i64, retries: u32, transient: &'a [QueueStatus]) -> Self {
        Self {
            timeout_us,
            credits: retries,
            transient,
        }
    }

    /// Remaining retry credits.
    pub fn credits(&self) -> u32 {
        self.credits
    }

    /// Drive `dequeue` until it yields a slot index or the budget runs out.
    ///
    /// `dequeue` receives the per-attempt timeout in microseconds.  With a
    /// budget of N, up to N - 1 non-transient failures are tolerated before
    /// a success; the N-th failure is terminal.
    pub fn acquire<F>(&mut self, mut dequeue: F) -> Result<usize, Exhausted>
    where
        F: FnMut(i64) -> Result<usize, QueueStatus>,
    {
        loop {
            match dequeue(self.timeout_us) {
                Ok(slot) => return Ok(slot),
                Err(status) if self.transient.contains(&status) => continue,
                Err(status) => {
                    self.credits = self.credits.saturating_sub(1);
                    if self.credits == 0 {
                        return Err(Exhausted { last: status });
                    }
                }
            }
        }
    }
}
