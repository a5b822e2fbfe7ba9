//! Consumer module - terminal sinks for decoded inbound values.
//!
//! A [`Consumer`] is the last stage of the receive path: it takes ownership
//! of a decoded value and never reports back into the pipeline. Closures
//! implement the trait directly; [`QueueConsumer`] hands values to an
//! application thread through a bounded queue so slow processing never
//! stalls the transport's delivery thread.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};

/// A sink for fully decoded application values.
///
/// Terminal by contract: failures inside a consumer are its own concern and
/// must not propagate back into the pipeline. Implementations must be safe
/// to invoke concurrently, since multiple inbound events may be in flight
/// at once.
pub trait Consumer<P>: Send + Sync {
    /// Act on one decoded value.
    fn consume(&self, value: P);
}

impl<P, F> Consumer<P> for F
where
    F: Fn(P) + Send + Sync,
{
    fn consume(&self, value: P) {
        self(value)
    }
}

/// Consumer that parks decoded values on a bounded queue for an application
/// thread to drain on its own schedule.
///
/// When the queue is full or the drain side is gone, the value is dropped
/// with a warning rather than blocking the delivering thread.
///
/// # Example
///
/// ```
/// use datawire::consumer::{Consumer, QueueConsumer};
///
/// let (consumer, work) = QueueConsumer::bounded(64);
/// consumer.consume("job".to_string());
/// assert_eq!(work.recv().unwrap(), "job");
/// ```
pub struct QueueConsumer<P> {
    queue: SyncSender<P>,
}

impl<P> QueueConsumer<P> {
    /// Create a consumer backed by a queue holding at most `capacity`
    /// undrained values (clamped to at least 1), and the receiving end the
    /// application drains.
    pub fn bounded(capacity: usize) -> (QueueConsumer<P>, Receiver<P>) {
        let (queue, drain) = sync_channel(capacity.max(1));
        (QueueConsumer { queue }, drain)
    }
}

impl<P> Consumer<P> for QueueConsumer<P>
where
    P: Send,
{
    fn consume(&self, value: P) {
        match self.queue.try_send(value) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!("consumer queue full, dropping decoded value");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::warn!("consumer queue disconnected, dropping decoded value");
            }
        }
    }
}
