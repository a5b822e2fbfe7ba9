//! In-process transport connecting two endpoints through bounded queues.
//!
//! Each endpoint owns an inbox drained by its own thread; the drain thread
//! invokes whatever receive callback is registered at the moment a value is
//! taken off the queue. Useful for tests and for wiring two pipelines that
//! live in the same process.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use datawire::transport::{LoopbackTransport, Transport};
//!
//! let (a, b) = LoopbackTransport::<String>::pair(16);
//! b.register_receive_callback(Arc::new(|value| {
//!     assert_eq!(value, "ping");
//! }));
//! a.send(1, 0, "ping".to_string()).unwrap();
//! ```

use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::RwLock;

use crate::error::{ExchangeError, Result};
use crate::transport::{Address, MessageType, ReceiveCallback, Transport};

enum Frame<W> {
    Value(W),
    Shutdown,
}

type CallbackSlot<W> = Arc<RwLock<Option<ReceiveCallback<W>>>>;

/// One endpoint of an in-process transport pair.
///
/// `send` places the wire value on the peer's bounded inbox without
/// blocking: a full inbox reports [`ExchangeError::Backpressure`], a peer
/// whose drain thread has stopped reports [`ExchangeError::ChannelClosed`].
/// The address and message type are logged, not interpreted - a loopback
/// pair has exactly one peer.
///
/// Dropping an endpoint drains its remaining inbound values, then stops its
/// drain thread; subsequent sends from the peer fail with
/// [`ExchangeError::ChannelClosed`].
pub struct LoopbackTransport<W> {
    peer_tx: SyncSender<Frame<W>>,
    self_tx: SyncSender<Frame<W>>,
    callback: CallbackSlot<W>,
    drain: Option<JoinHandle<()>>,
}

impl<W> LoopbackTransport<W>
where
    W: Send + 'static,
{
    /// Create two connected endpoints, each with an inbox holding at most
    /// `capacity` undelivered values (clamped to at least 1).
    pub fn pair(capacity: usize) -> (LoopbackTransport<W>, LoopbackTransport<W>) {
        let capacity = capacity.max(1);
        let (a_tx, a_rx) = sync_channel(capacity);
        let (b_tx, b_rx) = sync_channel(capacity);

        let a = Self::endpoint("loopback-a", b_tx.clone(), a_tx.clone(), a_rx);
        let b = Self::endpoint("loopback-b", a_tx, b_tx, b_rx);
        (a, b)
    }

    fn endpoint(
        name: &str,
        peer_tx: SyncSender<Frame<W>>,
        self_tx: SyncSender<Frame<W>>,
        inbox: Receiver<Frame<W>>,
    ) -> LoopbackTransport<W> {
        let callback: CallbackSlot<W> = Arc::new(RwLock::new(None));
        let slot = Arc::clone(&callback);
        let drain = std::thread::Builder::new()
            .name(name.to_string())
            .spawn(move || drain_loop(inbox, slot))
            .ok();

        LoopbackTransport {
            peer_tx,
            self_tx,
            callback,
            drain,
        }
    }
}

fn drain_loop<W>(inbox: Receiver<Frame<W>>, slot: CallbackSlot<W>) {
    loop {
        match inbox.recv() {
            Ok(Frame::Value(wire)) => {
                // Snapshot so a concurrent re-registration cannot race the call
                let callback = slot.read().clone();
                match callback {
                    Some(callback) => callback(wire),
                    None => tracing::warn!("no receive callback registered, dropping inbound value"),
                }
            }
            Ok(Frame::Shutdown) | Err(_) => break,
        }
    }
}

impl<W> Transport<W> for LoopbackTransport<W>
where
    W: Send + 'static,
{
    fn send(&self, address: Address, message_type: MessageType, wire: W) -> Result<()> {
        tracing::trace!(address, message_type, "loopback send");
        match self.peer_tx.try_send(Frame::Value(wire)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(ExchangeError::Backpressure),
            Err(TrySendError::Disconnected(_)) => Err(ExchangeError::ChannelClosed),
        }
    }

    fn register_receive_callback(&self, callback: ReceiveCallback<W>) {
        *self.callback.write() = Some(callback);
    }
}

impl<W> Drop for LoopbackTransport<W> {
    fn drop(&mut self) {
        let _ = self.self_tx.send(Frame::Shutdown);
        if let Some(handle) = self.drain.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_round_trip_delivery() {
        let (a, b) = LoopbackTransport::<String>::pair(4);
        let (tx, rx) = mpsc::channel();

        b.register_receive_callback(Arc::new(move |value| {
            let _ = tx.send(value);
        }));

        a.send(7, 1, "ping".to_string()).unwrap();
        assert_eq!(rx.recv_timeout(WAIT).unwrap(), "ping");
    }

    #[test]
    fn test_both_directions() {
        let (a, b) = LoopbackTransport::<u64>::pair(4);
        let (tx_a, rx_a) = mpsc::channel();
        let (tx_b, rx_b) = mpsc::channel();

        a.register_receive_callback(Arc::new(move |v| {
            let _ = tx_a.send(v);
        }));
        b.register_receive_callback(Arc::new(move |v| {
            let _ = tx_b.send(v);
        }));

        a.send(1, 0, 11).unwrap();
        b.send(2, 0, 22).unwrap();

        assert_eq!(rx_b.recv_timeout(WAIT).unwrap(), 11);
        assert_eq!(rx_a.recv_timeout(WAIT).unwrap(), 22);
    }

    #[test]
    fn test_backpressure_when_inbox_full() {
        let (a, b) = LoopbackTransport::<u32>::pair(1);

        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let release_rx = std::sync::Mutex::new(release_rx);

        // Callback blocks until released, pinning the drain thread
        b.register_receive_callback(Arc::new(move |_| {
            let _ = entered_tx.send(());
            let _ = release_rx.lock().unwrap().recv();
        }));

        a.send(1, 0, 1).unwrap();
        entered_rx.recv_timeout(WAIT).unwrap(); // drain thread is now blocked
        a.send(1, 0, 2).unwrap(); // fills the single inbox slot

        let third = a.send(1, 0, 3);
        assert!(matches!(third, Err(ExchangeError::Backpressure)));

        drop(release_tx); // unblock so Drop can join the drain thread
    }

    #[test]
    fn test_send_to_dropped_peer_is_channel_closed() {
        let (a, b) = LoopbackTransport::<u32>::pair(4);
        drop(b); // joins b's drain thread, closing its inbox

        let result = a.send(1, 0, 42);
        assert!(matches!(result, Err(ExchangeError::ChannelClosed)));
    }

    #[test]
    fn test_inbound_without_callback_is_dropped() {
        let (a, b) = LoopbackTransport::<u32>::pair(4);

        // No callback registered on b yet: value is logged and dropped
        a.send(1, 0, 1).unwrap();
        // Give the drain thread time to take the value off the inbox
        std::thread::sleep(Duration::from_millis(200));

        let (tx, rx) = mpsc::channel();
        b.register_receive_callback(Arc::new(move |v| {
            let _ = tx.send(v);
        }));
        a.send(1, 0, 2).unwrap();

        // Only the value sent after registration arrives
        assert_eq!(rx.recv_timeout(WAIT).unwrap(), 2);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_second_registration_replaces_first() {
        let (a, b) = LoopbackTransport::<u32>::pair(4);
        let (tx1, rx1) = mpsc::channel();
        let (tx2, rx2) = mpsc::channel();

        b.register_receive_callback(Arc::new(move |v| {
            let _ = tx1.send(v);
        }));
        a.send(1, 0, 1).unwrap();
        assert_eq!(rx1.recv_timeout(WAIT).unwrap(), 1);

        b.register_receive_callback(Arc::new(move |v| {
            let _ = tx2.send(v);
        }));
        a.send(1, 0, 2).unwrap();
        assert_eq!(rx2.recv_timeout(WAIT).unwrap(), 2);
        assert!(rx1.try_recv().is_err());
    }
}
