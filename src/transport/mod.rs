//! Transport module - moving wire values between addressed endpoints.
//!
//! Provides:
//! - [`Transport`] - the contract a concrete channel must satisfy
//! - [`LoopbackTransport`] - an in-process endpoint pair for tests and
//!   same-process wiring
//!
//! The pipeline treats a transport as a referenced collaborator, never an
//! owned one: it registers a single receive callback at wiring time and
//! otherwise only calls [`Transport::send`].

mod loopback;

pub use loopback::LoopbackTransport;

use std::sync::Arc;

use crate::error::Result;

/// Opaque numeric endpoint identifier, unique per logical peer.
///
/// Not validated or interpreted by the core.
pub type Address = u32;

/// Opaque numeric discriminator accompanying every send.
///
/// Its meaning is defined between transport and application; the core
/// passes it through untouched.
pub type MessageType = i32;

/// Handler invoked by a transport for every inbound wire value.
///
/// May run on any transport-owned thread, concurrently with itself; it must
/// not block unboundedly or the transport loses capacity to service further
/// arrivals.
pub type ReceiveCallback<W> = Arc<dyn Fn(W) + Send + Sync>;

/// An addressed, typed channel pushing outbound wire values and delivering
/// inbound ones through a registered callback.
///
/// Delivery failures (unreachable peer, closed channel, backpressure) are
/// expected and recoverable, so [`send`](Transport::send) reports them as a
/// status rather than panicking. Inbound values are delivered whole -
/// reassembly, if the medium fragments, is the transport's own job.
pub trait Transport<W>: Send + Sync {
    /// Attempt delivery of one wire value to the addressed peer.
    fn send(&self, address: Address, message_type: MessageType, wire: W) -> Result<()>;

    /// Install the handler invoked on every inbound wire value.
    ///
    /// A second registration replaces the first.
    fn register_receive_callback(&self, callback: ReceiveCallback<W>);
}
