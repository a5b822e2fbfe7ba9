//! Pipeline composing one codec, one transport and at most one consumer
//! into a single send/receive unit for one application data type.
//!
//! The send path is caller-driven and status-returning; the receive path is
//! callback-driven and void. That asymmetry mirrors the difference between
//! controlling an outbound action and reacting to an inbound event the
//! transport has already committed to - there is nothing useful a receive
//! error could be returned to.
//!
//! ```text
//! send:    [caller] -> encode -> [transport]
//! receive: [transport] -> decode -> [consumer]
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use datawire::codec::MsgPackCodec;
//! use datawire::transport::LoopbackTransport;
//! use datawire::ExchangePipeline;
//!
//! let (here, there) = LoopbackTransport::pair(16);
//!
//! let receiver = ExchangePipeline::builder()
//!     .codec(MsgPackCodec::<String>::new())
//!     .transport(Arc::new(there))
//!     .consumer(Arc::new(|greeting: String| println!("{greeting}")))
//!     .build()
//!     .unwrap();
//!
//! let sender = ExchangePipeline::builder()
//!     .codec(MsgPackCodec::<String>::new())
//!     .transport(Arc::new(here))
//!     .build()
//!     .unwrap();
//!
//! sender.send(7, 1, &"hello".to_string()).unwrap();
//! # drop(receiver);
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::codec::Codec;
use crate::consumer::Consumer;
use crate::error::{ExchangeError, Result};
use crate::transport::{Address, MessageType, Transport};

/// Wiring progress of a pipeline.
///
/// Codec and transport together make a pipeline usable; the consumer is
/// optional and does not affect this state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WiringState {
    /// Neither codec nor transport registered.
    Unwired,
    /// Exactly one of codec or transport registered.
    PartiallyWired,
    /// Both codec and transport registered; traffic is meaningful.
    Wired,
}

struct Slots<P, W> {
    codec: RwLock<Option<Arc<dyn Codec<Plain = P, Wire = W>>>>,
    transport: RwLock<Option<Arc<dyn Transport<W>>>>,
    consumer: RwLock<Option<Arc<dyn Consumer<P>>>>,
}

/// Composes exactly one codec, one transport and zero-or-one consumer into
/// a bidirectional exchange unit for plain values of type `P` carried as
/// wire values of type `W`.
///
/// The pipeline contributes no threads of its own: [`send`] runs on the
/// caller's thread and the receive path runs on whatever thread the
/// transport delivers from. Both may run concurrently with each other and
/// with themselves. Every operation works on a snapshot of the registration
/// slots, so replacing a codec, transport or consumer while traffic is in
/// flight is safe - each in-flight call keeps using the binding it
/// snapshotted, and each new call sees the replacement.
///
/// Cloning produces another handle to the same pipeline. When the last
/// handle is dropped, the receive callback left on the transport degrades
/// to a no-op rather than a dangling call.
///
/// [`send`]: ExchangePipeline::send
pub struct ExchangePipeline<P, W> {
    slots: Arc<Slots<P, W>>,
}

impl<P, W> Clone for ExchangePipeline<P, W> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
        }
    }
}

impl<P, W> ExchangePipeline<P, W>
where
    P: fmt::Debug + 'static,
    W: fmt::Debug + 'static,
{
    /// Create an unwired pipeline. Components register in any order before
    /// traffic begins.
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Slots {
                codec: RwLock::new(None),
                transport: RwLock::new(None),
                consumer: RwLock::new(None),
            }),
        }
    }

    /// Start building a fully-wired pipeline.
    ///
    /// Prefer this over [`new`](ExchangePipeline::new) plus late
    /// registration when the wiring is known up front: `build` refuses to
    /// produce a pipeline that could fail its first send.
    pub fn builder() -> PipelineBuilder<P, W> {
        PipelineBuilder {
            codec: None,
            transport: None,
            consumer: None,
        }
    }

    /// Register the codec, replacing any previous one.
    ///
    /// The codec is exclusively owned by the pipeline, so it is taken by
    /// value.
    pub fn register_codec<C>(&self, codec: C)
    where
        C: Codec<Plain = P, Wire = W> + 'static,
    {
        *self.slots.codec.write() = Some(Arc::new(codec));
    }

    /// Register the transport, replacing any previous one, and install this
    /// pipeline's receive callback on it.
    ///
    /// The transport is owned by the hosting process and only referenced
    /// here. The installed callback holds a weak reference: a transport
    /// outliving its pipeline delivers into a no-op rather than a dangling
    /// call.
    pub fn register_transport(&self, transport: Arc<dyn Transport<W>>) {
        let weak: Weak<Slots<P, W>> = Arc::downgrade(&self.slots);
        transport.register_receive_callback(Arc::new(move |wire| {
            if let Some(slots) = weak.upgrade() {
                on_receive(&slots, wire);
            }
        }));
        *self.slots.transport.write() = Some(transport);
    }

    /// Register the consumer, replacing any previous one.
    ///
    /// May be called at any time, including while traffic is in flight:
    /// each inbound event goes to whichever consumer is registered when
    /// that event is decoded.
    pub fn register_consumer(&self, consumer: Arc<dyn Consumer<P>>) {
        *self.slots.consumer.write() = Some(consumer);
    }

    /// Current wiring progress.
    pub fn wiring_state(&self) -> WiringState {
        let codec = self.slots.codec.read().is_some();
        let transport = self.slots.transport.read().is_some();
        match (codec, transport) {
            (true, true) => WiringState::Wired,
            (false, false) => WiringState::Unwired,
            _ => WiringState::PartiallyWired,
        }
    }

    /// Encode `value` and hand it to the transport for delivery.
    ///
    /// Both slots are checked before anything runs, so an unwired send has
    /// no side effects. An encode failure returns before the transport is
    /// contacted - no partial send. On encode success the transport's own
    /// status is returned verbatim, never wrapped; retry and reconnection
    /// policy belong to the transport and the application, not here.
    pub fn send(&self, address: Address, message_type: MessageType, value: &P) -> Result<()> {
        let transport = self
            .slots
            .transport
            .read()
            .clone()
            .ok_or(ExchangeError::TransportMissing)?;
        let codec = self
            .slots
            .codec
            .read()
            .clone()
            .ok_or(ExchangeError::CodecMissing)?;

        let wire = codec.encode(value)?;
        transport.send(address, message_type, wire)
    }
}

/// Receive path, reachable only through the callback registered on the
/// transport.
///
/// A wire value that fails to decode is discarded with a diagnostic - the
/// transport has already committed the data, so there is no retry and no
/// backpressure signal to give. A decoded value with no consumer registered
/// is likewise discarded, observable only in the log.
fn on_receive<P, W>(slots: &Slots<P, W>, wire: W)
where
    P: fmt::Debug,
    W: fmt::Debug,
{
    let codec = match slots.codec.read().clone() {
        Some(codec) => codec,
        None => {
            tracing::warn!(payload = ?wire, "inbound value before codec registration, discarding");
            return;
        }
    };

    match codec.decode(&wire) {
        Ok(value) => {
            let consumer = slots.consumer.read().clone();
            match consumer {
                Some(consumer) => consumer.consume(value),
                None => {
                    tracing::warn!(payload = ?value, "unconsumed inbound value, no consumer registered");
                }
            }
        }
        Err(err) => {
            tracing::debug!(payload = ?wire, error = %err, "discarding undecodable inbound value");
        }
    }
}

/// Fluent builder producing a pipeline wired before any traffic starts.
///
/// `build` fails if the codec or the transport is missing, which removes
/// the partially-wired window entirely for hosts that know their wiring up
/// front.
pub struct PipelineBuilder<P, W> {
    codec: Option<Arc<dyn Codec<Plain = P, Wire = W>>>,
    transport: Option<Arc<dyn Transport<W>>>,
    consumer: Option<Arc<dyn Consumer<P>>>,
}

impl<P, W> PipelineBuilder<P, W>
where
    P: fmt::Debug + 'static,
    W: fmt::Debug + 'static,
{
    /// Set the codec.
    pub fn codec<C>(mut self, codec: C) -> Self
    where
        C: Codec<Plain = P, Wire = W> + 'static,
    {
        self.codec = Some(Arc::new(codec));
        self
    }

    /// Set the transport.
    pub fn transport(mut self, transport: Arc<dyn Transport<W>>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set the optional consumer.
    pub fn consumer(mut self, consumer: Arc<dyn Consumer<P>>) -> Self {
        self.consumer = Some(consumer);
        self
    }

    /// Wire everything and return the pipeline.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::TransportMissing`] or
    /// [`ExchangeError::CodecMissing`] if a mandatory role was not set.
    pub fn build(self) -> Result<ExchangePipeline<P, W>> {
        let transport = self.transport.ok_or(ExchangeError::TransportMissing)?;
        let codec = self.codec.ok_or(ExchangeError::CodecMissing)?;

        let pipeline = ExchangePipeline::new();
        *pipeline.slots.codec.write() = Some(codec);
        if let Some(consumer) = self.consumer {
            *pipeline.slots.consumer.write() = Some(consumer);
        }
        pipeline.register_transport(transport);
        Ok(pipeline)
    }
}

impl<P, W> Default for ExchangePipeline<P, W>
where
    P: fmt::Debug + 'static,
    W: fmt::Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
