//! # datawire
//!
//! A bidirectional data-exchange pipeline that decouples three concerns of
//! a networked system:
//!
//! - **Transport** ([`transport::Transport`]): moving wire values between
//!   addressed endpoints
//! - **Codec** ([`codec::Codec`]): converting typed application values
//!   to/from their wire representation
//! - **Consumer** ([`consumer::Consumer`]): handing decoded values to
//!   application logic
//!
//! An [`ExchangePipeline`] binds one of each (the consumer optional) into a
//! single send/receive unit. The send path is synchronous and
//! status-returning; the receive path is callback-driven and terminal.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use datawire::codec::MsgPackCodec;
//! use datawire::consumer::QueueConsumer;
//! use datawire::transport::LoopbackTransport;
//! use datawire::ExchangePipeline;
//!
//! let (here, there) = LoopbackTransport::pair(64);
//! let (consumer, work) = QueueConsumer::bounded(64);
//!
//! let receiver = ExchangePipeline::builder()
//!     .codec(MsgPackCodec::<String>::new())
//!     .transport(Arc::new(there))
//!     .consumer(Arc::new(consumer))
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
//! assert_eq!(work.recv().unwrap(), "hello");
//! # drop(receiver);
//! ```

pub mod codec;
pub mod consumer;
pub mod error;
pub mod transport;

mod pipeline;

pub use error::{ExchangeError, Result};
pub use pipeline::{ExchangePipeline, PipelineBuilder, WiringState};
