//! OCR Relay - bounded, durable hand-off of recognized text to a browser front end
//!
//! An external recognizer publishes text either by calling into this crate,
//! by POSTing it over HTTP, or by writing a hand-off file. The relay keeps a
//! bounded history of submissions, snapshots it to disk after every change,
//! and answers "what is the latest text" from the hand-off file first and the
//! history second.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ocr_relay::{OcrRelay, RelayConfig};
//!
//! let relay = OcrRelay::open(&RelayConfig::default());
//! relay.submit("cdEFG123");
//! println!("latest: {}", relay.resolve().text);
//! ```
//!
//! # Architecture
//!
//! - **Store** (`store`): capacity-bounded FIFO history behind one lock
//! - **Persistence** (`persistence`): atomic JSON snapshot with serialized writes
//! - **Resolution** (`resolution`): hand-off file first, history fallback
//! - **Core** (`core`): configuration and the `OcrRelay` service tying them together
//! - **API** (`api`, feature `api`): axum router exposing the relay over HTTP

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod persistence;
pub mod resolution;
pub mod store;
pub mod types;

#[cfg(feature = "api")]
pub mod api;

pub use crate::core::config::RelayConfig;
pub use crate::core::relay::{OcrRelay, SubmitRequest};
pub use error::{RelayError, Result};
pub use persistence::SnapshotFile;
pub use resolution::{ResolutionSource, Resolved, Resolver};
pub use store::{DEFAULT_CAPACITY, ResultStore};
pub use types::{ResultRecord, STATUS_SUCCESS, Snapshot};
