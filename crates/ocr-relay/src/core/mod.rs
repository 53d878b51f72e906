//! Relay orchestration and configuration.
//!
//! - **Configuration** (`config`): `RelayConfig` loading from TOML/JSON, discovery and env overrides
//! - **Relay** (`relay`): `OcrRelay`, the single entry point wiring the store, its snapshot and the resolver
//!
//! # Example
//!
//! ```rust,no_run
//! use ocr_relay::core::{config::RelayConfig, relay::OcrRelay};
//!
//! let config = RelayConfig::default();
//! let relay = OcrRelay::open(&config);
//! relay.submit("cdEFG123");
//! println!("latest: {}", relay.resolve().text);
//! ```

pub mod config;
pub mod relay;

pub use config::RelayConfig;
pub use relay::{OcrRelay, SubmitRequest};
