//! # meteowire
//!
//! A minimal weather query service over TCP:
//! - Fixed-size binary messages with an explicit big-endian layout
//! - Partial-transfer-safe send/receive on both sides
//! - Case-insensitive city registry and type-then-city validation
//! - Blocking server handling one request per connection
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────┐   65-byte request    ┌──────────────────────────────┐
//! │    Client    │ ───────────────────▶ │          TCP Server          │
//! │ (one query)  │ ◀─────────────────── │ (accept → exchange → close)  │
//! └──────────────┘    9-byte response   └──────────────┬───────────────┘
//!                                                      │
//!                                       ┌──────────────▼───────────────┐
//!                                       │        WeatherService        │
//!                                       │   (validate type, then city) │
//!                                       └──────┬────────────────┬──────┘
//!                                              │                │
//!                                              ▼                ▼
//!                                      ┌──────────────┐  ┌──────────────┐
//!                                      │ CityRegistry │  │   Provider   │
//!                                      │ (read-only)  │  │  (readings)  │
//!                                      └──────────────┘  └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod channel;
pub mod protocol;
pub mod registry;
pub mod provider;
pub mod service;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{MeteoError, Result};
pub use config::{ClientConfig, ServerConfig};
pub use protocol::{Status, WeatherKind, WeatherRequest, WeatherResponse};
pub use registry::CityRegistry;
pub use provider::{RandomProvider, WeatherProvider};
pub use service::WeatherService;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of meteowire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
