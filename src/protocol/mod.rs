//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! Every message has a fixed size known to both ends, so there is no length
//! prefix. Fields are written one by one in network byte order (big-endian);
//! there is never any padding between them.
//!
//! ### Request Format (65 bytes)
//! ```text
//! ┌──────────┬──────────────────────────────────────────┐
//! │ Type (1) │        City (64, NUL-terminated)         │
//! └──────────┴──────────────────────────────────────────┘
//! ```
//!
//! ### Response Format (9 bytes)
//! ```text
//! ┌──────────────┬──────────┬──────────────────┐
//! │ Status (4)   │ Type (1) │ Value (4, f32)   │
//! └──────────────┴──────────┴──────────────────┘
//! ```
//!
//! ### Status Codes
//! - 0: SUCCESS
//! - 1: CITY_NOT_AVAILABLE
//! - 2: INVALID_REQUEST

mod request;
mod response;
mod codec;

pub use request::{WeatherKind, WeatherRequest};
pub use response::{Status, WeatherResponse};
pub use codec::{
    decode_request, decode_response, encode_request, encode_response, read_request,
    read_response, write_request, write_response,
};

/// Default TCP port for client and server
pub const DEFAULT_PORT: u16 = 56700;

/// Size of the city field on the wire, terminator included
pub const CITY_CAPACITY: usize = 64;

/// Longest city name that fits in the city field
pub const MAX_CITY_LEN: usize = CITY_CAPACITY - 1;

/// Pending connection queue length requested by the original deployment
pub const LISTEN_BACKLOG: u32 = 5;

/// Encoded request size: type (1) + city (64)
pub const REQUEST_SIZE: usize = 1 + CITY_CAPACITY;

/// Encoded response size: status (4) + type (1) + value (4)
pub const RESPONSE_SIZE: usize = 4 + 1 + 4;
