//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Single acceptor, one exchange per connection
//! - Optional worker pool for connections
//! - Requests resolved through WeatherService

mod server;
mod connection;
mod client;
mod session;

pub use server::{Server, ShutdownHandle};
pub use connection::Connection;
pub use client::{format_city, render, render_report, Client, RequestSpec};
pub use session::NetworkSession;
