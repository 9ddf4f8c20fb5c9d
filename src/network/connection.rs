//! Connection Handler
//!
//! Handles one client connection: exactly one request, one response, close.

use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use crate::error::{MeteoError, Result};
use crate::protocol::{read_request, write_response};
use crate::service::WeatherService;

/// Handles a single client exchange
pub struct Connection {
    /// TCP stream, closed when the connection is dropped
    stream: TcpStream,

    /// Validation and resolution of requests
    service: WeatherService,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    pub fn new(stream: TcpStream, service: WeatherService) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.ip().to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Responses are a single small write
        stream.set_nodelay(true)?;

        Ok(Self {
            stream,
            service,
            peer_addr,
        })
    }

    /// Configure connection timeouts (`None` blocks forever)
    pub fn set_timeouts(&self, read: Option<Duration>, write: Option<Duration>) -> Result<()> {
        self.stream.set_read_timeout(read)?;
        self.stream.set_write_timeout(write)?;
        Ok(())
    }

    /// Run the exchange and close the connection
    ///
    /// Validation failures are answered like any other request. Transport
    /// failures abandon the exchange and are returned to the caller, which
    /// only ever logs them.
    pub fn handle(mut self) -> Result<()> {
        tracing::debug!("Handling client {}", self.peer_addr);

        let request = match read_request(&mut self.stream) {
            Ok(request) => request,
            Err(MeteoError::ShortTransfer { transferred: 0, .. }) => {
                tracing::debug!("Client {} closed without sending a request", self.peer_addr);
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("Error reading request from {}: {}", self.peer_addr, e);
                return Err(e);
            }
        };

        tracing::info!(
            "Request '{} {}' from client ip {}",
            char::from(request.type_code()).escape_default(),
            request.city(),
            self.peer_addr
        );

        let response = self.service.respond(&request);
        tracing::trace!("Responding to {}: {:?}", self.peer_addr, response);

        if let Err(e) = write_response(&mut self.stream, &response) {
            tracing::warn!("Error writing response to {}: {}", self.peer_addr, e);
            return Err(e);
        }

        // Best effort: the peer may already be gone
        let _ = self.stream.shutdown(Shutdown::Both);
        Ok(())
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
