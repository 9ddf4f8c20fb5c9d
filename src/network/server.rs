//! TCP Server
//!
//! Accepts connections and runs one exchange per connection.
//!
//! With a single worker (the default) everything happens on the calling
//! thread: accept, receive, validate, respond, close, then accept again. A
//! slow client holds up everyone behind it. With more workers, accepted
//! streams are handed to a fixed pool over a bounded channel; each
//! connection is still served independently.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam::channel;

use crate::config::ServerConfig;
use crate::error::{MeteoError, Result};
use crate::provider::WeatherProvider;
use crate::registry::CityRegistry;
use crate::service::WeatherService;

use super::Connection;

/// TCP server for weather queries
pub struct Server {
    config: ServerConfig,
    listener: TcpListener,
    service: WeatherService,
    shutdown: Arc<AtomicBool>,
}

impl Server {
    /// Bind the listening socket
    ///
    /// Failure here is a setup error and should end the process.
    pub fn bind(
        config: ServerConfig,
        registry: Arc<CityRegistry>,
        provider: Arc<dyn WeatherProvider>,
    ) -> Result<Self> {
        let listener =
            TcpListener::bind(config.bind_addr()).map_err(|e| MeteoError::setup("bind", e))?;

        tracing::info!(
            "Server listening on {} ({} cities, {} worker(s))",
            listener.local_addr().map_err(|e| MeteoError::setup("listen", e))?,
            registry.len(),
            config.workers
        );

        Ok(Self {
            config,
            listener,
            service: WeatherService::new(registry, provider),
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Handle that stops `run` from another thread
    pub fn shutdown_handle(&self) -> Result<ShutdownHandle> {
        Ok(ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
            wake_addr: wake_addr(self.local_addr()?),
        })
    }

    fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Serve connections until shut down (blocking)
    ///
    /// Only an accept failure ends the loop with an error; broken
    /// connections are logged and skipped.
    pub fn run(&self) -> Result<()> {
        tracing::info!("Waiting for clients...");

        if self.config.workers > 1 {
            return self.run_pooled();
        }

        while !self.is_shutting_down() {
            self.serve_one()?;
        }

        tracing::info!("Server stopped accepting connections");
        Ok(())
    }

    /// Accept one connection and run its exchange to completion
    pub fn serve_one(&self) -> Result<()> {
        let stream = self.accept()?;
        if self.is_shutting_down() {
            return Ok(());
        }

        handle_stream(stream, &self.service, &self.config);
        Ok(())
    }

    fn accept(&self) -> Result<TcpStream> {
        let (stream, peer) = self
            .listener
            .accept()
            .map_err(|e| MeteoError::setup("accept", e))?;
        tracing::debug!("Accepted connection from {}", peer);
        Ok(stream)
    }

    /// Accept on this thread, serve on a fixed worker pool
    fn run_pooled(&self) -> Result<()> {
        let (tx, rx) = channel::bounded::<TcpStream>(self.config.workers);

        let mut workers = Vec::with_capacity(self.config.workers);
        for id in 0..self.config.workers {
            let rx = rx.clone();
            let service = self.service.clone();
            let config = self.config.clone();

            let worker = thread::Builder::new()
                .name(format!("meteowire-worker-{}", id))
                .spawn(move || {
                    for stream in rx.iter() {
                        handle_stream(stream, &service, &config);
                    }
                })
                .map_err(|e| MeteoError::setup("spawn worker", e))?;
            workers.push(worker);
        }
        drop(rx);

        let result = loop {
            if self.is_shutting_down() {
                break Ok(());
            }

            let stream = match self.accept() {
                Ok(stream) => stream,
                Err(e) => break Err(e),
            };
            if self.is_shutting_down() {
                break Ok(());
            }

            if tx.send(stream).is_err() {
                break Err(MeteoError::Connection("worker pool is gone".to_string()));
            }
        };

        // Closing the channel lets workers drain and exit
        drop(tx);
        for worker in workers {
            if worker.join().is_err() {
                tracing::error!("Connection worker panicked");
            }
        }

        tracing::info!("Server stopped accepting connections");
        result
    }
}

/// Run one exchange, logging instead of propagating connection failures
fn handle_stream(stream: TcpStream, service: &WeatherService, config: &ServerConfig) {
    let connection = match Connection::new(stream, service.clone()) {
        Ok(connection) => connection,
        Err(e) => {
            tracing::warn!("Failed to set up connection: {}", e);
            return;
        }
    };

    if let Err(e) = connection.set_timeouts(config.read_timeout(), config.write_timeout()) {
        tracing::warn!("Failed to set timeouts for {}: {}", connection.peer_addr(), e);
        return;
    }

    let peer = connection.peer_addr().to_string();
    match connection.handle() {
        Ok(()) => {}
        Err(e) if e.is_connection_error() => {
            tracing::debug!("Connection with {} aborted: {}", peer, e)
        }
        Err(e) => tracing::warn!("Unexpected failure serving {}: {}", peer, e),
    }
}

/// Stops a running server from another thread
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
    wake_addr: SocketAddr,
}

impl ShutdownHandle {
    /// Stop after the connection in progress, if any
    ///
    /// Accept blocks, so the listener is poked with a throwaway connection.
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
        if let Err(e) = TcpStream::connect(self.wake_addr) {
            tracing::debug!("Shutdown wake-up connect failed: {}", e);
        }
    }
}

/// Connectable address for a listener that may be bound to a wildcard
fn wake_addr(addr: SocketAddr) -> SocketAddr {
    match addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => {
            SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), addr.port())
        }
        IpAddr::V6(ip) if ip.is_unspecified() => {
            SocketAddr::new(IpAddr::V6(Ipv6Addr::LOCALHOST), addr.port())
        }
        _ => addr,
    }
}
