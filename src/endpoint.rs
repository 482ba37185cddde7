//! UDP socket endpoint: bound socket ownership, bounded readiness waits,
//! single-datagram receives.
//!
//! The endpoint is moved into the driver task at spawn time and dropped when
//! the task exits, so the descriptor is released exactly once on every exit
//! path — including setup failures, where ownership never leaves `bind`.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::{self, UdpSocket};
use tokio::time;
use tracing::debug;

use crate::{AdmaError, Result};

/// Outcome of one bounded wait for datagram readiness.
#[derive(Debug)]
pub enum WaitOutcome {
    /// A datagram can be received without blocking.
    Ready,
    /// The interval elapsed with nothing to read — the expected idle
    /// condition while the device is silent.
    TimedOut,
    /// The readiness check itself failed. Recoverable; the loop retries.
    Failed(io::Error),
}

/// Source of raw datagrams for the ingestion loop.
///
/// Abstracts the bound socket so the driver can run against a scripted
/// endpoint in tests.
#[async_trait]
pub trait Endpoint: Send + 'static {
    /// Block until a datagram is available or `timeout` elapses.
    async fn wait(&mut self, timeout: Duration) -> WaitOutcome;

    /// Perform exactly one receive into `buf`, returning the byte count.
    /// The caller validates the count against the protocol length.
    fn receive(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// A bound UDP endpoint owning its socket descriptor.
#[derive(Debug)]
pub struct UdpEndpoint {
    socket: UdpSocket,
    local_addr: SocketAddr,
}

impl UdpEndpoint {
    /// Resolve `address:port` and bind a datagram socket to it.
    ///
    /// Resolution, socket creation, and bind each fail with their own
    /// [`AdmaError`] variant; all three are fatal to startup. Only the
    /// resolver-produced address is ever used for the bind.
    pub async fn bind(address: &str, port: u16) -> Result<Self> {
        let target = format!("{address}:{port}");

        let mut resolved = net::lookup_host(target.as_str())
            .await
            .map_err(|e| AdmaError::Resolve { target: target.clone(), source: Some(e) })?;
        let addr = resolved.next().ok_or_else(|| AdmaError::unresolved(target.clone()))?;

        let std_socket = std::net::UdpSocket::bind(addr)
            .map_err(|e| AdmaError::Bind { target: target.clone(), source: e })?;
        std_socket
            .set_nonblocking(true)
            .map_err(|e| AdmaError::SocketCreation { target: target.clone(), source: e })?;
        let socket = UdpSocket::from_std(std_socket)
            .map_err(|e| AdmaError::SocketCreation { target: target.clone(), source: e })?;
        let local_addr = socket
            .local_addr()
            .map_err(|e| AdmaError::SocketCreation { target: target.clone(), source: e })?;

        debug!(%local_addr, "UDP endpoint bound");
        Ok(Self { socket, local_addr })
    }

    /// Local address of the bound socket. Reports the OS-assigned port when
    /// the configuration requested port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

#[async_trait]
impl Endpoint for UdpEndpoint {
    async fn wait(&mut self, timeout: Duration) -> WaitOutcome {
        match time::timeout(timeout, self.socket.readable()).await {
            Err(_) => WaitOutcome::TimedOut,
            Ok(Ok(())) => WaitOutcome::Ready,
            Ok(Err(e)) => WaitOutcome::Failed(e),
        }
    }

    fn receive(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.socket.try_recv(buf)
    }
}
