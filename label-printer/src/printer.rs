//! Printer adapters for sending ZPL data
//!
//! Supports network printers (raw TCP, port 9100). The raw port has no
//! application-level acknowledgment: a successful `print` only means the
//! bytes were handed to the printer's socket.

use crate::error::{PrintError, PrintResult};
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{info, instrument, warn};

/// Default raw TCP print port
pub const DEFAULT_PORT: u16 = 9100;

/// Trait for printer adapters
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send raw ZPL data to the printer
    async fn print(&self, data: &[u8]) -> PrintResult<()>;

    /// Check if the printer is online/reachable
    async fn is_online(&self) -> bool;
}

/// Network printer (raw TCP)
///
/// Zebra and compatible label printers accept ZPL on port 9100.
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    host: String,
    port: u16,
    timeout: Duration,
}

impl NetworkPrinter {
    /// Create a new network printer
    ///
    /// `host` may be an IP address or a hostname; it is resolved on each print.
    pub fn new(host: &str, port: u16) -> PrintResult<Self> {
        let host = host.trim();
        if host.is_empty() {
            return Err(PrintError::InvalidConfig("Empty printer host".to_string()));
        }
        if port == 0 {
            return Err(PrintError::InvalidConfig(format!(
                "Invalid port for {}: 0",
                host
            )));
        }

        Ok(Self {
            host: host.to_string(),
            port,
            timeout: Duration::from_secs(5),
        })
    }

    /// Create from an address string (e.g., "192.168.1.100:9100")
    pub fn from_addr(addr: &str) -> PrintResult<Self> {
        let (host, port) = addr
            .rsplit_once(':')
            .ok_or_else(|| PrintError::InvalidConfig(format!("Invalid address: {}", addr)))?;
        let port = port
            .parse()
            .map_err(|_| PrintError::InvalidConfig(format!("Invalid address: {}", addr)))?;

        Self::new(host, port)
    }

    /// Set connection timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the printer address as `host:port`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the printer port
    pub fn port(&self) -> u16 {
        self.port
    }

    async fn connect(&self, timeout: Duration) -> PrintResult<TcpStream> {
        tokio::time::timeout(timeout, TcpStream::connect((self.host.as_str(), self.port)))
            .await
            .map_err(|_| PrintError::Timeout(format!("Connection timeout: {}", self.addr())))?
            .map_err(|e| PrintError::Connection(format!("{}: {}", self.addr(), e)))
    }
}

impl Printer for NetworkPrinter {
    #[instrument(skip(self, data), fields(addr = %self.addr(), data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        info!("Connecting to printer");

        // The stream is closed when dropped, including on the error paths below
        let mut stream = self.connect(self.timeout).await?;

        info!("Connected, sending {} bytes", data.len());
        send_job(&mut stream, data).await?;

        info!("Print job sent successfully");
        Ok(())
    }

    #[instrument(skip(self), fields(addr = %self.addr()))]
    async fn is_online(&self) -> bool {
        let check_timeout = Duration::from_millis(500);

        match self.connect(check_timeout).await {
            Ok(_) => {
                info!("Printer online");
                true
            }
            Err(e) => {
                warn!(error = %e, "Printer offline");
                false
            }
        }
    }
}

/// Write a job and half-close the connection
///
/// Once the bytes are flushed the printer has the job, so a failed shutdown
/// is only logged.
async fn send_job<W>(stream: &mut W, data: &[u8]) -> PrintResult<()>
where
    W: AsyncWrite + Unpin,
{
    stream.write_all(data).await.map_err(|e| {
        PrintError::Io(std::io::Error::new(
            e.kind(),
            format!("Write failed: {}", e),
        ))
    })?;
    stream.flush().await?;

    if let Err(e) = stream.shutdown().await {
        warn!(error = %e, "Shutdown after send failed");
    }
    Ok(())
}
