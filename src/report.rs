//! Best-effort score delivery to the scorekeeper endpoint.
//!
//! One POST of `{"score": <n>}` per completed game, fire-and-forget: any
//! transport failure is logged and swallowed, never surfaced into the game.
//! At startup a bounded connectivity probe decides between online and
//! offline play; an unreachable endpoint degrades to a local-only game.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use serde::Serialize;

use crate::hal::ScoreSink;

/// Bound on the startup connectivity probe.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
/// Per-request socket timeout; a stuck endpoint must not stall game-over.
const IO_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            path: "/api/v1/score".to_string(),
        }
    }
}

impl ReportConfig {
    /// Endpoint from `SCORE_HOST` / `SCORE_PORT` / `SCORE_PATH`, with the
    /// scorekeeper defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = std::env::var("SCORE_HOST").unwrap_or(defaults.host);
        let port = std::env::var("SCORE_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(defaults.port);
        let path = std::env::var("SCORE_PATH").unwrap_or(defaults.path);
        Self { host, port, path }
    }

    fn resolve(&self) -> Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .with_context(|| format!("report: resolve {}:{}", self.host, self.port))?
            .next()
            .ok_or_else(|| anyhow!("report: no address for {}:{}", self.host, self.port))
    }
}

#[derive(Debug, Serialize)]
struct ScorePayload {
    score: u32,
}

/// Serialized request for one score delivery.
fn build_request(config: &ReportConfig, score: u32) -> Result<String> {
    let body = serde_json::to_string(&ScorePayload { score })?;
    Ok(format!(
        "POST {} HTTP/1.1\r\nHost: {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        config.path,
        config.host,
        body.len(),
        body
    ))
}

/// HTTP score sink over a plain TCP stream, one connection per game.
#[derive(Debug)]
pub struct HttpScoreSink {
    config: ReportConfig,
}

impl HttpScoreSink {
    /// Probe the endpoint within [`CONNECT_TIMEOUT`]. `None` means offline
    /// play: the game runs, scores are simply not reported.
    pub fn connect(config: ReportConfig) -> Option<Self> {
        match Self::probe(&config) {
            Ok(()) => {
                info!("report: endpoint {}:{} reachable", config.host, config.port);
                Some(Self { config })
            }
            Err(err) => {
                warn!("report: going offline: {err:#}");
                None
            }
        }
    }

    /// Build a sink without probing (tests, known-local endpoints).
    pub fn unprobed(config: ReportConfig) -> Self {
        Self { config }
    }

    fn probe(config: &ReportConfig) -> Result<()> {
        let addr = config.resolve()?;
        TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT)
            .with_context(|| format!("report: probe {addr}"))?;
        Ok(())
    }

    fn send(&self, score: u32) -> Result<()> {
        let addr = self.config.resolve()?;
        let mut stream = TcpStream::connect_timeout(&addr, IO_TIMEOUT)
            .with_context(|| format!("report: connect {addr}"))?;
        stream.set_write_timeout(Some(IO_TIMEOUT))?;
        stream.set_read_timeout(Some(IO_TIMEOUT))?;

        let request = build_request(&self.config, score)?;
        stream.write_all(request.as_bytes())?;
        stream.flush()?;

        // Drain whatever status the server sends; the content is ignored.
        let mut response = [0u8; 512];
        let _ = stream.read(&mut response);
        Ok(())
    }
}

impl ScoreSink for HttpScoreSink {
    fn report(&mut self, score: u32) {
        if let Err(err) = self.send(score) {
            warn!("report: dropped score {score}: {err:#}");
        }
    }
}

/// Sink used when the startup probe failed.
#[derive(Debug, Default)]
pub struct OfflineSink;

impl ScoreSink for OfflineSink {
    fn report(&mut self, score: u32) {
        info!("report: offline, score {score} not sent");
    }
}
