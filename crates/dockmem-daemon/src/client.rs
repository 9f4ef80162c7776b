//! Blocking daemon API client.

use std::io::Read;

use dockmem_common::config::{DaemonConfig, DaemonHost};
use dockmem_common::constants::MAX_API_VERSION;
use dockmem_common::error::{DockmemError, Result};
use dockmem_common::types::{ContainerId, ContainerSummary};
use serde::Deserialize;

use crate::transport::{Reply, ReplyBody, Transport};
use crate::version;

/// Live stats stream for one container, with HTTP framing stripped.
pub type StatsStream = ReplyBody;

/// Error payload the daemon attaches to failed requests.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    message: String,
}

/// Client bound to one daemon endpoint and API version.
#[derive(Debug, Clone)]
pub struct DockerClient {
    host: DaemonHost,
    transport: Transport,
    api_version: String,
    pinned: bool,
}

impl DockerClient {
    /// Creates a client without contacting the daemon.
    ///
    /// Uses the pinned API version from `config`, or the client maximum
    /// until [`Self::negotiate_api_version`] runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport for the host cannot be set up.
    pub fn new(config: DaemonConfig) -> Result<Self> {
        let transport = Transport::open(&config.host)?;
        let pinned = config.api_version.is_some();
        Ok(Self {
            host: config.host,
            transport,
            api_version: config
                .api_version
                .unwrap_or_else(|| MAX_API_VERSION.to_string()),
            pinned,
        })
    }

    /// Creates a client and negotiates the API version with the daemon.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport for the host cannot be set up. An
    /// unreachable daemon is not an error here.
    pub fn connect(config: DaemonConfig) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.negotiate_api_version();
        Ok(client)
    }

    /// Daemon endpoint this client talks to.
    #[must_use]
    pub const fn host(&self) -> &DaemonHost {
        &self.host
    }

    /// API version used to prefix request paths.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Agrees on an API version with the daemon unless one was pinned.
    ///
    /// A daemon that cannot be pinged leaves the client on the fallback
    /// version; the failure resurfaces on the next real request.
    pub fn negotiate_api_version(&mut self) {
        if self.pinned {
            tracing::debug!(version = %self.api_version, "api version pinned");
            return;
        }
        let advertised = match self.ping() {
            Ok(advertised) => advertised,
            Err(e) => {
                tracing::warn!(host = %self.host, error = %e, "daemon ping failed");
                None
            }
        };
        self.api_version = version::negotiate(advertised.as_deref());
        tracing::debug!(version = %self.api_version, "negotiated api version");
    }

    /// Pings the daemon and returns the API version it advertises.
    ///
    /// # Errors
    ///
    /// Returns an error if the daemon is unreachable.
    pub fn ping(&self) -> Result<Option<String>> {
        let reply = self.transport.get("/_ping")?;
        Ok(reply.api_version().map(ToString::to_string))
    }

    /// Lists running containers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the listing cannot be decoded.
    pub fn list_containers(&self) -> Result<Vec<ContainerSummary>> {
        let path = self.versioned("/containers/json");
        let reply = self.get(&path)?;
        Ok(serde_json::from_reader(reply.into_body())?)
    }

    /// Opens the streaming stats endpoint of `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the daemon cannot be reached or rejects the
    /// container.
    pub fn stats(&self, id: &ContainerId) -> Result<StatsStream> {
        let path = self.versioned(&format!("/containers/{id}/stats?stream=true"));
        tracing::info!(container = %id, "opening stats stream");
        self.get(&path).map(Reply::into_body)
    }

    fn versioned(&self, path: &str) -> String {
        format!("/v{}{path}", self.api_version)
    }

    /// Sends a request and keeps only successful responses.
    fn get(&self, path: &str) -> Result<Reply> {
        let reply = self.transport.get(path)?;
        if reply.is_success() {
            Ok(reply)
        } else {
            Err(status_error(reply, path))
        }
    }
}

/// Turns a non-success response into an error, using the daemon's message
/// when the body carries one.
fn status_error(reply: Reply, resource: &str) -> DockmemError {
    let status = reply.status();
    let reason = reply.reason().to_string();
    let mut raw = Vec::new();
    if let Err(e) = reply.into_body().read_to_end(&mut raw) {
        tracing::debug!(error = %e, resource, "error body unreadable");
    }
    let message = serde_json::from_slice::<ErrorPayload>(&raw).map_or_else(
        |_| {
            let text = String::from_utf8_lossy(&raw).trim().to_string();
            if text.is_empty() { reason } else { text }
        },
        |payload| payload.message,
    );
    tracing::debug!(status, %message, resource, "daemon request failed");
    if status == 404 {
        DockmemError::NotFound {
            kind: "resource",
            id: format!("{resource} ({message})"),
        }
    } else {
        DockmemError::Daemon { status, message }
    }
}
