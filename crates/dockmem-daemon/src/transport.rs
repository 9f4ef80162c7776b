//! HTTP transports to the daemon.
//!
//! TCP endpoints go through a blocking `reqwest` client. Unix sockets are
//! dialled with tokio and driven by a `hyper` HTTP/1.1 connection on a
//! single-threaded runtime; bodies are read by blocking on that runtime.

use std::io::{self, Read};
#[cfg(unix)]
use std::path::PathBuf;
#[cfg(unix)]
use std::sync::Arc;
use std::time::Duration;

#[cfg(unix)]
use bytes::Bytes;
use dockmem_common::config::DaemonHost;
use dockmem_common::constants::APP_NAME;
use dockmem_common::error::{DockmemError, Result};
use reqwest::StatusCode;
use reqwest::header::HeaderMap;

/// Header carrying the daemon's API version.
const API_VERSION_HEADER: &str = "api-version";

fn user_agent() -> String {
    format!("{APP_NAME}/{}", env!("CARGO_PKG_VERSION"))
}

/// A way of sending requests to one daemon endpoint.
#[derive(Debug, Clone)]
pub enum Transport {
    /// Plain HTTP over TCP.
    Tcp(TcpTransport),
    /// HTTP over a Unix domain socket.
    #[cfg(unix)]
    Unix(UnixTransport),
}

impl Transport {
    /// Prepares a transport for `host` without contacting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or runtime cannot be built, or if
    /// a Unix socket is requested on a platform without them.
    pub fn open(host: &DaemonHost) -> Result<Self> {
        let endpoint = host.to_string();
        match host {
            #[cfg(unix)]
            DaemonHost::Unix(path) => UnixTransport::new(path.clone(), endpoint).map(Self::Unix),
            #[cfg(not(unix))]
            DaemonHost::Unix(_) => Err(DockmemError::Config {
                message: format!("unix sockets are not supported on this platform: {endpoint}"),
            }),
            DaemonHost::Tcp(addr) => TcpTransport::new(addr, endpoint).map(Self::Tcp),
        }
    }

    /// Sends `GET path` and returns the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error if the daemon cannot be reached or the exchange
    /// breaks before a response head arrives.
    pub fn get(&self, path: &str) -> Result<Reply> {
        tracing::trace!(path, "sending request");
        match self {
            Self::Tcp(t) => t.get(path),
            #[cfg(unix)]
            Self::Unix(t) => t.get(path),
        }
    }
}

/// Blocking `reqwest` client bound to a `host:port`.
#[derive(Debug, Clone)]
pub struct TcpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
    endpoint: String,
}

impl TcpTransport {
    fn new(addr: &str, endpoint: String) -> Result<Self> {
        // Stats responses never finish, so no overall deadline.
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent())
            .timeout(None::<Duration>)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| DockmemError::transport(&endpoint, e))?;
        Ok(Self {
            client,
            base_url: format!("http://{addr}"),
            endpoint,
        })
    }

    fn get(&self, path: &str) -> Result<Reply> {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .map_err(|e| DockmemError::transport(&self.endpoint, e))?;
        let status = response.status();
        let api_version = api_version(response.headers());
        Ok(Reply::new(status, api_version, ReplyBody::Tcp(response)))
    }
}

/// `hyper` connections over a Unix domain socket.
#[cfg(unix)]
#[derive(Debug, Clone)]
pub struct UnixTransport {
    path: PathBuf,
    endpoint: String,
    runtime: Arc<tokio::runtime::Runtime>,
}

#[cfg(unix)]
impl UnixTransport {
    fn new(path: PathBuf, endpoint: String) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .build()
            .map_err(|e| DockmemError::io(&endpoint, e))?;
        Ok(Self {
            path,
            endpoint,
            runtime: Arc::new(runtime),
        })
    }

    fn get(&self, path: &str) -> Result<Reply> {
        use http_body_util::Empty;
        use hyper::header::{HOST, USER_AGENT};
        use hyper_util::rt::TokioIo;

        let request = hyper::Request::get(path)
            .header(HOST, "docker")
            .header(USER_AGENT, user_agent())
            .body(Empty::<Bytes>::new())
            .map_err(|e| DockmemError::protocol(format!("bad request for {path}: {e}")))?;

        let response = self.runtime.block_on(async {
            let stream = tokio::net::UnixStream::connect(&self.path)
                .await
                .map_err(|e| DockmemError::io(&self.endpoint, e))?;
            let (mut sender, connection) =
                hyper::client::conn::http1::handshake(TokioIo::new(stream))
                    .await
                    .map_err(|e| DockmemError::transport(&self.endpoint, e))?;
            let _ = tokio::spawn(async move {
                if let Err(e) = connection.await {
                    tracing::debug!(error = %e, "daemon connection closed with error");
                }
            });
            sender
                .send_request(request)
                .await
                .map_err(|e| DockmemError::transport(&self.endpoint, e))
        })?;

        let (parts, body) = response.into_parts();
        let body = UnixBody {
            body,
            pending: Bytes::new(),
            runtime: Arc::clone(&self.runtime),
        };
        Ok(Reply::new(
            parts.status,
            api_version(&parts.headers),
            ReplyBody::Unix(body),
        ))
    }
}

/// Response body read off a Unix socket connection.
#[cfg(unix)]
#[derive(Debug)]
pub struct UnixBody {
    body: hyper::body::Incoming,
    pending: Bytes,
    runtime: Arc<tokio::runtime::Runtime>,
}

#[cfg(unix)]
impl Read for UnixBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        use http_body_util::BodyExt;

        while self.pending.is_empty() {
            match self.runtime.block_on(self.body.frame()) {
                None => return Ok(0),
                Some(Ok(frame)) => {
                    if let Ok(data) = frame.into_data() {
                        self.pending = data;
                    }
                }
                Some(Err(e)) => return Err(io::Error::other(e)),
            }
        }
        let n = buf.len().min(self.pending.len());
        buf[..n].copy_from_slice(&self.pending.split_to(n));
        Ok(n)
    }
}

/// Body of a daemon response, with transfer framing already removed.
#[derive(Debug)]
pub enum ReplyBody {
    /// Body of a TCP response.
    Tcp(reqwest::blocking::Response),
    /// Body of a Unix socket response.
    #[cfg(unix)]
    Unix(UnixBody),
}

impl Read for ReplyBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(r) => r.read(buf),
            #[cfg(unix)]
            Self::Unix(r) => r.read(buf),
        }
    }
}

/// Status line, API version header, and body of one daemon response.
#[derive(Debug)]
pub struct Reply {
    status: StatusCode,
    api_version: Option<String>,
    body: ReplyBody,
}

impl Reply {
    const fn new(status: StatusCode, api_version: Option<String>, body: ReplyBody) -> Self {
        Self {
            status,
            api_version,
            body,
        }
    }

    /// Numeric HTTP status.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// Canonical reason phrase of the status, if it has one.
    #[must_use]
    pub fn reason(&self) -> &str {
        self.status.canonical_reason().unwrap_or_default()
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// API version the daemon advertised, if any.
    #[must_use]
    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// Hands over the body.
    #[must_use]
    pub fn into_body(self) -> ReplyBody {
        self.body
    }
}

fn api_version(headers: &HeaderMap) -> Option<String> {
    headers
        .get(API_VERSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{json_response, serve};

    #[test]
    fn tcp_get_returns_status_headers_and_body() {
        let response = "HTTP/1.1 200 OK\r\nApi-Version: 1.41\r\nContent-Length: 2\r\n\r\nOK";
        let (config, server) = serve(vec![response.to_string()]);

        let reply = Transport::open(&config.host).unwrap().get("/_ping").unwrap();
        assert_eq!(reply.status(), 200);
        assert!(reply.is_success());
        assert_eq!(reply.api_version(), Some("1.41"));
        let mut body = String::new();
        let _ = reply.into_body().read_to_string(&mut body).unwrap();
        assert_eq!(body, "OK");
        assert_eq!(server.join().unwrap(), vec!["GET /_ping HTTP/1.1"]);
    }

    #[test]
    fn tcp_error_status_is_returned_not_raised() {
        let (config, server) = serve(vec![json_response("404 Not Found", "{}")]);
        let reply = Transport::open(&config.host).unwrap().get("/nope").unwrap();
        assert_eq!(reply.status(), 404);
        assert_eq!(reply.reason(), "Not Found");
        assert!(!reply.is_success());
        let _ = server.join().unwrap();
    }

    #[test]
    fn unreachable_tcp_daemon_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let transport = Transport::open(&DaemonHost::Tcp(addr.to_string())).unwrap();
        let err = transport.get("/_ping").unwrap_err();
        assert!(matches!(err, DockmemError::Transport { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn unix_socket_carries_chunked_body() {
        use std::io::{BufRead, BufReader, Write};
        use std::os::unix::net::UnixListener;

        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("docker.sock");
        let listener = UnixListener::bind(&socket).unwrap();
        let server = std::thread::spawn(move || {
            let (sock, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(sock);
            let mut request_line = String::new();
            let _ = reader.read_line(&mut request_line).unwrap();
            loop {
                let mut header = String::new();
                let _ = reader.read_line(&mut header).unwrap();
                if header == "\r\n" || header.is_empty() {
                    break;
                }
            }
            reader
                .get_mut()
                .write_all(
                    b"HTTP/1.1 200 OK\r\nApi-Version: 1.40\r\nTransfer-Encoding: chunked\r\n\r\n\
                      3\r\none\r\n3\r\ntwo\r\n0\r\n\r\n",
                )
                .unwrap();
            request_line.trim_end().to_string()
        });

        let transport = Transport::open(&DaemonHost::Unix(socket)).unwrap();
        let reply = transport.get("/v1.40/containers/abc/stats?stream=true").unwrap();
        assert_eq!(reply.api_version(), Some("1.40"));
        let mut body = String::new();
        let _ = reply.into_body().read_to_string(&mut body).unwrap();
        assert_eq!(body, "onetwo");
        assert_eq!(
            server.join().unwrap(),
            "GET /v1.40/containers/abc/stats?stream=true HTTP/1.1"
        );
    }

    #[cfg(unix)]
    #[test]
    fn missing_unix_socket_reports_endpoint() {
        let host = DaemonHost::Unix("/nonexistent/dockmem-test.sock".into());
        let err = Transport::open(&host).unwrap().get("/_ping").unwrap_err();
        assert!(matches!(err, DockmemError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/dockmem-test.sock"));
    }
}
