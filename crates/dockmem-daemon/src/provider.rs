//! [`StatsProvider`] backed by a live daemon.

use dockmem_common::error::Result;
use dockmem_common::provider::StatsProvider;

use crate::client::{DockerClient, StatsStream};
use crate::lookup;

/// Streams stats for one named container from the daemon.
#[derive(Debug)]
pub struct DockerStatsProvider {
    client: DockerClient,
    container_name: String,
}

impl DockerStatsProvider {
    /// Creates a provider for `container_name`, given without the daemon's
    /// `/` prefix.
    #[must_use]
    pub fn new(client: DockerClient, container_name: impl Into<String>) -> Self {
        Self {
            client,
            container_name: container_name.into(),
        }
    }

    /// Name the provider looks up.
    #[must_use]
    pub fn container_name(&self) -> &str {
        &self.container_name
    }
}

impl StatsProvider for DockerStatsProvider {
    type Stream = StatsStream;

    fn open_stats(&mut self) -> Result<Self::Stream> {
        let id = lookup::resolve_container_id(&self.client, &self.container_name)?;
        self.client.stats(&id)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use dockmem_common::error::DockmemError;

    use super::*;
    use crate::client::tests::{chunked_response, json_response, serve};

    #[test]
    fn opens_stream_for_resolved_container() {
        let listing = json_response("200 OK", r#"[{"Id": "beef", "Names": ["/api"]}]"#);
        let stream = chunked_response(&["{\"memory_stats\":{\"usage\":5,\"limit\":10}}"]);
        let (mut config, server) = serve(vec![listing, stream]);
        config.api_version = Some("1.43".into());

        let mut provider = DockerStatsProvider::new(DockerClient::new(config).unwrap(), "api");
        let mut text = String::new();
        let _ = provider.open_stats().unwrap().read_to_string(&mut text).unwrap();

        assert!(text.contains("\"usage\":5"));
        let requests = server.join().unwrap();
        assert_eq!(requests[1], "GET /v1.43/containers/beef/stats?stream=true HTTP/1.1");
    }

    #[test]
    fn unknown_container_fails_at_the_daemon() {
        let listing = json_response("200 OK", "[]");
        let rejected = json_response("404 Not Found", r#"{"message": "page not found"}"#);
        let (mut config, server) = serve(vec![listing, rejected]);
        config.api_version = Some("1.43".into());

        let mut provider = DockerStatsProvider::new(DockerClient::new(config).unwrap(), "ghost");
        let err = provider.open_stats().unwrap_err();

        assert!(matches!(err, DockmemError::NotFound { .. }));
        let requests = server.join().unwrap();
        assert_eq!(requests[1], "GET /v1.43/containers//stats?stream=true HTTP/1.1");
    }
}
