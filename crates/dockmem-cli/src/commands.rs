//! Command-line definition and dispatch.

use anyhow::Context;
use clap::Parser;
use dockmem_common::config::DaemonConfig;
use dockmem_common::constants::{ENV_API_VERSION, ENV_DAEMON_HOST};
use dockmem_daemon::client::DockerClient;
use dockmem_daemon::provider::DockerStatsProvider;
use dockmem_tui::display::TerminalDisplay;
use dockmem_tui::sampler::Sampler;

/// Live memory chart for a running container.
#[derive(Parser, Debug)]
#[command(name = "dockmem", version, about, long_about = None)]
pub struct Cli {
    /// Name of the container to watch, without the leading `/`.
    #[arg(value_name = "CONTAINER")]
    pub container: String,

    /// Daemon endpoint (`unix:///path` or `tcp://host:port`).
    #[arg(long, env = ENV_DAEMON_HOST)]
    pub host: Option<String>,

    /// Pin the daemon API version instead of negotiating it.
    #[arg(long, env = ENV_API_VERSION)]
    pub api_version: Option<String>,
}

impl Cli {
    /// Daemon settings implied by the flags and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the host URL is not supported.
    pub fn daemon_config(&self) -> anyhow::Result<DaemonConfig> {
        DaemonConfig::new(self.host.as_deref(), self.api_version.as_deref())
            .context("invalid daemon settings")
    }
}

/// Connects to the daemon and charts the container until its stats stream
/// ends.
///
/// # Errors
///
/// Returns an error if the daemon is unreachable, the stream cannot be
/// opened, a stats record is malformed, or the terminal cannot be written.
pub fn execute(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.daemon_config()?;
    tracing::debug!(host = %config.host, "using daemon");

    let client = DockerClient::connect(config).context("setting up daemon client")?;
    tracing::debug!(version = client.api_version(), "daemon api version");

    let provider = DockerStatsProvider::new(client, &cli.container);
    let mut sampler = Sampler::new(provider, TerminalDisplay::stdout(), &cli.container);
    let frames = sampler
        .run()
        .with_context(|| format!("charting memory of container {}", cli.container))?;

    tracing::info!(container = %cli.container, frames, "done");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use dockmem_common::config::DaemonHost;

    use super::*;

    #[test]
    fn container_name_is_required() {
        assert!(Cli::try_parse_from(["dockmem"]).is_err());
    }

    #[test]
    fn flags_override_environment() {
        let cli = Cli::try_parse_from([
            "dockmem",
            "web",
            "--host",
            "tcp://127.0.0.1:2375",
            "--api-version",
            "1.41",
        ])
        .unwrap();
        assert_eq!(cli.container, "web");

        let config = cli.daemon_config().unwrap();
        assert_eq!(config.host, DaemonHost::Tcp("127.0.0.1:2375".into()));
        assert_eq!(config.api_version.as_deref(), Some("1.41"));
    }

    #[test]
    fn unsupported_host_is_rejected() {
        let cli = Cli::try_parse_from(["dockmem", "web", "--host", "ssh://box"]).unwrap();
        let err = cli.daemon_config().unwrap_err();
        assert!(format!("{err:#}").contains("unsupported daemon host"));
    }

    #[test]
    fn daemon_flags_fall_back_to_environment() {
        use clap::CommandFactory;
        let command = Cli::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|a| a.get_id() == id)
                .and_then(clap::Arg::get_env)
                .map(|v| v.to_string_lossy().into_owned())
        };
        assert_eq!(env_of("host").as_deref(), Some("DOCKER_HOST"));
        assert_eq!(env_of("api_version").as_deref(), Some("DOCKER_API_VERSION"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
