//! System-wide constants and defaults.

/// Number of samples the sliding window keeps before it starts evicting.
///
/// Eviction only happens once the window holds *more* than this many
/// samples, so a full window carries `WINDOW_CAPACITY + 1` entries.
pub const WINDOW_CAPACITY: usize = 20;

/// Chart height in rows.
pub const CHART_HEIGHT: u16 = 15;

/// Chart width in plotted columns.
pub const CHART_WIDTH: u16 = 75;

/// Lower bound of the chart's value axis.
pub const CHART_LOWER_BOUND: f64 = 0.0;

/// Caption prefix; the container name is appended verbatim.
pub const CAPTION_PREFIX: &str = "Memory usage for container: ";

/// Prefix the daemon puts in front of every container name.
pub const CONTAINER_NAME_PREFIX: &str = "/";

/// Daemon socket used when `DOCKER_HOST` is unset.
pub const DEFAULT_DAEMON_SOCKET: &str = "/var/run/docker.sock";

/// Environment variable naming the daemon endpoint.
pub const ENV_DAEMON_HOST: &str = "DOCKER_HOST";

/// Environment variable pinning the daemon API version.
pub const ENV_API_VERSION: &str = "DOCKER_API_VERSION";

/// Highest API version this client speaks.
pub const MAX_API_VERSION: &str = "1.43";

/// API version used when negotiation with the daemon fails.
pub const FALLBACK_API_VERSION: &str = "1.24";

/// Application name sent in the `User-Agent` header.
pub const APP_NAME: &str = "dockmem";
