//! Container lookup by name.

use dockmem_common::constants::CONTAINER_NAME_PREFIX;
use dockmem_common::error::Result;
use dockmem_common::types::{ContainerId, ContainerSummary};

use crate::client::DockerClient;

/// Returns the daemon-side form of a user-supplied container name.
#[must_use]
pub fn daemon_name(name: &str) -> String {
    format!("{CONTAINER_NAME_PREFIX}{name}")
}

/// Picks the first container carrying `name` (without the daemon prefix).
///
/// An unknown name yields an empty [`ContainerId`] rather than an error;
/// the daemon rejects the stats request that follows.
#[must_use]
pub fn find_container(containers: &[ContainerSummary], name: &str) -> ContainerId {
    let wanted = daemon_name(name);
    containers
        .iter()
        .find(|c| c.has_name(&wanted))
        .map_or_else(
            || {
                tracing::warn!(name, "no running container matches name");
                ContainerId::default()
            },
            |c| c.id.clone(),
        )
}

/// Resolves `name` against the daemon's list of running containers.
///
/// # Errors
///
/// Returns an error if the container listing cannot be fetched.
pub fn resolve_container_id(client: &DockerClient, name: &str) -> Result<ContainerId> {
    let containers = client.list_containers()?;
    tracing::debug!(count = containers.len(), name, "searching containers");
    let id = find_container(&containers, name);
    if !id.is_empty() {
        tracing::info!(name, id = %id, "container resolved");
    }
    Ok(id)
}
