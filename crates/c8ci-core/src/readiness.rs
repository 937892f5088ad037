// ── Cluster readiness poll ──
//
// Fixed-interval poll of `GET /clusters/{id}` until the cluster reports
// `Healthy`, reports `Unhealthy`, or the deadline passes. No backoff.

use std::fmt;

use tokio::time::{Instant, sleep};
use tracing::info;

use c8ci_api::ConsoleClient;
use c8ci_api::console_types::ClusterResponse;

use crate::config::PollConfig;
use crate::error::CoreError;

/// Value of `status.ready` in a cluster snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Healthy,
    Unhealthy,
    /// Any other value (`Creating`, `Updating`, ...): keep polling.
    Pending(String),
}

impl Readiness {
    /// Exact, case-sensitive match on the two terminal values.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Healthy" => Self::Healthy,
            "Unhealthy" => Self::Unhealthy,
            other => Self::Pending(other.to_owned()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending(_))
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => f.write_str("Healthy"),
            Self::Unhealthy => f.write_str("Unhealthy"),
            Self::Pending(state) => f.write_str(state),
        }
    }
}

/// Extract readiness from a snapshot.
///
/// A missing `status` object or `status.ready` field is a malformed
/// response, not a transient condition.
pub fn readiness_of(snapshot: &ClusterResponse) -> Result<Readiness, CoreError> {
    let status = snapshot
        .status
        .as_ref()
        .ok_or_else(|| CoreError::MalformedResponse {
            message: "no status field in cluster response".into(),
        })?;

    match status.ready.as_deref() {
        Some(ready) if !ready.is_empty() => Ok(Readiness::parse(ready)),
        _ => Err(CoreError::MalformedResponse {
            message: "no ready field in cluster status".into(),
        }),
    }
}

/// Poll until the cluster is `Healthy` and return the final snapshot.
///
/// `Unhealthy` fails immediately. Any other state keeps polling every
/// `poll.interval` until more than `poll.timeout` has elapsed since the
/// first request, then fails with the last observed state.
pub async fn wait_until_healthy(
    console: &ConsoleClient,
    cluster_id: &str,
    poll: &PollConfig,
) -> Result<ClusterResponse, CoreError> {
    let started = Instant::now();

    loop {
        let snapshot = console.get_cluster(cluster_id).await?;
        let readiness = readiness_of(&snapshot)?;
        info!(cluster_id, state = %readiness, "cluster state");

        match readiness {
            Readiness::Healthy => {
                info!(cluster_id, "cluster is Healthy");
                return Ok(snapshot);
            }
            Readiness::Unhealthy => {
                return Err(CoreError::ClusterUnhealthy {
                    cluster_id: cluster_id.to_owned(),
                });
            }
            Readiness::Pending(state) => {
                let elapsed = started.elapsed();
                if elapsed > poll.timeout {
                    return Err(CoreError::Timeout {
                        cluster_id: cluster_id.to_owned(),
                        last_state: state,
                        waited_secs: elapsed.as_secs(),
                    });
                }
                sleep(poll.interval).await;
            }
        }
    }
}
