// c8ci-core: Provisioning workflow between c8ci-api and the CLI.

pub mod address;
pub mod config;
pub mod error;
pub mod export;
pub mod readiness;
pub mod selection;
pub mod template;
pub mod workflow;

// ── Primary re-exports ──────────────────────────────────────────────
pub use address::{ResolvedAddresses, derive_addresses};
pub use config::{ConsoleConfig, ConsoleCredentials, ConsoleEndpoints, PollConfig, ProvisionConfig};
pub use error::CoreError;
pub use export::{CredentialsFile, GithubOutput, ProvisionReport};
pub use readiness::Readiness;
pub use selection::{Selection, normalize_generation_name};
pub use template::{PlaceholderValues, TemplateOutcome};
pub use workflow::{ClusterInfo, ProvisionOutcome, Provisioner};

pub use c8ci_api::console_types::{CatalogEntry, ClientCredentials};
