//! `c8ci cluster`: provision a cluster end to end, or delete one.

use std::io;

use tracing::info;

use c8ci_core::workflow::{self, Provisioner};
use c8ci_core::{CredentialsFile, GithubOutput, ProvisionReport};

use crate::cli::{ClusterArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub async fn handle(args: ClusterArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut settings = config::load(global)?;
    if let Some(name) = args.cluster_name {
        settings.cluster_name = name;
    }
    let console_config = config::console_config(&settings, &args.auth)?;

    if let Some(cluster_id) = args.delete {
        workflow::validate_cluster_id(&cluster_id)?;
        let console = workflow::connect(&console_config).await?;
        workflow::delete_cluster(&console, &cluster_id).await?;
        return Ok(());
    }

    // Fail on a missing generation before any network traffic.
    let provision = settings.provision_config(args.desired_generation.as_deref())?;

    let console = workflow::connect(&console_config).await?;
    let outcome = Provisioner::new(&console, &provision).run().await?;

    if let Some(ref path) = args.output {
        CredentialsFile::from_outcome(&outcome).write_to(path)?;
    }

    match GithubOutput::from_path(args.github_output) {
        Some(sink) => sink.export(&outcome, &mut io::stdout().lock())?,
        None => info!("GITHUB_OUTPUT not set, skipping step outputs"),
    }

    let report = ProvisionReport::new(&outcome, &provision, &console_config.endpoints.token_url);
    output::print_output(&output::render(global.output, &report)?)
}
