//! `c8ci placeholders`: fill a deployment descriptor in place.

use secrecy::SecretString;
use tracing::info;

use c8ci_core::template::{self, PlaceholderValues};

use crate::cli::{GlobalOpts, PlaceholdersArgs};
use crate::config;
use crate::error::CliError;

pub fn handle(args: PlaceholdersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let settings = config::load(global)?;
    let endpoints = settings.endpoints()?;

    let values = PlaceholderValues {
        app_version: args.app_version,
        grpc_address: args.grpc_address,
        rest_address: args.rest_address,
        client_id: args.client_id,
        client_secret: SecretString::from(args.client_secret),
        token_url: endpoints.token_url.to_string(),
        zeebe_audience: settings.zeebe_audience(),
        connector_name: args
            .connector_name
            .unwrap_or_else(|| settings.connector_name.clone()),
    };

    let outcome = template::apply_in_place(&args.input, &values, args.backup)?;
    if !outcome.changed {
        info!(path = %outcome.path.display(), "no placeholders found, file unchanged");
    }
    Ok(())
}
