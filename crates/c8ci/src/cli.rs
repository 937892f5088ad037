//! Clap derive structures for the `c8ci` CLI.
//!
//! Also compiled by `build.rs` for man page generation, so this module may
//! only depend on clap and clap_complete.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// c8ci -- Camunda SaaS cluster provisioning for CI pipelines
#[derive(Debug, Parser)]
#[command(
    name = "c8ci",
    version,
    about = "Provision Camunda SaaS clusters for CI and fill deployment templates",
    long_about = "Creates a short-lived Camunda SaaS cluster through the console API,\n\
        waits for it to become healthy, issues a cluster client, and exports\n\
        the connection details to stdout, GitHub Actions outputs, and an\n\
        optional credentials file. Also deletes clusters and substitutes\n\
        placeholders in MTA deployment descriptors.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// TOML file with non-secret settings (base_hostname, cluster_name, ...)
    #[arg(long, env = "C8CI_CONFIG", global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Console domain (overrides BASE_HOSTNAME and the config file)
    #[arg(long, global = true, value_name = "HOST")]
    pub base_hostname: Option<String>,

    /// Summary output format
    #[arg(long, short = 'o', default_value = "json", global = true)]
    pub output: OutputFormat,

    /// HTTP request timeout in seconds (overrides the config file)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Provision a cluster and client, or delete a cluster with -d
    Cluster(ClusterArgs),

    /// Replace placeholders in a deployment descriptor in place
    #[command(alias = "template")]
    Placeholders(PlaceholdersArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Console client credentials, usually supplied through the environment.
#[derive(Debug, Args)]
pub struct ConsoleAuthArgs {
    /// Console API client id
    #[arg(long, env = "CONSOLE_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Console API client secret
    #[arg(long, env = "CONSOLE_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,
}

#[derive(Debug, Args)]
pub struct ClusterArgs {
    /// Also write the client credentials as JSON to this file
    #[arg(id = "output_file", value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Delete the given cluster instead of provisioning one
    #[arg(
        long,
        short = 'd',
        value_name = "CLUSTER_ID",
        value_parser = clap::builder::NonEmptyStringValueParser::new(),
        conflicts_with_all = ["output_file", "cluster_name"]
    )]
    pub delete: Option<String>,

    #[command(flatten)]
    pub auth: ConsoleAuthArgs,

    /// Generation to provision, compared against names like "Camunda 8.5+gen3"
    #[arg(long, env = "CAMUNDA_DESIRED_GENERATION", value_name = "VERSION")]
    pub desired_generation: Option<String>,

    /// Cluster name (overrides CLUSTER_NAME and the config file)
    #[arg(long, value_name = "NAME")]
    pub cluster_name: Option<String>,

    /// GitHub Actions step output file
    #[arg(long, env = "GITHUB_OUTPUT", value_name = "FILE", hide = true)]
    pub github_output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PlaceholdersArgs {
    /// Descriptor to rewrite in place
    pub input: PathBuf,

    /// Connector version; also renames the connector module
    pub app_version: String,

    /// gRPC address, e.g. grpcs://<cluster>.zeebe.<host>:443
    pub grpc_address: String,

    pub rest_address: String,

    /// Cluster client id
    pub client_id: String,

    /// Cluster client secret
    pub client_secret: String,

    /// Copy the input to <INPUT>.bak before rewriting it
    #[arg(long)]
    pub backup: bool,

    /// Module whose `name:` line gets the version suffix
    #[arg(long, value_name = "NAME")]
    pub connector_name: Option<String>,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
