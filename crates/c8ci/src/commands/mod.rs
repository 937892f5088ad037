//! Command dispatch: bridges CLI args -> core workflow -> output formatting.

pub mod cluster;
pub mod placeholders;

use std::io;

use clap::CommandFactory;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Cluster(args) => cluster::handle(args, global).await,
        Command::Placeholders(args) => placeholders::handle(args, global),
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "c8ci", &mut io::stdout());
            Ok(())
        }
    }
}
