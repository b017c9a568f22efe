//! UserSig CLI - Issue and verify UserSig tokens

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use usersig_cli::{run, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_directive = if cli.verbose {
        "usersig=debug"
    } else {
        "usersig=info"
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(EnvFilter::from_default_env().add_directive(default_directive.parse()?))
        .init();

    let config = cli.load_config();
    let result = run(cli.command, &config, &mut io::stdout());

    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }

    result
}
