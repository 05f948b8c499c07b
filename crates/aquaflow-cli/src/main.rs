#![warn(clippy::all, rust_2018_idioms)]

use anyhow::Context as _;
use aquaflow_cli::{background_worker, cli::Cli, commands, configuration::get_configuration};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    if let Err(e) = aquaflow_cli::tracing::init(&args) {
        eprintln!("Failed to start tracing: {e}");
    }

    let configuration = get_configuration().context("failed to load configuration")?;
    let rt = background_worker::create_runtime()?;
    let _enter = rt.enter(); // This Guard must be held to call `tokio::spawn` anywhere in the program
    let client = configuration.build_client();
    let output = rt.block_on(commands::run(args.command, &client))?;
    println!("{output}");
    Ok(())
}
