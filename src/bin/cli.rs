// src/bin/cli.rs
use std::process::ExitCode;

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    uver_sync::cli::run()
}
