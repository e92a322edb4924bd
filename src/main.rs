use std::{fs::OpenOptions, path::Path, process::ExitCode, sync::Mutex};

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shellgame::{io::sys, ConfigArgs, Runner, ShellView};

#[derive(Parser)]
#[command(name = "shellgame", version, about = "Follow the ball. Pick the cup.")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
}

/// Send logs to `log_file`, filtered by `RUST_LOG` (default `info`). Without a file, logs are dropped rather than
/// written over the game.
fn init_tracing(log_file: Option<&Path>) -> shellgame::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let Some(path) = log_file else {
        tracing_subscriber::registry().with(env_filter).init();
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("couldn't open log file {}: {}", path.display(), e))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(env_filter)
        .init();
    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}

fn run(cli: Cli) -> shellgame::Result<()> {
    let config = cli.config.resolve()?;
    init_tracing(config.log_file.as_deref())?;
    tracing::debug!(?config, "resolved config");

    let (mut iosys, mut iorun) = sys::load()?;
    let view = ShellView::new(config.cups, config.difficulty);
    Runner::new(config.controller(), view).run(iosys.as_mut(), iorun.as_mut())?;
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("shellgame: {}", e);
            ExitCode::FAILURE
        }
    }
}
