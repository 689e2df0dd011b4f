use std::fs::File;
use std::process::ExitCode;
use std::sync::Arc;

mod bindings;
mod controller;
mod dispatch;
mod domain;
mod inputter;
mod model;
mod page;
mod record;
mod ui;

use clap::Parser;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, prelude::*};

use controller::Controller;
use domain::{RosterConfig, RosterError};
use model::{Model, Status};
use ui::RosterUI;

#[derive(Parser, Debug)]
#[command(
    name = "roster",
    version,
    about = "A tui demonstration of page events and a form driven roster table."
)]
struct Args {
    /// Event poll time in milliseconds
    #[arg(long, default_value_t = 100)]
    poll_time: u64,

    /// Console scrollback lines
    #[arg(long, default_value_t = 100)]
    console_lines: usize,

    /// Log file, ~ is expanded
    #[arg(long, default_value = "roster.log")]
    log_file: String,

    /// Log filter, e.g. "debug" or "roster=trace"
    #[arg(long, default_value = "info")]
    log_filter: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Err(e) => {
            ratatui::restore();
            eprintln!("Error: {:?}", e);
            ExitCode::FAILURE
        }
        Ok(_) => {
            ratatui::restore();
            ExitCode::SUCCESS
        }
    }
}

// The terminal is owned by the UI, logs go to a file.
fn init_logging(path: &str, filter: &str) -> Result<(), RosterError> {
    let path = shellexpand::full(path)
        .map_err(|e| RosterError::InvalidConfig(format!("Bad log file path: {e}")))?;
    let logfile = File::create(path.as_ref())?;
    let filter = EnvFilter::try_new(filter)
        .map_err(|e| RosterError::InvalidConfig(format!("Bad log filter: {e}")))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(logfile))
                .with_ansi(false),
        )
        .with(ErrorLayer::default())
        .init();
    Ok(())
}

fn run(args: Args) -> Result<(), RosterError> {
    init_logging(&args.log_file, &args.log_filter)?;
    info!("Starting roster!");

    let cfg = RosterConfig::default()
        .event_poll_time(args.poll_time)
        .console_limit(args.console_lines);

    let mut model = Model::init(&cfg)?;
    let controller = Controller::new(&cfg);
    let ui = RosterUI::new();

    let mut terminal = ratatui::init();

    while model.status != Status::QUITTING {
        // Render the current view
        terminal.draw(|f| ui.draw(&model, f))?;

        // Handle events and map to a Message
        if let Some(message) = controller.handle_event(&model)? {
            model.update(message)?;
        }
    }

    Ok(())
}
