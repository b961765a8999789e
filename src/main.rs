// src/main.rs
use bland::cli::args::Cli;
use bland::config::{load_settings, Settings};
use bland::exitcode;
use clap::Parser;
use crossterm::style::Stylize;
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    filter::{filter_fn, LevelFilter},
    fmt::{self, format::FmtSpan},
    prelude::*,
};

#[instrument]
fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug, cli.no_color);

    let settings = load_settings(cli.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("{}", format!("Failed to load settings: {}. Using defaults.", e).yellow());
        Settings::default()
    });
    debug!("Settings: {:?}", settings);

    if let Err(e) = bland::cli::execute_command(cli, &settings) {
        if e.is_internal() {
            debug!("Command failed: {}", e);
        }
        eprintln!("{}", format!("Error: {}", e.user_message()).red());
        std::process::exit(exitcode::USAGE);
    }
    std::process::exit(exitcode::SUCCESS);
}

fn setup_logging(verbosity: u8, no_color: bool) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // r2d2 and migration internals are chatty at trace
    let noisy_modules = ["r2d2", "diesel_migrations"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(!no_color)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => info!("Debug mode: info"),
        LevelFilter::DEBUG => debug!("Debug mode: debug"),
        LevelFilter::TRACE => debug!("Debug mode: trace"),
        _ => {}
    }
}
