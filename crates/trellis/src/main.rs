mod cli;
mod commands;
mod context;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = context::Context::new(cli.config, cli.dirs, cli.verbose).and_then(|ctx| {
        match cli.command {
            Commands::Render { name, data, output } => {
                commands::render::run(&ctx, &name, data, output)
            }
            Commands::Find { name, json } => commands::find::run(&ctx, &name, json),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Engine logs go to stderr; `RUST_LOG` overrides the level
fn init_tracing(verbose: bool) {
    let default = if verbose { "trellis_core=debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();
}
