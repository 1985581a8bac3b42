mod args;
mod context;
mod handlers;
mod output;

pub use args::{Cli, Commands, OutputFormat};

use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    let config = context::load_config(&cli)?;
    let format = cli.format;

    match cli.command {
        Commands::Ingest => handlers::ingest::handle(&config, format),
        Commands::Transform { gap_minutes } => {
            handlers::transform::handle(&config, gap_minutes, format)
        }
        Commands::Aggregate => handlers::aggregate::handle(&config, format),
        Commands::Run { gap_minutes } => handlers::run::handle(&config, gap_minutes, format),
        Commands::Sample { input, rows } => handlers::sample::handle(&config, &input, rows),
    }
}
