mod app;
mod cli;
mod config;
mod effects;
mod logging;
mod render;

use clap::Parser;

pub fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = config::load_config(&cli.config)?;
    logging::initialize(config.log, cli.verbose);

    match cli.command {
        cli::Command::Browse(args) => app::run_browse(&config, &args),
        cli::Command::Sitemap { out } => app::run_sitemap(&config, &out),
    }
}
