//! Folio - a static portfolio generator driven by one `data.json`.

mod build;
mod cli;
mod config;
mod data;
mod effects;
mod icons;
mod init;
mod logger;
mod page;
mod preview;
mod render;
mod serve;
mod utils;
mod watch;

use anyhow::Result;
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::{SiteConfig, cfg, init_config};
use init::new_site;
use preview::preview_site;
use serve::serve_site;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    init_config(SiteConfig::load(cli)?);
    let config = cfg();

    match &cli.command {
        Commands::Init { name } => new_site(&config, name.is_some()),
        Commands::Build { .. } => build_site(&config),
        Commands::Serve { .. } => {
            // A failed build leaves the error page to serve; keep going.
            if let Err(err) = build_site(&config) {
                log!("serve"; "{err}, serving the error page");
            }
            serve_site()
        }
        Commands::Preview => preview_site(&config),
    }
}
