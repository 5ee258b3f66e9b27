mod app;
mod cli;
mod config;
mod error;
mod logging;
mod output;

use clap::Parser;

use cli::Cli;
use config::Config;
use logging::init_logging;

fn main() {
    let loaded_config = Config::load();
    let cli = Cli::parse().with_config(&loaded_config.config);

    init_logging(cli.debug);
    loaded_config.report();

    if let Err(e) = app::run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
