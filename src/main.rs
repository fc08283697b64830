use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use infix_calc::config::Config;
use infix_calc::repl::start_repl;

fn main() -> Result<()> {
    let config = Config::parse();
    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if config.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();
    log::debug!("configuration: {:?}", config);
    start_repl(&config)
}
