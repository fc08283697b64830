// config.rs

use clap::Parser;
use std::path::PathBuf;

use crate::history::HISTORY_FILENAME;

/// Interactive infix calculator with persistent history.
#[derive(Parser, Debug, Clone)]
#[command(name = "infix-calc", version, about)]
pub struct Config {
    /// File the history is loaded from at startup and appended to on save
    #[arg(long, env = "INFIX_CALC_HISTORY", default_value = HISTORY_FILENAME)]
    pub history_file: PathBuf,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
