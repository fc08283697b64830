// repl.rs

use anyhow::{Context, Result};
use log::{debug, info};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config as EditorConfig, Editor};
use std::io::{self, Write};

use crate::commands::{dispatch, Flow};
use crate::completion::CommandCompleter;
use crate::config::Config;
use crate::history::History;
use crate::util::writeln_ignore_broken_pipe;

pub const PROMPT: &str = "Enter an expression or command: ";

pub fn start_repl(config: &Config) -> Result<()> {
    let mut history = History::new(&config.history_file);
    history
        .load()
        .with_context(|| format!("loading history from {}", config.history_file.display()))?;

    let editor_config = EditorConfig::builder()
        .completion_type(CompletionType::List)
        .auto_add_history(false)
        .build();
    let mut rl: Editor<CommandCompleter, DefaultHistory> =
        Editor::with_config(editor_config).context("failed to create line editor")?;
    rl.set_helper(Some(CommandCompleter::new()));
    info!("calculator ready, {} history entries", history.len());

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                let mut stdout = io::stdout().lock();
                if dispatch(&line, &mut history, &mut stdout)? == Flow::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                debug!("input closed");
                break;
            }
            Err(err) => return Err(err).context("failed to read input"),
        }
    }

    let mut stdout = io::stdout().lock();
    writeln_ignore_broken_pipe(&mut stdout, "Saving history...")?;
    history
        .save()
        .with_context(|| format!("saving history to {}", history.path().display()))?;
    writeln_ignore_broken_pipe(&mut stdout, "Quit the calculator.")?;
    stdout.flush()?;
    Ok(())
}
