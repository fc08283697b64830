// commands.rs

use std::io::Write;

use log::{debug, warn};

use crate::error::CalcError;
use crate::evaluator::evaluate;
use crate::history::History;
use crate::tokenizer::validate;
use crate::util::{collapse_whitespace, strip_whitespace, writeln_ignore_broken_pipe};

/// Keywords offered by tab completion.
pub const COMMAND_WORDS: [&str; 6] = [
    "exit",
    "h save",
    "h clear session",
    "h clear all",
    "h up",
    "h down",
];

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    Exit,
    Save,
    ClearSession,
    ClearAll,
    Up,
    Down,
    Recent(i64),
    /// Starts with `h` but is not a known history command.
    Invalid,
    Expression(String),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Flow {
    Continue,
    Exit,
}

/// Recognizes one line of input. Returns `None` for a blank line.
pub fn parse_command(line: &str) -> Option<Command> {
    let input = collapse_whitespace(line);
    if input.is_empty() {
        return None;
    }
    let cmd = match input.as_str() {
        "exit" => Command::Exit,
        "h save" => Command::Save,
        "h clear session" => Command::ClearSession,
        "h clear all" => Command::ClearAll,
        "h up" => Command::Up,
        "h down" => Command::Down,
        other if other.starts_with('h') => other
            .strip_prefix("h ")
            .and_then(|n| n.parse::<i64>().ok())
            .map_or(Command::Invalid, Command::Recent),
        _ => Command::Expression(input),
    };
    Some(cmd)
}

/// Validates and evaluates `input`, recording `"<input> = <result>"` on success.
pub fn evaluate_input(input: &str, history: &mut History) -> Result<String, CalcError> {
    let expr = strip_whitespace(input);
    if !validate(&expr) {
        return Err(CalcError::Validation);
    }
    let result = evaluate(&expr)?;
    history.add(format!("{} = {}", input, result));
    Ok(result)
}

/// Runs a command against the history store and returns the lines to show.
pub fn execute(cmd: &Command, history: &mut History) -> Result<Vec<String>, CalcError> {
    let lines = match cmd {
        Command::Exit => Vec::new(),
        Command::Save => {
            history.save()?;
            vec!["Session persisted.".to_string()]
        }
        Command::ClearSession => {
            history.clear_session();
            vec!["Session history cleared.".to_string()]
        }
        Command::ClearAll => {
            history.clear_all()?;
            vec!["All history cleared.".to_string()]
        }
        Command::Up => {
            history.shift_pointer(1);
            vec![history.current().to_string()]
        }
        Command::Down => {
            history.shift_pointer(-1);
            vec![history.current().to_string()]
        }
        Command::Recent(n) => history.recent(*n).to_vec(),
        Command::Invalid => vec!["Invalid command.".to_string()],
        Command::Expression(input) => vec![evaluate_input(input, history)?],
    };
    Ok(lines)
}

/// Handles one raw input line, writing everything the user should see to `out`.
pub fn dispatch<W: Write>(line: &str, history: &mut History, out: &mut W) -> std::io::Result<Flow> {
    let Some(cmd) = parse_command(line) else {
        return Ok(Flow::Continue);
    };
    debug!("command: {:?}", cmd);
    match execute(&cmd, history) {
        Ok(lines) => {
            for l in lines {
                writeln_ignore_broken_pipe(&mut *out, l)?;
            }
        }
        Err(e @ CalcError::Validation) => {
            writeln_ignore_broken_pipe(&mut *out, e.to_string())?;
        }
        Err(e) => {
            if let CalcError::Storage(_) = e {
                warn!("{}", e);
            }
            writeln_ignore_broken_pipe(&mut *out, format!("Error: {}", e))?;
        }
    }
    out.flush()?;
    Ok(match cmd {
        Command::Exit => Flow::Exit,
        _ => Flow::Continue,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run(lines: &[&str], history: &mut History) -> String {
        let mut out = Vec::new();
        for line in lines {
            dispatch(line, history, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_history_commands() {
        assert_eq!(parse_command("  h   up "), Some(Command::Up));
        assert_eq!(parse_command("h clear  session"), Some(Command::ClearSession));
        assert_eq!(parse_command("h 5"), Some(Command::Recent(5)));
        assert_eq!(parse_command("h -2"), Some(Command::Recent(-2)));
        assert_eq!(parse_command("h five"), Some(Command::Invalid));
        assert_eq!(parse_command("help"), Some(Command::Invalid));
        assert_eq!(parse_command("exit"), Some(Command::Exit));
        assert_eq!(parse_command("   "), None);
    }

    #[test]
    fn expressions_keep_collapsed_spacing() {
        assert_eq!(
            parse_command(" 2  +  3 "),
            Some(Command::Expression("2 + 3".into()))
        );
    }

    #[test]
    fn expression_result_is_printed_and_recorded() {
        let mut h = History::new("unused.txt");
        let out = run(&["2 + 3*4"], &mut h);
        assert_eq!(out, "14.000000\n");
        assert_eq!(h.session(), ["2 + 3*4 = 14.000000"]);
    }

    #[test]
    fn failures_are_reported_and_not_recorded() {
        let mut h = History::new("unused.txt");
        let out = run(&["1/0", "2+x", "(1+2"], &mut h);
        assert_eq!(
            out,
            "Error: Division by zero\n\
             Invalid characters found in expression input\n\
             Error: Invalid parenthesis\n"
        );
        assert!(h.is_empty());
    }

    #[test]
    fn up_and_down_recall_entries() {
        let mut h = History::new("unused.txt");
        let out = run(&["1+1", "2+2", "h up", "h up", "h up", "h down", "h down"], &mut h);
        assert_eq!(
            out,
            "2.000000\n4.000000\n\
             2+2 = 4.000000\n1+1 = 2.000000\n1+1 = 2.000000\n\
             2+2 = 4.000000\n\n"
        );
    }

    #[test]
    fn recent_lists_oldest_first() {
        let mut h = History::new("unused.txt");
        run(&["1", "2", "3"], &mut h);
        let out = run(&["h 2"], &mut h);
        assert_eq!(out, "2 = 2.000000\n3 = 3.000000\n");
        assert_eq!(run(&["h 0"], &mut h), "");
    }

    #[test]
    fn unknown_history_command() {
        let mut h = History::new("unused.txt");
        assert_eq!(run(&["h sideways"], &mut h), "Invalid command.\n");
    }

    #[test]
    fn exit_stops_the_loop() {
        let mut h = History::new("unused.txt");
        let mut out = Vec::new();
        assert_eq!(dispatch("exit", &mut h, &mut out).unwrap(), Flow::Exit);
        assert_eq!(dispatch("", &mut h, &mut out).unwrap(), Flow::Continue);
        assert!(out.is_empty());
    }

    #[test]
    fn save_and_clear_commands() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.txt");
        let mut h = History::new(&path);
        let out = run(&["5*5", "h save", "6", "h clear session"], &mut h);
        assert!(out.ends_with("Session persisted.\n6.000000\nSession history cleared.\n"));
        assert_eq!(h.all(), ["5*5 = 25.000000"]);
        assert_eq!(run(&["h clear all"], &mut h), "All history cleared.\n");
        assert!(h.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn storage_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut h = History::new(dir.path());
        let out = run(&["1", "h save"], &mut h);
        assert!(out.starts_with("1.000000\nError: cannot write history file"));
        assert_eq!(h.session(), ["1 = 1.000000"]);
    }
}
