// util.rs

use itertools::Itertools;
use std::io::Write;

pub fn writeln_ignore_broken_pipe<W: Write, S: AsRef<str>>(mut w: W, s: S) -> std::io::Result<()> {
    match writeln!(w, "{}", s.as_ref()) {
        Err(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// Collapses whitespace runs to a single space and trims both ends.
pub fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().join(" ")
}

pub fn strip_whitespace(line: &str) -> String {
    line.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_inner_runs() {
        assert_eq!(collapse_whitespace("  h   clear \t session "), "h clear session");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn strips_all_whitespace() {
        assert_eq!(strip_whitespace(" 2 + 3 *\t4 "), "2+3*4");
    }

    #[test]
    fn writes_line() {
        let mut out = Vec::new();
        writeln_ignore_broken_pipe(&mut out, "14.000000").unwrap();
        assert_eq!(out, b"14.000000\n");
    }
}
