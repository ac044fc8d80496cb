#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc, sync::Once};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod sema;

extern crate regex;

/// Source location of a token, 1-based row and column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub row: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(row: u32, column: u32, file: Rc<String>) -> Self {
        Position { row, column, file }
    }

    pub fn null() -> Self {
        Position::new(0, 0, Rc::new(String::from("<null>")))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.row, self.column)
    }
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Only installs a subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=xsema=debug`. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Returns the text of the 1-based `row` of `source`, without its line break.
pub fn get_line_at_row(source: &str, row: u32) -> Option<&str> {
    if row == 0 {
        return None;
    }
    source
        .split('\n')
        .nth(row as usize - 1)
        .map(|line| line.trim_end_matches('\r'))
}

/// Renders a diagnostic against the source it was produced from.
pub fn format_error(error: &Error, source: &str) -> String {
    /*
        Error: message (detail)
        -> main.xx:20
           |
        20 | x: = #;
           | -----^
    */

    let position = error.get_position();
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    out.push_str(&format!("-> {}:{}\n", position.file, position.row));

    let Some(line_text) = get_line_at_row(source, position.row) else {
        out.push_str(&format!("   {}\n", error));
        return out;
    };

    let row_string = position.row.to_string();
    let padding = row_string.len() + 2;
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    out.push_str(&format!("{} | {}\n", row_string, line_text_removed.trim_end()));

    let arrows = (position.column as usize).saturating_sub(removed_whitespace).max(1);
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

pub fn display_error(error: &Error, source: &str) {
    eprint!("{}", format_error(error, source));
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (&string[start..], start)
}
