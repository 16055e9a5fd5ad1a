//! Command replies

use std::fmt;

/// Result of a successfully executed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Mutation applied
    Ok,

    /// Answer to PING
    Pong,

    /// A single record
    Value(String),

    /// Every record of a table
    Values(Vec<String>),

    /// One range read
    Page { items: Vec<String>, exhausted: bool },

    /// Table names
    Names(Vec<String>),

    /// A record count
    Count(usize),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => write!(f, "OK"),
            Reply::Pong => write!(f, "PONG"),
            Reply::Value(value) => write!(f, "{}", value),
            Reply::Values(items) | Reply::Names(items) => write_list(f, items),
            Reply::Page { items, exhausted } => {
                if !items.is_empty() {
                    write_list(f, items)?;
                    writeln!(f)?;
                }
                if *exhausted {
                    write!(f, "(end)")
                } else {
                    write!(f, "(more)")
                }
            }
            Reply::Count(count) => write!(f, "{}", count),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return write!(f, "(empty)");
    }

    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        write!(f, "{}) {}", i + 1, item)?;
    }
    Ok(())
}
