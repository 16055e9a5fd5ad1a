//! Command definitions
//!
//! Parses one text line into a typed command.

use std::str::FromStr;

use crate::error::{Result, StoreError};

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Create,
    Drop,
    Tables,
    Len,
    Put,
    Get,
    Delete,
    Range,
    All,
    Ping,
}

impl CommandType {
    /// Verb as typed on the command line
    pub fn verb(&self) -> &'static str {
        match self {
            CommandType::Create => "CREATE",
            CommandType::Drop => "DROP",
            CommandType::Tables => "TABLES",
            CommandType::Len => "LEN",
            CommandType::Put => "PUT",
            CommandType::Get => "GET",
            CommandType::Delete => "DEL",
            CommandType::Range => "RANGE",
            CommandType::All => "ALL",
            CommandType::Ping => "PING",
        }
    }
}

impl FromStr for CommandType {
    type Err = StoreError;

    fn from_str(verb: &str) -> Result<Self> {
        match verb.to_ascii_uppercase().as_str() {
            "CREATE" => Ok(CommandType::Create),
            "DROP" => Ok(CommandType::Drop),
            "TABLES" => Ok(CommandType::Tables),
            "LEN" => Ok(CommandType::Len),
            "PUT" => Ok(CommandType::Put),
            "GET" => Ok(CommandType::Get),
            "DEL" | "DELETE" => Ok(CommandType::Delete),
            "RANGE" => Ok(CommandType::Range),
            "ALL" => Ok(CommandType::All),
            "PING" => Ok(CommandType::Ping),
            other => Err(StoreError::Command(format!("unknown command: {}", other))),
        }
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a table (idempotent)
    Create { table: String },

    /// Delete a table and its records
    Drop { table: String },

    /// List table names
    Tables,

    /// Count records in a table
    Len { table: String },

    /// Insert or update a record
    Put {
        table: String,
        key: String,
        value: String,
    },

    /// Read a record
    Get { table: String, key: String },

    /// Delete a record
    Delete { table: String, key: String },

    /// Read records in `[start, end)`
    Range { table: String, start: i64, end: i64 },

    /// Read every record
    All { table: String },

    /// Ping (health check)
    Ping,
}

impl Command {
    /// Parse a command line
    pub fn parse(line: &str) -> Result<Self> {
        let mut tokens = line.split_whitespace();
        let verb = tokens
            .next()
            .ok_or_else(|| StoreError::Command("empty command".to_string()))?;
        let command_type: CommandType = verb.parse()?;
        let args: Vec<&str> = tokens.collect();

        let command = match command_type {
            CommandType::Create => {
                let [table] = expect_args::<1>(command_type, &args)?;
                Command::Create { table }
            }
            CommandType::Drop => {
                let [table] = expect_args::<1>(command_type, &args)?;
                Command::Drop { table }
            }
            CommandType::Tables => {
                expect_args::<0>(command_type, &args)?;
                Command::Tables
            }
            CommandType::Len => {
                let [table] = expect_args::<1>(command_type, &args)?;
                Command::Len { table }
            }
            CommandType::Put => {
                if args.len() < 3 {
                    return Err(arity_error(command_type, "<table> <key> <value...>"));
                }
                Command::Put {
                    table: args[0].to_string(),
                    key: args[1].to_string(),
                    value: args[2..].join(" "),
                }
            }
            CommandType::Get => {
                let [table, key] = expect_args::<2>(command_type, &args)?;
                Command::Get { table, key }
            }
            CommandType::Delete => {
                let [table, key] = expect_args::<2>(command_type, &args)?;
                Command::Delete { table, key }
            }
            CommandType::Range => {
                let [table, start, end] = expect_args::<3>(command_type, &args)?;
                Command::Range {
                    table,
                    start: parse_bound(&start)?,
                    end: parse_bound(&end)?,
                }
            }
            CommandType::All => {
                let [table] = expect_args::<1>(command_type, &args)?;
                Command::All { table }
            }
            CommandType::Ping => {
                expect_args::<0>(command_type, &args)?;
                Command::Ping
            }
        };

        Ok(command)
    }

    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Create { .. } => CommandType::Create,
            Command::Drop { .. } => CommandType::Drop,
            Command::Tables => CommandType::Tables,
            Command::Len { .. } => CommandType::Len,
            Command::Put { .. } => CommandType::Put,
            Command::Get { .. } => CommandType::Get,
            Command::Delete { .. } => CommandType::Delete,
            Command::Range { .. } => CommandType::Range,
            Command::All { .. } => CommandType::All,
            Command::Ping => CommandType::Ping,
        }
    }

    /// True for commands that change the store
    pub fn is_mutation(&self) -> bool {
        matches!(
            self.command_type(),
            CommandType::Create | CommandType::Drop | CommandType::Put | CommandType::Delete
        )
    }
}

impl FromStr for Command {
    type Err = StoreError;

    fn from_str(line: &str) -> Result<Self> {
        Command::parse(line)
    }
}

fn expect_args<const N: usize>(command_type: CommandType, args: &[&str]) -> Result<[String; N]> {
    if args.len() != N {
        let usage = match N {
            0 => "no arguments",
            1 => "<table>",
            2 => "<table> <key>",
            _ => "<table> <start> <end>",
        };
        return Err(arity_error(command_type, usage));
    }

    Ok(std::array::from_fn(|i| args[i].to_string()))
}

fn arity_error(command_type: CommandType, usage: &str) -> StoreError {
    StoreError::Command(format!("usage: {} {}", command_type.verb(), usage))
}

fn parse_bound(token: &str) -> Result<i64> {
    token
        .parse()
        .map_err(|_| StoreError::Command(format!("invalid range bound: {}", token)))
}
