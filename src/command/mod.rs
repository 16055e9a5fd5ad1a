//! Command Module
//!
//! Line-oriented text commands over a `TableStore<String, String>`.
//!
//! ## Commands
//! ```text
//! CREATE <table>                 DROP <table>
//! TABLES                         LEN <table>
//! PUT <table> <key> <value...>   GET <table> <key>
//! DEL <table> <key>              ALL <table>
//! RANGE <table> <start> <end>    PING
//! ```
//! Verbs are case-insensitive. A `PUT` value is the rest of the line.

#[allow(clippy::module_inception)]
mod command;
mod reply;

pub use command::{Command, CommandType};
pub use reply::Reply;

use crate::error::Result;
use crate::store::TableStore;

/// Execute a command against a store
///
/// Store errors are returned unchanged.
pub fn execute(store: &dyn TableStore<String, String>, command: Command) -> Result<Reply> {
    match command {
        Command::Create { table } => {
            store.create_table(&table)?;
            Ok(Reply::Ok)
        }
        Command::Drop { table } => {
            store.delete_table(&table)?;
            Ok(Reply::Ok)
        }
        Command::Tables => Ok(Reply::Names(store.table_names())),
        Command::Len { table } => Ok(Reply::Count(store.len(&table)?)),
        Command::Put { table, key, value } => {
            store.write(&table, key, value)?;
            Ok(Reply::Ok)
        }
        Command::Get { table, key } => Ok(Reply::Value(store.read(&table, &key)?)),
        Command::Delete { table, key } => {
            store.delete(&table, &key)?;
            Ok(Reply::Ok)
        }
        Command::Range { table, start, end } => {
            let range = store.read_range(&table, start, end)?;
            Ok(Reply::Page {
                items: range.items,
                exhausted: range.exhausted,
            })
        }
        Command::All { table } => Ok(Reply::Values(store.read_all(&table)?)),
        Command::Ping => Ok(Reply::Pong),
    }
}
