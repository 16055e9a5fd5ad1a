//! Command Tests
//!
//! Tests verify:
//! - Parsing of every verb, case-insensitively
//! - Arity and bound errors
//! - Execution against a store and reply rendering
//! - Store errors surface unchanged

use tablekv::command::{execute, Command, CommandType, Reply};
use tablekv::{MemDb, StoreError};

// =============================================================================
// Helper Functions
// =============================================================================

fn run(db: &MemDb<String, String>, line: &str) -> Result<Reply, StoreError> {
    execute(db, Command::parse(line)?)
}

fn is_command_error(result: Result<Command, StoreError>) -> bool {
    matches!(result, Err(StoreError::Command(_)))
}

// =============================================================================
// Parse Tests
// =============================================================================

#[test]
fn test_parse_all_verbs() {
    assert_eq!(
        Command::parse("CREATE products").unwrap(),
        Command::Create { table: "products".into() }
    );
    assert_eq!(
        Command::parse("drop products").unwrap(),
        Command::Drop { table: "products".into() }
    );
    assert_eq!(Command::parse("tables").unwrap(), Command::Tables);
    assert_eq!(
        Command::parse("Len t").unwrap(),
        Command::Len { table: "t".into() }
    );
    assert_eq!(
        Command::parse("GET t k").unwrap(),
        Command::Get { table: "t".into(), key: "k".into() }
    );
    assert_eq!(
        Command::parse("del t k").unwrap(),
        Command::Delete { table: "t".into(), key: "k".into() }
    );
    assert_eq!(
        Command::parse("DELETE t k").unwrap(),
        Command::Delete { table: "t".into(), key: "k".into() }
    );
    assert_eq!(
        Command::parse("RANGE t -1 10").unwrap(),
        Command::Range { table: "t".into(), start: -1, end: 10 }
    );
    assert_eq!(
        Command::parse("all t").unwrap(),
        Command::All { table: "t".into() }
    );
    assert_eq!(Command::parse("PING").unwrap(), Command::Ping);
}

#[test]
fn test_parse_put_joins_value() {
    let command: Command = "PUT t k  hello   big world".parse().unwrap();

    assert_eq!(
        command,
        Command::Put {
            table: "t".into(),
            key: "k".into(),
            value: "hello big world".into(),
        }
    );
    assert_eq!(command.command_type(), CommandType::Put);
    assert!(command.is_mutation());
}

#[test]
fn test_parse_errors() {
    assert!(is_command_error(Command::parse("")));
    assert!(is_command_error(Command::parse("   ")));
    assert!(is_command_error(Command::parse("FETCH t k")));
    assert!(is_command_error(Command::parse("GET t")));
    assert!(is_command_error(Command::parse("GET t k extra")));
    assert!(is_command_error(Command::parse("PUT t k")));
    assert!(is_command_error(Command::parse("PING now")));
    assert!(is_command_error(Command::parse("RANGE t a 10")));
    assert!(is_command_error(Command::parse("RANGE t 0")));
}

#[test]
fn test_parse_error_messages() {
    let err = Command::parse("GET t").unwrap_err();
    assert_eq!(err.to_string(), "Command error: usage: GET <table> <key>");

    let err = Command::parse("FETCH t").unwrap_err();
    assert_eq!(err.to_string(), "Command error: unknown command: FETCH");
}

#[test]
fn test_read_commands_are_not_mutations() {
    for line in ["GET t k", "RANGE t 0 1", "ALL t", "LEN t", "TABLES", "PING"] {
        assert!(!Command::parse(line).unwrap().is_mutation(), "{}", line);
    }
}

#[test]
fn test_mutating_commands_are_flagged() {
    for line in ["CREATE t", "DROP t", "PUT t k v", "DEL t k"] {
        assert!(Command::parse(line).unwrap().is_mutation(), "{}", line);
    }
}

// =============================================================================
// Execute Tests
// =============================================================================

#[test]
fn test_execute_session() {
    let db: MemDb<String, String> = MemDb::new();

    assert_eq!(run(&db, "PING").unwrap(), Reply::Pong);
    assert_eq!(run(&db, "CREATE products").unwrap(), Reply::Ok);
    assert_eq!(run(&db, "CREATE products").unwrap(), Reply::Ok);
    assert_eq!(run(&db, "PUT products a apple").unwrap(), Reply::Ok);
    assert_eq!(run(&db, "PUT products b banana").unwrap(), Reply::Ok);
    assert_eq!(run(&db, "PUT products c cherry").unwrap(), Reply::Ok);

    assert_eq!(
        run(&db, "GET products b").unwrap(),
        Reply::Value("banana".into())
    );
    assert_eq!(run(&db, "LEN products").unwrap(), Reply::Count(3));
    assert_eq!(
        run(&db, "RANGE products 0 2").unwrap(),
        Reply::Page {
            items: vec!["apple".into(), "banana".into()],
            exhausted: false,
        }
    );

    assert_eq!(run(&db, "DEL products b").unwrap(), Reply::Ok);
    assert_eq!(
        run(&db, "ALL products").unwrap(),
        Reply::Values(vec!["apple".into(), "cherry".into()])
    );
    assert_eq!(
        run(&db, "TABLES").unwrap(),
        Reply::Names(vec!["products".into()])
    );

    assert_eq!(run(&db, "DROP products").unwrap(), Reply::Ok);
    assert_eq!(run(&db, "TABLES").unwrap(), Reply::Names(vec![]));
}

#[test]
fn test_execute_surfaces_store_errors() {
    let db: MemDb<String, String> = MemDb::new();
    db.create_table("t");

    assert!(matches!(
        run(&db, "GET missing k").unwrap_err(),
        StoreError::TableNotFound { .. }
    ));
    assert!(matches!(
        run(&db, "PUT missing k v").unwrap_err(),
        StoreError::TableNotFound { .. }
    ));
    assert!(matches!(
        run(&db, "GET t k").unwrap_err(),
        StoreError::KeyNotFound { .. }
    ));
    assert!(matches!(
        run(&db, "RANGE t 3 1").unwrap_err(),
        StoreError::InvalidRange { .. }
    ));
    assert!(matches!(
        run(&db, "DROP missing").unwrap_err(),
        StoreError::TableNotFound { .. }
    ));
}

// =============================================================================
// Reply Rendering Tests
// =============================================================================

#[test]
fn test_reply_display() {
    assert_eq!(Reply::Ok.to_string(), "OK");
    assert_eq!(Reply::Pong.to_string(), "PONG");
    assert_eq!(Reply::Value("v".into()).to_string(), "v");
    assert_eq!(Reply::Count(7).to_string(), "7");
    assert_eq!(Reply::Values(vec![]).to_string(), "(empty)");
    assert_eq!(
        Reply::Values(vec!["a".into(), "b".into()]).to_string(),
        "1) a\n2) b"
    );
    assert_eq!(
        Reply::Page {
            items: vec!["a".into()],
            exhausted: false
        }
        .to_string(),
        "1) a\n(more)"
    );
    assert_eq!(
        Reply::Page {
            items: vec![],
            exhausted: true
        }
        .to_string(),
        "(end)"
    );
}
