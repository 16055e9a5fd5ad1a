//! tablekv CLI
//!
//! Interactive shell over an in-process store. Reads one command per line
//! from stdin and prints the reply.

use std::io::{self, BufRead, Write};

use clap::Parser;
use tablekv::command::{self, Command};
use tablekv::{Config, MemDb};
use tracing_subscriber::{fmt, EnvFilter};

/// tablekv CLI
#[derive(Parser, Debug)]
#[command(name = "tablekv-cli")]
#[command(about = "Interactive shell for the tablekv table store")]
#[command(version)]
struct Args {
    /// Table to create at startup (repeatable)
    #[arg(short, long = "table")]
    tables: Vec<String>,

    /// Records each new table pre-allocates room for
    #[arg(short, long, default_value = "1024")]
    capacity: usize,

    /// Do not print the prompt
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    // Logs go to stderr so replies on stdout stay clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,tablekv=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .initial_table_capacity(args.capacity)
        .tables(args.tables)
        .build();
    let db: MemDb<String, String> = MemDb::open(config);

    tracing::info!("tablekv CLI v{}", tablekv::VERSION);
    tracing::info!("Tables: {:?}", db.table_names());

    if let Err(e) = run(&db, args.quiet) {
        tracing::error!("I/O error: {}", e);
        std::process::exit(1);
    }
}

fn run(db: &MemDb<String, String>, quiet: bool) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    prompt(&mut stdout, quiet)?;
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();

        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }

        if !line.is_empty() {
            let result = Command::parse(line).and_then(|cmd| {
                if cmd.is_mutation() {
                    tracing::debug!(command = cmd.command_type().verb(), "applying mutation");
                }
                command::execute(db, cmd)
            });
            match result {
                Ok(reply) => writeln!(stdout, "{}", reply)?,
                Err(e) => writeln!(stdout, "ERR {}", e)?,
            }
        }

        prompt(&mut stdout, quiet)?;
    }

    Ok(())
}

fn prompt(out: &mut impl Write, quiet: bool) -> io::Result<()> {
    if !quiet {
        write!(out, "tablekv> ")?;
        out.flush()?;
    }
    Ok(())
}
