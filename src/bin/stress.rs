//! tablekv Stress Binary
//!
//! Runs a mixed read/write/range/delete workload from many threads against
//! one store, then checks every table's index/sequence consistency.

use std::ops::AddAssign;
use std::time::{Duration, Instant};

use bytes::Bytes;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tablekv::{Config, MemDb, StoreError};
use tracing_subscriber::{fmt, EnvFilter};

/// tablekv stress workload
#[derive(Parser, Debug, Clone)]
#[command(name = "tablekv-stress")]
#[command(about = "Concurrent workload against the tablekv table store")]
#[command(version)]
struct Args {
    /// Number of tables
    #[arg(long, default_value = "4")]
    tables: usize,

    /// Worker threads
    #[arg(short, long, default_value = "8")]
    threads: usize,

    /// Operations per worker thread
    #[arg(short, long, default_value = "100000")]
    ops: usize,

    /// Distinct keys per table
    #[arg(short, long, default_value = "10000")]
    keys: u64,

    /// Payload size in bytes
    #[arg(long, default_value = "64")]
    value_size: usize,

    /// Percentage of operations that are deletes
    #[arg(long, default_value = "2")]
    delete_pct: u64,

    /// Percentage of operations that are range reads
    #[arg(long, default_value = "10")]
    range_pct: u64,

    /// Percentage of operations that are writes
    #[arg(long, default_value = "20")]
    write_pct: u64,

    /// Records per range read
    #[arg(long, default_value = "50")]
    page_size: i64,

    /// RNG seed
    #[arg(long, default_value = "42")]
    seed: u64,
}

/// Per-worker operation counters
#[derive(Debug, Default, Clone, Copy)]
struct Stats {
    reads: u64,
    misses: u64,
    writes: u64,
    ranges: u64,
    exhausted: u64,
    deletes: u64,
}

impl AddAssign for Stats {
    fn add_assign(&mut self, other: Self) {
        self.reads += other.reads;
        self.misses += other.misses;
        self.writes += other.writes;
        self.ranges += other.ranges;
        self.exhausted += other.exhausted;
        self.deletes += other.deletes;
    }
}

/// Upper bound on per-table pre-allocation, whatever the key space
const MAX_INITIAL_CAPACITY: usize = 1 << 20;

/// Reject argument combinations the workload cannot run with
fn validate(args: &Args) -> Result<(), String> {
    if args.delete_pct + args.range_pct + args.write_pct > 100 {
        return Err("delete, range and write percentages add up to more than 100".to_string());
    }
    if args.tables == 0 {
        return Err("at least one table is required".to_string());
    }
    if args.keys == 0 || i64::try_from(args.keys).is_err() {
        return Err(format!("--keys must be between 1 and {}", i64::MAX));
    }
    if args.page_size < 0 {
        return Err("--page-size must not be negative".to_string());
    }
    Ok(())
}

/// End bound of a range read starting at `start`
fn page_end(start: i64, page_size: i64) -> i64 {
    start.saturating_add(page_size)
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tablekv=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    if let Err(e) = validate(&args) {
        tracing::error!("{}", e);
        std::process::exit(2);
    }

    tracing::info!("tablekv stress v{}", tablekv::VERSION);
    tracing::info!(
        tables = args.tables,
        threads = args.threads,
        ops = args.ops,
        keys = args.keys,
        "starting workload"
    );

    let names: Vec<String> = (0..args.tables).map(|i| format!("table-{}", i)).collect();
    let config = Config::builder()
        .initial_table_capacity(
            usize::try_from(args.keys)
                .map_or(MAX_INITIAL_CAPACITY, |keys| keys.min(MAX_INITIAL_CAPACITY)),
        )
        .tables(names.iter().cloned())
        .build();
    let db: MemDb<u64, Bytes> = MemDb::open(config);
    let payload = Bytes::from(vec![b'x'; args.value_size]);

    let started = Instant::now();
    let result = crossbeam::thread::scope(|scope| {
        let handles: Vec<_> = (0..args.threads)
            .map(|worker| {
                let (db, names, args, payload) = (&db, &names, &args, payload.clone());
                scope.spawn(move |_| run_worker(worker as u64, db, names, args, payload))
            })
            .collect();

        let mut total = Stats::default();
        for handle in handles {
            match handle.join() {
                Ok(stats) => total += stats,
                Err(_) => return Err("worker thread panicked"),
            }
        }
        Ok(total)
    });

    let total = match result {
        Ok(Ok(total)) => total,
        Ok(Err(e)) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
        Err(_) => {
            tracing::error!("workload scope panicked");
            std::process::exit(1);
        }
    };

    report(&args, total, started.elapsed());

    let mut consistent = true;
    for name in &names {
        match db.table(name) {
            Ok(table) => {
                let ok = table.is_consistent();
                tracing::info!(table = %name, records = table.len(), consistent = ok, "checked table");
                consistent &= ok;
            }
            Err(e) => {
                tracing::error!("{}", e);
                consistent = false;
            }
        }
    }

    if !consistent {
        tracing::error!("index/sequence mismatch detected");
        std::process::exit(1);
    }
}

fn run_worker(
    worker: u64,
    db: &MemDb<u64, Bytes>,
    names: &[String],
    args: &Args,
    payload: Bytes,
) -> Stats {
    let mut rng = StdRng::seed_from_u64(args.seed.wrapping_add(worker));
    let mut stats = Stats::default();

    for _ in 0..args.ops {
        let table = &names[rng.random_range(0..names.len())];
        let key = rng.random_range(0..args.keys);
        let roll = rng.random_range(0..100u64);

        let outcome = if roll < args.delete_pct {
            stats.deletes += 1;
            db.delete(table, &key)
        } else if roll < args.delete_pct + args.range_pct {
            stats.ranges += 1;
            // keys fits in i64, checked by validate()
            let start = rng.random_range(0..args.keys as i64);
            db.read_range(table, start, page_end(start, args.page_size)).map(|page| {
                if page.exhausted {
                    stats.exhausted += 1;
                }
            })
        } else if roll < args.delete_pct + args.range_pct + args.write_pct {
            stats.writes += 1;
            db.write(table, key, payload.clone())
        } else {
            stats.reads += 1;
            db.read(table, &key).map(|_| ())
        };

        match outcome {
            Ok(()) => {}
            // Misses and ranges past a shrinking table are part of the workload
            Err(StoreError::KeyNotFound { .. }) | Err(StoreError::InvalidRange { .. }) => {
                stats.misses += 1
            }
            Err(e) => tracing::warn!(worker, "unexpected error: {}", e),
        }
    }

    tracing::debug!(worker, ?stats, "worker finished");
    stats
}

fn report(args: &Args, total: Stats, elapsed: Duration) {
    let ops = (args.threads * args.ops) as f64;
    let secs = elapsed.as_secs_f64().max(f64::EPSILON);

    tracing::info!(
        reads = total.reads,
        writes = total.writes,
        ranges = total.ranges,
        exhausted = total.exhausted,
        deletes = total.deletes,
        misses = total.misses,
        "workload finished in {:.2?} ({:.0} ops/s)",
        elapsed,
        ops / secs
    );
}
