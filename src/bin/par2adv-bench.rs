//! Performance wrapper driver (§6.3): time an arbitrary external command,
//! forward its stdout, count `1` characters as hits, and optionally append
//! a CSV row describing the run.
//!
//! Grounded in the teacher's `split_par2` utility binary — a standalone tool
//! built around file/process plumbing rather than library calls — for the
//! overall shape, since no teacher binary already wraps an external process.
//! Unlike `benches/*.rs` (criterion, measures the library directly), this is
//! an end-to-end timer that drives the compiled binaries the way a user
//! would invoke them.

use std::io::{Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

const CSV_HEADER: &str =
    "timestamp_utc,executable,query_file,index_file,dataset,elapsed_seconds,hit_count,return_code";

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = par2adv::args::parse_bench_args();

    let record = matches.get_flag("record");
    let dataset = matches.get_one::<String>("dataset").cloned().unwrap_or_default();
    let records_dir = matches.get_one::<String>("records_dir").expect("records_dir has a default");
    let cmd_parts: Vec<String> = matches
        .get_many::<String>("cmd")
        .expect("cmd is required")
        .cloned()
        .collect();

    let (executable, rest) = cmd_parts.split_first().expect("clap enforces at least one value");
    let query_file = rest.first().cloned().unwrap_or_default();
    let index_file = rest.get(1).cloned().unwrap_or_default();

    let start = Instant::now();
    let mut child = Command::new(executable)
        .args(rest)
        .stdout(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn {}", executable))?;

    let mut output = String::new();
    child
        .stdout
        .take()
        .expect("stdout was piped")
        .read_to_string(&mut output)
        .context("failed to read child stdout")?;
    let status = child.wait().context("child process did not run to completion")?;
    let elapsed = start.elapsed();

    print!("{}", output);
    std::io::stdout().flush()?;

    let hit_count = output.chars().filter(|&c| c == '1').count();
    let return_code = status.code().unwrap_or(-1);

    if record {
        append_csv_row(
            records_dir,
            executable,
            &query_file,
            &index_file,
            &dataset,
            elapsed.as_secs_f64(),
            hit_count,
            return_code,
        )?;
    }

    std::process::exit(return_code);
}

#[allow(clippy::too_many_arguments)]
fn append_csv_row(
    records_dir: &str,
    executable: &str,
    query_file: &str,
    index_file: &str,
    dataset: &str,
    elapsed_seconds: f64,
    hit_count: usize,
    return_code: i32,
) -> Result<()> {
    let path = Path::new(records_dir).join("par2adv-bench.csv");
    let needs_header = !path.exists();

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open records file {}", path.display()))?;

    if needs_header {
        writeln!(file, "{}", CSV_HEADER)?;
    }

    // UNIX epoch seconds stand in for `timestamp_utc`: always UTC, and the
    // only timestamp source this crate's dependency stack provides without
    // pulling in a date/time crate the teacher never uses.
    let timestamp_utc = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    writeln!(
        file,
        "{},{},{},{},{},{:.6},{},{}",
        timestamp_utc, executable, query_file, index_file, dataset, elapsed_seconds, hit_count, return_code
    )?;
    Ok(())
}
