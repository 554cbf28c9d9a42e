//! Prep driver (§6.3): read a newline-delimited word list, build the
//! approximate-membership index, write the serialized form to stdout.
//!
//! Grounded in the teacher's `create` subcommand handler (`src/bin/par2.rs`):
//! a single required file argument, `env_logger` initialized the same way,
//! errors propagated through `anyhow` so a bad argc or a failed open both
//! collapse to exit code 1 via `main`'s `Result` return.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{Context, Result};
use log::info;
use par2adv::builder::IndexBuilder;
use par2adv::format;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = par2adv::args::parse_build_args();
    let db_file = matches.get_one::<String>("db_file").expect("db_file is required");

    let file = File::open(db_file).with_context(|| format!("failed to open {}", db_file))?;
    let reader = BufReader::new(file);

    let mut builder = IndexBuilder::default();
    let mut lines_read = 0usize;
    for line in reader.lines() {
        let line = line.context("failed to read a line from the dictionary")?;
        let word = line.trim_end_matches(['\r', '\n']);
        if word.is_empty() {
            continue;
        }
        lines_read += 1;
        builder.insert(word.as_bytes());
    }

    info!(
        "loaded {} of {} line(s) into the dictionary ({} discarded)",
        builder.len(),
        lines_read,
        lines_read - builder.len()
    );
    let index = builder.finalize().context("failed to finalize the index")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    format::serialize(&index, &mut out).context("failed to serialize the index")?;
    out.flush()?;

    Ok(())
}
