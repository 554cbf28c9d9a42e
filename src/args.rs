//! CLI argument parsing for the three drivers (§6.3), in the teacher's
//! builder-style `clap::Command` idiom (`src/bin/par2.rs`) rather than the
//! derive-macro style — each binary gets its own small, explicit surface.

use clap::{Arg, ArgAction, Command};

/// `par2adv-build <db_file>` — reads keywords from `db_file`, writes the
/// serialized index to stdout.
pub fn parse_build_args() -> clap::ArgMatches {
    Command::new("par2adv-build")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build a searchable approximate-membership index from a word list")
        .arg(
            Arg::new("db_file")
                .help("Path to a newline-delimited list of keywords")
                .required(true)
                .index(1),
        )
        .get_matches()
}

/// `par2adv-search <query_file> <index_file>` — checks every query against
/// the index, writing one ASCII digit per query (`1`/`0`) to stdout.
pub fn parse_search_args() -> clap::ArgMatches {
    Command::new("par2adv-search")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Check a newline-delimited list of queries against a serialized index")
        .arg(
            Arg::new("query_file")
                .help("Path to a newline-delimited list of query words")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("index_file")
                .help("Path to a serialized index file")
                .required(true)
                .index(2),
        )
        .get_matches()
}

/// `par2adv-bench [--record] [--dataset NAME] [--records-dir DIR] -- <cmd...>`
///
/// A generic timing wrapper, not specific to the search binary: it spawns
/// whatever command follows `--`, so it can just as well time
/// `par2adv-build` or an external comparison tool.
pub fn parse_bench_args() -> clap::ArgMatches {
    Command::new("par2adv-bench")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Time an external command and optionally log a CSV record of the run")
        .arg(
            Arg::new("record")
                .long("record")
                .help("Append a CSV row describing this run to the records file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dataset")
                .long("dataset")
                .help("Dataset label stored in the CSV record")
                .value_name("NAME")
                .default_value(""),
        )
        .arg(
            Arg::new("records_dir")
                .long("records-dir")
                .help("Directory the CSV records file lives in")
                .value_name("DIR")
                .default_value("."),
        )
        .arg(
            Arg::new("cmd")
                .help("Command (and its arguments) to run and time")
                .num_args(1..)
                .required(true)
                .last(true),
        )
        .get_matches()
}
