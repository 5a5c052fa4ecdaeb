//! `complaintdesk`: command-line front end for the complaint store.
//!
//! Stands in for the presentation shell: it validates input, asks for confirmation before
//! deleting, maps short status codes, and prints whatever the store returns.
//!
//! Exit codes: `0` success, `1` the operation did not happen (not found, could not save),
//! `2` bad input or configuration.

mod commands;
mod format;

use std::process;

use clap::ArgMatches;
use complaint_store::{
    AdminCredentials, ComplaintId, RecordStore, Status, StoreConfig, WritePolicy,
};
use tracing::Level;

use commands::build_cli;
use format::OutputMode;

fn main() {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_count("verbose"));

    let config = config_from(&matches);
    let store = match RecordStore::open(&config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("(error) {e}");
            process::exit(2);
        }
    };

    let code = match matches.subcommand() {
        Some(("submit", m)) => submit(&store, m),
        Some(("list", m)) => list(&store, m),
        Some(("track", m)) => track(&store, m),
        Some(("update", m)) => update(&store, &config.admin, m),
        Some(("delete", m)) => delete(&store, m),
        Some(("stats", m)) => {
            let mode = OutputMode::from_flag(m.get_flag("json"));
            println!("{}", format::stats(&store.stats(), mode));
            0
        }
        _ => 2,
    };
    process::exit(code);
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn config_from(matches: &ArgMatches) -> StoreConfig {
    let path = matches
        .get_one::<String>("data")
        .map(String::as_str)
        .unwrap_or(complaint_store::formats::DEFAULT_DATA_FILE);
    let policy = if matches.get_flag("durable") {
        WritePolicy::Sync
    } else {
        WritePolicy::Flush
    };
    StoreConfig::new(path).with_write_policy(policy)
}

fn arg<'a>(m: &'a ArgMatches, name: &str) -> &'a str {
    m.get_one::<String>(name).map(String::as_str).unwrap_or("")
}

/// A single character is a short code; anything longer is a full label.
fn parse_status(input: &str) -> Option<Status> {
    let t = input.trim();
    let mut chars = t.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Status::from_code(c),
        _ => t.parse().ok(),
    }
}

fn parse_id(m: &ArgMatches) -> Option<ComplaintId> {
    let raw = arg(m, "id");
    match raw.parse() {
        Ok(id) => Some(id),
        Err(e) => {
            eprintln!("(error) {e}");
            None
        }
    }
}

fn submit(store: &RecordStore, m: &ArgMatches) -> i32 {
    let name = arg(m, "name").trim();
    let roll = arg(m, "roll").trim();
    let issue = arg(m, "issue").trim();
    if name.is_empty() || roll.is_empty() || issue.is_empty() {
        eprintln!("(error) please fill all fields");
        return 2;
    }
    if store.create(name, roll, issue) {
        println!("submitted");
        0
    } else {
        eprintln!("could not save complaint");
        1
    }
}

fn list(store: &RecordStore, m: &ArgMatches) -> i32 {
    let mode = OutputMode::from_flag(m.get_flag("json"));
    let rows = match m.get_one::<String>("status") {
        Some(raw) => match parse_status(raw) {
            Some(status) => store.filter_by_status(status),
            None => {
                eprintln!("(error) invalid status: {raw:?}");
                return 2;
            }
        },
        None => store.list(),
    };
    println!("{}", format::admin_table(&rows, mode));
    0
}

fn track(store: &RecordStore, m: &ArgMatches) -> i32 {
    let mode = OutputMode::from_flag(m.get_flag("json"));
    let rows = store.find_by_roll_no(arg(m, "roll"));
    println!("{}", format::student_table(&rows, mode));
    0
}

fn update(store: &RecordStore, admin: &AdminCredentials, m: &ArgMatches) -> i32 {
    if !admin.verify(arg(m, "user"), arg(m, "password")) {
        eprintln!("(error) invalid credentials");
        return 2;
    }
    let Some(id) = parse_id(m) else {
        return 2;
    };
    let Some(status) = parse_status(arg(m, "status")) else {
        eprintln!("(error) invalid status code");
        return 2;
    };
    if store.update_status(id, status) {
        println!("complaint {id} updated to '{status}'");
        0
    } else {
        eprintln!("id not found");
        1
    }
}

fn delete(store: &RecordStore, m: &ArgMatches) -> i32 {
    let Some(id) = parse_id(m) else {
        return 2;
    };
    if !m.get_flag("yes") {
        eprintln!("permanently remove complaint {id}? re-run with --yes to confirm");
        return 1;
    }
    if store.delete(id) {
        println!("deleted");
        0
    } else {
        eprintln!("id not found");
        1
    }
}
