//! clap command tree.

use clap::{Arg, ArgAction, Command};
use complaint_store::formats::DEFAULT_DATA_FILE;

pub fn build_cli() -> Command {
    Command::new("complaintdesk")
        .about("Submit, track, and triage student complaints")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("data")
                .long("data")
                .value_name("PATH")
                .default_value(DEFAULT_DATA_FILE)
                .global(true)
                .help("Complaint file"),
        )
        .arg(
            Arg::new("durable")
                .long("durable")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("fsync every write"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("More log output on stderr (repeatable)"),
        )
        .subcommand(
            Command::new("submit")
                .about("Submit a new complaint")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("roll").long("roll").required(true))
                .arg(Arg::new("issue").long("issue").required(true)),
        )
        .subcommand(
            Command::new("list")
                .about("List all complaints (admin table)")
                .arg(
                    Arg::new("status")
                        .long("status")
                        .value_name("STATUS")
                        .help("Only this status (label or R/P/X code)"),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("track")
                .about("Look up complaints by roll number")
                .arg(Arg::new("roll").required(true))
                .arg(json_flag()),
        )
        .subcommand(
            admin_args(
                Command::new("update")
                    .about("Change the status of a complaint")
                    .arg(Arg::new("id").required(true))
                    .arg(
                        Arg::new("status")
                            .required(true)
                            .help("R(esolved), P(rogress), X (rejected), or a full label"),
                    ),
            ),
        )
        .subcommand(
            Command::new("delete")
                .about("Permanently remove a complaint")
                .arg(Arg::new("id").required(true))
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue)
                        .help("Confirm the deletion"),
                ),
        )
        .subcommand(
            Command::new("stats")
                .about("Dashboard counts")
                .arg(json_flag()),
        )
}

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON")
}

fn admin_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("user").long("user").required(true))
        .arg(Arg::new("password").long("password").required(true))
}
