// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn tx_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("amount")
            .long("amount")
            .required(required)
            .allow_hyphen_values(true)
            .help("Positive amount"),
    )
    .arg(
        Arg::new("type")
            .long("type")
            .required(required)
            .help("income | expense"),
    )
    .arg(Arg::new("category").long("category").required(required))
    .arg(Arg::new("description").long("description").required(required))
    .arg(
        Arg::new("date")
            .long("date")
            .help("YYYY-MM-DD [HH:MM[:SS]], defaults to now"),
    )
}

pub fn build_cli() -> Command {
    Command::new("moneyplanner")
        .about("Track income and expenses, summarize them and export reports")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the database if missing"))
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(tx_fields(Command::new("add").about("Record a transaction"), true))
                .subcommand(json_args(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("from").long("from").help("YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("YYYY-MM-DD"))
                        .arg(Arg::new("type").long("type").help("income | expense"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(tx_fields(
                    Command::new("edit").about("Change fields of a transaction").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                    false,
                ))
                .subcommand(
                    Command::new("rm").about("Delete a transaction").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("reset")
                        .about("Delete all transactions")
                        .arg(
                            Arg::new("yes")
                                .long("yes")
                                .action(ArgAction::SetTrue)
                                .help("Confirm deletion"),
                        ),
                ),
        )
        .subcommand(json_args(
            Command::new("summary")
                .about("Income, expenses and balance")
                .arg(
                    Arg::new("month")
                        .long("month")
                        .conflicts_with_all(["from", "to"])
                        .help("YYYY-MM"),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .requires("to")
                        .help("YYYY-MM-DD"),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .requires("from")
                        .help("YYYY-MM-DD"),
                ),
        ))
        .subcommand(
            Command::new("report")
                .about("Daily and monthly income/expense series")
                .subcommand(json_args(
                    Command::new("daily").arg(
                        Arg::new("days")
                            .long("days")
                            .allow_hyphen_values(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ))
                .subcommand(json_args(
                    Command::new("monthly").arg(
                        Arg::new("months")
                            .long("months")
                            .allow_hyphen_values(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Write a transaction report")
                .arg(
                    Arg::new("month")
                        .long("month")
                        .help("YYYY-MM; all transactions when omitted"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("text")
                        .help("text | csv | json"),
                )
                .arg(
                    Arg::new("out-dir")
                        .long("out-dir")
                        .help("Directory to write into"),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(Command::new("list"))
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                )
                .subcommand(Command::new("unset").arg(Arg::new("key").required(true))),
        )
}
