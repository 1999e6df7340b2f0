// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{DATA_DIR_ENV, RESERVE_ENV};
use clap::{Arg, ArgAction, Command, command, value_parser};

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true).help("Row id")
}

fn amount_arg(required: bool) -> Arg {
    Arg::new("amount")
        .long("amount")
        .required(required)
        .allow_hyphen_values(true)
        .help("Amount, e.g. 12.50 or $ 3.00 (no decimal point = whole units)")
}

fn date_arg() -> Arg {
    Arg::new("date")
        .long("date")
        .help("YYYY-MM-DD (defaults to today)")
}

fn json_flags(cmd: Command) -> Command {
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
            .help("Print one JSON object per line"),
    )
}

fn entry_cmd(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(Arg::new("name").long("name").required(true))
        .arg(amount_arg(true))
        .arg(date_arg())
}

pub fn build_cli() -> Command {
    command!()
        .name("periodledger")
        .about("Month-by-month personal ledger with recurring transactions")
        .arg(
            Arg::new("data_dir")
                .long("data-dir")
                .global(true)
                .env(DATA_DIR_ENV)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Directory holding the period files"),
        )
        .arg(
            Arg::new("reserve")
                .long("reserve")
                .global(true)
                .env(RESERVE_ENV)
                .value_parser(value_parser!(u8).range(0..=100))
                .help("Percent of the balance held back from the spendable figure"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Path to config.json"),
        )
        .subcommand(Command::new("init").about("Create the data directory and current period"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .about("Add an account")
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List accounts")))
                .subcommand(
                    Command::new("use")
                        .about("Show an account's balance and transactions")
                        .arg(id_arg()),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .arg(
                    Arg::new("account")
                        .long("account")
                        .global(true)
                        .help("Account id (defaults to the first account)"),
                )
                .subcommand(entry_cmd("deposit", "Record a deposit"))
                .subcommand(entry_cmd("debit", "Record a debit"))
                .subcommand(
                    Command::new("edit")
                        .about("Change a transaction's name or amount")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(amount_arg(false).help(
                            "New amount; a debit stays a debit unless the amount is negative",
                        )),
                )
                .subcommand(Command::new("rm").about("Delete a transaction").arg(id_arg()))
                .subcommand(json_flags(
                    Command::new("list").about("List transactions").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                )),
        )
        .subcommand(
            Command::new("recurring")
                .about("Manage recurring templates")
                .arg(
                    Arg::new("account")
                        .long("account")
                        .global(true)
                        .help("Account id (defaults to the first account)"),
                )
                .subcommand(
                    Command::new("add")
                        .about("Add a recurring template")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(amount_arg(true))
                        .arg(Arg::new("day").long("day").required(true).help("Day of month, 1-28")),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Change a recurring template")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(amount_arg(false))
                        .arg(Arg::new("day").long("day")),
                )
                .subcommand(Command::new("rm").about("Delete a recurring template").arg(id_arg()))
                .subcommand(json_flags(Command::new("list").about("List recurring templates")))
                .subcommand(
                    Command::new("apply")
                        .about("Record a recurring template as a transaction")
                        .arg(id_arg())
                        .arg(date_arg()),
                ),
        )
        .subcommand(json_flags(
            Command::new("balance")
                .about("Show the current balance")
                .arg(Arg::new("account").long("account")),
        ))
        .subcommand(
            Command::new("period")
                .about("Inspect and advance accounting periods")
                .subcommand(Command::new("show").about("Show the active period"))
                .subcommand(Command::new("list").about("List periods on disk"))
                .subcommand(
                    Command::new("next")
                        .about("Roll an account over into the next period")
                        .arg(
                            Arg::new("account")
                                .long("account")
                                .help("Account id to carry (defaults to the first account)"),
                        )
                        .arg(date_arg()),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export the active period")
                .subcommand(
                    Command::new("transactions")
                        .about("Export transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv or json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("menu").about("Interactive menu"))
}
