// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn tx_command() -> Command {
    Command::new("tx")
        .about("Record, list and remove transactions")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record an income or expense")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .value_parser(["income", "expense"]),
                )
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("note").long("note"))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD, 'YYYY-MM-DD HH:MM' or RFC 3339; defaults to now"),
                )
                .arg(
                    Arg::new("create-category")
                        .long("create-category")
                        .action(ArgAction::SetTrue)
                        .help("Create an unknown expense category (no limit) first"),
                ),
        )
        .subcommand(json_args(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["income", "expense"]),
                )
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("rm")
                .about("Remove a transaction by id")
                .arg(Arg::new("id").required(true)),
        )
}

fn category_command() -> Command {
    Command::new("category")
        .about("Manage spending categories")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .help("Monthly budget limit, 0 for none"),
                )
                .arg(Arg::new("color").long("color").help("#rgb or #rrggbb"))
                .arg(Arg::new("icon").long("icon")),
        )
        .subcommand(json_args(Command::new("list")))
        .subcommand(
            Command::new("edit")
                .arg(Arg::new("category").required(true).help("Id or name"))
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("limit").long("limit"))
                .arg(Arg::new("color").long("color"))
                .arg(Arg::new("icon").long("icon")),
        )
        .subcommand(
            Command::new("rm")
                .about("Remove a category that no transaction uses")
                .arg(Arg::new("category").required(true).help("Id or name")),
        )
}

fn report_command() -> Command {
    Command::new("report")
        .about("Aggregated views of the ledger")
        .subcommand_required(true)
        .subcommand(json_args(
            Command::new("calendar")
                .about("Daily income/expense for a month")
                .arg(Arg::new("month").long("month").help("YYYY-MM; defaults to current")),
        ))
        .subcommand(json_args(
            Command::new("day")
                .about("Transactions recorded on one day")
                .arg(Arg::new("date").long("date").required(true)),
        ))
        .subcommand(json_args(
            Command::new("trend")
                .about("Expenses over the last seven days")
                .arg(Arg::new("today").long("today").help("YYYY-MM-DD; defaults to today")),
        ))
        .subcommand(json_args(
            Command::new("monthly")
                .about("Income, expense and net per month of a year")
                .arg(
                    Arg::new("year")
                        .long("year")
                        .value_parser(value_parser!(i32)),
                ),
        ))
        .subcommand(json_args(
            Command::new("breakdown").about("Spending per category"),
        ))
        .subcommand(json_args(
            Command::new("budget").about("Spending against category limits"),
        ))
}

pub fn build_cli() -> Command {
    Command::new("budgetbook")
        .version(crate_version!())
        .about("Personal income/expense ledger with category budgets")
        .subcommand(Command::new("init").about("Create the database and show where it lives"))
        .subcommand(tx_command())
        .subcommand(category_command())
        .subcommand(json_args(
            Command::new("summary").about("Balance, total income and total expenses"),
        ))
        .subcommand(report_command())
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check the ledger for dangling references"))
        .subcommand(
            Command::new("reset")
                .about("Delete all transactions and restore the default categories")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Confirm the reset"),
                ),
        )
}
