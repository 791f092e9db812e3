// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON document per line"),
    )
}

fn query_arg() -> Arg {
    Arg::new("query")
        .long("query")
        .short('q')
        .help("Search query, e.g. 'coffee OR (amount>20 AND NOT category=gas)'")
}

pub fn build_cli() -> Command {
    Command::new("spendlens")
        .about("Search and categorize a personal transaction ledger")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Create the store and seed the default dictionary"))
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction and categorize it")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, optionally filtered by a query")
                        .arg(query_arg()),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Edit a transaction; the category is re-resolved")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("amount").long("amount").allow_hyphen_values(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(
                    Command::new("categorize")
                        .about("Assign a category by hand, optionally teaching a keyword")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("keyword").long("keyword")),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Keyword dictionary")
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("keyword")
                                .long("keyword")
                                .action(ArgAction::Append),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List categories")))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category")
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("keyword")
                        .about("Append a keyword to a category")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("keyword").long("keyword").required(true)),
                )
                .subcommand(
                    Command::new("apply").about("Re-categorize every transaction in the ledger"),
                ),
        )
        .subcommand(
            Command::new("import").about("Import data").subcommand(
                Command::new("transactions")
                    .about("Import transactions from a CSV with date,description,amount columns")
                    .arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(
            Command::new("report").about("Reports").subcommand(json_flags(
                Command::new("summary")
                    .about("Totals per category, optionally over a query")
                    .arg(query_arg()),
            )),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .about("Export the ledger")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true))
                    .arg(query_arg()),
            ),
        )
        .subcommand(
            Command::new("config")
                .about("Settings")
                .subcommand(Command::new("show").about("Show settings"))
                .subcommand(
                    Command::new("set-threshold")
                        .about("Minimum name similarity (0..1) for fuzzy category matches")
                        .arg(
                            Arg::new("value")
                                .long("value")
                                .required(true)
                                .value_parser(value_parser!(f64)),
                        ),
                ),
        )
}
