// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn expense_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("amount")
            .long("amount")
            .required(required)
            .allow_hyphen_values(true)
            .help("Amount, e.g. 250 or 1,250.50"),
    )
    .arg(
        Arg::new("category")
            .long("category")
            .required(required)
            .help("Category name"),
    )
    .arg(Arg::new("date").long("date").help("YYYY-MM-DD (default: today)"))
    .arg(
        Arg::new("method")
            .long("method")
            .help("Payment method: UPI|Cash|Card (default: UPI)"),
    )
    .arg(Arg::new("desc").long("desc").help("Free-text description"))
}

pub fn build_cli() -> Command {
    Command::new("spendwise")
        .about("Track expenses and savings goals, and talk them over with the advisor")
        .version(clap::crate_version!())
        .arg(
            Arg::new("api")
                .long("api")
                .global(true)
                .help("Base URL of the finance API, e.g. http://localhost:5000/api"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .global(true)
                .value_parser(value_parser!(u64))
                .help("Request timeout in seconds"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output (-v info, -vv debug)"),
        )
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Totals, category split, monthly trend and goal progress")
                .arg(
                    Arg::new("period")
                        .long("period")
                        .default_value("all")
                        .help("week|month|year|all"),
                )
                .arg(
                    Arg::new("chronological")
                        .long("chronological")
                        .action(ArgAction::SetTrue)
                        .help("Sort the monthly trend by date instead of first appearance"),
                ),
        ))
        .subcommand(
            Command::new("expense")
                .about("Record and manage expenses")
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(expense_fields(Command::new("add"), true))
                .subcommand(expense_fields(
                    Command::new("edit").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                    false,
                ))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("export")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("deadline").long("deadline").required(true))
                        .arg(
                            Arg::new("priority")
                                .long("priority")
                                .default_value("medium")
                                .help("high|medium|low"),
                        ),
                )
                .subcommand(
                    Command::new("contribute")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        ),
                )
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Built-in and custom categories")
                .subcommand(Command::new("list"))
                .subcommand(
                    Command::new("add").arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("advisor")
                .about("Chat with the advisor (interactive unless `ask` is used)")
                .subcommand(
                    Command::new("ask").arg(
                        Arg::new("message")
                            .required(true)
                            .num_args(1..)
                            .trailing_var_arg(true),
                    ),
                ),
        )
        .subcommand(json_flags(
            Command::new("project")
                .about("Project spending from the last three months")
                .arg(
                    Arg::new("months")
                        .long("months")
                        .default_value("3")
                        .value_parser(value_parser!(u32)),
                ),
        ))
        .subcommand(
            Command::new("clear")
                .about("Delete ALL expenses and goals and reset the chat")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Skip the confirmation prompt"),
                ),
        )
        .subcommand(Command::new("doctor").about("Check the backend and the local data"))
        .subcommand(
            Command::new("config")
                .about("Show or change client configuration")
                .subcommand(Command::new("show"))
                .subcommand(Command::new("set-api").arg(Arg::new("url").required(true))),
        )
}
