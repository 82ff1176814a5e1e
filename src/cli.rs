// Copyright (c) 2025 Moniledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("moniledger")
        .version(clap::crate_version!())
        .about("Multi-wallet personal finance tracker with scheduled recurring transactions")
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("signup")
                .about("Create an account and log in")
                .arg(Arg::new("username").required(true))
                .arg(Arg::new("password").required(true)),
        )
        .subcommand(
            Command::new("login")
                .about("Log in to an existing account")
                .arg(Arg::new("username").required(true))
                .arg(Arg::new("password").required(true)),
        )
        .subcommand(Command::new("logout").about("Clear the session"))
        .subcommand(Command::new("whoami").about("Show the logged-in user"))
        .subcommand(Command::new("balance").about("Show the active wallet balance"))
        .subcommand(
            Command::new("wallet")
                .about("Manage wallets")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Create a wallet and make it active")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(Command::new("list").about("List wallets and balances"))
                .subcommand(
                    Command::new("select")
                        .about("Switch the active wallet")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a wallet and its history")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage category labels")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add").arg(Arg::new("name").required(true)),
                )
                .subcommand(Command::new("list"))
                .subcommand(
                    Command::new("rm").arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions in the active wallet")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Record an income or expense")
                        .arg(Arg::new("kind").long("kind").required(true).help("income|expense"))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("from").long("from").help("YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("YYYY-MM-DD"))
                        .arg(Arg::new("search").long("search").help("Match category or note"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction, reversing its balance effect")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(u64))),
                ),
        )
        .subcommand(
            Command::new("schedule")
                .about("Manage scheduled transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Plan a one-time or repeating transaction")
                        .arg(Arg::new("kind").long("kind").required(true).help("income|expense"))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("note").long("note"))
                        .arg(Arg::new("wallet").long("wallet").help("Defaults to the active wallet"))
                        .arg(
                            Arg::new("cadence")
                                .long("cadence")
                                .default_value("monthly")
                                .help("once|daily|weekly|monthly"),
                        )
                        .arg(
                            Arg::new("start-date")
                                .long("start-date")
                                .required(true)
                                .help("YYYY-MM-DD"),
                        )
                        .arg(
                            Arg::new("start-time")
                                .long("start-time")
                                .default_value("09:00")
                                .help("HH:MM"),
                        ),
                )
                .subcommand(Command::new("list").about("List schedules"))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a schedule")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(u64))),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Evaluate due schedules for the logged-in user (cron entry point)")
                .arg(
                    Arg::new("now")
                        .long("now")
                        .help("Override the evaluation time (YYYY-MM-DDTHH:MM)"),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Inspect or change settings")
                .subcommand_required(true)
                .subcommand(
                    Command::new("catch-up")
                        .about("Show or set the missed-cycle catch-up mode")
                        .arg(Arg::new("mode").value_parser(["single", "exhaustive"])),
                ),
        )
        .subcommand(
            Command::new("reset")
                .about("Delete all wallets, transactions and schedules; the account survives")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Skip the confirmation"),
                ),
        )
}
