// Copyright (c) 2025 Moniledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::evaluator::CatchUpMode;
use crate::store;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("catch-up", sub)) => match sub.get_one::<String>("mode") {
            Some(mode) => {
                let mode: CatchUpMode = mode.parse().map_err(anyhow::Error::msg)?;
                store::set_catch_up_mode(conn, mode)?;
                println!("Catch-up mode set to {}", mode);
            }
            None => {
                println!("{}", store::get_catch_up_mode(conn)?);
            }
        },
        _ => {}
    }
    Ok(())
}
