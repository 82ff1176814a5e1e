// Copyright (c) 2025 Moniledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::require_login;
use crate::models::{Cadence, Schedule, TxKind};
use crate::store;
use crate::utils::{fmt_datetime, fmt_money, parse_amount, parse_date, parse_time, pretty_table};
use anyhow::{bail, Result};
use chrono::Local;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", _)) => list(conn)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = require_login(conn)?;
    let kind: TxKind = sub
        .get_one::<String>("kind")
        .unwrap()
        .parse()
        .map_err(anyhow::Error::msg)?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().clone();
    let note = sub.get_one::<String>("note").cloned();
    let wallet_arg = sub.get_one::<String>("wallet").cloned();
    let cadence: Cadence = sub
        .get_one::<String>("cadence")
        .unwrap()
        .parse()
        .map_err(anyhow::Error::msg)?;
    let start_date = parse_date(sub.get_one::<String>("start-date").unwrap())?;
    let start_time = parse_time(sub.get_one::<String>("start-time").unwrap())?;
    let first_run = start_date.and_time(start_time);
    let now = Local::now().naive_local();

    let (wallet, known_wallet) = store::with_document_mut(conn, &user, |doc| {
        let wallet = wallet_arg.clone().unwrap_or_else(|| doc.selected_wallet.clone());
        let known = doc.wallet(&wallet).is_some();
        let sched = Schedule {
            id: doc.mint_id(),
            kind,
            amount,
            category: category.clone(),
            note: note.clone(),
            wallet: wallet.clone(),
            cadence,
            start_date,
            start_time,
            next_run_at: Some(first_run),
            completed: false,
            created_at: now,
        };
        doc.schedules.insert(0, sched);
        Ok((wallet, known))
    })?;

    println!(
        "Scheduled {} {} of {} in '{}', first run {}",
        cadence,
        kind,
        fmt_money(&amount),
        wallet,
        fmt_datetime(&first_run)
    );
    if !known_wallet {
        println!(
            "warning: wallet '{}' does not exist; due occurrences will be dropped until it is created",
            wallet
        );
    }
    Ok(())
}

fn list(conn: &Connection) -> Result<()> {
    let user = require_login(conn)?;
    let doc = store::load_document(conn, &user)?
        .ok_or_else(|| store::StoreError::UnknownUser(user.clone()))?;
    let rows = doc
        .schedules
        .iter()
        .map(|s| {
            let next = if s.completed {
                "done".to_string()
            } else {
                s.next_run_at
                    .map(|t| fmt_datetime(&t))
                    .unwrap_or_else(|| "?".to_string())
            };
            vec![
                s.id.to_string(),
                s.cadence.to_string(),
                s.kind.to_string(),
                fmt_money(&s.amount),
                s.category.clone(),
                s.wallet.clone(),
                next,
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Cadence", "Kind", "Amount", "Category", "Wallet", "Next run"],
            rows,
        )
    );
    Ok(())
}

fn rm(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = require_login(conn)?;
    let id = *sub.get_one::<u64>("id").unwrap();
    store::with_document_mut(conn, &user, |doc| {
        let Some(pos) = doc.schedules.iter().position(|s| s.id == id) else {
            bail!("No schedule {}", id);
        };
        doc.schedules.remove(pos);
        Ok(())
    })?;
    println!("Removed schedule {}", id);
    Ok(())
}
