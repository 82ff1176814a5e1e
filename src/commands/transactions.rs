// Copyright (c) 2025 Moniledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::require_login;
use crate::models::{Transaction, TxKind};
use crate::store;
use crate::utils::{fmt_datetime, fmt_money, parse_amount, parse_date, pretty_table};
use anyhow::{bail, Result};
use chrono::Local;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
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
    let now = Local::now().naive_local();

    let wallet = store::with_document_mut(conn, &user, |doc| {
        let wallet = doc.selected_wallet.clone();
        let id = doc.mint_id();
        let Some(w) = doc.wallet_mut(&wallet) else {
            bail!("Active wallet '{}' does not exist", wallet);
        };
        w.apply(Transaction {
            id,
            kind,
            amount,
            category: category.clone(),
            note: note.clone(),
            wallet: wallet.clone(),
            created_at: now,
        });
        Ok(wallet)
    })?;
    println!(
        "Recorded {} of {} in '{}' ({})",
        kind,
        fmt_money(&amount),
        wallet,
        category
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = require_login(conn)?;
    let doc = store::load_document(conn, &user)?
        .ok_or_else(|| store::StoreError::UnknownUser(user.clone()))?;

    let category = sub.get_one::<String>("category");
    let from = sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?;
    let to = sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;
    let search = sub.get_one::<String>("search").map(|s| s.to_lowercase());
    let limit = sub.get_one::<usize>("limit").copied();

    let Some(wallet) = doc.active_wallet() else {
        println!("No active wallet");
        return Ok(());
    };

    let mut rows = Vec::new();
    for t in &wallet.transactions {
        if let Some(cat) = category {
            if &t.category != cat {
                continue;
            }
        }
        if let Some(q) = &search {
            let hay = format!("{} {}", t.category, t.note.as_deref().unwrap_or(""))
                .to_lowercase();
            if !hay.contains(q) {
                continue;
            }
        }
        let d = t.created_at.date();
        if from.is_some_and(|f| d < f) || to.is_some_and(|u| d > u) {
            continue;
        }
        let signed = match t.kind {
            TxKind::Income => format!("+{}", fmt_money(&t.amount)),
            TxKind::Expense => format!("-{}", fmt_money(&t.amount)),
        };
        rows.push(vec![
            t.id.to_string(),
            fmt_datetime(&t.created_at),
            t.category.clone(),
            t.note.clone().unwrap_or_default(),
            signed,
        ]);
        if limit.is_some_and(|n| rows.len() >= n) {
            break;
        }
    }
    println!(
        "{}",
        pretty_table(&["Id", "Date", "Category", "Note", "Amount"], rows)
    );
    Ok(())
}

fn rm(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = require_login(conn)?;
    let id = *sub.get_one::<u64>("id").unwrap();
    store::with_document_mut(conn, &user, |doc| {
        let wallet = doc.selected_wallet.clone();
        let Some(w) = doc.wallet_mut(&wallet) else {
            bail!("Active wallet '{}' does not exist", wallet);
        };
        if w.revert(id).is_none() {
            bail!("No transaction {} in wallet '{}'", id, wallet);
        }
        Ok(())
    })?;
    println!("Removed transaction {}", id);
    Ok(())
}
