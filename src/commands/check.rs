// Copyright (c) 2025 Moniledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::evaluator::{evaluate, Evaluation};
use crate::notify::{occurrence_message, ConsoleSink, NotificationSink};
use crate::store;
use crate::utils::parse_datetime;
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use rusqlite::{Connection, TransactionBehavior};

/// Outcome reported to whatever invokes the periodic check, mirroring the
/// tri-state a background-fetch host expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    NoData,
    NewData,
    Failed,
}

impl CheckResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckResult::NoData => "no-data",
            CheckResult::NewData => "new-data",
            CheckResult::Failed => "failed",
        }
    }
}

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let now = match m.get_one::<String>("now") {
        Some(s) => parse_datetime(s)?,
        None => Local::now().naive_local(),
    };
    match run(conn, now, &ConsoleSink) {
        Ok(result) => {
            println!("{}", result.as_str());
            Ok(())
        }
        Err(err) => {
            // Keep the tri-state line for whatever parses stdout, then let the
            // cause escape so the process exits nonzero.
            println!("{}", CheckResult::Failed.as_str());
            Err(err)
        }
    }
}

/// One evaluation cycle: resolve the session user, evaluate their schedules,
/// persist the document if it changed, then surface notifications.
///
/// Notifications go out only after the commit returns, so a sink failure can
/// never abort a balance write and a persistence failure never produces a
/// notification for state that was rolled back. Errors carry their cause to
/// the caller; the next trigger simply retries the whole cycle.
pub fn run(
    conn: &mut Connection,
    now: NaiveDateTime,
    sink: &dyn NotificationSink,
) -> Result<CheckResult> {
    match cycle(conn, now)? {
        None => Ok(CheckResult::NoData),
        Some(eval) => {
            for name in &eval.missing_wallets {
                eprintln!("warning: schedule targets missing wallet '{}'; occurrence dropped", name);
            }
            if !eval.changed {
                return Ok(CheckResult::NoData);
            }
            for occ in &eval.applied {
                let (title, body) = occurrence_message(occ);
                sink.notify(&title, &body);
            }
            Ok(CheckResult::NewData)
        }
    }
}

fn cycle(conn: &mut Connection, now: NaiveDateTime) -> Result<Option<Evaluation>> {
    let Some(user) = store::current_user(conn)? else {
        return Ok(None);
    };

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    // Read the mode inside the transaction so a concurrent `config catch-up`
    // cannot split one evaluation window across two settings.
    let mode = store::get_catch_up_mode(&tx)?;
    let Some(mut doc) = store::load_document(&tx, &user)? else {
        return Ok(None);
    };
    let eval = evaluate(now, &mut doc, mode);
    if eval.changed {
        store::save_document(&tx, &user, &doc)?;
    }
    tx.commit()?;
    Ok(Some(eval))
}
