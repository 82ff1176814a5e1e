// Copyright (c) 2025 Moniledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Cadence, Schedule, Transaction, TxKind, UserDocument};
use crate::recur::next_occurrence;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// How to handle schedules whose due time is more than one period in the
/// past, e.g. a daily schedule evaluated after a three-day gap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatchUpMode {
    /// Advance exactly one period per evaluation pass. Under-applies after
    /// long gaps; the remaining periods are picked up one per pass.
    Single,
    /// Apply one occurrence per missed period until the schedule is ahead of
    /// the evaluation time.
    #[default]
    Exhaustive,
}

impl CatchUpMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatchUpMode::Single => "single",
            CatchUpMode::Exhaustive => "exhaustive",
        }
    }
}

impl FromStr for CatchUpMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(CatchUpMode::Single),
            "exhaustive" => Ok(CatchUpMode::Exhaustive),
            other => Err(format!(
                "unknown catch-up mode '{}', expected single|exhaustive",
                other
            )),
        }
    }
}

impl fmt::Display for CatchUpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One applied firing of a schedule, handed to the notification sink by the
/// caller after the document write commits.
#[derive(Debug, Clone)]
pub struct AppliedOccurrence {
    pub kind: TxKind,
    pub amount: Decimal,
    pub category: String,
    pub note: Option<String>,
    pub wallet: String,
}

/// Result of one evaluation pass.
#[derive(Debug, Default)]
pub struct Evaluation {
    pub applied: Vec<AppliedOccurrence>,
    /// Wallet names referenced by due schedules but absent from the document.
    pub missing_wallets: Vec<String>,
    /// True if the document was mutated and needs to be written back.
    pub changed: bool,
}

/// Scan all schedules in list order and apply every due occurrence.
///
/// The evaluator never fails: malformed records (no due time) and dangling
/// wallet references are skipped, not raised. It also performs no I/O; the
/// caller owns persisting the mutated document and forwarding the applied
/// occurrences to the notification sink.
///
/// A due schedule targeting a missing wallet still advances (or completes),
/// so it cannot fire again for the same period and cannot wedge forever; no
/// transaction is created and no wallet springs into existence.
///
/// Once every live schedule is ahead of `now`, another call with the same
/// `now` returns `changed = false` and leaves the document untouched.
pub fn evaluate(now: NaiveDateTime, doc: &mut UserDocument, mode: CatchUpMode) -> Evaluation {
    let mut out = Evaluation::default();

    // Schedules move out of the document for the scan so that wallets and the
    // id counter stay reachable through `doc` while each record is advanced.
    let mut schedules = std::mem::take(&mut doc.schedules);
    for sched in schedules.iter_mut() {
        if sched.completed {
            continue;
        }
        let Some(due) = sched.next_run_at else {
            continue;
        };
        if now < due {
            continue;
        }

        loop {
            apply_occurrence(now, doc, sched, &mut out);
            out.changed = true;

            if sched.cadence == Cadence::Once {
                sched.completed = true;
                break;
            }
            let next = sched
                .next_run_at
                .map(|t| next_occurrence(t, sched.cadence))
                .unwrap_or(now);
            sched.next_run_at = Some(next);
            if mode == CatchUpMode::Single || next > now {
                break;
            }
        }
    }
    doc.schedules = schedules;
    out
}

fn apply_occurrence(
    now: NaiveDateTime,
    doc: &mut UserDocument,
    sched: &Schedule,
    out: &mut Evaluation,
) {
    if doc.wallet(&sched.wallet).is_none() {
        if !out.missing_wallets.contains(&sched.wallet) {
            out.missing_wallets.push(sched.wallet.clone());
        }
        return;
    }
    // Mint only once the wallet is known, so a dangling schedule never
    // consumes ids.
    let id = doc.mint_id();
    if let Some(wallet) = doc.wallet_mut(&sched.wallet) {
        // Stamped at evaluation time, not the theoretical due time.
        wallet.apply(Transaction {
            id,
            kind: sched.kind,
            amount: sched.amount,
            category: sched.category.clone(),
            note: sched.note.clone(),
            wallet: sched.wallet.clone(),
            created_at: now,
        });
        out.applied.push(AppliedOccurrence {
            kind: sched.kind,
            amount: sched.amount,
            category: sched.category.clone(),
            note: sched.note.clone(),
            wallet: sched.wallet.clone(),
        });
    }
}
