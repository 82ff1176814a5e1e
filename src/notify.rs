// Copyright (c) 2025 Moniledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::evaluator::AppliedOccurrence;
use crate::models::TxKind;
use crate::utils::fmt_money;

/// Fire-and-forget message surface. Implementations swallow their own
/// failures; a dropped notification must never affect a balance write.
pub trait NotificationSink {
    fn notify(&self, title: &str, body: &str);
}

/// CLI stand-in for the platform notification center.
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, title: &str, body: &str) {
        println!("[{}] {}", title, body);
    }
}

/// Render an applied occurrence as a notification:
/// category, optional note, amount, wallet.
pub fn occurrence_message(occ: &AppliedOccurrence) -> (String, String) {
    let title = match occ.kind {
        TxKind::Income => "Scheduled income",
        TxKind::Expense => "Scheduled expense",
    };
    let label = match &occ.note {
        Some(note) if !note.is_empty() => format!("{} ({})", occ.category, note),
        _ => occ.category.clone(),
    };
    let body = format!("{} - {} ({})", label, fmt_money(&occ.amount), occ.wallet);
    (title.to_string(), body)
}
