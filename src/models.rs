// Copyright (c) 2025 Moniledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wallet created at signup. Cannot be deleted.
pub const DEFAULT_WALLET: &str = "Main";

pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Food",
    "Transport",
    "Shopping",
    "Entertainment",
    "Bills",
    "Salary",
    "Savings",
    "Other",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    /// Signed effect of `amount` on a wallet balance.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            TxKind::Income => amount,
            TxKind::Expense => -amount,
        }
    }
}

impl FromStr for TxKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(TxKind::Income),
            "expense" | "out" => Ok(TxKind::Expense),
            other => Err(format!("unknown kind '{}', expected income|expense", other)),
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxKind::Income => write!(f, "income"),
            TxKind::Expense => write!(f, "expense"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Once,
    Daily,
    Weekly,
    Monthly,
}

impl FromStr for Cadence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "once" => Ok(Cadence::Once),
            "daily" => Ok(Cadence::Daily),
            "weekly" => Ok(Cadence::Weekly),
            "monthly" => Ok(Cadence::Monthly),
            other => Err(format!(
                "unknown cadence '{}', expected once|daily|weekly|monthly",
                other
            )),
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cadence::Once => write!(f, "once"),
            Cadence::Daily => write!(f, "daily"),
            Cadence::Weekly => write!(f, "weekly"),
            Cadence::Monthly => write!(f, "monthly"),
        }
    }
}

/// A posted ledger entry. Immutable once created; deleting it through
/// [`Wallet::revert`] is the only mutation it ever sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub kind: TxKind,
    pub amount: Decimal,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub wallet: String,
    pub created_at: NaiveDateTime,
}

/// A planned transaction, one-time or repeating.
///
/// `completed` is only ever true for `once` schedules whose single occurrence
/// has been applied. For live schedules `next_run_at` holds the due time of
/// the occurrence that has not been applied yet. It is optional only so that
/// a hand-edited blob missing the field deserializes and gets skipped instead
/// of failing the whole document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: u64,
    pub kind: TxKind,
    pub amount: Decimal,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub wallet: String,
    pub cadence: Cadence,
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    #[serde(default)]
    pub next_run_at: Option<NaiveDateTime>,
    pub completed: bool,
    pub created_at: NaiveDateTime,
}

/// One named wallet: a balance plus its transaction history, newest first.
///
/// Invariant: `balance` is the signed sum of `transactions`. Both fields are
/// only mutated together, through [`Wallet::apply`] and [`Wallet::revert`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub name: String,
    pub balance: Decimal,
    pub transactions: Vec<Transaction>,
}

impl Wallet {
    pub fn new(name: impl Into<String>) -> Self {
        Wallet {
            name: name.into(),
            balance: Decimal::ZERO,
            transactions: Vec::new(),
        }
    }

    /// Post a transaction: prepend it and move the balance.
    pub fn apply(&mut self, tx: Transaction) {
        self.balance += tx.kind.signed(tx.amount);
        self.transactions.insert(0, tx);
    }

    /// Remove a transaction by id, reversing its balance effect.
    pub fn revert(&mut self, id: u64) -> Option<Transaction> {
        let pos = self.transactions.iter().position(|t| t.id == id)?;
        let tx = self.transactions.remove(pos);
        self.balance -= tx.kind.signed(tx.amount);
        Some(tx)
    }
}

/// The whole persisted state of one account, stored as a single JSON blob
/// keyed by username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    pub password: String,
    pub wallets: Vec<Wallet>,
    pub schedules: Vec<Schedule>,
    pub selected_wallet: String,
    pub categories: Vec<String>,
    #[serde(default = "first_id")]
    pub next_id: u64,
}

fn first_id() -> u64 {
    1
}

impl UserDocument {
    pub fn new(password: impl Into<String>) -> Self {
        UserDocument {
            password: password.into(),
            wallets: vec![Wallet::new(DEFAULT_WALLET)],
            schedules: Vec::new(),
            selected_wallet: DEFAULT_WALLET.to_string(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            next_id: 1,
        }
    }

    pub fn mint_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn wallet(&self, name: &str) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.name == name)
    }

    pub fn wallet_mut(&mut self, name: &str) -> Option<&mut Wallet> {
        self.wallets.iter_mut().find(|w| w.name == name)
    }

    /// The wallet the selection pointer names. Present for any document this
    /// crate minted; the pointer is repaired on every wallet removal.
    pub fn active_wallet(&self) -> Option<&Wallet> {
        self.wallet(&self.selected_wallet)
    }

    /// Create a wallet and make it the active one. Returns false if the name
    /// is taken.
    pub fn add_wallet(&mut self, name: &str) -> bool {
        if self.wallet(name).is_some() {
            return false;
        }
        self.wallets.push(Wallet::new(name));
        self.selected_wallet = name.to_string();
        true
    }

    pub fn select_wallet(&mut self, name: &str) -> bool {
        if self.wallet(name).is_none() {
            return false;
        }
        self.selected_wallet = name.to_string();
        true
    }

    /// Delete a wallet and its history. The default wallet is refused, and a
    /// dangling selection pointer is repaired, preferring the default wallet
    /// over the first remaining one.
    pub fn remove_wallet(&mut self, name: &str) -> bool {
        if name == DEFAULT_WALLET {
            return false;
        }
        let Some(pos) = self.wallets.iter().position(|w| w.name == name) else {
            return false;
        };
        self.wallets.remove(pos);
        if self.selected_wallet == name {
            self.selected_wallet = if self.wallet(DEFAULT_WALLET).is_some() {
                DEFAULT_WALLET.to_string()
            } else {
                self.wallets
                    .first()
                    .map(|w| w.name.clone())
                    .unwrap_or_else(|| DEFAULT_WALLET.to_string())
            };
        }
        true
    }

    /// Add a category label; uniqueness is case-insensitive.
    pub fn add_category(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.categories.iter().any(|c| c.eq_ignore_ascii_case(name)) {
            return false;
        }
        self.categories.push(name.to_string());
        true
    }

    pub fn remove_category(&mut self, name: &str) -> bool {
        let Some(pos) = self
            .categories
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
        else {
            return false;
        };
        self.categories.remove(pos);
        true
    }

    /// Full-data reset: back to the single default wallet, schedules cleared.
    /// The account itself and its categories survive.
    pub fn reset(&mut self) {
        self.wallets = vec![Wallet::new(DEFAULT_WALLET)];
        self.selected_wallet = DEFAULT_WALLET.to_string();
        self.schedules.clear();
    }
}
