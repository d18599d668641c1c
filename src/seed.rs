// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Seed data import.
//!
//! Pre-loads a [`UserDirectory`] from a CSV file before the interactive
//! session starts.
//!
//! # CSV Format
//!
//! ```csv
//! user,kind,amount,currency,rate,category,note,date
//! alice,income,1500,USD,1.0,Salary,Acme Corp,2024-03-01
//! alice,expense,42.50,EUR,1.08,Food,Groceries,2024-03-02T18:30:00Z
//! alice,limit,300,,,Food,,
//! ```
//!
//! - `kind`: `income`, `expense` or `limit` (case-insensitive)
//! - `currency`/`rate`: default to the user's base currency when empty
//! - `date`: RFC 3339 or `YYYY-MM-DD` (local midnight); defaults to now
//!
//! Unknown users are created with the session base currency. Rows that
//! do not parse, carry a non-positive amount or rate, or would overflow the
//! user's running totals are skipped.

use crate::base::{Category, CategoryKind, Currency};
use crate::directory::UserDirectory;
use crate::ledger::Ledger;
use crate::transaction::local_day_start;
use chrono::{DateTime, NaiveDate, Utc};
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use tracing::{debug, warn};

/// Outcome of a seed import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub applied: usize,
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
struct SeedRecord {
    user: String,
    kind: String,
    amount: Decimal,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    rate: Option<Decimal>,
    #[serde(default)]
    category: String,
    #[serde(default)]
    note: String,
    #[serde(default)]
    date: Option<String>,
}

enum SeedEntry {
    Income(Entry),
    Expense(Entry),
    Limit { category: String, limit: Decimal },
}

struct Entry {
    amount: Decimal,
    date: DateTime<Utc>,
    category: Category,
    currency: Option<Currency>,
    note: String,
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(local_day_start)
        })
}

impl SeedRecord {
    /// Validates the record.
    ///
    /// Returns `None` for unknown kinds, non-positive values or bad dates.
    fn into_entry(self) -> Option<SeedEntry> {
        if self.user.is_empty() || self.amount <= Decimal::ZERO {
            return None;
        }

        let kind = self.kind.to_lowercase();
        if kind == "limit" {
            return Some(SeedEntry::Limit {
                category: self.category,
                limit: self.amount,
            });
        }

        // A code without a rate (or the reverse) is rejected.
        let currency = match (self.currency, self.rate) {
            (None, None) => None,
            (Some(code), Some(rate)) if rate > Decimal::ZERO => Some(Currency::new(code, rate)),
            _ => return None,
        };
        let date = match self.date {
            Some(raw) => parse_date(&raw)?,
            None => Utc::now(),
        };
        let category_kind = match kind.as_str() {
            "income" => CategoryKind::Income,
            "expense" => CategoryKind::Expense,
            _ => return None,
        };
        let entry = Entry {
            amount: self.amount,
            date,
            category: Category::new(self.category, category_kind),
            currency,
            note: self.note,
        };

        Some(match category_kind {
            CategoryKind::Income => SeedEntry::Income(entry),
            CategoryKind::Expense => SeedEntry::Expense(entry),
        })
    }
}

fn fits(ledger: &Ledger, entry: &Entry) -> bool {
    let currency = entry.currency.as_ref().unwrap_or(ledger.base_currency());
    ledger.accepts(entry.category.kind(), entry.amount, &entry.category, currency)
}

/// Applies every valid row of `reader` to `directory`.
///
/// # Errors
///
/// Returns a CSV error only when the underlying reader fails. Malformed
/// rows are logged and counted in [`SeedSummary::skipped`].
pub fn load_seed<R: Read>(
    reader: R,
    directory: &mut UserDirectory,
    base_currency: &Currency,
) -> Result<SeedSummary, csv::Error> {
    let mut summary = SeedSummary::default();

    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    for (row, result) in rdr.deserialize::<SeedRecord>().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e),
            Err(e) => {
                warn!(row = row + 1, error = %e, "skipping malformed seed row");
                summary.skipped += 1;
                continue;
            }
        };

        let user = record.user.clone();
        let Some(entry) = record.into_entry() else {
            warn!(row = row + 1, "skipping invalid seed row");
            summary.skipped += 1;
            continue;
        };

        // Fails without side effects when the user already exists.
        if directory.create_user(user.as_str(), base_currency.clone()).is_ok() {
            debug!(user = %user, "user created from seed");
        }
        let Ok(ledger) = directory.get_user(&user) else {
            summary.skipped += 1;
            continue;
        };

        match entry {
            SeedEntry::Income(e) | SeedEntry::Expense(e) if !fits(ledger, &e) => {
                warn!(row = row + 1, user = %user, "skipping seed row, amount too large to track");
                summary.skipped += 1;
                continue;
            }
            SeedEntry::Income(e) => {
                let currency = e.currency.unwrap_or_else(|| ledger.base_currency().clone());
                ledger.record_income(e.amount, e.date, e.category, currency, e.note);
            }
            SeedEntry::Expense(e) => {
                let currency = e.currency.unwrap_or_else(|| ledger.base_currency().clone());
                ledger.record_expense(e.amount, e.date, e.category, currency, e.note);
            }
            SeedEntry::Limit { category, limit } => ledger.set_category_limit(category, limit),
        }
        summary.applied += 1;
    }

    Ok(summary)
}
