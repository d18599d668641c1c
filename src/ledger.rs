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

//! Per-user ledger.
//!
//! A [`Ledger`] owns an append-only list of transactions together with the
//! per-category spending limits and the spend accumulated against them.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use finance_tracker::{Category, Currency, Ledger};
//! use rust_decimal_macros::dec;
//!
//! let mut ledger = Ledger::new("alice", Currency::base("USD"));
//! ledger.record_income(dec!(100), Utc::now(), Category::income("Salary"), Currency::base("USD"), "Acme");
//! ledger.record_expense(dec!(30), Utc::now(), Category::expense("Food"), Currency::base("USD"), "Groceries");
//! assert_eq!(ledger.balance(), dec!(70));
//! ```

use crate::base::{Category, CategoryKind, Currency};
use crate::transaction::Transaction;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// One row of [`Ledger::budget_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetLine<'a> {
    pub category: &'a str,
    pub limit: Decimal,
    pub spent: Decimal,
    pub over_limit: bool,
}

/// Transactions and budget tracking for a single user.
///
/// # Invariants
///
/// - Transactions are kept in insertion order and never removed.
/// - `category_expenses[c]` is the sum of face amounts (not base-converted)
///   of every expense recorded under category name `c`.
#[derive(Debug, Clone)]
pub struct Ledger {
    owner: String,
    base_currency: Currency,
    transactions: Vec<Transaction>,
    category_limits: BTreeMap<String, Decimal>,
    category_expenses: BTreeMap<String, Decimal>,
}

impl Ledger {
    /// Decimal places used when presenting aggregated values.
    pub const DECIMAL_PRECISION: u32 = 4;

    pub fn new(owner: impl Into<String>, base_currency: Currency) -> Self {
        Self {
            owner: owner.into(),
            base_currency,
            transactions: Vec::new(),
            category_limits: BTreeMap::new(),
            category_expenses: BTreeMap::new(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn base_currency(&self) -> &Currency {
        &self.base_currency
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    fn assert_invariants(&self, category: &str) {
        debug_assert_eq!(
            self.category_expense(category),
            self.transactions
                .iter()
                .filter(|tx| matches!(tx, Transaction::Expense { .. }))
                .filter(|tx| tx.category().name() == category)
                .map(Transaction::amount)
                .sum::<Decimal>(),
            "Invariant violated: tracked spend for '{category}' drifted from recorded expenses"
        );
    }

    fn warn_on_kind_mismatch(&self, category: &Category, expected: CategoryKind) {
        if category.kind() != expected {
            warn!(
                owner = %self.owner,
                category = category.name(),
                kind = %category.kind(),
                "recording {expected} under a category of a different kind"
            );
        }
    }

    /// Appends an income record.
    pub fn record_income(
        &mut self,
        amount: Decimal,
        date: DateTime<Utc>,
        category: Category,
        currency: Currency,
        source: impl Into<String>,
    ) {
        self.warn_on_kind_mismatch(&category, CategoryKind::Income);
        debug!(owner = %self.owner, %amount, currency = currency.code(), category = category.name(), "income recorded");
        self.transactions
            .push(Transaction::income(amount, date, category, currency, source));
    }

    /// Appends an expense record and adds its face amount to the spend
    /// tracked for its category name.
    pub fn record_expense(
        &mut self,
        amount: Decimal,
        date: DateTime<Utc>,
        category: Category,
        currency: Currency,
        description: impl Into<String>,
    ) {
        self.warn_on_kind_mismatch(&category, CategoryKind::Expense);
        debug!(owner = %self.owner, %amount, currency = currency.code(), category = category.name(), "expense recorded");

        let name = category.name().to_owned();
        *self
            .category_expenses
            .entry(name.clone())
            .or_insert(Decimal::ZERO) += amount;
        self.transactions.push(Transaction::expense(
            amount,
            date,
            category,
            currency,
            description,
        ));
        self.assert_invariants(&name);
    }

    /// Whether a record of `variant` for `amount` in `currency` under
    /// `category` keeps every aggregate representable.
    ///
    /// Recording is infallible, so callers check this first; an overflowing
    /// total or category spend would otherwise panic on the next query.
    pub fn accepts(
        &self,
        variant: CategoryKind,
        amount: Decimal,
        category: &Category,
        currency: &Currency,
    ) -> bool {
        let Some(base) = amount.checked_mul(currency.rate_to_base()) else {
            return false;
        };
        if self.total_for(category.kind()).checked_add(base).is_none() {
            return false;
        }
        variant == CategoryKind::Income
            || self
                .category_expense(category.name())
                .checked_add(amount)
                .is_some()
    }

    fn total_for(&self, kind: CategoryKind) -> Decimal {
        self.transactions
            .iter()
            .filter(|tx| tx.category().kind() == kind)
            .map(Transaction::amount_in_base_currency)
            .sum()
    }

    /// Base-converted sum over transactions whose category is an income kind.
    pub fn total_income(&self) -> Decimal {
        self.total_for(CategoryKind::Income)
    }

    /// Base-converted sum over transactions whose category is an expense kind.
    pub fn total_expenses(&self) -> Decimal {
        self.total_for(CategoryKind::Expense)
    }

    pub fn balance(&self) -> Decimal {
        self.total_income() - self.total_expenses()
    }

    /// All transactions in insertion order.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// Transactions whose category name equals `name` exactly.
    pub fn transactions_by_category<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Transaction> {
        self.transactions
            .iter()
            .filter(move |tx| tx.category().name() == name)
    }

    /// Transactions dated within `start..=end`.
    pub fn transactions_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |tx| (start..=end).contains(&tx.date()))
    }

    /// Sets the limit for a category name, replacing any previous one.
    pub fn set_category_limit(&mut self, name: impl Into<String>, limit: Decimal) {
        let name = name.into();
        debug!(owner = %self.owner, category = %name, %limit, "category limit set");
        self.category_limits.insert(name, limit);
    }

    pub fn category_limit(&self, name: &str) -> Option<Decimal> {
        self.category_limits.get(name).copied()
    }

    /// Face-amount spend tracked for `name`, zero when nothing was recorded.
    pub fn category_expense(&self, name: &str) -> Decimal {
        self.category_expenses
            .get(name)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Spend against limit for every category that has a limit, ordered by
    /// category name. Categories without a limit are not reported.
    pub fn budget_status(&self) -> impl Iterator<Item = BudgetLine<'_>> {
        self.category_limits.iter().map(|(name, &limit)| {
            let spent = self.category_expense(name);
            BudgetLine {
                category: name,
                limit,
                spent,
                over_limit: spent > limit,
            }
        })
    }
}
