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

//! # Finance Tracker
//!
//! This library provides the ledger model behind a console personal finance
//! tracker: several named users record incomes and expenses in any
//! currency, see balances converted to a base currency and watch per-category
//! spending against limits.
//!
//! ## Core Components
//!
//! - [`UserDirectory`]: Owns one ledger per username
//! - [`Ledger`]: Append-only transactions plus category limits and spend
//! - [`Transaction`]: Income or expense record
//! - [`Currency`] and [`Category`]: Value types attached to each record
//! - [`TrackerError`]: Error types for directory and input failures
//! - [`Session`]: Interactive text menu over a directory
//!
//! ## Example
//!
//! ```
//! use chrono::Utc;
//! use finance_tracker::{Category, Currency, UserDirectory};
//! use rust_decimal_macros::dec;
//!
//! let mut users = UserDirectory::new();
//! users.create_user("alice", Currency::base("USD")).unwrap();
//!
//! let ledger = users.get_user("alice").unwrap();
//! ledger.record_income(dec!(100), Utc::now(), Category::income("Salary"), Currency::new("EUR", dec!(2.0)), "Acme");
//! ledger.record_expense(dec!(50), Utc::now(), Category::expense("Food"), Currency::base("USD"), "Groceries");
//! ledger.set_category_limit("Food", dec!(40));
//!
//! assert_eq!(ledger.balance(), dec!(150));
//! assert!(ledger.budget_status().all(|line| line.over_limit));
//! ```
//!
//! ## Money
//!
//! Amounts, rates and limits are [`rust_decimal::Decimal`]. Category spend is
//! tracked in face amounts, while totals and balances are converted to the
//! base currency.

mod base;
mod directory;
pub mod error;
mod ledger;
pub mod menu;
pub mod seed;
mod transaction;

pub use base::{Category, CategoryKind, Currency};
pub use directory::UserDirectory;
pub use error::TrackerError;
pub use ledger::{BudgetLine, Ledger};
pub use menu::{Session, SessionError};
pub use seed::{SeedSummary, load_seed};
pub use transaction::{Transaction, local_day_end, local_day_start};
