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

//! Ledger public API integration tests.

use chrono::{DateTime, TimeZone, Utc};
use finance_tracker::{BudgetLine, Category, Currency, Ledger, Transaction};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// === Helper Functions ===

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 1, hour, 0, 0).unwrap()
}

fn usd() -> Currency {
    Currency::base("USD")
}

fn new_ledger() -> Ledger {
    Ledger::new("alice", usd())
}

// === Aggregation ===

#[test]
fn income_is_converted_to_base() {
    let mut ledger = new_ledger();
    ledger.record_income(
        dec!(100),
        at(9),
        Category::income("Salary"),
        Currency::new("EUR", dec!(2.0)),
        "Acme",
    );
    assert_eq!(ledger.total_income(), dec!(200.0));
    assert_eq!(ledger.balance(), dec!(200.0));
}

#[test]
fn balance_with_mixed_currencies() {
    let mut ledger = new_ledger();
    ledger.record_income(dec!(1000), at(9), Category::income("Salary"), usd(), "Acme");
    ledger.record_expense(
        dec!(100),
        at(10),
        Category::expense("Travel"),
        Currency::new("GBP", dec!(1.25)),
        "Train",
    );
    ledger.record_expense(dec!(30), at(11), Category::expense("Food"), usd(), "Lunch");

    assert_eq!(ledger.total_income(), dec!(1000));
    assert_eq!(ledger.total_expenses(), dec!(155));
    assert_eq!(ledger.balance(), dec!(845));
}

#[test]
fn balance_can_go_negative() {
    let mut ledger = new_ledger();
    ledger.record_expense(dec!(10), at(9), Category::expense("Food"), usd(), "Snack");
    assert_eq!(ledger.balance(), dec!(-10));
}

// === Budget Tracking ===

#[test]
fn expense_over_limit_is_flagged() {
    let mut ledger = new_ledger();
    ledger.record_expense(dec!(50), at(9), Category::expense("Food"), usd(), "Market");
    ledger.set_category_limit("Food", dec!(40));

    let status: Vec<_> = ledger.budget_status().collect();
    assert_eq!(
        status,
        vec![BudgetLine {
            category: "Food",
            limit: dec!(40),
            spent: dec!(50),
            over_limit: true,
        }]
    );
}

#[test]
fn spend_accumulates_in_face_amounts_across_currencies() {
    let mut ledger = new_ledger();
    ledger.record_expense(dec!(10), at(9), Category::expense("Food"), usd(), "a");
    ledger.record_expense(
        dec!(10),
        at(10),
        Category::expense("Food"),
        Currency::new("JPY", dec!(0.0067)),
        "b",
    );
    // Face amounts are summed as entered, whatever the currency.
    assert_eq!(ledger.category_expense("Food"), dec!(20));
}

#[test]
fn unlimited_categories_are_not_reported() {
    let mut ledger = new_ledger();
    ledger.record_expense(dec!(50), at(9), Category::expense("Food"), usd(), "Market");
    assert_eq!(ledger.budget_status().count(), 0);
    assert_eq!(ledger.category_expense("Food"), dec!(50));
}

#[test]
fn limit_without_spend_reports_zero() {
    let mut ledger = new_ledger();
    ledger.set_category_limit("Rent", dec!(900));
    let line = ledger.budget_status().next().unwrap();
    assert_eq!(line.spent, Decimal::ZERO);
    assert!(!line.over_limit);
}

#[test]
fn same_name_different_kind_collide_in_limits() {
    let mut ledger = new_ledger();
    ledger.record_income(dec!(5), at(9), Category::income("Misc"), usd(), "Found");
    ledger.record_expense(dec!(7), at(10), Category::expense("Misc"), usd(), "Lost");
    ledger.set_category_limit("Misc", dec!(6));

    let line = ledger.budget_status().next().unwrap();
    assert_eq!(line.spent, dec!(7));
    assert!(line.over_limit);
    assert_eq!(ledger.transactions_by_category("Misc").count(), 2);
}

// === Queries ===

#[test]
fn exact_timestamp_range_includes_transaction() {
    let mut ledger = new_ledger();
    ledger.record_expense(dec!(1), at(9), Category::expense("Food"), usd(), "Tea");
    ledger.record_expense(dec!(1), at(10), Category::expense("Food"), usd(), "Coffee");

    let hits: Vec<_> = ledger
        .transactions_by_date_range(at(9), at(9))
        .map(Transaction::note)
        .collect();
    assert_eq!(hits, vec!["Tea"]);
}

#[test]
fn listing_preserves_variants() {
    let mut ledger = new_ledger();
    ledger.record_income(dec!(1), at(9), Category::income("Gift"), usd(), "Aunt");
    ledger.record_expense(dec!(1), at(10), Category::expense("Fun"), usd(), "Arcade");

    let kinds: Vec<_> = ledger
        .transactions()
        .map(|tx| matches!(tx, Transaction::Income { .. }))
        .collect();
    assert_eq!(kinds, vec![true, false]);
    assert_eq!(ledger.len(), 2);
}
