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

//! UserDirectory public API integration tests.

use chrono::Utc;
use finance_tracker::{Category, Currency, TrackerError, UserDirectory};
use rust_decimal_macros::dec;

#[test]
fn duplicate_user_is_rejected() {
    let mut directory = UserDirectory::new();
    directory.create_user("alice", Currency::base("USD")).unwrap();

    let result = directory.create_user("alice", Currency::base("EUR"));
    assert_eq!(result, Err(TrackerError::DuplicateUser("alice".into())));

    // Existing ledger untouched
    assert_eq!(directory.len(), 1);
    assert_eq!(directory.ledger("alice").unwrap().base_currency().code(), "USD");
}

#[test]
fn delete_on_empty_directory_fails() {
    let mut directory = UserDirectory::new();
    let result = directory.delete_user("bob");
    assert_eq!(result, Err(TrackerError::UserNotFound("bob".into())));
    assert!(directory.is_empty());
}

#[test]
fn delete_discards_ledger() {
    let mut directory = UserDirectory::new();
    directory.create_user("alice", Currency::base("USD")).unwrap();
    directory
        .get_user("alice")
        .unwrap()
        .record_income(dec!(10), Utc::now(), Category::income("Gift"), Currency::base("USD"), "Bob");

    directory.delete_user("alice").unwrap();
    assert!(!directory.contains("alice"));
    assert_eq!(
        directory.get_user("alice").unwrap_err(),
        TrackerError::UserNotFound("alice".into())
    );

    // Re-creating starts from an empty ledger.
    directory.create_user("alice", Currency::base("USD")).unwrap();
    assert!(directory.ledger("alice").unwrap().is_empty());
}

#[test]
fn users_are_isolated() {
    let mut directory = UserDirectory::new();
    directory.create_user("alice", Currency::base("USD")).unwrap();
    directory.create_user("bob", Currency::base("USD")).unwrap();

    directory.get_user("alice").unwrap().record_expense(
        dec!(25),
        Utc::now(),
        Category::expense("Food"),
        Currency::base("USD"),
        "Pizza",
    );

    assert_eq!(directory.ledger("alice").unwrap().total_expenses(), dec!(25));
    assert_eq!(directory.ledger("bob").unwrap().total_expenses(), dec!(0));
}

#[test]
fn usernames_follow_key_order() {
    let mut directory = UserDirectory::new();
    for name in ["zoe", "Bob", "alice"] {
        directory.create_user(name, Currency::base("USD")).unwrap();
    }
    let names: Vec<_> = directory.usernames().collect();
    assert_eq!(names, vec!["Bob", "alice", "zoe"]);
}
