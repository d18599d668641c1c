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

//! User directory.
//!
//! The [`UserDirectory`] owns one [`Ledger`] per username. A username is
//! either absent or present; [`create_user`](UserDirectory::create_user)
//! and [`delete_user`](UserDirectory::delete_user) are the only transitions
//! and both leave the directory untouched when they fail.

use crate::base::Currency;
use crate::error::TrackerError;
use crate::ledger::Ledger;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::debug;

/// Owns every user's ledger, keyed by username.
///
/// Ledgers are handed out as borrows scoped to the caller, so a reference
/// can never outlive the deletion of its user.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: BTreeMap<String, Ledger>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a user with an empty ledger in `base_currency`.
    ///
    /// # Errors
    ///
    /// [`TrackerError::DuplicateUser`] if the name is taken.
    pub fn create_user(
        &mut self,
        name: impl Into<String>,
        base_currency: Currency,
    ) -> Result<(), TrackerError> {
        match self.users.entry(name.into()) {
            Entry::Occupied(entry) => Err(TrackerError::DuplicateUser(entry.key().clone())),
            Entry::Vacant(entry) => {
                debug!(user = %entry.key(), base = base_currency.code(), "user created");
                let ledger = Ledger::new(entry.key().clone(), base_currency);
                entry.insert(ledger);
                Ok(())
            }
        }
    }

    /// Exclusive access to a user's ledger.
    ///
    /// # Errors
    ///
    /// [`TrackerError::UserNotFound`] if no such user exists.
    pub fn get_user(&mut self, name: &str) -> Result<&mut Ledger, TrackerError> {
        self.users
            .get_mut(name)
            .ok_or_else(|| TrackerError::UserNotFound(name.to_owned()))
    }

    /// Shared access to a user's ledger.
    pub fn ledger(&self, name: &str) -> Result<&Ledger, TrackerError> {
        self.users
            .get(name)
            .ok_or_else(|| TrackerError::UserNotFound(name.to_owned()))
    }

    /// Removes a user and discards their ledger.
    ///
    /// # Errors
    ///
    /// [`TrackerError::UserNotFound`] if no such user exists.
    pub fn delete_user(&mut self, name: &str) -> Result<(), TrackerError> {
        let ledger = self
            .users
            .remove(name)
            .ok_or_else(|| TrackerError::UserNotFound(name.to_owned()))?;
        debug!(user = name, discarded = ledger.len(), "user deleted");
        Ok(())
    }

    /// Usernames in ascending order.
    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.users.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
