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

//! Error types for the finance tracker.

use thiserror::Error;

/// Errors raised by the user directory and the interactive boundary.
///
/// The ledger itself never fails; malformed values are rejected before
/// they reach it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// A user with this name already exists
    #[error("user '{0}' already exists")]
    DuplicateUser(String),

    /// No user with this name exists
    #[error("user '{0}' not found")]
    UserNotFound(String),

    /// Non-numeric or out-of-range value entered at a prompt
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Menu or user index outside the offered range
    #[error("invalid selection: {0}")]
    InvalidSelection(String),
}
