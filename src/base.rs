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

//! Core value types for currencies and categories.

use rust_decimal::Decimal;
use std::fmt;

/// A currency code paired with its exchange rate to the base currency.
///
/// The rate is expected to be positive. The type does not check it; the
/// interactive boundary and the seed loader reject non-positive rates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Currency {
    code: String,
    rate_to_base: Decimal,
}

impl Currency {
    pub fn new(code: impl Into<String>, rate_to_base: Decimal) -> Self {
        Self {
            code: code.into(),
            rate_to_base,
        }
    }

    /// A currency with rate 1, used as a user's base currency.
    pub fn base(code: impl Into<String>) -> Self {
        Self::new(code, Decimal::ONE)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn rate_to_base(&self) -> Decimal {
        self.rate_to_base
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// Whether a category classifies money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    Income,
    Expense,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A named grouping with a fixed kind.
///
/// Names are free text and not unique: limits and spend tracking are keyed
/// by name alone, so an income and an expense category sharing a name
/// collide there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    name: String,
    kind: CategoryKind,
}

impl Category {
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn income(name: impl Into<String>) -> Self {
        Self::new(name, CategoryKind::Income)
    }

    pub fn expense(name: impl Into<String>) -> Self {
        Self::new(name, CategoryKind::Expense)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CategoryKind {
        self.kind
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn base_currency_has_unit_rate() {
        let usd = Currency::base("USD");
        assert_eq!(usd.code(), "USD");
        assert_eq!(usd.rate_to_base(), Decimal::ONE);
    }

    #[test]
    fn currency_displays_code() {
        assert_eq!(Currency::new("EUR", dec!(1.08)).to_string(), "EUR");
    }

    #[test]
    fn category_constructors_fix_kind() {
        assert_eq!(Category::income("Salary").kind(), CategoryKind::Income);
        assert_eq!(Category::expense("Food").kind(), CategoryKind::Expense);
        assert_eq!(Category::expense("Food").name(), "Food");
    }
}
