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

//! Transaction records.
//!
//! A [`Transaction`] is either an [`Income`](Transaction::Income) carrying the
//! source of the money or an [`Expense`](Transaction::Expense) carrying a
//! description. Records are immutable once created.

use crate::base::{Category, Currency};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";

// Real-world DST gaps are whole multiples of half an hour, at most a few hours.
const GAP_STEP_MINUTES: i64 = 30;
const GAP_MAX_STEPS: usize = 6;

/// First instant of `date` in the process-local time zone.
pub fn local_day_start(date: NaiveDate) -> DateTime<Utc> {
    from_local(date.and_time(NaiveTime::MIN), true)
}

/// Last instant of `date` in the process-local time zone.
pub fn local_day_end(date: NaiveDate) -> DateTime<Utc> {
    let last = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
        .unwrap_or(NaiveTime::MIN);
    from_local(date.and_time(last), false)
}

fn from_local(naive: NaiveDateTime, earliest: bool) -> DateTime<Utc> {
    resolve_in(&Local, naive, earliest)
}

/// Maps a wall-clock time in `tz` to an instant.
///
/// Ambiguous times take the earliest or latest reading. A time skipped by a
/// DST jump moves to the nearest existing time in the direction that keeps
/// it on the same side of the day boundary.
fn resolve_in<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime, earliest: bool) -> DateTime<Utc> {
    let step = if earliest {
        Duration::minutes(GAP_STEP_MINUTES)
    } else {
        -Duration::minutes(GAP_STEP_MINUTES)
    };
    let mut candidate = naive;
    for _ in 0..=GAP_MAX_STEPS {
        let local = tz.from_local_datetime(&candidate);
        let resolved = if earliest {
            local.earliest()
        } else {
            local.latest()
        };
        if let Some(dt) = resolved {
            return dt.with_timezone(&Utc);
        }
        match candidate.checked_add_signed(step) {
            Some(next) => candidate = next,
            None => break,
        }
    }
    Utc.from_utc_datetime(&naive)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Income {
        amount: Decimal,
        date: DateTime<Utc>,
        category: Category,
        currency: Currency,
        source: String,
    },
    Expense {
        amount: Decimal,
        date: DateTime<Utc>,
        category: Category,
        currency: Currency,
        description: String,
    },
}

impl Transaction {
    pub fn income(
        amount: Decimal,
        date: DateTime<Utc>,
        category: Category,
        currency: Currency,
        source: impl Into<String>,
    ) -> Self {
        Self::Income {
            amount,
            date,
            category,
            currency,
            source: source.into(),
        }
    }

    pub fn expense(
        amount: Decimal,
        date: DateTime<Utc>,
        category: Category,
        currency: Currency,
        description: impl Into<String>,
    ) -> Self {
        Self::Expense {
            amount,
            date,
            category,
            currency,
            description: description.into(),
        }
    }

    /// Face amount, in the transaction's own currency.
    pub fn amount(&self) -> Decimal {
        match self {
            Self::Income { amount, .. } => *amount,
            Self::Expense { amount, .. } => *amount,
        }
    }

    pub fn date(&self) -> DateTime<Utc> {
        match self {
            Self::Income { date, .. } => *date,
            Self::Expense { date, .. } => *date,
        }
    }

    pub fn category(&self) -> &Category {
        match self {
            Self::Income { category, .. } => category,
            Self::Expense { category, .. } => category,
        }
    }

    pub fn currency(&self) -> &Currency {
        match self {
            Self::Income { currency, .. } => currency,
            Self::Expense { currency, .. } => currency,
        }
    }

    /// The income source or the expense description.
    pub fn note(&self) -> &str {
        match self {
            Self::Income { source, .. } => source,
            Self::Expense { description, .. } => description,
        }
    }

    pub fn amount_in_base_currency(&self) -> Decimal {
        self.amount() * self.currency().rate_to_base()
    }

    /// Calendar date in the process-local time zone, as `YYYY-MM-DD`.
    pub fn formatted_date(&self) -> String {
        self.formatted_date_in(&Local)
    }

    pub fn formatted_date_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.date().with_timezone(tz).format(DATE_FORMAT).to_string()
    }

    /// Human-readable line with the date rendered in `tz`.
    pub fn render_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let date = self.formatted_date_in(tz);
        match self {
            Self::Income {
                amount,
                category,
                currency,
                source,
                ..
            } => format!(
                "Income: {} {} received from {} | Date: {} | Category: {}",
                amount.normalize(),
                currency.code(),
                source,
                date,
                category.name()
            ),
            Self::Expense {
                amount,
                category,
                currency,
                description,
                ..
            } => format!(
                "Expense: {} {} spent on {} | Date: {} | Category: {}",
                amount.normalize(),
                currency.code(),
                description,
                date,
                category.name()
            ),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_in(&Local))
    }
}
