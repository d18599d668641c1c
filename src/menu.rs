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

//! Interactive text menu.
//!
//! A [`Session`] reads one answer per line from any [`BufRead`] and writes
//! prompts and reports to any [`Write`]. Input is validated here; the
//! directory and ledgers only ever see positive amounts, rates and limits.
//!
//! Boundary errors are printed and the menu is shown again. End of input
//! ends the session as if the user had chosen to exit.

use crate::base::{Category, CategoryKind, Currency};
use crate::directory::UserDirectory;
use crate::error::TrackerError;
use crate::ledger::Ledger;
use crate::transaction::{Transaction, local_day_end, local_day_start};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, info};

/// Why a menu command stopped early.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),

    /// Input reached end of file
    #[error("input closed")]
    Closed,

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Menu entries, numbered as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    CreateUser,
    DeleteUser,
    AddTransaction,
    ListTransactions,
    ShowBalance,
    SetLimit,
    BudgetStatus,
    Exit,
    ByCategory,
    ByDateRange,
}

impl Command {
    const ALL: [(u32, Command, &'static str); 10] = [
        (1, Command::CreateUser, "Create user"),
        (2, Command::DeleteUser, "Delete user"),
        (3, Command::AddTransaction, "Add transaction"),
        (4, Command::ListTransactions, "View transactions"),
        (5, Command::ShowBalance, "Show balance"),
        (6, Command::SetLimit, "Set category spending limit"),
        (7, Command::BudgetStatus, "Track budget"),
        (8, Command::Exit, "Exit"),
        (9, Command::ByCategory, "Filter transactions by category"),
        (10, Command::ByDateRange, "Filter transactions by date range"),
    ];

    fn from_choice(choice: u32) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(number, ..)| *number == choice)
            .map(|(_, command, _)| *command)
    }
}

enum Flow {
    Continue,
    Exit,
}

fn display(value: Decimal) -> Decimal {
    value.round_dp(Ledger::DECIMAL_PRECISION).normalize()
}

fn parse_positive(raw: &str) -> Option<Decimal> {
    raw.parse::<Decimal>().ok().filter(|v| *v > Decimal::ZERO)
}

/// A single interactive session over one directory.
pub struct Session<R, W> {
    input: R,
    output: W,
    directory: UserDirectory,
    base_currency: Currency,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Users created during the session get `base_currency`.
    pub fn new(input: R, output: W, directory: UserDirectory, base_currency: Currency) -> Self {
        Self {
            input,
            output,
            directory,
            base_currency,
        }
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    pub fn into_directory(self) -> UserDirectory {
        self.directory
    }

    /// Runs the menu until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Only I/O failures on the underlying streams are returned.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.show_menu()?;
            let outcome = self.read_command().and_then(|command| self.dispatch(command));
            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => {
                    writeln!(self.output, "Exiting...")?;
                    return Ok(());
                }
                Err(SessionError::Tracker(e)) => {
                    debug!(error = %e, "command aborted");
                    writeln!(self.output, "{e}")?;
                }
                Err(SessionError::Closed) => {
                    info!("input closed, ending session");
                    return Ok(());
                }
                Err(SessionError::Io(e)) => return Err(e),
            }
        }
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        for (number, _, label) in Command::ALL {
            writeln!(self.output, "{number}. {label}")?;
        }
        self.output.flush()
    }

    fn read_line(&mut self) -> Result<String, SessionError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SessionError::Closed);
        }
        Ok(line.trim().to_owned())
    }

    fn prompt(&mut self, message: &str) -> Result<String, SessionError> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        self.read_line()
    }

    fn prompt_positive(&mut self, message: &str, what: &str) -> Result<Decimal, SessionError> {
        let raw = self.prompt(message)?;
        parse_positive(&raw)
            .ok_or_else(|| TrackerError::InvalidInput(format!("{what} must be a positive number")).into())
    }

    fn prompt_date(&mut self, message: &str) -> Result<NaiveDate, SessionError> {
        let raw = self.prompt(message)?;
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| TrackerError::InvalidInput(format!("'{raw}' is not a YYYY-MM-DD date")).into())
    }

    fn read_command(&mut self) -> Result<Command, SessionError> {
        let raw = self.read_line()?;
        let choice: u32 = raw
            .parse()
            .map_err(|_| TrackerError::InvalidInput("menu choice must be a number".into()))?;
        Command::from_choice(choice)
            .ok_or_else(|| TrackerError::InvalidSelection(choice.to_string()).into())
    }

    fn dispatch(&mut self, command: Command) -> Result<Flow, SessionError> {
        match command {
            Command::CreateUser => self.create_user()?,
            Command::DeleteUser => self.delete_user()?,
            Command::AddTransaction => self.add_transaction()?,
            Command::ListTransactions => self.list_transactions()?,
            Command::ShowBalance => self.show_balance()?,
            Command::SetLimit => self.set_limit()?,
            Command::BudgetStatus => self.budget_status()?,
            Command::ByCategory => self.list_by_category()?,
            Command::ByDateRange => self.list_by_date_range()?,
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    /// Lists users by 1-based index and resolves the chosen one.
    fn select_user(&mut self) -> Result<String, SessionError> {
        let names: Vec<String> = self.directory.usernames().map(str::to_owned).collect();
        if names.is_empty() {
            return Err(TrackerError::InvalidSelection("no users yet".into()).into());
        }

        writeln!(self.output, "Select user:")?;
        for (index, name) in names.iter().enumerate() {
            writeln!(self.output, "{}. {}", index + 1, name)?;
        }
        let raw = self.read_line()?;
        raw.parse::<usize>()
            .ok()
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| names.into_iter().nth(index))
            .ok_or_else(|| TrackerError::InvalidSelection(raw).into())
    }

    fn create_user(&mut self) -> Result<(), SessionError> {
        let name = self.prompt("Enter username: ")?;
        if name.is_empty() {
            return Err(TrackerError::InvalidInput("username must not be empty".into()).into());
        }
        self.directory.create_user(name.as_str(), self.base_currency.clone())?;
        writeln!(self.output, "User {name} added.")?;
        Ok(())
    }

    fn delete_user(&mut self) -> Result<(), SessionError> {
        let name = self.prompt("Enter username to delete: ")?;
        self.directory.delete_user(&name)?;
        writeln!(self.output, "User {name} deleted.")?;
        Ok(())
    }

    /// Re-prompts until a positive rate is entered.
    fn prompt_currency(&mut self) -> Result<Currency, SessionError> {
        let code = self.prompt("Enter currency code (e.g. USD): ")?;
        loop {
            let raw = self.prompt("Enter exchange rate to base currency (e.g. 1.0): ")?;
            match parse_positive(&raw) {
                Some(rate) => return Ok(Currency::new(code, rate)),
                None => writeln!(self.output, "Invalid value, try again.")?,
            }
        }
    }

    fn add_transaction(&mut self) -> Result<(), SessionError> {
        let user = self.select_user()?;
        let currency = self.prompt_currency()?;
        let amount = self.prompt_positive("Enter amount: ", "amount")?;

        let kind = self.prompt("Transaction type:\n1. Income\n2. Expense\n")?;
        let kind = match kind.as_str() {
            "1" => CategoryKind::Income,
            "2" => CategoryKind::Expense,
            other => return Err(TrackerError::InvalidSelection(other.to_owned()).into()),
        };

        let category = Category::new(self.prompt("Enter category name: ")?, kind);
        let note = match kind {
            CategoryKind::Income => self.prompt("Enter income source: ")?,
            CategoryKind::Expense => self.prompt("Enter expense description: ")?,
        };

        let ledger = self.directory.get_user(&user)?;
        if !ledger.accepts(kind, amount, &category, &currency) {
            return Err(TrackerError::InvalidInput("amount too large to track".into()).into());
        }
        match kind {
            CategoryKind::Income => ledger.record_income(amount, Utc::now(), category, currency, note),
            CategoryKind::Expense => ledger.record_expense(amount, Utc::now(), category, currency, note),
        }
        writeln!(self.output, "Transaction recorded for {}.", ledger.owner())?;
        Ok(())
    }

    fn write_transactions<'a>(
        output: &mut W,
        transactions: impl Iterator<Item = &'a Transaction>,
    ) -> io::Result<()> {
        let mut any = false;
        for tx in transactions {
            writeln!(output, "{tx}")?;
            any = true;
        }
        if !any {
            writeln!(output, "No transactions.")?;
        }
        Ok(())
    }

    fn list_transactions(&mut self) -> Result<(), SessionError> {
        let user = self.select_user()?;
        let ledger = self.directory.ledger(&user)?;
        writeln!(self.output, "\nAll transactions for user {user}:")?;
        Self::write_transactions(&mut self.output, ledger.transactions())?;
        Ok(())
    }

    fn list_by_category(&mut self) -> Result<(), SessionError> {
        let user = self.select_user()?;
        let category = self.prompt("Enter category name: ")?;
        let ledger = self.directory.ledger(&user)?;
        writeln!(self.output, "\nTransactions in category {category}:")?;
        Self::write_transactions(&mut self.output, ledger.transactions_by_category(&category))?;
        Ok(())
    }

    fn list_by_date_range(&mut self) -> Result<(), SessionError> {
        let user = self.select_user()?;
        let start = self.prompt_date("Enter start date (YYYY-MM-DD): ")?;
        let end = self.prompt_date("Enter end date (YYYY-MM-DD): ")?;
        let ledger = self.directory.ledger(&user)?;
        writeln!(self.output, "\nTransactions from {start} to {end}:")?;
        Self::write_transactions(
            &mut self.output,
            ledger.transactions_by_date_range(local_day_start(start), local_day_end(end)),
        )?;
        Ok(())
    }

    fn show_balance(&mut self) -> Result<(), SessionError> {
        let user = self.select_user()?;
        let ledger = self.directory.ledger(&user)?;
        writeln!(
            self.output,
            "Balance for {user}: {} {}",
            display(ledger.balance()),
            ledger.base_currency().code()
        )?;
        Ok(())
    }

    fn set_limit(&mut self) -> Result<(), SessionError> {
        let user = self.select_user()?;
        let category = self.prompt("Enter category name: ")?;
        let limit = self.prompt_positive("Enter limit for category: ", "limit")?;
        let ledger = self.directory.get_user(&user)?;
        ledger.set_category_limit(category.as_str(), limit);
        writeln!(
            self.output,
            "Limit for {category} set: {} {}",
            display(limit),
            ledger.base_currency().code()
        )?;
        Ok(())
    }

    fn budget_status(&mut self) -> Result<(), SessionError> {
        let user = self.select_user()?;
        let ledger = self.directory.ledger(&user)?;
        writeln!(self.output, "\nBudget status:")?;
        let mut any = false;
        for line in ledger.budget_status() {
            write!(
                self.output,
                "Category: {} Spent: {} Limit: {}",
                line.category,
                display(line.spent),
                display(line.limit)
            )?;
            if line.over_limit {
                write!(self.output, " (limit exceeded!)")?;
            }
            writeln!(self.output)?;
            any = true;
        }
        if !any {
            writeln!(self.output, "No category limits set.")?;
        }
        Ok(())
    }
}
