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

use clap::Parser;
use finance_tracker::{Currency, Session, UserDirectory, load_seed};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

/// Finance Tracker - Console personal finance tracker
///
/// Records incomes and expenses for several users, converts them to a base
/// currency and tracks spending against per-category limits. All data lives
/// in memory for the duration of the session.
#[derive(Parser, Debug)]
#[command(name = "finance-tracker")]
#[command(about = "A console personal finance tracker", long_about = None)]
struct Args {
    /// Base currency code for users created in this session
    #[arg(long, value_name = "CODE", default_value = "USD")]
    base_currency: String,

    /// CSV file with transactions and limits to load before the menu starts
    ///
    /// Expected format: user,kind,amount,currency,rate,category,note,date
    #[arg(long, value_name = "FILE")]
    seed: Option<PathBuf>,

    /// Log level for diagnostics written to stderr
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(format!("finance_tracker={}", args.log_level))
        .with_writer(io::stderr)
        .init();

    let base_currency = Currency::base(args.base_currency);
    let mut directory = UserDirectory::new();

    if let Some(path) = &args.seed {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Error opening seed file '{}': {}", path.display(), e);
                process::exit(1);
            }
        };
        match load_seed(BufReader::new(file), &mut directory, &base_currency) {
            Ok(summary) => tracing::info!(
                applied = summary.applied,
                skipped = summary.skipped,
                "seed data loaded"
            ),
            Err(e) => {
                eprintln!("Error loading seed file: {}", e);
                process::exit(1);
            }
        }
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), directory, base_currency);
    if let Err(e) = session.run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
