//! Load debt accounts from CSV
//!
//! Expected header: `id,creditor,balance,rate,payment,custom` where `custom`
//! may be left empty.

use std::path::Path;

use csv::{Reader, Trim};

use super::Account;
use crate::error::Result;

/// Raw CSV row matching the accounts export columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    id: String,
    creditor: String,
    balance: f64,
    rate: f64,
    payment: f64,
    #[serde(default)]
    custom: Option<f64>,
}

impl CsvRow {
    fn into_account(self) -> Result<Account> {
        let account = Account {
            id: self.id,
            creditor: self.creditor,
            balance: self.balance,
            rate: self.rate,
            payment: self.payment,
            custom: self.custom,
        };
        account.validate()?;
        Ok(account)
    }
}

/// Load all accounts from a CSV file
pub fn load_accounts<P: AsRef<Path>>(path: P) -> Result<Vec<Account>> {
    let file = std::fs::File::open(path)?;
    load_accounts_from_reader(file)
}

/// Load accounts from any reader (e.g., string buffer, stdin)
pub fn load_accounts_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Account>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    read_rows(&mut csv_reader)
}

fn read_rows<R: std::io::Read>(reader: &mut Reader<R>) -> Result<Vec<Account>> {
    let mut accounts = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        accounts.push(row.into_account()?);
    }

    log::debug!("Loaded {} accounts", accounts.len());
    Ok(accounts)
}
