//! `orgacct create <file>` – create accounts from a JSON file.

use super::fetch::print_account;
use anyhow::{Context, Result};
use orgacct_core::{Client, OrganisationAccount};
use serde_json::Value;
use std::path::Path;

pub fn run_create(client: &Client, path: &Path) -> Result<()> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let accounts = parse_accounts(&data).with_context(|| format!("parsing {}", path.display()))?;

    for account in &accounts {
        let created = client
            .create(account)
            .with_context(|| format!("creating account {}", account.id))?;
        print_account(&created);
        println!();
    }
    println!("Created {} account(s)", accounts.len());
    Ok(())
}

/// Accepts a single account object or an array of them.
pub(crate) fn parse_accounts(data: &str) -> Result<Vec<OrganisationAccount>> {
    match serde_json::from_str::<Value>(data)? {
        Value::Array(items) => items
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(Into::into))
            .collect(),
        single => Ok(vec![serde_json::from_value(single)?]),
    }
}
