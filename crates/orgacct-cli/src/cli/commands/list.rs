//! `orgacct list` – show accounts as a table.

use anyhow::Result;
use orgacct_core::{Client, ListOptions};

pub fn run_list(client: &Client, page_number: Option<u32>, page_size: Option<u32>) -> Result<()> {
    let mut options = ListOptions::new();
    if let Some(n) = page_number {
        options = options.page_number(n);
    }
    if let Some(s) = page_size {
        options = options.page_size(s);
    }

    let accounts = client.list(&options)?;
    if accounts.is_empty() {
        println!("No accounts.");
        return Ok(());
    }
    println!("{:<38} {:<8} {:<8} {}", "ID", "VERSION", "COUNTRY", "NAME");
    for a in accounts {
        println!(
            "{:<38} {:<8} {:<8} {}",
            a.id,
            a.version,
            a.attributes.country,
            a.attributes.name.join(" ")
        );
    }
    Ok(())
}
