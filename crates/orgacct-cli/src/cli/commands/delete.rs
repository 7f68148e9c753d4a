//! `orgacct delete <id> --version N` – delete an account.

use anyhow::Result;
use orgacct_core::Client;
use uuid::Uuid;

pub fn run_delete(client: &Client, id: Uuid, version: i64) -> Result<()> {
    client.delete(id, version)?;
    println!("Deleted account {id}");
    Ok(())
}
