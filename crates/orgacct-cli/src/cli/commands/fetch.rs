//! `orgacct fetch <id>` – show one account.

use anyhow::Result;
use orgacct_core::{Client, OrganisationAccount};
use uuid::Uuid;

pub fn run_fetch(client: &Client, id: Uuid) -> Result<()> {
    let account = client.fetch(id)?;
    print_account(&account);
    Ok(())
}

pub(super) fn print_account(a: &OrganisationAccount) {
    let attrs = &a.attributes;
    println!("id:              {}", a.id);
    println!("organisation_id: {}", a.organisation_id);
    println!("version:         {}", a.version);
    println!("country:         {}", attrs.country);
    if let Some(currency) = &attrs.base_currency {
        println!("base_currency:   {}", currency);
    }
    if let Some(bank_id) = &attrs.bank_id {
        println!("bank_id:         {}", bank_id);
    }
    if let Some(bic) = &attrs.bic {
        println!("bic:             {}", bic);
    }
    if let Some(iban) = &attrs.iban {
        println!("iban:            {}", iban);
    }
    if !attrs.name.is_empty() {
        println!("name:            {}", attrs.name.join(" "));
    }
}
