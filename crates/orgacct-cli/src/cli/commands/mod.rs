//! CLI command handlers, one file per command.

mod create;
mod delete;
mod fetch;
mod list;

pub use create::run_create;
pub use delete::run_delete;
pub use fetch::run_fetch;
pub use list::run_list;

#[cfg(test)]
pub(crate) use create::parse_accounts;
