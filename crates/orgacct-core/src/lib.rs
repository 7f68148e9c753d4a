pub mod config;
pub mod logging;

pub mod cancel;
pub mod client;
pub mod error;
pub mod http;
pub mod model;
pub mod retry;

pub use cancel::CancelToken;
pub use client::{Client, ListOptions};
pub use error::{Error, ErrorKind, Result};
pub use model::{AccountAttributes, OrganisationAccount};
