//! Organisation accounts client: create, fetch, list and delete.
//!
//! Each operation builds one `Request`, hands it to the `Executor` exactly once
//! (physical retries happen inside), normalizes failures, and decodes the
//! `{"data": ...}` envelope on success.

mod normalize;
mod options;

pub use normalize::{check_response, domain_error, execute_error};
pub use options::ListOptions;

use crate::cancel::CancelToken;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{CurlTransport, Method, Request, Response, Transport};
use crate::model::{Envelope, ListEnvelope, OrganisationAccount};
use crate::retry::{Executor, RetryPolicy};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;
use uuid::Uuid;

const ACCOUNTS_PATH: &str = "v1/organisation/accounts";

/// Client for the organisation accounts resource.
///
/// Holds only immutable configuration; clone it or share it across threads.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    executor: Executor,
    cancel: Option<CancelToken>,
}

impl Client {
    /// Client for `base_url` with default timeouts and retry policy.
    pub fn new(base_url: &str) -> Result<Self> {
        let cfg = ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        };
        Self::from_config(&cfg)
    }

    pub fn from_config(cfg: &ClientConfig) -> Result<Self> {
        let transport = CurlTransport::new(cfg.request_timeout(), cfg.connect_timeout());
        Self::with_transport(&cfg.base_url, Arc::new(transport), cfg.retry_policy())
    }

    /// Client over a custom transport and policy.
    pub fn with_transport(
        base_url: &str,
        transport: Arc<dyn Transport>,
        policy: RetryPolicy,
    ) -> Result<Self> {
        let parsed = Url::parse(base_url.trim())?;
        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            executor: Executor::new(transport, policy),
            cancel: None,
        })
    }

    /// A handle whose calls stop with `Error::Cancelled` once `token` fires.
    pub fn with_cancel_token(&self, token: CancelToken) -> Self {
        Self {
            cancel: Some(token),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        self.executor.policy()
    }

    /// Create an account; returns the server's copy (identity and version as stored).
    pub fn create(&self, account: &OrganisationAccount) -> Result<OrganisationAccount> {
        let body = serde_json::to_vec(&Envelope { data: account }).map_err(|source| {
            Error::Encode {
                what: "account for create",
                source,
            }
        })?;
        let request = Request::new(Method::Post, self.collection_url()?).with_body(body);
        tracing::debug!(id = %account.id, "creating account");
        let response = self.send(&request)?;
        let env: Envelope<OrganisationAccount> = decode(&response, "account envelope")?;
        Ok(env.data)
    }

    pub fn fetch(&self, id: Uuid) -> Result<OrganisationAccount> {
        let request = Request::new(Method::Get, self.item_url(id)?);
        tracing::debug!(%id, "fetching account");
        let response = self.send(&request)?;
        let env: Envelope<OrganisationAccount> = decode(&response, "account envelope")?;
        Ok(env.data)
    }

    /// List accounts in server order. An empty page is an empty `Vec`, not an error.
    pub fn list(&self, options: &ListOptions) -> Result<Vec<OrganisationAccount>> {
        let mut url = Url::parse(&self.collection_url()?)?;
        options.apply(&mut url);
        let request = Request::new(Method::Get, url.as_str());
        tracing::debug!(?options, "listing accounts");
        let response = self.send(&request)?;
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        let env: ListEnvelope<OrganisationAccount> = decode(&response, "account list envelope")?;
        Ok(env.data)
    }

    /// Delete an account at the version last observed by the caller.
    pub fn delete(&self, id: Uuid, version: i64) -> Result<()> {
        let mut url = Url::parse(&self.item_url(id)?)?;
        url.query_pairs_mut()
            .append_pair("version", &version.to_string());
        let request = Request::new(Method::Delete, url.as_str());
        tracing::debug!(%id, version, "deleting account");
        self.send(&request)?;
        Ok(())
    }

    fn collection_url(&self) -> Result<String> {
        let url = format!("{}/{}", self.base_url, ACCOUNTS_PATH);
        Ok(Url::parse(&url)?.into())
    }

    fn item_url(&self, id: Uuid) -> Result<String> {
        let url = format!("{}/{}/{}", self.base_url, ACCOUNTS_PATH, id);
        Ok(Url::parse(&url)?.into())
    }

    /// One executor call plus normalization: returns only success responses.
    fn send(&self, request: &Request) -> Result<Response> {
        let response = self
            .executor
            .execute(request, self.cancel.as_ref())
            .map_err(execute_error)?;
        check_response(&response)?;
        Ok(response)
    }
}

fn decode<T: DeserializeOwned>(response: &Response, what: &'static str) -> Result<T> {
    serde_json::from_slice(&response.body).map_err(|source| Error::Decode { what, source })
}
