//! Paging options for `Client::list`.

use url::Url;

/// Optional page index (zero-based) and page size.
///
/// Only values that were explicitly set are sent, so unset ones fall back to
/// the server's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    page_number: Option<u32>,
    page_size: Option<u32>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_number(mut self, number: u32) -> Self {
        self.page_number = Some(number);
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Append `page[number]` / `page[size]` to `url`'s query.
    pub(crate) fn apply(&self, url: &mut Url) {
        if self.page_number.is_none() && self.page_size.is_none() {
            return;
        }
        let mut query = url.query_pairs_mut();
        if let Some(n) = self.page_number {
            query.append_pair("page[number]", &n.to_string());
        }
        if let Some(s) = self.page_size {
            query.append_pair("page[size]", &s.to_string());
        }
    }
}
