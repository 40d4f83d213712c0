//! Remote per-user document persistence over HTTP.
//!
//! Each authenticated user owns one JSON document at
//! `{base_url}/users/{uid}` holding both collections. Loads fetch the whole
//! document (HTTP 404 means the scope has never been saved); saves overwrite
//! it wholesale. Concurrent sessions for the same identity silently
//! overwrite one another — a known limitation, preserved.

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

use super::{validate, LoadReport, Result, Scope, Snapshot, StorageBackend};
use crate::errors::StoreError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct RemoteStorage {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl RemoteStorage {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
        })
    }

    /// Bearer token minted by the external identity provider.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn document_url(&self, scope: &Scope) -> Result<String> {
        let user_id = scope.user_id().ok_or_else(|| {
            StoreError::Storage("remote storage requires an authenticated user scope".into())
        })?;
        Ok(format!("{}/users/{}", self.base_url, user_id))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

impl StorageBackend for RemoteStorage {
    fn load(&self, scope: &Scope) -> Result<LoadReport> {
        let url = self.document_url(scope)?;
        tracing::debug!(%url, "fetching remote document");
        let response = self.authorize(self.client.get(&url)).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            // Never-saved scope: start with empty collections.
            return Ok(LoadReport {
                first_run: true,
                ..LoadReport::default()
            });
        }
        let document: Value = response.error_for_status()?.json()?;
        let raw_expenses = array_field(&document, "expenses");
        let raw_income = array_field(&document, "income");
        let (expenses, mut warnings) = validate::parse_expenses(&raw_expenses);
        let (income, income_warnings) = validate::parse_income(&raw_income);
        warnings.extend(income_warnings);
        Ok(LoadReport {
            snapshot: Snapshot { expenses, income },
            warnings,
            first_run: false,
        })
    }

    fn save(&self, scope: &Scope, snapshot: &Snapshot) -> Result<()> {
        let url = self.document_url(scope)?;
        tracing::debug!(
            %url,
            expenses = snapshot.expenses.len(),
            income = snapshot.income.len(),
            "overwriting remote document"
        );
        self.authorize(self.client.put(&url))
            .json(snapshot)
            .send()?
            .error_for_status()?;
        Ok(())
    }
}

fn array_field(document: &Value, key: &str) -> Vec<Value> {
    match document.get(key) {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}
