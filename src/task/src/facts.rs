// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::Result;
use crate::error::Error;

/// Fetches facts from a public JSON endpoint.
///
/// # Example
/// ```no_run
/// # async fn sample() -> cat_fact_task::Result<()> {
/// use cat_fact_task::facts::FactClient;
/// let client = FactClient::new("https://catfact.ninja/fact");
/// if let Some(fact) = client.fetch_fact().await? {
///     println!("fact = {fact}");
/// }
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct FactClient {
    http: reqwest::Client,
    endpoint: String,
}

impl FactClient {
    /// Creates a client for `endpoint` using a default HTTP client.
    pub fn new<T: Into<String>>(endpoint: T) -> Self {
        Self::with_http_client(reqwest::Client::new(), endpoint)
    }

    /// Creates a client for `endpoint` using an existing HTTP client.
    pub fn with_http_client<T: Into<String>>(http: reqwest::Client, endpoint: T) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// The endpoint queried by [fetch_fact][FactClient::fetch_fact].
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches one fact.
    ///
    /// Makes a single attempt. Returns `Ok(None)` if the endpoint responds with
    /// anything other than `200 OK`. Network failures and a `200 OK` response
    /// that is not JSON are errors.
    pub async fn fetch_fact(&self) -> Result<Option<serde_json::Value>> {
        let response = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(Error::transport)?;
        if response.status() != reqwest::StatusCode::OK {
            tracing::debug!(
                status = %response.status(),
                endpoint = %self.endpoint,
                "fact endpoint returned no fact"
            );
            return Ok(None);
        }
        let body = response.bytes().await.map_err(Error::transport)?;
        let fact = serde_json::from_slice(&body).map_err(Error::deser)?;
        Ok(Some(fact))
    }
}
