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

//! Write and read secrets.
//!
//! [write_secret] does not check whether the secret exists before writing it.
//! It tries to update the secret and creates it only if the update reports
//! that the secret is missing.

use crate::Result;
use crate::error::Error;
use crate::model::SecretValueRequest;
use crate::stub::SecretStore;

/// The error code reported when a secret does not exist.
pub const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";

fn is_not_found(e: &Error) -> bool {
    e.service_code() == Some(RESOURCE_NOT_FOUND)
}

/// Stores `value` in the secret called `name`, creating the secret if needed.
///
/// # Example
/// ```no_run
/// # async fn sample(store: &impl cat_fact_task::stub::SecretStore) -> cat_fact_task::Result<()> {
/// use cat_fact_task::secrets::{read_secret, write_secret};
/// write_secret(store, "example_secret", "example_secret_value").await?;
/// let value = read_secret(store, "example_secret").await?;
/// assert_eq!(value.as_deref(), Some("example_secret_value"));
/// # Ok(()) }
/// ```
pub async fn write_secret<S>(store: &S, name: &str, value: &str) -> Result<()>
where
    S: SecretStore,
{
    let request = SecretValueRequest::new().set_name(name).set_value(value);
    match store.put_secret_value(request.clone()).await {
        Ok(()) => {
            tracing::info!("Secret {name} updated successfully.");
            Ok(())
        }
        Err(e) if is_not_found(&e) => {
            tracing::info!("Secret {name} not found. Creating a new secret.");
            store.create_secret(request).await.inspect_err(|e| {
                tracing::error!("Failed to create secret {name}: {e}");
            })?;
            tracing::info!("Secret {name} created successfully.");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Failed to update secret {name}: {e}");
            Err(e)
        }
    }
}

/// Returns the current value of the secret called `name`.
///
/// Returns `Ok(None)` if the secret does not exist.
pub async fn read_secret<S>(store: &S, name: &str) -> Result<Option<String>>
where
    S: SecretStore,
{
    match store.get_secret_value(name.to_string()).await {
        Ok(value) => Ok(value),
        Err(e) if is_not_found(&e) => {
            tracing::warn!("Secret {name} not found.");
            Ok(None)
        }
        Err(e) => {
            tracing::error!("Failed to retrieve secret {name}: {e}");
            Err(e)
        }
    }
}
