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

//! Random names for the resources created by the integration tests.

use rand::{
    Rng,
    distr::{Alphanumeric, Distribution},
};

/// A common prefix for the names of resources created by tests.
///
/// Use it to find, and clean up, resources leaked by failed tests.
pub const PREFIX: &str = "cat-fact-testing-";

/// The maximum length of a bucket name.
pub const BUCKET_NAME_LENGTH: usize = 63;

const SECRET_NAME_LENGTH: usize = 64;

const LOG_STREAM_SUFFIX_LENGTH: usize = 16;

/// Generates a random bucket name.
///
/// Bucket names are limited to lowercase letters, digits, and hyphens.
pub fn random_bucket_name() -> String {
    let id = LowercaseAlphanumeric.random_string(BUCKET_NAME_LENGTH - PREFIX.len());
    format!("{PREFIX}{id}")
}

/// Generates a random secret name.
pub fn random_secret_name() -> String {
    let id: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SECRET_NAME_LENGTH - PREFIX.len())
        .map(char::from)
        .collect();
    format!("{PREFIX}{id}")
}

/// Generates a random log stream name.
pub fn random_log_stream() -> String {
    format!(
        "{PREFIX}{}",
        LowercaseAlphanumeric.random_string(LOG_STREAM_SUFFIX_LENGTH)
    )
}

const LOWERCASE_ALPHANUMERIC_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Samples ASCII lowercase letters and digits, uniformly.
///
/// # Example
/// ```
/// use cat_fact_test_utils::resource_names::LowercaseAlphanumeric;
/// let got = LowercaseAlphanumeric.random_string(32);
/// assert_eq!(got.len(), 32);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct LowercaseAlphanumeric;

impl LowercaseAlphanumeric {
    /// Creates a string with `n` characters from the character set.
    pub fn random_string(&self, n: usize) -> String {
        rand::rng()
            .sample_iter(self)
            .take(n)
            .map(char::from)
            .collect()
    }
}

impl Distribution<u8> for LowercaseAlphanumeric {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        let index = rng.random_range(0..LOWERCASE_ALPHANUMERIC_CHARSET.len());
        LOWERCASE_ALPHANUMERIC_CHARSET[index]
    }
}
