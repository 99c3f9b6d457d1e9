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

//! A scheduled task storing cat facts.
//!
//! Each invocation of the task:
//! - provisions a log group and mirrors its logs there,
//! - writes a secret and reads it back,
//! - fetches a fact from a public HTTP endpoint,
//! - stores the fact as a JSON object in a bucket, creating the bucket if
//!   needed.
//!
//! The cloud services are accessed through the traits in [stub]. The [aws]
//! module implements them with the AWS SDK, applications may provide other
//! implementations, typically in tests.

/// The result type used in this crate.
pub type Result<T> = std::result::Result<T, crate::error::Error>;

pub mod aws;
pub mod config;
pub mod error;
pub mod facts;
pub mod logging;
pub mod model;
pub mod secrets;
pub mod storage;
pub mod stub;
pub mod task;

#[cfg(test)]
mod mocks;

pub use error::Error;
pub use task::{Outcome, Task};
