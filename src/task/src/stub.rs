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

//! Traits for the managed services used by the task.
//!
//! The task components are written against these traits. The [aws][crate::aws]
//! module implements them with the AWS SDK. Tests implement them with mocks or
//! in-memory fakes.

use crate::Result;
use crate::model::{
    CreateBucketRequest, PutLogEventsRequest, PutObjectRequest, SecretValueRequest,
};

/// The centralized logging service.
pub trait LogService: std::fmt::Debug + Send + Sync {
    /// Returns the names of all the log groups starting with `prefix`.
    fn describe_log_groups(
        &self,
        prefix: String,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;

    /// Creates a new log group.
    fn create_log_group(
        &self,
        log_group: String,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Creates a new log stream in an existing log group.
    fn create_log_stream(
        &self,
        log_group: String,
        log_stream: String,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Appends events to an existing log stream.
    fn put_log_events(
        &self,
        req: PutLogEventsRequest,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// The object storage service.
pub trait ObjectStore: std::fmt::Debug + Send + Sync {
    /// Checks a bucket, succeeds if it exists and the caller can access it.
    ///
    /// Implementations must report the HTTP status of a failed check as the
    /// service error code, `HeadBucket` responses have no body.
    fn head_bucket(&self, bucket: String) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Creates a bucket.
    fn create_bucket(
        &self,
        req: CreateBucketRequest,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Creates or overwrites an object.
    fn put_object(
        &self,
        req: PutObjectRequest,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// The secrets management service.
pub trait SecretStore: std::fmt::Debug + Send + Sync {
    /// Stores a new value in an existing secret.
    fn put_secret_value(
        &self,
        req: SecretValueRequest,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Creates a new secret with an initial value.
    fn create_secret(
        &self,
        req: SecretValueRequest,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Returns the current string value of a secret.
    ///
    /// Returns `None` if the secret exists but only holds binary data.
    fn get_secret_value(
        &self,
        name: String,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
}
