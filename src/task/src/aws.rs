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

//! Implements the [stub][crate::stub] traits with the AWS SDK.
//!
//! The SDK errors are converted to [Error] here: service errors keep their
//! code and message, everything else becomes a transport error.

use crate::Result;
use crate::error::{Error, ServiceDetails};
use crate::model::{
    CreateBucketRequest, PutLogEventsRequest, PutObjectRequest, SecretValueRequest,
};
use aws_config::SdkConfig;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};

/// Converts an SDK error, keeping the service error code.
fn map_sdk_error<E>(err: SdkError<E, HttpResponse>) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    match err {
        SdkError::ServiceError(context) => {
            let status = context.raw().status().as_u16();
            let err = context.into_err();
            let details = ServiceDetails::default()
                .set_or_clear_code(err.code())
                .set_or_clear_message(err.message())
                .set_http_status_code(status);
            Error::service(details).with_source(err)
        }
        err => Error::transport(err),
    }
}

/// Converts an SDK error, using the HTTP status as the service error code.
///
/// Responses to `HEAD` requests have no body, so the SDK cannot parse a
/// service error code from them.
fn map_status_error<E>(err: SdkError<E, HttpResponse>) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    match err {
        SdkError::ServiceError(context) => {
            let status = context.raw().status().as_u16();
            let err = context.into_err();
            let details = ServiceDetails::new(status.to_string())
                .set_or_clear_message(err.message())
                .set_http_status_code(status);
            Error::service(details).with_source(err)
        }
        err => Error::transport(err),
    }
}

/// The region configured in `config`, if any.
pub fn region(config: &SdkConfig) -> Option<String> {
    config.region().map(|r| r.to_string())
}

/// Implements [LogService][crate::stub::LogService] using CloudWatch Logs.
#[derive(Clone, Debug)]
pub struct CloudWatchLogs {
    client: aws_sdk_cloudwatchlogs::Client,
}

impl CloudWatchLogs {
    /// Creates a new CloudWatch Logs client from the shared SDK configuration.
    pub fn new(config: &SdkConfig) -> Self {
        Self::from_client(aws_sdk_cloudwatchlogs::Client::new(config))
    }

    /// Wraps an existing CloudWatch Logs client.
    pub fn from_client(client: aws_sdk_cloudwatchlogs::Client) -> Self {
        Self { client }
    }
}

impl crate::stub::LogService for CloudWatchLogs {
    async fn describe_log_groups(&self, prefix: String) -> Result<Vec<String>> {
        let response = self
            .client
            .describe_log_groups()
            .log_group_name_prefix(prefix)
            .send()
            .await
            .map_err(map_sdk_error)?;
        Ok(response
            .log_groups()
            .iter()
            .filter_map(|g| g.log_group_name())
            .map(str::to_string)
            .collect())
    }

    async fn create_log_group(&self, log_group: String) -> Result<()> {
        self.client
            .create_log_group()
            .log_group_name(log_group)
            .send()
            .await
            .map_err(map_sdk_error)?;
        Ok(())
    }

    async fn create_log_stream(&self, log_group: String, log_stream: String) -> Result<()> {
        self.client
            .create_log_stream()
            .log_group_name(log_group)
            .log_stream_name(log_stream)
            .send()
            .await
            .map_err(map_sdk_error)?;
        Ok(())
    }

    async fn put_log_events(&self, req: PutLogEventsRequest) -> Result<()> {
        use aws_sdk_cloudwatchlogs::types::InputLogEvent;
        let events = req
            .events
            .into_iter()
            .map(|e| {
                InputLogEvent::builder()
                    .timestamp(e.timestamp_millis)
                    .message(e.message)
                    .build()
                    .map_err(Error::request)
            })
            .collect::<Result<Vec<_>>>()?;
        self.client
            .put_log_events()
            .log_group_name(req.log_group)
            .log_stream_name(req.log_stream)
            .set_log_events(Some(events))
            .send()
            .await
            .map_err(map_sdk_error)?;
        Ok(())
    }
}

/// Implements [ObjectStore][crate::stub::ObjectStore] using S3.
#[derive(Clone, Debug)]
pub struct S3 {
    client: aws_sdk_s3::Client,
}

impl S3 {
    /// Creates a new S3 client from the shared SDK configuration.
    pub fn new(config: &SdkConfig) -> Self {
        Self::from_client(aws_sdk_s3::Client::new(config))
    }

    /// Wraps an existing S3 client.
    pub fn from_client(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

impl crate::stub::ObjectStore for S3 {
    async fn head_bucket(&self, bucket: String) -> Result<()> {
        self.client
            .head_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(map_status_error)?;
        Ok(())
    }

    async fn create_bucket(&self, req: CreateBucketRequest) -> Result<()> {
        use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
        let configuration = req.location_constraint.map(|region| {
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region.as_str()))
                .build()
        });
        self.client
            .create_bucket()
            .bucket(req.bucket)
            .set_create_bucket_configuration(configuration)
            .send()
            .await
            .map_err(map_sdk_error)?;
        Ok(())
    }

    async fn put_object(&self, req: PutObjectRequest) -> Result<()> {
        use aws_sdk_s3::primitives::ByteStream;
        self.client
            .put_object()
            .bucket(req.bucket)
            .key(req.key)
            .body(ByteStream::from(req.body))
            .set_content_type(req.content_type)
            .send()
            .await
            .map_err(map_sdk_error)?;
        Ok(())
    }
}

/// Implements [SecretStore][crate::stub::SecretStore] using Secrets Manager.
#[derive(Clone, Debug)]
pub struct SecretsManager {
    client: aws_sdk_secretsmanager::Client,
}

impl SecretsManager {
    /// Creates a new Secrets Manager client from the shared SDK configuration.
    pub fn new(config: &SdkConfig) -> Self {
        Self::from_client(aws_sdk_secretsmanager::Client::new(config))
    }

    /// Wraps an existing Secrets Manager client.
    pub fn from_client(client: aws_sdk_secretsmanager::Client) -> Self {
        Self { client }
    }
}

impl crate::stub::SecretStore for SecretsManager {
    async fn put_secret_value(&self, req: SecretValueRequest) -> Result<()> {
        self.client
            .put_secret_value()
            .secret_id(req.name)
            .secret_string(req.value)
            .send()
            .await
            .map_err(map_sdk_error)?;
        Ok(())
    }

    async fn create_secret(&self, req: SecretValueRequest) -> Result<()> {
        self.client
            .create_secret()
            .name(req.name)
            .secret_string(req.value)
            .send()
            .await
            .map_err(map_sdk_error)?;
        Ok(())
    }

    async fn get_secret_value(&self, name: String) -> Result<Option<String>> {
        let response = self
            .client
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(map_sdk_error)?;
        Ok(response.secret_string().map(str::to_string))
    }
}
