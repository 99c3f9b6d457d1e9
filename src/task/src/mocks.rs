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
use crate::error::{Error, ServiceDetails};
use crate::model::{
    CreateBucketRequest, PutLogEventsRequest, PutObjectRequest, SecretValueRequest,
};

mockall::mock! {
    #[derive(Debug)]
    pub LogService {}
    impl crate::stub::LogService for LogService {
        async fn describe_log_groups(&self, prefix: String) -> Result<Vec<String>>;
        async fn create_log_group(&self, log_group: String) -> Result<()>;
        async fn create_log_stream(&self, log_group: String, log_stream: String) -> Result<()>;
        async fn put_log_events(&self, req: PutLogEventsRequest) -> Result<()>;
    }
}

mockall::mock! {
    #[derive(Debug)]
    pub ObjectStore {}
    impl crate::stub::ObjectStore for ObjectStore {
        async fn head_bucket(&self, bucket: String) -> Result<()>;
        async fn create_bucket(&self, req: CreateBucketRequest) -> Result<()>;
        async fn put_object(&self, req: PutObjectRequest) -> Result<()>;
    }
}

mockall::mock! {
    #[derive(Debug)]
    pub SecretStore {}
    impl crate::stub::SecretStore for SecretStore {
        async fn put_secret_value(&self, req: SecretValueRequest) -> Result<()>;
        async fn create_secret(&self, req: SecretValueRequest) -> Result<()>;
        async fn get_secret_value(&self, name: String) -> Result<Option<String>>;
    }
}

/// A service error with the given code and no other details.
pub(crate) fn service_error(code: &str) -> Error {
    Error::service(ServiceDetails::new(code))
}

/// A `HeadBucket`-style error, reporting the HTTP status as the code.
pub(crate) fn status_error(status: u16) -> Error {
    Error::service(ServiceDetails::new(status.to_string()).set_http_status_code(status))
}
