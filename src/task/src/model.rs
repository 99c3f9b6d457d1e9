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

//! Requests sent through the [stub][crate::stub] traits.
//!
//! These types carry only the fields the task sets.

/// A request to create a bucket.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct CreateBucketRequest {
    /// The bucket name.
    pub bucket: String,

    /// The region where the bucket is created.
    ///
    /// `None` creates the bucket in the service default region. S3 rejects a
    /// location constraint equal to that default.
    pub location_constraint: Option<String>,
}

impl CreateBucketRequest {
    /// Creates a new, empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [bucket][CreateBucketRequest::bucket].
    pub fn set_bucket<T: Into<String>>(mut self, v: T) -> Self {
        self.bucket = v.into();
        self
    }

    /// Sets or clears the value of [location_constraint][CreateBucketRequest::location_constraint].
    pub fn set_or_clear_location_constraint<T: Into<String>>(mut self, v: Option<T>) -> Self {
        self.location_constraint = v.map(Into::into);
        self
    }
}

/// A request to write an object.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct PutObjectRequest {
    /// The bucket receiving the object.
    pub bucket: String,
    /// The object name.
    pub key: String,
    /// The object contents.
    pub body: bytes::Bytes,
    /// The `Content-Type` stored with the object.
    pub content_type: Option<String>,
}

impl PutObjectRequest {
    /// Creates a new, empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [bucket][PutObjectRequest::bucket].
    pub fn set_bucket<T: Into<String>>(mut self, v: T) -> Self {
        self.bucket = v.into();
        self
    }

    /// Sets the value of [key][PutObjectRequest::key].
    pub fn set_key<T: Into<String>>(mut self, v: T) -> Self {
        self.key = v.into();
        self
    }

    /// Sets the value of [body][PutObjectRequest::body].
    pub fn set_body<T: Into<bytes::Bytes>>(mut self, v: T) -> Self {
        self.body = v.into();
        self
    }

    /// Sets the value of [content_type][PutObjectRequest::content_type].
    pub fn set_content_type<T: Into<String>>(mut self, v: T) -> Self {
        self.content_type = Some(v.into());
        self
    }
}

/// A request to store a new value in a secret, or to create the secret.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct SecretValueRequest {
    /// The secret name.
    pub name: String,
    /// The secret value, stored as a string.
    pub value: String,
}

impl SecretValueRequest {
    /// Creates a new, empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [name][SecretValueRequest::name].
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    /// Sets the value of [value][SecretValueRequest::value].
    pub fn set_value<T: Into<String>>(mut self, v: T) -> Self {
        self.value = v.into();
        self
    }
}

/// A single log entry shipped to the log destination.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct LogEvent {
    /// Milliseconds since the Unix epoch.
    pub timestamp_millis: i64,
    /// The formatted log line.
    pub message: String,
}

impl LogEvent {
    /// Creates an event with the given timestamp and message.
    pub fn new<T: Into<String>>(timestamp_millis: i64, message: T) -> Self {
        Self {
            timestamp_millis,
            message: message.into(),
        }
    }
}

/// A request to append events to a log stream.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct PutLogEventsRequest {
    /// The log group containing the stream.
    pub log_group: String,
    /// The stream receiving the events.
    pub log_stream: String,
    /// The events, in chronological order.
    pub events: Vec<LogEvent>,
}

impl PutLogEventsRequest {
    /// Creates a new, empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [log_group][PutLogEventsRequest::log_group].
    pub fn set_log_group<T: Into<String>>(mut self, v: T) -> Self {
        self.log_group = v.into();
        self
    }

    /// Sets the value of [log_stream][PutLogEventsRequest::log_stream].
    pub fn set_log_stream<T: Into<String>>(mut self, v: T) -> Self {
        self.log_stream = v.into();
        self
    }

    /// Sets the value of [events][PutLogEventsRequest::events].
    pub fn set_events<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<LogEvent>,
    {
        self.events = v.into_iter().map(Into::into).collect();
        self
    }
}
