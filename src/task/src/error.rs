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

//! Errors reported by the task.
//!
//! The task talks to three managed services and one public HTTP endpoint. All
//! of them report failures through [Error]. Most callers just log the error or
//! return it. The components that need to branch on a failure (for example, to
//! fall back to creating a missing secret) use the predicates and accessors on
//! [Error] instead of matching on its internals.

use std::error::Error as StdError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// The error returned by all the task components.
///
/// # Example
/// ```
/// use cat_fact_task::error::{Error, ServiceDetails};
/// let error = Error::service(ServiceDetails::new("ResourceNotFoundException"));
/// match error {
///     e if e.service_code() == Some("ResourceNotFoundException") => {
///         println!("the secret does not exist {e}");
///     }
///     e if e.is_transport() => println!("cannot reach the service {e}"),
///     e => println!("some other error {e}"),
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<BoxError>,
}

impl Error {
    /// Creates an error with the information returned by a service.
    ///
    /// # Example
    /// ```
    /// use cat_fact_task::error::{Error, ServiceDetails};
    /// let error = Error::service(ServiceDetails::new("404").set_http_status_code(404));
    /// assert_eq!(error.service_code(), Some("404"));
    /// assert_eq!(error.http_status_code(), Some(404));
    /// ```
    pub fn service(details: ServiceDetails) -> Self {
        Self {
            kind: ErrorKind::Service(Box::new(details)),
            source: None,
        }
    }

    /// Attaches the underlying SDK error to a service error.
    pub fn with_source<T: Into<BoxError>>(mut self, source: T) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The service error details, if this is a service error.
    pub fn service_details(&self) -> Option<&ServiceDetails> {
        match &self.kind {
            ErrorKind::Service(d) => Some(d.as_ref()),
            _ => None,
        }
    }

    /// The error code reported by the service, if any.
    ///
    /// Services report codes such as `ResourceNotFoundException`. Some
    /// operations, most notably `HeadBucket`, have no response body and report
    /// the HTTP status as the code.
    pub fn service_code(&self) -> Option<&str> {
        self.service_details().and_then(|d| d.code())
    }

    /// The HTTP status code, if any, associated with this error.
    pub fn http_status_code(&self) -> Option<u16> {
        self.service_details().and_then(|d| d.http_status_code)
    }

    /// Creates an error representing a problem below the service layer.
    ///
    /// # Example
    /// ```
    /// use cat_fact_task::error::Error;
    /// let error = Error::transport("connection refused");
    /// assert!(error.is_transport());
    /// ```
    pub fn transport<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Transport,
            source: Some(source.into()),
        }
    }

    /// The request did not produce a response from the service.
    ///
    /// DNS failures, refused connections, TLS problems and timeouts enforced by
    /// the SDK or the HTTP client all fall in this category.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport)
    }

    /// Creates an error representing a response that cannot be decoded.
    pub fn deser<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Deserialization,
            source: Some(source.into()),
        }
    }

    /// The response could not be deserialized.
    pub fn is_deserialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Deserialization)
    }

    /// Creates an error representing a request that cannot be built.
    pub fn request<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Request,
            source: Some(source.into()),
        }
    }

    /// The request was rejected before it was sent.
    pub fn is_request(&self) -> bool {
        matches!(self.kind, ErrorKind::Request)
    }

    /// Creates an error representing a failure to provision the log destination.
    pub fn log_provisioning(source: LogProvisioningError) -> Self {
        Self {
            kind: ErrorKind::LogProvisioning,
            source: Some(source.into()),
        }
    }

    /// The log destination could not be found or created.
    ///
    /// This is always fatal: the invocation stops before doing any work.
    pub fn is_log_provisioning(&self) -> bool {
        matches!(self.kind, ErrorKind::LogProvisioning)
    }

    /// Creates an error representing a service error with an unexpected shape.
    pub fn malformed(source: MalformedErrorCode) -> Self {
        Self {
            kind: ErrorKind::Malformed,
            source: Some(source.into()),
        }
    }

    /// A service error did not have the expected shape.
    ///
    /// This indicates a defect: either the service changed its error format or
    /// the adapter translating SDK errors is wrong. It is never treated as a
    /// recoverable condition.
    pub fn is_malformed(&self) -> bool {
        matches!(self.kind, ErrorKind::Malformed)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.kind, &self.source) {
            (ErrorKind::Service(d), _) => d.fmt(f),
            (ErrorKind::Transport, Some(e)) => write!(f, "the transport reports an error: {e}"),
            (ErrorKind::Deserialization, Some(e)) => {
                write!(f, "cannot deserialize the response {e}")
            }
            (ErrorKind::Request, Some(e)) => write!(f, "cannot build the request {e}"),
            (ErrorKind::LogProvisioning, Some(e)) => write!(f, "{e}"),
            (ErrorKind::Malformed, Some(e)) => write!(f, "{e}"),
            (_, None) => unreachable!("no constructor allows this"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &dyn StdError)
    }
}

#[derive(Debug)]
enum ErrorKind {
    Service(Box<ServiceDetails>),
    Transport,
    Deserialization,
    Request,
    LogProvisioning,
    Malformed,
}

/// The details of an error reported by a service.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct ServiceDetails {
    code: Option<String>,
    message: Option<String>,
    http_status_code: Option<u16>,
}

impl ServiceDetails {
    /// Creates the details for a service error with the given code.
    pub fn new<T: Into<String>>(code: T) -> Self {
        Self::default().set_code(code)
    }

    /// Sets the error code.
    pub fn set_code<T: Into<String>>(mut self, v: T) -> Self {
        self.code = Some(v.into());
        self
    }

    /// Sets or clears the error code.
    pub fn set_or_clear_code<T: Into<String>>(mut self, v: Option<T>) -> Self {
        self.code = v.map(Into::into);
        self
    }

    /// Sets or clears the error message.
    pub fn set_or_clear_message<T: Into<String>>(mut self, v: Option<T>) -> Self {
        self.message = v.map(Into::into);
        self
    }

    /// Sets the HTTP status code.
    pub fn set_http_status_code(mut self, v: u16) -> Self {
        self.http_status_code = Some(v);
        self
    }

    /// The error code, if the service reported one.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// The error message, if the service reported one.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The HTTP status code of the response, if known.
    pub fn http_status_code(&self) -> Option<u16> {
        self.http_status_code
    }
}

impl std::fmt::Display for ServiceDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "the service reports an error with code {} described as: {}",
            self.code.as_deref().unwrap_or("<none>"),
            self.message.as_deref().unwrap_or("<none>")
        )
    }
}

/// The log destination could not be provisioned.
#[derive(thiserror::Error, Debug)]
#[error("cannot create or check log group {log_group}: {source}")]
pub struct LogProvisioningError {
    log_group: String,
    #[source]
    source: BoxError,
}

impl LogProvisioningError {
    pub(crate) fn new<T: Into<BoxError>>(log_group: &str, source: T) -> Self {
        Self {
            log_group: log_group.to_string(),
            source: source.into(),
        }
    }

    /// The log group that could not be provisioned.
    pub fn log_group(&self) -> &str {
        &self.log_group
    }
}

/// A service error code was expected to be an HTTP status, but was not.
#[derive(thiserror::Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum MalformedErrorCode {
    /// The service error carried no code at all.
    #[error("the {operation} error has no error code")]
    Missing { operation: &'static str },

    /// The service error code is not a number.
    #[error("the {operation} error code {code:?} is not numeric")]
    NotNumeric {
        operation: &'static str,
        code: String,
    },
}
