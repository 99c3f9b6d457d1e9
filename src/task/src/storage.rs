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

//! Provision the bucket and write the fact objects.

use crate::Result;
use crate::error::{Error, MalformedErrorCode};
use crate::model::{CreateBucketRequest, PutObjectRequest};
use crate::stub::ObjectStore;
use chrono::NaiveDateTime;

/// The region where buckets are created without a location constraint.
pub const DEFAULT_REGION: &str = "us-east-1";

/// The format of the invocation timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NOT_FOUND: u16 = 404;

/// Returns the location constraint used to create a bucket in `region`.
///
/// Buckets in the default region must be created without a constraint.
///
/// # Example
/// ```
/// use cat_fact_task::storage::location_constraint;
/// assert_eq!(location_constraint(Some("us-east-1")), None);
/// assert_eq!(location_constraint(Some("eu-west-1")), Some("eu-west-1"));
/// ```
pub fn location_constraint(region: Option<&str>) -> Option<&str> {
    region.filter(|r| *r != DEFAULT_REGION)
}

/// Returns the object key for a fact fetched at `timestamp`.
///
/// # Example
/// ```
/// use cat_fact_task::storage::object_key;
/// use chrono::NaiveDate;
/// let ts = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(14, 30, 0).unwrap();
/// assert_eq!(object_key(&ts), "cat_fact_2024-03-05_14-30-00.json");
/// ```
pub fn object_key(timestamp: &NaiveDateTime) -> String {
    let ts = timestamp
        .format(TIMESTAMP_FORMAT)
        .to_string()
        .replace(' ', "_")
        .replace(':', "-");
    format!("cat_fact_{ts}.json")
}

/// Ensures the bucket called `name` exists.
///
/// Returns `Ok(true)` if the bucket exists, or was created. Returns `Ok(false)`
/// if the bucket could not be checked or created, the problem is logged.
///
/// `HeadBucket` is expected to report the HTTP status as its error code. An
/// error that does not follow this convention is returned as a
/// [malformed][Error::is_malformed] error, and transport errors are returned
/// unchanged.
pub async fn ensure_bucket<S>(store: &S, name: &str, region: Option<&str>) -> Result<bool>
where
    S: ObjectStore,
{
    let e = match store.head_bucket(name.to_string()).await {
        Ok(()) => return Ok(true),
        Err(e) if e.service_details().is_none() => return Err(e),
        Err(e) => e,
    };
    if head_status(&e)? != NOT_FOUND {
        tracing::error!("Error checking bucket: {e}");
        return Ok(false);
    }

    tracing::info!("Bucket {name} does not exist. Creating...");
    let request = CreateBucketRequest::new()
        .set_bucket(name)
        .set_or_clear_location_constraint(location_constraint(region));
    match store.create_bucket(request).await {
        Ok(()) => {
            tracing::info!("Bucket {name} created successfully.");
            Ok(true)
        }
        Err(e) => {
            tracing::error!("Failed to create bucket: {e}");
            Ok(false)
        }
    }
}

fn head_status(e: &Error) -> Result<u16> {
    const OPERATION: &str = "HeadBucket";
    let code = e.service_code().ok_or_else(|| {
        Error::malformed(MalformedErrorCode::Missing {
            operation: OPERATION,
        })
    })?;
    code.parse::<u16>().map_err(|_| {
        Error::malformed(MalformedErrorCode::NotNumeric {
            operation: OPERATION,
            code: code.to_string(),
        })
    })
}

/// Writes `payload` as a JSON object called `key` in `bucket`.
///
/// Overwrites any existing object with the same key.
pub async fn upload<S>(
    store: &S,
    payload: &serde_json::Value,
    bucket: &str,
    key: &str,
) -> Result<()>
where
    S: ObjectStore,
{
    let body = serde_json::to_vec(payload).map_err(Error::request)?;
    let request = PutObjectRequest::new()
        .set_bucket(bucket)
        .set_key(key)
        .set_body(body)
        .set_content_type("application/json");
    store.put_object(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockObjectStore, service_error, status_error};
    use chrono::NaiveDate;
    use serde_json::json;
    use test_case::test_case;

    type TestResult = anyhow::Result<()>;

    #[test_case(Some("us-east-1"), None; "default region")]
    #[test_case(Some("eu-west-1"), Some("eu-west-1"); "other region")]
    #[test_case(Some("ap-southeast-2"), Some("ap-southeast-2"); "far region")]
    #[test_case(None, None; "unknown region")]
    fn constraint(region: Option<&str>, want: Option<&str>) {
        assert_eq!(location_constraint(region), want);
    }

    #[test_case(2024, 3, 5, 14, 30, 0, "cat_fact_2024-03-05_14-30-00.json")]
    #[test_case(1999, 12, 31, 23, 59, 59, "cat_fact_1999-12-31_23-59-59.json")]
    #[test_case(2025, 1, 1, 0, 0, 0, "cat_fact_2025-01-01_00-00-00.json")]
    fn key(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, want: &str) {
        let ts = NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|d| d.and_hms_opt(h, mi, s))
            .unwrap();
        assert_eq!(object_key(&ts), want);
    }

    #[tokio::test]
    async fn bucket_exists() -> TestResult {
        let mut mock = MockObjectStore::new();
        mock.expect_head_bucket()
            .withf(|b| b == "my-bucket")
            .times(2)
            .returning(|_| Ok(()));
        mock.expect_create_bucket().never();

        assert!(ensure_bucket(&mock, "my-bucket", Some("eu-west-1")).await?);
        assert!(ensure_bucket(&mock, "my-bucket", Some("eu-west-1")).await?);
        Ok(())
    }

    #[test_case(Some("us-east-1"), None)]
    #[test_case(Some("eu-west-1"), Some("eu-west-1"))]
    #[tokio::test]
    async fn bucket_created(
        region: Option<&'static str>,
        want: Option<&'static str>,
    ) -> TestResult {
        let mut mock = MockObjectStore::new();
        mock.expect_head_bucket()
            .times(1)
            .returning(|_| Err(status_error(404)));
        mock.expect_create_bucket()
            .withf(move |r| r.bucket == "my-bucket" && r.location_constraint.as_deref() == want)
            .times(1)
            .returning(|_| Ok(()));

        assert!(ensure_bucket(&mock, "my-bucket", region).await?);
        Ok(())
    }

    #[tokio::test]
    async fn bucket_create_fails() -> TestResult {
        let mut mock = MockObjectStore::new();
        mock.expect_head_bucket()
            .returning(|_| Err(status_error(404)));
        mock.expect_create_bucket()
            .times(1)
            .returning(|_| Err(service_error("BucketAlreadyExists")));

        assert!(!ensure_bucket(&mock, "my-bucket", Some("eu-west-1")).await?);
        Ok(())
    }

    #[test_case(403)]
    #[test_case(400)]
    #[test_case(500)]
    #[tokio::test]
    async fn bucket_check_fails(status: u16) -> TestResult {
        let mut mock = MockObjectStore::new();
        mock.expect_head_bucket()
            .returning(move |_| Err(status_error(status)));
        mock.expect_create_bucket().never();

        assert!(!ensure_bucket(&mock, "my-bucket", Some("eu-west-1")).await?);
        Ok(())
    }

    #[tokio::test]
    async fn bucket_check_not_numeric() -> TestResult {
        let mut mock = MockObjectStore::new();
        mock.expect_head_bucket()
            .returning(|_| Err(service_error("NoSuchBucket")));
        mock.expect_create_bucket().never();

        let err = ensure_bucket(&mock, "my-bucket", Some("eu-west-1"))
            .await
            .unwrap_err();
        assert!(err.is_malformed(), "{err:?}");
        let source = std::error::Error::source(&err)
            .and_then(|e| e.downcast_ref::<MalformedErrorCode>());
        assert_eq!(
            source,
            Some(&MalformedErrorCode::NotNumeric {
                operation: "HeadBucket",
                code: "NoSuchBucket".to_string()
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn bucket_check_no_code() -> TestResult {
        let mut mock = MockObjectStore::new();
        mock.expect_head_bucket().returning(|_| {
            Err(Error::service(
                crate::error::ServiceDetails::default().set_http_status_code(404),
            ))
        });
        mock.expect_create_bucket().never();

        let err = ensure_bucket(&mock, "my-bucket", None).await.unwrap_err();
        assert!(err.is_malformed(), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn bucket_check_transport() -> TestResult {
        let mut mock = MockObjectStore::new();
        mock.expect_head_bucket()
            .returning(|_| Err(Error::transport("dns failure")));
        mock.expect_create_bucket().never();

        let err = ensure_bucket(&mock, "my-bucket", None).await.unwrap_err();
        assert!(err.is_transport(), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn upload_success() -> TestResult {
        let fact = json!({"fact": "Cats sleep 70% of their lives.", "length": 29});
        let want = serde_json::to_vec(&fact)?;
        let mut mock = MockObjectStore::new();
        mock.expect_put_object()
            .withf(move |r| {
                r.bucket == "my-bucket"
                    && r.key == "cat_fact_2024-03-05_14-30-00.json"
                    && r.body.as_ref() == want.as_slice()
                    && r.content_type.as_deref() == Some("application/json")
            })
            .times(1)
            .returning(|_| Ok(()));

        upload(&mock, &fact, "my-bucket", "cat_fact_2024-03-05_14-30-00.json").await?;
        Ok(())
    }

    #[tokio::test]
    async fn upload_error() -> TestResult {
        let mut mock = MockObjectStore::new();
        mock.expect_put_object()
            .returning(|_| Err(service_error("AccessDenied")));

        let err = upload(&mock, &json!({}), "my-bucket", "k.json")
            .await
            .unwrap_err();
        assert_eq!(err.service_code(), Some("AccessDenied"));
        Ok(())
    }
}
