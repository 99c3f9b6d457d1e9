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

//! Runs one invocation of the task.

use crate::Result;
use crate::config::Config;
use crate::facts::FactClient;
use crate::logging::LoggingContext;
use crate::secrets::{read_secret, write_secret};
use crate::storage::{TIMESTAMP_FORMAT, ensure_bucket, object_key, upload};
use crate::stub::{LogService, ObjectStore, SecretStore};
use chrono::NaiveDateTime;

/// How an invocation ended, when it did not fail.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Outcome {
    /// The fact was uploaded with this key.
    Uploaded { key: String },
    /// The fact endpoint did not return a fact.
    NoFact,
    /// No bucket was configured.
    MissingBucketName,
    /// The bucket does not exist and could not be created, or cannot be checked.
    BucketUnavailable,
}

/// The collaborators of one invocation.
///
/// # Example
/// ```no_run
/// # async fn sample(
/// #     logging: cat_fact_task::logging::LoggingContext<cat_fact_task::aws::CloudWatchLogs>,
/// #     sdk_config: aws_config::SdkConfig,
/// # ) -> cat_fact_task::Result<()> {
/// use cat_fact_task::aws::{S3, SecretsManager, region};
/// use cat_fact_task::config::Config;
/// use cat_fact_task::facts::FactClient;
/// use cat_fact_task::task::Task;
/// let config = Config::default().set_bucket_name("my-bucket");
/// let task = Task::new(
///     FactClient::new(&config.fact_endpoint),
///     S3::new(&sdk_config),
///     SecretsManager::new(&sdk_config),
/// )
/// .with_region(region(&sdk_config));
/// let outcome = task.run(&logging, &config).await?;
/// println!("{outcome:?}");
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct Task<O, S> {
    facts: FactClient,
    objects: O,
    secrets: S,
    region: Option<String>,
    clock: fn() -> NaiveDateTime,
}

impl<O, S> Task<O, S>
where
    O: ObjectStore,
    S: SecretStore,
{
    /// Creates a task using the given fact source and services.
    ///
    /// The task creates buckets without a location constraint unless a region
    /// is set with [with_region][Task::with_region].
    pub fn new(facts: FactClient, objects: O, secrets: S) -> Self {
        Self {
            facts,
            objects,
            secrets,
            region: None,
            clock: local_now,
        }
    }

    /// Sets the region used to create the bucket.
    pub fn with_region<T: Into<String>>(mut self, v: Option<T>) -> Self {
        self.region = v.map(Into::into);
        self
    }

    /// Sets the clock recording the invocation timestamp.
    pub fn with_clock(mut self, v: fn() -> NaiveDateTime) -> Self {
        self.clock = v;
        self
    }

    /// Runs the invocation.
    ///
    /// Returns an error only if the log destination cannot be provisioned, the
    /// secret round trip fails, or a request fails below the service layer.
    /// Every other problem is logged and reported as an [Outcome]. A failure to
    /// ship the logs is reported on the console only.
    pub async fn run<L>(&self, logging: &LoggingContext<L>, config: &Config) -> Result<Outcome>
    where
        L: LogService,
    {
        logging.bootstrap(&config.log_group).await?;
        let outcome = self.execute(config).await?;
        if let Err(e) = logging.flush().await {
            tracing::warn!("Failed to ship the logs: {e}");
        }
        Ok(outcome)
    }

    async fn execute(&self, config: &Config) -> Result<Outcome> {
        let started = (self.clock)();
        tracing::info!("Executed [{}]", started.format(TIMESTAMP_FORMAT));

        write_secret(&self.secrets, &config.secret_name, &config.secret_value).await?;
        match read_secret(&self.secrets, &config.secret_name).await? {
            Some(value) => tracing::info!("Retrieved secret value: {value}"),
            None => tracing::warn!("Secret {} has no value.", config.secret_name),
        }

        let Some(fact) = self.facts.fetch_fact().await? else {
            tracing::error!("Failed to get cat fact");
            return Ok(Outcome::NoFact);
        };

        let Some(bucket) = config.bucket_name() else {
            tracing::error!("S3_BUCKET_NAME environment variable is not set");
            return Ok(Outcome::MissingBucketName);
        };

        let region = self.region.as_deref();
        if !ensure_bucket(&self.objects, bucket, region).await? {
            tracing::error!("Failed to ensure bucket exists");
            return Ok(Outcome::BucketUnavailable);
        }

        let key = object_key(&started);
        upload(&self.objects, &fact, bucket, &key).await?;
        tracing::info!("Cat fact uploaded to S3: {key}");
        Ok(Outcome::Uploaded { key })
    }
}

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}
