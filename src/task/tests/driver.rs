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

//! Integration tests against the production services.
//!
//! These tests need AWS credentials and a region from the environment. They
//! create buckets and secrets with random names, and remove them on success.

#[cfg(all(test, feature = "run-integration-tests"))]
mod driver {
    use aws_config::BehaviorVersion;
    use cat_fact_task::aws::{CloudWatchLogs, S3, SecretsManager, region};
    use cat_fact_task::config::Config;
    use cat_fact_task::facts::FactClient;
    use cat_fact_task::logging::LoggingContext;
    use cat_fact_task::secrets::{read_secret, write_secret};
    use cat_fact_task::storage::ensure_bucket;
    use cat_fact_task::task::{Outcome, Task};
    use cat_fact_test_utils::resource_names::{
        random_bucket_name, random_log_stream, random_secret_name,
    };
    use cat_fact_test_utils::tracing::enable_tracing;

    type TestResult = anyhow::Result<()>;

    async fn sdk_config() -> aws_config::SdkConfig {
        aws_config::load_defaults(BehaviorVersion::latest()).await
    }

    #[tokio::test]
    async fn secrets_round_trip() -> TestResult {
        let _guard = enable_tracing();
        let sdk_config = sdk_config().await;
        let store = SecretsManager::new(&sdk_config);
        let name = random_secret_name();

        assert_eq!(read_secret(&store, &name).await?, None);
        write_secret(&store, &name, "v1").await?;
        write_secret(&store, &name, "v2").await?;
        assert_eq!(read_secret(&store, &name).await?.as_deref(), Some("v2"));

        aws_sdk_secretsmanager::Client::new(&sdk_config)
            .delete_secret()
            .secret_id(&name)
            .force_delete_without_recovery(true)
            .send()
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn bucket_provisioning() -> TestResult {
        let _guard = enable_tracing();
        let sdk_config = sdk_config().await;
        let store = S3::new(&sdk_config);
        let name = random_bucket_name();
        let region = region(&sdk_config);

        assert!(ensure_bucket(&store, &name, region.as_deref()).await?);
        assert!(ensure_bucket(&store, &name, region.as_deref()).await?);

        aws_sdk_s3::Client::new(&sdk_config)
            .delete_bucket()
            .bucket(&name)
            .send()
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn invocation() -> TestResult {
        let sdk_config = sdk_config().await;
        let bucket = random_bucket_name();
        let config = Config::default()
            .set_bucket_name(&bucket)
            .set_log_group("/task/cats-testing")
            .set_secret_name(random_secret_name());

        let logging = LoggingContext::builder(CloudWatchLogs::new(&sdk_config))
            .with_log_stream(random_log_stream())
            .install();
        let task = Task::new(
            FactClient::new(&config.fact_endpoint),
            S3::new(&sdk_config),
            SecretsManager::new(&sdk_config),
        )
        .with_region(region(&sdk_config));
        let outcome = task.run(&logging, &config).await?;
        logging.shutdown().await;

        let s3 = aws_sdk_s3::Client::new(&sdk_config);
        if let Outcome::Uploaded { key } = &outcome {
            let object = s3.get_object().bucket(&bucket).key(key).send().await?;
            let body = object.body.collect().await?.into_bytes();
            let fact: serde_json::Value = serde_json::from_slice(&body)?;
            assert!(fact.get("fact").is_some(), "{fact:?}");
            s3.delete_object().bucket(&bucket).key(key).send().await?;
            s3.delete_bucket().bucket(&bucket).send().await?;
        }
        aws_sdk_secretsmanager::Client::new(&sdk_config)
            .delete_secret()
            .secret_id(&config.secret_name)
            .force_delete_without_recovery(true)
            .send()
            .await?;
        // The public endpoint may be unavailable, that is not a failure.
        assert!(
            matches!(outcome, Outcome::Uploaded { .. } | Outcome::NoFact),
            "{outcome:?}"
        );
        Ok(())
    }
}
