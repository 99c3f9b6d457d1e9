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

//! Runs one invocation of the cat fact task.

use aws_config::BehaviorVersion;
use cat_fact_task::aws::{CloudWatchLogs, S3, SecretsManager, region};
use cat_fact_task::config::Config;
use cat_fact_task::facts::FactClient;
use cat_fact_task::logging::LoggingContext;
use cat_fact_task::task::Task;
use clap::Parser;

// The logging subscriber is installed for the current thread only.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;

    let logs = CloudWatchLogs::new(&sdk_config);
    let logging = LoggingContext::builder(logs).install();
    let task = Task::new(
        FactClient::new(&config.fact_endpoint),
        S3::new(&sdk_config),
        SecretsManager::new(&sdk_config),
    )
    .with_region(region(&sdk_config));

    match task.run(&logging, &config).await {
        Ok(outcome) => tracing::debug!(?outcome, "invocation finished"),
        Err(e) => {
            tracing::error!("Invocation failed: {e}");
            if let Err(flush) = logging.flush().await {
                tracing::warn!("Failed to ship the logs: {flush}");
            }
            return Err(e.into());
        }
    }
    logging.shutdown().await;

    tokio::time::sleep(config.exit_delay).await;
    Ok(())
}
