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

//! Configuration for a single invocation.
//!
//! Every setting can be given as a command-line flag or through the
//! environment, the flag takes precedence. The scheduler that launches the task
//! normally sets only `S3_BUCKET_NAME`.

use clap::Parser;
use std::time::Duration;

/// The default log group.
pub const DEFAULT_LOG_GROUP: &str = "/task/cats";

/// The default fact endpoint.
pub const DEFAULT_FACT_ENDPOINT: &str = "https://catfact.ninja/fact";

/// The configuration for one invocation of the task.
///
/// # Example
/// ```
/// use cat_fact_task::config::Config;
/// use clap::Parser;
/// let config = Config::parse_from(["cat-fact-task", "--bucket-name", "my-bucket"]);
/// assert_eq!(config.bucket_name(), Some("my-bucket"));
/// ```
#[derive(Clone, Debug, Parser)]
#[command(version, about)]
#[non_exhaustive]
pub struct Config {
    /// The bucket receiving the facts. Nothing is uploaded if unset.
    #[arg(long, env = "S3_BUCKET_NAME")]
    pub bucket_name: Option<String>,

    /// The log group mirroring the invocation logs.
    #[arg(long, env = "TASK_LOG_GROUP", default_value = DEFAULT_LOG_GROUP)]
    pub log_group: String,

    /// The endpoint returning a fact as a JSON document.
    #[arg(long, env = "CAT_FACT_ENDPOINT", default_value = DEFAULT_FACT_ENDPOINT)]
    pub fact_endpoint: String,

    /// The name of the secret written and read back on each invocation.
    #[arg(long, env = "TASK_SECRET_NAME", default_value = "example_secret")]
    pub secret_name: String,

    /// The value stored in the secret.
    #[arg(long, env = "TASK_SECRET_VALUE", default_value = "example_secret_value")]
    pub secret_value: String,

    /// How long the process waits before exiting, for example `120s` or `2m`.
    ///
    /// The hosting container is torn down as soon as the process exits, the
    /// delay gives the log agents time to drain.
    #[arg(
        long,
        env = "TASK_EXIT_DELAY",
        default_value = "120s",
        value_parser = humantime::parse_duration
    )]
    pub exit_delay: Duration,
}

impl Config {
    /// The bucket name, treating an empty value as unset.
    pub fn bucket_name(&self) -> Option<&str> {
        self.bucket_name.as_deref().filter(|s| !s.is_empty())
    }

    /// Sets the value of [bucket_name][Config::bucket_name].
    pub fn set_bucket_name<T: Into<String>>(mut self, v: T) -> Self {
        self.bucket_name = Some(v.into());
        self
    }

    /// Clears the value of [bucket_name][Config::bucket_name].
    pub fn clear_bucket_name(mut self) -> Self {
        self.bucket_name = None;
        self
    }

    /// Sets the value of [log_group][Config::log_group].
    pub fn set_log_group<T: Into<String>>(mut self, v: T) -> Self {
        self.log_group = v.into();
        self
    }

    /// Sets the value of [fact_endpoint][Config::fact_endpoint].
    pub fn set_fact_endpoint<T: Into<String>>(mut self, v: T) -> Self {
        self.fact_endpoint = v.into();
        self
    }

    /// Sets the value of [secret_name][Config::secret_name].
    pub fn set_secret_name<T: Into<String>>(mut self, v: T) -> Self {
        self.secret_name = v.into();
        self
    }

    /// Sets the value of [secret_value][Config::secret_value].
    pub fn set_secret_value<T: Into<String>>(mut self, v: T) -> Self {
        self.secret_value = v.into();
        self
    }

    /// Sets the value of [exit_delay][Config::exit_delay].
    pub fn set_exit_delay(mut self, v: Duration) -> Self {
        self.exit_delay = v;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bucket_name: None,
            log_group: DEFAULT_LOG_GROUP.to_string(),
            fact_endpoint: DEFAULT_FACT_ENDPOINT.to_string(),
            secret_name: "example_secret".to_string(),
            secret_value: "example_secret_value".to_string(),
            exit_delay: Duration::from_secs(120),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scoped_env::ScopedEnv;
    use test_case::test_case;

    const VARS: [&str; 6] = [
        "S3_BUCKET_NAME",
        "TASK_LOG_GROUP",
        "CAT_FACT_ENDPOINT",
        "TASK_SECRET_NAME",
        "TASK_SECRET_VALUE",
        "TASK_EXIT_DELAY",
    ];

    fn clear_env() -> Vec<ScopedEnv<&'static str>> {
        VARS.iter().map(|v| ScopedEnv::remove(*v)).collect()
    }

    // These tests must run serially because they manipulate the environment.
    #[test]
    #[serial_test::serial]
    fn defaults() -> anyhow::Result<()> {
        let _e = clear_env();
        let config = Config::try_parse_from(["cat-fact-task"])?;
        assert_eq!(config.bucket_name(), None);
        assert_eq!(config.log_group, "/task/cats");
        assert_eq!(config.fact_endpoint, "https://catfact.ninja/fact");
        assert_eq!(config.secret_name, "example_secret");
        assert_eq!(config.secret_value, "example_secret_value");
        assert_eq!(config.exit_delay, Duration::from_secs(120));

        let default = Config::default();
        assert_eq!(format!("{config:?}"), format!("{default:?}"));
        Ok(())
    }

    #[test]
    #[serial_test::serial]
    fn from_env() -> anyhow::Result<()> {
        let _e = clear_env();
        let _bucket = ScopedEnv::set("S3_BUCKET_NAME", "env-bucket");
        let _group = ScopedEnv::set("TASK_LOG_GROUP", "/task/dogs");
        let _delay = ScopedEnv::set("TASK_EXIT_DELAY", "2m");
        let config = Config::try_parse_from(["cat-fact-task"])?;
        assert_eq!(config.bucket_name(), Some("env-bucket"));
        assert_eq!(config.log_group, "/task/dogs");
        assert_eq!(config.exit_delay, Duration::from_secs(120));
        Ok(())
    }

    #[test]
    #[serial_test::serial]
    fn flags_override_env() -> anyhow::Result<()> {
        let _e = clear_env();
        let _bucket = ScopedEnv::set("S3_BUCKET_NAME", "env-bucket");
        let config = Config::try_parse_from([
            "cat-fact-task",
            "--bucket-name",
            "flag-bucket",
            "--exit-delay",
            "0s",
        ])?;
        assert_eq!(config.bucket_name(), Some("flag-bucket"));
        assert_eq!(config.exit_delay, Duration::ZERO);
        Ok(())
    }

    #[test]
    #[serial_test::serial]
    fn empty_bucket_is_unset() -> anyhow::Result<()> {
        let _e = clear_env();
        let _bucket = ScopedEnv::set("S3_BUCKET_NAME", "");
        let config = Config::try_parse_from(["cat-fact-task"])?;
        assert_eq!(config.bucket_name(), None);
        Ok(())
    }

    #[test]
    #[serial_test::serial]
    fn bad_delay() {
        let _e = clear_env();
        let got = Config::try_parse_from(["cat-fact-task", "--exit-delay", "soon"]);
        assert!(got.is_err(), "{got:?}");
    }

    #[test_case(None, None; "unset")]
    #[test_case(Some(""), None; "empty")]
    #[test_case(Some("b"), Some("b"); "set")]
    fn bucket_name(input: Option<&str>, want: Option<&str>) {
        let config = match input {
            None => Config::default().clear_bucket_name(),
            Some(b) => Config::default().set_bucket_name(b),
        };
        assert_eq!(config.bucket_name(), want);
    }

    #[test]
    fn setters() {
        let config = Config::default()
            .set_log_group("/a")
            .set_fact_endpoint("http://localhost/fact")
            .set_secret_name("n")
            .set_secret_value("v")
            .set_exit_delay(Duration::from_secs(1));
        assert_eq!(config.log_group, "/a");
        assert_eq!(config.fact_endpoint, "http://localhost/fact");
        assert_eq!(config.secret_name, "n");
        assert_eq!(config.secret_value, "v");
        assert_eq!(config.exit_delay, Duration::from_secs(1));
    }
}
