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

//! Logging for one invocation of the task.
//!
//! The task logs with the [tracing] macros. A [LoggingContext] owns the
//! subscriber receiving those events: it prints them on the console and,
//! once [bootstrapped][LoggingContext::bootstrap], mirrors them to a log
//! stream in the centralized logging service.
//!
//! The subscriber is installed as the default for the current thread only.
//! The task runs on a single-threaded runtime, so every event emitted during
//! the invocation reaches it.

use crate::Result;
use crate::error::{Error, LogProvisioningError};
use crate::model::{LogEvent, PutLogEventsRequest};
use crate::stub::LogService;
use std::sync::{Arc, Mutex};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber, field};
use tracing_subscriber::filter::{EnvFilter, Targets};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// The error code reported when a log group or log stream already exists.
pub const RESOURCE_ALREADY_EXISTS: &str = "ResourceAlreadyExistsException";

/// The maximum number of events in a single `PutLogEvents` request.
pub const MAX_BATCH_EVENTS: usize = 10_000;

/// The maximum size of a single `PutLogEvents` request.
pub const MAX_BATCH_BYTES: usize = 1_048_576;

/// The maximum size of a single log event.
pub const MAX_EVENT_BYTES: usize = 262_144;

// Only the events emitted by this crate are mirrored.
const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

// The service counts this overhead for each event in the batch and event sizes.
const EVENT_OVERHEAD_BYTES: usize = 26;

fn provisioning_error(log_group: &str, e: Error) -> Error {
    tracing::error!("Failed to create or check log group: {e}");
    Error::log_provisioning(LogProvisioningError::new(log_group, e))
}

/// Ensures the log group called `name` exists.
///
/// Any failure is reported as a [log provisioning][Error::is_log_provisioning]
/// error, except a creation attempt losing a race with another creator.
pub async fn ensure_log_group<L>(service: &L, name: &str) -> Result<()>
where
    L: LogService,
{
    let groups = service
        .describe_log_groups(name.to_string())
        .await
        .map_err(|e| provisioning_error(name, e))?;
    if groups.iter().any(|g| g == name) {
        tracing::info!("Log group {name} already exists.");
        return Ok(());
    }
    match service.create_log_group(name.to_string()).await {
        Ok(()) => tracing::info!("Log group {name} created successfully."),
        Err(e) if e.service_code() == Some(RESOURCE_ALREADY_EXISTS) => {
            tracing::info!("Log group {name} already exists.");
        }
        Err(e) => return Err(provisioning_error(name, e)),
    }
    Ok(())
}

/// The logging state of one invocation.
///
/// # Example
/// ```no_run
/// # async fn sample(service: impl cat_fact_task::stub::LogService) -> cat_fact_task::Result<()> {
/// use cat_fact_task::logging::LoggingContext;
/// let logging = LoggingContext::builder(service).install();
/// logging.bootstrap("/task/cats").await?;
/// tracing::info!("this event is mirrored to /task/cats");
/// logging.shutdown().await;
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct LoggingContext<L> {
    service: L,
    log_stream: String,
    sink: Arc<RemoteSink>,
    _guard: DefaultGuard,
}

impl<L> LoggingContext<L>
where
    L: LogService,
{
    /// Returns a builder for a [LoggingContext].
    pub fn builder(service: L) -> Builder<L> {
        Builder::new(service)
    }

    /// The name of the log stream receiving this invocation's events.
    pub fn log_stream(&self) -> &str {
        &self.log_stream
    }

    /// Provisions the log destination and starts mirroring events to it.
    ///
    /// Creates the log group if needed, then this invocation's log stream.
    /// Events emitted before this function succeeds are only printed on the
    /// console.
    pub async fn bootstrap(&self, log_group: &str) -> Result<()> {
        ensure_log_group(&self.service, log_group).await?;
        match self
            .service
            .create_log_stream(log_group.to_string(), self.log_stream.clone())
            .await
        {
            Ok(()) => {}
            Err(e) if e.service_code() == Some(RESOURCE_ALREADY_EXISTS) => {}
            Err(e) => return Err(provisioning_error(log_group, e)),
        }
        self.sink.attach(Destination {
            log_group: log_group.to_string(),
            log_stream: self.log_stream.clone(),
        });
        Ok(())
    }

    /// Ships all the buffered events to the log destination.
    ///
    /// Does nothing if the context was never bootstrapped. If a batch is
    /// rejected, it and the following batches stay buffered for the next
    /// flush.
    pub async fn flush(&self) -> Result<()> {
        let Some((destination, events)) = self.sink.take() else {
            return Ok(());
        };
        let mut sent = 0;
        for batch in batches(&events) {
            let request = PutLogEventsRequest::new()
                .set_log_group(&destination.log_group)
                .set_log_stream(&destination.log_stream)
                .set_events(batch.iter().cloned());
            if let Err(e) = self.service.put_log_events(request).await {
                self.sink.requeue(&events[sent..]);
                return Err(e);
            }
            sent += batch.len();
        }
        Ok(())
    }

    /// Flushes the buffered events and uninstalls the subscriber.
    ///
    /// A failure to ship the events is reported on the console, there is no
    /// destination left to report it to after this call.
    pub async fn shutdown(self) {
        if let Err(e) = self.flush().await {
            tracing::warn!("Failed to ship the logs: {e}");
        }
    }
}

/// A builder for [LoggingContext].
#[derive(Debug)]
pub struct Builder<L> {
    service: L,
    log_stream: Option<String>,
    console_filter: Option<EnvFilter>,
}

impl<L> Builder<L>
where
    L: LogService,
{
    fn new(service: L) -> Self {
        Self {
            service,
            log_stream: None,
            console_filter: None,
        }
    }

    /// Sets the log stream name.
    ///
    /// The default combines the current UTC time and the process id, which is
    /// unique for each invocation.
    pub fn with_log_stream<T: Into<String>>(mut self, v: T) -> Self {
        self.log_stream = Some(v.into());
        self
    }

    /// Sets the filter for the console output.
    ///
    /// The default reads `RUST_LOG`, and falls back to `info`.
    pub fn with_console_filter(mut self, v: EnvFilter) -> Self {
        self.console_filter = Some(v);
        self
    }

    /// Creates the [LoggingContext] and installs its subscriber as the default
    /// for the current thread.
    pub fn install(self) -> LoggingContext<L> {
        let log_stream = self.log_stream.unwrap_or_else(default_log_stream);
        let console_filter = self.console_filter.unwrap_or_else(default_console_filter);
        let sink = Arc::new(RemoteSink::default());
        let console = tracing_subscriber::fmt::layer();
        let remote = RemoteLayer { sink: sink.clone() };
        let remote_filter = Targets::new().with_target(CRATE_TARGET, Level::INFO);
        let subscriber = tracing_subscriber::registry()
            .with(console.with_filter(console_filter))
            .with(remote.with_filter(remote_filter));
        let guard = tracing::subscriber::set_default(subscriber);
        LoggingContext {
            service: self.service,
            log_stream,
            sink,
            _guard: guard,
        }
    }
}

fn default_console_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn default_log_stream() -> String {
    format!(
        "{}/{}",
        chrono::Utc::now().format("%Y/%m/%d/%H-%M-%S"),
        std::process::id()
    )
}

/// Splits `events` into batches accepted by `PutLogEvents`.
fn batches(events: &[LogEvent]) -> Vec<&[LogEvent]> {
    let mut result = Vec::new();
    let mut start = 0;
    let mut bytes = 0;
    for (i, event) in events.iter().enumerate() {
        let size = event.message.len() + EVENT_OVERHEAD_BYTES;
        if i > start && (i - start == MAX_BATCH_EVENTS || bytes + size > MAX_BATCH_BYTES) {
            result.push(&events[start..i]);
            start = i;
            bytes = 0;
        }
        bytes += size;
    }
    if start < events.len() {
        result.push(&events[start..]);
    }
    result
}

/// Truncates `message` so the event fits in [MAX_EVENT_BYTES].
fn truncate(mut message: String) -> String {
    let limit = MAX_EVENT_BYTES - EVENT_OVERHEAD_BYTES;
    if message.len() <= limit {
        return message;
    }
    let mut end = limit;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    message.truncate(end);
    message
}

#[derive(Clone, Debug)]
struct Destination {
    log_group: String,
    log_stream: String,
}

/// Buffers the events until they are flushed.
#[derive(Debug, Default)]
struct RemoteSink {
    state: Mutex<SinkState>,
}

#[derive(Debug, Default)]
struct SinkState {
    destination: Option<Destination>,
    pending: Vec<LogEvent>,
}

impl RemoteSink {
    fn attach(&self, destination: Destination) {
        if let Ok(mut state) = self.state.lock() {
            state.destination = Some(destination);
        }
    }

    fn push(&self, event: LogEvent) {
        if let Ok(mut state) = self.state.lock() {
            if state.destination.is_some() {
                state.pending.push(event);
            }
        }
    }

    fn take(&self) -> Option<(Destination, Vec<LogEvent>)> {
        let mut state = self.state.lock().ok()?;
        let destination = state.destination.clone()?;
        Some((destination, std::mem::take(&mut state.pending)))
    }

    /// Puts back events that could not be shipped, ahead of any newer events.
    fn requeue(&self, events: &[LogEvent]) {
        if let Ok(mut state) = self.state.lock() {
            state.pending.splice(0..0, events.iter().cloned());
        }
    }
}

/// A layer forwarding events to a [RemoteSink].
struct RemoteLayer {
    sink: Arc<RemoteSink>,
}

impl<S> Layer<S> for RemoteLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let message = format!("[{}] {}", event.metadata().level(), visitor.finish());
        let timestamp = chrono::Utc::now().timestamp_millis();
        self.sink.push(LogEvent::new(timestamp, truncate(message)));
    }
}

/// Formats the message and the fields of an event.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            return self.message;
        }
        format!("{} {}", self.message, self.fields.join(" "))
    }
}

impl field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={value}", field.name()));
        }
    }

    fn record_debug(&mut self, field: &field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push(format!("{}={value:?}", field.name()));
        }
    }
}
