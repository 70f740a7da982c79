//! Rolling Logger
//!
//! A `tracing` layer that keeps the most recent records in a circular buffer
//! and mirrors every record to the browser console (stderr off wasm32).

use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex, OnceLock};

use chrono::{DateTime, Utc};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::Layer;

/// Records kept when no capacity is given
pub const DEFAULT_CAPACITY: usize = 256;

static GLOBAL_BUFFER: OnceLock<Arc<RollingBuffer>> = OnceLock::new();

/// One captured log record
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogRecord {
    /// `[12:00:01.250] INFO app::target: message`
    pub fn format_line(&self, app_name: &str) -> String {
        format!(
            "[{}] [{}] {} {}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            app_name,
            self.level,
            self.target,
            self.message
        )
    }
}

/// Bounded FIFO of log records; the oldest record is evicted first
#[derive(Debug)]
pub struct RollingBuffer {
    capacity: usize,
    records: Mutex<VecDeque<LogRecord>>,
}

impl RollingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push(&self, record: LogRecord) {
        let Ok(mut records) = self.records.lock() else {
            return;
        };
        while records.len() >= self.capacity {
            records.pop_front();
        }
        records.push_back(record);
    }

    /// Copy of the buffered records, oldest first
    pub fn snapshot(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|records| records.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Collects the `message` field and appends the remaining fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// `tracing` layer feeding a [`RollingBuffer`] and the console
pub struct RollingLayer {
    app_name: String,
    buffer: Arc<RollingBuffer>,
    echo: bool,
}

impl RollingLayer {
    pub fn new(app_name: impl Into<String>, buffer: Arc<RollingBuffer>) -> Self {
        Self {
            app_name: app_name.into(),
            buffer,
            echo: true,
        }
    }

    /// Keep records in the buffer only
    pub fn silent(mut self) -> Self {
        self.echo = false;
        self
    }
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let meta = event.metadata();
        let record = LogRecord {
            timestamp: Utc::now(),
            level: *meta.level(),
            target: meta.target().to_string(),
            message: format!("{}{}", visitor.message, visitor.fields),
        };

        if self.echo {
            emit(&record.level, &record.format_line(&self.app_name));
        }
        self.buffer.push(record);
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: &Level, line: &str) {
    let value = line.into();
    match *level {
        Level::ERROR => web_sys::console::error_1(&value),
        Level::WARN => web_sys::console::warn_1(&value),
        Level::DEBUG | Level::TRACE => web_sys::console::debug_1(&value),
        _ => web_sys::console::log_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: &Level, line: &str) {
    eprintln!("{}", line);
}

/// Install the global subscriber (INFO and above).
///
/// Fails if a global subscriber is already set.
pub fn init_logger(app_name: &str, capacity: usize) -> Result<(), TryInitError> {
    let buffer = GLOBAL_BUFFER
        .get_or_init(|| Arc::new(RollingBuffer::new(capacity)))
        .clone();

    tracing_subscriber::registry()
        .with(RollingLayer::new(app_name, buffer).with_filter(LevelFilter::INFO))
        .try_init()
}

/// Records captured by the global logger, oldest first
pub fn recent() -> Vec<LogRecord> {
    GLOBAL_BUFFER
        .get()
        .map(|buffer| buffer.snapshot())
        .unwrap_or_default()
}

pub fn info(message: &str) {
    tracing::info!(target: "rolling_logger", "{}", message);
}

pub fn error(message: &str) {
    tracing::error!(target: "rolling_logger", "{}", message);
}
