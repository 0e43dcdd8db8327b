use std::{
    fmt::Write as _,
    sync::{Arc, Mutex},
};

use tracing::{level_filters::LevelFilter, Subscriber};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    registry::LookupSpan,
    Layer,
};

///////////////////////////////////////////////////////////////////////////////
//                                  Logging                                  //
///////////////////////////////////////////////////////////////////////////////

/// Holds a single log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: tracing::Level,
    pub target: String,
    pub message: String,
}

/// Type-alias for storage for logs
pub type LogStorage = Arc<Mutex<Vec<LogEntry>>>;

// Memory Layer ///////////////////////////////////////////////////////////////

/// Custom tracing layer that captures logs to memory
pub struct MemoryLayer {
    storage: LogStorage,
}

impl MemoryLayer {
    pub fn new(storage: LogStorage) -> Self {
        Self { storage }
    }
}

/// impl adding new entry to MemoryLayer.LogStorage upon receiving a tracing event
impl<S> Layer<S> for MemoryLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::new();
        event.record(&mut visitor);

        let entry = LogEntry {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.message,
        };

        // lock mutex and push new entry to LogStorage
        if let Ok(mut logs) = self.storage.lock() {
            logs.push(entry);
        }
    }
}

// Field Visitor //////////////////////////////////////////////////////////////

/// Visitor to flatten the fields of a tracing event into one line.
/// The `message` field comes first, the rest follow as `name=value`.
struct FieldVisitor {
    message: String,
}

impl FieldVisitor {
    pub fn new() -> Self {
        Self {
            message: String::new(),
        }
    }
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let fields = std::mem::take(&mut self.message);
            let _ = write!(self.message, "{:?}{}", value, fields);
        } else {
            let _ = write!(self.message, " {}={:?}", field.name(), value);
        }
    }
}

// Logger /////////////////////////////////////////////////////////////////////

/// Installs the subscriber for the current thread for as long as it lives.
///
/// Human readable output goes to stderr, filtered by `level`, so stdout stays
/// reserved for the transcript. Every event is also kept in `storage`.
pub struct Logger {
    _guard: tracing::subscriber::DefaultGuard,
    pub storage: LogStorage,
}

impl Logger {
    pub fn new(level: LevelFilter) -> Self {
        let storage = Arc::new(Mutex::new(Vec::new()));
        let memory_layer = MemoryLayer::new(storage.clone());
        let subscriber = Logger::create_subscriber(memory_layer, level);
        let guard = tracing::subscriber::set_default(subscriber);

        Self {
            _guard: guard,
            storage,
        }
    }

    /// Maps a `-v` count onto a level, starting from warnings.
    pub fn level_from_verbosity(verbose: u8) -> LevelFilter {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Snapshot of the captured entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.storage
            .lock()
            .map(|logs| logs.clone())
            .unwrap_or_default()
    }

    fn create_subscriber(
        memory_layer: MemoryLayer,
        level: LevelFilter,
    ) -> impl Subscriber + Send + Sync {
        tracing_subscriber::registry().with(memory_layer).with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(level),
        )
    }
}
