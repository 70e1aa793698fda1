//! tracing integration
//!
//! Forwards `tracing` events into a [`Logger`] so libraries that log through
//! `tracing` end up in the same dated files.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context as LayerContext, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use super::level::Level;
use super::logger::Logger;

/// Layer that writes every event it sees through a [`Logger`]
pub struct DailyLogLayer {
    logger: Arc<Logger>,
}

impl DailyLogLayer {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }
}

/// Collects the `message` field and renders other fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.record_debug(field, &value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
            return;
        }
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={:?}", field.name(), value);
    }
}

/// Render an event's fields into a single message
fn event_message(event: &Event<'_>) -> String {
    let mut visitor = MessageVisitor::default();
    event.record(&mut visitor);
    visitor.finish()
}

impl<S: Subscriber> Layer<S> for DailyLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: LayerContext<'_, S>) {
        let level = Level::from(*event.metadata().level());
        if let Err(e) = self.logger.write_log(level, &event_message(event)) {
            eprintln!("Failed to write log entry: {}", e);
        }
    }
}

/// Install a global tracing subscriber that feeds `logger`
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing(logger: Arc<Logger>) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(DailyLogLayer::new(logger))
        .try_init()
        .context("Failed to install tracing subscriber")
}
