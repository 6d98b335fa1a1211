//! Run logs go to stderr (plain or JSON lines); stdout is left for the evaluation report.

use crate::features::feature_names;
use serde::Serialize;
use std::io::Write;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// One importance row, emitted as JSON when logs are machine-ingested
#[derive(Serialize)]
pub struct ImportanceEvent<'a> {
    pub slot: usize,
    pub feature: &'a str,
    pub importance: f64,
}

pub struct StructuredLogger;

impl StructuredLogger {
    /// Install global subscriber; level from RUST_LOG or `default_level`.
    /// A second call is a no-op.
    pub fn init(json: bool, default_level: &str) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        let result = if json {
            let fmt = tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(fmt).try_init()
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
        };
        if result.is_err() {
            tracing::debug!("subscriber already installed");
        }
    }

    /// Feature importances as JSON lines, one per slot in extractor order, for runs
    /// whose output is ingested by log tooling instead of read by a person.
    pub fn write_importances(weights: &[f64], w: &mut impl Write) -> std::io::Result<()> {
        for (slot, (feature, importance)) in feature_names().zip(weights).enumerate() {
            let line = serde_json::to_string(&ImportanceEvent {
                slot,
                feature,
                importance: *importance,
            })?;
            writeln!(w, "{}", line)?;
        }
        Ok(())
    }
}
