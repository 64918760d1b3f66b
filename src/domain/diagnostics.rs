//! Diagnostic events emitted by the price-per-area engine.
//!
//! The engine reports rejected inputs through an injected [`DiagnosticSink`]
//! instead of calling the logger directly, so tests can assert on what was
//! emitted. [`TracingSink`] is the production sink.

use tracing::Level;

/// A rejected calculation, with the inputs that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    ConstructionTypeNotFound {
        construction_type: i64,
        zip_code: String,
        aggregate: String,
    },
    ZipCodeNotFound {
        zip_code: String,
        aggregate: String,
        construction_type: i64,
    },
    UnsupportedAggregate {
        aggregate: String,
    },
}

impl Diagnostic {
    /// Severity the event is reported at.
    pub fn level(&self) -> Level {
        match self {
            Self::ConstructionTypeNotFound { .. } | Self::ZipCodeNotFound { .. } => Level::WARN,
            Self::UnsupportedAggregate { .. } => Level::DEBUG,
        }
    }
}

/// Receiver of engine diagnostics.
///
/// Implementations must not fail or panic; a lost diagnostic never aborts a
/// calculation.
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Forwards diagnostics to `tracing` at their own level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::ConstructionTypeNotFound {
                construction_type,
                zip_code,
                aggregate,
            } => tracing::warn!(
                construction_type,
                zip_code = %zip_code,
                aggregate = %aggregate,
                "construction type not found"
            ),
            Diagnostic::ZipCodeNotFound {
                zip_code,
                aggregate,
                construction_type,
            } => tracing::warn!(
                zip_code = %zip_code,
                aggregate = %aggregate,
                construction_type,
                "zip code not found"
            ),
            Diagnostic::UnsupportedAggregate { aggregate } => tracing::debug!(
                aggregate = %aggregate,
                "unreachable: unsupported aggregate reached the price engine"
            ),
        }
    }
}
