//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! interceptor / decompress / pack produce:
//!     → logging.rs (structured log events, one span per intercepted fetch)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stderr via tracing-subscriber (binaries)
//!     → whatever metrics recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Every fetch outcome is logged with the resource identifier
//! - A fetch ID (UUID v4) correlates the compressed attempt with its fallback
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
