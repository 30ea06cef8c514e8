//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → FetchConfig (validated, immutable)
//!     → handed to HttpFetch and GzipAssetLayer at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the decompression strategy is picked from it once
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::FetchConfig;
pub use schema::ClientConfig;
pub use schema::AssetConfig;
pub use schema::DecompressionConfig;
pub use schema::DecompressionStrategy;
pub use schema::ObservabilityConfig;
