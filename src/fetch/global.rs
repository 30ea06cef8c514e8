//! Process-wide fetch installation.
//!
//! The wrapper is normally passed around explicitly. Applications that want a
//! single fetch for the remainder of the process install it here once.

use std::sync::{Arc, OnceLock};
use thiserror::Error;

use crate::fetch::Fetch;

static GLOBAL_FETCH: OnceLock<Arc<dyn Fetch>> = OnceLock::new();

/// Returned when a fetch has already been installed.
#[derive(Debug, Error)]
#[error("a global fetch is already installed")]
pub struct AlreadyInstalled;

/// Install `fetch` for the remainder of the process lifetime.
pub fn install(fetch: Arc<dyn Fetch>) -> Result<(), AlreadyInstalled> {
    GLOBAL_FETCH.set(fetch).map_err(|_| AlreadyInstalled)?;
    tracing::debug!("Global fetch installed");
    Ok(())
}

/// The installed fetch, if any.
pub fn installed() -> Option<Arc<dyn Fetch>> {
    GLOBAL_FETCH.get().cloned()
}
