#![doc(test(attr(deny(warnings))))]

//! Subcal tracks recurring subscriptions: it normalizes raw spreadsheet rows,
//! decides which subscriptions charge in a displayed month, projects next
//! payment dates, accrues historical spend, and builds locale-aware month
//! grids for calendar rendering.

pub mod calendar;
pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod dates;
pub mod domain;
pub mod errors;
pub mod ingest;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        init_tracing();
        tracing::info!("Subcal tracing initialized.");
    });
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::from_default_env().add_directive("subcal=info".parse().unwrap());

    fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
