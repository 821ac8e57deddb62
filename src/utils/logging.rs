//! Logger initialisation.
//!
//! Modules log through the `log` facade; this installs `env_logger` as the
//! backend. `RUST_LOG` overrides the default `info` filter, e.g.
//! `RUST_LOG=convertly=debug` to trace every conversion.

use env_logger::Env;

/// Install the logger. Safe to call more than once.
pub fn init_logging() {
    let result = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();

    if result.is_ok() {
        log::debug!("[logging] env_logger initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging();
        init_logging();
        log::info!("still logging");
    }
}
