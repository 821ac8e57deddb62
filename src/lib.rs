pub mod shared;
pub mod core;
pub mod utils;

use std::sync::Arc;

use crate::core::catalog::Catalog;
use crate::core::session::ConversionSession;
use crate::core::store::{self, InMemoryStore, KeyValueStore};
use crate::shared::settings::ConverterSettings;

pub use crate::shared::errors::{ConvertError, ConvertResult};
pub use crate::shared::types::{ConversionRecord, FavoriteEntry, SessionSnapshot, Theme};

/// Session over the built-in catalog, backed by the store `settings` points at.
/// Falls back to an in-memory store if the database can't be opened.
pub fn open_session(settings: &ConverterSettings) -> ConversionSession<'static> {
    let backend: Arc<dyn KeyValueStore> = match settings.store_path() {
        Ok(path) => store::open_or_fallback(&path),
        Err(e) => {
            log::warn!("[convertly] No data directory ({}), using in-memory store", e);
            Arc::new(InMemoryStore::new())
        }
    };
    ConversionSession::new(Catalog::builtin(), backend, settings)
}

/// Load settings from the platform config directory and open a session.
/// Unreadable settings fall back to defaults.
pub async fn open_default_session() -> ConversionSession<'static> {
    let settings = match ConverterSettings::load().await {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("[convertly] Failed to load settings: {}, using defaults", e);
            ConverterSettings::default()
        }
    };
    open_session(&settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_session_persists_to_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ConverterSettings {
            data_dir: Some(dir.path().to_path_buf()),
            ..ConverterSettings::default()
        };

        {
            let mut session = open_session(&settings);
            session.select_category("speed");
            session.toggle_favorite();
        }

        let session = open_session(&settings);
        assert!(dir.path().join("convertly.redb").exists());
        assert_eq!(session.favorites()[0].id, "speed:kmh:mph");
    }
}
