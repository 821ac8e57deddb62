//! Conversion session
//!
//! Holds the current category, unit pair and input, recomputes the result
//! after every change and keeps recents, favorites and theme mirrored into
//! the persistent store. No operation here fails towards the caller:
//! unknown ids are ignored, unconvertible pairs display "N/A", unparsable
//! input counts as 0 and unreadable stored state starts out empty.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;

use crate::core::catalog::{Catalog, Category};
use crate::core::format::{format_number, parse_input, NOT_AVAILABLE};
use crate::core::history::{Favorites, RecentConversions};
use crate::core::notify::{Notification, NotificationCenter};
use crate::core::store::{self, KeyValueStore, DARK_MODE_KEY, FAVORITES_KEY, RECENTS_KEY};
use crate::shared::settings::ConverterSettings;
use crate::shared::types::{
    ConversionRecord, FavoriteEntry, RecentEntryView, SessionSnapshot, Theme,
};

pub const CLEAR_HISTORY_PROMPT: &str = "Are you sure you want to clear your recent conversions?";

/// Yes/no gate the caller provides for destructive operations
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub struct ConversionSession<'c> {
    catalog: &'c Catalog,
    store: Arc<dyn KeyValueStore>,
    notifications: NotificationCenter,
    notification_duration: Duration,
    rng: StdRng,

    category_id: String,
    from_unit: String,
    to_unit: String,
    input_raw: String,
    input_value: f64,
    output: String,
    trivia: Option<String>,

    recents: RecentConversions,
    favorites: Favorites,
    theme: Theme,
}

impl<'c> ConversionSession<'c> {
    pub fn new(catalog: &'c Catalog, store: Arc<dyn KeyValueStore>, settings: &ConverterSettings) -> Self {
        Self::with_rng(catalog, store, settings, StdRng::from_entropy())
    }

    /// Same as `new` with a caller-supplied trivia picker
    pub fn with_rng(
        catalog: &'c Catalog,
        store: Arc<dyn KeyValueStore>,
        settings: &ConverterSettings,
        rng: StdRng,
    ) -> Self {
        let recents = RecentConversions::from_records(store::load_json(store.as_ref(), RECENTS_KEY));
        let favorites = Favorites::from_entries(store::load_json(store.as_ref(), FAVORITES_KEY));
        let theme = Theme::from_dark_flag(store::load_flag(store.as_ref(), DARK_MODE_KEY));

        let mut session = Self {
            catalog,
            store,
            notifications: NotificationCenter::new(),
            notification_duration: Duration::from_millis(settings.notification_duration_ms),
            rng,
            category_id: String::new(),
            from_unit: String::new(),
            to_unit: String::new(),
            input_raw: settings.default_input.clone(),
            input_value: parse_input(&settings.default_input),
            output: NOT_AVAILABLE.to_string(),
            trivia: None,
            recents,
            favorites,
            theme,
        };

        let start = catalog
            .get_category(&settings.default_category)
            .or_else(|| catalog.categories().first());
        match start {
            Some(category) => session.load_category(category),
            None => log::warn!("[Session] Catalog has no categories"),
        }

        log::info!(
            "[Session] Started in '{}' with {} recents, {} favorites, {} theme",
            session.category_id,
            session.recents.len(),
            session.favorites.len(),
            session.theme.as_attr()
        );
        session
    }

    /// Switch category and reset the unit pair to its default.
    /// Unknown ids are ignored.
    pub fn select_category(&mut self, id: &str) {
        let catalog = self.catalog;
        match catalog.get_category(id) {
            Some(category) => self.load_category(category),
            None => log::debug!("[Session] Ignoring unknown category '{}'", id),
        }
    }

    pub fn set_input_value(&mut self, raw: &str) {
        self.input_raw = raw.to_string();
        self.input_value = parse_input(raw);
        self.convert();
    }

    pub fn set_from_unit(&mut self, id: &str) {
        if self.current_category().and_then(|c| c.unit(id)).is_none() {
            log::debug!("[Session] Ignoring unknown unit '{}' in '{}'", id, self.category_id);
            return;
        }
        self.from_unit = id.to_string();
        self.convert();
    }

    pub fn set_to_unit(&mut self, id: &str) {
        if self.current_category().and_then(|c| c.unit(id)).is_none() {
            log::debug!("[Session] Ignoring unknown unit '{}' in '{}'", id, self.category_id);
            return;
        }
        self.to_unit = id.to_string();
        self.convert();
    }

    /// Exchange the units and move the displayed result into the input field
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from_unit, &mut self.to_unit);
        let displayed = std::mem::take(&mut self.output);
        self.input_value = parse_input(&displayed);
        self.input_raw = displayed;
        self.convert();
    }

    /// Pin or unpin the current (category, from, to) triple.
    /// Returns `true` when it is now a favorite.
    pub fn toggle_favorite(&mut self) -> bool {
        let added = self.favorites.toggle(&self.category_id, &self.from_unit, &self.to_unit);
        self.persist_favorites();
        let message = if added { "Added to favorites!" } else { "Removed from favorites" };
        self.notifications.show(message, self.notification_duration);
        added
    }

    /// Clear recents after the caller confirms. Returns `true` if cleared.
    pub fn clear_history<C: Confirm + ?Sized>(&mut self, confirm: &C) -> bool {
        if self.recents.is_empty() {
            return false;
        }
        if !confirm.confirm(CLEAR_HISTORY_PROMPT) {
            return false;
        }

        self.recents.clear();
        self.persist_recents();
        self.notifications.show("Recent conversions cleared", self.notification_duration);
        log::info!("[Session] Cleared recent conversions");
        true
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = store::save_flag(self.store.as_ref(), DARK_MODE_KEY, self.theme.is_dark()) {
            log::error!("[Session] Failed to persist theme: {}", e);
        }
        self.theme
    }

    /// Load the conversion at `index` in recents (0 = newest) and recompute.
    /// Returns `false` if there is no such entry or its category is gone.
    pub fn recall_recent(&mut self, index: usize) -> bool {
        let Some(record) = self.recents.get(index).cloned() else {
            return false;
        };
        if !self.activate(&record.category, &record.from_unit, &record.to_unit) {
            return false;
        }
        self.input_value = record.from_value;
        self.input_raw = record.from_value.to_string();
        self.convert();
        true
    }

    /// Switch to a favorite's category and unit pair, keeping the input
    pub fn apply_favorite(&mut self, id: &str) -> bool {
        let Some(favorite) = self.favorites.get(id).cloned() else {
            return false;
        };
        if !self.activate(&favorite.category, &favorite.from_unit, &favorite.to_unit) {
            return false;
        }
        self.convert();
        true
    }

    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    pub fn from_unit(&self) -> &str {
        &self.from_unit
    }

    pub fn to_unit(&self) -> &str {
        &self.to_unit
    }

    pub fn input(&self) -> &str {
        &self.input_raw
    }

    pub fn input_value(&self) -> f64 {
        self.input_value
    }

    /// Formatted result or "N/A"
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn trivia(&self) -> Option<&str> {
        self.trivia.as_deref()
    }

    /// Fact attached to the current source unit
    pub fn unit_trivia(&self) -> Option<String> {
        self.catalog
            .get_unit(&self.category_id, &self.from_unit)
            .and_then(|u| u.trivia.clone())
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn recents(&self) -> &[ConversionRecord] {
        self.recents.records()
    }

    pub fn favorites(&self) -> &[FavoriteEntry] {
        self.favorites.entries()
    }

    pub fn is_current_favorite(&self) -> bool {
        self.favorites
            .contains(&FavoriteEntry::make_id(&self.category_id, &self.from_unit, &self.to_unit))
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.active()
    }

    /// "1 Meter = ? Foot"
    pub fn formula(&self) -> String {
        let name = |unit_id: &str| {
            self.catalog
                .get_unit(&self.category_id, unit_id)
                .map(|u| u.name.clone())
                .unwrap_or_default()
        };
        format!("1 {} = ? {}", name(&self.from_unit), name(&self.to_unit))
    }

    /// Recents formatted for display; entries whose units left the catalog are skipped
    pub fn recent_views(&self) -> Vec<RecentEntryView> {
        self.recents
            .records()
            .iter()
            .filter_map(|record| {
                let category = self.catalog.get_category(&record.category)?;
                let from = category.unit(&record.from_unit)?;
                let to = category.unit(&record.to_unit)?;
                Some(RecentEntryView {
                    from_display: format!("{} {}", format_number(record.from_value), from.symbol),
                    to_display: format!("{} {}", format_number(record.to_value), to.symbol),
                    category_name: category.name.clone(),
                    record: record.clone(),
                })
            })
            .collect()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            category: self.category_id.clone(),
            category_name: self.current_category().map(|c| c.name.clone()).unwrap_or_default(),
            from_unit: self.from_unit.clone(),
            to_unit: self.to_unit.clone(),
            input_value: self.input_raw.clone(),
            output_value: self.output.clone(),
            formula: self.formula(),
            trivia: self.trivia.clone(),
            unit_trivia: self.unit_trivia(),
            theme: self.theme,
            is_favorite: self.is_current_favorite(),
            recents: self.recent_views(),
            favorites: self.favorites.entries().to_vec(),
        }
    }

    fn current_category(&self) -> Option<&'c Category> {
        self.catalog.get_category(&self.category_id)
    }

    fn load_category(&mut self, category: &'c Category) {
        let (from, to) = category.resolved_default_pair().unwrap_or(("", ""));
        self.category_id = category.id.clone();
        self.from_unit = from.to_string();
        self.to_unit = to.to_string();
        self.pick_trivia(category);
        log::info!("[Session] Category '{}' ({} -> {})", category.id, from, to);
        self.convert();
    }

    // Select category and units without converting. Units that no longer
    // exist fall back to the category default.
    fn activate(&mut self, category_id: &str, from_unit: &str, to_unit: &str) -> bool {
        let catalog = self.catalog;
        let Some(category) = catalog.get_category(category_id) else {
            log::debug!("[Session] Ignoring unknown category '{}'", category_id);
            return false;
        };
        let (default_from, default_to) = category.resolved_default_pair().unwrap_or(("", ""));
        let from = if category.unit(from_unit).is_some() { from_unit } else { default_from };
        let to = if category.unit(to_unit).is_some() { to_unit } else { default_to };

        if self.category_id != category.id {
            self.pick_trivia(category);
        }
        self.category_id = category.id.clone();
        self.from_unit = from.to_string();
        self.to_unit = to.to_string();
        true
    }

    fn pick_trivia(&mut self, category: &Category) {
        self.trivia = category.trivia.choose(&mut self.rng).cloned();
    }

    fn convert(&mut self) {
        let result = self.catalog.convert(&self.category_id, &self.from_unit, &self.to_unit, self.input_value);
        let value = match result {
            Ok(value) => value,
            Err(e) => {
                log::debug!("[Session] {}", e);
                self.output = NOT_AVAILABLE.to_string();
                return;
            }
        };

        self.output = format_number(value);

        // JSON has no encoding for non-finite numbers
        if !value.is_finite() || !self.input_value.is_finite() {
            return;
        }

        self.recents.push(ConversionRecord::new(
            &self.category_id,
            self.input_value,
            &self.from_unit,
            value,
            &self.to_unit,
        ));
        self.persist_recents();
    }

    fn persist_recents(&self) {
        if let Err(e) = store::save_json(self.store.as_ref(), RECENTS_KEY, self.recents.records()) {
            log::error!("[Session] Failed to persist recent conversions: {}", e);
        }
    }

    fn persist_favorites(&self) {
        if let Err(e) = store::save_json(self.store.as_ref(), FAVORITES_KEY, self.favorites.entries()) {
            log::error!("[Session] Failed to persist favorites: {}", e);
        }
    }
}
