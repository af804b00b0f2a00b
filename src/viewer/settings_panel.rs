//! State behind the floating settings window
//!
//! The panel owns what the window's controls display (font chooser, size
//! field, whether the size and color controls are shown) and applies edits
//! to the registry's selected record. Layout is left to the host.

use crate::core::config_file::{default_font, PreferenceStore, DEFAULT_FONT_KEY};
use crate::error::Result;
use crate::fonts::FontCatalog;
use crate::overlay::{OverlayRecord, OverlayRegistry, Rgba, DEFAULT_SIZE};
use serde_json::Value;
use tracing::debug;

pub const MIN_SIZE: f64 = 10.0;
pub const MAX_SIZE: f64 = 2000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsPanel {
    open: bool,
    font_choice: String,
    size_text: String,
    controls_visible: bool,
}

impl SettingsPanel {
    pub fn new(font_choice: impl Into<String>) -> Self {
        Self {
            open: false,
            font_choice: font_choice.into(),
            size_text: format_size(DEFAULT_SIZE),
            controls_visible: false,
        }
    }

    /// Start from the last font remembered in `store`
    pub fn from_store(store: &dyn PreferenceStore) -> Self {
        Self::new(default_font(store))
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn font_choice(&self) -> &str {
        &self.font_choice
    }

    /// Text shown in the size field
    pub fn size_text(&self) -> &str {
        &self.size_text
    }

    /// Size and color controls are only shown while a row is selected
    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn choose_font(&mut self, label: impl Into<String>) {
        self.font_choice = label.into();
    }

    /// Move the font chooser `step` entries through the catalog, wrapping
    pub fn cycle_font(&mut self, catalog: &mut FontCatalog, step: isize) {
        let labels = catalog.labels();
        if labels.is_empty() {
            return;
        }
        let count = labels.len() as isize;
        let next = match labels.iter().position(|label| *label == self.font_choice) {
            Some(current) => (current as isize + step).rem_euclid(count),
            None if step < 0 => count - 1,
            None => 0,
        };
        self.font_choice = labels[next as usize].clone();
    }

    /// Append an overlay for the chosen font and select it
    ///
    /// The chosen label is split into family and style through the catalog;
    /// an unknown label is used as a bare family name. The label is
    /// remembered as the next session's default font.
    pub fn add_font(
        &mut self,
        registry: &mut OverlayRegistry,
        catalog: &mut FontCatalog,
        store: &mut dyn PreferenceStore,
    ) -> Result<usize> {
        let record = match catalog.resolve(&self.font_choice) {
            Some(face) => OverlayRecord::new(face.family.clone()).with_style(face.style.clone()),
            None => OverlayRecord::new(self.font_choice.clone()),
        };
        let index = registry.push(record);
        self.select(registry, Some(index));
        store.set(DEFAULT_FONT_KEY, Value::String(self.font_choice.clone()))?;
        debug!("Added {} as overlay {}", self.font_choice, index);
        Ok(index)
    }

    /// Mirror the list selection and load the selected record's values
    pub fn select(&mut self, registry: &mut OverlayRegistry, index: Option<usize>) {
        registry.select(index);
        match registry.selected() {
            Some(record) => {
                self.controls_visible = true;
                self.size_text = format_size(record.size);
            }
            None => self.controls_visible = false,
        }
    }

    /// Size slider: clamps to the slider's range
    pub fn set_size(&mut self, registry: &mut OverlayRegistry, size: f64) {
        let Some(record) = registry.selected_mut() else {
            return;
        };
        record.size = size.clamp(MIN_SIZE, MAX_SIZE);
        self.size_text = format_size(record.size);
    }

    /// Nudge the selected record's size by `delta`
    pub fn step_size(&mut self, registry: &mut OverlayRegistry, delta: f64) {
        if let Some(size) = registry.selected().map(|record| record.size) {
            self.set_size(registry, size + delta);
        }
    }

    /// Size typed as text; unparsable input restores the last valid size
    pub fn edit_size_text(&mut self, registry: &mut OverlayRegistry, text: &str) {
        let Some(current) = registry.selected().map(|record| record.size) else {
            return;
        };
        match text.trim().parse::<f64>() {
            Ok(size) if size.is_finite() => self.set_size(registry, size),
            _ => {
                debug!("Ignoring invalid size {:?}", text);
                self.size_text = format_size(current);
            }
        }
    }

    pub fn set_color(&mut self, registry: &mut OverlayRegistry, color: Rgba) {
        if let Some(record) = registry.selected_mut() {
            record.color = color;
        }
    }

    /// Delete the selected row, leaving nothing selected
    pub fn delete_selected(&mut self, registry: &mut OverlayRegistry) -> Option<OverlayRecord> {
        let index = registry.selected_index()?;
        let removed = registry.remove_at(index);
        self.select(registry, None);
        removed
    }
}

fn format_size(size: f64) -> String {
    if size.fract() == 0.0 {
        format!("{size:.0}")
    } else {
        format!("{size}")
    }
}
