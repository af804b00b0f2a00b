//! The viewer's session controller
//!
//! One controller owns the overlay registry, the settings panel, the font
//! catalog and the preference store for as long as the viewer is active.
//! Every method runs synchronously inside a host callback.

use super::drawer::{draw_overlays, glyph_text};
use super::settings_panel::SettingsPanel;
use crate::core::config_file::PreferenceStore;
use crate::error::Result;
use crate::fonts::FontCatalog;
use crate::host::{Channel, CurrentGlyph, DrawContext, HostEvent, MenuItem, ViewerHost};
use crate::overlay::OverlayRegistry;
use kurbo::{Point, Vec2};
use tracing::{debug, info, warn};

/// An overlay being moved with the mouse
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    index: usize,
    /// Pointer position relative to the overlay origin at mouse down
    grab_offset: Vec2,
}

pub struct Controller<S: PreferenceStore> {
    store: S,
    catalog: FontCatalog,
    registry: OverlayRegistry,
    panel: SettingsPanel,
    glyph: Option<CurrentGlyph>,
    active: bool,
    drag: Option<DragState>,
}

impl<S: PreferenceStore> Controller<S> {
    pub fn new(store: S, catalog: FontCatalog) -> Self {
        let panel = SettingsPanel::from_store(&store);
        Self {
            store,
            catalog,
            registry: OverlayRegistry::new(),
            panel,
            glyph: None,
            active: false,
            drag: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn registry(&self) -> &OverlayRegistry {
        &self.registry
    }

    pub fn panel(&self) -> &SettingsPanel {
        &self.panel
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn catalog_mut(&mut self) -> &mut FontCatalog {
        &mut self.catalog
    }

    pub fn current_glyph(&self) -> Option<&CurrentGlyph> {
        self.glyph.as_ref()
    }

    /// Set the glyph shown when the viewer becomes active
    pub fn set_current_glyph(&mut self, glyph: Option<CurrentGlyph>) {
        self.glyph = glyph;
    }

    /// Switch the viewer on or off
    ///
    /// Turning it on reloads the overlays from the preference store; a
    /// corrupt store leaves the viewer off and returns the error. Turning
    /// it off saves and closes an open settings panel first.
    pub fn toggle(&mut self, host: &mut dyn ViewerHost) -> Result<()> {
        if self.active {
            self.deactivate(host)
        } else {
            self.activate(host)
        }
    }

    fn activate(&mut self, host: &mut dyn ViewerHost) -> Result<()> {
        self.registry = OverlayRegistry::load(&self.store)?;
        self.active = true;

        host.subscribe(Channel::GlyphChanged);
        for channel in Channel::DRAWING {
            host.subscribe(channel);
        }
        host.subscribe(Channel::ContextualMenu);
        info!("Reference viewer on with {} overlays", self.registry.len());

        if self.registry.is_empty() {
            self.open_settings(host);
        }
        host.invalidate_view();
        Ok(())
    }

    fn deactivate(&mut self, host: &mut dyn ViewerHost) -> Result<()> {
        let saved = if self.panel.is_open() {
            self.close_settings(host)
        } else {
            Ok(())
        };

        self.active = false;
        self.drag = None;
        for channel in Channel::ALL {
            host.unsubscribe(channel);
        }
        info!("Reference viewer off");
        host.invalidate_view();
        saved
    }

    /// Show the settings panel and start listening for overlay clicks
    pub fn open_settings(&mut self, host: &mut dyn ViewerHost) {
        if self.panel.is_open() {
            return;
        }
        self.panel.set_open(true);
        let selection = self.registry.selected_index();
        self.panel.select(&mut self.registry, selection);
        host.subscribe(Channel::MouseDown);
        host.subscribe(Channel::MouseUp);
        debug!("Settings panel opened");
    }

    /// Save the overlays and hide the settings panel
    ///
    /// The panel closes and mouse channels are released even when saving
    /// fails; the in-memory overlays are kept either way.
    pub fn close_settings(&mut self, host: &mut dyn ViewerHost) -> Result<()> {
        let saved = self.registry.persist(&mut self.store);
        if let Err(error) = &saved {
            warn!("Failed to save reference overlays: {}", error);
        }

        self.panel.set_open(false);
        self.drag = None;
        host.unsubscribe(Channel::MouseDown);
        host.unsubscribe(Channel::MouseDragged);
        host.unsubscribe(Channel::MouseUp);
        debug!("Settings panel closed");
        saved
    }

    /// Handle an event from a subscribed channel
    ///
    /// Events on channels the host has not subscribed are dropped.
    pub fn handle(&mut self, event: HostEvent<'_>, host: &mut dyn ViewerHost) {
        if !host.is_subscribed(event.channel()) {
            return;
        }

        match event {
            HostEvent::GlyphChanged { glyph } => {
                self.glyph = glyph;
                host.invalidate_view();
            }
            HostEvent::MouseDown { point } => self.mouse_down(point, host),
            HostEvent::MouseDragged { point } => self.mouse_dragged(point, host),
            HostEvent::MouseUp { .. } => {
                if self.drag.take().is_some() {
                    debug!("Overlay drag finished");
                }
                host.unsubscribe(Channel::MouseDragged);
            }
            HostEvent::ContextualMenu { items } => items.push(MenuItem::OpenSettings),
        }
    }

    fn mouse_down(&mut self, point: Point, host: &mut dyn ViewerHost) {
        let Some(index) = self.registry.hit_test(point) else {
            return;
        };
        let Some(record) = self.registry.get(index) else {
            return;
        };

        self.drag = Some(DragState {
            index,
            grab_offset: point - record.position(),
        });
        self.panel.select(&mut self.registry, Some(index));
        host.subscribe(Channel::MouseDragged);
        debug!("Grabbed overlay {} at {:?}", index, point);
    }

    fn mouse_dragged(&mut self, point: Point, host: &mut dyn ViewerHost) {
        let Some(drag) = self.drag else {
            return;
        };
        if let Some(record) = self.registry.get_mut(drag.index) {
            record.set_position(point - drag.grab_offset);
            host.invalidate_view();
        }
    }

    /// Run a contextual menu entry the viewer contributed
    pub fn activate_menu_item(&mut self, item: MenuItem, host: &mut dyn ViewerHost) {
        match item {
            MenuItem::OpenSettings => self.open_settings(host),
        }
    }

    /// Draw the overlays for the current glyph
    pub fn draw(&self, ctx: &mut dyn DrawContext) {
        if !self.active {
            return;
        }
        let character = glyph_text(self.glyph.as_ref().and_then(|glyph| glyph.unicode));
        draw_overlays(&self.registry, &character, ctx);
    }

    /// Apply a settings panel edit and request a redraw
    ///
    /// Panel edits only make sense while the panel is open; otherwise the
    /// closure is not run and `None` is returned. An edit that adds or
    /// removes overlays ends a running drag, since its index is stale.
    pub fn edit_settings<T>(
        &mut self,
        host: &mut dyn ViewerHost,
        edit: impl FnOnce(&mut SettingsPanel, &mut PanelContext<'_, S>) -> T,
    ) -> Option<T> {
        if !self.panel.is_open() {
            return None;
        }
        let count = self.registry.len();
        let mut context = PanelContext {
            registry: &mut self.registry,
            catalog: &mut self.catalog,
            store: &mut self.store,
        };
        let result = edit(&mut self.panel, &mut context);
        if self.registry.len() != count && self.drag.take().is_some() {
            debug!("Overlay drag cancelled, the overlay list changed");
        }
        host.invalidate_view();
        Some(result)
    }
}

/// The parts of the controller a settings edit may touch
pub struct PanelContext<'a, S: PreferenceStore> {
    pub registry: &'a mut OverlayRegistry,
    pub catalog: &'a mut FontCatalog,
    pub store: &'a mut S,
}
