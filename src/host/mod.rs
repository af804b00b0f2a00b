//! Interfaces the host glyph editor implements for the viewer
//!
//! The viewer never reaches into the host. It asks for event channels by
//! [`Channel`], receives [`HostEvent`]s on them, draws through a
//! [`DrawContext`], and requests redraws with
//! [`ViewerHost::invalidate_view`].

use crate::overlay::Rgba;
use kurbo::Point;

/// Event channels the viewer can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    GlyphChanged,
    Draw,
    DrawPreview,
    DrawInactive,
    MouseDown,
    MouseDragged,
    MouseUp,
    ContextualMenu,
}

impl Channel {
    /// Channels that render the glyph view
    pub const DRAWING: [Channel; 3] = [Channel::Draw, Channel::DrawPreview, Channel::DrawInactive];

    pub const ALL: [Channel; 8] = [
        Channel::GlyphChanged,
        Channel::Draw,
        Channel::DrawPreview,
        Channel::DrawInactive,
        Channel::MouseDown,
        Channel::MouseDragged,
        Channel::MouseUp,
        Channel::ContextualMenu,
    ];
}

/// The glyph currently open in the glyph view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentGlyph {
    pub name: String,
    pub unicode: Option<char>,
}

impl CurrentGlyph {
    pub fn new(name: impl Into<String>, unicode: Option<char>) -> Self {
        Self {
            name: name.into(),
            unicode,
        }
    }
}

/// Entries the viewer contributes to the glyph view's contextual menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    OpenSettings,
}

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::OpenSettings => "Reference Viewer Settings",
        }
    }
}

/// An event delivered on a subscribed channel
#[derive(Debug)]
pub enum HostEvent<'a> {
    GlyphChanged { glyph: Option<CurrentGlyph> },
    MouseDown { point: Point },
    MouseDragged { point: Point },
    MouseUp { point: Point },
    ContextualMenu { items: &'a mut Vec<MenuItem> },
}

impl HostEvent<'_> {
    pub fn channel(&self) -> Channel {
        match self {
            HostEvent::GlyphChanged { .. } => Channel::GlyphChanged,
            HostEvent::MouseDown { .. } => Channel::MouseDown,
            HostEvent::MouseDragged { .. } => Channel::MouseDragged,
            HostEvent::MouseUp { .. } => Channel::MouseUp,
            HostEvent::ContextualMenu { .. } => Channel::ContextualMenu,
        }
    }
}

/// Event registration and view invalidation provided by the host
pub trait ViewerHost {
    fn subscribe(&mut self, channel: Channel);
    fn unsubscribe(&mut self, channel: Channel);
    fn is_subscribed(&self, channel: Channel) -> bool;
    /// Ask the host to redraw the current glyph view
    fn invalidate_view(&mut self);
}

/// Drawing primitives operating on the current glyph view
pub trait DrawContext {
    fn save(&mut self);
    fn restore(&mut self);
    fn font(&mut self, name: &str, size: f64);
    fn fill(&mut self, color: Rgba);
    fn text(&mut self, text: &str, position: Point);
}

/// Subscription bookkeeping for hosts that poll rather than call back
///
/// A host loop checks [`ViewerHost::is_subscribed`] before building an
/// event, and [`Subscriptions::take_redraw`] once per frame.
#[derive(Debug, Clone, Default)]
pub struct Subscriptions {
    channels: std::collections::BTreeSet<Channel>,
    redraw: bool,
}

impl Subscriptions {
    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.channels.iter().copied()
    }

    /// Whether a redraw was requested since the last call
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }
}

impl ViewerHost for Subscriptions {
    fn subscribe(&mut self, channel: Channel) {
        self.channels.insert(channel);
    }

    fn unsubscribe(&mut self, channel: Channel) {
        self.channels.remove(&channel);
    }

    fn is_subscribed(&self, channel: Channel) -> bool {
        self.channels.contains(&channel)
    }

    fn invalidate_view(&mut self) {
        self.redraw = true;
    }
}
