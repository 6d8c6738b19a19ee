//! Panel session: the two icons, the dot grid and the meter, advanced one
//! frame at a time.

use crate::drag;
use crate::icon::{Icon, IconKind, Point, Size};
use crate::landmarks::HandLandmarks;
use crate::resistance::{ResistanceMeter, ResistanceScale};

// ════════════════════════════════════════════════════════════════════════════
// DotMarker
// ════════════════════════════════════════════════════════════════════════════

/// A fixed connection dot.  Render-only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DotMarker {
    pub center: Point,
    pub radius: u32,
    pub color:  u32,
}

/// Two rows of four dots across the middle of a 640×480 frame.
pub const DOT_POSITIONS: [Point; 8] = [
    Point::new(250, 300), Point::new(350, 300), Point::new(450, 300), Point::new(550, 300),
    Point::new(250, 400), Point::new(350, 400), Point::new(450, 400), Point::new(550, 400),
];

pub const DOT_RADIUS: u32 = 10;
pub const DOT_COLOR:  u32 = 0xFF00FF00;

// ════════════════════════════════════════════════════════════════════════════
// PanelLayout
// ════════════════════════════════════════════════════════════════════════════

/// Where everything starts and how big it is.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelLayout {
    pub icon_size:       Size,
    pub resistor_origin: Point,
    pub source_origin:   Point,
    pub dots:            Vec<DotMarker>,
    pub scale:           ResistanceScale,
}

impl Default for PanelLayout {
    fn default() -> Self {
        PanelLayout {
            icon_size:       Size::new(100, 100),
            resistor_origin: Point::new(500, 50),
            source_origin:   Point::new(500, 150),
            dots: DOT_POSITIONS
                .iter()
                .map(|&center| DotMarker { center, radius: DOT_RADIUS, color: DOT_COLOR })
                .collect(),
            scale: ResistanceScale::default(),
        }
    }
}

impl PanelLayout {
    pub fn origin_of(&self, kind: IconKind) -> Point {
        match kind {
            IconKind::Resistor      => self.resistor_origin,
            IconKind::VoltageSource => self.source_origin,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PanelSession
// ════════════════════════════════════════════════════════════════════════════

/// Everything that changes from frame to frame.
///
/// Exactly two icons exist, indexed by [`IconKind`]; the drag controller
/// visits the resistor first.
#[derive(Clone, Debug)]
pub struct PanelSession {
    icons: [Icon; 2],
    dots:  Vec<DotMarker>,
    meter: ResistanceMeter,
    ticks: u64,
}

impl PanelSession {
    pub fn new(layout: &PanelLayout) -> Self {
        let icon = |kind| Icon::new(kind, layout.origin_of(kind), layout.icon_size);
        PanelSession {
            icons: [icon(IconKind::Resistor), icon(IconKind::VoltageSource)],
            dots:  layout.dots.clone(),
            meter: ResistanceMeter::new(layout.scale),
            ticks: 0,
        }
    }

    // ── per-frame update ─────────────────────────────────────────────────

    /// Apply one frame of hand landmarks, then refresh the reading.
    pub fn tick(&mut self, hands: &[HandLandmarks], frame_w: u32, frame_h: u32) {
        let hits = drag::apply_hands(&mut self.icons, hands, frame_w, frame_h);
        log::trace!("tick {}: {} hand(s), {} hit(s)", self.ticks, hands.len(), hits);
        self.meter.update(&self.icons[IconKind::Resistor.slot()]);
        self.ticks += 1;
    }

    /// Put both icons back where `layout` says and zero the meter.
    /// Artwork is kept.
    pub fn reset(&mut self, layout: &PanelLayout) {
        for icon in self.icons.iter_mut() {
            icon.pos      = layout.origin_of(icon.kind);
            icon.dragging = false;
        }
        self.meter.reset();
        self.ticks = 0;
    }

    /// Attach artwork to one icon.  False when the buffer size is wrong.
    pub fn set_artwork(&mut self, kind: IconKind, pixels: Vec<u32>) -> bool {
        self.icons[kind.slot()].set_pixels(pixels)
    }

    // ── accessors ────────────────────────────────────────────────────────

    pub fn icon(&self, kind: IconKind) -> &Icon { &self.icons[kind.slot()] }
    pub fn icons(&self)                -> &[Icon] { &self.icons }
    pub fn dots(&self)                 -> &[DotMarker] { &self.dots }
    pub fn reading(&self)              -> i64 { self.meter.reading() }
    pub fn readout(&self)              -> String { self.meter.label() }
    pub fn ticks(&self)                -> u64 { self.ticks }

    /// One-line summary for logs and the console.
    pub fn status(&self) -> String {
        let r = self.icon(IconKind::Resistor);
        let v = self.icon(IconKind::VoltageSource);
        format!(
            "resistor ({}, {}){}  source ({}, {}){}  {}",
            r.pos.x, r.pos.y, if r.dragging { " [drag]" } else { "" },
            v.pos.x, v.pos.y, if v.dragging { " [drag]" } else { "" },
            self.readout(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
