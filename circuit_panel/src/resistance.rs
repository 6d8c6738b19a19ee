//! Resistance readout derived from the resistor icon's height on screen.

use crate::icon::{Icon, IconKind};

// ════════════════════════════════════════════════════════════════════════════
// ResistanceScale
// ════════════════════════════════════════════════════════════════════════════

/// Linear map from the resistor's top edge `y` to a reading in ohms:
///
/// ```text
/// reading = floor((y - origin_y) / pixels_per_step * ohms_per_step)
/// ```
///
/// There is no clamping; dragging above `origin_y` gives negative readings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResistanceScale {
    pub origin_y:        i32,
    /// Must be positive.
    pub pixels_per_step: i32,
    pub ohms_per_step:   i64,
}

impl Default for ResistanceScale {
    fn default() -> Self {
        ResistanceScale {
            origin_y:        50,
            pixels_per_step: 50,
            ohms_per_step:   1000,
        }
    }
}

impl ResistanceScale {
    pub fn reading_for(&self, y: i32) -> i64 {
        let offset = (y as i64 - self.origin_y as i64) * self.ohms_per_step;
        offset.div_euclid(self.pixels_per_step.max(1) as i64)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ResistanceMeter
// ════════════════════════════════════════════════════════════════════════════

/// Holds the current reading.  It only moves while the resistor is being
/// dragged; a released resistor leaves the last value on display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResistanceMeter {
    scale:   ResistanceScale,
    reading: i64,
}

impl ResistanceMeter {
    pub fn new(scale: ResistanceScale) -> Self {
        ResistanceMeter { scale, reading: 0 }
    }

    /// Recompute from `resistor` if it is dragging.  Returns true when the
    /// reading changed.
    pub fn update(&mut self, resistor: &Icon) -> bool {
        debug_assert_eq!(resistor.kind, IconKind::Resistor);
        if !resistor.dragging {
            return false;
        }
        let next = self.scale.reading_for(resistor.pos.y);
        if next == self.reading {
            return false;
        }
        log::debug!("resistance {} → {} Ω (y={})", self.reading, next, resistor.pos.y);
        self.reading = next;
        true
    }

    pub fn reading(&self) -> i64 { self.reading }

    /// The on-screen readout text.
    pub fn label(&self) -> String {
        format!("Resistance: {} Ohms", self.reading)
    }

    pub fn reset(&mut self) {
        self.reading = 0;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::{Point, Size};

    fn resistor_at(y: i32, dragging: bool) -> Icon {
        let mut icon = Icon::new(IconKind::Resistor, Point::new(500, y), Size::new(100, 100));
        icon.dragging = dragging;
        icon
    }

    #[test]
    fn reference_points() {
        let s = ResistanceScale::default();
        assert_eq!(s.reading_for(50),  0);
        assert_eq!(s.reading_for(100), 1000);
        assert_eq!(s.reading_for(0),   -1000);
        assert_eq!(s.reading_for(57),  140);
        assert_eq!(s.reading_for(-30), -1600);
    }

    #[test]
    fn floors_fractional_readings() {
        let s = ResistanceScale { origin_y: 0, pixels_per_step: 3, ohms_per_step: 1 };
        assert_eq!(s.reading_for(4),  1);
        assert_eq!(s.reading_for(-1), -1);
        assert_eq!(s.reading_for(-4), -2);
    }

    #[test]
    fn updates_only_while_dragging() {
        let mut m = ResistanceMeter::default();
        assert!(!m.update(&resistor_at(300, false)));
        assert_eq!(m.reading(), 0);
        assert!(m.update(&resistor_at(300, true)));
        assert_eq!(m.reading(), 5000);
    }

    #[test]
    fn release_freezes_reading() {
        let mut m = ResistanceMeter::default();
        m.update(&resistor_at(150, true));
        assert_eq!(m.reading(), 2000);
        for y in [0, 75, 400] {
            m.update(&resistor_at(y, false));
            assert_eq!(m.reading(), 2000);
        }
    }

    #[test]
    fn label_format() {
        let mut m = ResistanceMeter::default();
        m.update(&resistor_at(0, true));
        assert_eq!(m.label(), "Resistance: -1000 Ohms");
    }
}
