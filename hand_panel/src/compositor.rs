//! Frame compositor: icons, connection dots and the resistance readout.
//!
//! Icons go down first so the tracker sees them; dots and text are drawn
//! after the drag update so they always sit on top.

use circuit_panel::{DotMarker, Icon, Point};

use crate::frame::{text_height, Frame};

/// Where and how the readout is drawn.  `baseline` is the bottom-left
/// corner of the text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReadoutStyle {
    pub baseline: Point,
    pub color:    u32,
    pub scale:    usize,
}

impl Default for ReadoutStyle {
    fn default() -> Self {
        ReadoutStyle {
            baseline: Point::new(10, 30),
            color:    0xFFFFFFFF,
            scale:    4,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Compositor {
    pub readout: ReadoutStyle,
}

impl Compositor {
    pub fn new(readout: ReadoutStyle) -> Self {
        Compositor { readout }
    }

    /// Copy each icon's artwork into the frame at its current position,
    /// clipped to the frame.
    pub fn overlay_icons(&self, frame: &mut Frame, icons: &[Icon]) {
        for icon in icons {
            let written = frame.blit(
                icon.pos.x,
                icon.pos.y,
                icon.size.w as usize,
                icon.size.h as usize,
                &icon.pixels,
            );
            if written < icon.size.area() {
                log::trace!("{} clipped: {} of {} px visible", icon.kind.name(), written, icon.size.area());
            }
        }
    }

    pub fn draw_dots(&self, frame: &mut Frame, dots: &[DotMarker]) {
        for dot in dots {
            frame.fill_circle(dot.center.x, dot.center.y, dot.radius, dot.color);
        }
    }

    pub fn draw_readout(&self, frame: &mut Frame, text: &str) {
        let s = &self.readout;
        let top = s.baseline.y - text_height(s.scale) as i32;
        frame.draw_text(text, s.baseline.x, top, s.scale, s.color);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
