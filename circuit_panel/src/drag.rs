//! Fingertip drag controller.
//!
//! Each hand is applied to every icon in turn.  A hand that misses an icon
//! clears that icon's drag flag even if an earlier hand had set it, so with
//! several hands in view the last one processed decides.  That is a known
//! limitation: there is no notion of which hand "owns" an icon.

use crate::icon::Icon;
use crate::landmarks::HandLandmarks;

/// Update drag flags and positions of `icons` from one frame's hands.
///
/// `frame_w` / `frame_h` are the pixel dimensions the landmarks are scaled
/// by.  Returns the number of (hand, icon) hits.
pub fn apply_hands(
    icons:   &mut [Icon],
    hands:   &[HandLandmarks],
    frame_w: u32,
    frame_h: u32,
) -> usize {
    if hands.is_empty() {
        for icon in icons.iter_mut() {
            set_dragging(icon, false);
        }
        return 0;
    }

    let mut hits = 0;
    for hand in hands {
        let (fx, fy) = hand.index_tip_px(frame_w, frame_h);
        for icon in icons.iter_mut() {
            if icon.contains(fx, fy) {
                set_dragging(icon, true);
                icon.center_on(fx, fy);
                hits += 1;
            } else {
                set_dragging(icon, false);
            }
        }
    }
    hits
}

fn set_dragging(icon: &mut Icon, dragging: bool) {
    if icon.dragging != dragging {
        log::debug!(
            "{} {} at ({}, {})",
            icon.kind.name(),
            if dragging { "picked up" } else { "released" },
            icon.pos.x,
            icon.pos.y,
        );
    }
    icon.dragging = dragging;
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
