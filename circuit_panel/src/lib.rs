//! # circuit_panel
//!
//! The interaction model behind the hand-tracked circuit panel: two
//! draggable component icons, a fixed grid of connection dots, and a
//! resistance readout driven by where the resistor sits on screen.
//!
//! Nothing here touches a camera, a window or an image codec.  A caller
//! feeds one frame's worth of [`HandLandmarks`] into a [`PanelSession`] and
//! reads back icon positions and the current reading.
//!
//! ## Per-tick rules
//!
//! | Step | Rule |
//! |---|---|
//! | Fingertip | landmark 8 of each hand, scaled by frame width/height |
//! | Hit test | `x < fx < x + w` and `y < fy < y + h` (strict) |
//! | Hit | icon is dragging, top-left becomes `(floor(fx - w/2), floor(fy - h/2))` |
//! | Miss | icon stops dragging for that hand |
//! | Several hands | the last hand processed wins |
//! | No hands | both icons stop dragging, positions stay put |
//! | Reading | `floor((y - 50) / 50 * 1000)` while the resistor is dragging |
//!
//! ## Quick start
//!
//! ```rust
//! use circuit_panel::{HandLandmarks, IconKind, PanelLayout, PanelSession};
//!
//! let mut panel = PanelSession::new(&PanelLayout::default());
//!
//! // Resistor starts at (500, 50) and is 100×100; touch it at (550, 120).
//! let hand = HandLandmarks::with_index_tip(0.859375, 0.25);
//! panel.tick(&[hand], 640, 480);
//!
//! let resistor = panel.icon(IconKind::Resistor);
//! assert!(resistor.dragging);
//! assert_eq!((resistor.pos.x, resistor.pos.y), (500, 70));
//! assert_eq!(panel.reading(), 400);
//! ```

pub mod landmarks;
pub mod icon;
pub mod drag;
pub mod resistance;
pub mod session;

pub use landmarks::{HandLandmarks, Handedness, Landmark, LANDMARK_COUNT};
pub use icon::{Icon, IconKind, Point, Size};
pub use resistance::{ResistanceMeter, ResistanceScale};
pub use session::{DotMarker, PanelLayout, PanelSession};
