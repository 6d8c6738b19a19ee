//! # hand_panel
//!
//! Camera window with a draggable resistor and voltage source.  Point at an
//! icon with your index fingertip and it follows the finger; the resistance
//! readout in the top-left corner tracks the resistor's height.
//!
//! ## Per-frame pipeline
//!
//! | Step | Module |
//! |---|---|
//! | Capture one frame, mirror it | [`camera`] |
//! | Paste icons at their current positions | [`compositor`] |
//! | Detect hands, 21 landmarks each | [`tracker`], [`mediapipe`] |
//! | Grab / recentre / release icons, update reading | `circuit_panel` |
//! | Draw the eight dots and the readout | [`compositor`] |
//! | Show the frame, poll for quit | [`display`] |
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: synthetic camera, the mouse is the
//!   fingertip while the left button is held.
//! * `webcam` — real camera through `nokhwa`, landmarks from the MediaPipe
//!   helper in `scripts/hand_landmarks.py`.
//! * `leap` — fingertips from a LeapMotion controller via LeapC.
//!
//! `Escape` or closing the window quits.  Set `RUST_LOG=debug` to see drag
//! transitions.

pub mod error;
pub mod frame;
pub mod camera;
pub mod tracker;
pub mod mediapipe;
pub mod assets;
pub mod compositor;
pub mod display;
pub mod app;
