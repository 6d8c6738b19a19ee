//! Hand trackers — simulated, LeapMotion, or the MediaPipe helper.
//!
//! The panel only cares about [`HandLandmarks`]; it never needs to know
//! whether they came from a model, a LeapMotion controller or the mouse.
//!
//! | Tracker | Build | Fingertip |
//! |---|---|---|
//! | [`SimHandTracker`] | default | mouse cursor while the left button is held |
//! | [`crate::mediapipe::MediaPipeTracker`] | `webcam` | landmark 8 from the helper process |
//! | `LeapHandTracker` | `leap` | index distal joint projected onto the frame |

use std::sync::mpsc::{Receiver, TryRecvError};

use circuit_panel::{HandLandmarks, Handedness};

use crate::error::AppError;
use crate::frame::Frame;

// ════════════════════════════════════════════════════════════════════════════
// HandTracker trait
// ════════════════════════════════════════════════════════════════════════════

pub trait HandTracker {
    fn name(&self) -> &'static str;

    /// Landmarks for every hand visible in `frame`, in tracker order.
    fn detect(&mut self, frame: &Frame) -> Result<Vec<HandLandmarks>, AppError>;

    /// Shut the tracker down.  Safe to call twice.
    fn release(&mut self);
}

// ════════════════════════════════════════════════════════════════════════════
// SimHandTracker — mouse-driven (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw pointer input from the display window, in normalised frame
/// coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Left button held with the cursor at `(x, y)`.
    Touch { x: f32, y: f32 },
    /// Button released or cursor left the window.
    Lift,
}

/// Turns [`SimInput`] from the window into a single simulated right hand.
///
/// The window and the tracker talk over a channel so the display never has
/// to know which tracker is in use.
pub struct SimHandTracker {
    rx:       Receiver<SimInput>,
    touch:    Option<(f32, f32)>,
    released: bool,
}

impl SimHandTracker {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimHandTracker { rx, touch: None, released: false }
    }
}

impl HandTracker for SimHandTracker {
    fn name(&self) -> &'static str { "simulated (mouse)" }

    fn detect(&mut self, _frame: &Frame) -> Result<Vec<HandLandmarks>, AppError> {
        loop {
            match self.rx.try_recv() {
                Ok(SimInput::Touch { x, y }) => self.touch = Some((x, y)),
                Ok(SimInput::Lift)           => self.touch = None,
                Err(TryRecvError::Empty)        => break,
                // Window gone: nothing more will arrive, keep the last state.
                Err(TryRecvError::Disconnected) => break,
            }
        }
        Ok(self
            .touch
            .map(|(x, y)| HandLandmarks::with_index_tip(x, y).with_handedness(Handedness::Right, 1.0))
            .into_iter()
            .collect())
    }

    fn release(&mut self) {
        if !self.released {
            self.touch = None;
            self.released = true;
            log::info!("simulated hand tracker released");
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapHandTracker — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Hand tracker backed by a LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
/// The index fingertip (distal joint of digit 1) is projected from the
/// controller's millimetre space onto the frame: a 400 mm wide box centred
/// over the device maps to x 0.0–1.0, heights 80–400 mm map to y 1.0–0.0.
#[cfg(feature = "leap")]
pub struct LeapHandTracker {
    connection: leaprs::Connection,
    /// Hands from the last tracking event; reused while other events arrive.
    last:       Vec<HandLandmarks>,
    released:   bool,
}

#[cfg(feature = "leap")]
impl LeapHandTracker {
    const POLL_MS:     u32 = 30;
    const HALF_WIDTH:  f32 = 200.0; // mm
    const MIN_HEIGHT:  f32 = 80.0;  // mm
    const MAX_HEIGHT:  f32 = 400.0; // mm

    pub fn open() -> Result<Self, AppError> {
        use leaprs::*;

        let mut connection = Connection::create(ConnectionConfig::default())
            .map_err(|e| AppError::Tracker(format!("LeapC connection: {:?}", e)))?;
        connection
            .open()
            .map_err(|e| AppError::Tracker(format!("LeapMotion device: {:?}", e)))?;
        log::info!("LeapMotion connection open");
        Ok(LeapHandTracker { connection, last: Vec::new(), released: false })
    }

    fn project(x_mm: f32, y_mm: f32) -> (f32, f32) {
        let nx = (x_mm + Self::HALF_WIDTH) / (2.0 * Self::HALF_WIDTH);
        let ny = 1.0 - (y_mm - Self::MIN_HEIGHT) / (Self::MAX_HEIGHT - Self::MIN_HEIGHT);
        (nx, ny)
    }
}

#[cfg(feature = "leap")]
impl HandTracker for LeapHandTracker {
    fn name(&self) -> &'static str { "LeapMotion" }

    fn detect(&mut self, _frame: &Frame) -> Result<Vec<HandLandmarks>, AppError> {
        use leaprs::*;

        if self.released {
            return Err(AppError::Tracker("detect after release".into()));
        }
        let msg = match self.connection.poll(Self::POLL_MS) {
            Ok(m)  => m,
            Err(_) => return Ok(self.last.clone()),
        };
        if let Event::Tracking(frame) = msg.event() {
            let mut hands = Vec::new();
            for hand in frame.hands() {
                let digits: Vec<_> = hand.digits().collect();
                if digits.len() < 2 { continue; }
                let tip = digits[1].distal().next_joint();
                let (x, y) = Self::project(tip.x, tip.y);
                let side = if hand.hand_type() == HandType::Left {
                    Handedness::Left
                } else {
                    Handedness::Right
                };
                hands.push(HandLandmarks::with_index_tip(x, y).with_handedness(side, 1.0));
            }
            self.last = hands;
        }
        Ok(self.last.clone())
    }

    fn release(&mut self) {
        if !self.released {
            self.last.clear();
            self.released = true;
            log::info!("LeapMotion tracker released");
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn blank() -> Frame {
        Frame::new(4, 4, 0xFF000000)
    }

    #[test]
    fn no_input_means_no_hands() {
        let (_tx, rx) = mpsc::channel();
        let mut t = SimHandTracker::new(rx);
        assert!(t.detect(&blank()).unwrap().is_empty());
    }

    #[test]
    fn latest_touch_wins() {
        let (tx, rx) = mpsc::channel();
        let mut t = SimHandTracker::new(rx);
        tx.send(SimInput::Touch { x: 0.1, y: 0.2 }).unwrap();
        tx.send(SimInput::Touch { x: 0.5, y: 0.25 }).unwrap();
        let hands = t.detect(&blank()).unwrap();
        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].index_tip_px(640, 480), (320.0, 120.0));
        assert_eq!(hands[0].handedness, Handedness::Right);
    }

    #[test]
    fn touch_persists_until_lift() {
        let (tx, rx) = mpsc::channel();
        let mut t = SimHandTracker::new(rx);
        tx.send(SimInput::Touch { x: 0.5, y: 0.5 }).unwrap();
        assert_eq!(t.detect(&blank()).unwrap().len(), 1);
        assert_eq!(t.detect(&blank()).unwrap().len(), 1);
        tx.send(SimInput::Lift).unwrap();
        assert!(t.detect(&blank()).unwrap().is_empty());
    }

    #[test]
    fn disconnected_window_keeps_last_state() {
        let (tx, rx) = mpsc::channel();
        let mut t = SimHandTracker::new(rx);
        tx.send(SimInput::Touch { x: 0.5, y: 0.5 }).unwrap();
        drop(tx);
        assert_eq!(t.detect(&blank()).unwrap().len(), 1);
    }

    #[test]
    fn release_drops_the_touch() {
        let (tx, rx) = mpsc::channel();
        let mut t = SimHandTracker::new(rx);
        tx.send(SimInput::Touch { x: 0.5, y: 0.5 }).unwrap();
        t.detect(&blank()).unwrap();
        t.release();
        t.release();
        drop(tx);
        assert!(t.detect(&blank()).unwrap().is_empty());
    }
}
