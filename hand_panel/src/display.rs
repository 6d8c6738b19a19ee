//! Live window using `minifb`.

use std::sync::mpsc::Sender;

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::error::AppError;
use crate::frame::Frame;
use crate::tracker::SimInput;

// ════════════════════════════════════════════════════════════════════════════
// Screen trait
// ════════════════════════════════════════════════════════════════════════════

/// Where composited frames go, and where the quit request comes from.
pub trait Screen {
    fn show(&mut self, frame: &Frame) -> Result<(), AppError>;

    /// Poll input once.  Returns true when the user asked to quit.
    fn poll_quit(&mut self) -> bool;

    /// Close the window.  Safe to call twice.
    fn release(&mut self);
}

// ════════════════════════════════════════════════════════════════════════════
// Display
// ════════════════════════════════════════════════════════════════════════════

pub struct Display {
    window:   Option<Window>,
    width:    usize,
    height:   usize,
    quit_key: Key,
    /// Mouse → simulated fingertip, only in simulation builds.
    sim_tx:   Option<Sender<SimInput>>,
    pointer:  Pointer,
}

impl Display {
    pub fn open(
        title:    &str,
        width:    usize,
        height:   usize,
        quit_key: Key,
        sim_tx:   Option<Sender<SimInput>>,
    ) -> Result<Self, AppError> {
        let mut window = Window::new(
            title,
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| AppError::Display(e.to_string()))?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps
        log::info!("window \"{}\" {}×{}", title, width, height);

        Ok(Display {
            window: Some(window),
            width,
            height,
            quit_key,
            sim_tx,
            pointer: Pointer::default(),
        })
    }

    /// Forward the mouse as a simulated fingertip.
    fn forward_pointer(&mut self) {
        let (Some(window), Some(tx)) = (self.window.as_ref(), self.sim_tx.as_ref()) else {
            return;
        };
        let held = window.get_mouse_down(MouseButton::Left);
        let pos  = window.get_mouse_pos(MouseMode::Discard);
        if let Some(input) = self.pointer.update(held, pos, self.width, self.height) {
            let _ = tx.send(input);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Pointer → simulated fingertip
// ════════════════════════════════════════════════════════════════════════════

/// Turns raw mouse state into [`SimInput`] edges.  A touch is sent every
/// frame the left button is held over the window; a single lift follows
/// when the button is let go or the cursor leaves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pointer {
    touching: bool,
}

impl Pointer {
    /// `pos` is in window pixels, `None` when the cursor is outside.
    pub fn update(
        &mut self,
        held:   bool,
        pos:    Option<(f32, f32)>,
        width:  usize,
        height: usize,
    ) -> Option<SimInput> {
        match (held, pos) {
            (true, Some((mx, my))) => {
                self.touching = true;
                Some(SimInput::Touch {
                    x: mx / width.max(1) as f32,
                    y: my / height.max(1) as f32,
                })
            }
            _ if self.touching => {
                self.touching = false;
                Some(SimInput::Lift)
            }
            _ => None,
        }
    }
}

/// Closing the window counts the same as the quit key.
pub fn quit_requested(window_open: bool, quit_key_pressed: bool) -> bool {
    !window_open || quit_key_pressed
}

impl Screen for Display {
    fn show(&mut self, frame: &Frame) -> Result<(), AppError> {
        let Some(window) = self.window.as_mut() else {
            return Err(AppError::Display("window already closed".into()));
        };
        window
            .update_with_buffer(frame.pixels(), frame.width(), frame.height())
            .map_err(|e| AppError::Display(e.to_string()))
    }

    fn poll_quit(&mut self) -> bool {
        self.forward_pointer();
        match self.window.as_ref() {
            Some(w) => quit_requested(w.is_open(), w.is_key_pressed(self.quit_key, KeyRepeat::No)),
            None    => true,
        }
    }

    fn release(&mut self) {
        if self.window.take().is_some() {
            log::info!("window closed");
        }
        self.sim_tx = None;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_sends_a_normalised_touch() {
        let mut p = Pointer::default();
        assert_eq!(
            p.update(true, Some((320.0, 120.0)), 640, 480),
            Some(SimInput::Touch { x: 0.5, y: 0.25 })
        );
        assert!(p.touching);
        // Held and moving: a fresh touch every frame.
        assert_eq!(
            p.update(true, Some((160.0, 240.0)), 640, 480),
            Some(SimInput::Touch { x: 0.25, y: 0.5 })
        );
    }

    #[test]
    fn release_lifts_exactly_once() {
        let mut p = Pointer::default();
        p.update(true, Some((10.0, 10.0)), 640, 480);
        assert_eq!(p.update(false, Some((10.0, 10.0)), 640, 480), Some(SimInput::Lift));
        assert!(!p.touching);
        assert_eq!(p.update(false, Some((10.0, 10.0)), 640, 480), None);
        assert_eq!(p.update(false, None, 640, 480), None);
    }

    #[test]
    fn leaving_the_window_while_held_lifts() {
        let mut p = Pointer::default();
        p.update(true, Some((10.0, 10.0)), 640, 480);
        assert_eq!(p.update(true, None, 640, 480), Some(SimInput::Lift));
        assert_eq!(p.update(true, None, 640, 480), None);
    }

    #[test]
    fn idle_pointer_sends_nothing() {
        let mut p = Pointer::default();
        for _ in 0..5 {
            assert_eq!(p.update(false, Some((300.0, 200.0)), 640, 480), None);
            assert_eq!(p.update(false, None, 640, 480), None);
        }
    }

    #[test]
    fn quit_on_key_or_closed_window() {
        assert!(!quit_requested(true, false));
        assert!(quit_requested(true, true));
        assert!(quit_requested(false, false));
        assert!(quit_requested(false, true));
    }
}
