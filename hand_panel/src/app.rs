//! Top-level application loop.
//!
//! `App` owns the [`PanelSession`] and the compositor and advances them one
//! camera frame at a time.  The camera, tracker and window live in a
//! [`Rig`], which is released exactly once however the loop ends.

use std::path::PathBuf;

use circuit_panel::{PanelLayout, PanelSession};
use image::imageops;

use crate::assets;
use crate::camera::FrameSource;
use crate::compositor::{Compositor, ReadoutStyle};
use crate::display::Screen;
use crate::error::AppError;
use crate::frame::Frame;
use crate::mediapipe::HelperConfig;
use crate::tracker::HandTracker;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub layout:       PanelLayout,
    /// Directory holding `resistor.png` and `battery.png`.
    pub asset_dir:    PathBuf,
    pub camera_index: u32,
    /// Requested capture size; the synthetic camera produces exactly this.
    pub frame_width:  u32,
    pub frame_height: u32,
    /// Flip each frame left-to-right so the view behaves like a mirror.
    pub mirror:       bool,
    pub readout:      ReadoutStyle,
    pub helper:       HelperConfig,
    pub title:        String,
    pub quit_key:     minifb::Key,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            layout:       PanelLayout::default(),
            asset_dir:    PathBuf::from("."),
            camera_index: 0,
            frame_width:  640,
            frame_height: 480,
            mirror:       true,
            readout:      ReadoutStyle::default(),
            helper:       HelperConfig::default(),
            title:        "Hand Tracking with Resistance Value".to_string(),
            quit_key:     minifb::Key::Escape,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Rig — the external resources, released once
// ════════════════════════════════════════════════════════════════════════════

/// Camera, hand tracker and window for one run.
pub struct Rig {
    camera:   Box<dyn FrameSource>,
    tracker:  Box<dyn HandTracker>,
    screen:   Box<dyn Screen>,
    released: bool,
}

impl Rig {
    pub fn new(
        camera:  Box<dyn FrameSource>,
        tracker: Box<dyn HandTracker>,
        screen:  Box<dyn Screen>,
    ) -> Self {
        Rig { camera, tracker, screen, released: false }
    }

    /// Open the backends selected at build time.
    pub fn open(cfg: &AppConfig) -> Result<Self, AppError> {
        let (camera, tracker, sim_tx) = open_backends(cfg)?;
        log::info!("camera: {}  tracker: {}", camera.name(), tracker.name());
        let screen = crate::display::Display::open(
            &cfg.title,
            cfg.frame_width as usize,
            cfg.frame_height as usize,
            cfg.quit_key,
            sim_tx,
        )?;
        Ok(Rig::new(camera, tracker, Box::new(screen)))
    }

    /// Release the camera, the tracker and the window.  Runs once; later
    /// calls (including the one from `Drop`) do nothing.
    pub fn release(&mut self) {
        if self.released { return; }
        self.released = true;
        log::info!("releasing camera, hand tracker and window");
        self.camera.release();
        self.tracker.release();
        self.screen.release();
    }
}

impl Drop for Rig {
    fn drop(&mut self) {
        self.release();
    }
}

type Backends = (
    Box<dyn FrameSource>,
    Box<dyn HandTracker>,
    Option<std::sync::mpsc::Sender<crate::tracker::SimInput>>,
);

#[cfg(not(any(feature = "webcam", feature = "leap")))]
fn open_backends(cfg: &AppConfig) -> Result<Backends, AppError> {
    use crate::camera::SyntheticCamera;
    use crate::tracker::SimHandTracker;

    let (tx, rx) = std::sync::mpsc::channel();
    Ok((
        Box::new(SyntheticCamera::new(cfg.frame_width, cfg.frame_height)),
        Box::new(SimHandTracker::new(rx)),
        Some(tx),
    ))
}

#[cfg(any(feature = "webcam", feature = "leap"))]
fn open_backends(cfg: &AppConfig) -> Result<Backends, AppError> {
    #[cfg(feature = "webcam")]
    let camera: Box<dyn FrameSource> = Box::new(crate::camera::Webcam::open(
        cfg.camera_index,
        cfg.frame_width,
        cfg.frame_height,
    )?);
    #[cfg(not(feature = "webcam"))]
    let camera: Box<dyn FrameSource> =
        Box::new(crate::camera::SyntheticCamera::new(cfg.frame_width, cfg.frame_height));

    #[cfg(feature = "leap")]
    let tracker: Box<dyn HandTracker> = Box::new(crate::tracker::LeapHandTracker::open()?);
    #[cfg(not(feature = "leap"))]
    let tracker: Box<dyn HandTracker> =
        Box::new(crate::mediapipe::MediaPipeTracker::spawn(&cfg.helper)?);

    Ok((camera, tracker, None))
}

// ════════════════════════════════════════════════════════════════════════════
// App
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome { Continue, Quit }

pub struct App {
    cfg:        AppConfig,
    panel:      PanelSession,
    compositor: Compositor,
}

impl App {
    /// Build the panel and load the icon artwork.  A missing icon fails
    /// here, before any device is touched.
    pub fn new(cfg: AppConfig) -> Result<Self, AppError> {
        let mut panel = PanelSession::new(&cfg.layout);
        assets::attach_artwork(&cfg.asset_dir, cfg.layout.icon_size, &mut panel)?;
        Ok(App::with_panel(cfg, panel))
    }

    /// Use an already prepared panel (placeholder artwork is fine).
    pub fn with_panel(cfg: AppConfig, panel: PanelSession) -> Self {
        let compositor = Compositor::new(cfg.readout);
        App { cfg, panel, compositor }
    }

    /// One pass: capture → icons → detect → drag → dots + readout → show →
    /// poll for quit.
    pub fn tick(&mut self, rig: &mut Rig) -> Result<TickOutcome, AppError> {
        let mut image = rig.camera.read()?.ok_or(AppError::NoFrame)?;
        if self.cfg.mirror {
            imageops::flip_horizontal_in_place(&mut image);
        }
        let mut frame = Frame::from_rgb(&image);

        self.compositor.overlay_icons(&mut frame, self.panel.icons());

        let hands = rig.tracker.detect(&frame)?;
        self.panel.tick(&hands, frame.width() as u32, frame.height() as u32);

        self.compositor.draw_dots(&mut frame, self.panel.dots());
        self.compositor.draw_readout(&mut frame, &self.panel.readout());

        rig.screen.show(&frame)?;

        if rig.screen.poll_quit() {
            Ok(TickOutcome::Quit)
        } else {
            Ok(TickOutcome::Continue)
        }
    }

    /// Tick until quit or error, then release `rig` whatever happened.
    pub fn run_with(&mut self, mut rig: Rig) -> Result<(), AppError> {
        let result = loop {
            match self.tick(&mut rig) {
                Ok(TickOutcome::Continue) => {}
                Ok(TickOutcome::Quit)     => break Ok(()),
                Err(e)                    => break Err(e),
            }
        };
        if let Err(e) = &result {
            log::error!("stopping after {} frames: {}", self.panel.ticks(), e);
        } else {
            log::info!("quit after {} frames: {}", self.panel.ticks(), self.panel.status());
        }
        rig.release();
        result
    }

    pub fn panel(&self) -> &PanelSession { &self.panel }
    pub fn config(&self) -> &AppConfig   { &self.cfg }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Assets are loaded first so a missing icon never opens the camera.  The
/// camera, tracker and window are released on every way out.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    let mut app = App::new(cfg)?;
    let rig = Rig::open(app.config())?;
    app.run_with(rig)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
