//! MediaPipe hand landmarks via a helper process.
//!
//! The helper (`scripts/hand_landmarks.py`) loads the MediaPipe hands model
//! and speaks a tiny protocol over its stdin/stdout:
//!
//! 1. on start-up it prints `READY`;
//! 2. per frame it reads a 12-byte header (width, height, channels as
//!    little-endian `u32`) followed by `width * height * channels` RGB bytes;
//! 3. it answers with one JSON line:
//!    `{"hands":[{"handedness":"Left","score":0.97,"landmarks":[{"x":..,"y":..,"z":..}, …21]}]}`
//!    or `{"hands":[],"error":"…"}` when inference failed, which ends the
//!    session like any other runtime error.
//!
//! `score` is MediaPipe's left/right classification confidence for the
//! hand; the model applies its own detection threshold before that.

use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

use circuit_panel::{HandLandmarks, Handedness, Landmark, LANDMARK_COUNT};
use serde::Deserialize;

use crate::error::AppError;
use crate::frame::Frame;
use crate::tracker::HandTracker;

// ════════════════════════════════════════════════════════════════════════════
// Wire format
// ════════════════════════════════════════════════════════════════════════════

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
    #[serde(default)]
    z: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    #[serde(default)]
    handedness: String,
    #[serde(default = "full_score")]
    score:      f32,
    landmarks:  Vec<LandmarkJson>,
}

fn full_score() -> f32 { 1.0 }

#[derive(Deserialize, Debug)]
struct DetectionJson {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Parse one response line.  Hands whose handedness score is below
/// `min_handedness_score` or with the wrong number of points are dropped.
/// A helper-side error is returned as [`AppError::Tracker`].
pub fn parse_response(line: &str, min_handedness_score: f32) -> Result<Vec<HandLandmarks>, AppError> {
    let result: DetectionJson = serde_json::from_str(line.trim()).map_err(|e| {
        AppError::Tracker(format!("bad response from helper ({}): {}", e, line.trim()))
    })?;

    if let Some(error) = result.error {
        return Err(AppError::Tracker(format!("helper failed: {}", error)));
    }

    let mut hands = Vec::with_capacity(result.hands.len());
    for hand in result.hands {
        if hand.score < min_handedness_score {
            continue;
        }
        let points: Vec<Landmark> = hand
            .landmarks
            .iter()
            .map(|lm| Landmark::new(lm.x, lm.y, lm.z))
            .collect();
        let Some(parsed) = HandLandmarks::from_slice(&points) else {
            log::warn!("expected {} landmarks, got {}", LANDMARK_COUNT, points.len());
            continue;
        };
        hands.push(parsed.with_handedness(Handedness::from_label(&hand.handedness), hand.score));
    }
    Ok(hands)
}

/// The 12-byte frame header.
pub fn frame_header(width: u32, height: u32, channels: u32) -> [u8; 12] {
    let mut h = [0u8; 12];
    h[0..4].copy_from_slice(&width.to_le_bytes());
    h[4..8].copy_from_slice(&height.to_le_bytes());
    h[8..12].copy_from_slice(&channels.to_le_bytes());
    h
}

// ════════════════════════════════════════════════════════════════════════════
// MediaPipeTracker
// ════════════════════════════════════════════════════════════════════════════

/// Where to find the helper.
#[derive(Clone, Debug, PartialEq)]
pub struct HelperConfig {
    pub python:    PathBuf,
    pub script:    PathBuf,
    /// Minimum handedness classification score, 0.0–1.0.
    pub min_handedness_score: f32,
}

impl Default for HelperConfig {
    fn default() -> Self {
        HelperConfig {
            python:    PathBuf::from("python3"),
            script:    PathBuf::from("scripts/hand_landmarks.py"),
            min_handedness_score: 0.5,
        }
    }
}

pub struct MediaPipeTracker {
    process:              Child,
    stdout:               BufReader<ChildStdout>,
    min_handedness_score: f32,
    released:             bool,
}

impl MediaPipeTracker {
    /// Start the helper and wait for it to say `READY`.
    pub fn spawn(cfg: &HelperConfig) -> Result<Self, AppError> {
        if !Path::new(&cfg.script).exists() {
            return Err(AppError::Tracker(format!(
                "helper script not found at {}",
                cfg.script.display()
            )));
        }

        log::info!("starting MediaPipe helper {}", cfg.script.display());
        let mut process = Command::new(&cfg.python)
            .arg(&cfg.script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| AppError::Tracker(format!("failed to start {}: {}", cfg.python.display(), e)))?;

        let Some(stdout) = process.stdout.take() else {
            let _ = process.kill();
            return Err(AppError::Tracker("helper has no stdout".into()));
        };
        let mut tracker = MediaPipeTracker {
            process,
            stdout:               BufReader::new(stdout),
            min_handedness_score: cfg.min_handedness_score.clamp(0.0, 1.0),
            released:             false,
        };

        let mut ready = String::new();
        tracker.stdout.read_line(&mut ready)?;
        if ready.trim() != "READY" {
            // Drop kills the child.
            return Err(AppError::Tracker(format!(
                "helper did not signal ready, got: {:?}",
                ready.trim()
            )));
        }
        log::info!("MediaPipe helper ready");
        Ok(tracker)
    }
}

impl HandTracker for MediaPipeTracker {
    fn name(&self) -> &'static str { "MediaPipe helper" }

    fn detect(&mut self, frame: &Frame) -> Result<Vec<HandLandmarks>, AppError> {
        if self.released {
            return Err(AppError::Tracker("detect after release".into()));
        }
        if frame.width() == 0 || frame.height() == 0 {
            return Ok(Vec::new());
        }

        let stdin = self
            .process
            .stdin
            .as_mut()
            .ok_or_else(|| AppError::Tracker("helper stdin closed".into()))?;
        stdin.write_all(&frame_header(frame.width() as u32, frame.height() as u32, 3))?;
        stdin.write_all(&frame.to_rgb_bytes())?;
        stdin.flush()?;

        let mut line = String::new();
        if self.stdout.read_line(&mut line)? == 0 {
            return Err(AppError::Tracker("helper exited".into()));
        }
        let hands = parse_response(&line, self.min_handedness_score)?;
        log::trace!("{} hand(s) detected", hands.len());
        Ok(hands)
    }

    fn release(&mut self) {
        if self.released { return; }
        self.released = true;
        // Closing stdin lets the helper leave its read loop on its own.
        drop(self.process.stdin.take());
        match self.process.try_wait() {
            Ok(Some(_)) => {}
            _ => {
                let _ = self.process.kill();
                let _ = self.process.wait();
            }
        }
        log::info!("MediaPipe helper stopped");
    }
}

impl Drop for MediaPipeTracker {
    fn drop(&mut self) {
        self.release();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_json(handedness: &str, score: f32, points: usize, tip: (f32, f32)) -> String {
        let lms: Vec<String> = (0..points)
            .map(|i| {
                let (x, y) = if i == 8 { tip } else { (0.0, 0.0) };
                format!(r#"{{"x":{},"y":{},"z":0.0}}"#, x, y)
            })
            .collect();
        format!(
            r#"{{"handedness":"{}","score":{},"landmarks":[{}]}}"#,
            handedness, score, lms.join(",")
        )
    }

    #[test]
    fn parses_all_confident_hands_in_order() {
        let line = format!(
            r#"{{"hands":[{},{}]}}"#,
            hand_json("Left", 0.9, 21, (0.25, 0.5)),
            hand_json("Right", 0.8, 21, (0.75, 0.5)),
        );
        let hands = parse_response(&line, 0.5).unwrap();
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[0].handedness, Handedness::Left);
        assert_eq!(hands[0].index_tip_px(640, 480), (160.0, 240.0));
        assert_eq!(hands[1].handedness, Handedness::Right);
        assert_eq!(hands[1].confidence, 0.8);
    }

    #[test]
    fn drops_low_handedness_score_and_short_hands() {
        let line = format!(
            r#"{{"hands":[{},{},{}]}}"#,
            hand_json("Left", 0.2, 21, (0.1, 0.1)),
            hand_json("Right", 0.9, 20, (0.1, 0.1)),
            hand_json("Right", 0.9, 21, (0.5, 0.5)),
        );
        let hands = parse_response(&line, 0.5).unwrap();
        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].index_tip_px(2, 2), (1.0, 1.0));
    }

    #[test]
    fn helper_error_is_a_tracker_error() {
        let r = parse_response(r#"{"hands":[],"error":"RuntimeError: graph failed"}"#, 0.5);
        match r {
            Err(AppError::Tracker(msg)) => assert!(msg.contains("graph failed")),
            other => panic!("expected a tracker error, got {:?}", other),
        }
    }

    #[test]
    fn bad_channel_reply_is_a_tracker_error() {
        let r = parse_response(r#"{"hands":[],"error":"expected 3 channels, got 4"}"#, 0.5);
        assert!(matches!(r, Err(AppError::Tracker(_))));
    }

    #[test]
    fn empty_detection() {
        assert!(parse_response("{\"hands\":[]}\n", 0.5).unwrap().is_empty());
    }

    #[test]
    fn garbage_is_a_tracker_error() {
        assert!(matches!(parse_response("Traceback (most recent call last):", 0.5),
                         Err(AppError::Tracker(_))));
    }

    #[test]
    fn header_is_little_endian() {
        assert_eq!(
            frame_header(640, 480, 3),
            [0x80, 0x02, 0, 0, 0xE0, 0x01, 0, 0, 3, 0, 0, 0]
        );
    }

    #[test]
    fn missing_script_fails_fast() {
        let cfg = HelperConfig {
            script: PathBuf::from("no/such/helper.py"),
            ..HelperConfig::default()
        };
        assert!(matches!(MediaPipeTracker::spawn(&cfg), Err(AppError::Tracker(_))));
    }
}
