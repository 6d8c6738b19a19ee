//! Hand landmarks as delivered by a hand tracker.
//!
//! Coordinates are normalised: `x` and `y` run 0.0–1.0 across the frame
//! width and height, `z` is depth relative to the wrist.  The point order is
//! the usual 21-point hand model (wrist first, then four joints per finger
//! from thumb to pinky).

/// Number of points in one hand.
pub const LANDMARK_COUNT: usize = 21;

/// Point indices within a [`HandLandmarks`] set.
#[allow(dead_code)]
pub mod index {
    pub const WRIST:             usize = 0;
    pub const THUMB_CMC:         usize = 1;
    pub const THUMB_MCP:         usize = 2;
    pub const THUMB_IP:          usize = 3;
    pub const THUMB_TIP:         usize = 4;
    pub const INDEX_FINGER_MCP:  usize = 5;
    pub const INDEX_FINGER_PIP:  usize = 6;
    pub const INDEX_FINGER_DIP:  usize = 7;
    pub const INDEX_FINGER_TIP:  usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP:   usize = 13;
    pub const RING_FINGER_PIP:   usize = 14;
    pub const RING_FINGER_DIP:   usize = 15;
    pub const RING_FINGER_TIP:   usize = 16;
    pub const PINKY_MCP:         usize = 17;
    pub const PINKY_PIP:         usize = 18;
    pub const PINKY_DIP:         usize = 19;
    pub const PINKY_TIP:         usize = 20;
}

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// One normalised keypoint.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }

    /// Scale into pixel space for a `width × height` frame.
    pub fn to_pixels(&self, width: u32, height: u32) -> (f32, f32) {
        (self.x * width as f32, self.y * height as f32)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Handedness
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
    Unknown,
}

impl Handedness {
    /// Parse a tracker label such as `"Left"` or `"right"`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "left"  => Handedness::Left,
            "right" => Handedness::Right,
            _       => Handedness::Unknown,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandLandmarks
// ════════════════════════════════════════════════════════════════════════════

/// All 21 keypoints of one detected hand in one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    pub points:     [Landmark; LANDMARK_COUNT],
    pub handedness: Handedness,
    /// Handedness classification confidence, 0.0–1.0.
    pub confidence: f32,
}

impl HandLandmarks {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        HandLandmarks {
            points,
            handedness: Handedness::Unknown,
            confidence: 1.0,
        }
    }

    /// Build from a slice; `None` unless it holds exactly 21 points.
    pub fn from_slice(points: &[Landmark]) -> Option<Self> {
        let points: [Landmark; LANDMARK_COUNT] = points.try_into().ok()?;
        Some(HandLandmarks::new(points))
    }

    /// A hand whose only meaningful point is the index fingertip.
    ///
    /// Every other point sits on the fingertip too, which is all the panel
    /// ever looks at.  Used by simulated trackers and tests.
    pub fn with_index_tip(x: f32, y: f32) -> Self {
        HandLandmarks::new([Landmark::new(x, y, 0.0); LANDMARK_COUNT])
    }

    pub fn with_handedness(mut self, handedness: Handedness, confidence: f32) -> Self {
        self.handedness = handedness;
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn index_tip(&self) -> Landmark {
        self.points[index::INDEX_FINGER_TIP]
    }

    /// Index fingertip in pixel coordinates of a `width × height` frame.
    pub fn index_tip_px(&self, width: u32, height: u32) -> (f32, f32) {
        self.index_tip().to_pixels(width, height)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
