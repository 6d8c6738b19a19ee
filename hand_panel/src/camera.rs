//! Frame sources — a real camera (feature `webcam`) or a synthetic one.
//!
//! Consumers only see [`FrameSource`]: one blocking `read()` per tick that
//! hands back an RGB image, or `None` when the device has nothing to give.

use image::{Rgb, RgbImage};

use crate::error::AppError;

// ════════════════════════════════════════════════════════════════════════════
// FrameSource trait
// ════════════════════════════════════════════════════════════════════════════

pub trait FrameSource {
    fn name(&self) -> String;

    /// Block until the next frame.  `Ok(None)` means the device is open
    /// but produced nothing.
    fn read(&mut self) -> Result<Option<RgbImage>, AppError>;

    /// Stop streaming and let go of the device.  Safe to call twice.
    fn release(&mut self);
}

// ════════════════════════════════════════════════════════════════════════════
// SyntheticCamera — always available
// ════════════════════════════════════════════════════════════════════════════

/// Produces a slowly drifting gradient so the window has something behind
/// the icons when no camera is attached.
pub struct SyntheticCamera {
    width:    u32,
    height:   u32,
    frame_no: u64,
    /// Stop producing frames after this many; `None` = forever.
    limit:    Option<u64>,
    released: bool,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32) -> Self {
        log::info!("synthetic camera {}×{}", width, height);
        SyntheticCamera { width, height, frame_no: 0, limit: None, released: false }
    }

    pub fn with_frame_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl FrameSource for SyntheticCamera {
    fn name(&self) -> String {
        format!("synthetic {}×{}", self.width, self.height)
    }

    fn read(&mut self) -> Result<Option<RgbImage>, AppError> {
        if self.released {
            return Err(AppError::Camera("read after release".into()));
        }
        if self.limit.is_some_and(|l| self.frame_no >= l) {
            return Ok(None);
        }
        let (w, h) = (self.width.max(1), self.height.max(1));
        let phase = (self.frame_no % 256) as u32;
        let img = RgbImage::from_fn(self.width, self.height, |x, y| {
            Rgb([
                (40 + x * 60 / w) as u8,
                (40 + y * 60 / h) as u8,
                (70 + ((x + y + phase) % 256) * 40 / 256) as u8,
            ])
        });
        self.frame_no += 1;
        Ok(Some(img))
    }

    fn release(&mut self) {
        if !self.released {
            log::info!("synthetic camera released after {} frames", self.frame_no);
            self.released = true;
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Webcam — real hardware (feature = "webcam")
// ════════════════════════════════════════════════════════════════════════════

/// A camera opened through `nokhwa`.
#[cfg(feature = "webcam")]
pub struct Webcam {
    camera: nokhwa::Camera,
    open:   bool,
}

#[cfg(feature = "webcam")]
impl Webcam {
    /// Open camera `index` and start streaming, asking for the closest
    /// format to `width × height`.
    pub fn open(index: u32, width: u32, height: u32) -> Result<Self, AppError> {
        use nokhwa::pixel_format::RgbFormat;
        use nokhwa::utils::{
            CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
        };

        let wanted = CameraFormat::new(Resolution::new(width, height), FrameFormat::MJPEG, 30);
        let format = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(wanted));
        let mut camera = nokhwa::Camera::new(CameraIndex::Index(index), format)
            .map_err(|e| AppError::Camera(e.to_string()))?;
        camera
            .open_stream()
            .map_err(|e| AppError::Camera(e.to_string()))?;

        let res = camera.resolution();
        log::info!(
            "opened camera {} ({}×{})",
            camera.info().human_name(),
            res.width(),
            res.height()
        );
        Ok(Webcam { camera, open: true })
    }
}

#[cfg(feature = "webcam")]
impl FrameSource for Webcam {
    fn name(&self) -> String {
        self.camera.info().human_name()
    }

    fn read(&mut self) -> Result<Option<RgbImage>, AppError> {
        use nokhwa::pixel_format::RgbFormat;

        if !self.open {
            return Err(AppError::Camera("read after release".into()));
        }
        let buffer = match self.camera.frame() {
            Ok(b)  => b,
            Err(e) => {
                log::warn!("camera returned no frame: {}", e);
                return Ok(None);
            }
        };
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| AppError::Camera(e.to_string()))?;
        // Re-wrap the raw bytes: nokhwa may link a different `image` release.
        let (w, h) = (decoded.width(), decoded.height());
        let img = RgbImage::from_raw(w, h, decoded.into_raw())
            .ok_or_else(|| AppError::Camera("decoded frame has the wrong length".into()))?;
        Ok(Some(img))
    }

    fn release(&mut self) {
        if self.open {
            if let Err(e) = self.camera.stop_stream() {
                log::warn!("camera did not stop cleanly: {}", e);
            }
            self.open = false;
            log::info!("camera released");
        }
    }
}

#[cfg(feature = "webcam")]
impl Drop for Webcam {
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

    #[test]
    fn synthetic_frames_have_requested_size() {
        let mut cam = SyntheticCamera::new(64, 48);
        let img = cam.read().unwrap().unwrap();
        assert_eq!(img.dimensions(), (64, 48));
    }

    #[test]
    fn frame_limit_yields_none() {
        let mut cam = SyntheticCamera::new(8, 8).with_frame_limit(2);
        assert!(cam.read().unwrap().is_some());
        assert!(cam.read().unwrap().is_some());
        assert!(cam.read().unwrap().is_none());
    }

    #[test]
    fn read_after_release_is_an_error() {
        let mut cam = SyntheticCamera::new(8, 8);
        cam.release();
        cam.release();
        assert!(matches!(cam.read(), Err(AppError::Camera(_))));
    }
}
