//! Icon artwork.
//!
//! Images are decoded with their alpha channel, resized to the icon size
//! with bilinear filtering, then flattened to opaque pixels: the alpha
//! channel is dropped, not blended.

use std::path::Path;

use circuit_panel::{IconKind, PanelSession, Size};
use image::imageops::{self, FilterType};
use image::error::{ParameterError, ParameterErrorKind};
use image::{ImageError, RgbaImage};

use crate::error::AppError;
use crate::frame::pack;

/// Load one icon image and convert it to `size`-shaped packed pixels.
pub fn load_icon(path: &Path, size: Size) -> Result<Vec<u32>, AppError> {
    let img = image::open(path).map_err(|source| AppError::Asset {
        path: path.to_path_buf(),
        source,
    })?;
    if !img.color().has_alpha() {
        log::warn!("{} has no alpha channel; using it as-is", path.display());
    }
    let resized = imageops::resize(&img.to_rgba8(), size.w, size.h, FilterType::Triangle);
    log::info!(
        "loaded {} ({}×{} → {}×{})",
        path.display(),
        img.width(),
        img.height(),
        size.w,
        size.h,
    );
    Ok(flatten(&resized))
}

/// Drop alpha, keep RGB.
pub fn flatten(img: &RgbaImage) -> Vec<u32> {
    img.pixels().map(|p| pack(p[0], p[1], p[2])).collect()
}

/// Load both icons from `dir` and attach them to `panel`.  Either one
/// failing is fatal.
pub fn attach_artwork(dir: &Path, size: Size, panel: &mut PanelSession) -> Result<(), AppError> {
    for kind in IconKind::all() {
        let path = dir.join(kind.asset_name());
        let pixels = load_icon(&path, size)?;
        if !panel.set_artwork(kind, pixels) {
            // `size` disagrees with the icon's own size.
            return Err(AppError::Asset {
                path,
                source: ImageError::Parameter(ParameterError::from_kind(
                    ParameterErrorKind::DimensionMismatch,
                )),
            });
        }
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use circuit_panel::PanelLayout;
    use image::Rgba;

    /// Resampling may be off by one on a flat colour.
    fn near(px: u32, rgb: (u8, u8, u8)) -> bool {
        let d = |shift: u32, v: u8| ((px >> shift) as u8).abs_diff(v) <= 1;
        px >> 24 == 0xFF && d(16, rgb.0) && d(8, rgb.1) && d(0, rgb.2)
    }

    fn write_png(dir: &Path, name: &str, w: u32, h: u32, px: [u8; 4]) {
        RgbaImage::from_pixel(w, h, Rgba(px)).save(dir.join(name)).unwrap();
    }

    #[test]
    fn flatten_drops_alpha() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 0]));
        assert_eq!(flatten(&img), vec![0xFF010203]);
    }

    #[test]
    fn icon_is_resized() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "big.png", 37, 12, [200, 10, 10, 255]);
        let pixels = load_icon(&dir.path().join("big.png"), Size::new(100, 100)).unwrap();
        assert_eq!(pixels.len(), 100 * 100);
        assert!(pixels.iter().all(|&p| near(p, (200, 10, 10))));
    }

    #[test]
    fn missing_file_is_an_asset_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_icon(&dir.path().join("resistor.png"), Size::new(100, 100)).unwrap_err();
        assert!(matches!(err, AppError::Asset { .. }));
    }

    #[test]
    fn attaches_both_icons() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "resistor.png", 64, 64, [255, 0, 0, 255]);
        write_png(dir.path(), "battery.png",  64, 64, [0, 0, 255, 128]);
        let layout = PanelLayout::default();
        let mut panel = PanelSession::new(&layout);
        attach_artwork(dir.path(), layout.icon_size, &mut panel).unwrap();
        assert!(near(panel.icon(IconKind::Resistor).pixels[0],      (255, 0, 0)));
        assert!(near(panel.icon(IconKind::VoltageSource).pixels[0], (0, 0, 255)));
    }

    #[test]
    fn one_missing_icon_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "resistor.png", 8, 8, [255, 0, 0, 255]);
        let layout = PanelLayout::default();
        let mut panel = PanelSession::new(&layout);
        let err = attach_artwork(dir.path(), layout.icon_size, &mut panel).unwrap_err();
        match err {
            AppError::Asset { path, .. } => assert!(path.ends_with("battery.png")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn size_mismatch_with_the_icon_is_an_asset_error() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "resistor.png", 8, 8, [255, 0, 0, 255]);
        write_png(dir.path(), "battery.png",  8, 8, [0, 0, 255, 255]);
        let mut panel = PanelSession::new(&PanelLayout::default());
        // The panel's icons are 100×100; artwork resized to 50×50 cannot fit.
        let err = attach_artwork(dir.path(), Size::new(50, 50), &mut panel).unwrap_err();
        match err {
            AppError::Asset { path, source } => {
                assert!(path.ends_with("resistor.png"));
                assert!(matches!(source, ImageError::Parameter(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_ne!(panel.icon(IconKind::Resistor).pixels.len(), 50 * 50);
    }
}
