//! Draggable component icons.

// ════════════════════════════════════════════════════════════════════════════
// Geometry
// ════════════════════════════════════════════════════════════════════════════

/// A pixel position.  May be negative or beyond the frame: an icon dragged
/// to the edge keeps its true position and is clipped when drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub const fn new(w: u32, h: u32) -> Self {
        Size { w, h }
    }

    pub fn area(&self) -> usize {
        self.w as usize * self.h as usize
    }
}

// ════════════════════════════════════════════════════════════════════════════
// IconKind
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IconKind {
    Resistor,
    VoltageSource,
}

impl IconKind {
    /// Both kinds, in the order the drag controller visits them.
    pub fn all() -> [IconKind; 2] {
        [IconKind::Resistor, IconKind::VoltageSource]
    }

    pub fn name(&self) -> &'static str {
        match self {
            IconKind::Resistor      => "resistor",
            IconKind::VoltageSource => "voltage source",
        }
    }

    /// File name of the icon image in the working directory.
    pub fn asset_name(&self) -> &'static str {
        match self {
            IconKind::Resistor      => "resistor.png",
            IconKind::VoltageSource => "battery.png",
        }
    }

    /// Fill colour used until real artwork is attached.
    pub fn placeholder_color(&self) -> u32 {
        match self {
            IconKind::Resistor      => 0xFFC08040,
            IconKind::VoltageSource => 0xFF4080C0,
        }
    }

    pub(crate) fn slot(&self) -> usize {
        match self {
            IconKind::Resistor      => 0,
            IconKind::VoltageSource => 1,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Icon
// ════════════════════════════════════════════════════════════════════════════

/// One draggable icon: where it is, how big it is, what it looks like, and
/// whether a fingertip is currently holding it.
#[derive(Clone, Debug, PartialEq)]
pub struct Icon {
    pub kind:     IconKind,
    /// Top-left corner in frame pixels.
    pub pos:      Point,
    pub size:     Size,
    /// Row-major `0xAARRGGBB` pixels, `size.w * size.h` long.
    pub pixels:   Vec<u32>,
    pub dragging: bool,
}

impl Icon {
    pub fn new(kind: IconKind, pos: Point, size: Size) -> Self {
        Icon {
            kind,
            pos,
            size,
            pixels:   vec![kind.placeholder_color(); size.area()],
            dragging: false,
        }
    }

    /// Replace the artwork.  Returns false (and keeps the old pixels) when
    /// the buffer does not match the icon size.
    pub fn set_pixels(&mut self, pixels: Vec<u32>) -> bool {
        if pixels.len() != self.size.area() {
            return false;
        }
        self.pixels = pixels;
        true
    }

    /// Strict containment: points on the border are outside.
    pub fn contains(&self, fx: f32, fy: f32) -> bool {
        let x0 = self.pos.x as f32;
        let y0 = self.pos.y as f32;
        x0 < fx && fx < x0 + self.size.w as f32
            && y0 < fy && fy < y0 + self.size.h as f32
    }

    /// Move so the icon's centre lands on `(fx, fy)`.
    pub fn center_on(&mut self, fx: f32, fy: f32) {
        self.pos = Point::new(
            (fx - self.size.w as f32 / 2.0).floor() as i32,
            (fy - self.size.h as f32 / 2.0).floor() as i32,
        );
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn resistor() -> Icon {
        Icon::new(IconKind::Resistor, Point::new(500, 50), Size::new(100, 100))
    }

    #[test]
    fn contains_interior_points() {
        let icon = resistor();
        assert!(icon.contains(500.5, 50.5));
        assert!(icon.contains(550.0, 100.0));
        assert!(icon.contains(599.9, 149.9));
    }

    #[test]
    fn border_is_outside() {
        let icon = resistor();
        assert!(!icon.contains(500.0, 100.0));
        assert!(!icon.contains(600.0, 100.0));
        assert!(!icon.contains(550.0, 50.0));
        assert!(!icon.contains(550.0, 150.0));
    }

    #[test]
    fn center_on_floors_toward_negative_infinity() {
        let mut icon = resistor();
        icon.center_on(10.5, 20.25);
        assert_eq!(icon.pos, Point::new(-40, -30));
        icon.center_on(49.5, 0.0);
        assert_eq!(icon.pos, Point::new(-1, -50));
    }

    #[test]
    fn set_pixels_rejects_wrong_length() {
        let mut icon = resistor();
        assert!(!icon.set_pixels(vec![0; 10]));
        assert_eq!(icon.pixels[0], IconKind::Resistor.placeholder_color());
        assert!(icon.set_pixels(vec![0xFF000000; 100 * 100]));
        assert_eq!(icon.pixels[0], 0xFF000000);
    }

    #[test]
    fn kinds_have_distinct_assets() {
        assert_ne!(IconKind::Resistor.asset_name(), IconKind::VoltageSource.asset_name());
    }
}
