//! Software frame buffer.
//!
//! Pixels are packed `0xAARRGGBB` (alpha always `0xFF`), which is what
//! `minifb` expects.  Every drawing primitive takes signed coordinates and
//! clips against the frame, so callers never have to pre-clip.

use image::RgbImage;

// ════════════════════════════════════════════════════════════════════════════
// Frame
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    width:  usize,
    height: usize,
    buf:    Vec<u32>,
}

impl Frame {
    pub fn new(width: usize, height: usize, color: u32) -> Self {
        Frame { width, height, buf: vec![color; width * height] }
    }

    /// Pack an RGB camera image.
    pub fn from_rgb(img: &RgbImage) -> Self {
        let buf = img
            .pixels()
            .map(|p| pack(p[0], p[1], p[2]))
            .collect();
        Frame {
            width:  img.width() as usize,
            height: img.height() as usize,
            buf,
        }
    }

    /// Unpack to tightly packed RGB bytes, row-major.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.buf.len() * 3);
        for &px in &self.buf {
            out.push((px >> 16) as u8);
            out.push((px >>  8) as u8);
            out.push( px        as u8);
        }
        out
    }

    pub fn width(&self)  -> usize  { self.width }
    pub fn height(&self) -> usize  { self.height }
    pub fn pixels(&self) -> &[u32] { &self.buf }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.buf[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 { return None; }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height { return None; }
        Some(y * self.width + x)
    }

    // ── primitives ───────────────────────────────────────────────────────

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.buf[i] = color;
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: usize, h: usize, color: u32) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else { return };
        for row in y0..y1 {
            self.buf[row * self.width + x0..row * self.width + x1].fill(color);
        }
    }

    /// Copy a `w × h` block of pixels with its top-left at `(x, y)`.
    /// Whatever falls outside the frame is dropped.  Returns the number of
    /// pixels written.
    pub fn blit(&mut self, x: i32, y: i32, w: usize, h: usize, src: &[u32]) -> usize {
        debug_assert_eq!(src.len(), w * h);
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else { return 0 };
        // Offset of the visible part inside `src`.
        let sx = (x0 as i64 - x as i64) as usize;
        let sy = (y0 as i64 - y as i64) as usize;
        let run = x1 - x0;
        for (i, row) in (y0..y1).enumerate() {
            let s = (sy + i) * w + sx;
            let d = row * self.width + x0;
            self.buf[d..d + run].copy_from_slice(&src[s..s + run]);
        }
        run * (y1 - y0)
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, r: u32, color: u32) {
        let r  = r as i32;
        let r2 = r * r;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r2 {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Draw `text` with the 3×5 bitmap font, each font pixel blown up to a
    /// `scale × scale` block.  `(x, y)` is the top-left of the first glyph.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, scale: usize, color: u32) {
        let s = scale.max(1) as i32;
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3i32 {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(
                            cx + col * s,
                            y + row as i32 * s,
                            s as usize,
                            s as usize,
                            color,
                        );
                    }
                }
            }
            cx += 4 * s; // 3 wide + 1 gap
            if cx >= self.width as i32 { break; }
        }
    }

    /// Intersect a rectangle with the frame: `(x0, y0, x1, y1)` half-open,
    /// or `None` if nothing is visible.
    fn clip(&self, x: i32, y: i32, w: usize, h: usize) -> Option<(usize, usize, usize, usize)> {
        let x0 = (x as i64).max(0);
        let y0 = (y as i64).max(0);
        let x1 = (x as i64 + w as i64).min(self.width as i64);
        let y1 = (y as i64 + h as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }
}

/// Pack an opaque RGB triple.
pub fn pack(r: u8, g: u8, b: u8) -> u32 {
    0xFF000000 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Pixel height of one line of text at `scale`.
pub fn text_height(scale: usize) -> usize {
    5 * scale.max(1)
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: u32 = 0xFF000000;
    const RED:   u32 = 0xFFFF0000;

    #[test]
    fn rgb_round_trip_keeps_channel_order() {
        let img = RgbImage::from_raw(2, 1, vec![10, 20, 30, 200, 100, 0]).unwrap();
        let f = Frame::from_rgb(&img);
        assert_eq!(f.pixel(0, 0), Some(0xFF0A141E));
        assert_eq!(f.to_rgb_bytes(), vec![10, 20, 30, 200, 100, 0]);
    }

    #[test]
    fn out_of_range_pixels_are_ignored() {
        let mut f = Frame::new(4, 4, BLACK);
        f.set_pixel(-1, 0, RED);
        f.set_pixel(4, 0, RED);
        f.set_pixel(0, 4, RED);
        assert!(f.pixels().iter().all(|&p| p == BLACK));
        assert_eq!(f.pixel(-1, 2), None);
    }

    #[test]
    fn blit_inside() {
        let mut f = Frame::new(5, 5, BLACK);
        let written = f.blit(1, 1, 2, 2, &[1, 2, 3, 4]);
        assert_eq!(written, 4);
        assert_eq!(f.pixel(1, 1), Some(1));
        assert_eq!(f.pixel(2, 1), Some(2));
        assert_eq!(f.pixel(1, 2), Some(3));
        assert_eq!(f.pixel(2, 2), Some(4));
        assert_eq!(f.pixel(3, 3), Some(BLACK));
    }

    #[test]
    fn blit_clips_top_left() {
        let mut f = Frame::new(4, 4, BLACK);
        let src: Vec<u32> = (0..9).collect(); // 3×3
        let written = f.blit(-1, -2, 3, 3, &src);
        // Only the bottom row, last two columns land: src (1,2) and (2,2).
        assert_eq!(written, 2);
        assert_eq!(f.pixel(0, 0), Some(7));
        assert_eq!(f.pixel(1, 0), Some(8));
        assert_eq!(f.pixel(0, 1), Some(BLACK));
    }

    #[test]
    fn blit_clips_bottom_right() {
        let mut f = Frame::new(4, 4, BLACK);
        let src: Vec<u32> = (0..9).collect();
        let written = f.blit(2, 3, 3, 3, &src);
        assert_eq!(written, 2);
        assert_eq!(f.pixel(2, 3), Some(0));
        assert_eq!(f.pixel(3, 3), Some(1));
    }

    #[test]
    fn blit_fully_outside_writes_nothing() {
        let mut f = Frame::new(4, 4, BLACK);
        assert_eq!(f.blit(10, 10, 2, 2, &[RED; 4]), 0);
        assert_eq!(f.blit(-5, 0, 2, 2, &[RED; 4]), 0);
        assert!(f.pixels().iter().all(|&p| p == BLACK));
    }

    #[test]
    fn filled_circle_covers_center_not_corners() {
        let mut f = Frame::new(30, 30, BLACK);
        f.fill_circle(15, 15, 10, RED);
        assert_eq!(f.pixel(15, 15), Some(RED));
        assert_eq!(f.pixel(25, 15), Some(RED));
        assert_eq!(f.pixel(15, 5),  Some(RED));
        assert_eq!(f.pixel(24, 24), Some(BLACK));
    }

    #[test]
    fn circle_near_edge_is_clipped() {
        let mut f = Frame::new(10, 10, BLACK);
        f.fill_circle(0, 0, 10, RED);
        assert_eq!(f.pixel(0, 0), Some(RED));
    }

    #[test]
    fn text_is_scaled() {
        let mut f = Frame::new(40, 20, BLACK);
        f.draw_text("1", 0, 0, 2, RED);
        // Glyph '1' top row is 0b010: the middle column, 2×2 block.
        assert_eq!(f.pixel(2, 0), Some(RED));
        assert_eq!(f.pixel(3, 1), Some(RED));
        assert_eq!(f.pixel(0, 0), Some(BLACK));
        assert_eq!(text_height(2), 10);
    }
}
