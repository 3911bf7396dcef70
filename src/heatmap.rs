//! Heatmap renderer - normalized density bars on an abstract raster surface.
//!
//! Pure function of its inputs: the same positions, max count, and surface
//! size always produce the same raster. Surfaces are injected so the egui
//! widget can paint directly while tests draw into a plain pixel buffer.

use crate::histogram::Position;

/// Lowest visual intensity for a non-empty bar. Single-photo months stay
/// visible instead of fading out against a large maximum.
pub const MIN_INTENSITY: f32 = 0.25;

/// Raster target for the heatmap. Dimensions come from the surface itself.
pub trait DrawSurface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    /// Fill an axis-aligned rect; `intensity` is in `[MIN_INTENSITY, 1.0]`
    /// and maps to the surface's color/opacity scheme.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, intensity: f32);
}

/// Draw one bottom-aligned bar per position. Skips entirely when there is
/// nothing to normalize against (`positions` empty or `max_count == 0`).
pub fn render_heatmap(positions: &[Position], max_count: u32, surface: &mut dyn DrawSurface) {
    if positions.is_empty() || max_count == 0 {
        return;
    }
    let surface_w = surface.width();
    let surface_h = surface.height();
    let bar_w = surface_w / positions.len() as f32;

    for (i, pos) in positions.iter().enumerate() {
        let ratio = (pos.count as f32 / max_count as f32).clamp(0.0, 1.0);
        let bar_h = ratio * surface_h;
        let x = i as f32 * bar_w;
        let intensity = MIN_INTENSITY + (1.0 - MIN_INTENSITY) * ratio;
        surface.fill_rect(x, surface_h - bar_h, bar_w, bar_h, intensity);
    }
}

/// Owned RGBA8 raster, one byte quad per pixel.
///
/// Fill writes the bar color with intensity-scaled alpha; pixels are
/// overwritten, not blended, so repeated renders are byte-identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    width: usize,
    height: usize,
    color: [u8; 3],
    pixels: Vec<u8>,
}

impl PixelSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_color(width, height, [80, 200, 120])
    }

    pub fn with_color(width: usize, height: usize, color: [u8; 3]) -> Self {
        Self {
            width,
            height,
            color,
            pixels: vec![0; width * height * 4],
        }
    }

    /// Raw RGBA8 bytes, row-major from the top-left.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// True if nothing has been drawn yet.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&b| b == 0)
    }

    #[cfg(test)]
    fn pixel_alpha(&self, x: usize, y: usize) -> u8 {
        self.pixels[(y * self.width + x) * 4 + 3]
    }
}

impl DrawSurface for PixelSurface {
    fn width(&self) -> f32 {
        self.width as f32
    }

    fn height(&self) -> f32 {
        self.height as f32
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, intensity: f32) {
        let x0 = (x.round().max(0.0) as usize).min(self.width);
        let y0 = (y.round().max(0.0) as usize).min(self.height);
        let x1 = ((x + w).round().max(0.0) as usize).min(self.width);
        let y1 = ((y + h).round().max(0.0) as usize).min(self.height);
        let alpha = (intensity.clamp(0.0, 1.0) * 255.0) as u8;

        for row in y0..y1 {
            for col in x0..x1 {
                let at = (row * self.width + col) * 4;
                self.pixels[at] = self.color[0];
                self.pixels[at + 1] = self.color[1];
                self.pixels[at + 2] = self.color[2];
                self.pixels[at + 3] = alpha;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::DensityBucket;

    fn positions(counts: &[u32]) -> Vec<Position> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| DensityBucket {
                year: 2023,
                month: (i + 1) as u32,
                count,
            })
            .collect()
    }

    /// Counts fill calls instead of rasterizing.
    struct CountingSurface {
        calls: usize,
    }

    impl DrawSurface for CountingSurface {
        fn width(&self) -> f32 {
            100.0
        }
        fn height(&self) -> f32 {
            20.0
        }
        fn fill_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _intensity: f32) {
            self.calls += 1;
        }
    }

    #[test]
    fn test_empty_positions_draw_nothing() {
        let mut surface = CountingSurface { calls: 0 };
        render_heatmap(&[], 9, &mut surface);
        assert_eq!(surface.calls, 0);
    }

    #[test]
    fn test_zero_max_count_draws_nothing() {
        let mut surface = CountingSurface { calls: 0 };
        render_heatmap(&positions(&[0, 0]), 0, &mut surface);
        assert_eq!(surface.calls, 0);
    }

    #[test]
    fn test_one_bar_per_position() {
        let mut surface = CountingSurface { calls: 0 };
        render_heatmap(&positions(&[1, 5, 9]), 9, &mut surface);
        assert_eq!(surface.calls, 3);
    }

    #[test]
    fn test_render_is_idempotent() {
        let pos = positions(&[3, 7, 1, 9]);
        let mut first = PixelSurface::new(40, 10);
        render_heatmap(&pos, 9, &mut first);
        let mut second = first.clone();
        render_heatmap(&pos, 9, &mut second);
        assert!(!first.is_blank());
        assert_eq!(first, second);
    }

    #[test]
    fn test_bars_are_bottom_aligned() {
        // One short bar among tall ones: its column must be empty at the
        // top of the surface and filled at the baseline.
        let mut surface = PixelSurface::new(20, 10);
        render_heatmap(&positions(&[10, 1]), 10, &mut surface);
        // Right half holds the count-1 bar (10% height)
        assert_eq!(surface.pixel_alpha(15, 0), 0); // top: empty
        assert!(surface.pixel_alpha(15, 9) > 0); // baseline: filled
        // Full-height bar fills its whole column
        assert!(surface.pixel_alpha(5, 0) > 0);
        assert!(surface.pixel_alpha(5, 9) > 0);
    }

    #[test]
    fn test_low_counts_stay_visible() {
        let mut surface = PixelSurface::new(20, 10);
        render_heatmap(&positions(&[1, 10]), 10, &mut surface);
        let floor_alpha = (MIN_INTENSITY * 255.0) as u8;
        // The single-photo bar renders near the intensity floor, not invisible
        assert!(surface.pixel_alpha(2, 9) >= floor_alpha);
        // The max bar renders at full intensity
        assert_eq!(surface.pixel_alpha(15, 9), 255);
    }
}
