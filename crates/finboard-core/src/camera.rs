//! Viewport transform for pan/zoom.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed zoom factor.
pub const MIN_SCALE: f64 = 0.1;
/// Largest allowed zoom factor.
pub const MAX_SCALE: f64 = 5.0;
/// Step used by the zoom in/out controls.
pub const ZOOM_STEP: f64 = 0.1;
/// Scale change per unit of wheel delta when zooming with ctrl/cmd held.
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.001;

/// Convert a screen point to world coordinates.
pub fn to_world(screen_point: Point, offset: Vec2, scale: f64) -> Point {
    Point::new(
        (screen_point.x - offset.x) / scale,
        (screen_point.y - offset.y) / scale,
    )
}

/// Convert a world point to screen coordinates.
pub fn to_screen(world_point: Point, offset: Vec2, scale: f64) -> Point {
    Point::new(
        world_point.x * scale + offset.x,
        world_point.y * scale + offset.y,
    )
}

/// Clamp a zoom factor into `[MIN_SCALE, MAX_SCALE]`.
///
/// Non-finite input falls back to 1.0 so the scale can never reach zero.
pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_finite() {
        scale.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        1.0
    }
}

/// Viewport manages the view transform for the canvas.
///
/// `offset` is the pan translation in screen pixels and `scale` the uniform
/// zoom factor. Zooming pivots on the world origin; the offset is left alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Current translation offset (pan), in screen pixels.
    pub offset: Vec2,
    /// Current zoom factor (1.0 = 100%).
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl Viewport {
    /// Create a new viewport with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Affine transform for rendering: world to screen.
    ///
    /// Applied once to the whole scene, never per element.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Inverse transform for input handling: screen to world.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        to_world(screen_point, self.offset, self.scale)
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        to_screen(world_point, self.offset, self.scale)
    }

    /// Convert a screen-space delta to a world-space delta.
    pub fn screen_delta_to_world(&self, delta: Vec2) -> Vec2 {
        delta / self.scale
    }

    /// Pan the viewport by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Set the zoom factor, clamped.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = clamp_scale(scale);
    }

    /// Step the zoom in by `ZOOM_STEP`.
    pub fn zoom_in(&mut self) {
        self.scale = (self.scale + ZOOM_STEP).min(MAX_SCALE);
    }

    /// Step the zoom out by `ZOOM_STEP`.
    pub fn zoom_out(&mut self) {
        self.scale = (self.scale - ZOOM_STEP).max(MIN_SCALE);
    }

    /// Reset zoom to 100%. The pan offset is kept.
    pub fn reset_zoom(&mut self) {
        self.scale = 1.0;
    }

    /// Apply a wheel event.
    ///
    /// With ctrl/cmd held the vertical delta zooms; otherwise the raw pixel
    /// delta pans the canvas.
    pub fn apply_wheel(&mut self, delta: Vec2, zoom_modifier: bool, sensitivity: f64) {
        if zoom_modifier {
            self.set_scale(self.scale - delta.y * sensitivity);
        } else {
            self.offset -= delta;
        }
    }

    /// Zoom level as a rounded percentage for display.
    pub fn zoom_percent(&self) -> i64 {
        (self.scale * 100.0).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_viewport() {
        let viewport = Viewport::new();
        assert_eq!(viewport.offset, Vec2::ZERO);
        assert!((viewport.scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_offset_and_scale() {
        let world = to_world(Point::new(100.0, 200.0), Vec2::new(50.0, 100.0), 2.0);
        assert!((world.x - 25.0).abs() < f64::EPSILON);
        assert!((world.y - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let offsets = [Vec2::ZERO, Vec2::new(30.0, -20.0), Vec2::new(-812.5, 440.25)];
        let scales = [0.1, 0.37, 1.0, 1.5, 3.3, 5.0];
        let points = [
            Point::new(0.0, 0.0),
            Point::new(123.0, 456.0),
            Point::new(-999.5, 17.25),
        ];
        for &offset in &offsets {
            for &scale in &scales {
                for &p in &points {
                    let back = to_screen(to_world(p, offset, scale), offset, scale);
                    assert!((back.x - p.x).abs() < 1e-9);
                    assert!((back.y - p.y).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_affine_matches_functions() {
        let viewport = Viewport {
            offset: Vec2::new(40.0, -10.0),
            scale: 2.5,
        };
        let p = Point::new(12.0, 34.0);
        let a = viewport.transform() * p;
        let b = viewport.world_to_screen(p);
        assert!((a.x - b.x).abs() < 1e-9);
        assert!((a.y - b.y).abs() < 1e-9);

        let back = viewport.inverse_transform() * a;
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_in_converges_to_max() {
        let mut viewport = Viewport::new();
        for _ in 0..100 {
            viewport.zoom_in();
            assert!(viewport.scale <= MAX_SCALE);
        }
        assert_eq!(viewport.scale, MAX_SCALE);
    }

    #[test]
    fn test_zoom_out_converges_to_min() {
        let mut viewport = Viewport::new();
        for _ in 0..100 {
            viewport.zoom_out();
            assert!(viewport.scale >= MIN_SCALE);
        }
        assert_eq!(viewport.scale, MIN_SCALE);
    }

    #[test]
    fn test_reset_zoom_keeps_offset() {
        let mut viewport = Viewport::new();
        viewport.pan(Vec2::new(10.0, 20.0));
        viewport.set_scale(3.0);
        viewport.reset_zoom();
        assert!((viewport.scale - 1.0).abs() < f64::EPSILON);
        assert_eq!(viewport.offset, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_wheel_pans_without_modifier() {
        let mut viewport = Viewport::new();
        viewport.apply_wheel(Vec2::new(5.0, 30.0), false, WHEEL_ZOOM_SENSITIVITY);
        assert_eq!(viewport.offset, Vec2::new(-5.0, -30.0));
        assert!((viewport.scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wheel_zooms_with_modifier() {
        let mut viewport = Viewport::new();
        viewport.apply_wheel(Vec2::new(0.0, -500.0), true, WHEEL_ZOOM_SENSITIVITY);
        assert!((viewport.scale - 1.5).abs() < 1e-12);
        assert_eq!(viewport.offset, Vec2::ZERO);

        viewport.apply_wheel(Vec2::new(0.0, 1_000_000.0), true, WHEEL_ZOOM_SENSITIVITY);
        assert_eq!(viewport.scale, MIN_SCALE);
    }

    #[test]
    fn test_clamp_scale_rejects_non_finite() {
        assert_eq!(clamp_scale(f64::NAN), 1.0);
        assert_eq!(clamp_scale(0.0), MIN_SCALE);
        assert_eq!(clamp_scale(99.0), MAX_SCALE);
    }
}
