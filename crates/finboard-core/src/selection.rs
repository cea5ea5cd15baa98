//! Resize handles for the selected element.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::elements::MIN_ELEMENT_SIZE;

/// Handle size in screen pixels.
pub const HANDLE_SIZE: f64 = 10.0;
/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;

/// A resize handle, named by compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl ResizeHandle {
    pub const CORNERS: [ResizeHandle; 4] = [
        ResizeHandle::Nw,
        ResizeHandle::Ne,
        ResizeHandle::Sw,
        ResizeHandle::Se,
    ];

    pub const EDGES: [ResizeHandle; 4] = [
        ResizeHandle::N,
        ResizeHandle::E,
        ResizeHandle::S,
        ResizeHandle::W,
    ];

    pub fn controls_north(&self) -> bool {
        matches!(self, ResizeHandle::N | ResizeHandle::Ne | ResizeHandle::Nw)
    }

    pub fn controls_south(&self) -> bool {
        matches!(self, ResizeHandle::S | ResizeHandle::Se | ResizeHandle::Sw)
    }

    pub fn controls_east(&self) -> bool {
        matches!(self, ResizeHandle::E | ResizeHandle::Ne | ResizeHandle::Se)
    }

    pub fn controls_west(&self) -> bool {
        matches!(self, ResizeHandle::W | ResizeHandle::Nw | ResizeHandle::Sw)
    }

    /// Position of this handle on a bounding rectangle.
    pub fn position(&self, bounds: Rect) -> Point {
        let cx = (bounds.x0 + bounds.x1) / 2.0;
        let cy = (bounds.y0 + bounds.y1) / 2.0;
        let x = if self.controls_west() {
            bounds.x0
        } else if self.controls_east() {
            bounds.x1
        } else {
            cx
        };
        let y = if self.controls_north() {
            bounds.y0
        } else if self.controls_south() {
            bounds.y1
        } else {
            cy
        };
        Point::new(x, y)
    }

    /// CSS-style cursor name.
    pub fn cursor(&self) -> &'static str {
        match self {
            ResizeHandle::N | ResizeHandle::S => "ns-resize",
            ResizeHandle::E | ResizeHandle::W => "ew-resize",
            ResizeHandle::Ne | ResizeHandle::Sw => "nesw-resize",
            ResizeHandle::Nw | ResizeHandle::Se => "nwse-resize",
        }
    }
}

/// A handle and where it sits in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub position: Point,
    pub kind: ResizeHandle,
}

impl Handle {
    /// `tolerance` is in world units (screen tolerance divided by scale).
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point.x - self.position.x).abs() <= tolerance
            && (point.y - self.position.y).abs() <= tolerance
    }
}

/// Handles drawn around a selected element: corners first, then edges.
pub fn handles_for(bounds: Rect) -> Vec<Handle> {
    ResizeHandle::CORNERS
        .iter()
        .chain(ResizeHandle::EDGES.iter())
        .map(|&kind| Handle {
            position: kind.position(bounds),
            kind,
        })
        .collect()
}

/// Find which handle (if any) is hit at the given world point.
pub fn hit_test_handles(bounds: Rect, point: Point, tolerance: f64) -> Option<ResizeHandle> {
    handles_for(bounds)
        .into_iter()
        .find(|h| h.hit_test(point, tolerance))
        .map(|h| h.kind)
}

/// Resize `start` by a world-space `delta` measured from the gesture start.
///
/// West/north handles move the origin with the pointer so the opposite edge
/// stays put. Width and height never drop below [`MIN_ELEMENT_SIZE`]; when
/// clamped, the shifted origin is left as is.
pub fn apply_resize(start: Rect, handle: ResizeHandle, delta: Vec2) -> Rect {
    let mut x = start.x0;
    let mut y = start.y0;
    let mut width = start.width();
    let mut height = start.height();

    if handle.controls_east() {
        width = (start.width() + delta.x).max(MIN_ELEMENT_SIZE);
    }
    if handle.controls_west() {
        width = (start.width() - delta.x).max(MIN_ELEMENT_SIZE);
        x = start.x0 + delta.x;
    }
    if handle.controls_south() {
        height = (start.height() + delta.y).max(MIN_ELEMENT_SIZE);
    }
    if handle.controls_north() {
        height = (start.height() - delta.y).max(MIN_ELEMENT_SIZE);
        y = start.y0 + delta.y;
    }

    Rect::from_origin_size((x, y), (width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ResizeHandle; 8] = [
        ResizeHandle::N,
        ResizeHandle::S,
        ResizeHandle::E,
        ResizeHandle::W,
        ResizeHandle::Ne,
        ResizeHandle::Nw,
        ResizeHandle::Se,
        ResizeHandle::Sw,
    ];

    fn start() -> Rect {
        Rect::new(100.0, 100.0, 200.0, 160.0)
    }

    #[test]
    fn test_handle_positions() {
        let b = start();
        assert_eq!(ResizeHandle::Nw.position(b), Point::new(100.0, 100.0));
        assert_eq!(ResizeHandle::Se.position(b), Point::new(200.0, 160.0));
        assert_eq!(ResizeHandle::N.position(b), Point::new(150.0, 100.0));
        assert_eq!(ResizeHandle::W.position(b), Point::new(100.0, 130.0));
        assert_eq!(handles_for(b).len(), 8);
    }

    #[test]
    fn test_hit_test_handles() {
        let b = start();
        assert_eq!(
            hit_test_handles(b, Point::new(203.0, 158.0), 5.0),
            Some(ResizeHandle::Se)
        );
        assert_eq!(hit_test_handles(b, Point::new(150.0, 130.0), 5.0), None);
    }

    #[test]
    fn test_east_resize() {
        let r = apply_resize(start(), ResizeHandle::E, Vec2::new(30.0, 999.0));
        assert!((r.width() - 130.0).abs() < 1e-9);
        assert!((r.height() - 60.0).abs() < 1e-9);
        assert!((r.x0 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_west_resize_anchors_east_edge() {
        let r = apply_resize(start(), ResizeHandle::W, Vec2::new(-40.0, 0.0));
        assert!((r.x0 - 60.0).abs() < 1e-9);
        assert!((r.x1 - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_nw_resize() {
        let r = apply_resize(start(), ResizeHandle::Nw, Vec2::new(10.0, 20.0));
        assert!((r.x0 - 110.0).abs() < 1e-9);
        assert!((r.y0 - 120.0).abs() < 1e-9);
        assert!((r.width() - 90.0).abs() < 1e-9);
        assert!((r.height() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_resize_floor_all_handles() {
        for handle in ALL {
            for magnitude in [50.0, 1_000.0, 1e9] {
                for delta in [
                    Vec2::new(magnitude, magnitude),
                    Vec2::new(-magnitude, -magnitude),
                    Vec2::new(magnitude, -magnitude),
                    Vec2::new(-magnitude, magnitude),
                ] {
                    let r = apply_resize(start(), handle, delta);
                    assert!(r.width() >= MIN_ELEMENT_SIZE - 1e-6, "{handle:?} {delta:?}");
                    assert!(r.height() >= MIN_ELEMENT_SIZE - 1e-6, "{handle:?} {delta:?}");
                }
            }
        }
    }

    #[test]
    fn test_floor_keeps_shifted_origin() {
        let r = apply_resize(start(), ResizeHandle::W, Vec2::new(500.0, 0.0));
        assert!((r.width() - MIN_ELEMENT_SIZE).abs() < 1e-9);
        assert!((r.x0 - 600.0).abs() < 1e-9);
    }
}
