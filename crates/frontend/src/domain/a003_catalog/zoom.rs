//! Zoom and pan of the model guide image
//!
//! Offsets are in CSS pixels relative to the image center, as used by
//! `translate(x, y) scale(s)`.

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 5.0;
pub const WHEEL_ZOOM_IN: f64 = 1.1;
pub const WHEEL_ZOOM_OUT: f64 = 0.9;
pub const MAX_OFFSET: f64 = 500.0;
pub const DOUBLE_TAP_MS: f64 = 300.0;
/// Pinch start distances below this are unreliable
pub const MIN_PINCH_DISTANCE: f64 = 10.0;
pub const FALLBACK_PINCH_DISTANCE: f64 = 50.0;
pub const DOUBLE_CLICK_SCALE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pinch {
    initial_distance: f64,
    initial_scale: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    start_x: f64,
    start_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomPan {
    pub scale: f64,
    pub x: f64,
    pub y: f64,
    pinch: Option<Pinch>,
    drag: Option<Drag>,
    last_tap: Option<f64>,
}

impl Default for ZoomPan {
    fn default() -> Self {
        Self {
            scale: 1.0,
            x: 0.0,
            y: 0.0,
            pinch: None,
            drag: None,
            last_tap: None,
        }
    }
}

impl ZoomPan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self {
            last_tap: self.last_tap,
            ..Self::default()
        };
    }

    /// Wheel step toward the cursor (`cursor_*` relative to the image center)
    pub fn wheel(&mut self, delta_y: f64, cursor_x: f64, cursor_y: f64) {
        let factor = if delta_y > 0.0 { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN };
        let old = self.scale;
        self.scale = (old * factor).clamp(MIN_SCALE, MAX_SCALE);
        let change = self.scale / old;
        self.x = cursor_x - (cursor_x - self.x) * change;
        self.y = cursor_y - (cursor_y - self.y) * change;
        self.normalize();
    }

    pub fn pinch_start(&mut self, distance: f64) {
        let initial_distance = if distance < MIN_PINCH_DISTANCE {
            FALLBACK_PINCH_DISTANCE
        } else {
            distance
        };
        self.drag = None;
        self.pinch = Some(Pinch {
            initial_distance,
            initial_scale: self.scale,
        });
    }

    pub fn pinch_move(&mut self, distance: f64) {
        if let Some(pinch) = self.pinch {
            if distance > 0.0 {
                self.scale =
                    (pinch.initial_scale * distance / pinch.initial_distance).clamp(MIN_SCALE, MAX_SCALE);
                self.normalize();
            }
        }
    }

    pub fn pinch_end(&mut self) {
        self.pinch = None;
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    /// Mouse pan only starts while zoomed in; one-finger touch pan always does
    pub fn drag_start(&mut self, pointer_x: f64, pointer_y: f64, require_zoom: bool) -> bool {
        if self.pinch.is_some() || (require_zoom && self.scale <= 1.0) {
            return false;
        }
        self.drag = Some(Drag {
            start_x: pointer_x - self.x,
            start_y: pointer_y - self.y,
        });
        true
    }

    pub fn drag_move(&mut self, pointer_x: f64, pointer_y: f64) {
        if let (Some(drag), None) = (self.drag, self.pinch) {
            self.x = pointer_x - drag.start_x;
            self.y = pointer_y - drag.start_y;
            self.normalize();
        }
    }

    pub fn drag_end(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Reset when zoomed in, otherwise zoom to 2x
    pub fn toggle(&mut self) {
        if self.scale > 1.0 {
            self.reset();
        } else {
            self.scale = DOUBLE_CLICK_SCALE;
            self.normalize();
        }
    }

    /// A finished touch; two within the double-tap window toggle the zoom
    pub fn tap(&mut self, now: f64) -> bool {
        match self.last_tap {
            Some(prev) if now - prev > 0.0 && now - prev < DOUBLE_TAP_MS => {
                self.last_tap = None;
                self.toggle();
                true
            }
            _ => {
                self.last_tap = Some(now);
                false
            }
        }
    }

    pub fn transform(&self) -> String {
        format!("translate({}px, {}px) scale({})", self.x, self.y, self.scale)
    }

    fn normalize(&mut self) {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            self.scale = 1.0;
        }
        if !self.x.is_finite() {
            self.x = 0.0;
        }
        if !self.y.is_finite() {
            self.y = 0.0;
        }
        self.x = self.x.clamp(-MAX_OFFSET, MAX_OFFSET);
        self.y = self.y.clamp(-MAX_OFFSET, MAX_OFFSET);
    }
}

/// Distance between two touch points
pub fn distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_wheel_clamps_scale() {
        let mut zp = ZoomPan::new();
        for _ in 0..40 {
            zp.wheel(-1.0, 0.0, 0.0);
        }
        assert_eq!(zp.scale, MAX_SCALE);
        for _ in 0..40 {
            zp.wheel(1.0, 0.0, 0.0);
        }
        assert_eq!(zp.scale, MIN_SCALE);
    }

    #[test]
    fn test_wheel_zooms_toward_cursor() {
        let mut zp = ZoomPan::new();
        zp.wheel(-1.0, 100.0, 0.0);
        assert!(approx(zp.scale, 1.1));
        assert!(approx(zp.x, 100.0 - 100.0 * 1.1));
        assert_eq!(zp.y, 0.0);
    }

    #[test]
    fn test_pan_is_clamped() {
        let mut zp = ZoomPan::new();
        zp.toggle();
        assert!(zp.drag_start(0.0, 0.0, true));
        zp.drag_move(2000.0, -2000.0);
        assert_eq!((zp.x, zp.y), (MAX_OFFSET, -MAX_OFFSET));
    }

    #[test]
    fn test_mouse_pan_needs_zoom() {
        let mut zp = ZoomPan::new();
        assert!(!zp.drag_start(0.0, 0.0, true));
        assert!(zp.drag_start(0.0, 0.0, false));
    }

    #[test]
    fn test_pinch_scales_from_initial_distance() {
        let mut zp = ZoomPan::new();
        zp.pinch_start(100.0);
        zp.pinch_move(250.0);
        assert!(approx(zp.scale, 2.5));
        zp.pinch_move(10_000.0);
        assert_eq!(zp.scale, MAX_SCALE);
        zp.pinch_end();

        let mut zp = ZoomPan::new();
        zp.pinch_start(4.0);
        zp.pinch_move(100.0);
        assert!(approx(zp.scale, 2.0));
    }

    #[test]
    fn test_double_tap_toggles() {
        let mut zp = ZoomPan::new();
        assert!(!zp.tap(1000.0));
        assert!(zp.tap(1200.0));
        assert_eq!(zp.scale, 2.0);
        assert!(!zp.tap(2000.0));
        assert!(!zp.tap(2400.0));
        assert!(zp.tap(2500.0));
        assert_eq!(zp.scale, 1.0);
        assert_eq!((zp.x, zp.y), (0.0, 0.0));
    }

    #[test]
    fn test_non_finite_values_reset() {
        let mut zp = ZoomPan::new();
        zp.drag_start(0.0, 0.0, false);
        zp.drag_move(f64::NAN, f64::INFINITY);
        assert_eq!((zp.x, zp.y), (0.0, 0.0));
        assert_eq!(zp.scale, 1.0);
    }

    #[test]
    fn test_distance() {
        assert!(approx(distance(0.0, 0.0, 3.0, 4.0), 5.0));
    }
}
