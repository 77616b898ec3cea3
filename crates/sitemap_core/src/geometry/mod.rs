//! Geometry engine for pointer, pan and zoom math.
//!
//! # Responsibility
//! - Map screen-space pointer samples into canvas space under pan/zoom.
//! - Keep zoom within a fixed range no matter what input arrives.
//!
//! # Invariants
//! - `canvas = (screen - pan) / scale` for every conversion.
//! - A `Viewport` scale never leaves its `ZoomLimits`.

pub mod gesture;

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Lowest zoom scale a viewport accepts.
pub const MIN_SCALE: f64 = 0.5;
/// Highest zoom scale a viewport accepts.
pub const MAX_SCALE: f64 = 2.0;
/// Scale change applied by one zoom button press or wheel notch.
pub const ZOOM_STEP: f64 = 0.1;

/// 2D point or vector in either screen or canvas space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

/// Zoom range and step used by a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: MIN_SCALE,
            max: MAX_SCALE,
            step: ZOOM_STEP,
        }
    }
}

/// Converts a screen-space point into canvas space.
pub fn screen_to_canvas(screen: Point, pan: Point, scale: f64) -> Point {
    (screen - pan) / scale
}

/// Converts a canvas-space point back into screen space.
pub fn canvas_to_screen(canvas: Point, pan: Point, scale: f64) -> Point {
    canvas * scale + pan
}

/// Clamps a proposed zoom scale into `[MIN_SCALE, MAX_SCALE]`.
pub fn clamp_scale(proposed: f64) -> f64 {
    clamp_scale_within(proposed, MIN_SCALE, MAX_SCALE)
}

/// Clamps a proposed zoom scale into `[min, max]`.
///
/// NaN collapses to `min`; infinities saturate to the nearest bound.
pub fn clamp_scale_within(proposed: f64, min: f64, max: f64) -> f64 {
    if proposed.is_nan() {
        return min;
    }
    proposed.max(min).min(max)
}

/// Adds the pointer delta since the last sample to the pan offset.
pub fn accumulate_pan(pan: Point, current: Point, last: Point) -> Point {
    pan + (current - last)
}

/// Pan offset and zoom scale of one canvas view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pan: Point,
    scale: f64,
    limits: ZoomLimits,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}

impl Viewport {
    /// Creates an unpanned viewport at scale 1 (clamped into `limits`).
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            pan: Point::ORIGIN,
            scale: clamp_scale_within(1.0, limits.min, limits.max),
            limits,
        }
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        screen_to_canvas(screen, self.pan, self.scale)
    }

    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        canvas_to_screen(canvas, self.pan, self.scale)
    }

    pub fn set_pan(&mut self, pan: Point) {
        self.pan = pan;
    }

    /// Sets the scale, clamped into the viewport limits. Returns the applied scale.
    pub fn set_scale(&mut self, proposed: f64) -> f64 {
        self.scale = clamp_scale_within(proposed, self.limits.min, self.limits.max);
        self.scale
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.set_scale(self.scale + self.limits.step)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.set_scale(self.scale - self.limits.step)
    }

    /// Applies one wheel notch: scrolling down zooms out, up zooms in.
    pub fn zoom_by_wheel(&mut self, delta_y: f64) -> f64 {
        if delta_y > 0.0 {
            self.zoom_out()
        } else if delta_y < 0.0 {
            self.zoom_in()
        } else {
            self.scale
        }
    }

    /// Restores scale 1 and zero pan.
    pub fn reset(&mut self) {
        *self = Self::new(self.limits);
    }
}
