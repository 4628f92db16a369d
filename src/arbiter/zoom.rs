// SPDX-License-Identifier: GPL-3.0-only

//! Zoom bounds and gesture mapping
//!
//! Pinch and capture-button drag both map gesture coordinates onto the zoom
//! range with [`interpolate`], and every result goes through [`clamp_zoom`].

use crate::backends::camera::DeviceCapability;
use crate::constants::zoom::{
    DRAG_FULL_ZOOM_FRACTION, MAX_ZOOM_CAP, NEUTRAL_ZOOM, PINCH_SCALE_RANGE,
};
use crate::errors::ZoomError;
use serde::Serialize;

/// Clamp `requested` into `[min, max]`
///
/// Computes `max(min(requested, max), min)`. An inverted range or a NaN input is
/// an error rather than a silently swapped range.
pub fn clamp_zoom(requested: f64, min: f64, max: f64) -> Result<f64, ZoomError> {
    if requested.is_nan() || min.is_nan() || max.is_nan() {
        return Err(ZoomError::NotANumber);
    }
    if min > max {
        return Err(ZoomError::InvertedRange { min, max });
    }
    Ok(requested.min(max).max(min))
}

/// Piecewise-linear interpolation with clamped extrapolation
///
/// `input` must be non-decreasing and the same length as `output` (at least 2).
/// Values outside `input` map to the first/last output.
pub fn interpolate(x: f64, input: &[f64], output: &[f64]) -> f64 {
    debug_assert!(input.len() >= 2 && input.len() == output.len());

    let last = input.len() - 1;
    if x <= input[0] {
        return output[0];
    }
    if x >= input[last] {
        return output[last];
    }

    // Find the segment containing x
    let segment = input
        .windows(2)
        .position(|w| x >= w[0] && x <= w[1])
        .unwrap_or(last - 1);
    let (x0, x1) = (input[segment], input[segment + 1]);
    let (y0, y1) = (output[segment], output[segment + 1]);

    if x1 == x0 {
        return y0;
    }
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Zoom range usable on the current device
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
    /// Zoom the preview resets to when the device changes
    pub neutral: f64,
}

impl ZoomBounds {
    /// Bounds for a device: advertised minimum, maximum capped at 20x
    pub fn from_capability(capability: &DeviceCapability) -> Result<Self, ZoomError> {
        Self::with_cap(capability, MAX_ZOOM_CAP)
    }

    /// Same as [`ZoomBounds::from_capability`] with a custom upper cap
    pub fn with_cap(capability: &DeviceCapability, cap: f64) -> Result<Self, ZoomError> {
        let min = capability.min_zoom;
        let max = capability.max_zoom.min(cap);
        let neutral = clamp_zoom(NEUTRAL_ZOOM, min, max)?;
        Ok(Self { min, max, neutral })
    }

    pub fn clamp(&self, requested: f64) -> Result<f64, ZoomError> {
        clamp_zoom(requested, self.min, self.max)
    }
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self {
            min: NEUTRAL_ZOOM,
            max: NEUTRAL_ZOOM,
            neutral: NEUTRAL_ZOOM,
        }
    }
}

/// Two-finger pinch on the preview
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchZoom {
    start_zoom: f64,
}

impl PinchZoom {
    /// Remember the zoom at gesture start
    pub fn begin(current_zoom: f64) -> Self {
        Self {
            start_zoom: current_zoom,
        }
    }

    /// Zoom for the current pinch `scale` (1.0 = fingers at start distance)
    ///
    /// Pinching in to 2/3 reaches minimum zoom, spreading to 3x reaches maximum.
    pub fn update(&self, scale: f64, bounds: &ZoomBounds) -> Result<f64, ZoomError> {
        let normalized = interpolate(scale, &PINCH_SCALE_RANGE, &[-1.0, 0.0, 1.0]);
        let zoom = interpolate(
            normalized,
            &[-1.0, 0.0, 1.0],
            &[bounds.min, self.start_zoom, bounds.max],
        );
        bounds.clamp(zoom)
    }
}

/// Vertical drag that starts on the capture button
///
/// Dragging upward from the press point zooms in; reaching 70% of the start
/// height gives maximum zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragZoom {
    start_y: f64,
    offset_y: f64,
}

impl DragZoom {
    /// Remember where the drag started, offset so the current zoom is kept
    pub fn begin(start_y: f64, current_zoom: f64, bounds: &ZoomBounds) -> Self {
        let span = start_y - start_y * DRAG_FULL_ZOOM_FRACTION;
        let offset_y = interpolate(current_zoom, &[bounds.min, bounds.max], &[0.0, span]);
        Self { start_y, offset_y }
    }

    /// Zoom for the current absolute finger position
    pub fn update(&self, absolute_y: f64, bounds: &ZoomBounds) -> Result<f64, ZoomError> {
        let zoom = interpolate(
            absolute_y - self.offset_y,
            &[self.start_y * DRAG_FULL_ZOOM_FRACTION, self.start_y],
            &[bounds.max, bounds.min],
        );
        bounds.clamp(zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> ZoomBounds {
        ZoomBounds {
            min: 1.0,
            max: 10.0,
            neutral: 1.0,
        }
    }

    #[test]
    fn test_clamp_zoom_within_range() {
        for x in [-100.0, 0.0, 0.5, 1.0, 3.3, 10.0, 11.0, f64::INFINITY, f64::NEG_INFINITY] {
            let z = clamp_zoom(x, 1.0, 10.0).unwrap();
            assert!((1.0..=10.0).contains(&z), "{} clamped to {}", x, z);
        }
        assert_eq!(clamp_zoom(3.3, 1.0, 10.0), Ok(3.3));
        assert_eq!(clamp_zoom(2.0, 2.0, 2.0), Ok(2.0));
    }

    #[test]
    fn test_clamp_zoom_rejects_inverted_range() {
        assert_eq!(
            clamp_zoom(5.0, 10.0, 1.0),
            Err(ZoomError::InvertedRange { min: 10.0, max: 1.0 })
        );
        assert_eq!(clamp_zoom(f64::NAN, 1.0, 2.0), Err(ZoomError::NotANumber));
    }

    #[test]
    fn test_interpolate_clamps_extrapolation() {
        assert_eq!(interpolate(-1.0, &[0.0, 10.0], &[0.0, 100.0]), 0.0);
        assert_eq!(interpolate(5.0, &[0.0, 10.0], &[0.0, 100.0]), 50.0);
        assert_eq!(interpolate(20.0, &[0.0, 10.0], &[0.0, 100.0]), 100.0);
        // Decreasing output
        assert_eq!(interpolate(2.5, &[0.0, 10.0], &[8.0, 4.0]), 7.0);
    }

    #[test]
    fn test_bounds_cap_max_zoom() {
        let capability = DeviceCapability {
            min_zoom: 1.0,
            max_zoom: 64.0,
            ..Default::default()
        };
        let bounds = ZoomBounds::from_capability(&capability).unwrap();
        assert_eq!(bounds.max, 20.0);
        assert_eq!(bounds.neutral, 1.0);

        let inverted = DeviceCapability {
            min_zoom: 30.0,
            max_zoom: 64.0,
            ..Default::default()
        };
        assert!(ZoomBounds::from_capability(&inverted).is_err());
    }

    #[test]
    fn test_pinch_maps_scale_onto_range() {
        let pinch = PinchZoom::begin(4.0);
        let b = bounds();
        assert_eq!(pinch.update(1.0, &b), Ok(4.0));
        assert_eq!(pinch.update(3.0, &b), Ok(10.0));
        assert_eq!(pinch.update(0.1, &b), Ok(1.0));
        assert_eq!(pinch.update(2.0, &b), Ok(7.0));
    }

    #[test]
    fn test_drag_keeps_current_zoom_at_start() {
        let b = bounds();
        let drag = DragZoom::begin(1000.0, 5.5, &b);
        let zoom = drag.update(1000.0, &b).unwrap();
        assert!((zoom - 5.5).abs() < 1e-9);

        // Dragging far up saturates at max, far down at min
        assert_eq!(drag.update(0.0, &b), Ok(10.0));
        assert_eq!(drag.update(5000.0, &b), Ok(1.0));
    }
}
