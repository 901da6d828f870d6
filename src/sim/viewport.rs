//! Viewport framing: which part of simulation space is on screen
//!
//! The viewport rectangle doubles as the simulation boundary. At 1:1 it is
//! exactly the render surface; zooming resizes it around the discs.

use glam::Vec2;

use super::disc::{Disc, DiscColor};
use crate::bounding_box;
use crate::consts::*;

/// A disc mapped into render-surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenDisc {
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub color: DiscColor,
}

/// Simulation-space rectangle mapped onto the render surface
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub min: Vec2,
    pub max: Vec2,
    /// Render surface size in pixels (the 1:1 rectangle)
    surface: Vec2,
    /// Simulation frames per render, minus one
    render_skip: u8,
    render_count: u8,
}

impl Viewport {
    /// 1:1 viewport over a surface of the given size
    pub fn new(surface: Vec2) -> Self {
        Self {
            min: Vec2::ZERO,
            max: surface,
            surface,
            render_skip: 0,
            render_count: 0,
        }
    }

    pub fn with_bounds(surface: Vec2, min: Vec2, max: Vec2) -> Self {
        Self {
            min,
            max,
            ..Self::new(surface)
        }
    }

    pub fn surface(&self) -> Vec2 {
        self.surface
    }

    pub fn extent(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn render_skip(&self) -> u8 {
        self.render_skip
    }

    /// True when simulation space maps 1:1 onto the surface
    pub fn is_default(&self) -> bool {
        self.min == Vec2::ZERO && self.max == self.surface
    }

    /// Back to 1:1 with an unthrottled render rate
    pub fn reset(&mut self) {
        *self = Self::new(self.surface);
    }

    /// Shrink to just enclose the disc centres, matching the surface aspect
    /// ratio. Once that would be narrower than the surface itself, snap back
    /// to 1:1 instead so repeated zooming settles rather than oscillating.
    ///
    /// Returns false (and changes nothing) when there are no discs.
    pub fn zoom_in(&mut self, centres: impl IntoIterator<Item = Vec2>) -> bool {
        let Some((lo, hi)) = bounding_box(centres) else {
            return false;
        };
        let mid = (lo + hi) / 2.0;
        let mut total = hi - lo;
        let aspect = self.surface.x / self.surface.y;
        if total.x > total.y * aspect {
            total.y = total.x / aspect;
        } else {
            total.x = total.y * aspect;
        }
        self.min = mid - total / ZOOM_IN_DIVISOR;
        self.max = mid + total / ZOOM_IN_DIVISOR;
        self.render_skip = self.render_skip.saturating_sub(1);

        if self.extent().x < self.surface.x {
            self.reset();
            self.render_skip = 1;
        }
        log::info!("Zoom in: {:?} .. {:?}", self.min, self.max);
        true
    }

    /// Grow to 1.5x the larger of the current rectangle and the disc
    /// bounding box, centred on the discs. Rendering is throttled one step
    /// further since more discs tend to be on screen.
    ///
    /// Returns false (and changes nothing) when there are no discs or the
    /// result would exceed `MAX_VIEW_EXTENT`.
    pub fn zoom_out(&mut self, centres: impl IntoIterator<Item = Vec2>) -> bool {
        let Some((lo, hi)) = bounding_box(centres) else {
            return false;
        };
        let mid = (lo + hi) / 2.0;
        let half = self.extent().max(hi - lo) * ZOOM_OUT_FACTOR / 2.0;
        let (min, max) = (mid - half, mid + half);
        let extent = max - min;
        if !(min.is_finite() && max.is_finite()) || extent.max_element() > MAX_VIEW_EXTENT {
            log::debug!("Zoom out limit reached at {:?} .. {:?}", self.min, self.max);
            return false;
        }
        self.min = min;
        self.max = max;
        self.render_skip = self.render_skip.saturating_add(1);
        log::info!("Zoom out: {:?} .. {:?}", self.min, self.max);
        true
    }

    /// Map a disc onto the render surface
    pub fn to_screen(&self, disc: &Disc) -> ScreenDisc {
        let (pos, radius) = if self.is_default() {
            (disc.pos, disc.radius)
        } else {
            let scale = self.surface / self.extent();
            ((disc.pos - self.min) * scale, disc.radius * scale.y)
        };
        ScreenDisc {
            x: pos.x as i32,
            y: pos.y as i32,
            radius: (radius as i32).max(MIN_RENDER_RADIUS),
            color: disc.color,
        }
    }

    /// Map a render-surface point (e.g. a touch) into simulation space
    pub fn to_sim(&self, screen: Vec2) -> Vec2 {
        self.min + screen * self.extent() / self.surface
    }

    /// Advance the render throttle; true on frames that should be drawn
    pub fn should_render(&mut self) -> bool {
        let render = self.render_count == 0;
        if self.render_count >= self.render_skip {
            self.render_count = 0;
        } else {
            self.render_count += 1;
        }
        render
    }
}
