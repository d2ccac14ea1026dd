//! Bucket and boundary collision tests
//!
//! Everything here is axis-aligned: the bucket is a box, the fruit is a
//! square, and the tests are boundary-inclusive so a fruit exactly on an
//! edge counts as in.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FRUIT_SIZE, OFFSCREEN_MARGIN};

/// An axis-aligned box in viewport coordinates (+y down)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Check whether a fruit at `pos` (top-left corner) has landed in the bucket
///
/// Hit when the fruit's horizontal center is within the bucket's span, its
/// lower edge has reached the bucket's rim, and it has not yet passed the
/// bucket's bottom.
pub fn lands_in_bucket(pos: Vec2, bucket: &Rect) -> bool {
    let center_x = pos.x + FRUIT_SIZE / 2.0;
    let lower_edge = pos.y + FRUIT_SIZE;

    center_x >= bucket.left
        && center_x <= bucket.right()
        && lower_edge >= bucket.top
        && pos.y <= bucket.bottom()
}

/// Check whether a fruit at `pos` has left the playfield for good
///
/// A margin past every edge keeps arcs that clip the viewport border alive.
pub fn out_of_bounds(pos: Vec2, viewport: Vec2) -> bool {
    pos.y > viewport.y + OFFSCREEN_MARGIN
        || pos.x < -OFFSCREEN_MARGIN
        || pos.x > viewport.x + OFFSCREEN_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket() -> Rect {
        Rect::new(200.0, 300.0, 100.0, 80.0)
    }

    #[test]
    fn test_bucket_hit_at_top_left_corner() {
        let bucket = bucket();
        // Fruit center exactly on the left rim, lower edge exactly at the top
        let pos = Vec2::new(
            bucket.left - FRUIT_SIZE / 2.0,
            bucket.top - FRUIT_SIZE,
        );
        assert!(lands_in_bucket(pos, &bucket));
    }

    #[test]
    fn test_bucket_miss_one_unit_outside() {
        let bucket = bucket();
        let corner = Vec2::new(bucket.left - FRUIT_SIZE / 2.0, bucket.top - FRUIT_SIZE);

        // One px left of the span
        assert!(!lands_in_bucket(corner - Vec2::new(1.0, 0.0), &bucket));
        // One px above the rim
        assert!(!lands_in_bucket(corner - Vec2::new(0.0, 1.0), &bucket));
        // One px right of the span
        let right = Vec2::new(bucket.right() - FRUIT_SIZE / 2.0 + 1.0, bucket.top);
        assert!(!lands_in_bucket(right, &bucket));
        // One px past the bucket bottom
        let below = Vec2::new(corner.x, bucket.bottom() + 1.0);
        assert!(!lands_in_bucket(below, &bucket));
    }

    #[test]
    fn test_bucket_hit_inside_span() {
        let bucket = bucket();
        // Dead center over the bucket, lower edge just past the rim
        let pos = Vec2::new(
            bucket.left + bucket.width / 2.0 - FRUIT_SIZE / 2.0,
            bucket.top - FRUIT_SIZE + 5.0,
        );
        assert!(lands_in_bucket(pos, &bucket));
    }

    #[test]
    fn test_out_of_bounds_margins() {
        let viewport = Vec2::new(800.0, 600.0);

        // Inside, and just off-screen but within the margin: still in play
        assert!(!out_of_bounds(Vec2::new(400.0, 300.0), viewport));
        assert!(!out_of_bounds(Vec2::new(-50.0, 300.0), viewport));
        assert!(!out_of_bounds(Vec2::new(400.0, 650.0), viewport));

        // Past the margin on each edge
        assert!(out_of_bounds(Vec2::new(400.0, 701.0), viewport));
        assert!(out_of_bounds(Vec2::new(-101.0, 300.0), viewport));
        assert!(out_of_bounds(Vec2::new(901.0, 300.0), viewport));
    }

    #[test]
    fn test_no_upper_bound_check() {
        // Fruit arcing high above the viewport stays in play
        let viewport = Vec2::new(800.0, 600.0);
        assert!(!out_of_bounds(Vec2::new(400.0, -500.0), viewport));
    }
}
