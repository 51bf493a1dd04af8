/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use crate::types::aabb::Aabb;
use crate::types::vec2::Vec2;

/// Penalty spring stiffness of every ground segment. Fixed for stability.
pub const SEGMENT_STIFFNESS: f64 = 20_000.0;
/// Normal damping coefficient of every ground segment.
pub const SEGMENT_DAMPING: f64 = 100.0;
/// Broadphase margin added around a segment's bounding box.
pub const SEGMENT_AABB_MARGIN: f64 = 1.0;

/// Oriented static ground segment for the soft contact kernel.
///
/// The outward normal is the left-hand normal of the direction p1 -> p2;
/// a degenerate zero-length segment takes (0, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundSegment {
    p1: Vec2,
    p2: Vec2,
    normal: Vec2,
    friction: f64,
    aabb: Aabb,
}

impl GroundSegment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, friction: f64) -> Self {
        let p1 = Vec2::new(x1, y1);
        let p2 = Vec2::new(x2, y2);
        let normal = (p2 - p1).perp().normalize_or(Vec2::new(0.0, 1.0));
        let aabb = Aabb::from_points(p1, p2).expanded(SEGMENT_AABB_MARGIN);
        Self {
            p1,
            p2,
            normal,
            friction,
            aabb,
        }
    }

    #[inline(always)]
    pub fn p1(&self) -> Vec2 {
        self.p1
    }

    #[inline(always)]
    pub fn p2(&self) -> Vec2 {
        self.p2
    }

    #[inline(always)]
    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    #[inline(always)]
    pub fn friction(&self) -> f64 {
        self.friction
    }

    #[inline(always)]
    pub fn stiffness(&self) -> f64 {
        SEGMENT_STIFFNESS
    }

    #[inline(always)]
    pub fn damping(&self) -> f64 {
        SEGMENT_DAMPING
    }

    #[inline(always)]
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// Signed distance of a point along the outward normal.
    pub fn signed_distance(&self, point: Vec2) -> f64 {
        (point - self.p1).dot(self.normal)
    }

    /// Normalized parameter of the point's projection onto the segment;
    /// 0 at p1, 1 at p2. A degenerate segment reports 0.
    pub fn projected_parameter(&self, point: Vec2) -> f64 {
        let s = self.p2 - self.p1;
        let len2 = s.length_squared();
        if len2 > 0.0 {
            (point - self.p1).dot(s) / len2
        } else {
            0.0
        }
    }
}
