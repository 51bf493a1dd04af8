/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use gradsim_tensor::prelude::*;

use crate::errors::PhysicsError;
use crate::types::ground_segment::GroundSegment;
use crate::types::rigid_body::RigidBody;
use crate::types::vec2::Vec2;

/// Relaxed projection bounds: corners slightly past a segment's endpoints
/// still contact it, which prevents tunneling through the seam between
/// adjacent segments.
const PARAM_SLACK: f64 = 0.05;

/// Soft penalty contact of one body's corners against the ground segments.
///
/// Per corner, every overlapping segment contributes a spring-damper
/// normal force plus a tanh-smoothed friction force; the contributions are
/// blended by penetration-weighted averaging before being applied at the
/// corner. A corner straddling two segments would otherwise receive a
/// summed force and over-brake.
///
/// The contact predicate (penetration and projection bounds) is evaluated
/// on forward values; the force math itself is graph operations pinned in
/// the body's arena, so the whole kernel differentiates.
pub fn apply_segment_contacts(
    body: &mut RigidBody,
    segments: &[GroundSegment],
) -> Result<(), PhysicsError> {
    if body.is_static() || segments.is_empty() {
        return Ok(());
    }
    let body_aabb = body.aabb();
    let candidates: Vec<&GroundSegment> = segments
        .iter()
        .filter(|s| s.aabb().overlaps(&body_aabb))
        .collect();
    if candidates.is_empty() {
        return Ok(());
    }

    let corners = body.corners()?;
    let vx = body.velocity().select(0)?;
    let vy = body.velocity().select(1)?;
    let pos_x = body.position().select(0)?;
    let pos_y = body.position().select(1)?;
    let omega = body.angular_velocity().clone();
    body.arena_extend(&[&vx, &vy, &pos_x, &pos_y]);

    for corner in corners.chunks_exact(2) {
        let cx = &corner[0];
        let cy = &corner[1];
        let point = Vec2::new(cx.value()?, cy.value()?);

        let mut sum_fx = GradTensor::zeros(1, 1);
        let mut sum_fy = GradTensor::zeros(1, 1);
        let mut sum_weight = GradTensor::zeros(1, 1);
        let mut touched = false;

        for segment in &candidates {
            let depth = segment.signed_distance(point);
            let param = segment.projected_parameter(point);
            if depth >= 0.0 || param < -PARAM_SLACK || param > 1.0 + PARAM_SLACK {
                continue;
            }
            touched = true;
            let n = segment.normal();

            // signed distance d = (c - p1) . n, as a graph op
            let x1 = GradTensor::scalar(segment.p1().x);
            let y1 = GradTensor::scalar(segment.p1().y);
            let d = cx
                .sub(&x1)?
                .mul_scalar(n.x)
                .add(&cy.sub(&y1)?.mul_scalar(n.y))?;

            // spring: -k d (> 0 while penetrating)
            let spring = d.mul_scalar(-segment.stiffness());

            // corner velocity v + omega x r, r = corner - pos
            let rx = cx.sub(&pos_x)?;
            let ry = cy.sub(&pos_y)?;
            let vpx = vx.sub(&omega.mul(&ry)?)?;
            let vpy = vy.add(&omega.mul(&rx)?)?;

            // normal damping: -c (v_p . n)
            let vn = vpx.mul_scalar(n.x).add(&vpy.mul_scalar(n.y))?;
            let normal_mag = spring.add(&vn.mul_scalar(-segment.damping()))?;

            // tanh-smoothed friction along t = (-ny, nx)
            let vt = vpx.mul_scalar(-n.y).add(&vpy.mul_scalar(n.x))?;
            let direction = vt.mul_scalar(2.0).tanh();
            let friction_mag = normal_mag
                .mul(&direction)?
                .mul_scalar(-segment.friction());

            let fx = normal_mag
                .mul_scalar(n.x)
                .add(&friction_mag.mul_scalar(-n.y))?;
            let fy = normal_mag
                .mul_scalar(n.y)
                .add(&friction_mag.mul_scalar(n.x))?;

            // penetration weight w = -d > 0
            let weight = d.mul_scalar(-1.0);
            sum_fx = sum_fx.add(&weight.mul(&fx)?)?;
            sum_fy = sum_fy.add(&weight.mul(&fy)?)?;
            sum_weight = sum_weight.add(&weight)?;

            body.arena_extend(&[
                &d, &spring, &rx, &ry, &vpx, &vpy, &vn, &normal_mag, &vt, &direction,
                &friction_mag, &fx, &fy, &weight, &sum_fx, &sum_fy, &sum_weight,
            ]);
        }

        if touched {
            let avg_fx = sum_fx.div(&sum_weight)?;
            let avg_fy = sum_fy.div(&sum_weight)?;
            let force = GradTensor::stack(&[avg_fx.clone(), avg_fy.clone()])?;
            body.arena_extend(&[&avg_fx, &avg_fy, &force]);
            body.apply_force_at_point(&force, cx, cy)?;
        }
    }
    Ok(())
}
