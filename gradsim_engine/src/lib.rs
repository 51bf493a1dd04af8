/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

#![forbid(unsafe_code)]

pub mod errors;
pub mod prelude;
pub mod types;

pub use crate::errors::PhysicsError;
pub use crate::types::aabb::Aabb;
pub use crate::types::contact::apply_segment_contacts;
pub use crate::types::engine::PhysicsEngine;
pub use crate::types::ground_segment::GroundSegment;
pub use crate::types::manifold::{ContactManifold, ContactPoint};
pub use crate::types::manifold_cache::{manifold_key, ManifoldCache, ManifoldKey};
pub use crate::types::motor::Motor;
pub use crate::types::rigid_body::RigidBody;
pub use crate::types::shape::BodyShape;
pub use crate::types::vec2::Vec2;
