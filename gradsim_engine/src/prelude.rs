/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

// Errors
pub use crate::errors::PhysicsError;
// Geometry
pub use crate::types::aabb::Aabb;
pub use crate::types::shape::BodyShape;
pub use crate::types::vec2::Vec2;
// Dynamics
pub use crate::types::motor::Motor;
pub use crate::types::rigid_body::RigidBody;
// Contacts
pub use crate::types::contact::apply_segment_contacts;
pub use crate::types::ground_segment::GroundSegment;
pub use crate::types::manifold::{ContactManifold, ContactPoint};
pub use crate::types::manifold_cache::{manifold_key, ManifoldCache, ManifoldKey};
// Engine
pub use crate::types::engine::PhysicsEngine;
