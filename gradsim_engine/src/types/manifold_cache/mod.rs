/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::types::manifold::ContactManifold;
use crate::types::rigid_body::RigidBody;

/// Symmetric body-pair key: the two node addresses in ascending order, so
/// lookups are independent of argument order.
pub type ManifoldKey = (usize, usize);

/// Normalizes a body pair into its cache key.
pub fn manifold_key(a: &Rc<RefCell<RigidBody>>, b: &Rc<RefCell<RigidBody>>) -> ManifoldKey {
    let pa = Rc::as_ptr(a) as usize;
    let pb = Rc::as_ptr(b) as usize;
    if pa <= pb {
        (pa, pb)
    } else {
        (pb, pa)
    }
}

/// Pairwise manifold index for body-body contact.
///
/// Manifolds are created on first detected overlap, persist across frames
/// while touching and are removed at end-of-frame otherwise. The per-frame
/// protocol is: [`ManifoldCache::begin_frame`], then narrowphase calls to
/// [`ManifoldCache::get_or_create`] followed by
/// [`ContactManifold::set_geometry`] and
/// [`ContactManifold::compute_mass`], then [`ManifoldCache::end_frame`],
/// after which [`ManifoldCache::active`] lists the surviving contacts for
/// an impulse solver.
#[derive(Default)]
pub struct ManifoldCache {
    manifolds: BTreeMap<ManifoldKey, ContactManifold>,
    active: Vec<ManifoldKey>,
}

impl ManifoldCache {
    pub fn new() -> Self {
        Self {
            manifolds: BTreeMap::new(),
            active: Vec::new(),
        }
    }

    /// Rolls every cached manifold over to a new frame and clears the
    /// active list.
    pub fn begin_frame(&mut self) {
        for manifold in self.manifolds.values_mut() {
            manifold.begin_frame();
        }
        self.active.clear();
    }

    /// Fetches the manifold of a body pair, creating it (with combined
    /// material parameters) on first contact.
    pub fn get_or_create(
        &mut self,
        a: &Rc<RefCell<RigidBody>>,
        b: &Rc<RefCell<RigidBody>>,
    ) -> &mut ContactManifold {
        let key = manifold_key(a, b);
        self.manifolds
            .entry(key)
            .or_insert_with(|| ContactManifold::new(&a.borrow(), &b.borrow()))
    }

    pub fn get(&self, key: &ManifoldKey) -> Option<&ContactManifold> {
        self.manifolds.get(key)
    }

    pub fn get_mut(&mut self, key: &ManifoldKey) -> Option<&mut ContactManifold> {
        self.manifolds.get_mut(key)
    }

    /// Drops every manifold whose contact ended this frame and records
    /// the survivors in the active list.
    pub fn end_frame(&mut self) {
        self.manifolds.retain(|_, m| m.is_touching());
        self.active.extend(self.manifolds.keys().copied());
    }

    /// Keys of the manifolds that survived the last frame, in key order.
    #[inline(always)]
    pub fn active(&self) -> &[ManifoldKey] {
        &self.active
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.manifolds.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.manifolds.is_empty()
    }
}
