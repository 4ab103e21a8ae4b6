//! Metaballs whose bounding sphere contains the current marching position.

use glam::DVec3;

use crate::metaball::{BoundingEvent, Metaball};

/// The working set of metaballs during a sweep.
///
/// Holds indices into the owning set's metaball list. Ray queries rarely touch more
/// than a handful of blobs at once, so a plain vector beats hashing here.
#[derive(Debug, Default, Clone)]
pub(crate) struct ActiveSet {
    members: Vec<usize>,
}

impl ActiveSet {
    /// Creates an empty active set.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds the event's metaball on entry, removes it on exit.
    pub(crate) fn apply(&mut self, event: &BoundingEvent) {
        if event.is_entering {
            self.insert(event.metaball);
        } else {
            self.remove(event.metaball);
        }
    }

    /// Adds a metaball. Adding a member twice is a no-op.
    pub(crate) fn insert(&mut self, metaball: usize) {
        if !self.members.contains(&metaball) {
            self.members.push(metaball);
        }
    }

    /// Removes a metaball. Removing a non-member is a no-op.
    pub(crate) fn remove(&mut self, metaball: usize) {
        if let Some(pos) = self.members.iter().position(|&m| m == metaball) {
            self.members.swap_remove(pos);
        }
    }

    /// Returns true if no metaball is active.
    pub(crate) fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates over the active metaballs of `metaballs`. Indices past the end of
    /// the slice are skipped.
    pub(crate) fn iter<'a>(
        &'a self,
        metaballs: &'a [Metaball],
    ) -> impl Iterator<Item = &'a Metaball> + 'a {
        self.members.iter().filter_map(move |&i| metaballs.get(i))
    }

    /// Summed field value of the active metaballs.
    pub(crate) fn value_at(&self, metaballs: &[Metaball], position: DVec3) -> f64 {
        self.iter(metaballs).map(|m| m.value_at(position)).sum()
    }

    /// Summed gradient of the active metaballs.
    pub(crate) fn gradient_at(&self, metaballs: &[Metaball], position: DVec3) -> DVec3 {
        self.iter(metaballs).map(|m| m.gradient_at(position)).sum()
    }
}
