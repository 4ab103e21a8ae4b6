//! The metaball container and its ray intersector.

use glam::DVec3;
use isoblob_core::{FnField, Options, Ray, Result, ScalarField, Solid, SurfaceCrossing};

use crate::metaball::{BoundingEvent, Metaball};
use crate::sweep::Sweeper;

/// A solid whose surface is the `threshold` level set of its metaballs' summed field.
///
/// Built once with [`MetaballSet::add_metaball`] / [`MetaballSet::add_field`], then
/// queried read-only. Queries keep all working state local, so a built set can be
/// shared across render threads without locking.
#[derive(Debug)]
pub struct MetaballSet {
    options: Options,
    metaballs: Vec<Metaball>,
}

impl MetaballSet {
    /// Creates an empty set with the given threshold and default sampling steps.
    pub fn new(threshold: f64) -> Result<Self> {
        Self::with_options(Options::new(threshold))
    }

    /// Creates an empty set with explicit options.
    pub fn with_options(options: Options) -> Result<Self> {
        options.validate()?;
        log::debug!(
            "metaball set created: threshold={}, coarse_step={}, tolerance={}",
            options.threshold,
            options.coarse_step,
            options.refinement_tolerance
        );
        Ok(Self {
            options,
            metaballs: Vec::new(),
        })
    }

    /// Adds a metaball given as a value function and its gradient.
    pub fn add_metaball<V, G>(
        &mut self,
        value: V,
        gradient: G,
        max_radius: f64,
        translation: DVec3,
    ) -> Result<()>
    where
        V: Fn(DVec3) -> f64 + Send + Sync + 'static,
        G: Fn(DVec3) -> DVec3 + Send + Sync + 'static,
    {
        self.add_field(FnField::new(value, gradient), max_radius, translation)
    }

    /// Adds a metaball from any scalar field.
    pub fn add_field(
        &mut self,
        field: impl ScalarField + 'static,
        max_radius: f64,
        translation: DVec3,
    ) -> Result<()> {
        let metaball = Metaball::new(field, max_radius, translation)?;
        log::debug!(
            "metaball #{} added at {translation} with radius {max_radius}",
            self.metaballs.len()
        );
        self.metaballs.push(metaball);
        Ok(())
    }

    /// Returns the set's options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the surface threshold.
    pub fn threshold(&self) -> f64 {
        self.options.threshold
    }

    /// Returns the number of metaballs.
    pub fn len(&self) -> usize {
        self.metaballs.len()
    }

    /// Returns true if the set has no metaballs.
    pub fn is_empty(&self) -> bool {
        self.metaballs.is_empty()
    }

    /// Iterates over the metaballs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Metaball> {
        self.metaballs.iter()
    }

    /// Summed field of every metaball at a position, ignoring bounding spheres.
    pub fn value_at(&self, position: DVec3) -> f64 {
        self.metaballs.iter().map(|m| m.value_at(position)).sum()
    }

    /// Summed gradient of every metaball at a position, ignoring bounding spheres.
    pub fn gradient_at(&self, position: DVec3) -> DVec3 {
        self.metaballs.iter().map(|m| m.gradient_at(position)).sum()
    }

    /// Returns every surface crossing of the ray `origin + t * direction`, ordered by
    /// increasing `t`.
    pub fn intersect(&self, origin: DVec3, direction: DVec3) -> Vec<SurfaceCrossing> {
        self.intersect_ray(&Ray::new(origin, direction))
    }

    /// Returns every surface crossing of the ray, ordered by increasing `t`.
    pub fn intersect_ray(&self, ray: &Ray) -> Vec<SurfaceCrossing> {
        let events = self.bounding_events(ray);
        if events.is_empty() {
            return Vec::new();
        }
        log::trace!(
            "broad phase: {} bounding events from {} metaballs",
            events.len(),
            self.metaballs.len()
        );

        Sweeper::new(&self.metaballs, &self.options, *ray).sweep(&events)
    }

    /// Collects the bounding sphere events of all metaballs, sorted by `t`.
    ///
    /// Events at equal `t` put exits before entries.
    fn bounding_events(&self, ray: &Ray) -> Vec<BoundingEvent> {
        let mut events: Vec<BoundingEvent> = self
            .metaballs
            .iter()
            .enumerate()
            .flat_map(|(i, m)| m.intersect_bounding_sphere(i, ray))
            .collect();
        events.sort_by(|a, b| {
            a.t.total_cmp(&b.t)
                .then_with(|| a.is_entering.cmp(&b.is_entering))
        });
        events
    }

    /// Returns the union of the metaballs' bounding boxes as `(min, max)`.
    ///
    /// An empty set yields the degenerate box `(0, 0)`.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.metaballs.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = DVec3::splat(f64::INFINITY);
        let mut max = DVec3::splat(f64::NEG_INFINITY);
        for metaball in &self.metaballs {
            let (bb_min, bb_max) = metaball.bounding_box();
            min = min.min(bb_min);
            max = max.max(bb_max);
        }
        (min, max)
    }
}

impl Solid for MetaballSet {
    fn intersect(&self, ray: &Ray) -> Vec<SurfaceCrossing> {
        self.intersect_ray(ray)
    }

    fn bounding_box(&self) -> (DVec3, DVec3) {
        MetaballSet::bounding_box(self)
    }
}
