//! Integration tests for metaball ray intersection.
//!
//! Most scenes use the Wyvill kernel with its bounding radius equal to its radius of
//! influence, so the broad phase is exact and the iso-surface of a lone blob is a
//! sphere of known radius.

use std::sync::Arc;

use isoblob::*;

const THRESHOLD: f64 = 0.5;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn single_blob(center: DVec3) -> (MetaballSet, f64) {
    let kernel = WyvillKernel::new(1.0, 2.0);
    let mut set = MetaballSet::new(THRESHOLD).expect("valid threshold");
    set.add_field(kernel, kernel.radius, center)
        .expect("valid radius");
    let iso_radius = kernel.iso_radius(THRESHOLD);
    (set, iso_radius.expect("threshold below peak"))
}

/// Two unit blobs on the X axis at `±half_distance`.
fn blob_pair(half_distance: f64) -> MetaballSet {
    let kernel = WyvillKernel::new(1.0, 1.0);
    let mut set = MetaballSet::new(THRESHOLD).unwrap();
    set.add_field(kernel, 1.0, DVec3::new(-half_distance, 0.0, 0.0))
        .unwrap();
    set.add_field(kernel, 1.0, DVec3::new(half_distance, 0.0, 0.0))
        .unwrap();
    set
}

fn along_x(set: &MetaballSet) -> Vec<SurfaceCrossing> {
    set.intersect(DVec3::new(-5.0, 0.0, 0.0), DVec3::X)
}

#[test]
fn test_single_blob_is_a_sphere() {
    init_logging();
    let center = DVec3::new(1.0, 2.0, 3.0);
    let (set, iso_radius) = single_blob(center);
    let tolerance = set.options().refinement_tolerance;

    let origin = DVec3::new(1.0, 2.0, -5.0);
    let crossings = set.intersect(origin, DVec3::Z);

    assert_eq!(crossings.len(), 2, "crossings: {crossings:?}");
    assert!(crossings[0].is_entering);
    assert!(!crossings[1].is_entering);
    for crossing in &crossings {
        // Positions are in world space, on the ray.
        let on_ray = origin + crossing.t * DVec3::Z;
        assert!((crossing.position - on_ray).length() < 1e-12);
        let error = (crossing.position - center).length() - iso_radius;
        assert!(error.abs() < tolerance, "radius error {error}");
        assert!((crossing.value - THRESHOLD).abs() < 1e-3);
    }
    assert!((crossings[0].t - (8.0 - iso_radius)).abs() < tolerance);
    assert!((crossings[1].t - (8.0 + iso_radius)).abs() < tolerance);
}

#[test]
fn test_normals_follow_the_gradient() {
    let center = DVec3::new(0.0, 0.0, 4.0);
    let (set, _) = single_blob(center);
    let direction = DVec3::Z;

    let crossings = set.intersect(DVec3::ZERO, direction);
    assert_eq!(crossings.len(), 2);

    for crossing in &crossings {
        let outward = crossing.outward_normal().expect("non-zero gradient");
        let expected = (crossing.position - center).normalize();
        assert!(outward.dot(expected) > 0.999);
        // The raw normal is the unnormalized gradient.
        assert!(crossing.normal.length() > 0.0);
    }
    assert!(crossings[0].outward_normal().unwrap().dot(direction) < 0.0);
    assert!(crossings[1].outward_normal().unwrap().dot(direction) > 0.0);
}

#[test]
fn test_empty_set() {
    init_logging();
    let set = MetaballSet::new(THRESHOLD).unwrap();
    assert!(set.intersect(DVec3::ZERO, DVec3::X).is_empty());
    let slanted = set.intersect(DVec3::new(3.0, -1.0, 2.0), DVec3::new(0.3, 0.4, -1.0));
    assert!(slanted.is_empty());
    assert_eq!(set.bounding_box(), (DVec3::ZERO, DVec3::ZERO));
}

#[test]
fn test_ray_missing_every_sphere() {
    let (set, _) = single_blob(DVec3::ZERO);
    let beside = set.intersect(DVec3::new(0.0, 2.5, -5.0), DVec3::Z);
    assert!(beside.is_empty());
    // Pointing away from the blob: bounding events exist only behind the origin.
    let away = set.intersect(DVec3::new(0.0, 0.0, -5.0), DVec3::NEG_Z);
    assert!(away.is_empty());
}

#[test]
fn test_close_blobs_fuse() {
    // Midpoint field 2 * (1 - 0.4²)³ ≈ 1.19 is above the threshold.
    let crossings = along_x(&blob_pair(0.4));
    assert_eq!(crossings.len(), 2, "crossings: {crossings:?}");
    assert!(crossings[0].is_entering);
    assert!(!crossings[1].is_entering);
}

#[test]
fn test_distant_blobs_stay_separate() {
    // Bounding spheres overlap, but the midpoint field 2 * (1 - 0.7²)³ ≈ 0.27 is not
    // enough to join the surfaces.
    let overlapping = along_x(&blob_pair(0.7));
    assert_eq!(overlapping.len(), 4, "crossings: {overlapping:?}");

    // Disjoint bounding spheres: the gap between them is never sampled.
    let disjoint = along_x(&blob_pair(3.0));
    assert_eq!(disjoint.len(), 4, "crossings: {disjoint:?}");

    for crossings in [&overlapping, &disjoint] {
        let flags: Vec<bool> = crossings.iter().map(|c| c.is_entering).collect();
        assert_eq!(flags, vec![true, false, true, false]);
        assert!(crossings.windows(2).all(|w| w[0].t < w[1].t));
    }
}

#[test]
fn test_direction_scales_parameters() {
    let (set, _) = single_blob(DVec3::ZERO);
    let unit = set.intersect(DVec3::new(0.0, 0.0, -5.0), DVec3::Z);
    let doubled = set.intersect(DVec3::new(0.0, 0.0, -5.0), DVec3::new(0.0, 0.0, 2.0));

    assert_eq!(unit.len(), 2);
    assert_eq!(doubled.len(), 2);
    for (a, b) in unit.iter().zip(&doubled) {
        // Positions agree to within the (direction-scaled) refinement tolerance.
        assert!((a.position - b.position).length() < 3e-4);
        assert!((a.t - 2.0 * b.t).abs() < 3e-4);
    }
}

#[test]
fn test_ray_starting_inside() {
    let (set, iso_radius) = single_blob(DVec3::ZERO);
    let crossings = set.intersect(DVec3::ZERO, DVec3::Y);

    assert_eq!(crossings.len(), 1);
    assert!(!crossings[0].is_entering);
    assert!((crossings[0].t - iso_radius).abs() < 1e-4);
}

#[test]
fn test_gaussian_kernel_with_cutoff() {
    let kernel = GaussianKernel::new(1.0, 4.0);
    let mut set = MetaballSet::new(THRESHOLD).unwrap();
    set.add_field(kernel, kernel.cutoff_radius(1e-6), DVec3::ZERO)
        .unwrap();

    let crossings = set.intersect(DVec3::new(0.0, 0.0, -5.0), DVec3::Z);
    let expected = kernel.cutoff_radius(THRESHOLD);
    assert_eq!(crossings.len(), 2);
    for crossing in &crossings {
        assert!((crossing.position.length() - expected).abs() < 1e-4);
    }
}

#[test]
fn test_closure_metaball() {
    // Field 1 - |p|² around the origin: the 0.75 level set is a sphere of radius 0.5.
    let mut set = MetaballSet::new(0.75).unwrap();
    set.add_metaball(
        |p: DVec3| 1.0 - p.length_squared(),
        |p: DVec3| -2.0 * p,
        1.0,
        DVec3::ZERO,
    )
    .unwrap();

    let crossings = set.intersect(DVec3::new(-3.0, 0.0, 0.0), DVec3::X);
    assert_eq!(crossings.len(), 2);
    assert!((crossings[0].position.x + 0.5).abs() < 1e-4);
    assert!((crossings[1].position.x - 0.5).abs() < 1e-4);
}

#[test]
fn test_solid_trait() {
    let (set, iso_radius) = single_blob(DVec3::new(0.0, 0.0, 3.0));
    let solid: &dyn Solid = &set;

    let (min, max) = solid.bounding_box();
    assert_eq!(min, DVec3::new(-2.0, -2.0, 1.0));
    assert_eq!(max, DVec3::new(2.0, 2.0, 5.0));

    let ray = Ray::new(DVec3::new(0.3, 0.1, 0.0), DVec3::Z);
    let crossings = solid.intersect(&ray);
    assert_eq!(crossings.len(), 2);

    let first = solid.first_hit(&ray, 0.0).expect("hit");
    assert!(first.is_front());
    let uv = solid.texture_coord(&first);
    assert_eq!(uv, DVec2::new(first.position.x, first.position.z));
    assert!(uv.y < 3.0 - iso_radius * 0.5);

    let behind = solid.first_hit(&ray, first.t + 0.01).expect("exit");
    assert!(!behind.is_front());
}

#[test]
fn test_options_from_json() {
    let options = Options::from_json(
        r#"{ "threshold": 0.5, "coarse_step": 0.05, "refinement_tolerance": 0.00001 }"#,
    )
    .unwrap();
    let kernel = WyvillKernel::new(1.0, 2.0);
    let mut set = MetaballSet::with_options(options).unwrap();
    set.add_field(kernel, 2.0, DVec3::ZERO).unwrap();

    let crossings = set.intersect(DVec3::new(0.0, 0.0, -5.0), DVec3::Z);
    let expected = kernel.iso_radius(0.5).unwrap();
    assert_eq!(crossings.len(), 2);
    assert!((crossings[0].position.length() - expected).abs() < 1e-5);

    let json = serde_json::to_string(set.options()).unwrap();
    assert_eq!(Options::from_json(&json).unwrap(), options);
}

#[test]
fn test_concurrent_queries() {
    init_logging();
    let mut set = MetaballSet::new(THRESHOLD).unwrap();
    for i in 0..5_i32 {
        let x = f64::from(i) * 0.6 - 1.2;
        let center = DVec3::new(x, 0.1 * x, 0.0);
        set.add_field(WyvillKernel::new(1.0, 1.0), 1.0, center)
            .unwrap();
    }
    let set = Arc::new(set);

    let rays: Vec<Ray> = (0..16_i32)
        .map(|i| {
            let y = f64::from(i) * 0.05 - 0.4;
            Ray::new(DVec3::new(-5.0, y, 0.2), DVec3::new(1.0, 0.0, 0.01))
        })
        .collect();
    let serial: Vec<Vec<SurfaceCrossing>> = rays.iter().map(|r| set.intersect_ray(r)).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = rays
            .iter()
            .map(|ray| {
                let set = Arc::clone(&set);
                scope.spawn(move || set.intersect_ray(ray))
            })
            .collect();
        for (handle, expected) in handles.into_iter().zip(&serial) {
            assert_eq!(&handle.join().unwrap(), expected);
        }
    });
}
