//! Signed distance fields and sphere tracing.
//!
//! Terrain is modelled as a signed distance field: sampling a point yields the distance
//! to the nearest surface, negative inside solid geometry. Every field here is
//! Lipschitz-1, which is what makes stepping a ray by the sampled distance safe.

use std::fmt;
use std::sync::Arc;

use super::math::Vec3;

/// Sampling contract for occlusion and collision queries.
pub trait SignedDistanceField: Send + Sync {
    fn sample(&self, point: Vec3) -> f64;
}

/// Adapts a closure into a field, mostly for tests and ad-hoc terrain.
#[derive(Clone, Copy)]
pub struct SampleFn<F>(pub F);

impl<F> SignedDistanceField for SampleFn<F>
where
    F: Fn(Vec3) -> f64 + Send + Sync,
{
    fn sample(&self, point: Vec3) -> f64 {
        (self.0)(point)
    }
}

impl<F> fmt::Debug for SampleFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SampleFn")
    }
}

/// Analytic sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereField {
    pub center: Vec3,
    pub radius: f64,
}

impl SignedDistanceField for SphereField {
    fn sample(&self, point: Vec3) -> f64 {
        (point - self.center).length() - self.radius
    }
}

/// Infinite plane through `origin`; the positive side is the one the normal points to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneField {
    origin: Vec3,
    normal: Vec3,
}

impl PlaneField {
    /// Builds a plane, normalizing `normal`.
    ///
    /// # Panics
    ///
    /// Panics if `normal` is the zero vector.
    pub fn new(origin: Vec3, normal: Vec3) -> Self {
        Self {
            origin,
            normal: normal.normalize(),
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl SignedDistanceField for PlaneField {
    fn sample(&self, point: Vec3) -> f64 {
        (point - self.origin).dot(self.normal)
    }
}

/// Union of several fields: the closest surface wins.
#[derive(Clone, Default)]
pub struct UnionField {
    fields: Vec<Arc<dyn SignedDistanceField>>,
}

impl UnionField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl SignedDistanceField + 'static) -> Self {
        self.fields.push(Arc::new(field));
        self
    }

    pub fn push(&mut self, field: Arc<dyn SignedDistanceField>) {
        self.fields.push(field);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl SignedDistanceField for UnionField {
    fn sample(&self, point: Vec3) -> f64 {
        // An empty union has no surface anywhere.
        self.fields
            .iter()
            .map(|field| field.sample(point))
            .fold(f64::INFINITY, f64::min)
    }
}

impl fmt::Debug for UnionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionField")
            .field("fields", &self.fields.len())
            .finish()
    }
}

/// Outcome of a sphere-traced ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub hit: bool,
    /// Distance travelled along the ray; capped at the max distance on a miss.
    pub distance: f64,
    pub position: Vec3,
}

/// Sphere-traces `field` from `origin` along `direction`.
///
/// # Panics
///
/// Panics if `direction` is the zero vector.
pub fn raycast<F>(
    field: &F,
    origin: Vec3,
    direction: Vec3,
    max_distance: f64,
    max_steps: usize,
    epsilon: f64,
) -> RaycastHit
where
    F: SignedDistanceField + ?Sized,
{
    let dir = direction.normalize();
    let mut distance = 0.0;
    let mut current = origin;
    for _ in 0..max_steps {
        let sample = field.sample(current);
        if sample < epsilon {
            return RaycastHit {
                hit: true,
                distance,
                position: current,
            };
        }
        distance += sample;
        if distance > max_distance {
            break;
        }
        current = origin + dir * distance;
    }

    let capped = distance.min(max_distance);
    RaycastHit {
        hit: false,
        distance: capped,
        position: origin + dir * capped,
    }
}

/// Cheap bounding check: does a sphere at `center` touch or penetrate the field?
///
/// Returns the intersection flag and the clearance (negative when penetrating).
pub fn sphere_intersection<F>(field: &F, center: Vec3, radius: f64) -> (bool, f64)
where
    F: SignedDistanceField + ?Sized,
{
    let separation = field.sample(center) - radius;
    (separation <= 0.0, separation)
}
