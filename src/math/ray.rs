use nalgebra::{Matrix4, Point2, Point3, Unit, Vector3};

/// Half-line in world space, used for picking bodies under the cursor.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Unit<Vector3<f32>>,
}

/// Maps a pointer position in pixels (origin top-left, y down) into
/// normalized device coordinates: [-1, 1] on both axes, y up.
pub fn normalize_pointer(pos: &Point2<f32>, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        pos.x / width * 2.0 - 1.0,
        -(pos.y / height * 2.0 - 1.0),
    )
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Option<Self> {
        let direction = Unit::try_new(direction, f32::EPSILON)?;
        Some(Ray { origin, direction })
    }

    /// Builds the ray that starts on the near plane under `ndc` and passes
    /// through the matching point on the far plane. `inverse_transformation`
    /// is the inverse of projection * view.
    pub fn from_ndc(ndc: &Point2<f32>, inverse_transformation: &Matrix4<f32>) -> Option<Self> {
        let near = inverse_transformation.transform_point(&Point3::new(ndc.x, ndc.y, -1.0));
        let far = inverse_transformation.transform_point(&Point3::new(ndc.x, ndc.y, 1.0));
        Ray::new(near, far - near)
    }

    pub fn point_at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction.into_inner() * t
    }

    /// Distance along the ray to the first point on the sphere, if any. If the
    /// origin is inside the sphere, this is where the ray exits.
    pub fn intersect_sphere(&self, center: &Point3<f32>, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction.as_ref());
        let c = oc.norm_squared() - radius * radius;

        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let (t0, t1) = (-b - sqrt_disc, -b + sqrt_disc);
        if t0 >= 0.0 {
            Some(t0)
        } else if t1 >= 0.0 {
            Some(t1)
        } else {
            None
        }
    }
}

/// Returns the key of the sphere hit closest to the ray origin, together with
/// the hit distance. On an exact tie the sphere listed first wins.
pub fn pick_nearest<K, I>(ray: &Ray, spheres: I) -> Option<(K, f32)>
where
    I: IntoIterator<Item = (K, Point3<f32>, f32)>,
{
    let mut best: Option<(K, f32)> = None;
    for (key, center, radius) in spheres {
        let t = match ray.intersect_sphere(&center, radius) {
            Some(t) => t,
            None => continue,
        };
        match best {
            Some((_, best_t)) if best_t <= t => {}
            _ => best = Some((key, t)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{Isometry3, Perspective3};

    use super::*;

    fn inverse_view_projection(eye: Point3<f32>) -> Matrix4<f32> {
        let projection = Perspective3::new(800.0 / 600.0, 75f32.to_radians(), 0.1, 1000.0);
        let view = Isometry3::look_at_rh(&eye, &Point3::origin(), &Vector3::y());
        (projection.into_inner() * view.to_homogeneous())
            .try_inverse()
            .unwrap()
    }

    #[test]
    fn test_normalize_pointer() {
        let corner = normalize_pointer(&Point2::new(0.0, 0.0), 800.0, 600.0);
        assert_relative_eq!(corner, Point2::new(-1.0, 1.0));

        let corner = normalize_pointer(&Point2::new(800.0, 600.0), 800.0, 600.0);
        assert_relative_eq!(corner, Point2::new(1.0, -1.0));

        let center = normalize_pointer(&Point2::new(400.0, 300.0), 800.0, 600.0);
        assert_relative_eq!(center, Point2::new(0.0, 0.0));
    }

    #[test]
    fn test_center_ray_points_forward() {
        let eye = Point3::new(0.0, 0.0, 60.0);
        let ray = Ray::from_ndc(&Point2::origin(), &inverse_view_projection(eye)).unwrap();

        assert_relative_eq!(ray.direction.into_inner(), -Vector3::z(), epsilon = 1e-4);
        // Starts on the near plane
        assert_relative_eq!(ray.origin, Point3::new(0.0, 0.0, 59.9), epsilon = 1e-2);

        let t = ray.intersect_sphere(&Point3::origin(), 15.0).unwrap();
        assert_relative_eq!(ray.point_at(t), Point3::new(0.0, 0.0, 15.0), epsilon = 1e-2);
    }

    #[test]
    fn test_sphere_misses() {
        let ray = Ray::new(Point3::origin(), Vector3::x()).unwrap();
        // Off to the side
        assert_eq!(ray.intersect_sphere(&Point3::new(5.0, 3.0, 0.0), 1.0), None);
        // Behind the origin
        assert_eq!(ray.intersect_sphere(&Point3::new(-5.0, 0.0, 0.0), 1.0), None);
        // Inside the sphere: hit where we leave it
        let t = ray.intersect_sphere(&Point3::new(1.0, 0.0, 0.0), 2.0).unwrap();
        assert_relative_eq!(t, 3.0);
    }

    #[test]
    fn test_degenerate_ray() {
        assert!(Ray::new(Point3::origin(), Vector3::zeros()).is_none());
    }

    #[test]
    fn test_pick_nearest() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 100.0), -Vector3::z()).unwrap();
        let spheres = vec![
            ("far", Point3::new(0.0, 0.0, 0.0), 2.0),
            ("near", Point3::new(0.0, 0.0, 50.0), 1.0),
            ("aside", Point3::new(30.0, 0.0, 80.0), 1.0),
        ];

        let (key, t) = pick_nearest(&ray, spheres.clone()).unwrap();
        assert_eq!(key, "near");
        assert_relative_eq!(t, 49.0);

        // Order of the candidates doesn't matter
        let (key, _) = pick_nearest(&ray, spheres.into_iter().rev()).unwrap();
        assert_eq!(key, "near");

        let nothing: Vec<(&str, Point3<f32>, f32)> = vec![];
        assert!(pick_nearest(&ray, nothing).is_none());
    }

    #[test]
    fn test_pick_tie_goes_to_first() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 10.0), -Vector3::z()).unwrap();
        let spheres = vec![(1, Point3::origin(), 1.0), (2, Point3::origin(), 1.0)];
        assert_eq!(pick_nearest(&ray, spheres).map(|(k, _)| k), Some(1));
    }
}
