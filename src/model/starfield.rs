use nalgebra::Point3;
use rand::Rng;

/// Scatters `count` stars uniformly through an axis-aligned cube of side
/// `extent` centred on the origin.
pub fn generate_stars<R: Rng>(rng: &mut R, count: usize, extent: f32) -> Vec<Point3<f32>> {
    let half = extent / 2.0;
    (0..count)
        .map(|_| {
            Point3::new(
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_stars_fill_the_cube() {
        let mut rng = StdRng::seed_from_u64(42);
        let stars = generate_stars(&mut rng, 500, 2000.0);
        assert_eq!(stars.len(), 500);
        for star in stars.iter() {
            assert!(star.coords.amax() <= 1000.0);
        }

        // Not all bunched together
        let spread = stars.iter().map(|s| s.x).fold(f32::MIN, f32::max)
            - stars.iter().map(|s| s.x).fold(f32::MAX, f32::min);
        assert!(spread > 1000.0);
    }

    #[test]
    fn test_no_stars() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generate_stars(&mut rng, 0, 10.0).is_empty());
    }
}
