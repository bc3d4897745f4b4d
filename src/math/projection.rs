use nalgebra::{Matrix4, Point2, Point3};

/// Applies the camera's projection * view matrix and the perspective divide.
/// Points on or behind the eye plane have no meaningful projection, and give
/// `None`.
pub fn project_to_ndc(point: &Point3<f32>, transformation: &Matrix4<f32>) -> Option<Point3<f32>> {
    let clip = transformation * point.to_homogeneous();
    if clip.w <= 0.0 {
        return None;
    }
    Some(Point3::from(clip.xyz() / clip.w))
}

/// NDC to pixels, with the origin in the top-left corner and y pointing down.
pub fn ndc_to_viewport(ndc: &Point2<f32>, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        (ndc.x * 0.5 + 0.5) * width,
        (-ndc.y * 0.5 + 0.5) * height,
    )
}

pub fn project_to_viewport(
    point: &Point3<f32>,
    transformation: &Matrix4<f32>,
    width: f32,
    height: f32,
) -> Option<Point2<f32>> {
    let ndc = project_to_ndc(point, transformation)?;
    Some(ndc_to_viewport(&ndc.xy(), width, height))
}
