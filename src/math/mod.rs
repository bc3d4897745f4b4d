pub mod projection;
pub mod ray;
