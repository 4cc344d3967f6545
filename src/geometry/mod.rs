pub mod aabb;
pub mod camera;
pub mod oriented_box;
pub mod pose;
pub mod ray;

pub use aabb::Aabb;
pub use camera::{PinholeCamera, PointerCaster};
pub use oriented_box::{Penetration, YawBox};
pub use pose::Pose;
pub use ray::Ray;
