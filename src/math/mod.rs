pub mod circle;
pub mod edge;
pub mod ray;
pub mod transform;
pub mod vec2;

pub use circle::Circle;
pub use edge::Edge;
pub use ray::Ray;
pub use transform::Transform;
pub use vec2::Vec2;
