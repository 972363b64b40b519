pub mod integrator;

pub use integrator::{apply_central_gravity, integrate, wrap_angle};
