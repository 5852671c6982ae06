//! Math type aliases used by material parameters.

pub use nalgebra;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4D vector (f32).
pub type Vec4 = nalgebra::Vector4<f32>;

/// 3x3 matrix (f32), column-major. Used for UV transforms.
pub type Mat3 = nalgebra::Matrix3<f32>;
