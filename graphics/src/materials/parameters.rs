//! Material parameter declarations and values.

use ubermat_core::math::{Mat3, Vec3, Vec4};

/// Type of a declared material parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterType {
    /// Signed 32-bit integer.
    Int,
    /// 32-bit float.
    Float,
    /// Three-component float vector.
    Float3,
    /// Four-component float vector.
    Float4,
    /// 3x3 float matrix.
    Mat3,
    /// 2D texture with its sampler.
    Sampler2d,
}

/// A parameter a shader package declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterInfo {
    /// Parameter name.
    pub name: &'static str,
    /// Parameter type.
    pub ty: ParameterType,
}

impl ParameterInfo {
    /// Create a new parameter declaration.
    pub const fn new(name: &'static str, ty: ParameterType) -> Self {
        Self { name, ty }
    }

    /// Whether this parameter takes a texture binding rather than a value.
    pub fn is_sampler(&self) -> bool {
        self.ty == ParameterType::Sampler2d
    }
}

/// A value assigned to a non-sampler parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterValue {
    /// Integer value.
    Int(i32),
    /// Float value.
    Float(f32),
    /// Vector value.
    Float3(Vec3),
    /// Vector value with alpha.
    Float4(Vec4),
    /// Matrix value.
    Mat3(Mat3),
}

impl ParameterValue {
    /// Declared type this value satisfies.
    pub fn ty(&self) -> ParameterType {
        match self {
            Self::Int(_) => ParameterType::Int,
            Self::Float(_) => ParameterType::Float,
            Self::Float3(_) => ParameterType::Float3,
            Self::Float4(_) => ParameterType::Float4,
            Self::Mat3(_) => ParameterType::Mat3,
        }
    }
}

impl From<i32> for ParameterValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for ParameterValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<Vec3> for ParameterValue {
    fn from(v: Vec3) -> Self {
        Self::Float3(v)
    }
}

impl From<Vec4> for ParameterValue {
    fn from(v: Vec4) -> Self {
        Self::Float4(v)
    }
}

impl From<Mat3> for ParameterValue {
    fn from(m: Mat3) -> Self {
        Self::Mat3(m)
    }
}
