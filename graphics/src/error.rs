//! Error type shared by the device, backends and the ubershader loader.

use std::fmt;

/// Fatal failures surfaced to callers.
///
/// Only fatal conditions are reported through this type. Recoverable
/// conditions during material instantiation (unsupported combinations,
/// conflicting features) are corrected in place and reported as warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// The backend could not allocate a texture, sampler or program.
    ResourceCreationFailed(String),
    /// A registered shader package failed to compile.
    ShaderCompilationFailed(String),
    /// No registered variant can serve the request, or the request asks for
    /// something the loader never provides.
    FeatureNotSupported(String),
    /// A value was rejected by validation, e.g. a zero-sized texture or a
    /// parameter written with the wrong type.
    InvalidParameter(String),
    /// A parameter name the material does not declare.
    UnknownParameter(String),
    /// Broken internal invariant.
    Internal(String),
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceCreationFailed(msg) => write!(f, "resource creation failed: {msg}"),
            Self::ShaderCompilationFailed(msg) => write!(f, "shader compilation failed: {msg}"),
            Self::FeatureNotSupported(msg) => write!(f, "feature not supported: {msg}"),
            Self::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Self::UnknownParameter(name) => write!(f, "unknown material parameter: {name}"),
            Self::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for GraphicsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GraphicsError::UnknownParameter("ior".to_string());
        assert_eq!(err.to_string(), "unknown material parameter: ior");

        let err = GraphicsError::ShaderCompilationFailed("lit_opaque".to_string());
        assert_eq!(err.to_string(), "shader compilation failed: lit_opaque");
    }
}
