//! Vertex attribute semantics.
//!
//! Material providers use these to tell the importer which attributes a
//! shader reads even when the source mesh does not provide them.

/// Semantic meaning of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeSemantic {
    Position,
    Normal,
    /// xyz tangent, w carries the bitangent sign.
    Tangent,
    /// First UV set the ubershaders sample.
    TexCoord0,
    /// Second UV set the ubershaders sample.
    TexCoord1,
    /// Linear RGBA multiplied into base color.
    Color,
    Joints,
    Weights,
}

impl VertexAttributeSemantic {
    /// All semantics, in index order.
    pub const ALL: [Self; 8] = [
        Self::Position,
        Self::Normal,
        Self::Tangent,
        Self::TexCoord0,
        Self::TexCoord1,
        Self::Color,
        Self::Joints,
        Self::Weights,
    ];

    /// Position in [`Self::ALL`].
    pub fn index(&self) -> u32 {
        match self {
            Self::Position => 0,
            Self::Normal => 1,
            Self::Tangent => 2,
            Self::TexCoord0 => 3,
            Self::TexCoord1 => 4,
            Self::Color => 5,
            Self::Joints => 6,
            Self::Weights => 7,
        }
    }
}
