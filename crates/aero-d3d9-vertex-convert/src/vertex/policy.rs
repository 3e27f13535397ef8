//! GL attribute type → D3D9 vertex type policy.
//!
//! | GL type              | preferred (rule)        | fallback (rule)   |
//! |----------------------|-------------------------|-------------------|
//! | BYTE                 | SHORT (Cast)            | SHORT (Cast)      |
//! | BYTE-norm            | FLOAT (Normalize)       | FLOAT (Normalize) |
//! | UNSIGNED_BYTE        | UBYTE4 (Identity)       | FLOAT (Cast)      |
//! | UNSIGNED_BYTE-norm   | UBYTE4N (Identity)      | FLOAT (Normalize) |
//! | SHORT                | SHORT (Identity)        | SHORT (Identity)  |
//! | SHORT-norm           | SHORT-norm (Identity)   | FLOAT (Normalize) |
//! | UNSIGNED_SHORT       | FLOAT (Cast)            | FLOAT (Cast)      |
//! | UNSIGNED_SHORT-norm  | USHORT-norm (Identity)  | FLOAT (Normalize) |
//! | FIXED                | FLOAT (FixedToFloat)    | FLOAT             |
//! | FLOAT                | FLOAT (Identity)        | FLOAT             |
//!
//! `BYTE-norm` has no SHORT-norm preferred form because `-128/127` cannot be represented exactly
//! after rescaling to 16 bits.

use super::attrib::ElementType;
use super::decl_type::D3dVertexType;

/// Which side of a [`VertexTypeMapping`] to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preference {
    Preferred,
    /// Supported by every D3D9 device.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexTypeMapping {
    pub preferred: D3dVertexType,
    pub fallback: D3dVertexType,
}

impl VertexTypeMapping {
    const fn same(ty: D3dVertexType) -> Self {
        Self {
            preferred: ty,
            fallback: ty,
        }
    }

    pub fn select(self, preference: Preference) -> D3dVertexType {
        match preference {
            Preference::Preferred => self.preferred,
            Preference::Fallback => self.fallback,
        }
    }
}

pub fn vertex_type_mapping(ty: ElementType, normalized: bool) -> VertexTypeMapping {
    use D3dVertexType as D;

    match (ty, normalized) {
        (ElementType::Byte, false) => VertexTypeMapping::same(D::Short),
        (ElementType::Byte, true) => VertexTypeMapping::same(D::Float),
        (ElementType::UnsignedByte, false) => VertexTypeMapping {
            preferred: D::UByte,
            fallback: D::Float,
        },
        (ElementType::UnsignedByte, true) => VertexTypeMapping {
            preferred: D::UByteNorm,
            fallback: D::Float,
        },
        (ElementType::Short, false) => VertexTypeMapping::same(D::Short),
        (ElementType::Short, true) => VertexTypeMapping {
            preferred: D::ShortNorm,
            fallback: D::Float,
        },
        (ElementType::UnsignedShort, false) => VertexTypeMapping::same(D::Float),
        (ElementType::UnsignedShort, true) => VertexTypeMapping {
            preferred: D::UShortNorm,
            fallback: D::Float,
        },
        (ElementType::Fixed, _) | (ElementType::Float, _) => VertexTypeMapping::same(D::Float),
    }
}
