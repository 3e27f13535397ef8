use std::fmt;

use crate::caps::DeclTypeCaps;

/// Unsized D3D9 vertex component encoding.
///
/// The component count is applied last (see [`D3dVertexType::widen`]); D3D9 only declares some
/// type/size pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum D3dVertexType {
    Float,
    Short,
    ShortNorm,
    UByte,
    UByteNorm,
    UShortNorm,
}

impl D3dVertexType {
    /// Size of one component in bytes.
    pub fn component_size(self) -> usize {
        match self {
            D3dVertexType::Float => 4,
            D3dVertexType::Short | D3dVertexType::ShortNorm | D3dVertexType::UShortNorm => 2,
            D3dVertexType::UByte | D3dVertexType::UByteNorm => 1,
        }
    }

    /// Smallest component count `>= components` that D3D9 declares for this encoding.
    ///
    /// * float: 1..=4, unchanged
    /// * short family: 2 or 4
    /// * byte family: 4 only
    pub fn widen(self, components: u8) -> u8 {
        match self {
            D3dVertexType::Float => components,
            D3dVertexType::Short | D3dVertexType::ShortNorm | D3dVertexType::UShortNorm => {
                if components <= 2 {
                    2
                } else {
                    4
                }
            }
            D3dVertexType::UByte | D3dVertexType::UByteNorm => 4,
        }
    }

    /// The sized declaration type used for `components` input components (after widening).
    pub fn decl_type(self, components: u8) -> DeclType {
        let wide = self.widen(components);
        match self {
            D3dVertexType::Float => match wide {
                1 => DeclType::Float1,
                2 => DeclType::Float2,
                3 => DeclType::Float3,
                _ => DeclType::Float4,
            },
            D3dVertexType::Short if wide == 2 => DeclType::Short2,
            D3dVertexType::Short => DeclType::Short4,
            D3dVertexType::ShortNorm if wide == 2 => DeclType::Short2N,
            D3dVertexType::ShortNorm => DeclType::Short4N,
            D3dVertexType::UShortNorm if wide == 2 => DeclType::UShort2N,
            D3dVertexType::UShortNorm => DeclType::UShort4N,
            D3dVertexType::UByte => DeclType::UByte4,
            D3dVertexType::UByteNorm => DeclType::UByte4N,
        }
    }
}

/// Sized `D3DDECLTYPE` values this translation can emit.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclType {
    Float1 = 0,
    Float2 = 1,
    Float3 = 2,
    Float4 = 3,
    UByte4 = 5,
    Short2 = 6,
    Short4 = 7,
    UByte4N = 8,
    Short2N = 9,
    Short4N = 10,
    UShort2N = 11,
    UShort4N = 12,
}

impl DeclType {
    pub fn from_raw(raw: u32) -> Option<Self> {
        Some(match raw {
            0 => DeclType::Float1,
            1 => DeclType::Float2,
            2 => DeclType::Float3,
            3 => DeclType::Float4,
            5 => DeclType::UByte4,
            6 => DeclType::Short2,
            7 => DeclType::Short4,
            8 => DeclType::UByte4N,
            9 => DeclType::Short2N,
            10 => DeclType::Short4N,
            11 => DeclType::UShort2N,
            12 => DeclType::UShort4N,
            _ => return None,
        })
    }

    pub fn raw(self) -> u32 {
        self as u32
    }

    pub fn vertex_type(self) -> D3dVertexType {
        match self {
            DeclType::Float1 | DeclType::Float2 | DeclType::Float3 | DeclType::Float4 => {
                D3dVertexType::Float
            }
            DeclType::Short2 | DeclType::Short4 => D3dVertexType::Short,
            DeclType::Short2N | DeclType::Short4N => D3dVertexType::ShortNorm,
            DeclType::UShort2N | DeclType::UShort4N => D3dVertexType::UShortNorm,
            DeclType::UByte4 => D3dVertexType::UByte,
            DeclType::UByte4N => D3dVertexType::UByteNorm,
        }
    }

    pub fn components(self) -> u8 {
        match self {
            DeclType::Float1 => 1,
            DeclType::Float2 | DeclType::Short2 | DeclType::Short2N | DeclType::UShort2N => 2,
            DeclType::Float3 => 3,
            DeclType::Float4
            | DeclType::Short4
            | DeclType::Short4N
            | DeclType::UShort4N
            | DeclType::UByte4
            | DeclType::UByte4N => 4,
        }
    }

    pub fn byte_size(self) -> u32 {
        (self.components() as usize * self.vertex_type().component_size()) as u32
    }

    pub fn component_type(self) -> ComponentType {
        match self {
            DeclType::Float1 | DeclType::Float2 | DeclType::Float3 | DeclType::Float4 => {
                ComponentType::Float
            }
            DeclType::Short2 | DeclType::Short4 => ComponentType::Int,
            DeclType::UByte4 => ComponentType::UnsignedInt,
            DeclType::Short2N | DeclType::Short4N => ComponentType::SignedNormalized,
            DeclType::UByte4N | DeclType::UShort2N | DeclType::UShort4N => {
                ComponentType::UnsignedNormalized
            }
        }
    }

    /// The `D3DDTCAPS_*` bit a device must report before this type may be declared.
    ///
    /// Empty for the types every D3D9 device supports.
    pub fn required_caps(self) -> DeclTypeCaps {
        match self {
            DeclType::UByte4 => DeclTypeCaps::UBYTE4,
            DeclType::UByte4N => DeclTypeCaps::UBYTE4N,
            DeclType::Short2N => DeclTypeCaps::SHORT2N,
            DeclType::Short4N => DeclTypeCaps::SHORT4N,
            DeclType::UShort2N => DeclTypeCaps::USHORT2N,
            DeclType::UShort4N => DeclTypeCaps::USHORT4N,
            DeclType::Float1
            | DeclType::Float2
            | DeclType::Float3
            | DeclType::Float4
            | DeclType::Short2
            | DeclType::Short4 => DeclTypeCaps::empty(),
        }
    }
}

impl fmt::Display for DeclType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeclType::Float1 => "FLOAT1",
            DeclType::Float2 => "FLOAT2",
            DeclType::Float3 => "FLOAT3",
            DeclType::Float4 => "FLOAT4",
            DeclType::UByte4 => "UBYTE4",
            DeclType::Short2 => "SHORT2",
            DeclType::Short4 => "SHORT4",
            DeclType::UByte4N => "UBYTE4N",
            DeclType::Short2N => "SHORT2N",
            DeclType::Short4N => "SHORT4N",
            DeclType::UShort2N => "USHORT2N",
            DeclType::UShort4N => "USHORT4N",
        };
        f.write_str(s)
    }
}

/// How the vertex shader sees the components of a declared attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Float,
    Int,
    UnsignedInt,
    SignedNormalized,
    UnsignedNormalized,
}
