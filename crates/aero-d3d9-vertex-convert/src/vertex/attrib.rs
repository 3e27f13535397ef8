use thiserror::Error;

pub const GL_BYTE: u32 = 0x1400;
pub const GL_UNSIGNED_BYTE: u32 = 0x1401;
pub const GL_SHORT: u32 = 0x1402;
pub const GL_UNSIGNED_SHORT: u32 = 0x1403;
pub const GL_FLOAT: u32 = 0x1406;
pub const GL_FIXED: u32 = 0x140C;

/// Scalar type of one application-supplied vertex attribute component.
///
/// Declaration order is the table order used by [`AttributeKey::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    /// Signed 16.16 fixed point stored in 32 bits.
    Fixed,
    Float,
}

impl ElementType {
    pub const COUNT: usize = 6;

    pub const ALL: [ElementType; Self::COUNT] = [
        ElementType::Byte,
        ElementType::UnsignedByte,
        ElementType::Short,
        ElementType::UnsignedShort,
        ElementType::Fixed,
        ElementType::Float,
    ];

    pub fn index(self) -> usize {
        match self {
            ElementType::Byte => 0,
            ElementType::UnsignedByte => 1,
            ElementType::Short => 2,
            ElementType::UnsignedShort => 3,
            ElementType::Fixed => 4,
            ElementType::Float => 5,
        }
    }

    /// Size of one component in bytes.
    pub fn byte_size(self) -> usize {
        match self {
            ElementType::Byte | ElementType::UnsignedByte => 1,
            ElementType::Short | ElementType::UnsignedShort => 2,
            ElementType::Fixed | ElementType::Float => 4,
        }
    }

    /// Whether the GL `normalized` flag changes how this type is interpreted.
    ///
    /// GL ignores the flag for `GL_FIXED` and `GL_FLOAT`.
    pub fn honors_normalized(self) -> bool {
        !matches!(self, ElementType::Fixed | ElementType::Float)
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            ElementType::Byte | ElementType::Short | ElementType::Fixed | ElementType::Float
        )
    }

    pub fn from_gl_enum(value: u32) -> Result<Self, VertexFormatError> {
        Ok(match value {
            GL_BYTE => ElementType::Byte,
            GL_UNSIGNED_BYTE => ElementType::UnsignedByte,
            GL_SHORT => ElementType::Short,
            GL_UNSIGNED_SHORT => ElementType::UnsignedShort,
            GL_FIXED => ElementType::Fixed,
            GL_FLOAT => ElementType::Float,
            other => return Err(VertexFormatError::UnknownType(other)),
        })
    }

    pub fn gl_enum(self) -> u32 {
        match self {
            ElementType::Byte => GL_BYTE,
            ElementType::UnsignedByte => GL_UNSIGNED_BYTE,
            ElementType::Short => GL_SHORT,
            ElementType::UnsignedShort => GL_UNSIGNED_SHORT,
            ElementType::Fixed => GL_FIXED,
            ElementType::Float => GL_FLOAT,
        }
    }
}

/// A vertex attribute format as specified by the application: `(type, normalized, size)`.
///
/// There are exactly [`AttributeKey::COUNT`] keys; each maps to one slot of a
/// [`ResolvedTable`](super::ResolvedTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeKey {
    ty: ElementType,
    normalized: bool,
    components: u8,
}

impl AttributeKey {
    pub const MAX_COMPONENTS: u8 = 4;
    pub const COUNT: usize = ElementType::COUNT * 2 * Self::MAX_COMPONENTS as usize;

    /// Panics if `components` is not in `1..=4`; an out-of-range size is a caller bug.
    pub fn new(ty: ElementType, normalized: bool, components: u8) -> Self {
        assert!(
            (1..=Self::MAX_COMPONENTS).contains(&components),
            "vertex attribute component count {components} out of range 1..=4"
        );
        Self {
            ty,
            normalized,
            components,
        }
    }

    pub fn try_new(
        ty: ElementType,
        normalized: bool,
        components: u8,
    ) -> Result<Self, VertexFormatError> {
        if !(1..=Self::MAX_COMPONENTS).contains(&components) {
            return Err(VertexFormatError::InvalidComponentCount(components));
        }
        Ok(Self {
            ty,
            normalized,
            components,
        })
    }

    pub fn ty(self) -> ElementType {
        self.ty
    }

    pub fn normalized(self) -> bool {
        self.normalized
    }

    pub fn components(self) -> u8 {
        self.components
    }

    /// Dense table index: `[type][normalized][components - 1]`.
    pub fn index(self) -> usize {
        self.ty.index() * 8 + (self.normalized as usize) * 4 + (self.components as usize - 1)
    }

    /// Inverse of [`AttributeKey::index`]. Panics if `index >= AttributeKey::COUNT`.
    pub fn from_index(index: usize) -> Self {
        assert!(index < Self::COUNT, "attribute key index {index} out of range");
        Self::new(
            ElementType::ALL[index / 8],
            (index / 4) % 2 == 1,
            (index % 4) as u8 + 1,
        )
    }

    /// Every key, in table order.
    pub fn all() -> impl Iterator<Item = AttributeKey> {
        (0..Self::COUNT).map(Self::from_index)
    }

    /// The key with the `normalized` flag cleared for types that ignore it.
    pub fn canonical(self) -> Self {
        Self {
            normalized: self.normalized && self.ty.honors_normalized(),
            ..self
        }
    }

    /// Size of one input element in bytes.
    pub fn input_element_size(self) -> usize {
        self.ty.byte_size() * self.components as usize
    }
}

/// A GL vertex format as stored by the front end, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlVertexFormat {
    /// `GL_BYTE`, `GL_FLOAT`, ...
    pub ty: u32,
    pub normalized: bool,
    /// Set for `glVertexAttribIPointer` formats.
    pub pure_integer: bool,
    pub components: u8,
}

impl TryFrom<GlVertexFormat> for AttributeKey {
    type Error = VertexFormatError;

    fn try_from(format: GlVertexFormat) -> Result<Self, Self::Error> {
        // Pure integer attributes need GL ES 3.0 and have no D3D9 declaration type.
        if format.pure_integer {
            return Err(VertexFormatError::PureIntegerUnsupported);
        }
        let ty = ElementType::from_gl_enum(format.ty)?;
        AttributeKey::try_new(ty, format.normalized, format.components)
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VertexFormatError {
    #[error("unknown GL vertex attribute type {0:#06x}")]
    UnknownType(u32),
    #[error("vertex attribute component count {0} out of range 1..=4")]
    InvalidComponentCount(u8),
    #[error("pure integer vertex attributes are not supported by the D3D9 backend")]
    PureIntegerUnsupported,
}
