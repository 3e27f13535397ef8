//! Vertex attribute format negotiation.

pub mod attrib;
pub mod cache;
pub mod convert;
pub mod decl_type;
pub mod format_map;
pub mod policy;

pub use attrib::{AttributeKey, ElementType, GlVertexFormat, VertexFormatError};
pub use cache::{ResolvedTable, VertexFormatCache};
pub use convert::{ConversionRule, ConvertError, VertexConverter};
pub use decl_type::{ComponentType, D3dVertexType, DeclType};
pub use format_map::{resolve, resolve_for_caps, ConversionDescriptor, VertexConversionType};
pub use policy::{vertex_type_mapping, Preference, VertexTypeMapping};
