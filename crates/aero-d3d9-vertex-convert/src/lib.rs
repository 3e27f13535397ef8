//! GL ES vertex attribute translation for the D3D9 backend.
//!
//! GL ES lets applications feed vertex attributes as bytes, shorts, 16.16 fixed point or floats,
//! normalized or not, with 1 to 4 components. D3D9 vertex declarations only accept a handful of
//! `D3DDECLTYPE`s, several of which are optional and advertised through `D3DCAPS9::DeclTypes`.
//!
//! This crate decides, per attribute format, which declaration type to use on a given device and
//! how to repack the application's data into it:
//!
//! * [`vertex::policy`] holds the preferred/fallback declaration types per GL type,
//! * [`vertex::format_map`] resolves a single format (widening, defaults, conversion rule),
//! * [`vertex::cache`] builds the full table for a capability set and memoizes it,
//! * [`device::DeviceVertexFormats`] is the per-device owner of that cache.

pub mod caps;
pub mod device;
pub mod vertex;

pub use caps::DeclTypeCaps;
pub use device::DeviceVertexFormats;
pub use vertex::{
    AttributeKey, ComponentType, ConversionDescriptor, ConversionRule, ConvertError, D3dVertexType,
    DeclType, ElementType, GlVertexFormat, Preference, ResolvedTable, VertexConversionType,
    VertexConverter, VertexFormatCache, VertexFormatError,
};
