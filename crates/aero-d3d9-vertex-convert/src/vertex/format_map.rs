use super::attrib::AttributeKey;
use super::convert::{ConversionRule, VertexConverter};
use super::decl_type::{ComponentType, DeclType};
use super::policy::{vertex_type_mapping, Preference};
use crate::caps::DeclTypeCaps;

/// Whether vertex data can be used as-is or must be repacked on the CPU first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexConversionType {
    None,
    Cpu,
}

/// Describes how a GL vertex attribute format is represented in a D3D9 vertex declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversionDescriptor {
    pub conversion_type: VertexConversionType,
    /// Stride of one converted element in the destination buffer.
    pub output_element_size: u32,
    pub converter: VertexConverter,
    /// `D3DDECLTYPE` to declare the attribute with.
    pub native_format: DeclType,
    pub component_type: ComponentType,
    /// Caps the device must report for this descriptor to be usable. Always empty for fallbacks.
    pub required_caps: DeclTypeCaps,
}

impl ConversionDescriptor {
    /// Destination bytes needed for `count` converted elements, or `None` if that overflows
    /// `usize`.
    pub fn output_size(&self, count: usize) -> Option<usize> {
        (self.output_element_size as usize).checked_mul(count)
    }

    pub fn is_identity(&self) -> bool {
        self.conversion_type == VertexConversionType::None
    }
}

/// Resolve one attribute format against one side of the policy table.
///
/// This is total: every key has a preferred and a fallback translation.
pub fn resolve(key: AttributeKey, preference: Preference) -> ConversionDescriptor {
    let key = key.canonical();
    let target = vertex_type_mapping(key.ty(), key.normalized()).select(preference);
    let rule = ConversionRule::select(key.ty(), key.normalized(), target);
    let converter = VertexConverter::new(key.ty(), target, rule, key.components());
    let native_format = target.decl_type(key.components());
    debug_assert_eq!(native_format.components(), converter.output_components());

    let required_caps = match preference {
        Preference::Preferred => native_format.required_caps(),
        Preference::Fallback => DeclTypeCaps::empty(),
    };
    let conversion_type = if converter.is_identity() {
        VertexConversionType::None
    } else {
        VertexConversionType::Cpu
    };

    ConversionDescriptor {
        conversion_type,
        output_element_size: native_format.byte_size(),
        converter,
        native_format,
        component_type: native_format.component_type(),
        required_caps,
    }
}

/// Pick the preferred translation if `caps` allows it, else the fallback.
pub fn resolve_for_caps(key: AttributeKey, caps: DeclTypeCaps) -> ConversionDescriptor {
    let preferred = resolve(key, Preference::Preferred);
    if preferred.required_caps.is_empty() || caps.intersects(preferred.required_caps) {
        preferred
    } else {
        resolve(key, Preference::Fallback)
    }
}
