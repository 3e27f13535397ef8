use tracing::debug;

use crate::caps::DeclTypeCaps;
use crate::vertex::{
    AttributeKey, ConversionDescriptor, GlVertexFormat, VertexFormatCache, VertexFormatError,
};

/// Per-device vertex format state: the device's decl type caps and the table resolved for them.
///
/// Owned by the D3D9 device context and created once the device caps have been queried.
#[derive(Debug)]
pub struct DeviceVertexFormats {
    caps: DeclTypeCaps,
    cache: VertexFormatCache,
}

impl DeviceVertexFormats {
    /// `raw` is `D3DCAPS9::DeclTypes`.
    pub fn from_decl_type_caps(raw: u32) -> Self {
        Self::new(DeclTypeCaps::from_d3d_caps(raw))
    }

    pub fn new(caps: DeclTypeCaps) -> Self {
        Self {
            caps,
            cache: VertexFormatCache::with_caps(caps),
        }
    }

    pub fn caps(&self) -> DeclTypeCaps {
        self.caps
    }

    pub fn cache(&self) -> &VertexFormatCache {
        &self.cache
    }

    pub fn format_info(&self, key: AttributeKey) -> ConversionDescriptor {
        self.cache.get(self.caps, key)
    }

    /// Translate a GL vertex format straight from front-end state.
    pub fn translate(
        &self,
        format: GlVertexFormat,
    ) -> Result<ConversionDescriptor, VertexFormatError> {
        let key = AttributeKey::try_from(format)?;
        Ok(self.format_info(key))
    }

    /// Apply caps re-queried after a device reset. A change is picked up by the next lookup, which
    /// rebuilds the whole table.
    pub fn reset_caps(&mut self, raw: u32) {
        let caps = DeclTypeCaps::from_d3d_caps(raw);
        if caps != self.caps {
            debug!(old = ?self.caps, new = ?caps, "D3D9 decl type caps changed");
        }
        self.caps = caps;
    }
}
