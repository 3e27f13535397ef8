//! `D3DCAPS9::DeclTypes` capability bits.

use bitflags::bitflags;
use tracing::debug;

bitflags! {
    /// Optional vertex declaration types supported by a device (`D3DDTCAPS_*`).
    ///
    /// `FLOAT1..4`, `D3DCOLOR`, `SHORT2` and `SHORT4` are mandatory on every D3D9 device and have
    /// no bit here.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct DeclTypeCaps: u32 {
        const UBYTE4 = 0x0000_0001;
        const UBYTE4N = 0x0000_0002;
        const SHORT2N = 0x0000_0004;
        const SHORT4N = 0x0000_0008;
        const USHORT2N = 0x0000_0010;
        const USHORT4N = 0x0000_0020;
        const UDEC3 = 0x0000_0040;
        const DEC3N = 0x0000_0080;
        const FLOAT16_2 = 0x0000_0100;
        const FLOAT16_4 = 0x0000_0200;
    }
}

impl DeclTypeCaps {
    /// Interpret a raw `D3DCAPS9::DeclTypes` value reported by a device.
    ///
    /// Bits that D3D9 does not define are dropped.
    pub fn from_d3d_caps(raw: u32) -> Self {
        let caps = Self::from_bits_truncate(raw);
        let unknown = raw & !Self::all().bits();
        if unknown != 0 {
            debug!(raw, unknown, "ignoring unknown D3DDTCAPS bits");
        }
        caps
    }
}
