use thiserror::Error;

use super::attrib::ElementType;
use super::decl_type::D3dVertexType;

/// Numeric rule applied to each supplied component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionRule {
    /// Source and target components share a bit representation.
    Identity,
    /// Plain numeric conversion (`i8 -> i16` sign-extends, `u16 -> f32` is exact).
    Cast,
    /// Integer range to `[-1, 1]` (signed) or `[0, 1]` (unsigned).
    Normalize,
    /// Signed 16.16 fixed point to float.
    FixedToFloat,
}

impl ConversionRule {
    pub fn select(source: ElementType, normalized: bool, target: D3dVertexType) -> Self {
        match (source, target) {
            (ElementType::Fixed, D3dVertexType::Float) => ConversionRule::FixedToFloat,
            (_, D3dVertexType::Float) if normalized && source.honors_normalized() => {
                ConversionRule::Normalize
            }
            _ if same_representation(source, target) => ConversionRule::Identity,
            _ => ConversionRule::Cast,
        }
    }
}

fn same_representation(source: ElementType, target: D3dVertexType) -> bool {
    matches!(
        (source, target),
        (
            ElementType::UnsignedByte,
            D3dVertexType::UByte | D3dVertexType::UByteNorm
        ) | (ElementType::Short, D3dVertexType::Short | D3dVertexType::ShortNorm)
            | (ElementType::UnsignedShort, D3dVertexType::UShortNorm)
            | (ElementType::Float, D3dVertexType::Float)
    )
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConvertError {
    #[error("vertex stride {stride} is smaller than the {element_size}-byte input element")]
    StrideTooSmall { stride: usize, element_size: usize },
    #[error("vertex input too small (need {required} bytes, got {actual})")]
    InputTooSmall { required: usize, actual: usize },
    #[error("vertex output too small (need {required} bytes, got {actual})")]
    OutputTooSmall { required: usize, actual: usize },
}

/// Repacks application vertex elements into a D3D9 declaration type.
///
/// Supplied components go through the [`ConversionRule`]; components added by widening get the
/// default `(0, 0, 0, 1)` in the target's representation, where "1" is the type maximum for
/// normalized integer targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexConverter {
    source: ElementType,
    target: D3dVertexType,
    rule: ConversionRule,
    input_components: u8,
    output_components: u8,
}

impl VertexConverter {
    pub(crate) fn new(
        source: ElementType,
        target: D3dVertexType,
        rule: ConversionRule,
        input_components: u8,
    ) -> Self {
        Self {
            source,
            target,
            rule,
            input_components,
            output_components: target.widen(input_components),
        }
    }

    pub fn source(&self) -> ElementType {
        self.source
    }

    pub fn target(&self) -> D3dVertexType {
        self.target
    }

    pub fn rule(&self) -> ConversionRule {
        self.rule
    }

    pub fn input_components(&self) -> u8 {
        self.input_components
    }

    pub fn output_components(&self) -> u8 {
        self.output_components
    }

    pub fn input_element_size(&self) -> usize {
        self.source.byte_size() * self.input_components as usize
    }

    pub fn output_element_size(&self) -> usize {
        self.target.component_size() * self.output_components as usize
    }

    /// True when output elements are byte copies of input elements.
    pub fn is_identity(&self) -> bool {
        self.rule == ConversionRule::Identity && self.input_components == self.output_components
    }

    /// Convert `count` elements read every `stride` bytes from `input` into tightly packed
    /// elements at the start of `output`.
    pub fn convert_array(
        &self,
        input: &[u8],
        stride: usize,
        count: usize,
        output: &mut [u8],
    ) -> Result<(), ConvertError> {
        if count == 0 {
            return Ok(());
        }

        let in_size = self.input_element_size();
        let out_size = self.output_element_size();
        if count > 1 && stride < in_size {
            return Err(ConvertError::StrideTooSmall {
                stride,
                element_size: in_size,
            });
        }

        let required_in = (count - 1)
            .checked_mul(stride)
            .and_then(|v| v.checked_add(in_size))
            .unwrap_or(usize::MAX);
        if input.len() < required_in {
            return Err(ConvertError::InputTooSmall {
                required: required_in,
                actual: input.len(),
            });
        }
        let required_out = count.checked_mul(out_size).unwrap_or(usize::MAX);
        if output.len() < required_out {
            return Err(ConvertError::OutputTooSmall {
                required: required_out,
                actual: output.len(),
            });
        }

        if self.is_identity() && (stride == in_size || count == 1) {
            output[..required_out].copy_from_slice(&input[..required_out]);
            return Ok(());
        }

        for i in 0..count {
            let src = &input[i * stride..i * stride + in_size];
            let dst = &mut output[i * out_size..(i + 1) * out_size];
            self.convert_element(src, dst);
        }
        Ok(())
    }

    fn convert_element(&self, src: &[u8], dst: &mut [u8]) {
        if self.is_identity() {
            dst.copy_from_slice(src);
            return;
        }

        let in_width = self.source.byte_size();
        let out_width = self.target.component_size();
        for c in 0..self.output_components as usize {
            let out = &mut dst[c * out_width..(c + 1) * out_width];
            if c < self.input_components as usize {
                self.convert_component(&src[c * in_width..(c + 1) * in_width], out);
            } else {
                write_default(self.target, c, out);
            }
        }
    }

    fn convert_component(&self, src: &[u8], out: &mut [u8]) {
        match self.rule {
            ConversionRule::Identity => out.copy_from_slice(src),
            ConversionRule::Cast => write_cast(self.target, read_int(self.source, src), out),
            ConversionRule::Normalize => {
                let v = normalize(self.source, read_int(self.source, src));
                out.copy_from_slice(&v.to_le_bytes())
            }
            ConversionRule::FixedToFloat => {
                let v = fixed_to_float(read_int(self.source, src));
                out.copy_from_slice(&v.to_le_bytes())
            }
        }
    }
}

/// Float sources only take the identity path, so every other rule reads an integer.
fn read_int(ty: ElementType, bytes: &[u8]) -> i32 {
    debug_assert_ne!(ty, ElementType::Float);
    match ty {
        ElementType::Byte => i8::from_le_bytes([bytes[0]]) as i32,
        ElementType::UnsignedByte => bytes[0] as i32,
        ElementType::Short => i16::from_le_bytes([bytes[0], bytes[1]]) as i32,
        ElementType::UnsignedShort => u16::from_le_bytes([bytes[0], bytes[1]]) as i32,
        ElementType::Fixed | ElementType::Float => {
            i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
        }
    }
}

/// Map an integer to `[-1, 1]` / `[0, 1]` by dividing by the type maximum.
///
/// The most negative signed value would land just below -1 and is clamped, so `-128i8` becomes
/// exactly `-1.0`.
fn normalize(ty: ElementType, value: i32) -> f32 {
    let bits = 8 * ty.byte_size() as u32;
    let max = if ty.is_signed() {
        (1u64 << (bits - 1)) - 1
    } else {
        (1u64 << bits) - 1
    };
    (value as f32 / max as f32).max(-1.0)
}

pub fn fixed_to_float(fixed: i32) -> f32 {
    (fixed as f64 / 65536.0) as f32
}

fn write_cast(target: D3dVertexType, value: i32, out: &mut [u8]) {
    match target {
        D3dVertexType::Float => out.copy_from_slice(&(value as f32).to_le_bytes()),
        D3dVertexType::Short | D3dVertexType::ShortNorm => {
            out.copy_from_slice(&(value as i16).to_le_bytes())
        }
        D3dVertexType::UShortNorm => out.copy_from_slice(&(value as u16).to_le_bytes()),
        D3dVertexType::UByte | D3dVertexType::UByteNorm => out[0] = value as u8,
    }
}

/// Padding for component `index`: 0 for x/y/z, "one" for w.
fn write_default(target: D3dVertexType, index: usize, out: &mut [u8]) {
    let one = index == 3;
    match target {
        D3dVertexType::Float => {
            let v: f32 = if one { 1.0 } else { 0.0 };
            out.copy_from_slice(&v.to_le_bytes())
        }
        D3dVertexType::Short => {
            let v: i16 = if one { 1 } else { 0 };
            out.copy_from_slice(&v.to_le_bytes())
        }
        D3dVertexType::ShortNorm => {
            let v: i16 = if one { i16::MAX } else { 0 };
            out.copy_from_slice(&v.to_le_bytes())
        }
        D3dVertexType::UShortNorm => {
            let v: u16 = if one { u16::MAX } else { 0 };
            out.copy_from_slice(&v.to_le_bytes())
        }
        D3dVertexType::UByte => out[0] = if one { 1 } else { 0 },
        D3dVertexType::UByteNorm => out[0] = if one { u8::MAX } else { 0 },
    }
}
