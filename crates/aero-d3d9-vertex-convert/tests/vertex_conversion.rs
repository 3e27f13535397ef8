use aero_d3d9_vertex_convert::vertex::{resolve, resolve_for_caps, Preference};
use aero_d3d9_vertex_convert::{
    AttributeKey, ConversionRule, ConvertError, DeclType, DeclTypeCaps, ElementType,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn f32s(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes(c.try_into().unwrap()))
        .collect()
}

fn convert(
    key: AttributeKey,
    caps: DeclTypeCaps,
    input: &[u8],
    count: usize,
) -> (DeclType, Vec<u8>) {
    let desc = resolve_for_caps(key, caps);
    let mut out = vec![0u8; desc.output_size(count).unwrap()];
    desc.converter
        .convert_array(input, key.input_element_size(), count, &mut out)
        .unwrap();
    (desc.native_format, out)
}

#[test]
fn ubyte_norm3_without_ubyte4n_falls_back_to_float() {
    let key = AttributeKey::new(ElementType::UnsignedByte, true, 3);
    let caps = DeclTypeCaps::all() - DeclTypeCaps::UBYTE4N;
    let desc = resolve_for_caps(key, caps);
    assert_eq!(desc.converter.rule(), ConversionRule::Normalize);
    assert!(desc.required_caps.is_empty());

    let (decl, out) = convert(key, caps, &[255, 0, 51], 1);
    assert_eq!(decl, DeclType::Float3);
    assert_eq!(f32s(&out), vec![1.0, 0.0, 0.2]);
}

#[test]
fn ubyte_norm3_with_ubyte4n_pads_w_with_one() {
    let key = AttributeKey::new(ElementType::UnsignedByte, true, 3);
    let (decl, out) = convert(key, DeclTypeCaps::UBYTE4N, &[1, 2, 3, 4, 5, 6], 2);
    assert_eq!(decl, DeclType::UByte4N);
    assert_eq!(out, vec![1, 2, 3, 255, 4, 5, 6, 255]);
}

#[test]
fn ushort_norm3_pads_w_with_max() {
    let key = AttributeKey::new(ElementType::UnsignedShort, true, 3);
    let input = [1u16, 2, 3];
    let (decl, out) = convert(key, DeclTypeCaps::USHORT4N, bytemuck::cast_slice(&input[..]), 1);
    assert_eq!(decl, DeclType::UShort4N);
    assert_eq!(out, vec![1, 0, 2, 0, 3, 0, 255, 255]);
}

#[test]
fn single_byte_pads_short2_y_with_zero() {
    let key = AttributeKey::new(ElementType::Byte, false, 1);
    let input = [-7i8, 42];
    let (decl, out) = convert(key, DeclTypeCaps::empty(), bytemuck::cast_slice(&input[..]), 2);
    assert_eq!(decl, DeclType::Short2);
    let shorts: Vec<i16> = out
        .chunks_exact(2)
        .map(|c| i16::from_le_bytes(c.try_into().unwrap()))
        .collect();
    assert_eq!(shorts, vec![-7, 0, 42, 0]);
}

#[test]
fn float2_copies_through() {
    let key = AttributeKey::new(ElementType::Float, false, 2);
    let input = [0.25f32, -8.0, 3.5, 1e9];
    let desc = resolve(key, Preference::Preferred);
    assert!(desc.is_identity());
    assert_eq!(desc.output_element_size, 8);

    let (_, out) = convert(key, DeclTypeCaps::empty(), bytemuck::cast_slice(&input[..]), 2);
    assert_eq!(f32s(&out), input.to_vec());
}

#[test]
fn signed_byte_extremes_normalize_exactly() {
    let key = AttributeKey::new(ElementType::Byte, true, 2);
    let input = [-128i8, 127];
    let (decl, out) = convert(key, DeclTypeCaps::empty(), bytemuck::cast_slice(&input[..]), 1);
    assert_eq!(decl, DeclType::Float2);
    assert_eq!(f32s(&out), vec![-1.0, 1.0]);
}

#[test]
fn fixed_point_converts_to_float() {
    for normalized in [false, true] {
        let key = AttributeKey::new(ElementType::Fixed, normalized, 4);
        let input = [65536i32, 32768, -65536, 0x0003_4000];
        let (decl, out) = convert(key, DeclTypeCaps::all(), bytemuck::cast_slice(&input[..]), 1);
        assert_eq!(decl, DeclType::Float4);
        assert_eq!(f32s(&out), vec![1.0, 0.5, -1.0, 3.25]);
    }
}

#[test]
fn unsigned_short_casts_to_float() {
    let key = AttributeKey::new(ElementType::UnsignedShort, false, 1);
    let input = [0u16, 65535];
    let (decl, out) = convert(key, DeclTypeCaps::all(), bytemuck::cast_slice(&input[..]), 2);
    assert_eq!(decl, DeclType::Float1);
    assert_eq!(f32s(&out), vec![0.0, 65535.0]);
}

#[test]
fn short_norm_fallback_normalizes() {
    let key = AttributeKey::new(ElementType::Short, true, 2);
    let input = [i16::MIN, i16::MAX];
    let (decl, out) = convert(key, DeclTypeCaps::SHORT4N, bytemuck::cast_slice(&input[..]), 1);
    assert_eq!(decl, DeclType::Float2);
    assert_eq!(f32s(&out), vec![-1.0, 1.0]);
}

#[test]
fn interleaved_buffer_is_read_with_stride() {
    #[repr(C)]
    #[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
    struct Vertex {
        pos: [f32; 3],
        color: [u8; 4],
    }

    let vertices = [
        Vertex {
            pos: [1.0, 2.0, 3.0],
            color: [255, 0, 0, 0],
        },
        Vertex {
            pos: [4.0, 5.0, 6.0],
            color: [0, 255, 0, 0],
        },
    ];
    let bytes: &[u8] = bytemuck::cast_slice(&vertices[..]);
    let stride = std::mem::size_of::<Vertex>();

    let key = AttributeKey::new(ElementType::UnsignedByte, true, 3);
    let desc = resolve_for_caps(key, DeclTypeCaps::empty());
    let mut out = vec![0u8; desc.output_size(2).unwrap()];
    desc.converter
        .convert_array(&bytes[12..], stride, 2, &mut out)
        .unwrap();
    assert_eq!(f32s(&out), vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
}

#[test]
fn short_output_buffer_is_rejected() {
    let key = AttributeKey::new(ElementType::Byte, false, 3);
    let desc = resolve(key, Preference::Preferred);
    let mut out = vec![0u8; 7];
    assert_eq!(
        desc.converter.convert_array(&[1, 2, 3], 3, 1, &mut out),
        Err(ConvertError::OutputTooSmall {
            required: 8,
            actual: 7
        })
    );
}

proptest! {
    #[test]
    fn normalized_bytes_stay_in_range(values in proptest::collection::vec(any::<i8>(), 1..64)) {
        let key = AttributeKey::new(ElementType::Byte, true, 1);
        let input: &[u8] = bytemuck::cast_slice(&values[..]);
        let (_, out) = convert(key, DeclTypeCaps::all(), input, values.len());
        for (v, f) in values.iter().zip(f32s(&out)) {
            prop_assert!((-1.0..=1.0).contains(&f), "{v} -> {f}");
            prop_assert_eq!(f.is_sign_negative() && f != 0.0, *v < 0);
        }
    }

    #[test]
    fn normalized_ushorts_stay_in_unit_range(
        values in proptest::collection::vec(any::<u16>(), 1..64)
    ) {
        let key = AttributeKey::new(ElementType::UnsignedShort, true, 1);
        let input: &[u8] = bytemuck::cast_slice(&values[..]);
        let (_, out) = convert(key, DeclTypeCaps::empty(), input, values.len());
        for f in f32s(&out) {
            prop_assert!((0.0..=1.0).contains(&f));
        }
    }

    #[test]
    fn integral_fixed_values_are_exact(v in -32768i32..32768) {
        let key = AttributeKey::new(ElementType::Fixed, false, 1);
        let input = [v << 16];
        let (_, out) = convert(key, DeclTypeCaps::empty(), bytemuck::cast_slice(&input[..]), 1);
        prop_assert_eq!(f32s(&out), vec![v as f32]);
    }

    #[test]
    fn byte_cast_preserves_value(values in proptest::collection::vec(any::<i8>(), 2..=2)) {
        let key = AttributeKey::new(ElementType::Byte, false, 2);
        let (decl, out) = convert(key, DeclTypeCaps::empty(), bytemuck::cast_slice(&values[..]), 1);
        prop_assert_eq!(decl, DeclType::Short2);
        let shorts: Vec<i16> = out
            .chunks_exact(2)
            .map(|c| i16::from_le_bytes(c.try_into().unwrap()))
            .collect();
        prop_assert_eq!(shorts, values.iter().map(|&v| v as i16).collect::<Vec<_>>());
    }
}
