//! Wire-format constants and key/varint math baked into emitted field code.
//!
//! The numeric forms here follow the encoding described in
//! <https://protobuf.dev/programming-guides/encoding/>. Emitted C# source
//! carries these values as raw tag byte sequences and precomputed sizes, so
//! they are fixed at generation time rather than computed by the runtime.

use bytes::BufMut;

/// The smallest field number a descriptor may carry.
pub const MIN_FIELD_NUMBER: u32 = 1;
/// The largest field number a descriptor may carry.
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// Protobuf wire type designators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum WireType {
    Varint = 0,
    SixtyFourBit = 1,
    LengthDelimited = 2,
    StartGroup = 3,
    EndGroup = 4,
    ThirtyTwoBit = 5,
}

/// Builds a Protobuf field key, which consists of a wire type designator and
/// the field number.
#[inline]
pub fn make_tag(field_number: u32, wire_type: WireType) -> u32 {
    debug_assert!((MIN_FIELD_NUMBER..=MAX_FIELD_NUMBER).contains(&field_number));
    (field_number << 3) | wire_type as u32
}

/// Encodes `value` as a LEB128 variable length integer.
#[inline]
pub fn encode_varint(mut value: u64, buf: &mut impl BufMut) {
    loop {
        if value < 0x80 {
            buf.put_u8(value as u8);
            break;
        }
        buf.put_u8(((value & 0x7F) | 0x80) as u8);
        value >>= 7;
    }
}

/// Returns the encoded length of `value` as a varint, between 1 and 10 bytes
/// (inclusive).
#[inline]
pub const fn encoded_len_varint(value: u64) -> usize {
    // Based on VarintSize64 in the C++ runtime's coded_stream.h.
    ((((value | 1).leading_zeros() ^ 63) * 9 + 73) / 64) as usize
}

/// The varint byte sequence for `value`.
pub fn varint_bytes(value: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_len_varint(value));
    encode_varint(value, &mut buf);
    buf
}

/// Returns the width of an encoded field key with the given field number.
/// The returned width is between 1 and 5 bytes (inclusive).
#[inline]
pub const fn tag_len(field_number: u32) -> usize {
    encoded_len_varint((field_number << 3) as u64)
}
