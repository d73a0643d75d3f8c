//! Regrouping of bit strings between 8-bit bytes and 5-bit groups.

use crate::error::Malformed;

/// Repack `input`, a sequence of `from_bits`-wide values, into `to_bits`-wide values.
///
/// With `pad` set, leftover bits are shifted up and zero-filled into one more
/// output value. Without it, leftover bits must all be zero and are dropped.
///
/// Both widths must be in `1..=8`.
///
/// # Errors
/// - [`Malformed::InvalidBitWidth`] if either width is outside `1..=8`
/// - [`Malformed::GroupOutOfRange`] if an input value is wider than `from_bits`
/// - [`Malformed::NonZeroPadding`] if `pad` is off and the leftover bits are not zero
pub fn convert_bits(
    input: &[u8],
    from_bits: u32,
    to_bits: u32,
    pad: bool,
) -> Result<Vec<u8>, Malformed> {
    if !(1..=8).contains(&from_bits) || !(1..=8).contains(&to_bits) {
        return Err(Malformed::InvalidBitWidth { from_bits, to_bits });
    }

    let max_value: u32 = (1 << to_bits) - 1;
    let max_acc: u32 = (1 << (from_bits + to_bits - 1)) - 1;
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity(input.len() * from_bits as usize / to_bits as usize + 1);

    for &value in input {
        if u32::from(value) >> from_bits != 0 {
            return Err(Malformed::GroupOutOfRange {
                value,
                bits: from_bits,
            });
        }
        acc = ((acc << from_bits) | u32::from(value)) & max_acc;
        bits += from_bits;
        while bits >= to_bits {
            bits -= to_bits;
            out.push(((acc >> bits) & max_value) as u8);
        }
    }

    if pad {
        if bits > 0 {
            out.push(((acc << (to_bits - bits)) & max_value) as u8);
        }
    } else if bits > 0 && (acc << (to_bits - bits)) & max_value != 0 {
        return Err(Malformed::NonZeroPadding);
    }

    Ok(out)
}
