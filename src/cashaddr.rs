//! CashAddr text layer: prefix, charset and the 40-bit BCH checksum.
//!
//! This layer only deals in 5-bit groups. Interpreting the groups as a version
//! byte and hash is left to [`crate::resolve`].

use crate::error::CashAddrError;
use bech32::Fe32;

/// Separator between prefix and data part.
pub const SEPARATOR: char = ':';

/// Number of 5-bit groups in the checksum.
pub const CHECKSUM_LENGTH: usize = 8;

const GENERATOR: [u64; 5] = [
    0x98_f2bc_8e61,
    0x79_b76d_99e2,
    0xf3_3e5f_b3c4,
    0xae_2eab_e2a8,
    0x1e_4f43_e470,
];

/// BCH code over GF(32) used by CashAddr. Returns 0 for a valid string.
fn polymod(values: impl IntoIterator<Item = u8>) -> u64 {
    let mut c: u64 = 1;
    for d in values {
        let c0 = c >> 35;
        c = ((c & 0x07_ffff_ffff) << 5) ^ u64::from(d);
        for (i, g) in GENERATOR.iter().enumerate() {
            if (c0 >> i) & 1 != 0 {
                c ^= g;
            }
        }
    }
    c ^ 1
}

/// Low five bits of each prefix byte, then a zero separator.
fn expand_prefix(prefix: &str) -> impl Iterator<Item = u8> + '_ {
    prefix.bytes().map(|b| b & 0x1f).chain(std::iter::once(0))
}

fn create_checksum(prefix: &str, payload: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let m = polymod(
        expand_prefix(prefix)
            .chain(payload.iter().copied())
            .chain([0u8; CHECKSUM_LENGTH]),
    );
    let mut checksum = [0u8; CHECKSUM_LENGTH];
    for (i, group) in checksum.iter_mut().enumerate() {
        *group = ((m >> (5 * (CHECKSUM_LENGTH - 1 - i))) & 0x1f) as u8;
    }
    checksum
}

fn check_prefix(prefix: &str) -> Result<(), CashAddrError> {
    if prefix.is_empty() {
        return Err(CashAddrError::MissingPrefix);
    }
    match prefix.chars().find(|c| !c.is_ascii_alphanumeric()) {
        Some(c) => Err(CashAddrError::InvalidPrefixChar(c)),
        None => Ok(()),
    }
}

/// Encode 5-bit `payload` under `prefix`, appending the checksum.
///
/// # Errors
/// Returns `CashAddrError` if the prefix is empty or not alphanumeric, or if a
/// payload value is not a 5-bit group.
pub fn encode(prefix: &str, payload: &[u8]) -> Result<String, CashAddrError> {
    let prefix = prefix.to_ascii_lowercase();
    check_prefix(&prefix)?;

    let checksum = create_checksum(&prefix, payload);
    let mut s = String::with_capacity(prefix.len() + 1 + payload.len() + CHECKSUM_LENGTH);
    s.push_str(&prefix);
    s.push(SEPARATOR);
    for &group in payload.iter().chain(checksum.iter()) {
        let fe = Fe32::try_from(group).map_err(|_| CashAddrError::InvalidGroup(group))?;
        s.push(fe.to_char());
    }
    Ok(s)
}

/// Decode a CashAddr string into its lowercase prefix and 5-bit payload.
///
/// The checksum groups are verified and stripped. When `s` has no separator,
/// `default_prefix` is used for the checksum.
///
/// # Errors
/// Returns `CashAddrError` on mixed case, a bad prefix, characters outside the
/// charset, a data part no longer than the checksum, or a checksum mismatch.
pub fn decode(s: &str, default_prefix: &str) -> Result<(String, Vec<u8>), CashAddrError> {
    let has_lower = s.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = s.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(CashAddrError::MixedCase);
    }
    let s = s.to_ascii_lowercase();

    let (prefix, data) = match s.rsplit_once(SEPARATOR) {
        Some((prefix, data)) => (prefix.to_owned(), data),
        None => (default_prefix.to_ascii_lowercase(), s.as_str()),
    };
    check_prefix(&prefix)?;

    let values = data
        .chars()
        .map(|c| {
            Fe32::from_char(c)
                .map(Fe32::to_u8)
                .map_err(|_| CashAddrError::InvalidChar(c))
        })
        .collect::<Result<Vec<u8>, _>>()?;

    if values.len() <= CHECKSUM_LENGTH {
        return Err(CashAddrError::TooShort);
    }
    if polymod(expand_prefix(&prefix).chain(values.iter().copied())) != 0 {
        return Err(CashAddrError::InvalidChecksum);
    }

    let mut payload = values;
    payload.truncate(payload.len() - CHECKSUM_LENGTH);
    Ok((prefix, payload))
}
