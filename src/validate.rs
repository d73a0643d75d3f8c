//! Guard clauses applied to a checksum-verified CashAddr payload.
//!
//! Each check is an independent predicate. [`crate::resolve::resolve_cash_address`]
//! runs them in a fixed order and stops at the first failure.

use crate::{
    error::{AddressError, Malformed},
    network::NetworkParameters,
    version::VersionByte,
};

/// The prefix must be the network's CashAddr prefix, ignoring case.
///
/// # Errors
/// Returns [`AddressError::WrongPrefix`] on mismatch.
pub fn check_valid_prefix(network: &NetworkParameters, prefix: &str) -> Result<(), AddressError> {
    if !network.cash_addr_prefix().eq_ignore_ascii_case(prefix) {
        return Err(AddressError::WrongPrefix {
            expected: network.cash_addr_prefix().to_owned(),
            found: prefix.to_owned(),
        });
    }
    Ok(())
}

/// Require at least one 5-bit group after the checksum is stripped.
///
/// # Errors
/// Returns [`Malformed::EmptyPayload`] if there are no 5-bit groups.
pub fn check_non_empty_payload(payload: &[u8]) -> Result<(), Malformed> {
    if payload.is_empty() {
        return Err(Malformed::EmptyPayload);
    }
    Ok(())
}

/// Number of padding bits left after repacking `group_count` 5-bit groups to bytes.
#[must_use]
pub fn extra_bits(group_count: usize) -> u8 {
    (group_count * 5 % 8) as u8
}

/// Less than one whole group may be padding.
///
/// # Errors
/// Returns [`Malformed::InvalidPadding`] if `extra_bits >= 5`.
pub fn check_allowed_padding(extra_bits: u8) -> Result<(), Malformed> {
    if extra_bits >= 5 {
        return Err(Malformed::InvalidPadding { extra_bits });
    }
    Ok(())
}

/// Padding bits of the last group, selected by `mask`, must be zero.
///
/// # Errors
/// Returns [`Malformed::NonZeroPadding`] otherwise.
pub fn check_non_zero_padding(last_group: u8, mask: u8) -> Result<(), Malformed> {
    if last_group & mask != 0 {
        return Err(Malformed::NonZeroPadding);
    }
    Ok(())
}

/// Require the reserved bit 7 of the version byte to be clear.
///
/// # Errors
/// Returns [`Malformed::ReservedBitSet`] if bit 7 of the version byte is set.
pub fn check_first_bit_is_zero(version: VersionByte) -> Result<(), Malformed> {
    if version.has_reserved_bit() {
        return Err(Malformed::ReservedBitSet(version.to_u8()));
    }
    Ok(())
}

/// The hash (version byte excluded) must have exactly the size its tag declares.
///
/// # Errors
/// Returns [`Malformed::InvalidDataLength`] on mismatch.
pub fn check_data_length(hash: &[u8], expected_hash_size: usize) -> Result<(), Malformed> {
    if hash.len() != expected_hash_size {
        return Err(Malformed::InvalidDataLength {
            got: hash.len(),
            expected: expected_hash_size,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_comparison_ignores_case() {
        let main = NetworkParameters::mainnet();
        assert!(check_valid_prefix(&main, "BitcoinCash").is_ok());
        assert_eq!(
            check_valid_prefix(&main, "bchtest"),
            Err(AddressError::WrongPrefix {
                expected: "bitcoincash".to_owned(),
                found: "bchtest".to_owned(),
            })
        );
    }

    #[test]
    fn padding_rules() {
        // 34 groups = 170 bits -> 2 padding bits
        assert_eq!(extra_bits(34), 2);
        assert!(check_allowed_padding(extra_bits(34)).is_ok());
        // 1 group = 5 bits, all padding
        assert_eq!(
            check_allowed_padding(extra_bits(1)),
            Err(Malformed::InvalidPadding { extra_bits: 5 })
        );
        assert!(check_non_zero_padding(0b11100, 0b11).is_ok());
        assert_eq!(
            check_non_zero_padding(0b11101, 0b11),
            Err(Malformed::NonZeroPadding)
        );
        // no extra bits means an empty mask
        assert!(check_non_zero_padding(0b11111, 0).is_ok());
    }

    #[test]
    fn reserved_bit_and_length() {
        assert!(check_first_bit_is_zero(VersionByte::from(0x7F)).is_ok());
        assert_eq!(
            check_first_bit_is_zero(VersionByte::from(0x80)),
            Err(Malformed::ReservedBitSet(0x80))
        );
        assert!(check_data_length(&[0u8; 20], 20).is_ok());
        assert_eq!(
            check_data_length(&[0u8; 24], 20),
            Err(Malformed::InvalidDataLength {
                got: 24,
                expected: 20
            })
        );
        assert_eq!(check_non_empty_payload(&[]), Err(Malformed::EmptyPayload));
    }
}
