//! Turning address strings into typed [`Address`] values.
//!
//! Legacy strings go through base58-check and the legacy version byte picks the
//! network. CashAddr strings go through the checksum layer, the payload guard
//! clauses and the version byte.

use crate::{
    address::{Address, LEGACY_HASH_LENGTH},
    bits::convert_bits,
    cashaddr,
    error::{AddressError, CashAddrError, Malformed},
    network::{NetworkParameters, Networks},
    validate::{
        check_allowed_padding, check_data_length, check_first_bit_is_zero,
        check_non_empty_payload, check_non_zero_padding, check_valid_prefix, extra_bits,
    },
    version::{AddressType, VersionByte},
};
use bech32::Fe32;
use std::sync::Arc;
use tracing::{debug, trace};

fn is_base58_char(c: char) -> bool {
    c.is_ascii_alphanumeric() && !matches!(c, '0' | 'O' | 'I' | 'l')
}

fn is_cash_addr_body(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| Fe32::from_char(c).is_ok())
}

/// Decode a base58-check legacy address.
///
/// With `network` set, the decoded version byte must be one of its legacy
/// version bytes. Without it, `networks` is scanned in order and the first
/// network accepting the version byte is used.
///
/// # Errors
/// - `AddressError::Base58` on a bad alphabet or checksum
/// - `AddressError::WrongNetwork` if `network` rejects the version byte
/// - `AddressError::NetworkNotFound` if no registered network accepts it
/// - `AddressError::LegacyHashSize` unless the hash is 20 bytes
pub fn resolve_legacy(
    networks: &Networks,
    network: Option<&Arc<NetworkParameters>>,
    s: &str,
) -> Result<Address, AddressError> {
    let data = bs58::decode(s).with_check(None).into_vec()?;
    let (&version, hash) = data.split_first().ok_or(Malformed::EmptyPayload)?;

    let params = match network {
        Some(params) => {
            if !params.is_acceptable_version(version) {
                return Err(AddressError::WrongNetwork {
                    version,
                    acceptable: params.acceptable_address_codes(),
                });
            }
            Arc::clone(params)
        }
        None => networks
            .by_legacy_version(version)
            .cloned()
            .ok_or_else(|| AddressError::NetworkNotFound(s.to_owned()))?,
    };

    if hash.len() != LEGACY_HASH_LENGTH {
        return Err(AddressError::LegacyHashSize(hash.len()));
    }

    let address_type = if version == params.p2sh_header() {
        AddressType::ScriptHash
    } else {
        AddressType::PubKeyHash
    };
    debug!(network = params.id(), version, %address_type, "resolved legacy address");
    Address::new(params, address_type, hash)
}

/// Decode a CashAddr address for `network`.
///
/// A missing prefix defaults to the network's prefix. Checks run in a fixed
/// order and the first failure is returned: prefix, non-empty payload,
/// allowed padding, zero padding, reserved bit, data length, type.
///
/// # Errors
/// - `AddressError::CashAddr` on a charset or checksum failure
/// - `AddressError::WrongPrefix` if the prefix belongs to another network
/// - `AddressError::Malformed` for any structural violation
pub fn resolve_cash_address(
    network: &Arc<NetworkParameters>,
    s: &str,
) -> Result<Address, AddressError> {
    let (prefix, payload) = cashaddr::decode(s, network.cash_addr_prefix())?;

    check_valid_prefix(network, &prefix)?;
    check_non_empty_payload(&payload)?;

    let extra = extra_bits(payload.len());
    check_allowed_padding(extra)?;

    // non-empty was checked above, so neither lookup below can fail
    let last = payload.last().copied().ok_or(Malformed::EmptyPayload)?;
    let mask = (1u8 << extra) - 1;
    check_non_zero_padding(last, mask)?;

    let data = convert_bits(&payload, 5, 8, false)?;
    let (&version, hash) = data.split_first().ok_or(Malformed::EmptyPayload)?;
    let version = VersionByte::from(version);
    check_first_bit_is_zero(version)?;
    check_data_length(hash, version.hash_size())?;

    let address_type = version.address_type()?;
    debug!(network = network.id(), %address_type, size = hash.len(), "resolved CashAddr address");
    Address::new(Arc::clone(network), address_type, hash)
}

/// Decode a CashAddr address whose network is not known up front.
///
/// A prefixed string selects the first network registered with that prefix.
/// A bare string is checked against each network's prefix in order and the
/// first one whose checksum verifies wins.
///
/// # Errors
/// Returns `AddressError::CashAddr` with `InvalidChecksum` if the checksum
/// fails under every registered prefix, `AddressError::NetworkNotFound` if a
/// prefix is unknown or the registry is empty, otherwise the errors of
/// [`resolve_cash_address`].
pub fn resolve_cash_address_any(networks: &Networks, s: &str) -> Result<Address, AddressError> {
    if let Some((prefix, _)) = s.rsplit_once(cashaddr::SEPARATOR) {
        let params = networks
            .by_prefix(prefix)
            .ok_or_else(|| AddressError::NetworkNotFound(s.to_owned()))?;
        return resolve_cash_address(params, s);
    }

    let mut checksum_failed = false;
    for params in networks.iter() {
        match resolve_cash_address(params, s) {
            Err(AddressError::CashAddr(CashAddrError::InvalidChecksum)) => {
                trace!(network = params.id(), "checksum does not match prefix");
                checksum_failed = true;
            }
            other => return other,
        }
    }

    if checksum_failed {
        return Err(CashAddrError::InvalidChecksum.into());
    }
    Err(AddressError::NetworkNotFound(s.to_owned()))
}

/// Decode an address in either format.
///
/// Strings with a `:` separator are CashAddr. Strings made only of base58
/// characters are tried as legacy first, and retried as a bare CashAddr when
/// base58-check fails and every character is in the CashAddr charset.
///
/// # Errors
/// Any error of [`resolve_legacy`], [`resolve_cash_address`] or
/// [`resolve_cash_address_any`].
pub fn resolve(
    networks: &Networks,
    network: Option<&Arc<NetworkParameters>>,
    s: &str,
) -> Result<Address, AddressError> {
    if !s.contains(cashaddr::SEPARATOR) && s.chars().all(is_base58_char) {
        match resolve_legacy(networks, network, s) {
            Err(AddressError::Base58(e)) if is_cash_addr_body(s) => {
                trace!(error = %e, "not base58-check, trying CashAddr");
            }
            other => return other,
        }
    }

    match network {
        Some(params) => resolve_cash_address(params, s),
        None => resolve_cash_address_any(networks, s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::HASH_SIZES;
    use proptest::prelude::*;

    const LEGACY_P2PKH: &str = "1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu";
    const LEGACY_P2SH: &str = "3CWFddi6m4ndiGyKqzYvsFYagqDLPVMTzC";
    const CASH_P2PKH: &str = "bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a";
    const HASH: &str = "76a04053bda0a88bda5177b86a15c3b29f559873";

    fn mainnet() -> Arc<NetworkParameters> {
        Arc::new(NetworkParameters::mainnet())
    }

    /// CashAddr string for raw payload bytes, bypassing `Address` validation.
    fn encode_raw(prefix: &str, bytes: &[u8]) -> String {
        cashaddr::encode(prefix, &convert_bits(bytes, 8, 5, true).unwrap()).unwrap()
    }

    fn raw_groups(bytes: &[u8]) -> Vec<u8> {
        convert_bits(bytes, 8, 5, true).unwrap()
    }

    fn with_version(version: u8, hash_len: usize) -> Vec<u8> {
        let mut v = vec![version];
        v.extend(std::iter::repeat_n(0xAB, hash_len));
        v
    }

    #[test]
    fn legacy_with_explicit_network() {
        let networks = Networks::default();
        let main = networks.by_id("main").unwrap();
        let addr = resolve_legacy(&networks, Some(main), LEGACY_P2PKH).unwrap();
        assert_eq!(addr.address_type(), AddressType::PubKeyHash);
        assert_eq!(addr.hash_hex(), HASH);
        assert!(Arc::ptr_eq(addr.network(), main));

        let addr = resolve_legacy(&networks, Some(main), LEGACY_P2SH).unwrap();
        assert_eq!(addr.address_type(), AddressType::ScriptHash);
        assert_eq!(addr.hash_hex(), HASH);
    }

    #[test]
    fn legacy_wrong_network_carries_acceptable_codes() {
        let networks = Networks::default();
        let test = networks.by_id("test").unwrap();
        assert_eq!(
            resolve_legacy(&networks, Some(test), LEGACY_P2PKH),
            Err(AddressError::WrongNetwork {
                version: 0x00,
                acceptable: vec![0x6f, 0xc4],
            })
        );
    }

    #[test]
    fn legacy_without_network_takes_first_accepting_network() {
        let mut networks = Networks::new();
        networks.register(NetworkParameters::new("other", "other", 0x30, 0x32));
        let second = networks.register(NetworkParameters::new("second", "second", 0x00, 0x05));
        networks.register(NetworkParameters::new("third", "third", 0x00, 0x05));

        let addr = resolve_legacy(&networks, None, LEGACY_P2PKH).unwrap();
        assert!(Arc::ptr_eq(addr.network(), &second));
        assert_eq!(addr.network().id(), "second");
    }

    #[test]
    fn legacy_without_matching_network() {
        let networks: Networks = [NetworkParameters::testnet()].into_iter().collect();
        assert_eq!(
            resolve_legacy(&networks, None, LEGACY_P2PKH),
            Err(AddressError::NetworkNotFound(LEGACY_P2PKH.to_owned()))
        );
    }

    #[test]
    fn legacy_rejects_bad_checksum_and_short_hash() {
        let networks = Networks::default();
        let bad = LEGACY_P2PKH.replace('u', "v");
        assert!(matches!(
            resolve_legacy(&networks, None, &bad),
            Err(AddressError::Base58(_))
        ));

        let mut short = vec![0x00];
        short.extend([1u8; 19]);
        let short = bs58::encode(short).with_check().into_string();
        assert_eq!(
            resolve_legacy(&networks, None, &short),
            Err(AddressError::LegacyHashSize(19))
        );
    }

    #[test]
    fn cash_address_known_vector() {
        let main = mainnet();
        let addr = resolve_cash_address(&main, CASH_P2PKH).unwrap();
        assert_eq!(addr.address_type(), AddressType::PubKeyHash);
        assert_eq!(addr.hash_hex(), HASH);
        assert_eq!(addr.to_legacy().unwrap(), LEGACY_P2PKH);

        // bare and uppercase forms decode to the same address
        let bare = CASH_P2PKH.split_once(':').unwrap().1;
        assert_eq!(resolve_cash_address(&main, bare).unwrap(), addr);
        assert_eq!(
            resolve_cash_address(&main, &CASH_P2PKH.to_ascii_uppercase()).unwrap(),
            addr
        );
    }

    #[test]
    fn cash_address_decodes_documented_version_bytes() {
        let main = mainnet();
        let addr = resolve_cash_address(&main, &encode_raw("bitcoincash", &with_version(0x08, 20)))
            .unwrap();
        assert_eq!(addr.address_type(), AddressType::ScriptHash);
        assert_eq!(addr.hash().len(), 20);

        let addr = resolve_cash_address(&main, &encode_raw("bitcoincash", &with_version(0x04, 40)))
            .unwrap();
        assert_eq!(addr.address_type(), AddressType::PubKeyHash);
        assert_eq!(addr.hash().len(), 40);
    }

    #[test]
    fn prefix_check_comes_first() {
        // reserved bit set as well
        let s = encode_raw("bchtest", &with_version(0x80, 20));
        assert!(matches!(
            resolve_cash_address(&mainnet(), &s),
            Err(AddressError::WrongPrefix { .. })
        ));
    }

    #[test]
    fn padding_checks_come_before_version_checks() {
        let mut groups = raw_groups(&with_version(0x80, 20));
        assert_eq!(groups.len(), 34);

        let mut too_long = groups.clone();
        too_long.push(0);
        let s = cashaddr::encode("bitcoincash", &too_long).unwrap();
        assert_eq!(
            resolve_cash_address(&mainnet(), &s),
            Err(AddressError::Malformed(Malformed::InvalidPadding { extra_bits: 7 }))
        );

        if let Some(last) = groups.last_mut() {
            *last |= 1;
        }
        let s = cashaddr::encode("bitcoincash", &groups).unwrap();
        assert_eq!(
            resolve_cash_address(&mainnet(), &s),
            Err(AddressError::Malformed(Malformed::NonZeroPadding))
        );
    }

    #[test]
    fn reserved_bit_comes_before_length_and_type() {
        // 0x80 also has an unknown type selector and the hash is too long
        let s = encode_raw("bitcoincash", &with_version(0x80, 24));
        assert_eq!(
            resolve_cash_address(&mainnet(), &s),
            Err(AddressError::Malformed(Malformed::ReservedBitSet(0x80)))
        );
    }

    #[test]
    fn length_comes_before_type() {
        // type selector 2 is unknown, 24 bytes does not match size selector 0
        let s = encode_raw("bitcoincash", &with_version(0x10, 24));
        assert_eq!(
            resolve_cash_address(&mainnet(), &s),
            Err(AddressError::Malformed(Malformed::InvalidDataLength {
                got: 24,
                expected: 20
            }))
        );

        let s = encode_raw("bitcoincash", &with_version(0x10, 20));
        assert_eq!(
            resolve_cash_address(&mainnet(), &s),
            Err(AddressError::Malformed(Malformed::UnknownType(0x10)))
        );
    }

    #[test]
    fn resolve_detects_format() {
        let networks = Networks::default();

        let legacy = resolve(&networks, None, LEGACY_P2PKH).unwrap();
        let cash = resolve(&networks, None, CASH_P2PKH).unwrap();
        let bare = resolve(&networks, None, CASH_P2PKH.split_once(':').unwrap().1).unwrap();
        assert_eq!(legacy, cash);
        assert_eq!(cash, bare);
        assert_eq!(cash.network().id(), "main");
    }

    #[test]
    fn resolve_finds_network_by_prefix() {
        let networks = Networks::default();
        let hash = [0x11u8; 20];
        let regtest = networks.by_id("regtest").unwrap();
        let s = Address::new(Arc::clone(regtest), AddressType::ScriptHash, hash)
            .unwrap()
            .to_cash_address()
            .unwrap();
        assert!(s.starts_with("bchreg:p"));

        let addr = resolve(&networks, None, &s).unwrap();
        assert!(Arc::ptr_eq(addr.network(), regtest));

        let bare = s.split_once(':').unwrap().1;
        let addr = resolve(&networks, None, bare).unwrap();
        assert_eq!(addr.network().id(), "regtest");
    }

    #[test]
    fn resolve_reports_unknown_prefix() {
        let networks = Networks::default();
        let s = encode_raw("prefix", &with_version(0x00, 20));
        assert_eq!(
            resolve(&networks, None, &s),
            Err(AddressError::NetworkNotFound(s.clone()))
        );
    }

    #[test]
    fn bare_cash_address_typo_reports_checksum() {
        let networks = Networks::default();
        let body = CASH_P2PKH.split_once(':').unwrap().1;
        // last character swapped inside the CashAddr charset
        let typo = format!("{}q", &body[..body.len() - 1]);

        assert_eq!(
            resolve_cash_address_any(&networks, &typo),
            Err(AddressError::CashAddr(CashAddrError::InvalidChecksum))
        );
        assert_eq!(
            resolve(&networks, None, &typo),
            Err(AddressError::CashAddr(CashAddrError::InvalidChecksum))
        );
        assert_eq!(
            resolve_cash_address_any(&Networks::new(), &typo),
            Err(AddressError::NetworkNotFound(typo.clone()))
        );
    }

    #[test]
    fn resolve_keeps_base58_error_for_non_cashaddr_text() {
        let networks = Networks::default();
        // 'B' and '1' are not in the CashAddr charset
        let bad = LEGACY_P2PKH.replace('u', "v");
        assert!(matches!(
            resolve(&networks, None, &bad),
            Err(AddressError::Base58(_))
        ));
    }

    proptest! {
        #[test]
        fn every_type_and_size_round_trips(
            script in any::<bool>(),
            hash in proptest::sample::select(HASH_SIZES.to_vec())
                .prop_flat_map(|size| proptest::collection::vec(any::<u8>(), size)),
        ) {
            let main = mainnet();
            let kind = if script { AddressType::ScriptHash } else { AddressType::PubKeyHash };
            let addr = Address::new(Arc::clone(&main), kind, hash.clone()).unwrap();
            let decoded = resolve_cash_address(&main, &addr.to_cash_address().unwrap()).unwrap();
            prop_assert_eq!(decoded.address_type(), kind);
            prop_assert_eq!(decoded.hash(), hash.as_slice());
        }

        #[test]
        fn reserved_bit_is_always_malformed(low in 0u8..0x80) {
            let version = low | 0x80;
            let size = VersionByte::from(version).hash_size();
            let s = encode_raw("bitcoincash", &with_version(version, size));
            prop_assert_eq!(
                resolve_cash_address(&mainnet(), &s),
                Err(AddressError::Malformed(Malformed::ReservedBitSet(version)))
            );
        }
    }
}
