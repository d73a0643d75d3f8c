//! The typed address value and its string renderings.

use crate::{
    bits::convert_bits,
    cashaddr,
    error::{AddressError, Malformed},
    network::NetworkParameters,
    script::Script,
    version::{AddressType, VersionByte},
};
use hex::encode as hex_encode;
use ripemd::Ripemd160;
use sha2::{Digest as ShaDigest, Sha256};
use std::fmt;
use std::sync::Arc;

/// Length of the hash carried by legacy addresses and standard scripts.
pub const LEGACY_HASH_LENGTH: usize = 20;

/// `RIPEMD160(SHA256(x))`, the hash behind P2PKH and P2SH outputs.
pub struct Hasher;

impl Hasher {
    /// HASH160 digest length (bytes).
    pub const DIGEST_LENGTH: usize = 20;

    /// Compute RIPEMD160(SHA256(data)).
    #[must_use]
    pub fn hash160(data: &[u8]) -> [u8; Self::DIGEST_LENGTH] {
        let sha = Sha256::digest(data);
        let mut out = [0u8; Self::DIGEST_LENGTH];
        out.copy_from_slice(&Ripemd160::digest(sha));
        out
    }
}

/// An address bound to a network.
///
/// The hash length is always one of the sizes a CashAddr version byte can
/// express.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    network: Arc<NetworkParameters>,
    address_type: AddressType,
    hash: Vec<u8>,
}

impl Address {
    /// Bind a hash of the given type to a network.
    ///
    /// # Errors
    /// Returns [`Malformed::UnsupportedHashSize`] if the hash length has no size selector.
    pub fn new(
        network: Arc<NetworkParameters>,
        address_type: AddressType,
        hash: impl Into<Vec<u8>>,
    ) -> Result<Self, AddressError> {
        let hash = hash.into();
        VersionByte::new(address_type, hash.len())?;
        Ok(Address {
            network,
            address_type,
            hash,
        })
    }

    /// The network this address belongs to.
    #[must_use]
    pub fn network(&self) -> &Arc<NetworkParameters> {
        &self.network
    }

    /// Whether the address pays to a key hash or a script hash.
    #[must_use]
    pub fn address_type(&self) -> AddressType {
        self.address_type
    }

    /// The raw hash bytes
    #[must_use]
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    /// The hex representation of the hash
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hex_encode(&self.hash)
    }

    /// CashAddr version byte for this address.
    ///
    /// # Errors
    /// Never fails for an `Address` built through [`Address::new`]; kept fallible
    /// so the size lookup has a single implementation.
    pub fn version_byte(&self) -> Result<VersionByte, Malformed> {
        VersionByte::new(self.address_type, self.hash.len())
    }

    /// Legacy base58 version byte for this address on its network.
    #[must_use]
    pub fn legacy_version(&self) -> u8 {
        match self.address_type {
            AddressType::PubKeyHash => self.network.address_header(),
            AddressType::ScriptHash => self.network.p2sh_header(),
        }
    }

    fn cash_addr_payload(&self) -> Result<Vec<u8>, AddressError> {
        let mut data = Vec::with_capacity(1 + self.hash.len());
        data.push(self.version_byte()?.to_u8());
        data.extend(&self.hash);
        Ok(convert_bits(&data, 8, 5, true)?)
    }

    /// `prefix:payload` CashAddr string.
    ///
    /// # Errors
    /// Returns `AddressError::CashAddr` if the network prefix cannot be encoded.
    pub fn to_cash_address(&self) -> Result<String, AddressError> {
        let payload = self.cash_addr_payload()?;
        Ok(cashaddr::encode(self.network.cash_addr_prefix(), &payload)?)
    }

    /// CashAddr string without the `prefix:` part.
    ///
    /// # Errors
    /// Same as [`Address::to_cash_address`].
    pub fn to_cash_address_without_prefix(&self) -> Result<String, AddressError> {
        let s = self.to_cash_address()?;
        match s.split_once(cashaddr::SEPARATOR) {
            Some((_, body)) => Ok(body.to_owned()),
            None => Ok(s),
        }
    }

    /// Base58-check legacy string.
    ///
    /// # Errors
    /// Returns [`AddressError::LegacyHashSize`] unless the hash is 20 bytes.
    pub fn to_legacy(&self) -> Result<String, AddressError> {
        if self.hash.len() != LEGACY_HASH_LENGTH {
            return Err(AddressError::LegacyHashSize(self.hash.len()));
        }
        let mut payload = Vec::with_capacity(1 + self.hash.len());
        payload.push(self.legacy_version());
        payload.extend(&self.hash);
        Ok(bs58::encode(payload).with_check().into_string())
    }

    /// Output script paying to this address.
    ///
    /// # Errors
    /// Returns [`AddressError::LegacyHashSize`] unless the hash is 20 bytes.
    pub fn script_pubkey(&self) -> Result<Script, AddressError> {
        let hash: &[u8; LEGACY_HASH_LENGTH] = self
            .hash
            .as_slice()
            .try_into()
            .map_err(|_| AddressError::LegacyHashSize(self.hash.len()))?;
        Ok(match self.address_type {
            AddressType::PubKeyHash => Script::p2pkh(hash),
            AddressType::ScriptHash => Script::p2sh(hash),
        })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // map any encode error to fmt::Error
        let s = self.to_cash_address().map_err(|_| fmt::Error)?;
        write!(f, "{s}")
    }
}
