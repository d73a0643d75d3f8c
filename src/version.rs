//! The CashAddr version byte.
//!
//! A version byte packs three fields:
//!
//! ```text
//!   bit  7    reserved, always 0
//!   bits 6-3  type selector (0 = P2PKH, 1 = P2SH)
//!   bits 2-0  size selector (index into HASH_SIZES)
//! ```

use crate::error::Malformed;
use std::fmt;

/// Hash sizes in bytes, indexed by size selector.
///
/// Selectors `0..=3` give `20 + 4 * n`, and bit 2 doubles that base.
pub const HASH_SIZES: [usize; 8] = [20, 24, 28, 32, 40, 48, 56, 64];

const RESERVED_BIT: u8 = 0x80;
const TYPE_SHIFT: u8 = 3;
const TYPE_MASK: u8 = 0x1F;
const SIZE_MASK: u8 = 0x07;

/// Kind of hash an address commits to.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum AddressType {
    /// Pay to public key hash
    PubKeyHash,
    /// Pay to script hash
    ScriptHash,
}

impl AddressType {
    /// Type selector stored in bits 6-3 of the version byte.
    #[must_use]
    pub fn selector(self) -> u8 {
        match self {
            AddressType::PubKeyHash => 0,
            AddressType::ScriptHash => 1,
        }
    }

    /// Reverse lookup from type selector to enum.
    #[must_use]
    pub fn from_selector(selector: u8) -> Option<AddressType> {
        match selector {
            0 => Some(AddressType::PubKeyHash),
            1 => Some(AddressType::ScriptHash),
            _ => None,
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressType::PubKeyHash => f.write_str("P2PKH"),
            AddressType::ScriptHash => f.write_str("P2SH"),
        }
    }
}

/// A raw CashAddr version byte.
///
/// Any byte can be wrapped; the accessors report whether its fields are valid.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct VersionByte(u8);

impl VersionByte {
    /// Pack an address type and hash size into a version byte.
    ///
    /// # Errors
    /// Returns [`Malformed::UnsupportedHashSize`] if `hash_size` is not in [`HASH_SIZES`].
    pub fn new(address_type: AddressType, hash_size: usize) -> Result<Self, Malformed> {
        let size_selector = HASH_SIZES
            .iter()
            .position(|&size| size == hash_size)
            .ok_or(Malformed::UnsupportedHashSize(hash_size))?;

        Ok(VersionByte(
            (address_type.selector() << TYPE_SHIFT) | size_selector as u8,
        ))
    }

    /// The byte as stored in the payload.
    #[must_use]
    pub fn to_u8(self) -> u8 {
        self.0
    }

    /// Whether the reserved top bit is set.
    #[must_use]
    pub fn has_reserved_bit(self) -> bool {
        self.0 & RESERVED_BIT != 0
    }

    /// Address type from bits 6-3.
    ///
    /// # Errors
    /// Returns [`Malformed::UnknownType`] for any selector other than 0 or 1.
    pub fn address_type(self) -> Result<AddressType, Malformed> {
        AddressType::from_selector((self.0 >> TYPE_SHIFT) & TYPE_MASK)
            .ok_or(Malformed::UnknownType(self.0))
    }

    /// Expected hash size in bytes from bits 2-0.
    #[must_use]
    pub fn hash_size(self) -> usize {
        HASH_SIZES[usize::from(self.0 & SIZE_MASK)]
    }
}

impl From<u8> for VersionByte {
    fn from(byte: u8) -> Self {
        VersionByte(byte)
    }
}

impl From<VersionByte> for u8 {
    fn from(version: VersionByte) -> Self {
        version.0
    }
}
