//! Error types for address decoding and encoding.

use thiserror::Error;

/// Structural violations found in an address payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Malformed {
    /// The checksummed payload carried no 5-bit groups
    #[error("empty payload")]
    EmptyPayload,

    /// Repacking would need a whole group or more of padding
    #[error("invalid padding: {extra_bits} extra bits")]
    InvalidPadding { extra_bits: u8 },

    /// Padding bits in the last group were not zero
    #[error("non-zero padding bits")]
    NonZeroPadding,

    /// Bit 7 of the version byte is reserved
    #[error("reserved bit set in version byte 0x{0:02X}")]
    ReservedBitSet(u8),

    /// Hash length disagrees with the size tag of the version byte
    #[error("invalid data length: got {got}, expected {expected}")]
    InvalidDataLength { got: usize, expected: usize },

    /// Type selector of the version byte is not a known address type
    #[error("unknown address type in version byte 0x{0:02X}")]
    UnknownType(u8),

    /// Hash length cannot be expressed by a size selector
    #[error("unsupported hash size: {0}")]
    UnsupportedHashSize(usize),

    /// Group widths must be between 1 and 8 bits
    #[error("unsupported bit widths: from {from_bits} to {to_bits}")]
    InvalidBitWidth { from_bits: u32, to_bits: u32 },

    /// An input group does not fit in the declared bit width
    #[error("value {value} does not fit in {bits} bits")]
    GroupOutOfRange { value: u8, bits: u32 },
}

/// Errors from the CashAddr charset and checksum layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CashAddrError {
    /// Upper and lower case characters mixed in one string
    #[error("mixed-case address")]
    MixedCase,

    /// No prefix in the string and none supplied by the caller
    #[error("missing prefix")]
    MissingPrefix,

    /// Prefix may only contain ASCII letters and digits
    #[error("invalid prefix character {0:?}")]
    InvalidPrefixChar(char),

    /// Character outside the CashAddr charset
    #[error("invalid character {0:?}")]
    InvalidChar(char),

    /// Data part shorter than the checksum
    #[error("data part too short")]
    TooShort,

    /// Polymod over prefix, payload and checksum was not zero
    #[error("invalid checksum")]
    InvalidChecksum,

    /// A payload group is not a 5-bit value
    #[error("invalid 5-bit group 0x{0:02X}")]
    InvalidGroup(u8),
}

/// Errors that can occur while building, parsing or rendering an address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Structurally invalid payload
    #[error("malformed address: {0}")]
    Malformed(#[from] Malformed),

    /// Invalid CashAddr structure or checksum
    #[error("CashAddr error: {0}")]
    CashAddr(#[from] CashAddrError),

    /// Invalid base58 alphabet or checksum
    #[error("Base58 error: {0}")]
    Base58(#[from] bs58::decode::Error),

    /// CashAddr prefix belongs to another network
    #[error("wrong prefix: expected {expected:?}, found {found:?}")]
    WrongPrefix { expected: String, found: String },

    /// Legacy version byte is valid but not for the requested network
    #[error("version 0x{version:02X} is not acceptable, expected one of {acceptable:02X?}")]
    WrongNetwork { version: u8, acceptable: Vec<u8> },

    /// No registered network accepts the address
    #[error("no network found for {0}")]
    NetworkNotFound(String),

    /// Script is not pay-to-script-hash
    #[error("not a P2SH script")]
    InvalidScript,

    /// Legacy addresses only carry 20-byte hashes
    #[error("legacy addresses need a 20-byte hash, got {0}")]
    LegacyHashSize(usize),
}
