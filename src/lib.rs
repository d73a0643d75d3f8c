//! A CashAddr and legacy base58-check address decoder/encoder for Bitcoin Cash.
//!
//! This crate supports:
//! - CashAddr addresses with any of the eight hash sizes the version byte can express.
//! - Legacy base58-check addresses, resolved against an ordered network registry.
//! - P2PKH and P2SH address types.
//! - Full encode/decode round-trip with the CashAddr BCH checksum.
//!
//! ```
//! use cash_address::{AddressFactory, AddressType, Networks};
//!
//! let networks = Networks::default();
//! let factory = AddressFactory::new(&networks);
//!
//! let addr = factory
//!     .parse(None, "bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a")
//!     .unwrap();
//! assert_eq!(addr.address_type(), AddressType::PubKeyHash);
//! assert_eq!(addr.network().id(), "main");
//! assert_eq!(addr.to_legacy().unwrap(), "1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu");
//! ```

pub mod address;
pub mod bits;
pub mod cashaddr;
pub mod error;
pub mod factory;
pub mod network;
pub mod resolve;
pub mod script;
pub mod validate;
pub mod version;

pub use address::{Address, Hasher};
pub use error::{AddressError, CashAddrError, Malformed};
pub use factory::AddressFactory;
pub use network::{NetworkParameters, Networks};
pub use script::{Script, ScriptType};
pub use version::{AddressType, HASH_SIZES, VersionByte};
