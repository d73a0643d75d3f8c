//! Public entry points for building addresses.

use crate::{
    address::{Address, Hasher},
    error::AddressError,
    network::{NetworkParameters, Networks},
    resolve::{resolve, resolve_cash_address, resolve_legacy},
    script::Script,
    version::AddressType,
};
use std::sync::Arc;

/// Builds [`Address`] values from hashes, scripts, keys and strings.
///
/// The factory holds nothing but a shared reference to the network registry,
/// so one instance can serve any number of callers.
#[derive(Debug, Clone, Copy)]
pub struct AddressFactory<'a> {
    networks: &'a Networks,
}

impl<'a> AddressFactory<'a> {
    /// Factory resolving against `networks`.
    #[must_use]
    pub fn new(networks: &'a Networks) -> Self {
        AddressFactory { networks }
    }

    /// Registry consulted when no network is given.
    #[must_use]
    pub fn networks(&self) -> &'a Networks {
        self.networks
    }

    /// Address of `address_type` for a raw hash on `network`.
    ///
    /// # Errors
    /// Returns `AddressError::Malformed` if the hash length has no size selector.
    pub fn from_hash(
        &self,
        network: &Arc<NetworkParameters>,
        address_type: AddressType,
        hash: &[u8],
    ) -> Result<Address, AddressError> {
        Address::new(Arc::clone(network), address_type, hash)
    }

    /// P2SH address for a pay-to-script-hash output script.
    ///
    /// # Errors
    /// Returns [`AddressError::InvalidScript`] for any other script.
    pub fn from_script(
        &self,
        network: &Arc<NetworkParameters>,
        script: &Script,
    ) -> Result<Address, AddressError> {
        if !script.is_pay_to_script_hash() {
            return Err(AddressError::InvalidScript);
        }
        let hash = script.hash().ok_or(AddressError::InvalidScript)?;
        self.from_hash(network, AddressType::ScriptHash, hash)
    }

    /// P2PKH address for a serialized public key.
    ///
    /// # Errors
    /// Never fails in practice; HASH160 always has a supported length.
    pub fn from_pubkey(
        &self,
        network: &Arc<NetworkParameters>,
        pubkey: &[u8],
    ) -> Result<Address, AddressError> {
        self.from_hash(network, AddressType::PubKeyHash, &Hasher::hash160(pubkey))
    }

    /// Parse a base58-check legacy address.
    ///
    /// # Errors
    /// See [`resolve_legacy`].
    pub fn from_legacy(
        &self,
        network: Option<&Arc<NetworkParameters>>,
        s: &str,
    ) -> Result<Address, AddressError> {
        resolve_legacy(self.networks, network, s)
    }

    /// Parse a CashAddr address for `network`.
    ///
    /// # Errors
    /// See [`resolve_cash_address`].
    pub fn from_cash_address(
        &self,
        network: &Arc<NetworkParameters>,
        s: &str,
    ) -> Result<Address, AddressError> {
        resolve_cash_address(network, s)
    }

    /// Parse an address in either format.
    ///
    /// # Errors
    /// See [`resolve`].
    pub fn parse(
        &self,
        network: Option<&Arc<NetworkParameters>>,
        s: &str,
    ) -> Result<Address, AddressError> {
        resolve(self.networks, network, s)
    }
}
