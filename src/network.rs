//! Network parameters and the ordered registry used to resolve addresses.

use std::sync::Arc;

/// Address encoding parameters of one network.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetworkParameters {
    id: String,
    cash_addr_prefix: String,
    address_header: u8,
    p2sh_header: u8,
}

impl NetworkParameters {
    /// Describe a network by its id, CashAddr prefix and legacy version bytes.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        cash_addr_prefix: impl Into<String>,
        address_header: u8,
        p2sh_header: u8,
    ) -> Self {
        NetworkParameters {
            id: id.into(),
            cash_addr_prefix: cash_addr_prefix.into().to_ascii_lowercase(),
            address_header,
            p2sh_header,
        }
    }

    /// Bitcoin Cash mainnet: `bitcoincash`, `0x00`, `0x05`.
    #[must_use]
    pub fn mainnet() -> Self {
        Self::new("main", "bitcoincash", 0x00, 0x05)
    }

    /// Bitcoin Cash testnet: `bchtest`, `0x6f`, `0xc4`.
    #[must_use]
    pub fn testnet() -> Self {
        Self::new("test", "bchtest", 0x6f, 0xc4)
    }

    /// Bitcoin Cash regtest: `bchreg`, `0x6f`, `0xc4`.
    #[must_use]
    pub fn regtest() -> Self {
        Self::new("regtest", "bchreg", 0x6f, 0xc4)
    }

    /// Short network name.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Lowercase CashAddr prefix.
    #[must_use]
    pub fn cash_addr_prefix(&self) -> &str {
        &self.cash_addr_prefix
    }

    /// Legacy P2PKH version byte.
    #[must_use]
    pub fn address_header(&self) -> u8 {
        self.address_header
    }

    /// Legacy P2SH version byte.
    #[must_use]
    pub fn p2sh_header(&self) -> u8 {
        self.p2sh_header
    }

    /// Legacy version bytes this network accepts.
    #[must_use]
    pub fn acceptable_address_codes(&self) -> Vec<u8> {
        vec![self.address_header, self.p2sh_header]
    }

    /// Whether a legacy version byte belongs to this network.
    #[must_use]
    pub fn is_acceptable_version(&self, version: u8) -> bool {
        version == self.address_header || version == self.p2sh_header
    }
}

/// An ordered registry of networks.
///
/// Lookups walk the registry in registration order and the first match wins.
#[derive(Debug, Clone)]
pub struct Networks(Vec<Arc<NetworkParameters>>);

impl Networks {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Networks(Vec::new())
    }

    /// Append a network and return the shared handle stored in the registry.
    pub fn register(&mut self, params: NetworkParameters) -> Arc<NetworkParameters> {
        let params = Arc::new(params);
        self.0.push(Arc::clone(&params));
        params
    }

    /// Networks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<NetworkParameters>> {
        self.0.iter()
    }

    /// Number of registered networks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no network is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First network with the given id.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&Arc<NetworkParameters>> {
        self.iter().find(|p| p.id() == id)
    }

    /// First network whose CashAddr prefix matches, ignoring case.
    #[must_use]
    pub fn by_prefix(&self, prefix: &str) -> Option<&Arc<NetworkParameters>> {
        self.iter()
            .find(|p| p.cash_addr_prefix().eq_ignore_ascii_case(prefix))
    }

    /// First network that accepts a legacy version byte.
    #[must_use]
    pub fn by_legacy_version(&self, version: u8) -> Option<&Arc<NetworkParameters>> {
        self.iter().find(|p| p.is_acceptable_version(version))
    }
}

/// Mainnet, testnet and regtest, in that order.
impl Default for Networks {
    fn default() -> Self {
        let mut networks = Networks::new();
        networks.register(NetworkParameters::mainnet());
        networks.register(NetworkParameters::testnet());
        networks.register(NetworkParameters::regtest());
        networks
    }
}

impl FromIterator<NetworkParameters> for Networks {
    fn from_iter<I: IntoIterator<Item = NetworkParameters>>(iter: I) -> Self {
        Networks(iter.into_iter().map(Arc::new).collect())
    }
}
