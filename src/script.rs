//! Output scripts for the two address types.

const OP_DUP: u8 = 0x76;
const OP_HASH160: u8 = 0xa9;
const OP_EQUAL: u8 = 0x87;
const OP_EQUALVERIFY: u8 = 0x88;
const OP_CHECKSIG: u8 = 0xac;
const PUSH_20: u8 = 0x14;

/// Standard output script shapes.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ScriptType {
    /// `OP_DUP OP_HASH160 <20> OP_EQUALVERIFY OP_CHECKSIG`
    PubKeyHash,
    /// `OP_HASH160 <20> OP_EQUAL`
    ScriptHash,
    /// Anything else
    NonStandard,
}

/// A serialized output script.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Script(Vec<u8>);

impl Script {
    /// `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG`
    #[must_use]
    pub fn p2pkh(hash: &[u8; 20]) -> Self {
        let mut v = Vec::with_capacity(25);
        v.extend([OP_DUP, OP_HASH160, PUSH_20]);
        v.extend(hash);
        v.extend([OP_EQUALVERIFY, OP_CHECKSIG]);
        Script(v)
    }

    /// `OP_HASH160 <hash> OP_EQUAL`
    #[must_use]
    pub fn p2sh(hash: &[u8; 20]) -> Self {
        let mut v = Vec::with_capacity(23);
        v.extend([OP_HASH160, PUSH_20]);
        v.extend(hash);
        v.push(OP_EQUAL);
        Script(v)
    }

    /// Raw script bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Classify the script by its opcodes.
    #[must_use]
    pub fn determine_type(&self) -> ScriptType {
        match self.0.as_slice() {
            [OP_DUP, OP_HASH160, PUSH_20, .., OP_EQUALVERIFY, OP_CHECKSIG] if self.0.len() == 25 => {
                ScriptType::PubKeyHash
            }
            [OP_HASH160, PUSH_20, .., OP_EQUAL] if self.0.len() == 23 => ScriptType::ScriptHash,
            _ => ScriptType::NonStandard,
        }
    }

    /// True for a P2SH template.
    #[must_use]
    pub fn is_pay_to_script_hash(&self) -> bool {
        self.determine_type() == ScriptType::ScriptHash
    }

    /// True for a P2PKH template.
    #[must_use]
    pub fn is_pay_to_pubkey_hash(&self) -> bool {
        self.determine_type() == ScriptType::PubKeyHash
    }

    /// The 20-byte hash committed to by a standard script.
    #[must_use]
    pub fn hash(&self) -> Option<&[u8]> {
        match self.determine_type() {
            ScriptType::PubKeyHash => Some(&self.0[3..23]),
            ScriptType::ScriptHash => Some(&self.0[2..22]),
            ScriptType::NonStandard => None,
        }
    }
}

impl From<Vec<u8>> for Script {
    fn from(v: Vec<u8>) -> Self {
        Script(v)
    }
}

impl AsRef<[u8]> for Script {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_standard_scripts() {
        let hash = [0x42u8; 20];
        let pkh = Script::p2pkh(&hash);
        let sh = Script::p2sh(&hash);
        assert_eq!(pkh.as_bytes().len(), 25);
        assert_eq!(sh.as_bytes().len(), 23);
        assert!(pkh.is_pay_to_pubkey_hash());
        assert!(sh.is_pay_to_script_hash());
        assert_eq!(pkh.hash().unwrap(), hash);
        assert_eq!(sh.hash().unwrap(), hash);
    }

    #[test]
    fn parses_p2sh_bytes() {
        let bytes = hex::decode("a914748284390f9e263a4b766a75d0633c50426eb87587").unwrap();
        let script = Script::from(bytes);
        assert_eq!(script.determine_type(), ScriptType::ScriptHash);
        assert_eq!(
            hex::encode(script.hash().unwrap()),
            "748284390f9e263a4b766a75d0633c50426eb875"
        );
    }

    #[test]
    fn rejects_truncated_or_unknown_scripts() {
        let mut truncated = Script::p2sh(&[1u8; 20]).as_bytes().to_vec();
        truncated.remove(5);
        assert_eq!(Script::from(truncated).determine_type(), ScriptType::NonStandard);
        assert_eq!(Script::from(vec![0x6a, 0x00]).determine_type(), ScriptType::NonStandard);
        assert_eq!(Script::default().hash(), None);
    }
}
