use {
    alloy::primitives::{self, B256},
    serde::{Deserialize, Deserializer, Serialize, Serializer, de},
    std::fmt::{self, Debug, Formatter},
};

/// All signing schemes the orderbook understands. This client only ever
/// produces [`EcdsaSigningScheme::Eip712`] signatures but quotes may echo any
/// of them back.
#[derive(Eq, PartialEq, Clone, Copy, Debug, Default, Deserialize, Serialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SigningScheme {
    #[default]
    Eip712,
    EthSign,
    Eip1271,
    PreSign,
}

#[derive(Eq, PartialEq, Clone, Copy, Debug, Default, Deserialize, Serialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EcdsaSigningScheme {
    #[default]
    Eip712,
    EthSign,
}

/// An ECDSA signature as `r || s || v` with `v` being 27 or 28.
#[derive(Eq, PartialEq, Clone, Copy, Default, Hash)]
pub struct EcdsaSignature {
    pub r: B256,
    pub s: B256,
    pub v: u8,
}

impl EcdsaSignature {
    /// r + s + v
    pub fn to_bytes(self) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(self.r.as_slice());
        bytes[32..64].copy_from_slice(self.s.as_slice());
        bytes[64] = self.v;
        bytes
    }

    pub fn from_bytes(bytes: &[u8; 65]) -> Self {
        EcdsaSignature {
            r: B256::from_slice(&bytes[..32]),
            s: B256::from_slice(&bytes[32..64]),
            v: bytes[64],
        }
    }
}

impl From<primitives::Signature> for EcdsaSignature {
    fn from(signature: primitives::Signature) -> Self {
        Self::from_bytes(&signature.as_bytes())
    }
}

impl Debug for EcdsaSignature {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&const_hex::encode_prefixed(self.to_bytes()))
    }
}

impl Serialize for EcdsaSignature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&const_hex::encode_prefixed(self.to_bytes()))
    }
}

impl<'de> Deserialize<'de> for EcdsaSignature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let hex = s.strip_prefix("0x").ok_or_else(|| {
            de::Error::custom(format!(
                "{s:?} can't be decoded as hex signature because it does not start with '0x'"
            ))
        })?;
        let bytes: [u8; 65] = const_hex::decode_to_array(hex).map_err(|err| {
            de::Error::custom(format!("failed to decode {s:?} as hex ecdsa signature: {err}"))
        })?;
        Ok(Self::from_bytes(&bytes))
    }
}
