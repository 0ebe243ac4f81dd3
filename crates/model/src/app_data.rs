use {
    alloy::primitives::B256,
    serde::{Deserialize, Serialize},
    std::fmt::{self, Debug, Display, Formatter},
};

/// The 32 byte app data hash that is part of every signed order.
///
/// The default value is the all-zero hash which the orderbook accepts as
/// "no app data".
#[derive(Clone, Copy, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AppDataHash(pub B256);

impl AppDataHash {
    pub const ZERO: Self = Self(B256::ZERO);
}

impl Debug for AppDataHash {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for AppDataHash {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_hash_is_hex_encoded() {
        assert_eq!(
            serde_json::to_value(AppDataHash::ZERO).unwrap(),
            "0x0000000000000000000000000000000000000000000000000000000000000000",
        );
    }

    #[test]
    fn rejects_short_hash() {
        assert!(serde_json::from_str::<AppDataHash>(r#""0x1234""#).is_err());
    }
}
