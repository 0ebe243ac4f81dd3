use {
    alloy::primitives::U256,
    serde::{
        Deserializer,
        Serializer,
        de::{self, Visitor},
    },
    serde_with::{DeserializeAs, SerializeAs},
    std::fmt,
};

/// Serializes a [`U256`] as a decimal string and deserializes it from either a
/// decimal string or a `0x` prefixed hex string.
///
/// Token amounts on the wire are always strings so they never pass through a
/// floating point representation.
pub struct HexOrDecimalU256;

impl<'de> DeserializeAs<'de, U256> for HexOrDecimalU256 {
    fn deserialize_as<D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct U256Visitor;

        impl Visitor<'_> for U256Visitor {
            type Value = U256;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(
                    formatter,
                    "a u256 encoded either as 0x hex prefixed or decimal encoded string"
                )
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse(s).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(U256Visitor)
    }
}

impl SerializeAs<U256> for HexOrDecimalU256 {
    fn serialize_as<S>(source: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(source)
    }
}

fn parse(s: &str) -> Result<U256, String> {
    let (digits, radix) = match s.strip_prefix("0x") {
        Some(hex) => (hex, 16),
        None => (s, 10),
    };
    if digits.is_empty() {
        return Err(format!("failed to decode {s:?} as u256: no digits"));
    }
    U256::from_str_radix(digits, radix)
        .map_err(|err| format!("failed to decode {s:?} as u256: {err}"))
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        serde::{Deserialize, Serialize},
        serde_with::serde_as,
    };

    #[serde_as]
    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Amount(#[serde_as(as = "HexOrDecimalU256")] U256);

    #[test]
    fn deserializes_decimal_and_hex() {
        let result: Amount = serde_json::from_str(r#""0x10""#).unwrap();
        assert_eq!(result, Amount(U256::from(16)));

        let result: Amount = serde_json::from_str(r#""10""#).unwrap();
        assert_eq!(result, Amount(U256::from(10)));

        assert!(serde_json::from_str::<Amount>(r#""10e""#).is_err());
        assert!(serde_json::from_str::<Amount>(r#""0xx1""#).is_err());
        assert!(serde_json::from_str::<Amount>(r#""0AFF""#).is_err());
        assert!(serde_json::from_str::<Amount>(r#""""#).is_err());
        assert!(serde_json::from_str::<Amount>("10").is_err());
        assert!(serde_json::from_str::<Amount>(r#"" 10 ""#).is_err());
        assert!(serde_json::from_str::<Amount>(r#""0x10 ""#).is_err());
    }

    #[test]
    fn serializes_as_decimal_string() {
        let serialized = serde_json::to_string(&Amount(U256::from(10))).unwrap();
        assert_eq!(serialized, r#""10""#);

        let serialized = serde_json::to_string(&Amount(U256::MAX)).unwrap();
        assert_eq!(
            serialized,
            r#""115792089237316195423570985008687907853269984665640564039457584007913129639935""#
        );
    }
}
