//! Contains the order types with serialization as described by the orderbook
//! openapi documentation.

use {
    crate::{
        app_data::AppDataHash,
        eip712,
        signature::{EcdsaSignature, EcdsaSigningScheme},
    },
    alloy::{
        primitives::{Address, B256, Bytes, U256},
        sol_types::{Eip712Domain, SolStruct},
    },
    anyhow::{Context as _, Result},
    chrono::{DateTime, Utc},
    number::serialization::HexOrDecimalU256,
    serde::{Deserialize, Deserializer, Serialize, Serializer, de},
    serde_with::serde_as,
    std::{
        fmt::{self, Debug, Display},
        str::FromStr,
    },
    strum::{AsRefStr, EnumString},
};

/// The complete order data.
///
/// These are the exact fields that get signed and verified by the settlement
/// contract, so the value that is signed and the value that is posted must
/// always be the same [`OrderData`].
#[serde_as]
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    pub sell_token: Address,
    pub buy_token: Address,
    #[serde(default)]
    pub receiver: Option<Address>,
    #[serde_as(as = "HexOrDecimalU256")]
    pub sell_amount: U256,
    #[serde_as(as = "HexOrDecimalU256")]
    pub buy_amount: U256,
    pub valid_to: u32,
    pub app_data: AppDataHash,
    #[serde_as(as = "HexOrDecimalU256")]
    pub fee_amount: U256,
    pub kind: OrderKind,
    pub partially_fillable: bool,
    #[serde(default)]
    pub sell_token_balance: SellTokenSource,
    #[serde(default)]
    pub buy_token_balance: BuyTokenDestination,
}

impl OrderData {
    /// The typed-data struct for this order. A missing receiver is signed as
    /// the zero address, which the settlement contract treats as "the owner".
    pub fn eip712(&self) -> eip712::Order {
        eip712::Order {
            sellToken: self.sell_token,
            buyToken: self.buy_token,
            receiver: self.receiver.unwrap_or(Address::ZERO),
            sellAmount: self.sell_amount,
            buyAmount: self.buy_amount,
            validTo: self.valid_to,
            appData: self.app_data.0,
            feeAmount: self.fee_amount,
            kind: self.kind.as_ref().to_owned(),
            partiallyFillable: self.partially_fillable,
            sellTokenBalance: self.sell_token_balance.as_ref().to_owned(),
            buyTokenBalance: self.buy_token_balance.as_ref().to_owned(),
        }
    }

    /// Returns the EIP-712 hash that gets signed for this order.
    pub fn signing_hash(&self, domain: &Eip712Domain) -> B256 {
        self.eip712().eip712_signing_hash(domain)
    }
}

/// An order as provided to the orderbook for placement.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreation {
    #[serde(flatten)]
    pub data: OrderData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub signature: EcdsaSignature,
    pub signing_scheme: EcdsaSigningScheme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<i64>,
}

#[derive(Eq, PartialEq, Clone, Copy, Debug, Default, Deserialize, Serialize, Hash, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    #[default]
    Sell,
    Buy,
}

/// Source from which the sellAmount should be drawn upon order fulfillment
#[derive(Eq, PartialEq, Clone, Copy, Debug, Default, Deserialize, Serialize, Hash, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SellTokenSource {
    /// Direct ERC20 allowances to the Vault relayer contract
    #[default]
    Erc20,
    /// ERC20 allowances to the Vault with GPv2 relayer approval
    External,
    /// Internal balances to the Vault with GPv2 relayer approval
    Internal,
}

/// Destination for which the buyAmount should be transferred to order's receiver to upon fulfillment
#[derive(Eq, PartialEq, Clone, Copy, Debug, Default, Deserialize, Serialize, Hash, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BuyTokenDestination {
    /// Pay trade proceeds as an ERC20 token transfer
    #[default]
    Erc20,
    /// Pay trade proceeds as a Vault internal balance transfer
    Internal,
}

/// Every lifecycle state the orderbook reports, either as the `status` of an
/// order or as the `type` of the order status endpoint.
#[derive(
    Eq,
    PartialEq,
    Clone,
    Copy,
    Debug,
    Deserialize,
    Serialize,
    Hash,
    EnumString,
    AsRefStr,
    strum::Display,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
    PresignaturePending,
    Open,
    /// Waiting to be included in the next auction.
    Scheduled,
    /// Part of the current auction.
    Active,
    /// Solvers found a solution but did not win the competition.
    Solved,
    /// Part of the winning solution which is being submitted onchain.
    Executing,
    Traded,
    Fulfilled,
    Cancelled,
    Expired,
}

// uid as 56 bytes: 32 for orderDigest, 20 for ownerAddress and 4 for validTo
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct OrderUid(pub [u8; 56]);

impl FromStr for OrderUid {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s_without_prefix = s.strip_prefix("0x").unwrap_or(s);
        let value = const_hex::decode_to_array(s_without_prefix)
            .with_context(|| format!("failed to decode {s:?} as hex order uid"))?;
        Ok(OrderUid(value))
    }
}

impl Display for OrderUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&const_hex::encode_prefixed(self.0))
    }
}

impl Debug for OrderUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl Serialize for OrderUid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OrderUid {
    fn deserialize<D>(deserializer: D) -> Result<OrderUid, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if !s.starts_with("0x") {
            return Err(de::Error::custom(format!(
                "{s:?} can't be decoded as hex uid because it does not start with '0x'"
            )));
        }
        s.parse().map_err(|err| de::Error::custom(format!("{err:#}")))
    }
}

/// Fields the orderbook populates for an order it accepted.
#[serde_as]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderMetadata {
    pub creation_date: DateTime<Utc>,
    pub owner: Address,
    pub uid: OrderUid,
    pub status: OrderStatus,
    #[serde_as(as = "HexOrDecimalU256")]
    pub executed_sell_amount: U256,
    #[serde_as(as = "HexOrDecimalU256")]
    pub executed_buy_amount: U256,
    #[serde(default)]
    #[serde_as(as = "HexOrDecimalU256")]
    pub executed_fee_amount: U256,
    #[serde(default)]
    pub invalidated: bool,
}

/// An order that is returned when querying the orderbook.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Order {
    #[serde(flatten)]
    pub metadata: OrderMetadata,
    #[serde(flatten)]
    pub data: OrderData,
}

/// Cancellation of multiple orders.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCancellations {
    pub order_uids: Vec<OrderUid>,
}

impl OrderCancellations {
    pub fn eip712(&self) -> eip712::OrderCancellations {
        eip712::OrderCancellations {
            orderUids: self
                .order_uids
                .iter()
                .map(|uid| Bytes::copy_from_slice(&uid.0))
                .collect(),
        }
    }
}

/// Signed order cancellations as sent to `DELETE /api/v1/orders`.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedOrderCancellations {
    #[serde(flatten)]
    pub data: OrderCancellations,
    pub signature: EcdsaSignature,
    pub signing_scheme: EcdsaSigningScheme,
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::primitives::{address, b256},
        serde_json::json,
    };

    fn uid() -> OrderUid {
        let mut uid = [0u8; 56];
        uid[0..32].copy_from_slice(&[0x11; 32]);
        uid[32..52].copy_from_slice(&[0x22; 20]);
        uid[52..56].copy_from_slice(&u32::MAX.to_be_bytes());
        OrderUid(uid)
    }

    #[test]
    fn order_uid_string_forms() {
        let uid = uid();
        let hex = uid.to_string();
        assert!(hex.starts_with("0x1111"));
        assert_eq!(hex.len(), 2 + 56 * 2);
        assert_eq!(hex.parse::<OrderUid>().unwrap(), uid);
        assert_eq!(hex[2..].parse::<OrderUid>().unwrap(), uid);
        assert_eq!(serde_json::to_value(uid).unwrap(), json!(hex));
        assert_eq!(serde_json::from_value::<OrderUid>(json!(hex)).unwrap(), uid);

        assert!("0x1234".parse::<OrderUid>().is_err());
        assert!(serde_json::from_value::<OrderUid>(json!(&hex[2..])).is_err());
    }

    #[test]
    fn order_status_from_wire_names() {
        for (name, status) in [
            ("presignaturePending", OrderStatus::PresignaturePending),
            ("open", OrderStatus::Open),
            ("scheduled", OrderStatus::Scheduled),
            ("active", OrderStatus::Active),
            ("solved", OrderStatus::Solved),
            ("executing", OrderStatus::Executing),
            ("traded", OrderStatus::Traded),
            ("fulfilled", OrderStatus::Fulfilled),
            ("cancelled", OrderStatus::Cancelled),
            ("expired", OrderStatus::Expired),
        ] {
            assert_eq!(name.parse::<OrderStatus>().unwrap(), status);
            assert_eq!(status.to_string(), name);
            assert_eq!(serde_json::to_value(status).unwrap(), json!(name));
        }
        assert!("frobnicated".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn order_data_serialization() {
        let sell_token = address!("000000000000000000000000000000000000000a");
        let buy_token = address!("000000000000000000000000000000000000000b");
        let order = OrderData {
            sell_token,
            buy_token,
            receiver: None,
            sell_amount: U256::from(1_000),
            buy_amount: U256::from(2_000),
            valid_to: 42,
            app_data: AppDataHash::ZERO,
            fee_amount: U256::ZERO,
            kind: OrderKind::Sell,
            partially_fillable: false,
            sell_token_balance: SellTokenSource::Erc20,
            buy_token_balance: BuyTokenDestination::Internal,
        };
        let expected = json!({
            "sellToken": sell_token,
            "buyToken": buy_token,
            "receiver": null,
            "sellAmount": "1000",
            "buyAmount": "2000",
            "validTo": 42,
            "appData": "0x0000000000000000000000000000000000000000000000000000000000000000",
            "feeAmount": "0",
            "kind": "sell",
            "partiallyFillable": false,
            "sellTokenBalance": "erc20",
            "buyTokenBalance": "internal",
        });
        assert_eq!(serde_json::to_value(order).unwrap(), expected);
        assert_eq!(serde_json::from_value::<OrderData>(expected).unwrap(), order);
    }

    #[test]
    fn typed_data_uses_contract_encoding() {
        let order = OrderData {
            kind: OrderKind::Buy,
            sell_token_balance: SellTokenSource::External,
            ..Default::default()
        };
        let typed = order.eip712();
        assert_eq!(typed.kind, "buy");
        assert_eq!(typed.receiver, Address::ZERO);
        assert_eq!(typed.sellTokenBalance, "external");
        assert_eq!(typed.buyTokenBalance, "erc20");

        // A missing receiver and an explicit zero receiver sign identically.
        let domain = crate::settlement_domain(100);
        let explicit = OrderData {
            receiver: Some(Address::ZERO),
            ..order
        };
        assert_eq!(order.signing_hash(&domain), explicit.signing_hash(&domain));
    }

    #[test]
    fn signed_cancellations_wire_format() {
        let cancellations = SignedOrderCancellations {
            data: OrderCancellations {
                order_uids: vec![uid()],
            },
            signature: EcdsaSignature {
                r: b256!("0000000000000000000000000000000000000000000000000000000000000001"),
                s: b256!("0000000000000000000000000000000000000000000000000000000000000002"),
                v: 28,
            },
            signing_scheme: EcdsaSigningScheme::Eip712,
        };
        let json = serde_json::to_value(&cancellations).unwrap();
        assert_eq!(json["orderUids"], json!([uid().to_string()]));
        assert_eq!(json["signingScheme"], "eip712");
        assert!(json["signature"].as_str().unwrap().ends_with("1c"));
        assert_eq!(
            cancellations.data.eip712().orderUids,
            vec![Bytes::copy_from_slice(&uid().0)]
        );
    }

    #[test]
    fn deserialize_order_from_orderbook() {
        let value = json!({
            "creationDate": "2024-01-01T00:00:00Z",
            "owner": "0x2222222222222222222222222222222222222222",
            "uid": uid().to_string(),
            "status": "fulfilled",
            "executedSellAmount": "1000",
            "executedSellAmountBeforeFees": "1000",
            "executedBuyAmount": "1995",
            "executedFeeAmount": "0",
            "invalidated": false,
            "sellToken": "0x000000000000000000000000000000000000000a",
            "buyToken": "0x000000000000000000000000000000000000000b",
            "receiver": null,
            "sellAmount": "1000",
            "buyAmount": "1990",
            "validTo": 4294967295u32,
            "appData": "0x0000000000000000000000000000000000000000000000000000000000000000",
            "feeAmount": "0",
            "kind": "sell",
            "partiallyFillable": false,
            "sellTokenBalance": "erc20",
            "buyTokenBalance": "erc20",
            "signingScheme": "eip712",
            "signature": "0x",
            "class": "market",
        });
        let order: Order = serde_json::from_value(value).unwrap();
        assert_eq!(order.metadata.status, OrderStatus::Fulfilled);
        assert_eq!(order.metadata.uid, uid());
        assert_eq!(order.metadata.executed_buy_amount, U256::from(1995));
        assert_eq!(order.data.receiver, None);
        assert_eq!(order.data.buy_amount, U256::from(1990));
    }
}
