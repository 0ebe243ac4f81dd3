use {
    crate::{
        app_data::AppDataHash,
        order::{BuyTokenDestination, OrderData, OrderKind, SellTokenSource},
        signature::SigningScheme,
    },
    alloy::primitives::{Address, U256},
    anyhow::{Context as _, Result, ensure},
    chrono::{DateTime, Utc},
    number::serialization::HexOrDecimalU256,
    serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser::SerializeStruct as _},
    serde_with::serde_as,
};

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PriceQuality {
    Fast,
    #[default]
    Optimal,
    Verified,
}

/// The order parameters to quote a price and fee for.
///
/// Every optional field that is unset is left out of the request so the
/// orderbook applies its own default.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuoteRequest {
    pub from: Address,
    pub sell_token: Address,
    pub buy_token: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Address>,
    #[serde(flatten)]
    pub side: OrderQuoteSide,
    #[serde(flatten, deserialize_with = "deserialize_optional_validity")]
    pub validity: Option<Validity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_data: Option<AppDataHash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partially_fillable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_token_balance: Option<SellTokenSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_token_balance: Option<BuyTokenDestination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_scheme: Option<SigningScheme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_quality: Option<PriceQuality>,
}

impl OrderQuoteRequest {
    pub fn new(from: Address, sell_token: Address, buy_token: Address, side: OrderQuoteSide) -> Self {
        Self {
            from,
            sell_token,
            buy_token,
            receiver: None,
            side,
            validity: None,
            app_data: None,
            partially_fillable: None,
            sell_token_balance: None,
            buy_token_balance: None,
            signing_scheme: None,
            price_quality: None,
        }
    }

    /// Checks the request for shapes the orderbook would reject anyway.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.sell_token != self.buy_token,
            "sell and buy token are both {}",
            self.sell_token
        );
        ensure!(!self.side.amount().is_zero(), "quote amount must not be zero");
        Ok(())
    }
}

#[serde_as]
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OrderQuoteSide {
    #[serde(rename_all = "camelCase")]
    Sell {
        #[serde_as(as = "HexOrDecimalU256")]
        sell_amount_before_fee: U256,
    },
    #[serde(rename_all = "camelCase")]
    Buy {
        #[serde_as(as = "HexOrDecimalU256")]
        buy_amount_after_fee: U256,
    },
}

impl OrderQuoteSide {
    /// The amount that is fixed by the quote.
    pub fn amount(&self) -> U256 {
        match self {
            Self::Sell {
                sell_amount_before_fee,
            } => *sell_amount_before_fee,
            Self::Buy {
                buy_amount_after_fee,
            } => *buy_amount_after_fee,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validity {
    To(u32),
    For(u32),
}

/// Helper struct for `Validity` deserialization.
#[derive(Deserialize)]
#[serde(rename = "validity", rename_all = "camelCase")]
struct ValidityFields {
    valid_to: Option<u32>,
    valid_for: Option<u32>,
}

impl ValidityFields {
    fn into_validity<E: de::Error>(self) -> Result<Option<Validity>, E> {
        match (self.valid_to, self.valid_for) {
            (Some(valid_to), None) => Ok(Some(Validity::To(valid_to))),
            (None, Some(valid_for)) => Ok(Some(Validity::For(valid_for))),
            (None, None) => Ok(None),
            (Some(_), Some(_)) => Err(E::custom(
                "must specify at most one of `validTo` or `validFor`",
            )),
        }
    }
}

// A flattened `Option` turns every error of the inner type into `None`, which
// would silently accept requests that set both fields.
fn deserialize_optional_validity<'de, D>(deserializer: D) -> Result<Option<Validity>, D::Error>
where
    D: Deserializer<'de>,
{
    ValidityFields::deserialize(deserializer)?.into_validity()
}

impl Serialize for Validity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let (field, value) = match self {
            Self::To(valid_to) => ("validTo", valid_to),
            Self::For(valid_for) => ("validFor", valid_for),
        };

        let mut ser = serializer.serialize_struct("Validity", 1)?;
        ser.serialize_field(field, value)?;
        ser.end()
    }
}

/// The quoted order by the service.
#[serde_as]
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuote {
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
    #[serde(default)]
    pub signing_scheme: SigningScheme,
}

impl OrderQuote {
    /// Moves the quoted fee into the sell amount so the order can be signed
    /// with a zero fee. Applying it again is a no-op since the fee is zero
    /// afterwards.
    pub fn fold_fee_into_sell_amount(&mut self) -> Result<()> {
        self.sell_amount = self
            .sell_amount
            .checked_add(self.fee_amount)
            .with_context(|| {
                format!(
                    "sell amount {} plus fee {} overflows",
                    self.sell_amount, self.fee_amount
                )
            })?;
        self.fee_amount = U256::ZERO;
        Ok(())
    }

    /// The order that gets signed and submitted for this quote.
    pub fn order_data(&self) -> OrderData {
        OrderData {
            sell_token: self.sell_token,
            buy_token: self.buy_token,
            receiver: self.receiver,
            sell_amount: self.sell_amount,
            buy_amount: self.buy_amount,
            valid_to: self.valid_to,
            app_data: self.app_data,
            fee_amount: self.fee_amount,
            kind: self.kind,
            partially_fillable: self.partially_fillable,
            sell_token_balance: self.sell_token_balance,
            buy_token_balance: self.buy_token_balance,
        }
    }
}

pub type QuoteId = i64;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuoteResponse {
    pub quote: OrderQuote,
    #[serde(default)]
    pub from: Option<Address>,
    #[serde(default)]
    pub expiration: Option<DateTime<Utc>>,
    #[serde(default)]
    pub id: Option<QuoteId>,
    #[serde(default)]
    pub verified: bool,
}
