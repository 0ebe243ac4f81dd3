use {
    crate::{
        error::{Error, Result},
        server::CowServer,
        signing,
    },
    alloy::{
        primitives::{Address, U256},
        signers::local::PrivateKeySigner,
        sol_types::Eip712Domain,
    },
    anyhow::{Context as _, anyhow},
    model::{
        app_data::AppDataHash,
        order::{
            Order,
            OrderCancellations,
            OrderCreation,
            OrderData,
            OrderStatus,
            OrderUid,
            SignedOrderCancellations,
        },
        quote::{OrderQuote, OrderQuoteRequest, OrderQuoteResponse, OrderQuoteSide, Validity},
        signature::EcdsaSigningScheme,
    },
    reqwest::blocking::{Client, RequestBuilder, Response},
    serde::{Deserialize, de::DeserializeOwned},
    url::Url,
};

const ORDERS_ENDPOINT: &str = "api/v1/orders";
const QUOTING_ENDPOINT: &str = "api/v1/quote";
const VERSION_ENDPOINT: &str = "api/v1/version";

/// How long orders built from [`CowClient::build_swap_params`] stay valid.
pub const DEFAULT_VALID_FOR: u32 = 1080;

fn order_endpoint(uid: &OrderUid) -> String {
    format!("{ORDERS_ENDPOINT}/{uid}")
}

fn order_status_endpoint(uid: &OrderUid) -> String {
    format!("{ORDERS_ENDPOINT}/{uid}/status")
}

/// Blocking client for the orderbook API that signs orders and
/// cancellations with the account it was created for.
pub struct CowClient {
    client: Client,
    base: Url,
    signer: PrivateKeySigner,
    domain: Eip712Domain,
    chain_id: u64,
}

impl CowClient {
    pub fn new(client: Client, server: CowServer, signer: PrivateKeySigner) -> Result<Self> {
        Ok(Self::with_base_url(
            client,
            server.base_url()?,
            server.chain_id(),
            signer,
        ))
    }

    /// Talks to an orderbook at an arbitrary url, signing for `chain_id`.
    pub fn with_base_url(client: Client, mut base: Url, chain_id: u64, signer: PrivateKeySigner) -> Self {
        // Endpoints are joined relative to the base so it has to end in a slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self {
            client,
            base,
            signer,
            domain: model::settlement_domain(chain_id),
            chain_id,
        }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Returns the raw version string of the orderbook. The status code of
    /// the response is not checked.
    pub fn get_version(&self) -> Result<String> {
        let response = self.send(self.client.get(self.url(VERSION_ENDPOINT)?))?;
        Ok(response.text()?)
    }

    /// Builds a sell quote request for the client's account.
    pub fn build_swap_params(
        &self,
        sell_token: Address,
        buy_token: Address,
        sell_amount: U256,
    ) -> Result<OrderQuoteRequest> {
        let request = OrderQuoteRequest {
            receiver: Some(self.address()),
            validity: Some(Validity::For(DEFAULT_VALID_FOR)),
            app_data: Some(AppDataHash::ZERO),
            ..OrderQuoteRequest::new(
                self.address(),
                sell_token,
                buy_token,
                OrderQuoteSide::Sell {
                    sell_amount_before_fee: sell_amount,
                },
            )
        };
        request.validate().map_err(Error::Validation)?;
        Ok(request)
    }

    pub fn post_quote(&self, request: &OrderQuoteRequest) -> Result<OrderQuote> {
        request.validate().map_err(Error::Validation)?;
        tracing::debug!(?request, "requesting quote");
        let response = self.send(self.client.post(self.url(QUOTING_ENDPOINT)?).json(request))?;
        let body = self.response_body(response)?;
        let response: OrderQuoteResponse = parse(&body)?;
        tracing::debug!(quote = ?response.quote, id = ?response.id, "received quote");
        Ok(response.quote)
    }

    /// Folds the quoted fee into the sell amount and returns the order that
    /// gets signed. The quote is left untouched if the sum overflows.
    pub fn build_order_with_fee_and_sell_amounts(&self, quote: &mut OrderQuote) -> Result<OrderData> {
        quote.fold_fee_into_sell_amount().map_err(Error::Validation)?;
        Ok(quote.order_data())
    }

    /// Signs the quoted order and submits it. Every call creates a new order
    /// on the orderbook.
    pub fn post_order(&self, quote: &mut OrderQuote) -> Result<OrderUid> {
        let data = self.build_order_with_fee_and_sell_amounts(quote)?;
        let signature = signing::sign_typed_data(&self.signer, &self.domain, &data.eip712())?;
        let order = OrderCreation {
            data,
            from: Some(self.address()),
            signature,
            signing_scheme: EcdsaSigningScheme::Eip712,
            quote_id: None,
        };
        tracing::debug!(?order, "placing order");
        let response = self.send(self.client.post(self.url(ORDERS_ENDPOINT)?).json(&order))?;
        let body = self.response_body(response)?;
        let uid = body
            .trim()
            .trim_matches('"')
            .parse::<OrderUid>()
            .map_err(|err| Error::Validation(err.context("orderbook returned malformed order uid")))?;
        tracing::info!(%uid, "placed order");
        Ok(uid)
    }

    /// Cancels the given orders unless the first one is already cancelled.
    pub fn cancel_order_if_not_already_cancelled(&self, uids: &[OrderUid]) -> Result<()> {
        let first = uids
            .first()
            .ok_or_else(|| Error::Validation(anyhow!("no orders to cancel")))?;
        let cancellations = OrderCancellations {
            order_uids: uids.to_vec(),
        };
        let signature =
            signing::sign_typed_data(&self.signer, &self.domain, &cancellations.eip712())?;

        match self.get_order_status(first)? {
            OrderStatus::Cancelled => {
                tracing::info!(uid = %first, "order is already cancelled");
                return Ok(());
            }
            OrderStatus::PresignaturePending
            | OrderStatus::Open
            | OrderStatus::Scheduled
            | OrderStatus::Active
            | OrderStatus::Solved
            | OrderStatus::Executing
            | OrderStatus::Traded
            | OrderStatus::Fulfilled
            | OrderStatus::Expired => (),
        }

        let cancellations = SignedOrderCancellations {
            data: cancellations,
            signature,
            signing_scheme: EcdsaSigningScheme::Eip712,
        };
        let response = self.send(
            self.client
                .delete(self.url(ORDERS_ENDPOINT)?)
                .json(&cancellations),
        )?;
        self.response_body(response)?;
        tracing::info!(uids = ?cancellations.data.order_uids, "cancelled orders");
        Ok(())
    }

    pub fn get_order_status(&self, uid: &OrderUid) -> Result<OrderStatus> {
        #[derive(Deserialize)]
        struct Status {
            #[serde(rename = "type")]
            kind: String,
        }

        let response = self.send(self.client.get(self.url(&order_status_endpoint(uid))?))?;
        let body = self.response_body(response)?;
        let status: Status = parse(&body)?;
        status.kind.parse().map_err(|_| {
            tracing::error!(%uid, status = %status.kind, "unrecognized order status");
            Error::UnrecognizedOrderStatus {
                uid: *uid,
                status: status.kind,
            }
        })
    }

    pub fn get_order(&self, uid: &OrderUid) -> Result<Order> {
        let response = self.send(self.client.get(self.url(&order_endpoint(uid))?))?;
        let body = self.response_body(response)?;
        parse(&body)
    }

    fn url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base.join(endpoint)?)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        request.send().map_err(|err| {
            tracing::error!(?err, "request to orderbook failed");
            Error::Transport(err)
        })
    }

    /// Reads the body and turns non-2xx responses into errors.
    fn response_body(&self, response: Response) -> Result<String> {
        let status = response.status();
        let failure = response.error_for_status_ref().err();
        let body = response.text().map_err(|err| {
            tracing::error!(?err, %status, "failed to read orderbook response");
            Error::Transport(err)
        })?;
        match failure {
            Some(err) => {
                tracing::error!(?err, %status, %body, "orderbook rejected request");
                Err(Error::Http {
                    status,
                    body,
                    source: err,
                })
            }
            None => Ok(body),
        }
    }
}

fn parse<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body)
        .with_context(|| format!("unexpected orderbook response {body:?}"))
        .map_err(Error::Validation)
}
