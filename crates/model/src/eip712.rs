//! Typed-data schemas exactly as they are declared by the settlement
//! contract. Any change to a field name, type or order changes the type hash
//! and invalidates every signature.
//!
//! <https://github.com/cowprotocol/contracts/blob/v1.1.2/src/contracts/libraries/GPv2Order.sol#L47>

alloy::sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct Order {
        address sellToken;
        address buyToken;
        address receiver;
        uint256 sellAmount;
        uint256 buyAmount;
        uint32 validTo;
        bytes32 appData;
        uint256 feeAmount;
        string kind;
        bool partiallyFillable;
        string sellTokenBalance;
        string buyTokenBalance;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct OrderCancellations {
        bytes[] orderUids;
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::{primitives::b256, sol_types::SolStruct},
    };

    #[test]
    fn order_type_hash_matches_settlement_contract() {
        let order = Order {
            sellToken: Default::default(),
            buyToken: Default::default(),
            receiver: Default::default(),
            sellAmount: Default::default(),
            buyAmount: Default::default(),
            validTo: 0,
            appData: Default::default(),
            feeAmount: Default::default(),
            kind: "sell".to_string(),
            partiallyFillable: false,
            sellTokenBalance: "erc20".to_string(),
            buyTokenBalance: "erc20".to_string(),
        };
        assert_eq!(
            order.eip712_type_hash(),
            b256!("d5a25ba2e97094ad7d83dc28a6572da797d6b3e7fc6663bd93efb789fc17e489"),
        );
    }

    #[test]
    fn cancellations_type_hash_matches_orderbook() {
        // keccak256("OrderCancellations(bytes[] orderUids)")
        let cancellations = OrderCancellations { orderUids: vec![] };
        assert_eq!(
            cancellations.eip712_type_hash(),
            b256!("4c89efb91ae246f78d2fe68b47db2fa1444a121a4f2dc3fda7a5a408c2e3588e"),
        );
    }
}
