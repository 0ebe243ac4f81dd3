//! Contains the models exchanged with the CoW Protocol orderbook API along
//! with the EIP-712 schemas the settlement contract verifies signatures
//! against.

pub mod app_data;
pub mod eip712;
pub mod order;
pub mod quote;
pub mod signature;

use alloy::{
    primitives::{Address, U256, address},
    sol_types::Eip712Domain,
};

/// The GPv2Settlement contract. It is deployed at the same address on every
/// supported chain and acts as the EIP-712 verifying contract.
pub const GPV2_SETTLEMENT: Address = address!("9008D19f58AAbD9eD0D60971565AA8510560ab41");

/// The EIP-712 domain name used for computing the domain separator.
pub const DOMAIN_NAME: &str = "Gnosis Protocol";

/// The EIP-712 domain version used for computing the domain separator.
pub const DOMAIN_VERSION: &str = "v2";

/// Returns the EIP-712 domain of the settlement contract on the given chain.
pub fn settlement_domain(chain_id: u64) -> Eip712Domain {
    Eip712Domain::new(
        Some(DOMAIN_NAME.into()),
        Some(DOMAIN_VERSION.into()),
        Some(U256::from(chain_id)),
        Some(GPV2_SETTLEMENT),
        None,
    )
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::b256};

    #[test]
    fn domain_separator_goerli() {
        // domain separator is taken from goerli deployment at address 0x9008D19f58AAbD9eD0D60971565AA8510560ab41
        assert_eq!(
            settlement_domain(5).separator(),
            b256!("fb378b35457022ecc5709ae5dafad9393c1387ae6d8ce24913a0c969074c07fb"),
        );
    }

    #[test]
    fn domain_separator_depends_on_chain() {
        assert_ne!(
            settlement_domain(1).separator(),
            settlement_domain(100).separator(),
        );
    }
}
