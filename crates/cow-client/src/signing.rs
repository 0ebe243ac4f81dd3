//! Signs EIP-712 typed data. The type descriptor of a message comes from its
//! [`SolStruct`] implementation so only the domain has to be supplied.

use {
    alloy::{
        signers::SignerSync,
        sol_types::{Eip712Domain, SolStruct},
    },
    model::signature::EcdsaSignature,
};

/// Hashes `message` under `domain` and signs the digest. Signing is
/// deterministic so the same inputs always yield the same signature.
pub fn sign_typed_data<T: SolStruct>(
    signer: &impl SignerSync,
    domain: &Eip712Domain,
    message: &T,
) -> Result<EcdsaSignature, alloy::signers::Error> {
    let hash = message.eip712_signing_hash(domain);
    let signature = signer.sign_hash_sync(&hash)?;
    Ok(signature.into())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::{
            primitives::{Address, Signature, U256, address},
            signers::local::PrivateKeySigner,
        },
        model::{
            app_data::AppDataHash,
            order::{OrderCancellations, OrderData, OrderKind, OrderUid},
        },
    };

    fn signer() -> PrivateKeySigner {
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
            .parse()
            .unwrap()
    }

    fn order() -> OrderData {
        OrderData {
            sell_token: address!("e91d153e0b41518a2ce8dd3d7944fa863463a97d"),
            buy_token: address!("177127622c4a00f3d409b75571e12cb3c8973d3c"),
            receiver: None,
            sell_amount: U256::from(1_000_000),
            buy_amount: U256::from(990),
            valid_to: 1_700_000_000,
            app_data: AppDataHash::ZERO,
            fee_amount: U256::ZERO,
            kind: OrderKind::Sell,
            partially_fillable: false,
            ..Default::default()
        }
    }

    fn recover(signature: EcdsaSignature, hash: alloy::primitives::B256) -> Address {
        Signature::from_raw_array(&signature.to_bytes())
            .unwrap()
            .recover_address_from_prehash(&hash)
            .unwrap()
    }

    #[test]
    fn signed_order_recovers_to_signer() {
        let signer = signer();
        let domain = model::settlement_domain(100);
        let order = order();

        let signature = sign_typed_data(&signer, &domain, &order.eip712()).unwrap();
        assert!(signature.v == 27 || signature.v == 28);
        assert_eq!(
            recover(signature, order.signing_hash(&domain)),
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
        );
        assert_eq!(signer.address(), address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"));
    }

    #[test]
    fn signing_is_deterministic() {
        let signer = signer();
        let domain = model::settlement_domain(100);
        let message = order().eip712();
        assert_eq!(
            sign_typed_data(&signer, &domain, &message).unwrap(),
            sign_typed_data(&signer, &domain, &message).unwrap(),
        );
    }

    #[test]
    fn signature_is_bound_to_chain() {
        let signer = signer();
        let message = order().eip712();
        let gnosis = sign_typed_data(&signer, &model::settlement_domain(100), &message).unwrap();
        let mainnet = sign_typed_data(&signer, &model::settlement_domain(1), &message).unwrap();
        assert_ne!(gnosis, mainnet);
    }

    #[test]
    fn signed_cancellations_recover_to_signer() {
        let signer = signer();
        let domain = model::settlement_domain(11155111);
        let cancellations = OrderCancellations {
            order_uids: vec![OrderUid([7; 56]), OrderUid([8; 56])],
        };
        let message = cancellations.eip712();

        let signature = sign_typed_data(&signer, &domain, &message).unwrap();
        assert_eq!(
            recover(signature, message.eip712_signing_hash(&domain)),
            signer.address(),
        );
    }
}
