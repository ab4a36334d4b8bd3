//! Withdrawal (release) integration tests.
//!
//! Tests the proof-backed withdrawal path:
//! - Immediate release and replay protection
//! - Proof binding (foreign keys, tampered parameters, revoked relayers)
//! - Caller, liquidity and input validation
//! - CW20 release and the global withdrawal id keyspace

mod helpers;

use cosmwasm_std::{Addr, Binary, Uint128};

use custody_bridge::error::ContractError;
use custody_bridge::msg::{ExecuteMsg, WithdrawalStatus};

use helpers::{
    assert_error, event_attr, fingerprint, setup, withdrawal_id, Relayer, TestEnv, DENOM,
};

fn funded() -> TestEnv {
    let mut env = setup();
    let user = env.user.clone();
    env.deposit_native(&user, 1000, fingerprint(1)).unwrap();
    env.deposit_native(&user, 500, fingerprint(1)).unwrap();
    assert_eq!(env.locked(DENOM), 1500);
    env
}

#[test]
fn test_withdraw_releases_and_blocks_replay() {
    let mut env = funded();
    let recipient = env.recipient.clone();
    let id = withdrawal_id(1);

    let res = env.withdraw(500, &id).unwrap();
    assert_eq!(
        event_attr(&res, "withdrawal_processed", "success").as_deref(),
        Some("true")
    );
    assert_eq!(env.locked(DENOM), 1000);
    assert_eq!(env.native_balance(&recipient), 500);
    assert_eq!(env.withdrawal_state(&id).status, WithdrawalStatus::Processed);

    // Same id again, with a valid proof
    assert_error(env.withdraw(500, &id), ContractError::WithdrawalAlreadyProcessed);

    // Same id again, with garbage as proof
    let relayer = env.relayer.addr.clone();
    let res = env.withdraw_with_proof(
        &relayer,
        DENOM,
        500,
        &recipient,
        &id,
        Binary::from(vec![0u8; 65]),
    );
    assert_error(res, ContractError::WithdrawalAlreadyProcessed);

    assert_eq!(env.locked(DENOM), 1000);
    assert_eq!(env.native_balance(&recipient), 500);
}

#[test]
fn test_proof_from_unregistered_key_rejected() {
    let mut env = funded();
    let relayer = env.relayer.addr.clone();
    let recipient = env.recipient.clone();
    let id = withdrawal_id(2);

    let outsider = Relayer::new("terra1outsider", 99);
    let digest = env.digest(DENOM, 500, &recipient, &id);
    let proof = outsider.sign(digest.as_slice());

    let res = env.withdraw_with_proof(&relayer, DENOM, 500, &recipient, &id, proof);
    assert_error(res, ContractError::InvalidSignature);
    assert_eq!(env.withdrawal_state(&id).status, WithdrawalStatus::Unseen);
    assert_eq!(env.locked(DENOM), 1500);
}

#[test]
fn test_proof_is_bound_to_parameters() {
    let mut env = funded();
    let relayer = env.relayer.addr.clone();
    let recipient = env.recipient.clone();
    let id = withdrawal_id(3);
    let proof = env.proof(DENOM, 500, &recipient, &id);

    // Amount raised
    let res = env.withdraw_with_proof(&relayer, DENOM, 501, &recipient, &id, proof.clone());
    assert_error(res, ContractError::InvalidSignature);

    // Recipient swapped
    let thief = Addr::unchecked("terra1thief");
    let res = env.withdraw_with_proof(&relayer, DENOM, 500, &thief, &id, proof.clone());
    assert_error(res, ContractError::InvalidSignature);

    // Different id
    let res = env.withdraw_with_proof(
        &relayer,
        DENOM,
        500,
        &recipient,
        &withdrawal_id(4),
        proof.clone(),
    );
    assert_error(res, ContractError::InvalidSignature);

    // Truncated proof
    let res = env.withdraw_with_proof(
        &relayer,
        DENOM,
        500,
        &recipient,
        &id,
        Binary::from(proof.as_slice()[..64].to_vec()),
    );
    assert_error(res, ContractError::InvalidSignature);

    // Ethereum-style recovery id is accepted
    let mut eth_proof = proof.to_vec();
    eth_proof[64] += 27;
    env.withdraw_with_proof(&relayer, DENOM, 500, &recipient, &id, Binary::from(eth_proof))
        .unwrap();
    assert_eq!(env.locked(DENOM), 1000);
}

#[test]
fn test_only_relayers_may_submit() {
    let mut env = funded();
    let user = env.user.clone();
    let recipient = env.recipient.clone();
    let id = withdrawal_id(5);
    let proof = env.proof(DENOM, 500, &recipient, &id);

    let res = env.withdraw_with_proof(&user, DENOM, 500, &recipient, &id, proof);
    assert_error(res, ContractError::UnauthorizedRelayer);
    assert_eq!(env.locked(DENOM), 1500);
}

#[test]
fn test_removed_relayer_key_stops_verifying() {
    let mut env = funded();
    let recipient = env.recipient.clone();
    let backup = Relayer::new("terra1backup", 11);

    env.admin_execute(&ExecuteMsg::AddRelayer {
        address: backup.addr.to_string(),
        signer: backup.signer(),
    })
    .unwrap();

    // Backup signs a proof, then gets removed
    let id = withdrawal_id(6);
    let digest = env.digest(DENOM, 300, &recipient, &id);
    let stale_proof = backup.sign(digest.as_slice());

    env.admin_execute(&ExecuteMsg::RemoveRelayer {
        address: backup.addr.to_string(),
    })
    .unwrap();

    let relayer = env.relayer.addr.clone();
    let res = env.withdraw_with_proof(&relayer, DENOM, 300, &recipient, &id, stale_proof);
    assert_error(res, ContractError::InvalidSignature);

    let res = env.withdraw_with_proof(
        &backup.addr,
        DENOM,
        300,
        &recipient,
        &id,
        env.proof(DENOM, 300, &recipient, &id),
    );
    assert_error(res, ContractError::UnauthorizedRelayer);

    // The last relayer cannot be removed
    let res = env.admin_execute(&ExecuteMsg::RemoveRelayer {
        address: relayer.to_string(),
    });
    assert_error(res, ContractError::CannotRemoveLastRelayer);
}

#[test]
fn test_any_registered_relayer_key_is_accepted() {
    let mut env = funded();
    let recipient = env.recipient.clone();
    let second = Relayer::new("terra1second", 12);

    env.admin_execute(&ExecuteMsg::AddRelayer {
        address: second.addr.to_string(),
        signer: second.signer(),
    })
    .unwrap();

    // Second relayer's key attests, first relayer submits
    let id = withdrawal_id(7);
    let digest = env.digest(DENOM, 200, &recipient, &id);
    let proof = second.sign(digest.as_slice());
    let relayer = env.relayer.addr.clone();
    let res = env
        .withdraw_with_proof(&relayer, DENOM, 200, &recipient, &id, proof)
        .unwrap();
    assert_eq!(
        res.events
            .iter()
            .flat_map(|e| e.attributes.iter())
            .find(|a| a.key == "relayer")
            .map(|a| a.value.clone()),
        Some(second.addr.to_string())
    );
}

#[test]
fn test_insufficient_liquidity_rejected() {
    let mut env = funded();
    let id = withdrawal_id(8);

    assert_error(
        env.withdraw(1501, &id),
        ContractError::InsufficientLiquidity {
            locked: Uint128::new(1500),
            requested: Uint128::new(1501),
        },
    );
    assert_eq!(env.withdrawal_state(&id).status, WithdrawalStatus::Unseen);

    env.withdraw(1500, &id).unwrap();
    assert_eq!(env.locked(DENOM), 0);
}

#[test]
fn test_input_validation() {
    let mut env = funded();
    let relayer = env.relayer.addr.clone();
    let recipient = env.recipient.clone();

    assert_error(
        env.withdraw(0, &withdrawal_id(9)),
        ContractError::InvalidAmount {
            reason: "Withdrawal amount must be greater than zero".to_string(),
        },
    );

    let short_id = Binary::from(vec![1u8; 16]);
    let res = env.withdraw_with_proof(
        &relayer,
        DENOM,
        100,
        &recipient,
        &short_id,
        Binary::from(vec![0u8; 65]),
    );
    assert_error(res, ContractError::InvalidWithdrawalId { got: 16 });

    let id = withdrawal_id(10);
    let res = env.withdraw_with_proof(
        &relayer,
        "uunknown",
        100,
        &recipient,
        &id,
        Binary::from(vec![0u8; 65]),
    );
    assert_error(
        res,
        ContractError::AssetNotRegistered {
            asset: "uunknown".to_string(),
        },
    );
}

#[test]
fn test_inactive_asset_still_withdrawable() {
    let mut env = funded();
    env.admin_execute(&ExecuteMsg::UpdateAsset {
        asset: DENOM.to_string(),
        counterpart_id: None,
        active: Some(false),
    })
    .unwrap();

    env.withdraw(400, &withdrawal_id(11)).unwrap();
    assert_eq!(env.locked(DENOM), 1100);
}

#[test]
fn test_cw20_withdrawal_and_global_id_space() {
    let mut env = funded();
    let user = env.user.clone();
    let recipient = env.recipient.clone();
    let relayer = env.relayer.addr.clone();
    let token = env.setup_cw20();
    env.deposit_cw20(&token, &user, 8000, fingerprint(2)).unwrap();

    let id = withdrawal_id(12);
    let proof = env.proof(token.as_str(), 3000, &recipient, &id);
    env.withdraw_with_proof(&relayer, token.as_str(), 3000, &recipient, &id, proof)
        .unwrap();
    assert_eq!(env.locked(token.as_str()), 5000);
    assert_eq!(env.cw20_balance(&token, &recipient), 3000);

    // The id is spent for every asset
    assert_error(env.withdraw(100, &id), ContractError::WithdrawalAlreadyProcessed);
    assert_eq!(env.locked(DENOM), 1500);
}
