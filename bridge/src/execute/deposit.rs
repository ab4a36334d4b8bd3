//! Deposit handlers (DepositNative and CW20 Receive).
//!
//! Funds arrive in the same transaction as the bookkeeping: native coins are
//! attached to the message, CW20 tokens were already moved by the token
//! contract's `Send` before it calls `Receive`. Any error bounces them.

use cosmwasm_std::{
    from_json, to_json_binary, Addr, Binary, DepsMut, Env, MessageInfo, Response, Uint128,
};
use cw20::Cw20ReceiveMsg;

use crate::error::ContractError;
use crate::events;
use crate::execute::{load_unpaused_config, locked_balance};
use crate::msg::ReceiveMsg;
use crate::rate_limit;
use crate::state::{
    DepositRecord, ACCOUNT_SEQUENCES, ASSETS, DEPOSITS, FINGERPRINT_LENGTH, LOCKED_BALANCES,
    STATS,
};

/// Execute handler for depositing exactly one native coin
pub fn execute_deposit_native(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    destination_fingerprint: Binary,
) -> Result<Response, ContractError> {
    load_unpaused_config(deps.storage)?;

    if info.funds.is_empty() {
        return Err(ContractError::NoFundsSent);
    }
    if info.funds.len() > 1 {
        return Err(ContractError::InvalidAmount {
            reason: "Only one token type allowed per deposit".to_string(),
        });
    }

    let coin = &info.funds[0];
    record_deposit(
        deps,
        env,
        info.sender.clone(),
        &coin.denom,
        coin.amount,
        destination_fingerprint,
        true,
    )
}

/// Execute handler for CW20 tokens sent with a [`ReceiveMsg`]
pub fn execute_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    load_unpaused_config(deps.storage)?;

    // The calling contract is the token; the CW20 sender is the depositor
    let token = info.sender.to_string();
    let depositor = deps.api.addr_validate(&cw20_msg.sender)?;

    let receive_msg: ReceiveMsg = from_json(&cw20_msg.msg)?;
    match receive_msg {
        ReceiveMsg::Deposit {
            destination_fingerprint,
        } => record_deposit(
            deps,
            env,
            depositor,
            &token,
            cw20_msg.amount,
            destination_fingerprint,
            false,
        ),
    }
}

fn validate_fingerprint(fingerprint: &Binary) -> Result<(), ContractError> {
    if fingerprint.len() != FINGERPRINT_LENGTH {
        return Err(ContractError::InvalidFingerprint {
            reason: format!(
                "expected {} bytes, got {}",
                FINGERPRINT_LENGTH,
                fingerprint.len()
            ),
        });
    }
    if fingerprint.iter().all(|b| *b == 0) {
        return Err(ContractError::InvalidFingerprint {
            reason: "fingerprint must not be zero".to_string(),
        });
    }
    Ok(())
}

fn record_deposit(
    deps: DepsMut,
    env: Env,
    depositor: Addr,
    asset: &str,
    amount: Uint128,
    destination_fingerprint: Binary,
    via_native: bool,
) -> Result<Response, ContractError> {
    let asset_config = ASSETS
        .may_load(deps.storage, asset)?
        .ok_or_else(|| ContractError::AssetNotRegistered {
            asset: asset.to_string(),
        })?;

    // A CW20 contract cannot be deposited as a denom and vice versa
    if asset_config.is_native != via_native {
        return Err(ContractError::AssetNotRegistered {
            asset: asset.to_string(),
        });
    }
    if !asset_config.active {
        return Err(ContractError::AssetInactive {
            asset: asset.to_string(),
        });
    }

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Deposit amount must be greater than zero".to_string(),
        });
    }

    validate_fingerprint(&destination_fingerprint)?;

    rate_limit::check_and_consume(deps.storage, asset, amount, env.block.time)?;

    let locked = locked_balance(deps.storage, asset)?.checked_add(amount)?;
    LOCKED_BALANCES.save(deps.storage, asset, &locked)?;

    let sequence = ACCOUNT_SEQUENCES
        .may_load(deps.storage, &depositor)?
        .unwrap_or_default()
        + 1;
    ACCOUNT_SEQUENCES.save(deps.storage, &depositor, &sequence)?;

    DEPOSITS.save(
        deps.storage,
        (&depositor, sequence),
        &DepositRecord {
            asset: asset.to_string(),
            amount,
            destination_fingerprint: destination_fingerprint.clone(),
            deposited_at: env.block.time,
        },
    )?;

    STATS.update(deps.storage, |mut stats| -> Result<_, ContractError> {
        stats.total_deposits += 1;
        Ok(stats)
    })?;

    Ok(Response::new()
        .set_data(to_json_binary(&sequence)?)
        .add_event(events::deposit_recorded(
            asset,
            &depositor,
            amount,
            &destination_fingerprint,
            sequence,
        ))
        .add_attribute("method", "deposit")
        .add_attribute("asset", asset)
        .add_attribute("depositor", depositor)
        .add_attribute("amount", amount)
        .add_attribute("sequence", sequence.to_string())
        .add_attribute("locked_balance", locked))
}
