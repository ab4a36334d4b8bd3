//! Custody Bridge Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_admin, execute_add_relayer, execute_cancel_admin_proposal,
    execute_cancel_large_withdrawal, execute_deposit_native, execute_deregister_asset,
    execute_emergency_release, execute_large_withdrawal, execute_pause, execute_propose_admin,
    execute_receive, execute_register_asset, execute_remove_rate_limit, execute_remove_relayer,
    execute_set_large_withdrawal_delay, execute_set_large_withdrawal_threshold,
    execute_set_rate_limit, execute_unpause, execute_update_asset, execute_withdraw,
    register_relayer, validate_delay,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_account_sequence, query_asset, query_assets, query_config, query_counterpart_id,
    query_deposit, query_is_registered, query_is_relayer, query_large_withdrawals,
    query_locked_balance, query_pending_admin, query_rate_limit, query_relayers, query_stats,
    query_withdrawal_digest, query_withdrawal_state, query_withdrawal_threshold,
};
use crate::state::{
    Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, DEFAULT_LARGE_WITHDRAWAL_DELAY,
    RELAYER_COUNT, STATS,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;

    if msg.relayers.is_empty() {
        return Err(ContractError::NoRelayers);
    }

    let large_withdrawal_delay = msg
        .large_withdrawal_delay
        .unwrap_or(DEFAULT_LARGE_WITHDRAWAL_DELAY);
    validate_delay(large_withdrawal_delay)?;

    let config = Config {
        admin,
        paused: false,
        large_withdrawal_delay,
    };
    CONFIG.save(deps.storage, &config)?;

    let mut relayer_count = 0u32;
    for relayer in msg.relayers {
        let address = deps.api.addr_validate(&relayer.address)?;
        register_relayer(deps.storage, &address, &relayer.signer)?;
        relayer_count += 1;
    }
    RELAYER_COUNT.save(deps.storage, &relayer_count)?;

    STATS.save(deps.storage, &Stats::default())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("relayer_count", relayer_count.to_string())
        .add_attribute("large_withdrawal_delay", large_withdrawal_delay.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Deposits
        ExecuteMsg::DepositNative {
            destination_fingerprint,
        } => execute_deposit_native(deps, env, info, destination_fingerprint),
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, env, info, cw20_msg),

        // Withdrawals
        ExecuteMsg::Withdraw {
            asset,
            amount,
            recipient,
            withdrawal_id,
            proof,
        } => execute_withdraw(
            deps,
            env,
            info,
            asset,
            amount,
            recipient,
            withdrawal_id,
            proof,
        ),
        ExecuteMsg::ExecuteLargeWithdrawal { withdrawal_id } => {
            execute_large_withdrawal(deps, env, info, withdrawal_id)
        }
        ExecuteMsg::CancelLargeWithdrawal { withdrawal_id } => {
            execute_cancel_large_withdrawal(deps, info, withdrawal_id)
        }

        // Token registry
        ExecuteMsg::RegisterAsset {
            asset,
            counterpart_id,
            is_native,
        } => execute_register_asset(deps, info, asset, counterpart_id, is_native),
        ExecuteMsg::DeregisterAsset { asset } => execute_deregister_asset(deps, info, asset),
        ExecuteMsg::UpdateAsset {
            asset,
            counterpart_id,
            active,
        } => execute_update_asset(deps, info, asset, counterpart_id, active),

        // Limits
        ExecuteMsg::SetRateLimit {
            asset,
            max_amount,
            period_seconds,
        } => execute_set_rate_limit(deps, env, info, asset, max_amount, period_seconds),
        ExecuteMsg::RemoveRateLimit { asset } => execute_remove_rate_limit(deps, info, asset),
        ExecuteMsg::SetLargeWithdrawalThreshold { asset, threshold } => {
            execute_set_large_withdrawal_threshold(deps, info, asset, threshold)
        }
        ExecuteMsg::SetLargeWithdrawalDelay { delay_seconds } => {
            execute_set_large_withdrawal_delay(deps, info, delay_seconds)
        }

        // Relayer management
        ExecuteMsg::AddRelayer { address, signer } => {
            execute_add_relayer(deps, info, address, signer)
        }
        ExecuteMsg::RemoveRelayer { address } => execute_remove_relayer(deps, info, address),

        // Admin operations
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
        ExecuteMsg::EmergencyRelease {
            asset,
            amount,
            recipient,
        } => execute_emergency_release(deps, info, asset, amount, recipient),
        ExecuteMsg::ProposeAdmin { new_admin } => execute_propose_admin(deps, env, info, new_admin),
        ExecuteMsg::AcceptAdmin {} => execute_accept_admin(deps, env, info),
        ExecuteMsg::CancelAdminProposal {} => execute_cancel_admin_proposal(deps, info),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        // Core
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
        QueryMsg::PendingAdmin {} => to_json_binary(&query_pending_admin(deps)?),

        // Token registry
        QueryMsg::Asset { asset } => to_json_binary(&query_asset(deps, asset)?),
        QueryMsg::Assets { start_after, limit } => {
            to_json_binary(&query_assets(deps, start_after, limit)?)
        }
        QueryMsg::IsRegistered { asset } => to_json_binary(&query_is_registered(deps, asset)?),
        QueryMsg::CounterpartId { asset } => to_json_binary(&query_counterpart_id(deps, asset)?),

        // Deposit ledger
        QueryMsg::LockedBalance { asset } => to_json_binary(&query_locked_balance(deps, asset)?),
        QueryMsg::AccountSequence { account } => {
            to_json_binary(&query_account_sequence(deps, account)?)
        }
        QueryMsg::Deposit { account, sequence } => {
            to_json_binary(&query_deposit(deps, account, sequence)?)
        }

        // Withdrawals
        QueryMsg::WithdrawalState { withdrawal_id } => {
            to_json_binary(&query_withdrawal_state(deps, env, withdrawal_id)?)
        }
        QueryMsg::LargeWithdrawals { start_after, limit } => {
            to_json_binary(&query_large_withdrawals(deps, env, start_after, limit)?)
        }
        QueryMsg::WithdrawalThreshold { asset } => {
            to_json_binary(&query_withdrawal_threshold(deps, asset)?)
        }
        QueryMsg::WithdrawalDigest {
            asset,
            amount,
            recipient,
            withdrawal_id,
        } => to_json_binary(&query_withdrawal_digest(
            deps,
            env,
            asset,
            amount,
            recipient,
            withdrawal_id,
        )?),

        // Limits & relayers
        QueryMsg::RateLimit { asset } => to_json_binary(&query_rate_limit(deps, env, asset)?),
        QueryMsg::Relayers {} => to_json_binary(&query_relayers(deps)?),
        QueryMsg::IsRelayer { address } => to_json_binary(&query_is_relayer(deps, address)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    // Backfill items added after the first release
    if STATS.may_load(deps.storage)?.is_none() {
        STATS.save(deps.storage, &Stats::default())?;
    }

    let mut config = CONFIG.load(deps.storage)?;
    if validate_delay(config.large_withdrawal_delay).is_err() {
        config.large_withdrawal_delay = DEFAULT_LARGE_WITHDRAWAL_DELAY;
        CONFIG.save(deps.storage, &config)?;
    }

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION)
        .add_attribute(
            "large_withdrawal_delay",
            config.large_withdrawal_delay.to_string(),
        ))
}
