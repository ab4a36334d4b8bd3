//! Shared cw-multi-test harness for the custody bridge integration tests.
//!
//! Each test binary pulls in only what it needs.
#![allow(dead_code)]

use cosmwasm_std::{coins, to_json_binary, Addr, Binary, Empty, Uint128};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;

use custody_bridge::error::ContractError;
use custody_bridge::hash::keccak256;
use custody_bridge::msg::{
    AccountSequenceResponse, ExecuteMsg, InstantiateMsg, LockedBalanceResponse, QueryMsg,
    ReceiveMsg, RelayerInit, WithdrawalDigestResponse, WithdrawalStateResponse,
};

pub const DENOM: &str = "uluna";
pub const COUNTERPART_ID: &str = "0x000000000000000000000000a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
pub const INITIAL_BALANCE: u128 = 10_000_000_000;
pub const DEFAULT_DELAY: u64 = 86_400;

// ============================================================================
// Contracts
// ============================================================================

pub fn contract_bridge() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        custody_bridge::contract::execute,
        custody_bridge::contract::instantiate,
        custody_bridge::contract::query,
    )
    .with_migrate(custody_bridge::contract::migrate);
    Box::new(contract)
}

pub fn contract_cw20() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

// ============================================================================
// Relayer Keys
// ============================================================================

/// A relayer account and the secp256k1 key it signs proofs with.
pub struct Relayer {
    pub addr: Addr,
    pub key: SigningKey,
}

impl Relayer {
    pub fn new(addr: &str, seed: u8) -> Self {
        Self {
            addr: Addr::unchecked(addr),
            key: SigningKey::from_slice(&[seed; 32]).unwrap(),
        }
    }

    /// 20-byte signer address registered with the bridge.
    pub fn signer(&self) -> Binary {
        let point = self.key.verifying_key().as_affine().to_encoded_point(false);
        let hash = keccak256(&point.as_bytes()[1..]);
        Binary::from(hash[12..].to_vec())
    }

    pub fn init(&self) -> RelayerInit {
        RelayerInit {
            address: self.addr.to_string(),
            signer: self.signer(),
        }
    }

    /// 65-byte `r || s || v` proof over `digest`.
    pub fn sign(&self, digest: &[u8]) -> Binary {
        let (signature, recovery_id) = self.key.sign_prehash_recoverable(digest).unwrap();
        let mut proof = signature.to_bytes().to_vec();
        proof.push(recovery_id.to_byte());
        Binary::from(proof)
    }
}

pub fn fingerprint(seed: u8) -> Binary {
    Binary::from(vec![seed; 32])
}

pub fn withdrawal_id(seed: u8) -> Binary {
    Binary::from(vec![seed; 32])
}

/// Assert that `res` failed with exactly `expected`.
pub fn assert_error<T: std::fmt::Debug>(res: anyhow::Result<T>, expected: ContractError) {
    let err = res.unwrap_err();
    assert_eq!(err.root_cause().to_string(), expected.to_string());
}

// ============================================================================
// Test Environment
// ============================================================================

pub struct TestEnv {
    pub app: App,
    pub bridge: Addr,
    pub admin: Addr,
    pub relayer: Relayer,
    pub user: Addr,
    pub recipient: Addr,
}

/// Bridge with one relayer and `uluna` registered as a native asset.
pub fn setup() -> TestEnv {
    let mut app = App::default();
    let admin = Addr::unchecked("terra1admin");
    let relayer = Relayer::new("terra1relayer", 7);
    let user = Addr::unchecked("terra1user");
    let recipient = Addr::unchecked("terra1recipient");

    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &admin, coins(INITIAL_BALANCE, DENOM))
            .unwrap();
        router
            .bank
            .init_balance(storage, &user, coins(INITIAL_BALANCE, DENOM))
            .unwrap();
    });

    let code_id = app.store_code(contract_bridge());
    let bridge = app
        .instantiate_contract(
            code_id,
            admin.clone(),
            &InstantiateMsg {
                admin: admin.to_string(),
                relayers: vec![relayer.init()],
                large_withdrawal_delay: None,
            },
            &[],
            "custody-bridge",
            Some(admin.to_string()),
        )
        .unwrap();

    let mut env = TestEnv {
        app,
        bridge,
        admin,
        relayer,
        user,
        recipient,
    };
    env.register_asset(DENOM, true).unwrap();
    env
}

impl TestEnv {
    pub fn admin_execute(&mut self, msg: &ExecuteMsg) -> anyhow::Result<AppResponse> {
        self.app
            .execute_contract(self.admin.clone(), self.bridge.clone(), msg, &[])
    }

    pub fn register_asset(&mut self, asset: &str, is_native: bool) -> anyhow::Result<AppResponse> {
        self.admin_execute(&ExecuteMsg::RegisterAsset {
            asset: asset.to_string(),
            counterpart_id: COUNTERPART_ID.to_string(),
            is_native,
        })
    }

    pub fn advance(&mut self, seconds: u64) {
        self.app.update_block(|block| {
            block.time = block.time.plus_seconds(seconds);
            block.height += seconds / 5 + 1;
        });
    }

    pub fn now(&self) -> u64 {
        self.app.block_info().time.seconds()
    }

    // ------------------------------------------------------------------------
    // Deposits
    // ------------------------------------------------------------------------

    pub fn deposit_native(
        &mut self,
        sender: &Addr,
        amount: u128,
        destination_fingerprint: Binary,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            sender.clone(),
            self.bridge.clone(),
            &ExecuteMsg::DepositNative {
                destination_fingerprint,
            },
            &coins(amount, DENOM),
        )
    }

    /// Instantiate a CW20 token funded to the user and register it.
    pub fn setup_cw20(&mut self) -> Addr {
        let code_id = self.app.store_code(contract_cw20());
        let token = self
            .app
            .instantiate_contract(
                code_id,
                self.admin.clone(),
                &cw20_base::msg::InstantiateMsg {
                    name: "Wrapped Token".to_string(),
                    symbol: "WTKN".to_string(),
                    decimals: 6,
                    initial_balances: vec![Cw20Coin {
                        address: self.user.to_string(),
                        amount: Uint128::new(INITIAL_BALANCE),
                    }],
                    mint: None,
                    marketing: None,
                },
                &[],
                "wrapped-token",
                None,
            )
            .unwrap();
        self.register_asset(token.as_str(), false).unwrap();
        token
    }

    pub fn deposit_cw20(
        &mut self,
        token: &Addr,
        sender: &Addr,
        amount: u128,
        destination_fingerprint: Binary,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            sender.clone(),
            token.clone(),
            &Cw20ExecuteMsg::Send {
                contract: self.bridge.to_string(),
                amount: Uint128::new(amount),
                msg: to_json_binary(&ReceiveMsg::Deposit {
                    destination_fingerprint,
                })
                .unwrap(),
            },
            &[],
        )
    }

    // ------------------------------------------------------------------------
    // Withdrawals
    // ------------------------------------------------------------------------

    pub fn digest(&self, asset: &str, amount: u128, recipient: &Addr, id: &Binary) -> Binary {
        let res: WithdrawalDigestResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.bridge,
                &QueryMsg::WithdrawalDigest {
                    asset: asset.to_string(),
                    amount: Uint128::new(amount),
                    recipient: recipient.to_string(),
                    withdrawal_id: id.clone(),
                },
            )
            .unwrap();
        res.digest
    }

    /// Proof from the registered relayer key.
    pub fn proof(&self, asset: &str, amount: u128, recipient: &Addr, id: &Binary) -> Binary {
        self.relayer
            .sign(self.digest(asset, amount, recipient, id).as_slice())
    }

    pub fn withdraw_with_proof(
        &mut self,
        sender: &Addr,
        asset: &str,
        amount: u128,
        recipient: &Addr,
        id: &Binary,
        proof: Binary,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            sender.clone(),
            self.bridge.clone(),
            &ExecuteMsg::Withdraw {
                asset: asset.to_string(),
                amount: Uint128::new(amount),
                recipient: recipient.to_string(),
                withdrawal_id: id.clone(),
                proof,
            },
            &[],
        )
    }

    /// Withdraw `amount` of `uluna` to the default recipient, signed and
    /// submitted by the registered relayer.
    pub fn withdraw(&mut self, amount: u128, id: &Binary) -> anyhow::Result<AppResponse> {
        let relayer = self.relayer.addr.clone();
        let recipient = self.recipient.clone();
        let proof = self.proof(DENOM, amount, &recipient, id);
        self.withdraw_with_proof(&relayer, DENOM, amount, &recipient, id, proof)
    }

    pub fn execute_large(&mut self, id: &Binary) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            self.relayer.addr.clone(),
            self.bridge.clone(),
            &ExecuteMsg::ExecuteLargeWithdrawal {
                withdrawal_id: id.clone(),
            },
            &[],
        )
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn locked(&self, asset: &str) -> u128 {
        let res: LockedBalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.bridge,
                &QueryMsg::LockedBalance {
                    asset: asset.to_string(),
                },
            )
            .unwrap();
        res.locked.u128()
    }

    pub fn sequence(&self, account: &Addr) -> u64 {
        let res: AccountSequenceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.bridge,
                &QueryMsg::AccountSequence {
                    account: account.to_string(),
                },
            )
            .unwrap();
        res.sequence
    }

    pub fn withdrawal_state(&self, id: &Binary) -> WithdrawalStateResponse {
        self.app
            .wrap()
            .query_wasm_smart(
                &self.bridge,
                &QueryMsg::WithdrawalState {
                    withdrawal_id: id.clone(),
                },
            )
            .unwrap()
    }

    pub fn native_balance(&self, addr: &Addr) -> u128 {
        self.app
            .wrap()
            .query_balance(addr, DENOM)
            .unwrap()
            .amount
            .u128()
    }

    pub fn cw20_balance(&self, token: &Addr, addr: &Addr) -> u128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                token,
                &Cw20QueryMsg::Balance {
                    address: addr.to_string(),
                },
            )
            .unwrap();
        res.balance.u128()
    }
}

/// Value of an attribute on the first custom event of type `ty`.
pub fn event_attr(res: &AppResponse, ty: &str, key: &str) -> Option<String> {
    let ty = format!("wasm-{}", ty);
    res.events
        .iter()
        .find(|e| e.ty == ty)
        .and_then(|e| e.attributes.iter().find(|a| a.key == key))
        .map(|a| a.value.clone())
}

/// Value of a response attribute set by the contract itself.
pub fn response_attr(res: &AppResponse, key: &str) -> Option<String> {
    res.events
        .iter()
        .filter(|e| e.ty == "wasm")
        .flat_map(|e| e.attributes.iter())
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
}
