#![no_std]

//! Penalty pool: a single-balance ledger that collects reward forfeited by
//! early exits from the staking contract.
//!
//! Only the configured depositor may credit the balance, and it must have
//! pushed the matching tokens to this contract first. Tokens that arrive by
//! any other route are never credited. Only the owner may withdraw.

pub mod events;

use common::{ownership, reentrancy, CommonError};
use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

const TOKEN: Symbol = symbol_short!("TOKEN");
const DEPOSITOR: Symbol = symbol_short!("DEPOSITR");
const BALANCE: Symbol = symbol_short!("BALANCE");
const TOTAL_IN: Symbol = symbol_short!("TOT_IN");
const TOTAL_OUT: Symbol = symbol_short!("TOT_OUT");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotOwner = 10,
    NotPendingOwner = 11,
    NoPendingOwner = 12,
    UnauthorizedDepositor = 13,
    ZeroAmount = 40,
    ZeroAddress = 41,
    InvalidInput = 42,
    InsufficientBalance = 60,
    DepositNotFunded = 61,
    Reentrant = 62,
    Overflow = 63,
}

impl From<CommonError> for ContractError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::NotInitialized => ContractError::NotInitialized,
            CommonError::AlreadyInitialized => ContractError::AlreadyInitialized,
            CommonError::NotOwner => ContractError::NotOwner,
            CommonError::NotPendingOwner => ContractError::NotPendingOwner,
            CommonError::NoPendingOwner => ContractError::NoPendingOwner,
            CommonError::Reentrant => ContractError::Reentrant,
            CommonError::BatchTooLarge | CommonError::EmptyBatch => ContractError::InvalidInput,
        }
    }
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct PenaltyPoolContract;

#[contractimpl]
impl PenaltyPoolContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the pool.
    ///
    /// * `token`     – SAC address of the asset held by the pool.
    /// * `depositor` – the only address allowed to credit the balance
    ///                 (normally the staking contract).
    pub fn initialize(
        env: Env,
        owner: Address,
        token: Address,
        depositor: Address,
    ) -> Result<(), ContractError> {
        if depositor == env.current_contract_address() {
            return Err(ContractError::ZeroAddress);
        }
        ownership::init_owner(&env, &owner)?;

        env.storage().instance().set(&TOKEN, &token);
        env.storage().instance().set(&DEPOSITOR, &depositor);

        events::publish_initialized(&env, owner, token, depositor);

        Ok(())
    }

    // ── Ledger ──────────────────────────────────────────────────────────────

    /// Credit `amount` to the pool balance.
    ///
    /// The depositor transfers the tokens first; the call fails with
    /// `DepositNotFunded` unless the pool's token holdings cover the credited
    /// balance plus `amount`.
    pub fn deposit(env: Env, depositor: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        depositor.require_auth();

        let authorized: Address = env
            .storage()
            .instance()
            .get(&DEPOSITOR)
            .ok_or(ContractError::NotInitialized)?;
        if depositor != authorized {
            return Err(ContractError::UnauthorizedDepositor);
        }
        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        let balance = Self::get_balance(env.clone());
        let new_balance = balance
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;

        let held = token::Client::new(&env, &Self::token(&env)?)
            .balance(&env.current_contract_address());
        if held < new_balance {
            return Err(ContractError::DepositNotFunded);
        }

        env.storage().instance().set(&BALANCE, &new_balance);
        let total_in: i128 = env.storage().instance().get(&TOTAL_IN).unwrap_or(0);
        env.storage()
            .instance()
            .set(&TOTAL_IN, &total_in.saturating_add(amount));

        events::publish_deposited(&env, depositor, amount, new_balance);

        Ok(())
    }

    /// Send `amount` of the credited balance to `to`. Owner only.
    pub fn withdraw(
        env: Env,
        caller: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        ownership::require_owner(&env, &caller)?;

        if to == env.current_contract_address() {
            return Err(ContractError::ZeroAddress);
        }
        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        let balance = Self::get_balance(env.clone());
        if amount > balance {
            return Err(ContractError::InsufficientBalance);
        }

        reentrancy::enter(&env)?;

        // Debit before the outbound transfer.
        let new_balance = balance - amount;
        env.storage().instance().set(&BALANCE, &new_balance);
        let total_out: i128 = env.storage().instance().get(&TOTAL_OUT).unwrap_or(0);
        env.storage()
            .instance()
            .set(&TOTAL_OUT, &total_out.saturating_add(amount));

        token::Client::new(&env, &Self::token(&env)?).transfer(
            &env.current_contract_address(),
            &to,
            &amount,
        );

        reentrancy::exit(&env);

        events::publish_withdrawn(&env, caller, to, amount, new_balance);

        Ok(())
    }

    /// Replace the authorized depositor. Owner only.
    pub fn set_authorized_depositor(
        env: Env,
        caller: Address,
        depositor: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        ownership::require_owner(&env, &caller)?;

        if depositor == env.current_contract_address() {
            return Err(ContractError::ZeroAddress);
        }

        let previous: Address = env
            .storage()
            .instance()
            .get(&DEPOSITOR)
            .ok_or(ContractError::NotInitialized)?;
        env.storage().instance().set(&DEPOSITOR, &depositor);

        events::publish_depositor_set(&env, caller, previous, depositor);

        Ok(())
    }

    // ── Ownership (two-step) ────────────────────────────────────────────────

    pub fn propose_owner(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        ownership::propose_owner(&env, &caller, &new_owner)?;

        events::publish_owner_proposed(&env, caller, new_owner);

        Ok(())
    }

    pub fn accept_ownership(env: Env, new_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_owner.require_auth();
        let previous = ownership::accept_ownership(&env, &new_owner)?;

        events::publish_owner_accepted(&env, previous, new_owner);

        Ok(())
    }

    pub fn cancel_ownership_transfer(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        let cancelled = ownership::cancel_ownership_transfer(&env, &caller)?;

        events::publish_owner_cancelled(&env, caller, cancelled);

        Ok(())
    }

    // ── View functions ──────────────────────────────────────────────────────

    pub fn get_balance(env: Env) -> i128 {
        env.storage().instance().get(&BALANCE).unwrap_or(0)
    }

    pub fn get_total_deposited(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_IN).unwrap_or(0)
    }

    pub fn get_total_withdrawn(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_OUT).unwrap_or(0)
    }

    pub fn get_authorized_depositor(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&DEPOSITOR)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_token(env: Env) -> Result<Address, ContractError> {
        Self::token(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        ownership::get_owner(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn get_pending_owner(env: Env) -> Option<Address> {
        ownership::get_pending_owner(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        ownership::get_owner(&env).is_some()
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if ownership::get_owner(env).is_none() {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)
    }
}
