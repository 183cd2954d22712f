//! Platform accounting.
//!
//! Commission is taken from `fund_project` contributions only, once, at
//! contribution time. Donations never touch the pool.
//!
//! Withdrawing the pool is compiled in only with the `commission-withdrawal`
//! feature. That path has no end-to-end coverage on a live network yet and
//! should be treated as unverified.

use soroban_sdk::Env;

use crate::{storage, Error};

/// Platform commission in basis points (5%).
pub const COMMISSION_BPS: i128 = 500;
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Split a funded `amount` into `(net, commission)`.
///
/// Commission rounds down, so the project never receives less than
/// `amount * 95%`.
pub fn split_commission(amount: i128) -> Result<(i128, i128), Error> {
    let commission = amount
        .checked_mul(COMMISSION_BPS)
        .ok_or(Error::Overflow)?
        / BPS_DENOMINATOR;
    Ok((amount - commission, commission))
}

/// Credit `commission` to the platform pool.
pub fn accrue(env: &Env, commission: i128) -> Result<(), Error> {
    if commission > 0 {
        storage::add_to_commission_pool(env, commission)?;
    }
    Ok(())
}

/// Transfer the whole pool to the platform owner.
#[cfg(feature = "commission-withdrawal")]
pub fn withdraw_commission(env: &Env, caller: &soroban_sdk::Address) -> Result<i128, Error> {
    use soroban_sdk::token;

    use crate::{auth, events};

    auth::require_platform_owner(env, caller)?;

    if storage::get_commission_pool(env) <= 0 {
        return Err(Error::NoCommissionAvailable);
    }

    let amount = storage::drain_commission_pool(env);
    let native = storage::get_native_token(env)?;
    token::Client::new(env, &native).transfer(&env.current_contract_address(), caller, &amount);

    events::emit_commission_withdrawn(env, caller.clone(), amount);
    Ok(amount)
}
