//! # Agricrowd Ledger Contract
//!
//! Soroban contract holding the authoritative funding state of the Agricrowd
//! platform.
//!
//! | Phase         | Entry Point(s)                                         |
//! |---------------|--------------------------------------------------------|
//! | Bootstrap     | [`Agricrowd::init`]                                    |
//! | Registration  | [`Agricrowd::create_project`]                          |
//! | Contributions | [`Agricrowd::fund_project`], [`Agricrowd::donate_project`] |
//! | Payouts       | [`Agricrowd::withdraw_funds`], `withdraw_commission`   |
//! | Pricing       | [`Agricrowd::get_price`], [`Agricrowd::get_conversion_rate`] |
//! | Queries       | `get_project_details`, `get_funder_amount`, ...        |
//!
//! ## Architecture
//!
//! Authorization lives in [`auth`], storage access in [`storage`], commission
//! math in [`platform`] and feed access in [`price_feed`]. This file holds the
//! public entry points and event emissions.
//!
//! Every entry point validates before it writes: a call that returns an
//! error leaves no state change and emits no event.

#![no_std]

#[cfg(test)]
extern crate std;

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, Env};

mod auth;
pub mod events;
pub mod platform;
pub mod price_feed;
mod storage;
mod types;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod test_commission;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_price_feed;
#[cfg(test)]
mod test_properties;

pub use price_feed::PriceFeedClient;
pub use types::{Project, RoundData};

/// Upper bound on a project's funding goal.
pub const MAX_GOAL: i128 = 1_000_000_000_000_000_000_000_000_000_000;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    InvalidAmount = 1,
    InvalidProject = 2,
    NotOwner = 3,
    NotPlatformOwner = 4,
    NothingToWithdraw = 5,
    NoCommissionAvailable = 6,
    AlreadyInitialized = 7,
    NotInitialized = 8,
    Overflow = 9,
    InvalidPrice = 10,
}

#[contract]
pub struct Agricrowd;

#[contractimpl]
impl Agricrowd {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract.
    ///
    /// Must be called exactly once immediately after deployment; later calls
    /// fail with `Error::AlreadyInitialized`.
    ///
    /// - `platform_owner` signs and becomes the only address allowed to
    ///   withdraw commission.
    /// - `native_token` is the asset contract used for every contribution.
    /// - `price_feed` is the aggregator queried by `get_price`.
    pub fn init(
        env: Env,
        platform_owner: Address,
        native_token: Address,
        price_feed: Address,
    ) -> Result<(), Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        platform_owner.require_auth();
        storage::set_config(&env, &platform_owner, &native_token, &price_feed);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Project lifecycle
    // ─────────────────────────────────────────────────────────

    /// Create a project owned by `owner` and return its id.
    ///
    /// Ids are sequential from 0. Projects are never updated or deleted.
    pub fn create_project(env: Env, owner: Address, funding_goal: i128) -> Result<u64, Error> {
        Self::require_initialized(&env)?;
        owner.require_auth();

        if funding_goal <= 0 || funding_goal > MAX_GOAL {
            return Err(Error::InvalidAmount);
        }

        let id = storage::get_and_increment_project_id(&env)?;
        let project = types::Project::new(id, owner.clone(), funding_goal, env.ledger().timestamp());
        storage::save_project(&env, &project);

        events::emit_project_created(&env, id, owner, funding_goal);
        Ok(id)
    }

    /// Fund a project through the commission-bearing path.
    ///
    /// The full `amount` moves from `funder` to the contract. The platform
    /// keeps `platform::COMMISSION_BPS`; the rest is credited to
    /// `total_funded`. The funder's running total grows by the full amount.
    pub fn fund_project(env: Env, funder: Address, project_id: u64, amount: i128) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        funder.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let mut project = storage::load_project(&env, project_id)?;
        let (net, commission) = platform::split_commission(amount)?;

        project.total_funded = project
            .total_funded
            .checked_add(net)
            .ok_or(Error::Overflow)?;

        let native = storage::get_native_token(&env)?;
        token::Client::new(&env, &native).transfer(&funder, &env.current_contract_address(), &amount);

        let previous = storage::add_to_funder_amount(&env, project_id, &funder, amount)?;
        if previous == 0 {
            project.funder_count = project.funder_count.saturating_add(1);
        }
        platform::accrue(&env, commission)?;
        storage::save_project(&env, &project);

        events::emit_project_funded(&env, project_id, funder, amount, commission);
        Ok(())
    }

    /// Donate to a project through the commission-free path.
    ///
    /// Donations are forwarded to the project owner in the same call;
    /// `total_donated` keeps the cumulative figure.
    pub fn donate_project(env: Env, donor: Address, project_id: u64, amount: i128) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        donor.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let mut project = storage::load_project(&env, project_id)?;
        project.total_donated = project
            .total_donated
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        let native = storage::get_native_token(&env)?;
        token::Client::new(&env, &native).transfer(&donor, &project.owner, &amount);

        storage::save_project(&env, &project);

        events::emit_project_donated(&env, project_id, donor, amount);
        Ok(())
    }

    /// Pay the project's net funded balance out to its owner.
    ///
    /// Only the owner may call this. There is no goal gate: the owner can
    /// withdraw whatever has been funded so far. Returns the amount paid.
    pub fn withdraw_funds(env: Env, caller: Address, project_id: u64) -> Result<i128, Error> {
        Self::require_initialized(&env)?;
        let mut project = storage::load_project(&env, project_id)?;
        auth::require_project_owner(&caller, &project)?;

        let amount = project.total_funded;
        if amount <= 0 {
            return Err(Error::NothingToWithdraw);
        }

        project.total_funded = 0;
        storage::save_project(&env, &project);

        let native = storage::get_native_token(&env)?;
        token::Client::new(&env, &native).transfer(&env.current_contract_address(), &project.owner, &amount);

        events::emit_funds_withdrawn(&env, project_id, project.owner, amount);
        Ok(amount)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_project_details(env: Env, project_id: u64) -> Result<Project, Error> {
        storage::load_project(&env, project_id)
    }

    /// Gross amount `funder` has sent to `project_id` via `fund_project`.
    pub fn get_funder_amount(env: Env, project_id: u64, funder: Address) -> Result<i128, Error> {
        storage::load_project(&env, project_id)?;
        Ok(storage::get_funder_amount(&env, project_id, &funder))
    }

    pub fn get_project_count(env: Env) -> u64 {
        storage::get_project_count(&env)
    }

    /// `true` once funded plus donated reaches the goal. Informational:
    /// nothing in the ledger is gated on it.
    pub fn is_goal_reached(env: Env, project_id: u64) -> Result<bool, Error> {
        let project = storage::load_project(&env, project_id)?;
        Ok(project.total_raised() >= project.funding_goal)
    }

    pub fn get_platform_owner(env: Env) -> Result<Address, Error> {
        storage::get_platform_owner(&env)
    }

    pub fn get_native_token(env: Env) -> Result<Address, Error> {
        storage::get_native_token(&env)
    }

    /// Commission accrued and not yet withdrawn.
    pub fn get_commission_balance(env: Env) -> i128 {
        storage::get_commission_pool(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Pricing
    // ─────────────────────────────────────────────────────────

    pub fn get_price_feed(env: Env) -> Result<Address, Error> {
        storage::get_price_feed(&env)
    }

    /// Latest datum from the configured price feed, read live.
    pub fn get_price(env: Env) -> Result<RoundData, Error> {
        price_feed::latest_price(&env)
    }

    /// Value of `amount` native units in the reference currency.
    pub fn get_conversion_rate(env: Env, amount: i128) -> Result<i128, Error> {
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }
        let price = price_feed::latest_price(&env)?;
        price_feed::convert(amount, &price)
    }

    // ─────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), Error> {
        if !storage::is_initialized(env) {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }
}

#[cfg(feature = "commission-withdrawal")]
#[contractimpl]
impl Agricrowd {
    /// Transfer the whole commission pool to the platform owner.
    ///
    /// Unverified on a live network; compiled only with the
    /// `commission-withdrawal` feature.
    pub fn withdraw_commission(env: Env, caller: Address) -> Result<i128, Error> {
        Self::require_initialized(&env)?;
        platform::withdraw_commission(&env, &caller)
    }
}
