// contracts/agricrowd/src/storage.rs
//
// Storage helpers for Agricrowd.
//
// Layout:
//   instance   - contract configuration, project counter, commission pool
//   persistent - DataKey::Project(id)                 -> Project
//                DataKey::FunderAmount(id, funder)    -> i128 (gross funded)
//
// Every persistent read or write bumps the entry TTL so live projects never
// expire while the contract is in use.

use soroban_sdk::{contracttype, Address, Env};

use crate::{types::Project, Error};

const DAY_IN_LEDGERS: u32 = 17_280;
const BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const LIFETIME_THRESHOLD: u32 = BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    PlatformOwner,
    NativeToken,
    PriceFeed,
    ProjectCount,
    CommissionPool,
    Project(u64),
    FunderAmount(u64, Address),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(LIFETIME_THRESHOLD, BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, LIFETIME_THRESHOLD, BUMP_AMOUNT);
}

// ─────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::PlatformOwner)
}

pub fn set_config(env: &Env, platform_owner: &Address, native_token: &Address, price_feed: &Address) {
    let storage = env.storage().instance();
    storage.set(&DataKey::PlatformOwner, platform_owner);
    storage.set(&DataKey::NativeToken, native_token);
    storage.set(&DataKey::PriceFeed, price_feed);
    storage.set(&DataKey::ProjectCount, &0u64);
    storage.set(&DataKey::CommissionPool, &0i128);
    bump_instance(env);
}

fn get_address(env: &Env, key: &DataKey) -> Result<Address, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(key)
        .ok_or(Error::NotInitialized)
}

pub fn get_platform_owner(env: &Env) -> Result<Address, Error> {
    get_address(env, &DataKey::PlatformOwner)
}

pub fn get_native_token(env: &Env) -> Result<Address, Error> {
    get_address(env, &DataKey::NativeToken)
}

pub fn get_price_feed(env: &Env) -> Result<Address, Error> {
    get_address(env, &DataKey::PriceFeed)
}

// ─────────────────────────────────────────────────────────
// Project counter
// ─────────────────────────────────────────────────────────

pub fn get_project_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::ProjectCount)
        .unwrap_or(0)
}

/// Read and increment the project counter.
/// Returns the ID that should be used for the next project.
pub fn get_and_increment_project_id(env: &Env) -> Result<u64, Error> {
    let id = get_project_count(env);
    let next = id.checked_add(1).ok_or(Error::Overflow)?;
    env.storage().instance().set(&DataKey::ProjectCount, &next);
    bump_instance(env);
    Ok(id)
}

// ─────────────────────────────────────────────────────────
// Projects
// ─────────────────────────────────────────────────────────

/// Persist a project. Overwrites any existing record at the same ID.
pub fn save_project(env: &Env, project: &Project) {
    let key = DataKey::Project(project.id);
    env.storage().persistent().set(&key, project);
    bump_persistent(env, &key);
}

/// Load a project by ID, or `Error::InvalidProject` if it was never created.
pub fn load_project(env: &Env, id: u64) -> Result<Project, Error> {
    let key = DataKey::Project(id);
    let project = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::InvalidProject)?;
    bump_persistent(env, &key);
    Ok(project)
}

// ─────────────────────────────────────────────────────────
// Per-funder amounts
// ─────────────────────────────────────────────────────────

/// Cumulative gross amount `funder` has sent to `project_id` through
/// `fund_project`. Returns 0 for addresses that never funded it.
pub fn get_funder_amount(env: &Env, project_id: u64, funder: &Address) -> i128 {
    let key = DataKey::FunderAmount(project_id, funder.clone());
    match env.storage().persistent().get(&key) {
        Some(amount) => {
            bump_persistent(env, &key);
            amount
        }
        None => 0,
    }
}

/// Add `amount` to the funder's running total and return the previous total.
pub fn add_to_funder_amount(
    env: &Env,
    project_id: u64,
    funder: &Address,
    amount: i128,
) -> Result<i128, Error> {
    let previous = get_funder_amount(env, project_id, funder);
    let updated = previous.checked_add(amount).ok_or(Error::Overflow)?;
    let key = DataKey::FunderAmount(project_id, funder.clone());
    env.storage().persistent().set(&key, &updated);
    bump_persistent(env, &key);
    Ok(previous)
}

// ─────────────────────────────────────────────────────────
// Commission pool
// ─────────────────────────────────────────────────────────

pub fn get_commission_pool(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::CommissionPool)
        .unwrap_or(0)
}

pub fn add_to_commission_pool(env: &Env, amount: i128) -> Result<i128, Error> {
    let updated = get_commission_pool(env)
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    env.storage()
        .instance()
        .set(&DataKey::CommissionPool, &updated);
    Ok(updated)
}

/// Zero out the commission pool and return what it held.
#[cfg_attr(not(feature = "commission-withdrawal"), allow(dead_code))]
pub fn drain_commission_pool(env: &Env) -> i128 {
    let balance = get_commission_pool(env);
    if balance > 0 {
        env.storage()
            .instance()
            .set(&DataKey::CommissionPool, &0i128);
    }
    balance
}
