//! Price oracle adapter.
//!
//! The ledger only stores the feed address; prices are read on demand from
//! the feed contract and never cached. `RoundData::updated_at` is passed
//! through untouched: deciding whether a datum is fresh enough is the
//! caller's job.

use soroban_sdk::{contractclient, Env};

use crate::{storage, types::RoundData, Error};

/// Interface every price feed contract must expose.
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    fn latest_round_data(env: Env) -> RoundData;
}

/// Fetch the latest datum from the configured feed.
pub fn latest_price(env: &Env) -> Result<RoundData, Error> {
    let feed = storage::get_price_feed(env)?;
    let data = PriceFeedClient::new(env, &feed).latest_round_data();
    if data.answer <= 0 {
        return Err(Error::InvalidPrice);
    }
    Ok(data)
}

/// Convert `amount` native units to the reference currency using `price`.
///
/// The result keeps the scale of `amount`: 1 native unit at an answer of
/// `2_000 * 10^decimals` converts to 2_000 reference units.
pub fn convert(amount: i128, price: &RoundData) -> Result<i128, Error> {
    let scale = 10i128
        .checked_pow(price.decimals)
        .ok_or(Error::Overflow)?;
    amount
        .checked_mul(price.answer)
        .and_then(|v| v.checked_div(scale))
        .ok_or(Error::Overflow)
}
