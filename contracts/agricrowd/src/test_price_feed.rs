extern crate std;

use soroban_sdk::testutils::Ledger;

use crate::{
    test_utils::{TestContext, UNIT},
    Error, RoundData,
};

#[test]
fn test_get_price_feed_returns_configured_address() {
    let ctx = TestContext::new();
    assert_eq!(ctx.client.get_price_feed(), ctx.feed.address);
}

#[test]
fn test_get_price_reads_latest_round() {
    let ctx = TestContext::new();
    assert_eq!(
        ctx.client.get_price(),
        RoundData {
            answer: 200_000_000_000,
            decimals: 8,
            updated_at: 100_000,
        }
    );
}

#[test]
fn test_get_price_is_not_cached() {
    let ctx = TestContext::new();
    ctx.env.ledger().with_mut(|li| li.timestamp = 200_000);
    ctx.feed.update_answer(&8, &150_000_000_000);

    let price = ctx.client.get_price();
    assert_eq!(price.answer, 150_000_000_000);
    assert_eq!(price.updated_at, 200_000);
}

#[test]
fn test_get_price_rejects_non_positive_answer() {
    let ctx = TestContext::new();
    ctx.feed.update_answer(&8, &0);
    assert_eq!(ctx.client.try_get_price(), Err(Ok(Error::InvalidPrice)));

    ctx.feed.update_answer(&8, &-1);
    assert_eq!(
        ctx.client.try_get_conversion_rate(&UNIT),
        Err(Ok(Error::InvalidPrice))
    );
}

#[test]
fn test_conversion_rate() {
    let ctx = TestContext::new();
    // 2 native units at 2000 each.
    assert_eq!(ctx.client.get_conversion_rate(&(2 * UNIT)), 4_000 * UNIT);
    assert_eq!(ctx.client.get_conversion_rate(&0), 0);
}

#[test]
fn test_conversion_rate_rejects_negative_amount() {
    let ctx = TestContext::new();
    assert_eq!(
        ctx.client.try_get_conversion_rate(&-1),
        Err(Ok(Error::InvalidAmount))
    );
}

#[test]
fn test_goal_in_reference_currency() {
    let ctx = TestContext::new();
    let (id, _) = ctx.create_project(1_000 * UNIT);
    let goal = ctx.client.get_project_details(&id).funding_goal;

    assert_eq!(ctx.client.get_conversion_rate(&goal), 2_000_000 * UNIT);
}
