extern crate std;

use soroban_sdk::{symbol_short, testutils::Events, vec, IntoVal, TryIntoVal};

use crate::events::{FundsWithdrawn, ProjectCreated, ProjectDonated, ProjectFunded};
use crate::test_utils::{TestContext, UNIT};

#[test]
fn test_project_created_event() {
    let ctx = TestContext::new();
    let (id, owner) = ctx.create_project(5_000);

    let all_events = ctx.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("created"), project_id)
    assert_eq!(last_event.0, ctx.client.address);
    let expected_topics = vec![
        &ctx.env,
        symbol_short!("created").into_val(&ctx.env),
        id.into_val(&ctx.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ProjectCreated = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(
        event_data,
        ProjectCreated {
            project_id: id,
            owner,
            funding_goal: 5_000,
        }
    );
}

#[test]
fn test_project_funded_event() {
    let ctx = TestContext::new();
    let (id, _) = ctx.create_project(1_000 * UNIT);
    let funder = ctx.funded_address(2 * UNIT);

    ctx.client.fund_project(&funder, &id, &(2 * UNIT));

    let all_events = ctx.env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, ctx.client.address);
    let expected_topics = vec![
        &ctx.env,
        symbol_short!("funded").into_val(&ctx.env),
        id.into_val(&ctx.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ProjectFunded = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(
        event_data,
        ProjectFunded {
            project_id: id,
            funder,
            amount: 2 * UNIT,
            commission: 1_000_000,
        }
    );
}

#[test]
fn test_project_donated_event() {
    let ctx = TestContext::new();
    let (id, _) = ctx.create_project(1_000 * UNIT);
    let donor = ctx.funded_address(UNIT);

    ctx.client.donate_project(&donor, &id, &UNIT);

    let all_events = ctx.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &ctx.env,
        symbol_short!("donated").into_val(&ctx.env),
        id.into_val(&ctx.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ProjectDonated = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(
        event_data,
        ProjectDonated {
            project_id: id,
            donor,
            amount: UNIT,
        }
    );
}

#[test]
fn test_funds_withdrawn_event() {
    let ctx = TestContext::new();
    let (id, owner) = ctx.create_project(1_000 * UNIT);
    let funder = ctx.funded_address(2 * UNIT);
    ctx.client.fund_project(&funder, &id, &(2 * UNIT));

    ctx.client.withdraw_funds(&owner, &id);

    let all_events = ctx.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &ctx.env,
        symbol_short!("withdrawn").into_val(&ctx.env),
        id.into_val(&ctx.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: FundsWithdrawn = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(
        event_data,
        FundsWithdrawn {
            project_id: id,
            owner,
            amount: 19_000_000,
        }
    );
}
