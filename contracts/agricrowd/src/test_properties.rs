//! Property tests for the funding arithmetic.

use proptest::prelude::*;

use crate::{
    platform::{split_commission, BPS_DENOMINATOR, COMMISSION_BPS},
    test_utils::{TestContext, UNIT},
    Error,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_fund_credits_exact_amounts(amount in 1i128..=1_000 * UNIT) {
        let ctx = TestContext::new();
        let (id, _) = ctx.create_project(1_000 * UNIT);
        let funder = ctx.funded_address(amount);

        ctx.client.fund_project(&funder, &id, &amount);

        let commission = amount * COMMISSION_BPS / BPS_DENOMINATOR;
        let project = ctx.client.get_project_details(&id);
        prop_assert_eq!(ctx.client.get_funder_amount(&id, &funder), amount);
        prop_assert_eq!(project.total_funded, amount - commission);
        prop_assert_eq!(ctx.client.get_commission_balance(), commission);
        prop_assert_eq!(ctx.token.balance(&ctx.client.address), amount);
    }

    #[test]
    fn prop_donate_never_touches_pool(
        funded in 1i128..=100 * UNIT,
        donated in 1i128..=100 * UNIT,
    ) {
        let ctx = TestContext::new();
        let (id, _) = ctx.create_project(1_000 * UNIT);
        let backer = ctx.funded_address(funded + donated);

        ctx.client.fund_project(&backer, &id, &funded);
        let pool = ctx.client.get_commission_balance();
        ctx.client.donate_project(&backer, &id, &donated);

        prop_assert_eq!(ctx.client.get_commission_balance(), pool);
        prop_assert_eq!(ctx.client.get_project_details(&id).total_donated, donated);
    }

    #[test]
    fn prop_withdraw_zeroes_balance_and_rejects_strangers(
        amounts in proptest::collection::vec(1i128..=10 * UNIT, 1..5),
    ) {
        let ctx = TestContext::new();
        let (id, owner) = ctx.create_project(1_000 * UNIT);
        let funder = ctx.funded_address(amounts.iter().sum());
        for amount in &amounts {
            ctx.client.fund_project(&funder, &id, amount);
        }

        prop_assert_eq!(ctx.client.try_withdraw_funds(&funder, &id), Err(Ok(Error::NotOwner)));

        let expected = ctx.client.get_project_details(&id).total_funded;
        prop_assert_eq!(ctx.client.withdraw_funds(&owner, &id), expected);
        prop_assert_eq!(ctx.client.get_project_details(&id).total_funded, 0);
        prop_assert_eq!(
            ctx.client.try_withdraw_funds(&owner, &id),
            Err(Ok(Error::NothingToWithdraw))
        );
    }

    #[test]
    fn prop_split_is_lossless(amount in 0i128..=i128::MAX / COMMISSION_BPS) {
        let (net, commission) = split_commission(amount).unwrap();
        prop_assert_eq!(net + commission, amount);
        prop_assert!(commission >= 0);
        prop_assert!(net >= amount - amount / 20);
    }
}
