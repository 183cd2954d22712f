extern crate std;

use crate::{
    test_utils::{TestContext, UNIT},
    Error,
};

#[test]
fn test_commission_accrues_only_from_funding() {
    let ctx = TestContext::new();
    let (id, _) = ctx.create_project(1_000 * UNIT);
    let backer = ctx.funded_address(100 * UNIT);

    ctx.client.fund_project(&backer, &id, &(10 * UNIT));
    ctx.client.donate_project(&backer, &id, &(10 * UNIT));
    ctx.client.fund_project(&backer, &id, &(4 * UNIT));

    assert_eq!(ctx.client.get_commission_balance(), 7_000_000);
}

#[test]
fn test_commission_pooled_across_projects() {
    let ctx = TestContext::new();
    let (a, _) = ctx.create_project(1_000 * UNIT);
    let (b, _) = ctx.create_project(1_000 * UNIT);
    let backer = ctx.funded_address(100 * UNIT);

    ctx.client.fund_project(&backer, &a, &(2 * UNIT));
    ctx.client.fund_project(&backer, &b, &(6 * UNIT));

    assert_eq!(ctx.client.get_commission_balance(), 4_000_000);
}

#[test]
fn test_commission_not_recomputed_on_withdrawal() {
    let ctx = TestContext::new();
    let (id, owner) = ctx.create_project(1_000 * UNIT);
    let backer = ctx.funded_address(100 * UNIT);

    ctx.client.fund_project(&backer, &id, &(2 * UNIT));
    let pool = ctx.client.get_commission_balance();
    ctx.client.withdraw_funds(&owner, &id);

    assert_eq!(ctx.client.get_commission_balance(), pool);
}

#[cfg(feature = "commission-withdrawal")]
mod withdrawal {
    use super::*;

    #[test]
    fn test_platform_owner_withdraws_commission() {
        let ctx = TestContext::new();
        let (id, _) = ctx.create_project(1_000 * UNIT);
        let backer = ctx.funded_address(10 * UNIT);
        ctx.client.fund_project(&backer, &id, &(2 * UNIT));

        let before = ctx.token.balance(&ctx.platform_owner);
        let paid = ctx.client.withdraw_commission(&ctx.platform_owner);

        assert_eq!(paid, 1_000_000);
        assert_eq!(ctx.token.balance(&ctx.platform_owner), before + 1_000_000);
        assert_eq!(ctx.client.get_commission_balance(), 0);
        // The project's net balance is untouched.
        assert_eq!(ctx.token.balance(&ctx.client.address), 19_000_000);
    }

    #[test]
    fn test_non_platform_owner_cannot_withdraw_commission() {
        let ctx = TestContext::new();
        let (id, owner) = ctx.create_project(1_000 * UNIT);
        let backer = ctx.funded_address(10 * UNIT);
        ctx.client.fund_project(&backer, &id, &(2 * UNIT));

        assert_eq!(
            ctx.client.try_withdraw_commission(&owner),
            Err(Ok(Error::NotPlatformOwner))
        );
        assert_eq!(ctx.client.get_commission_balance(), 1_000_000);
    }

    #[test]
    fn test_withdraw_commission_with_empty_pool_fails() {
        let ctx = TestContext::new();

        assert_eq!(
            ctx.client.try_withdraw_commission(&ctx.platform_owner),
            Err(Ok(Error::NoCommissionAvailable))
        );
    }

    #[test]
    fn test_donations_leave_pool_empty() {
        let ctx = TestContext::new();
        let (id, _) = ctx.create_project(1_000 * UNIT);
        let donor = ctx.funded_address(10 * UNIT);
        ctx.client.donate_project(&donor, &id, &(2 * UNIT));

        assert_eq!(
            ctx.client.try_withdraw_commission(&ctx.platform_owner),
            Err(Ok(Error::NoCommissionAvailable))
        );
    }
}
