// contracts/agricrowd/src/types.rs
//
// On-chain data shapes. Per-funder amounts are stored under their own key
// (DataKey::FunderAmount) so the Project record stays a fixed size no matter
// how many funders a project attracts.

use soroban_sdk::{contracttype, Address};

/// A funding project stored on-chain.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    /// Sequential identifier, starting at 0.
    pub id: u64,
    /// Creator of the project. The only address allowed to withdraw.
    pub owner: Address,
    /// Target amount in native token units. Immutable.
    pub funding_goal: i128,
    /// Net amount received through `fund_project` (commission already
    /// deducted). Reset to zero by `withdraw_funds`.
    pub total_funded: i128,
    /// Cumulative amount received through `donate_project`. Never reset.
    pub total_donated: i128,
    /// Number of distinct addresses that have called `fund_project`.
    pub funder_count: u32,
    /// Ledger timestamp at creation.
    pub created_at: u64,
}

impl Project {
    pub fn new(id: u64, owner: Address, funding_goal: i128, created_at: u64) -> Self {
        Self {
            id,
            owner,
            funding_goal,
            total_funded: 0,
            total_donated: 0,
            funder_count: 0,
            created_at,
        }
    }

    /// Everything the project has raised so far, funded and donated.
    pub fn total_raised(&self) -> i128 {
        self.total_funded.saturating_add(self.total_donated)
    }
}

/// Latest datum reported by a price feed.
///
/// `answer` is the price of one native unit in the reference currency,
/// scaled by `10^decimals`. `updated_at` is the feed's own timestamp; the
/// ledger does not judge freshness.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundData {
    pub answer: i128,
    pub decimals: u32,
    pub updated_at: u64,
}
