extern crate std;

use soroban_sdk::{
    contract, contractimpl, symbol_short,
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

use crate::{Agricrowd, AgricrowdClient, RoundData};

/// 1 native unit in stroops.
pub const UNIT: i128 = 10_000_000;

/// Test double for an aggregator-style price feed.
#[contract]
pub struct MockV3Aggregator;

#[contractimpl]
impl MockV3Aggregator {
    pub fn update_answer(env: Env, decimals: u32, answer: i128) {
        let round = RoundData {
            answer,
            decimals,
            updated_at: env.ledger().timestamp(),
        };
        env.storage().instance().set(&symbol_short!("round"), &round);
    }

    pub fn latest_round_data(env: Env) -> RoundData {
        env.storage()
            .instance()
            .get(&symbol_short!("round"))
            .unwrap_or(RoundData {
                answer: 0,
                decimals: 8,
                updated_at: 0,
            })
    }
}

pub struct TestContext {
    pub env: Env,
    pub client: AgricrowdClient<'static>,
    pub platform_owner: Address,
    pub token: token::Client<'static>,
    pub sac: token::StellarAssetClient<'static>,
    pub feed: MockV3AggregatorClient<'static>,
}

impl TestContext {
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().with_mut(|li| li.timestamp = 100_000);

        let platform_owner = Address::generate(&env);

        let asset = env.register_stellar_asset_contract_v2(platform_owner.clone());
        let token = token::Client::new(&env, &asset.address());
        let sac = token::StellarAssetClient::new(&env, &asset.address());

        let feed_id = env.register(MockV3Aggregator, ());
        let feed = MockV3AggregatorClient::new(&env, &feed_id);
        // 2000 reference units per native unit, 8 decimals.
        feed.update_answer(&8, &200_000_000_000);

        let contract_id = env.register(Agricrowd, ());
        let client = AgricrowdClient::new(&env, &contract_id);
        client.init(&platform_owner, &token.address, &feed_id);

        Self {
            env,
            client,
            platform_owner,
            token,
            sac,
            feed,
        }
    }

    /// Create a project owned by a fresh address. Returns `(id, owner)`.
    pub fn create_project(&self, goal: i128) -> (u64, Address) {
        let owner = self.generate_address();
        let id = self.client.create_project(&owner, &goal);
        (id, owner)
    }

    /// A fresh address holding `balance` native tokens.
    pub fn funded_address(&self, balance: i128) -> Address {
        let address = self.generate_address();
        self.sac.mint(&address, &balance);
        address
    }

    pub fn generate_address(&self) -> Address {
        Address::generate(&self.env)
    }
}
