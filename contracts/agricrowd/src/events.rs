use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectCreated {
    pub project_id: u64,
    pub owner: Address,
    pub funding_goal: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectFunded {
    pub project_id: u64,
    pub funder: Address,
    pub amount: i128,
    pub commission: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectDonated {
    pub project_id: u64,
    pub donor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsWithdrawn {
    pub project_id: u64,
    pub owner: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommissionWithdrawn {
    pub platform_owner: Address,
    pub amount: i128,
}

pub fn emit_project_created(env: &Env, project_id: u64, owner: Address, funding_goal: i128) {
    let topics = (symbol_short!("created"), project_id);
    let data = ProjectCreated {
        project_id,
        owner,
        funding_goal,
    };
    env.events().publish(topics, data);
}

pub fn emit_project_funded(
    env: &Env,
    project_id: u64,
    funder: Address,
    amount: i128,
    commission: i128,
) {
    let topics = (symbol_short!("funded"), project_id);
    let data = ProjectFunded {
        project_id,
        funder,
        amount,
        commission,
    };
    env.events().publish(topics, data);
}

pub fn emit_project_donated(env: &Env, project_id: u64, donor: Address, amount: i128) {
    let topics = (symbol_short!("donated"), project_id);
    let data = ProjectDonated {
        project_id,
        donor,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_funds_withdrawn(env: &Env, project_id: u64, owner: Address, amount: i128) {
    let topics = (symbol_short!("withdrawn"), project_id);
    let data = FundsWithdrawn {
        project_id,
        owner,
        amount,
    };
    env.events().publish(topics, data);
}

#[cfg_attr(not(feature = "commission-withdrawal"), allow(dead_code))]
pub fn emit_commission_withdrawn(env: &Env, platform_owner: Address, amount: i128) {
    let topics = (symbol_short!("commissn"),);
    let data = CommissionWithdrawn {
        platform_owner,
        amount,
    };
    env.events().publish(topics, data);
}
