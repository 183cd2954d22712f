//! Soroban chain reads.
//!
//! Read-only contract calls are wrapped in an unsigned `InvokeHostFunction`
//! transaction and sent to the RPC `simulateTransaction` method; nothing is
//! signed or submitted. The return value comes back as a base64 `ScVal`.

use std::collections::HashMap;
use std::str::FromStr;

use serde_json::{json, Value};
use stellar_xdr::curr::{
    HostFunction, InvokeContractArgs, InvokeHostFunctionOp, Limits, Memo, MuxedAccount,
    Operation, OperationBody, Preconditions, ReadXdr, ScAddress, ScSymbol, ScVal,
    SequenceNumber, Transaction, TransactionEnvelope, TransactionExt, TransactionV1Envelope,
    Uint256, VecM, WriteXdr,
};
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::{OracleError, Result};
use crate::price::PriceDatum;

/// Fee placed on simulated transactions. Never charged.
const SIMULATION_FEE: u32 = 100;

/// On-chain project state as returned by `get_project_details`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub id: u64,
    pub owner: String,
    pub funding_goal: i128,
    pub total_funded: i128,
    pub total_donated: i128,
    pub funder_count: u32,
    pub created_at: u64,
}

impl ProjectSummary {
    pub fn total_raised(&self) -> i128 {
        self.total_funded.saturating_add(self.total_donated)
    }

    /// Progress towards the goal in basis points, capped at 10_000.
    pub fn progress_bps(&self) -> u32 {
        if self.funding_goal <= 0 {
            return 0;
        }
        let bps = self.total_raised().saturating_mul(10_000) / self.funding_goal;
        bps.clamp(0, 10_000) as u32
    }
}

impl TryFrom<ScVal> for ProjectSummary {
    type Error = OracleError;

    fn try_from(value: ScVal) -> Result<Self> {
        let mut fields = struct_fields(value)?;
        Ok(Self {
            id: take_u64(&mut fields, "id")?,
            owner: take_address(&mut fields, "owner")?,
            funding_goal: take_i128(&mut fields, "funding_goal")?,
            total_funded: take_i128(&mut fields, "total_funded")?,
            total_donated: take_i128(&mut fields, "total_donated")?,
            funder_count: take_u32(&mut fields, "funder_count")?,
            created_at: take_u64(&mut fields, "created_at")?,
        })
    }
}

impl TryFrom<ScVal> for PriceDatum {
    type Error = OracleError;

    fn try_from(value: ScVal) -> Result<Self> {
        let mut fields = struct_fields(value)?;
        Ok(Self {
            answer: take_i128(&mut fields, "answer")?,
            decimals: take_u32(&mut fields, "decimals")?,
            updated_at: take_u64(&mut fields, "updated_at")?,
        })
    }
}

/// Read a project through `get_project_details`.
pub async fn fetch_project(config: &Config, project_id: u64) -> Result<ProjectSummary> {
    let contract_id = config.require_contract_id()?;
    info!("Reading project {} from contract {}", project_id, contract_id);

    let transaction = build_read_transaction(
        config,
        "get_project_details",
        vec![ScVal::U64(project_id)],
    )?;
    let value = simulate_call(config, &transaction).await?;
    ProjectSummary::try_from(value)
}

/// Read the contract's view of the price through `get_price`.
pub async fn fetch_price(config: &Config) -> Result<PriceDatum> {
    let contract_id = config.require_contract_id()?;
    info!("Reading price from contract {}", contract_id);

    let transaction = build_read_transaction(config, "get_price", Vec::new())?;
    let value = simulate_call(config, &transaction).await?;
    let datum = PriceDatum::try_from(value)?;
    datum.validate()?;
    Ok(datum)
}

/// Build the base64 envelope of an unsigned transaction invoking
/// `function(args)` on the configured contract.
fn build_read_transaction(config: &Config, function: &str, args: Vec<ScVal>) -> Result<String> {
    let contract_id = config.require_contract_id()?;
    let source_key = config.require_source_account()?;

    let contract_address = ScAddress::from_str(contract_id)
        .map_err(|e| OracleError::Config(format!("Invalid CONTRACT_ID: {e}")))?;
    let function_name = ScSymbol(
        function
            .try_into()
            .map_err(|e| OracleError::Rpc(format!("Invalid function name {function}: {e}")))?,
    );
    let args: VecM<ScVal> = args
        .try_into()
        .map_err(|e| OracleError::Rpc(format!("Too many arguments: {e}")))?;

    let operation = Operation {
        source_account: None,
        body: OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
            host_function: HostFunction::InvokeContract(InvokeContractArgs {
                contract_address,
                function_name,
                args,
            }),
            auth: VecM::default(),
        }),
    };

    let transaction = Transaction {
        source_account: MuxedAccount::Ed25519(Uint256(source_key)),
        fee: SIMULATION_FEE,
        seq_num: SequenceNumber(0),
        cond: Preconditions::None,
        memo: Memo::None,
        operations: vec![operation]
            .try_into()
            .map_err(|e| OracleError::Rpc(format!("Failed to build operations: {e}")))?,
        ext: TransactionExt::V0,
    };

    TransactionEnvelope::Tx(TransactionV1Envelope {
        tx: transaction,
        signatures: VecM::default(),
    })
    .to_xdr_base64(Limits::none())
    .map_err(|e| OracleError::Rpc(format!("Failed to encode transaction: {e}")))
}

/// Simulate a contract call and return its decoded return value.
async fn simulate_call(config: &Config, transaction: &str) -> Result<ScVal> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| OracleError::Network(format!("Failed to create HTTP client: {e}")))?;

    let request_body = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "simulateTransaction",
        "params": { "transaction": transaction }
    });

    let response = client
        .post(&config.rpc_url)
        .json(&request_body)
        .send()
        .await
        .map_err(|e| OracleError::Network(format!("Simulation request failed: {e}")))?;

    let response_json: Value = response
        .json()
        .await
        .map_err(|e| OracleError::Network(format!("Failed to parse simulation response: {e}")))?;

    debug!("Simulation response: {}", response_json);

    if let Some(error) = response_json.get("error") {
        return Err(OracleError::Rpc(format!("Simulation failed: {error}")));
    }

    let result = response_json
        .get("result")
        .ok_or_else(|| OracleError::Rpc("No result in simulation response".to_string()))?;

    if let Some(error) = result.get("error") {
        return Err(OracleError::ContractError(parse_contract_error(error)));
    }

    let xdr = result
        .get("results")
        .and_then(|r| r.get(0))
        .and_then(|r| r.get("xdr"))
        .and_then(Value::as_str)
        .ok_or_else(|| OracleError::Rpc("No results[0].xdr in simulation result".to_string()))?;

    ScVal::from_xdr_base64(xdr, Limits::none())
        .map_err(|e| OracleError::Rpc(format!("Undecodable return value: {e}")))
}

// ─────────────────────────────────────────────────────────
// ScVal decoding
// ─────────────────────────────────────────────────────────

/// Contract structs encode as a map keyed by field-name symbols.
fn struct_fields(value: ScVal) -> Result<HashMap<String, ScVal>> {
    let ScVal::Map(Some(map)) = value else {
        return Err(OracleError::Rpc(format!("Expected a struct, got {value:?}")));
    };

    map.0
        .iter()
        .map(|entry| match &entry.key {
            ScVal::Symbol(name) => Ok((name.0.to_utf8_string_lossy(), entry.val.clone())),
            other => Err(OracleError::Rpc(format!("Unexpected struct key {other:?}"))),
        })
        .collect()
}

fn take(fields: &mut HashMap<String, ScVal>, name: &str) -> Result<ScVal> {
    fields
        .remove(name)
        .ok_or_else(|| OracleError::Rpc(format!("Missing field {name}")))
}

fn mismatch(name: &str, expected: &str, got: &ScVal) -> OracleError {
    OracleError::Rpc(format!("Field {name}: expected {expected}, got {got:?}"))
}

fn take_u64(fields: &mut HashMap<String, ScVal>, name: &str) -> Result<u64> {
    match take(fields, name)? {
        ScVal::U64(v) => Ok(v),
        other => Err(mismatch(name, "u64", &other)),
    }
}

fn take_u32(fields: &mut HashMap<String, ScVal>, name: &str) -> Result<u32> {
    match take(fields, name)? {
        ScVal::U32(v) => Ok(v),
        other => Err(mismatch(name, "u32", &other)),
    }
}

fn take_i128(fields: &mut HashMap<String, ScVal>, name: &str) -> Result<i128> {
    match take(fields, name)? {
        ScVal::I128(parts) => Ok((i128::from(parts.hi) << 64) | i128::from(parts.lo)),
        other => Err(mismatch(name, "i128", &other)),
    }
}

fn take_address(fields: &mut HashMap<String, ScVal>, name: &str) -> Result<String> {
    match take(fields, name)? {
        ScVal::Address(address) => Ok(address.to_string()),
        other => Err(mismatch(name, "address", &other)),
    }
}

/// Map a contract error to a readable message.
///
/// Accepts either `{"code": n}` or a host error string such as
/// `HostError: Error(Contract, #2)`.
fn parse_contract_error(error: &Value) -> String {
    let code = error
        .get("code")
        .and_then(|c| c.as_u64().or_else(|| c.as_str().and_then(|s| s.parse().ok())))
        .or_else(|| {
            let text = error.as_str()?;
            let start = text.find('#')? + 1;
            let digits: String = text[start..].chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        });

    let Some(code) = code else {
        return error.to_string();
    };

    let message = match code {
        1 => "Invalid amount",
        2 => "Project not found",
        3 => "Caller is not the project owner",
        4 => "Caller is not the platform owner",
        5 => "Nothing to withdraw",
        6 => "No commission available",
        7 => "Contract already initialized",
        8 => "Contract not initialized",
        9 => "Arithmetic overflow",
        10 => "Price feed returned an invalid price",
        _ => "Unknown contract error",
    };

    format!("{message} (code: {code})")
}
