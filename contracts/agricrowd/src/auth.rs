//! Authorization guards.
//!
//! Every mutating entry point calls one of these before touching state.
//! The caller must both sign the invocation and match the identity the
//! operation is reserved for.

use soroban_sdk::{Address, Env};

use crate::{storage, types::Project, Error};

/// `caller` must sign and be the creator of `project`.
pub fn require_project_owner(caller: &Address, project: &Project) -> Result<(), Error> {
    caller.require_auth();
    if *caller != project.owner {
        return Err(Error::NotOwner);
    }
    Ok(())
}

/// `caller` must sign and be the platform owner fixed at `init`.
#[cfg_attr(not(feature = "commission-withdrawal"), allow(dead_code))]
pub fn require_platform_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if *caller != storage::get_platform_owner(env)? {
        return Err(Error::NotPlatformOwner);
    }
    Ok(())
}
