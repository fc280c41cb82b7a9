//! Control handlers
//!
//! Control is master-only: both codes operate on the master's live slave.
//! Unrecognized codes are refused instead of silently succeeding, so caller
//! typos surface at the call site.

use std::sync::Arc;

use tracing::info;

use ptypool_protocol::{Completion, ControlCode};
use ptypool_utils::{PtyPoolError, Result};

use crate::endpoint::{Endpoint, MasterEndpoint};
use crate::pool::PtyPool;

impl PtyPool {
    pub(crate) fn handle_control(
        &self,
        endpoint: &Endpoint,
        code: u32,
        arg: u64,
    ) -> Result<Completion> {
        let Endpoint::Master(master) = endpoint else {
            // A slave never owns a slave of its own
            return Err(PtyPoolError::not_found(format!(
                "{} does not accept control requests",
                endpoint.name()
            )));
        };

        match ControlCode::from_raw(code) {
            Some(ControlCode::GetSlaveNumber) => get_slave_number(master),
            Some(ControlCode::SetSlaveLock) => set_slave_lock(master, arg != 0),
            None => Err(PtyPoolError::UnsupportedControl(code)),
        }
    }
}

/// Report the numeric id of the master's live slave
fn get_slave_number(master: &Arc<MasterEndpoint>) -> Result<Completion> {
    let pairing = master.pairing().lock();
    let pairing = pairing.as_ref().ok_or_else(|| {
        PtyPoolError::not_found(format!("master {} has no live slave", master.name()))
    })?;
    Ok(Completion::with_value(u64::from(pairing.slave.id())))
}

/// Set the live slave's lock flag
fn set_slave_lock(master: &Arc<MasterEndpoint>, locked: bool) -> Result<Completion> {
    let pairing = master.pairing().lock();
    let pairing = pairing.as_ref().ok_or_else(|| {
        PtyPoolError::not_found(format!("master {} has no live slave", master.name()))
    })?;

    pairing.slave.set_locked(locked);
    info!(
        "slave {} {}",
        pairing.slave.name(),
        if locked { "locked" } else { "unlocked" }
    );
    Ok(Completion::success())
}
