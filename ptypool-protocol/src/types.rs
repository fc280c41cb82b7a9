//! Shared data types for the ptypool protocol

use serde::{Deserialize, Serialize};

/// The two endpoint kinds addressable through the dispatch surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndpointKind {
    /// Controller-facing end of a pair, allocated from the fixed pool
    Master,
    /// Program-facing end of a pair, created by its master on open
    Slave,
}

impl std::fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointKind::Master => write!(f, "master"),
            EndpointKind::Slave => write!(f, "slave"),
        }
    }
}

/// Control codes accepted by master endpoints
///
/// Raw code values follow the classic pty ioctl numbering so callers
/// porting from a terminal stack keep their constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum ControlCode {
    /// Query the numeric id of the master's live slave
    GetSlaveNumber = 0x5430,
    /// Set the slave's lock flag from the request argument (nonzero = lock)
    SetSlaveLock = 0x5431,
}

impl ControlCode {
    /// Map a raw control code to a known variant
    pub fn from_raw(code: u32) -> Option<Self> {
        match code {
            0x5430 => Some(Self::GetSlaveNumber),
            0x5431 => Some(Self::SetSlaveLock),
            _ => None,
        }
    }

    /// Get the raw code value
    pub fn as_raw(self) -> u32 {
        self as u32
    }
}
