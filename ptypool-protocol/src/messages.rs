//! Request and completion types
//!
//! Every operation issued against a registered endpoint is a [`Request`];
//! every request finishes synchronously as a [`Completion`] carrying a
//! [`Status`] and the number of bytes transferred. Failed requests complete
//! with zero transferred bytes rather than erroring out of band.

use serde::{Deserialize, Serialize};

/// Requests issued against a registered endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    /// Open the endpoint
    ///
    /// On a master this allocates the slave endpoint and its channel pair;
    /// on a slave it is gated by the lock flag.
    Open,

    /// Close the endpoint
    ///
    /// On a master this tears down the slave and both channels; on a slave
    /// it is refused while locked and a no-op otherwise.
    Close,

    /// Read up to `length` bytes from the endpoint's inbound channel
    Read { length: usize },

    /// Write the payload to the endpoint's outbound channel
    Write { data: Vec<u8> },

    /// Out-of-band control request (master-only codes)
    Control { code: u32, arg: u64 },
}

/// Outcome of a completed request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Request succeeded
    Success,
    /// Channel creation or slave registration failed during master open
    AllocationFailed,
    /// Slave open or close refused while locked
    AccessDenied,
    /// No such device, or the master has no live slave
    NotFound,
    /// Master open refused while a pairing is already live
    AlreadyOpen,
    /// Unrecognized control code
    Unsupported,
    /// The underlying channel reported a failure
    ChannelError,
    /// Unexpected internal failure
    InternalError,
}

impl Status {
    /// Whether this status reports success
    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}

/// A completed request
///
/// Mirrors the io-status block a dispatch framework hands back to callers:
/// a status, a transferred-byte count, and the request's outputs (read data
/// or a control value).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Outcome of the request
    pub status: Status,
    /// Number of bytes moved by the request (0 on failure)
    pub transferred: usize,
    /// Bytes produced by a read request
    pub data: Option<Vec<u8>>,
    /// Numeric output of a control request
    pub value: Option<u64>,
}

impl Completion {
    /// Successful completion with no payload
    pub fn success() -> Self {
        Self {
            status: Status::Success,
            transferred: 0,
            data: None,
            value: None,
        }
    }

    /// Successful completion reporting `n` transferred bytes
    pub fn transferred(n: usize) -> Self {
        Self {
            status: Status::Success,
            transferred: n,
            data: None,
            value: None,
        }
    }

    /// Successful completion carrying read data
    pub fn with_data(data: Vec<u8>) -> Self {
        Self {
            status: Status::Success,
            transferred: data.len(),
            data: Some(data),
            value: None,
        }
    }

    /// Successful completion carrying a control output value
    pub fn with_value(value: u64) -> Self {
        Self {
            status: Status::Success,
            transferred: 0,
            data: None,
            value: Some(value),
        }
    }

    /// Failed completion with zero transferred bytes
    pub fn failure(status: Status) -> Self {
        Self {
            status,
            transferred: 0,
            data: None,
            value: None,
        }
    }

    /// Whether this completion reports success
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
