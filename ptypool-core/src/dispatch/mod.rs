//! Request dispatch over registered endpoints
//!
//! Routes open/close/read/write/control requests uniformly over master and
//! slave endpoints. Every request completes synchronously with a status;
//! handler errors are folded into the completion rather than surfaced as
//! transport errors.

mod control;
mod io;
mod lifecycle;

use tracing::{debug, warn};

use ptypool_protocol::{Completion, Request, Status};
use ptypool_utils::PtyPoolError;

use crate::pool::PtyPool;

/// Upper bound on bytes moved by a single read request
pub const MAX_TRANSFER: usize = 64 * 1024;

/// Map a handler error to the status its completion reports
pub fn status_for(err: &PtyPoolError) -> Status {
    match err {
        PtyPoolError::AllocationFailed(_) | PtyPoolError::NameTaken(_) => Status::AllocationFailed,
        PtyPoolError::AlreadyOpen(_) => Status::AlreadyOpen,
        PtyPoolError::AccessDenied(_) => Status::AccessDenied,
        PtyPoolError::NotFound(_) => Status::NotFound,
        PtyPoolError::UnsupportedControl(_) => Status::Unsupported,
        PtyPoolError::Io(_) | PtyPoolError::Channel(_) => Status::ChannelError,
        PtyPoolError::FileWrite { .. } | PtyPoolError::Config(_) | PtyPoolError::Internal(_) => {
            Status::InternalError
        }
    }
}

impl PtyPool {
    /// Route a request against a named endpoint to its handler
    ///
    /// Unknown names complete with [`Status::NotFound`]; handler errors
    /// complete with their mapped status and zero transferred bytes.
    pub async fn dispatch(&self, target: &str, request: Request) -> Completion {
        let Some(endpoint) = self.lookup(target) else {
            warn!("dispatch to unknown device {}", target);
            return Completion::failure(Status::NotFound);
        };

        let result = match request {
            Request::Open => self.handle_open(&endpoint),
            Request::Close => self.handle_close(&endpoint),
            Request::Read { length } => self.handle_read(&endpoint, length).await,
            Request::Write { data } => self.handle_write(&endpoint, &data).await,
            Request::Control { code, arg } => self.handle_control(&endpoint, code, arg),
        };

        match result {
            Ok(completion) => completion,
            Err(err) => {
                debug!("request on {} failed: {}", target, err);
                Completion::failure(status_for(&err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PoolConfig;

    fn test_pool() -> PtyPool {
        PtyPool::start(PoolConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_unknown_device() {
        let pool = test_pool();
        let completion = pool.dispatch("ptm99", Request::Open).await;
        assert_eq!(completion.status, Status::NotFound);
        assert_eq!(completion.transferred, 0);
    }

    #[tokio::test]
    async fn test_failed_request_reports_zero_bytes() {
        let pool = test_pool();
        // Reading an unpaired master fails without moving any bytes
        let completion = pool.dispatch("ptm0", Request::Read { length: 16 }).await;
        assert_eq!(completion.status, Status::NotFound);
        assert_eq!(completion.transferred, 0);
        assert!(completion.data.is_none());
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                PtyPoolError::allocation("pipes"),
                Status::AllocationFailed,
            ),
            (PtyPoolError::NameTaken("pts0".into()), Status::AllocationFailed),
            (PtyPoolError::AlreadyOpen("ptm0".into()), Status::AlreadyOpen),
            (PtyPoolError::access_denied("locked"), Status::AccessDenied),
            (PtyPoolError::not_found("gone"), Status::NotFound),
            (PtyPoolError::UnsupportedControl(7), Status::Unsupported),
            (PtyPoolError::channel("eof"), Status::ChannelError),
            (PtyPoolError::internal("bug"), Status::InternalError),
        ];
        for (err, status) in cases {
            assert_eq!(status_for(&err), status, "wrong mapping for {:?}", err);
        }
    }
}
