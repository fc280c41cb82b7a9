//! Read and write handlers
//!
//! Both endpoint kinds move bytes the same way: read drains the inbound
//! channel, write fills the outbound one. Blocking is delegated entirely to
//! the channel; these handlers never poll.

use tracing::debug;

use ptypool_protocol::Completion;
use ptypool_utils::{PtyPoolError, Result};

use crate::dispatch::MAX_TRANSFER;
use crate::endpoint::{Endpoint, EndpointIo};
use crate::pool::PtyPool;

impl PtyPool {
    /// Read up to `length` bytes from the endpoint's inbound channel
    pub(crate) async fn handle_read(
        &self,
        endpoint: &Endpoint,
        length: usize,
    ) -> Result<Completion> {
        let io = endpoint_io(endpoint)?;

        let mut buf = vec![0u8; length.min(MAX_TRANSFER)];
        if buf.is_empty() {
            return Ok(Completion::with_data(Vec::new()));
        }

        let n = io.read(&mut buf).await.map_err(|e| {
            PtyPoolError::channel(format!("read on {} failed: {}", endpoint.name(), e))
        })?;
        buf.truncate(n);

        debug!("read {} bytes from {}", n, endpoint.name());
        Ok(Completion::with_data(buf))
    }

    /// Write the payload to the endpoint's outbound channel
    pub(crate) async fn handle_write(
        &self,
        endpoint: &Endpoint,
        data: &[u8],
    ) -> Result<Completion> {
        let io = endpoint_io(endpoint)?;

        let n = io.write(data).await.map_err(|e| {
            PtyPoolError::channel(format!("write on {} failed: {}", endpoint.name(), e))
        })?;

        debug!("wrote {} bytes to {}", n, endpoint.name());
        Ok(Completion::transferred(n))
    }
}

/// Resolve the channel pair an endpoint moves bytes through
///
/// A slave always carries its channels; a master only has them while a
/// pairing is live.
fn endpoint_io(endpoint: &Endpoint) -> Result<EndpointIo> {
    match endpoint {
        Endpoint::Master(master) => master
            .pairing()
            .lock()
            .as_ref()
            .map(|pairing| pairing.io.clone())
            .ok_or_else(|| {
                PtyPoolError::not_found(format!("master {} has no live channels", master.name()))
            }),
        Endpoint::Slave(slave) => Ok(slave.io().clone()),
    }
}
