//! ptypool-core: a bounded pool of paired pseudo-terminal endpoints
//!
//! The pool publishes a fixed set of master endpoints at start. Opening a
//! master creates its slave counterpart plus two byte channels wired in
//! crossover, forming one bidirectional link; a per-slave lock flag gates
//! slave usage until the master releases it. All operations go through a
//! uniform dispatch surface speaking [`ptypool_protocol`] requests.
//!
//! ```no_run
//! use ptypool_core::{PoolConfig, PtyPool};
//! use ptypool_protocol::Request;
//!
//! # async fn demo() -> ptypool_utils::Result<()> {
//! let pool = PtyPool::start(PoolConfig::default())?;
//! let completion = pool.dispatch("ptm0", Request::Open).await;
//! assert!(completion.is_success());
//! pool.stop();
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod config;
pub mod dispatch;
pub mod endpoint;
pub mod pool;
pub mod registry;

// Re-export main types at crate root
pub use channel::{Channel, ChannelReader, ChannelWriter};
pub use config::PoolConfig;
pub use dispatch::MAX_TRANSFER;
pub use endpoint::{Endpoint, EndpointId, MasterEndpoint, SlaveEndpoint};
pub use pool::PtyPool;
pub use registry::{DeviceEntry, DeviceId, DeviceRegistry};
