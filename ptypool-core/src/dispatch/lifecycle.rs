//! Open and close handlers
//!
//! Master open allocates the slave/channel triple; master close tears it
//! down. Slave open and close are both gated by the lock flag: open is
//! permitted only unlocked, and close is refused while locked.

use std::sync::Arc;

use tracing::{debug, info, warn};

use ptypool_protocol::Completion;
use ptypool_utils::{PtyPoolError, Result};

use crate::channel::Channel;
use crate::endpoint::{Endpoint, EndpointIo, MasterEndpoint, Pairing, SlaveEndpoint};
use crate::pool::PtyPool;

impl PtyPool {
    pub(crate) fn handle_open(&self, endpoint: &Endpoint) -> Result<Completion> {
        match endpoint {
            Endpoint::Master(master) => self.open_master(master),
            Endpoint::Slave(slave) => open_slave(slave),
        }
    }

    pub(crate) fn handle_close(&self, endpoint: &Endpoint) -> Result<Completion> {
        match endpoint {
            Endpoint::Master(master) => self.close_master(master),
            Endpoint::Slave(slave) => close_slave(slave),
        }
    }

    /// Allocate the slave endpoint and crossover channel pair for a master
    fn open_master(&self, master: &Arc<MasterEndpoint>) -> Result<Completion> {
        let mut pairing = master.pairing().lock();
        if pairing.is_some() {
            return Err(PtyPoolError::AlreadyOpen(master.name().to_string()));
        }

        let capacity = self.config().channel_capacity;
        // C1 carries slave -> master bytes, C2 carries master -> slave
        let (c1_reader, c1_writer) = Channel::create(capacity).split();
        let (c2_reader, c2_writer) = Channel::create(capacity).split();

        let slave_name = self.config().slave_name(master.id());
        let slave = Arc::new(SlaveEndpoint::new(
            master.id(),
            slave_name.clone(),
            EndpointIo::new(c2_reader, c1_writer),
        ));
        let master_io = EndpointIo::new(c1_reader, c2_writer);

        let slave_device = match self
            .registry()
            .register(&slave_name, Endpoint::Slave(slave.clone()))
        {
            Ok(id) => id,
            Err(err) => {
                // Rollback: both channels die here with their halves,
                // nothing is left orphaned by the failed open
                warn!("slave registration for {} failed: {}", slave_name, err);
                drop(slave);
                drop(master_io);
                return Err(PtyPoolError::allocation(format!(
                    "cannot register slave {}: {}",
                    slave_name, err
                )));
            }
        };

        *pairing = Some(Pairing {
            slave_device,
            slave,
            io: master_io,
        });

        info!(
            "master {} opened, slave {} created locked",
            master.name(),
            slave_name
        );
        Ok(Completion::success())
    }

    /// Tear down a master's slave/channel triple
    fn close_master(&self, master: &Arc<MasterEndpoint>) -> Result<Completion> {
        let pairing = master.pairing().lock().take().ok_or_else(|| {
            PtyPoolError::not_found(format!("master {} has no live slave", master.name()))
        })?;

        self.registry().unregister(pairing.slave_device);
        // Dropping the pairing drops the channel halves on both sides
        info!(
            "master {} closed, slave {} removed",
            master.name(),
            pairing.slave.name()
        );
        Ok(Completion::success())
    }
}

/// Slave open: permitted only while unlocked; reuses the master's channels
fn open_slave(slave: &Arc<SlaveEndpoint>) -> Result<Completion> {
    if slave.is_locked() {
        return Err(PtyPoolError::access_denied(format!(
            "slave {} is locked",
            slave.name()
        )));
    }
    debug!("slave {} opened", slave.name());
    Ok(Completion::success())
}

/// Slave close: refused while locked, otherwise a no-op
///
/// Channels stay owned by the master; only master close destroys them.
fn close_slave(slave: &Arc<SlaveEndpoint>) -> Result<Completion> {
    if slave.is_locked() {
        return Err(PtyPoolError::access_denied(format!(
            "slave {} is locked",
            slave.name()
        )));
    }
    debug!("slave {} closed", slave.name());
    Ok(Completion::success())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PoolConfig;
    use ptypool_protocol::{ControlCode, Request, Status};

    fn test_pool() -> PtyPool {
        PtyPool::start(PoolConfig::default()).unwrap()
    }

    async fn unlock_slave(pool: &PtyPool, master: &str) {
        let completion = pool
            .dispatch(
                master,
                Request::Control {
                    code: ControlCode::SetSlaveLock.as_raw(),
                    arg: 0,
                },
            )
            .await;
        assert_eq!(completion.status, Status::Success);
    }

    // ==================== Master Open Tests ====================

    #[tokio::test]
    async fn test_master_open_creates_locked_slave() {
        let pool = test_pool();

        let completion = pool.dispatch("ptm0", Request::Open).await;
        assert_eq!(completion.status, Status::Success);
        assert_eq!(completion.transferred, 0);

        let slave = pool.lookup("pts0").unwrap();
        let Endpoint::Slave(slave) = slave else {
            panic!("Expected slave endpoint");
        };
        assert_eq!(slave.id(), 0);
        assert!(slave.is_locked());
        assert!(pool.is_paired(0));
    }

    #[tokio::test]
    async fn test_master_open_other_masters_untouched() {
        let pool = test_pool();
        pool.dispatch("ptm4", Request::Open).await;

        assert!(pool.lookup("pts4").is_some());
        for id in [0u32, 1, 2, 3, 5, 6, 7] {
            assert!(pool.lookup(&format!("pts{}", id)).is_none());
            assert!(!pool.is_paired(id));
        }
    }

    #[tokio::test]
    async fn test_master_reopen_rejected_while_paired() {
        let pool = test_pool();
        pool.dispatch("ptm0", Request::Open).await;

        let completion = pool.dispatch("ptm0", Request::Open).await;
        assert_eq!(completion.status, Status::AlreadyOpen);

        // Original pairing is left intact
        assert!(pool.is_paired(0));
        assert!(pool.lookup("pts0").is_some());
    }

    #[tokio::test]
    async fn test_master_open_rolls_back_channels_on_name_collision() {
        let pool = test_pool();
        // Occupy the slave's name so registration fails mid-open
        let squatter = Arc::new(MasterEndpoint::new(99, "pts0".into()));
        pool.registry()
            .register("pts0", Endpoint::Master(squatter))
            .unwrap();

        let completion = pool.dispatch("ptm0", Request::Open).await;
        assert_eq!(completion.status, Status::AllocationFailed);
        assert!(!pool.is_paired(0));

        // The squatter entry is untouched
        let endpoint = pool.registry().lookup("pts0").unwrap();
        assert_eq!(endpoint.name(), "pts0");
    }

    #[tokio::test]
    async fn test_concurrent_opens_pair_exactly_once() {
        let pool = Arc::new(test_pool());

        let mut handles = Vec::new();
        for _ in 0..4 {
            let pool = pool.clone();
            handles.push(tokio::spawn(async move {
                pool.dispatch("ptm1", Request::Open).await.status
            }));
        }

        let mut ok = 0;
        let mut already = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Status::Success => ok += 1,
                Status::AlreadyOpen => already += 1,
                status => panic!("unexpected status {:?}", status),
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(already, 3);
        assert_eq!(pool.live_slaves(), 1);
    }

    // ==================== Slave Open Tests ====================

    #[tokio::test]
    async fn test_slave_open_denied_while_locked() {
        let pool = test_pool();
        pool.dispatch("ptm0", Request::Open).await;

        let completion = pool.dispatch("pts0", Request::Open).await;
        assert_eq!(completion.status, Status::AccessDenied);

        // State unchanged: still locked, still paired
        let Some(Endpoint::Slave(slave)) = pool.lookup("pts0") else {
            panic!("slave disappeared");
        };
        assert!(slave.is_locked());
        assert!(pool.is_paired(0));
    }

    #[tokio::test]
    async fn test_slave_open_succeeds_after_unlock() {
        let pool = test_pool();
        pool.dispatch("ptm0", Request::Open).await;
        unlock_slave(&pool, "ptm0").await;

        let completion = pool.dispatch("pts0", Request::Open).await;
        assert_eq!(completion.status, Status::Success);
        assert_eq!(completion.transferred, 0);
    }

    // ==================== Master Close Tests ====================

    #[tokio::test]
    async fn test_master_close_removes_slave() {
        let pool = test_pool();
        pool.dispatch("ptm0", Request::Open).await;

        let completion = pool.dispatch("ptm0", Request::Close).await;
        assert_eq!(completion.status, Status::Success);
        assert!(pool.lookup("pts0").is_none());
        assert!(!pool.is_paired(0));
    }

    #[tokio::test]
    async fn test_master_close_without_slave_fails() {
        let pool = test_pool();
        let completion = pool.dispatch("ptm0", Request::Close).await;
        assert_eq!(completion.status, Status::NotFound);
    }

    #[tokio::test]
    async fn test_master_reopen_after_close_creates_fresh_pair() {
        let pool = test_pool();
        pool.dispatch("ptm0", Request::Open).await;
        // Leave unread bytes in the old master -> slave channel
        pool.dispatch(
            "ptm0",
            Request::Write {
                data: b"stale".to_vec(),
            },
        )
        .await;
        pool.dispatch("ptm0", Request::Close).await;

        let completion = pool.dispatch("ptm0", Request::Open).await;
        assert_eq!(completion.status, Status::Success);
        assert!(pool.lookup("pts0").is_some());

        // No residual data: a read on the fresh slave stays pending
        let pending = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            pool.dispatch("pts0", Request::Read { length: 16 }),
        )
        .await;
        assert!(pending.is_err(), "fresh channel delivered stale data");
    }

    // ==================== Slave Close Tests ====================

    #[tokio::test]
    async fn test_slave_close_denied_while_locked() {
        let pool = test_pool();
        pool.dispatch("ptm0", Request::Open).await;

        let completion = pool.dispatch("pts0", Request::Close).await;
        assert_eq!(completion.status, Status::AccessDenied);
    }

    #[tokio::test]
    async fn test_slave_close_succeeds_unlocked_and_keeps_channels() {
        let pool = test_pool();
        pool.dispatch("ptm0", Request::Open).await;
        unlock_slave(&pool, "ptm0").await;

        let completion = pool.dispatch("pts0", Request::Close).await;
        assert_eq!(completion.status, Status::Success);

        // Closing the slave does not unwire anything: the pairing and the
        // channels still belong to the master
        assert!(pool.is_paired(0));
        pool.dispatch(
            "ptm0",
            Request::Write {
                data: b"still wired".to_vec(),
            },
        )
        .await;
        let completion = pool.dispatch("pts0", Request::Read { length: 32 }).await;
        assert_eq!(completion.data.as_deref(), Some(b"still wired".as_slice()));
    }
}
