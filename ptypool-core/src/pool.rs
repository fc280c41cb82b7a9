//! Pool lifecycle
//!
//! [`PtyPool`] owns the fixed set of master endpoints and the device
//! registry they are published in. Masters live for the whole pool
//! lifetime; slaves and channels come and go with master open/close.

use std::sync::Arc;

use tracing::{debug, info};

use ptypool_utils::Result;

use crate::config::PoolConfig;
use crate::endpoint::{Endpoint, EndpointId, MasterEndpoint};
use crate::registry::DeviceRegistry;

/// A started PTY pool
#[derive(Debug)]
pub struct PtyPool {
    config: PoolConfig,
    registry: DeviceRegistry,
    /// Fixed master arena, index = endpoint id
    masters: Vec<Arc<MasterEndpoint>>,
}

impl PtyPool {
    /// Create the pool and register its master endpoints
    ///
    /// Fails fast: the first master that cannot be registered aborts
    /// startup and propagates the failure.
    pub fn start(config: PoolConfig) -> Result<Self> {
        config.validate()?;

        let registry = DeviceRegistry::new();
        let mut masters = Vec::with_capacity(config.pool_size as usize);

        for id in 0..config.pool_size {
            let name = config.master_name(id);
            let master = Arc::new(MasterEndpoint::new(id, name.clone()));
            registry.register(&name, Endpoint::Master(master.clone()))?;
            masters.push(master);
            debug!("created master endpoint {}", name);
        }

        info!("pty pool started with {} masters", masters.len());
        Ok(Self {
            config,
            registry,
            masters,
        })
    }

    /// Tear down every registered endpoint
    ///
    /// Enumerates a snapshot of the registry first, then removes each
    /// device. A master that still owns a live slave has its pairing torn
    /// down (slave unregistered, channels dropped) before the master itself
    /// is removed. Idempotent; afterwards every dispatch reports not-found.
    pub fn stop(&self) {
        let ids = self.registry.device_ids();
        for id in ids {
            let Some(endpoint) = self.registry.get(id) else {
                // Already removed as part of its master's teardown
                continue;
            };
            if let Endpoint::Master(master) = &endpoint {
                let pairing = master.pairing().lock().take();
                if let Some(pairing) = pairing {
                    self.registry.unregister(pairing.slave_device);
                    debug!(
                        "stop tore down slave {} of master {}",
                        pairing.slave.name(),
                        master.name()
                    );
                }
            }
            self.registry.unregister(id);
        }
        info!("pty pool stopped");
    }

    /// Resolve a registered endpoint by name
    pub fn lookup(&self, name: &str) -> Option<Endpoint> {
        self.registry.lookup(name)
    }

    /// The pool configuration
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Number of master endpoints in the pool
    pub fn master_count(&self) -> usize {
        self.masters.len()
    }

    /// Number of masters that currently own a live slave
    pub fn live_slaves(&self) -> usize {
        self.masters.iter().filter(|m| m.is_paired()).count()
    }

    /// Whether the master with the given id owns a live slave
    pub fn is_paired(&self, id: EndpointId) -> bool {
        self.masters
            .get(id as usize)
            .is_some_and(|m| m.is_paired())
    }

    pub(crate) fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }
}
