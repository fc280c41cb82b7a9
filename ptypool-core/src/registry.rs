//! Device registry
//!
//! Name -> endpoint table the pool registers its devices in. The registry
//! itself knows nothing about pairing or lock state; it only hands out
//! stable handles, resolves names for dispatch, and enumerates devices for
//! teardown.

use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use ptypool_utils::{PtyPoolError, Result};

use crate::endpoint::Endpoint;

/// Unique handle for a registered device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(Uuid);

impl DeviceId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Device({})", self.0)
    }
}

/// Entry for a registered device
#[derive(Debug)]
pub struct DeviceEntry {
    /// Registered name
    pub name: String,
    /// The endpoint behind the name
    pub endpoint: Endpoint,
}

/// Registry tracking all registered endpoints
///
/// Thread-safe for concurrent dispatch callers.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    /// Device ID -> entry
    devices: DashMap<DeviceId, DeviceEntry>,
    /// Name -> device ID (reverse index for dispatch lookup)
    names: DashMap<String, DeviceId>,
}

impl DeviceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an endpoint under a unique name
    ///
    /// Fails with [`PtyPoolError::NameTaken`] when the name is already
    /// registered.
    pub fn register(&self, name: &str, endpoint: Endpoint) -> Result<DeviceId> {
        let id = DeviceId::new();
        match self.names.entry(name.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                return Err(PtyPoolError::NameTaken(name.to_string()));
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(id);
            }
        }

        self.devices.insert(
            id,
            DeviceEntry {
                name: name.to_string(),
                endpoint,
            },
        );
        debug!("registered device {} as {}", name, id);

        Ok(id)
    }

    /// Unregister a device, returning its entry if it was present
    pub fn unregister(&self, id: DeviceId) -> Option<DeviceEntry> {
        let (_, entry) = self.devices.remove(&id)?;
        self.names.remove(&entry.name);
        debug!("unregistered device {}", entry.name);
        Some(entry)
    }

    /// Resolve a name to its endpoint
    pub fn lookup(&self, name: &str) -> Option<Endpoint> {
        let id = *self.names.get(name)?;
        self.get(id)
    }

    /// Resolve a device id to its endpoint
    pub fn get(&self, id: DeviceId) -> Option<Endpoint> {
        self.devices.get(&id).map(|entry| entry.endpoint.clone())
    }

    /// Snapshot of every registered device id
    ///
    /// Teardown iterates this snapshot rather than the live map, so deleting
    /// while enumerating needs no special casing.
    pub fn device_ids(&self) -> Vec<DeviceId> {
        self.devices.iter().map(|entry| *entry.key()).collect()
    }

    /// Number of registered devices
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
