//! Endpoint model for the PTY pool
//!
//! A master endpoint is a fixed pool slot; opening it creates its slave
//! counterpart plus a crossover-wired channel pair, held together as a
//! [`Pairing`]. The slave exposes the same channels with the read and write
//! roles swapped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use ptypool_protocol::EndpointKind;

use crate::channel::{ChannelReader, ChannelWriter};
use crate::registry::DeviceId;

/// Identifier of an endpoint within the pool
///
/// A master and the slave it creates share the same id.
pub type EndpointId = u32;

/// The channel ends an endpoint reads from and writes to
///
/// Reader and writer sit behind separate async mutexes so a suspended read
/// never blocks writes, and neither blocks the owning master's state lock.
#[derive(Clone)]
pub struct EndpointIo {
    reader: Arc<tokio::sync::Mutex<ChannelReader>>,
    writer: Arc<tokio::sync::Mutex<ChannelWriter>>,
}

impl EndpointIo {
    pub(crate) fn new(reader: ChannelReader, writer: ChannelWriter) -> Self {
        Self {
            reader: Arc::new(tokio::sync::Mutex::new(reader)),
            writer: Arc::new(tokio::sync::Mutex::new(writer)),
        }
    }

    /// Read up to `buf.len()` bytes from the inbound channel
    pub(crate) async fn read(&self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut reader = self.reader.lock().await;
        reader.read(buf).await
    }

    /// Write up to `data.len()` bytes to the outbound channel
    pub(crate) async fn write(&self, data: &[u8]) -> std::io::Result<usize> {
        let mut writer = self.writer.lock().await;
        writer.write(data).await
    }
}

impl std::fmt::Debug for EndpointIo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointIo").finish_non_exhaustive()
    }
}

/// The slave/channel triple owned by a paired master
///
/// Created and destroyed as a unit under the master's pairing mutex; no
/// observer ever sees a slave without channels or channels without a slave.
pub(crate) struct Pairing {
    /// Registry handle of the slave device
    pub slave_device: DeviceId,
    /// The slave endpoint itself
    pub slave: Arc<SlaveEndpoint>,
    /// Master-side channel ends
    pub io: EndpointIo,
}

impl std::fmt::Debug for Pairing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pairing")
            .field("slave", &self.slave.name())
            .finish_non_exhaustive()
    }
}

/// Master-side endpoint: a pool slot with id fixed at creation
#[derive(Debug)]
pub struct MasterEndpoint {
    id: EndpointId,
    name: String,
    /// Guards the pairing triple: the slave slot and both channel ends
    pairing: Mutex<Option<Pairing>>,
}

impl MasterEndpoint {
    pub(crate) fn new(id: EndpointId, name: String) -> Self {
        Self {
            id,
            name,
            pairing: Mutex::new(None),
        }
    }

    /// Pool-slot id of this master
    pub fn id(&self) -> EndpointId {
        self.id
    }

    /// Registered device name of this master
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this master currently owns a live slave
    pub fn is_paired(&self) -> bool {
        self.pairing.lock().is_some()
    }

    pub(crate) fn pairing(&self) -> &Mutex<Option<Pairing>> {
        &self.pairing
    }
}

/// Slave-side endpoint, created and owned by exactly one master
#[derive(Debug)]
pub struct SlaveEndpoint {
    id: EndpointId,
    name: String,
    /// Lock flag gating open and close; set at creation, cleared only via
    /// the owning master's control surface
    locked: AtomicBool,
    io: EndpointIo,
}

impl SlaveEndpoint {
    pub(crate) fn new(id: EndpointId, name: String, io: EndpointIo) -> Self {
        Self {
            id,
            name,
            locked: AtomicBool::new(true),
            io,
        }
    }

    /// Pool-slot id shared with the owning master
    pub fn id(&self) -> EndpointId {
        self.id
    }

    /// Registered device name of this slave
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the slave is currently locked
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::SeqCst)
    }

    pub(crate) fn set_locked(&self, locked: bool) {
        self.locked.store(locked, Ordering::SeqCst);
    }

    pub(crate) fn io(&self) -> &EndpointIo {
        &self.io
    }
}

/// A registered endpoint, tagged by kind
#[derive(Debug, Clone)]
pub enum Endpoint {
    Master(Arc<MasterEndpoint>),
    Slave(Arc<SlaveEndpoint>),
}

impl Endpoint {
    /// Which side of the pair this endpoint is
    pub fn kind(&self) -> EndpointKind {
        match self {
            Endpoint::Master(_) => EndpointKind::Master,
            Endpoint::Slave(_) => EndpointKind::Slave,
        }
    }

    /// Registered device name
    pub fn name(&self) -> &str {
        match self {
            Endpoint::Master(master) => master.name(),
            Endpoint::Slave(slave) => slave.name(),
        }
    }

    /// Pool-slot id
    pub fn id(&self) -> EndpointId {
        match self {
            Endpoint::Master(master) => master.id(),
            Endpoint::Slave(slave) => slave.id(),
        }
    }
}
