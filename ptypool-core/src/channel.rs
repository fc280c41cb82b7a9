//! In-memory byte channels
//!
//! A [`Channel`] is one unidirectional byte stream with suspending
//! read/write; two channels wired in crossover form the bidirectional
//! master/slave link. Destroying a channel is dropping both of its halves.

use std::io;

use tokio::io::{simplex, AsyncReadExt, AsyncWriteExt, ReadHalf, SimplexStream, WriteHalf};

/// A unidirectional byte channel
pub struct Channel {
    reader: ChannelReader,
    writer: ChannelWriter,
}

impl Channel {
    /// Create a channel with the given buffer capacity in bytes
    pub fn create(capacity: usize) -> Self {
        let (read_half, write_half) = simplex(capacity);
        Self {
            reader: ChannelReader(read_half),
            writer: ChannelWriter(write_half),
        }
    }

    /// Split the channel into its read and write ends
    pub fn split(self) -> (ChannelReader, ChannelWriter) {
        (self.reader, self.writer)
    }
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel").finish_non_exhaustive()
    }
}

/// Read end of a channel
pub struct ChannelReader(ReadHalf<SimplexStream>);

impl ChannelReader {
    /// Read up to `buf.len()` bytes
    ///
    /// Suspends until data is available. Returns 0 once the write end has
    /// been dropped and the buffer is drained.
    pub async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf).await
    }
}

impl std::fmt::Debug for ChannelReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelReader").finish_non_exhaustive()
    }
}

/// Write end of a channel
pub struct ChannelWriter(WriteHalf<SimplexStream>);

impl ChannelWriter {
    /// Write up to `data.len()` bytes
    ///
    /// Suspends while the channel buffer is full; once space frees up the
    /// transfer may still be partial.
    pub async fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.write(data).await
    }
}

impl std::fmt::Debug for ChannelWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelWriter").finish_non_exhaustive()
    }
}
