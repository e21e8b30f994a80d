//! Serial line abstractions
//!
//! Provides blocking traits for the shared bus between the local controller
//! and the Xcom gateway. Line settings (baud rate, parity, stop bits) are
//! applied by whoever opens the port; these traits only move bytes.

/// Serial transmitter
pub trait SerialTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the line
    ///
    /// Blocks until the transport has accepted what it can. Returns the
    /// number of bytes accepted, which may be less than `data.len()`.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Serial receiver
pub trait SerialRx {
    /// Error type for receive operations
    type Error;

    /// Read up to `buf.len()` bytes from the line
    ///
    /// Blocks until data arrives or the per-read timeout elapses.
    /// `Ok(0)` means the timeout elapsed with nothing received; a count
    /// below `buf.len()` is a short read. `Err` is a hard I/O fault.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Read a single byte, `Ok(None)` on timeout
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        let mut buf = [0u8; 1];
        match self.read(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }
}

/// Combined serial interface
///
/// For lines that provide both TX and RX on a single peripheral.
pub trait Serial: SerialTx + SerialRx {}

// Blanket implementation
impl<T: SerialTx + SerialRx> Serial for T {}

/// Adapter for `embedded-io` transports
///
/// Wraps anything implementing [`embedded_io::Read`] and
/// [`embedded_io::Write`] (UART drivers, `embedded_io::adapters::FromStd`
/// around a host serial port) so it can drive a transaction channel.
#[derive(Debug)]
pub struct Io<T> {
    inner: T,
}

impl<T> Io<T> {
    /// Wrap an `embedded-io` transport
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped transport
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the wrapped transport
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Unwrap the transport
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: embedded_io::Write> SerialTx for Io<T> {
    type Error = T::Error;

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        self.inner.write(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush()
    }
}

impl<T: embedded_io::Read> SerialRx for Io<T> {
    type Error = T::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.inner.read(buf)
    }
}
