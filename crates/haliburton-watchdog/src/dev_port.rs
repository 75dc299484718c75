//! [`PortIo`] over the Linux `/dev/port` character device.
//!
//! The file offset is the port number. The kernel issues one byte-wide
//! cycle per byte transferred, so word accesses become four consecutive
//! byte cycles (little-endian).

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::WatchdogResult;
use crate::port::PortIo;

/// Default path of the port device.
pub const DEV_PORT_PATH: &str = "/dev/port";

/// Port access through `/dev/port`.
///
/// Needs `CAP_SYS_RAWIO`. I/O failures after opening are logged; reads
/// then return zero and writes are dropped.
#[derive(Debug)]
pub struct DevPort {
    file: File,
}

impl DevPort {
    /// Open a port device at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened read-write.
    pub fn open(path: impl AsRef<Path>) -> WatchdogResult<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        tracing::debug!(path = %path.display(), "Opened port device");
        Ok(Self { file })
    }

    fn read_bytes<const N: usize>(&mut self, port: u16) -> [u8; N] {
        let mut buf = [0u8; N];
        let result = self
            .file
            .seek(SeekFrom::Start(u64::from(port)))
            .and_then(|_| self.file.read_exact(&mut buf));
        if let Err(error) = result {
            tracing::warn!(port, %error, "Port read failed");
            return [0u8; N];
        }
        buf
    }

    fn write_bytes(&mut self, port: u16, bytes: &[u8]) {
        let result = self
            .file
            .seek(SeekFrom::Start(u64::from(port)))
            .and_then(|_| self.file.write_all(bytes));
        if let Err(error) = result {
            tracing::warn!(port, %error, "Port write failed");
        }
    }
}

impl PortIo for DevPort {
    fn inb(&mut self, port: u16) -> u8 {
        let [byte] = self.read_bytes::<1>(port);
        byte
    }

    fn outb(&mut self, port: u16, value: u8) {
        self.write_bytes(port, &[value]);
    }

    fn inl(&mut self, port: u16) -> u32 {
        u32::from_le_bytes(self.read_bytes::<4>(port))
    }

    fn outl(&mut self, port: u16, value: u32) {
        self.write_bytes(port, &value.to_le_bytes());
    }

    fn outl_p(&mut self, port: u16, value: u32) {
        self.outl(port, value);
        if let Err(error) = self.file.flush() {
            tracing::warn!(port, %error, "Port flush failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn scratch_file(name: &str, len: usize) -> Result<PathBuf, std::io::Error> {
        let path = std::env::temp_dir().join(format!(
            "haliburton-devport-{}-{name}",
            std::process::id()
        ));
        std::fs::write(&path, vec![0u8; len])?;
        Ok(path)
    }

    #[test]
    fn test_open_missing_device_fails() {
        let result = DevPort::open("/nonexistent/haliburton/port");
        assert!(matches!(result, Err(crate::WatchdogError::Io(_))));
    }

    #[test]
    fn test_word_access_is_little_endian() -> TestResult {
        let path = scratch_file("word", 0x600)?;
        let mut port = DevPort::open(&path)?;

        port.outl(0x508, 0x1234_8000);
        assert_eq!(port.inl(0x508), 0x1234_8000);
        assert_eq!(port.inb(0x508), 0x00);
        assert_eq!(port.inb(0x509), 0x80);

        port.outb(0x111, 0x01);
        assert_eq!(port.inb(0x111), 0x01);

        std::fs::remove_file(&path)?;
        Ok(())
    }

    #[test]
    fn test_read_past_end_yields_zero() -> TestResult {
        let path = scratch_file("short", 4)?;
        let mut port = DevPort::open(&path)?;
        assert_eq!(port.inl(0x508), 0);
        std::fs::remove_file(&path)?;
        Ok(())
    }
}
