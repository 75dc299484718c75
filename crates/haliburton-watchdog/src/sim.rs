//! In-memory register file implementing [`PortIo`].
//!
//! `SimulatedPorts` is a cheap handle: clones share the same registers and
//! access log, so a test can hand one clone to the controller and inspect
//! hardware state through another.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread::ThreadId;
use std::time::Instant;

use parking_lot::Mutex;

use crate::port::PortIo;

/// Direction of a recorded access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    /// `inb` / `inl`.
    Read,
    /// `outb` / `outl`.
    Write,
    /// `outl_p`.
    PostedWrite,
}

/// Bus width of a recorded access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessWidth {
    /// 8-bit.
    Byte,
    /// 32-bit.
    Word,
}

/// One port access seen by the register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortAccess {
    /// Thread that issued the access.
    pub thread: ThreadId,
    /// When the access happened.
    pub at: Instant,
    /// Port address.
    pub port: u16,
    /// Read or write.
    pub kind: AccessKind,
    /// Bus width.
    pub width: AccessWidth,
    /// Value read or written.
    pub value: u32,
}

impl PortAccess {
    /// Whether this access stored a value.
    #[must_use]
    pub fn is_write(&self) -> bool {
        matches!(self.kind, AccessKind::Write | AccessKind::PostedWrite)
    }
}

#[derive(Debug, Default)]
struct RegisterFile {
    registers: HashMap<u16, u32>,
    log: Vec<PortAccess>,
}

impl RegisterFile {
    fn access(&mut self, port: u16, kind: AccessKind, width: AccessWidth, value: u32) -> u32 {
        let value = match kind {
            AccessKind::Read => self.registers.get(&port).copied().unwrap_or(0),
            AccessKind::Write | AccessKind::PostedWrite => {
                self.registers.insert(port, value);
                value
            }
        };
        self.log.push(PortAccess {
            thread: std::thread::current().id(),
            at: Instant::now(),
            port,
            kind,
            width,
            value,
        });
        value
    }
}

/// Simulated I/O port space with an access log.
///
/// Unwritten ports read as zero. Every access is appended to the log and
/// nothing is dropped, so long-running users should call
/// [`SimulatedPorts::clear_log`] periodically.
#[derive(Debug, Clone, Default)]
pub struct SimulatedPorts {
    inner: Arc<Mutex<RegisterFile>>,
}

impl SimulatedPorts {
    /// Create an empty register file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a register without logging an access.
    #[must_use]
    pub fn peek(&self, port: u16) -> u32 {
        self.inner.lock().registers.get(&port).copied().unwrap_or(0)
    }

    /// Read a byte register without logging an access.
    #[must_use]
    pub fn peek_byte(&self, port: u16) -> u8 {
        self.peek(port).to_le_bytes()[0]
    }

    /// Preload a register without logging an access.
    pub fn poke(&self, port: u16, value: u32) {
        self.inner.lock().registers.insert(port, value);
    }

    /// Snapshot of every logged access, oldest first.
    #[must_use]
    pub fn accesses(&self) -> Vec<PortAccess> {
        self.inner.lock().log.clone()
    }

    /// Logged writes to `port`, oldest first.
    #[must_use]
    pub fn writes_to(&self, port: u16) -> Vec<PortAccess> {
        self.inner
            .lock()
            .log
            .iter()
            .filter(|access| access.port == port && access.is_write())
            .copied()
            .collect()
    }

    /// Discard the access log, keeping register contents.
    pub fn clear_log(&self) {
        self.inner.lock().log.clear();
    }
}

impl PortIo for SimulatedPorts {
    fn inb(&mut self, port: u16) -> u8 {
        let value = self
            .inner
            .lock()
            .access(port, AccessKind::Read, AccessWidth::Byte, 0);
        value.to_le_bytes()[0]
    }

    fn outb(&mut self, port: u16, value: u8) {
        self.inner
            .lock()
            .access(port, AccessKind::Write, AccessWidth::Byte, u32::from(value));
    }

    fn inl(&mut self, port: u16) -> u32 {
        self.inner
            .lock()
            .access(port, AccessKind::Read, AccessWidth::Word, 0)
    }

    fn outl(&mut self, port: u16, value: u32) {
        self.inner
            .lock()
            .access(port, AccessKind::Write, AccessWidth::Word, value);
    }

    fn outl_p(&mut self, port: u16, value: u32) {
        self.inner
            .lock()
            .access(port, AccessKind::PostedWrite, AccessWidth::Word, value);
    }
}
