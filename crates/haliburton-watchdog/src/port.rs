//! Port I/O capability used by the controller.
//!
//! The controller never touches hardware directly. Byte and word accessors
//! mirror `inb`/`outb`/`inl`/`outl`, so any backend that can reach the
//! board's I/O space (a kernel port API, `/dev/port`, a simulated register
//! file) can drive it.

/// Byte- and word-wide access to an I/O port space.
///
/// Accessors are infallible: the watchdog control sequence has no way to
/// report a failed bus cycle. Backends that can fail must log and carry on.
pub trait PortIo {
    /// Read a byte from `port`.
    fn inb(&mut self, port: u16) -> u8;

    /// Write a byte to `port`.
    fn outb(&mut self, port: u16, value: u8);

    /// Read a 32-bit word from `port`.
    fn inl(&mut self, port: u16) -> u32;

    /// Write a 32-bit word to `port`.
    fn outl(&mut self, port: u16, value: u32);

    /// Write a 32-bit word and pause the bus before the next access.
    ///
    /// The default is a plain `outl`; backends with a distinct pausing
    /// write (`outl_p`) override it.
    fn outl_p(&mut self, port: u16, value: u32) {
        self.outl(port, value);
    }
}

impl<T: PortIo + ?Sized> PortIo for &mut T {
    fn inb(&mut self, port: u16) -> u8 {
        (**self).inb(port)
    }

    fn outb(&mut self, port: u16, value: u8) {
        (**self).outb(port, value);
    }

    fn inl(&mut self, port: u16) -> u32 {
        (**self).inl(port)
    }

    fn outl(&mut self, port: u16, value: u32) {
        (**self).outl(port, value);
    }

    fn outl_p(&mut self, port: u16, value: u32) {
        (**self).outl_p(port, value);
    }
}
