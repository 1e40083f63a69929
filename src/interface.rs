//! Capability traits for the hardware the driver drives.
//!
//! The driver never opens a GPIO chip or an SPI device itself: the
//! composition root claims the lines, opens the bus, and hands the
//! handles in. On Linux the `rpi` module does this with rppal; tests
//! inject in-memory fakes.

/// Logic level on a GPIO output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
	Low,
	High,
}

/// Whether a byte sequence is framed as a register command or as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
	Command,
	Data,
}

impl Role {
	/// Level of the data/command select line for this role.
	pub fn level(self) -> Level {
		match self {
			Role::Command => Level::Low,
			Role::Data => Level::High,
		}
	}
}

/// A claimed GPIO output line.
///
/// Writes are infallible once the line is claimed, mirroring rppal.
pub trait OutputPin {
	fn set(&mut self, level: Level);
}

/// A write-only byte bus (SPI, with chip select handled by the bus).
///
/// Transactions are bounded in size by the kernel driver; the transport
/// chunks payloads before they reach this trait.
pub trait Bus {
	fn write(&mut self, bytes: &[u8]) -> crate::Result<()>;
}
