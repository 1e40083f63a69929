use std::{thread::sleep, time::Duration};

use embedded_graphics::pixelcolor::Rgb888;
use tracing::{instrument, trace};

use crate::{
	commands::Command,
	error::Result,
	frame::Frame,
	interface::{Bus, Level, OutputPin, Role},
	window::Rotation,
};

/// Geometry and transport settings for a [`Driver`].
///
/// Implements [`Default`] with the native geometry of the 170x320 IPS
/// module, no rotation, no offsets, and a 4096-byte SPI chunk size.
#[derive(Debug, Clone)]
pub struct Config {
	/// Native panel width in pixels (unrotated).
	pub width: u16,

	/// Native panel height in pixels (unrotated).
	pub height: u16,

	/// Orientation of the logical drawing surface.
	pub rotation: Rotation,

	/// Horizontal offset of the visible area within the controller's
	/// address space.
	pub offset_left: u16,

	/// Vertical offset of the visible area within the controller's
	/// address space.
	pub offset_top: u16,

	/// Maximum bytes per SPI transaction.
	pub chunk: usize,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			width: 170,
			height: 320,
			rotation: Rotation::Deg0,
			offset_left: 0,
			offset_top: 0,
			chunk: 4096,
		}
	}
}

/// The claimed hardware handles.
pub(crate) struct Io<B, P> {
	pub(crate) bus: B,
	pub(crate) dc: P,
	pub(crate) reset: Option<P>,
	pub(crate) backlight: Option<P>,
}

/// Whether the driver still holds its hardware.
///
/// After [`Driver::cleanup`] the link is `Inert`: every hardware-facing
/// operation is a silent no-op, while the framebuffer stays usable as a
/// detached image.
pub(crate) enum Link<B, P> {
	Live(Io<B, P>),
	Inert,
}

/// Driver for the LCD display.
pub struct Driver<B, P> {
	pub(crate) link: Link<B, P>,
	pub(crate) width: u16,
	pub(crate) height: u16,
	pub(crate) rotation: Rotation,
	pub(crate) offset_left: u16,
	pub(crate) offset_top: u16,
	pub(crate) chunk: usize,
	pub(crate) frame: Frame,
	pub(crate) awake: bool,
}

impl<B: Bus, P: OutputPin> Driver<B, P> {
	/// Wrap already-claimed hardware handles into a driver.
	///
	/// The composition root is responsible for claiming the pins and
	/// opening the bus (see the `rpi` module on Linux). The data/command
	/// line is required; reset and backlight are optional.
	pub fn new(config: Config, bus: B, dc: P, reset: Option<P>, backlight: Option<P>) -> Self {
		Self {
			link: Link::Live(Io {
				bus,
				dc,
				reset,
				backlight,
			}),
			frame: Frame::new(config.width, config.height),
			width: config.width,
			height: config.height,
			rotation: config.rotation,
			offset_left: config.offset_left,
			offset_top: config.offset_top,
			chunk: config.chunk,
			awake: false,
		}
	}

	/// Native (unrotated) panel dimensions.
	pub fn size(&self) -> (u16, u16) {
		(self.width, self.height)
	}

	/// Dimensions of the logical drawing surface, rotation applied.
	pub fn logical_size(&self) -> (u16, u16) {
		self.rotation.oriented(self.width, self.height)
	}

	/// The owned framebuffer.
	pub fn frame(&self) -> &Frame {
		&self.frame
	}

	/// Mutable access to the owned framebuffer.
	pub fn frame_mut(&mut self) -> &mut Frame {
		&mut self.frame
	}

	/// Clear the framebuffer to a solid colour.
	///
	/// This only touches the in-memory surface; call [`Driver::present`]
	/// to push it to the panel.
	pub fn clear(&mut self, colour: Rgb888) {
		self.frame.solid(colour);
	}

	/// Whether the driver still holds its hardware resources.
	pub fn is_live(&self) -> bool {
		matches!(self.link, Link::Live(_))
	}

	/// Send a byte sequence, framed as command or data.
	///
	/// The data/command select line is set once, before the first byte;
	/// the payload then goes out in chunks of at most the configured
	/// chunk size. Chunk boundaries carry no protocol meaning: the
	/// controller sees one continuous stream.
	///
	/// No-op after [`Driver::cleanup`].
	#[instrument(level = "trace", skip(self, payload), fields(length = payload.len()))]
	pub fn send(&mut self, payload: &[u8], role: Role) -> Result<()> {
		let chunk = self.chunk.max(1);
		let Link::Live(io) = &mut self.link else {
			return Ok(());
		};

		io.dc.set(role.level());
		for part in payload.chunks(chunk) {
			trace!(length = part.len(), "writing chunk to SPI");
			io.bus.write(part)?;
		}

		Ok(())
	}

	/// Send a command byte.
	#[instrument(level = "trace", skip(self, command))]
	pub fn command(&mut self, command: Command) -> Result<()> {
		trace!(byte = %format!("{:02X?}", command as u8), "writing command byte to SPI");
		self.send(&[command as u8], Role::Command)
	}

	/// Send some data bytes.
	#[instrument(level = "trace", skip(self, bytes))]
	pub fn data(&mut self, bytes: &[u8]) -> Result<()> {
		self.send(bytes, Role::Data)
	}

	/// Pulse the hardware reset line: high, low, high, held 100ms each.
	///
	/// Skipped entirely when no reset line is wired; the controller is
	/// then assumed to already be out of reset.
	#[instrument(level = "debug", skip(self))]
	pub fn reset(&mut self) {
		let Link::Live(io) = &mut self.link else {
			return;
		};
		let Some(reset) = io.reset.as_mut() else {
			return;
		};

		reset.set(Level::High);
		sleep(Duration::from_millis(100));
		reset.set(Level::Low);
		sleep(Duration::from_millis(100));
		reset.set(Level::High);
		sleep(Duration::from_millis(100));
	}

	/// Bring the panel up.
	///
	/// Pulses reset, runs the power-on register program, programs the
	/// orientation and window offsets for the configured rotation, and
	/// finally turns the display on. Blocks for the cumulative reset and
	/// settle delays (roughly 550ms). Call once before drawing.
	#[instrument(level = "debug", skip(self))]
	pub fn begin(&mut self) -> Result<()> {
		self.reset();
		sleep(Duration::from_millis(10));

		self.run_sequence(crate::init::POWER_ON)?;
		sleep(Duration::from_millis(100));
		self.awake = true;

		// orientation, then the visible window within the controller's
		// address space (display-space dims: swapped at 90/270)
		self.command(Command::MemoryAccessControl)?;
		self.data(&[self.rotation.madctl()])?;

		let (dw, dh) = self.rotation.oriented(self.width, self.height);
		self.command(Command::ColumnAddressSet)?;
		self.data(&self.offset_left.to_be_bytes())?;
		self.data(&(dw + self.offset_left - 1).to_be_bytes())?;
		self.command(Command::RowAddressSet)?;
		self.data(&self.offset_top.to_be_bytes())?;
		self.data(&(dh + self.offset_top - 1).to_be_bytes())?;

		self.backlight(true);
		self.command(Command::DisplayOn)?;

		Ok(())
	}

	/// Turn the backlight on or off.
	///
	/// No-op when no backlight line is wired.
	#[instrument(level = "trace", skip(self))]
	pub fn backlight(&mut self, on: bool) {
		let Link::Live(io) = &mut self.link else {
			return;
		};
		if let Some(backlight) = io.backlight.as_mut() {
			backlight.set(if on { Level::High } else { Level::Low });
		}
	}

	/// Turn the display off.
	#[instrument(level = "debug", skip(self))]
	pub fn shutdown(&mut self) -> Result<()> {
		self.command(Command::DisplayOff)
	}

	/// Go to sleep.
	#[instrument(level = "trace", skip(self))]
	pub fn sleep(&mut self) -> Result<()> {
		if self.awake {
			self.command(Command::Sleep)?;
			sleep(Duration::from_millis(5));
			self.awake = false;
		}

		Ok(())
	}

	/// Wake up from sleep.
	#[instrument(level = "trace", skip(self))]
	pub fn wake(&mut self) -> Result<()> {
		if !self.awake {
			self.command(Command::WakeUp)?;
			sleep(Duration::from_millis(120));
			self.awake = true;
		}

		Ok(())
	}

	/// Release the hardware.
	///
	/// Turns the backlight off, then drops the pin and bus handles,
	/// releasing the GPIO lines and the SPI device. The driver stays
	/// usable as a detached framebuffer: every later hardware-facing
	/// call is a silent no-op.
	#[instrument(level = "debug", skip(self))]
	pub fn cleanup(&mut self) {
		self.backlight(false);
		self.link = Link::Inert;
	}
}
