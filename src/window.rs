use tracing::instrument;

use crate::{
	commands::Command,
	error::{Error, Result},
	frame::Frame,
	interface::{Bus, OutputPin, Role},
	io::Driver,
};

/// Orientation of the logical drawing surface relative to the panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rotation {
	#[default]
	Deg0,
	Deg90,
	Deg180,
	Deg270,
}

impl Rotation {
	/// Parse a rotation given in degrees.
	///
	/// Anything other than 90, 180 or 270 maps to no rotation, keeping
	/// the permissive convention of the reference bring-up code rather
	/// than rejecting unknown values.
	pub fn from_degrees(degrees: u16) -> Self {
		match degrees {
			90 => Rotation::Deg90,
			180 => Rotation::Deg180,
			270 => Rotation::Deg270,
			_ => Rotation::Deg0,
		}
	}

	/// Memory-access-direction byte for this rotation.
	pub fn madctl(self) -> u8 {
		match self {
			Rotation::Deg0 => 0x00,
			Rotation::Deg90 => 0x60,
			Rotation::Deg180 => 0xC0,
			Rotation::Deg270 => 0xA0,
		}
	}

	/// Display-space dimensions: native dims, swapped at 90 and 270.
	pub fn oriented(self, width: u16, height: u16) -> (u16, u16) {
		match self {
			Rotation::Deg0 | Rotation::Deg180 => (width, height),
			Rotation::Deg90 | Rotation::Deg270 => (height, width),
		}
	}

	/// Remap a logical rectangle into native panel coordinates.
	///
	/// Bounds are inclusive. Inputs must satisfy `x1 < width` and
	/// `y1 < height` (native dims) for every rotation; the controller's
	/// memory-access direction accounts for the axis swap. The remap is
	/// bijective: four quarter turns compose to the identity.
	pub fn remap(
		self,
		(x0, y0, x1, y1): (u16, u16, u16, u16),
		width: u16,
		height: u16,
	) -> (u16, u16, u16, u16) {
		match self {
			Rotation::Deg0 => (x0, y0, x1, y1),
			Rotation::Deg90 => (y0, width - 1 - x1, y1, width - 1 - x0),
			Rotation::Deg180 => (
				width - 1 - x1,
				height - 1 - y1,
				width - 1 - x0,
				height - 1 - y0,
			),
			Rotation::Deg270 => (height - 1 - y1, x0, height - 1 - y0, x1),
		}
	}
}

impl<B: Bus, P: OutputPin> Driver<B, P> {
	fn check_window(&self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<()> {
		if x0 > x1 || y0 > y1 || x1 >= self.width || y1 >= self.height {
			return Err(Error::Window {
				x0,
				y0,
				x1,
				y1,
				width: self.width,
				height: self.height,
			});
		}

		Ok(())
	}

	/// Program the address window for the following pixel stream.
	///
	/// Coordinates are logical (rotation applied), bounds inclusive, and
	/// must fit the native surface. Remaps through the configured
	/// rotation, adds the panel offsets, then issues column-address-set,
	/// row-address-set, and memory-write to prime the controller.
	#[instrument(level = "trace", skip(self))]
	pub fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<()> {
		self.check_window(x0, y0, x1, y1)?;

		let (x0, y0, x1, y1) = self
			.rotation
			.remap((x0, y0, x1, y1), self.width, self.height);
		let (x0, x1) = (x0 + self.offset_left, x1 + self.offset_left);
		let (y0, y1) = (y0 + self.offset_top, y1 + self.offset_top);

		self.command(Command::ColumnAddressSet)?;
		self.data(&x0.to_be_bytes())?;
		self.data(&x1.to_be_bytes())?;
		self.command(Command::RowAddressSet)?;
		self.data(&y0.to_be_bytes())?;
		self.data(&y1.to_be_bytes())?;
		self.command(Command::MemoryWrite)?;

		Ok(())
	}

	/// Program the full-surface window.
	pub fn set_full_window(&mut self) -> Result<()> {
		let (x1, y1) = (self.width - 1, self.height - 1);
		self.set_window(0, 0, x1, y1)
	}

	/// Push the owned framebuffer to the panel.
	#[instrument(level = "debug", skip(self))]
	pub fn present(&mut self) -> Result<()> {
		let bytes = self.frame.encode();
		let (x1, y1) = (self.width - 1, self.height - 1);
		self.blit(0, 0, x1, y1, &bytes)
	}

	/// Push a frame covering the full surface.
	///
	/// At 90 and 270 degrees the frame is expected in logical
	/// orientation (native dims swapped).
	#[instrument(level = "debug", skip(self, frame))]
	pub fn present_full(&mut self, frame: &Frame) -> Result<()> {
		let (x1, y1) = (self.width - 1, self.height - 1);
		self.present_frame(frame, 0, 0, x1, y1)
	}

	/// Push a pre-cropped frame into a window.
	///
	/// The frame must hold exactly as many pixels as the window covers;
	/// there is no implicit scaling or cropping.
	#[instrument(level = "trace", skip(self, frame))]
	pub fn present_frame(
		&mut self,
		frame: &Frame,
		x0: u16,
		y0: u16,
		x1: u16,
		y1: u16,
	) -> Result<()> {
		self.check_window(x0, y0, x1, y1)?;

		let want = usize::from(x1 - x0 + 1) * usize::from(y1 - y0 + 1);
		let have = frame.pixel_count();
		if have != want {
			return Err(Error::FrameSize { have, want });
		}

		let bytes = frame.encode();
		self.blit(x0, y0, x1, y1, &bytes)
	}

	fn blit(&mut self, x0: u16, y0: u16, x1: u16, y1: u16, bytes: &[u8]) -> Result<()> {
		self.set_window(x0, y0, x1, y1)?;
		self.send(bytes, Role::Data)
	}
}
