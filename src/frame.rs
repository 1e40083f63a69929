use embedded_graphics::{
	draw_target::DrawTarget,
	geometry::{OriginDimensions, Size},
	pixelcolor::{Rgb888, RgbColor},
	Pixel,
};

/// Pack an RGB triple into the controller's 16-bit 565 format.
///
/// Top 5 bits of red, top 6 of green, top 5 of blue; red most
/// significant. Lossy (the low-order bits are truncated) and
/// deterministic.
pub fn encode565(r: u8, g: u8, b: u8) -> u16 {
	(u16::from(r & 0xF8) << 8) | (u16::from(g & 0xFC) << 3) | u16::from(b >> 3)
}

/// An in-memory RGB image, row-major.
///
/// The driver owns one sized to the native panel; standalone frames can
/// be built for partial-window transfers. Every cell always holds a
/// defined colour (new frames are black).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
	width: u16,
	height: u16,
	pixels: Vec<Rgb888>,
}

impl Frame {
	/// A black frame.
	pub fn new(width: u16, height: u16) -> Self {
		Self::filled(width, height, Rgb888::BLACK)
	}

	/// A frame filled with a solid colour.
	pub fn filled(width: u16, height: u16, colour: Rgb888) -> Self {
		Self {
			width,
			height,
			pixels: vec![colour; usize::from(width) * usize::from(height)],
		}
	}

	pub fn width(&self) -> u16 {
		self.width
	}

	pub fn height(&self) -> u16 {
		self.height
	}

	/// Number of pixels in the frame.
	pub fn pixel_count(&self) -> usize {
		self.pixels.len()
	}

	/// Overwrite every cell with a solid colour.
	pub fn solid(&mut self, colour: Rgb888) {
		self.pixels.fill(colour);
	}

	/// Read one pixel; `None` outside the frame.
	pub fn pixel(&self, x: u16, y: u16) -> Option<Rgb888> {
		self.index(x, y).map(|i| self.pixels[i])
	}

	/// Write one pixel; out-of-bounds writes are dropped.
	pub fn set_pixel(&mut self, x: u16, y: u16, colour: Rgb888) {
		if let Some(i) = self.index(x, y) {
			self.pixels[i] = colour;
		}
	}

	fn index(&self, x: u16, y: u16) -> Option<usize> {
		(x < self.width && y < self.height)
			.then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
	}

	/// Encode the frame for the wire: big-endian 565, row-major, exactly
	/// `2 × width × height` bytes.
	pub fn encode(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(self.pixels.len() * 2);
		for px in &self.pixels {
			out.extend_from_slice(&encode565(px.r(), px.g(), px.b()).to_be_bytes());
		}
		out
	}
}

impl OriginDimensions for Frame {
	fn size(&self) -> Size {
		Size::new(self.width.into(), self.height.into())
	}
}

impl DrawTarget for Frame {
	type Color = Rgb888;
	type Error = std::convert::Infallible;

	fn draw_iter<I>(&mut self, pixels: I) -> std::result::Result<(), Self::Error>
	where
		I: IntoIterator<Item = Pixel<Self::Color>>,
	{
		for Pixel(coord, colour) in pixels {
			let (Ok(x), Ok(y)) = (u16::try_from(coord.x), u16::try_from(coord.y)) else {
				continue;
			};
			self.set_pixel(x, y, colour);
		}

		Ok(())
	}

	fn clear(&mut self, colour: Self::Color) -> std::result::Result<(), Self::Error> {
		self.solid(colour);
		Ok(())
	}
}
