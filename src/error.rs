/// Error type for driver operations.
#[derive(Debug, thiserror::Error)]
#[cfg_attr(feature = "miette", derive(miette::Diagnostic))]
pub enum Error {
	#[cfg(target_os = "linux")]
	#[cfg_attr(
		feature = "miette",
		diagnostic(help("GPIO error, check the pin numbers"))
	)]
	#[error("gpio: {0}")]
	Gpio(#[from] rppal::gpio::Error),

	#[cfg(target_os = "linux")]
	#[cfg_attr(
		feature = "miette",
		diagnostic(help("SPI error, check settings or increase spidev.bufsiz"))
	)]
	#[error("spi: {0}")]
	Spi(#[from] rppal::spi::Error),

	#[cfg_attr(feature = "miette", diagnostic(help("local (non-SPI/GPIO) I/O error")))]
	#[error("i/o: {0}")]
	Io(#[from] std::io::Error),

	#[cfg_attr(
		feature = "miette",
		diagnostic(help("window coordinates are inclusive and must fit the surface"))
	)]
	#[error("window ({x0},{y0})..=({x1},{y1}) is inverted or exceeds the {width}x{height} surface")]
	Window {
		x0: u16,
		y0: u16,
		x1: u16,
		y1: u16,
		width: u16,
		height: u16,
	},

	#[cfg_attr(
		feature = "miette",
		diagnostic(help("frames must be pre-cropped to the window they are presented into"))
	)]
	#[error("frame holds {have} pixels but the window covers {want}")]
	FrameSize { have: usize, want: usize },
}

/// Convenience type for Results in this crate.
pub type Result<T> = std::result::Result<T, Error>;
