//! rppal-backed composition root for the Raspberry Pi.
//!
//! Claims the GPIO lines and opens the SPI device, then hands the
//! handles to the portable driver core. Acquisition is stepwise: on
//! failure, handles already claimed are released on drop before the
//! error propagates.

use rppal::{
	gpio::Gpio,
	spi::{Bus as SpiBus, Mode, SlaveSelect, Spi},
};
use tracing::instrument;

use crate::{
	error::Result,
	interface::{Bus, Level, OutputPin},
	io::{Config, Driver},
};

impl OutputPin for rppal::gpio::OutputPin {
	fn set(&mut self, level: Level) {
		self.write(match level {
			Level::Low => rppal::gpio::Level::Low,
			Level::High => rppal::gpio::Level::High,
		});
	}
}

impl Bus for Spi {
	fn write(&mut self, bytes: &[u8]) -> Result<()> {
		Spi::write(self, bytes)?;
		Ok(())
	}
}

/// Arguments to create a new LCD driver.
///
/// Implements [`Default`] with the usual wiring for the 170x320 IPS
/// module: data/command on GPIO 25, reset on 27, backlight on 24, SPI0
/// CE0 at 40 MHz (mode 0, MSB first).
#[derive(Debug, Clone)]
pub struct DriverArgs {
	/// SPI port to use.
	pub spi: u8,

	/// SPI CE number for the display's chip select pin.
	pub ce: u8,

	/// SPI frequency in Hz.
	pub frequency: u32,

	/// GPIO pin number for the display's data/command pin.
	pub dc: u8,

	/// GPIO pin number for the display's reset pin, if wired.
	pub reset: Option<u8>,

	/// GPIO pin number for the display's backlight control pin, if wired.
	pub backlight: Option<u8>,

	/// Geometry and transport settings.
	pub config: Config,
}

impl Default for DriverArgs {
	fn default() -> Self {
		Self {
			spi: 0,
			ce: 0,
			frequency: 40_000_000,
			dc: 25,
			reset: Some(27),
			backlight: Some(24),
			config: Config::default(),
		}
	}
}

/// Claim the GPIO lines, open the SPI device, and build a [`Driver`].
///
/// This performs the necessary setup for the GPIO and SPI pins, but
/// doesn't touch the display otherwise; call [`Driver::begin`] next.
#[instrument(level = "debug")]
pub fn open(args: DriverArgs) -> Result<Driver<Spi, rppal::gpio::OutputPin>> {
	let gpio = Gpio::new()?;
	let dc = gpio.get(args.dc)?.into_output();
	let reset = match args.reset {
		Some(pin) => Some(gpio.get(pin)?.into_output()),
		None => None,
	};
	let backlight = match args.backlight {
		Some(pin) => Some(gpio.get(pin)?.into_output()),
		None => None,
	};

	let spi = Spi::new(
		match args.spi {
			0 => SpiBus::Spi0,
			1 => SpiBus::Spi1,
			2 => SpiBus::Spi2,
			3 => SpiBus::Spi3,
			4 => SpiBus::Spi4,
			5 => SpiBus::Spi5,
			6 => SpiBus::Spi6,
			_ => unreachable!("SPI bus number out of range"),
		},
		match args.ce {
			0 => SlaveSelect::Ss0,
			1 => SlaveSelect::Ss1,
			2 => SlaveSelect::Ss2,
			_ => unreachable!("SPI CE number out of range"),
		},
		args.frequency,
		Mode::Mode0,
	)?;

	Ok(Driver::new(args.config, spi, dc, reset, backlight))
}
