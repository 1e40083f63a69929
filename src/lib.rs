//! A Raspberry Pi driver for ST7789-based 170x320 IPS LCD panels.
//!
//! The driver talks to the panel over SPI, toggling a data/command select
//! line to frame bytes as register commands or data, and keeps an
//! in-memory RGB framebuffer which is encoded to the controller's 16-bit
//! 565 format on [`Driver::present`].
//!
//! Hardware access is injected through the [`Bus`] and [`OutputPin`]
//! capability traits; on Linux the [`rpi`] module provides an
//! rppal-backed constructor with the usual wiring.
//!
//! The framebuffer implements [`embedded_graphics`]' `DrawTarget`, so any
//! drawing code built on those traits can render onto it before a present.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(target_os = "linux")]
//! # fn main() -> rpi_st7789_driver::Result<()> {
//! use embedded_graphics::pixelcolor::Rgb888;
//! use rpi_st7789_driver::rpi;
//!
//! let mut lcd = rpi::open(Default::default())?;
//! lcd.begin()?;
//! lcd.clear(Rgb888::new(255, 0, 255));
//! lcd.present()?;
//! # Ok(()) }
//! # #[cfg(not(target_os = "linux"))]
//! # fn main() {}
//! ```

#[doc(inline)]
pub use commands::Command;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use frame::*;

#[doc(inline)]
pub use interface::*;

#[doc(inline)]
pub use io::*;

#[doc(inline)]
pub use window::Rotation;

mod commands;
mod error;
mod frame;
mod init;
mod interface;
mod io;
mod window;

#[cfg(target_os = "linux")]
pub mod rpi;
