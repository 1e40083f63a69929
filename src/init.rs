//! The fixed power-on register program.
//!
//! Vendor-specified constants for the 170x320 IPS panel; the table must
//! be reproduced byte-for-byte and in order. Display-on is not part of
//! the table: [`crate::Driver::begin`] issues it after programming the
//! orientation and window offsets.

use std::{thread::sleep, time::Duration};

use tracing::instrument;

use crate::{
	commands::Command,
	error::Result,
	interface::{Bus, OutputPin},
	io::Driver,
};

/// One step of a register program: a command, its data bytes, and a
/// settle delay before the next step.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Step {
	pub(crate) command: Command,
	pub(crate) data: &'static [u8],
	pub(crate) delay_ms: u64,
}

const fn step(command: Command, data: &'static [u8]) -> Step {
	Step {
		command,
		data,
		delay_ms: 0,
	}
}

pub(crate) const POWER_ON: &[Step] = &[
	// sleep-out needs 150ms before the next command lands
	Step {
		command: Command::WakeUp,
		data: &[],
		delay_ms: 150,
	},
	step(Command::MemoryAccessControl, &[0x00]),
	// 65K RGB, 16 bits per pixel
	step(Command::InterfacePixelFormat, &[0x05]),
	step(Command::PorchSettings, &[0x0C, 0x0C]),
	step(Command::GateVoltages, &[0x35]),
	step(Command::VcomSetting, &[0x1A]),
	step(Command::LcmControl, &[0x2C]),
	step(Command::VdvVrhEnable, &[0x01]),
	step(Command::VrhSetting, &[0x0B]),
	step(Command::VdvSetting, &[0x20]),
	step(Command::FrameRateControl, &[0x0F]),
	step(Command::PowerControl1, &[0xA4, 0xA1]),
	step(Command::InversionOn, &[]),
	step(
		Command::PositiveGammaControl,
		&[
			0x00, 0x19, 0x1E, 0x0A, 0x09, 0x15, 0x3D, 0x44, 0x51, 0x12, 0x03, 0x00, 0x3F, 0x3F,
		],
	),
	step(
		Command::NegativeGammaControl,
		&[
			0x00, 0x18, 0x1E, 0x0A, 0x09, 0x25, 0x3F, 0x43, 0x52, 0x33, 0x03, 0x00, 0x3F, 0x3F,
		],
	),
];

impl<B: Bus, P: OutputPin> Driver<B, P> {
	/// Run a register program step by step, blocking on settle delays.
	#[instrument(level = "debug", skip(self, steps))]
	pub(crate) fn run_sequence(&mut self, steps: &[Step]) -> Result<()> {
		for step in steps {
			self.command(step.command)?;
			if !step.data.is_empty() {
				self.data(step.data)?;
			}
			if step.delay_ms > 0 {
				sleep(Duration::from_millis(step.delay_ms));
			}
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sleep_out_leads_and_settles() {
		assert_eq!(POWER_ON[0].command, Command::WakeUp);
		assert!(POWER_ON[0].delay_ms >= 150);
	}

	#[test]
	fn gamma_tables_have_fourteen_entries() {
		let gammas: Vec<_> = POWER_ON
			.iter()
			.filter(|step| {
				matches!(
					step.command,
					Command::PositiveGammaControl | Command::NegativeGammaControl
				)
			})
			.collect();
		assert_eq!(gammas.len(), 2);
		for step in gammas {
			assert_eq!(step.data.len(), 14);
		}
	}

	#[test]
	fn inversion_comes_after_power_control() {
		let pos = |command| POWER_ON.iter().position(|s| s.command == command).unwrap();
		assert!(pos(Command::PowerControl1) < pos(Command::InversionOn));
		assert!(pos(Command::InversionOn) < pos(Command::PositiveGammaControl));
	}
}
