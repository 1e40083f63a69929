//! Wire-level behaviour of the driver against an in-memory bus.

use std::{cell::RefCell, io, rc::Rc};

use embedded_graphics::pixelcolor::Rgb888;
use rpi_st7789_driver::{
	encode565, Bus, Config, Driver, Error, Frame, Level, OutputPin, Role, Rotation,
};

#[derive(Debug, Clone, PartialEq)]
enum Event {
	Pin(&'static str, Level),
	Write(Vec<u8>),
}

#[derive(Default)]
struct Wire {
	events: Vec<Event>,
	fail_writes: bool,
}

struct MockBus(Rc<RefCell<Wire>>);

impl Bus for MockBus {
	fn write(&mut self, bytes: &[u8]) -> rpi_st7789_driver::Result<()> {
		let mut wire = self.0.borrow_mut();
		if wire.fail_writes {
			return Err(Error::Io(io::Error::new(
				io::ErrorKind::BrokenPipe,
				"bus down",
			)));
		}
		wire.events.push(Event::Write(bytes.to_vec()));
		Ok(())
	}
}

struct MockPin {
	name: &'static str,
	wire: Rc<RefCell<Wire>>,
}

impl OutputPin for MockPin {
	fn set(&mut self, level: Level) {
		self.wire
			.borrow_mut()
			.events
			.push(Event::Pin(self.name, level));
	}
}

fn driver(config: Config) -> (Driver<MockBus, MockPin>, Rc<RefCell<Wire>>) {
	let wire = Rc::new(RefCell::new(Wire::default()));
	let pin = |name| MockPin {
		name,
		wire: Rc::clone(&wire),
	};
	let driver = Driver::new(
		config,
		MockBus(Rc::clone(&wire)),
		pin("dc"),
		Some(pin("reset")),
		Some(pin("backlight")),
	);
	(driver, wire)
}

/// Fold the raw wire events into (command byte, data bytes) operations,
/// using the recorded data/command line transitions.
fn ops(wire: &Rc<RefCell<Wire>>) -> Vec<(u8, Vec<u8>)> {
	let mut ops = Vec::new();
	let mut dc = Level::Low;
	for event in &wire.borrow().events {
		match event {
			Event::Pin(name, level) if *name == "dc" => dc = *level,
			Event::Pin(..) => {}
			Event::Write(bytes) => match dc {
				Level::Low => {
					for byte in bytes {
						ops.push((*byte, Vec::new()));
					}
				}
				Level::High => {
					if let Some((_, data)) = ops.last_mut() {
						data.extend_from_slice(bytes);
					}
				}
			},
		}
	}
	ops
}

fn writes(wire: &Rc<RefCell<Wire>>) -> Vec<Vec<u8>> {
	wire.borrow()
		.events
		.iter()
		.filter_map(|event| match event {
			Event::Write(bytes) => Some(bytes.clone()),
			_ => None,
		})
		.collect()
}

#[test]
fn default_window_bytes_at_rotation_0() {
	let (mut lcd, wire) = driver(Config::default());
	lcd.set_full_window().unwrap();

	let ops = ops(&wire);
	assert_eq!(ops.len(), 3);
	assert_eq!(ops[0], (0x2A, vec![0x00, 0x00, 0x00, 0xA9]));
	assert_eq!(ops[1], (0x2B, vec![0x00, 0x00, 0x01, 0x3F]));
	assert_eq!(ops[2], (0x2C, vec![]));
}

#[test]
fn payloads_go_out_in_bounded_chunks() {
	let (mut lcd, wire) = driver(Config {
		chunk: 100,
		..Config::default()
	});

	let payload: Vec<u8> = (0..450u16).map(|i| (i % 251) as u8).collect();
	lcd.send(&payload, Role::Data).unwrap();

	let writes = writes(&wire);
	assert_eq!(writes.len(), 5); // ceil(450 / 100)
	assert!(writes.iter().all(|chunk| chunk.len() <= 100));
	assert_eq!(writes.concat(), payload);
}

#[test]
fn no_bus_writes_after_cleanup() {
	let (mut lcd, wire) = driver(Config::default());
	lcd.cleanup();
	wire.borrow_mut().events.clear();

	lcd.present().unwrap();
	lcd.send(&[0xFF], Role::Data).unwrap();
	lcd.shutdown().unwrap();
	lcd.reset();
	lcd.backlight(true);
	assert!(wire.borrow().events.is_empty());
	assert!(!lcd.is_live());

	// the surface stays usable as a detached image
	lcd.clear(Rgb888::new(9, 9, 9));
	assert_eq!(lcd.frame().pixel(0, 0), Some(Rgb888::new(9, 9, 9)));
}

#[test]
fn begin_runs_the_power_on_program_in_order() {
	let (mut lcd, wire) = driver(Config::default());
	lcd.begin().unwrap();

	// reset pulse first: high, low, high
	let pulses: Vec<Level> = wire
		.borrow()
		.events
		.iter()
		.filter_map(|event| match event {
			Event::Pin(name, level) if *name == "reset" => Some(*level),
			_ => None,
		})
		.collect();
	assert_eq!(pulses, vec![Level::High, Level::Low, Level::High]);

	let ops = ops(&wire);
	let commands: Vec<u8> = ops.iter().map(|(command, _)| *command).collect();
	assert_eq!(
		commands,
		vec![
			0x11, 0x36, 0x3A, 0xB2, 0xB7, 0xBB, 0xC0, 0xC2, 0xC3, 0xC4, 0xC6, 0xD0, 0x21, 0xE0,
			0xE1, // register program
			0x36, 0x2A, 0x2B, // orientation and window offsets
			0x29, // display-on last
		],
	);

	// 16 bits per pixel
	assert_eq!(ops[2].1, vec![0x05]);
	// gamma tables byte-for-byte
	assert_eq!(
		ops[13].1,
		vec![0x00, 0x19, 0x1E, 0x0A, 0x09, 0x15, 0x3D, 0x44, 0x51, 0x12, 0x03, 0x00, 0x3F, 0x3F],
	);
	assert_eq!(
		ops[14].1,
		vec![0x00, 0x18, 0x1E, 0x0A, 0x09, 0x25, 0x3F, 0x43, 0x52, 0x33, 0x03, 0x00, 0x3F, 0x3F],
	);
	// orientation byte for no rotation, then the full-panel window
	assert_eq!(ops[15].1, vec![0x00]);
	assert_eq!(ops[16].1, vec![0x00, 0x00, 0x00, 0xA9]);
	assert_eq!(ops[17].1, vec![0x00, 0x00, 0x01, 0x3F]);

	// backlight comes up during begin
	assert!(wire
		.borrow()
		.events
		.iter()
		.any(|event| matches!(event, Event::Pin(name, Level::High) if *name == "backlight")));
}

#[test]
fn rotated_present_sets_one_window_and_streams_the_frame() {
	let (mut lcd, wire) = driver(Config {
		rotation: Rotation::Deg90,
		offset_top: 35,
		..Config::default()
	});
	lcd.begin().unwrap();
	wire.borrow_mut().events.clear();

	let colour = Rgb888::new(0x30, 0x82, 0xF0);
	let frame = Frame::filled(320, 170, colour);
	lcd.present_full(&frame).unwrap();

	let ops = ops(&wire);
	assert_eq!(ops.len(), 3);
	assert_eq!(ops[0], (0x2A, vec![0x00, 0x00, 0x01, 0x3F]));
	assert_eq!(ops[1], (0x2B, vec![0x00, 35, 0x00, 204]));
	assert_eq!(ops[2].0, 0x2C);

	let stream = &ops[2].1;
	assert_eq!(stream.len(), 2 * 320 * 170);
	let expected = encode565(0x30, 0x82, 0xF0).to_be_bytes();
	assert!(stream.chunks(2).all(|px| px == expected));
}

#[test]
fn present_streams_the_owned_framebuffer() {
	let (mut lcd, wire) = driver(Config::default());
	lcd.clear(Rgb888::new(255, 0, 0));
	lcd.present().unwrap();

	let ops = ops(&wire);
	assert_eq!(ops.len(), 3);
	assert_eq!(ops[2].0, 0x2C);
	assert_eq!(ops[2].1.len(), 2 * 170 * 320);
	assert_eq!(&ops[2].1[0..2], &[0xF8, 0x00]);
}

#[test]
fn mismatched_frames_and_windows_are_rejected() {
	let (mut lcd, wire) = driver(Config::default());

	let frame = Frame::new(10, 10);
	let err = lcd.present_frame(&frame, 0, 0, 4, 4).unwrap_err();
	assert!(matches!(err, Error::FrameSize { have: 100, want: 25 }));
	assert!(wire.borrow().events.is_empty());

	let err = lcd.set_window(5, 0, 4, 0).unwrap_err();
	assert!(matches!(err, Error::Window { .. }));
	let err = lcd.set_window(0, 0, 200, 0).unwrap_err();
	assert!(matches!(err, Error::Window { .. }));
	assert!(wire.borrow().events.is_empty());
}

#[test]
fn bus_failures_propagate() {
	let (mut lcd, wire) = driver(Config::default());
	wire.borrow_mut().fail_writes = true;

	assert!(lcd.send(&[0x00], Role::Data).is_err());
	assert!(lcd.present().is_err());
}
