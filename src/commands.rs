/// ST7789 command bytes.
///
/// Only the registers the driver touches are listed; the controller has
/// many more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
	Nop = 0x00,
	SoftReset = 0x01,
	Sleep = 0x10,
	WakeUp = 0x11,
	InversionOff = 0x20,
	InversionOn = 0x21,
	DisplayOff = 0x28,
	DisplayOn = 0x29,
	ColumnAddressSet = 0x2A,
	RowAddressSet = 0x2B,
	MemoryWrite = 0x2C,
	MemoryAccessControl = 0x36,
	InterfacePixelFormat = 0x3A,
	PorchSettings = 0xB2,
	GateVoltages = 0xB7,
	VcomSetting = 0xBB,
	LcmControl = 0xC0,
	VdvVrhEnable = 0xC2,
	VrhSetting = 0xC3,
	VdvSetting = 0xC4,
	FrameRateControl = 0xC6,
	PowerControl1 = 0xD0,
	PositiveGammaControl = 0xE0,
	NegativeGammaControl = 0xE1,
}
