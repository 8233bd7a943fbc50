//! LTC2942 register definitions.
//!
//! The full register map from the datasheet, plus the control and status
//! bit masks used by the driver.

/// 7-bit I2C device address. Fixed in hardware.
pub const ADDRESS: u8 = 0x64;

/// 7-bit address the chip answers on during an SMBus alert response cycle.
pub const ALERT_RESPONSE_ADDRESS: u8 = 0x0C;

/// LTC2942 register addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Status register (chip ID and alert flags).
    Status = 0x00,
    /// Control register (mode, prescaler, ALCC, shutdown).
    Control = 0x01,
    /// Accumulated charge high byte.
    AccumulatedChargeMsb = 0x02,
    /// Accumulated charge low byte.
    AccumulatedChargeLsb = 0x03,
    /// Charge threshold high limit, high byte.
    ChargeThresholdHighMsb = 0x04,
    /// Charge threshold high limit, low byte.
    ChargeThresholdHighLsb = 0x05,
    /// Charge threshold low limit, high byte.
    ChargeThresholdLowMsb = 0x06,
    /// Charge threshold low limit, low byte.
    ChargeThresholdLowLsb = 0x07,
    /// Voltage reading high byte.
    VoltageMsb = 0x08,
    /// Voltage reading low byte.
    VoltageLsb = 0x09,
    /// Voltage threshold high limit.
    VoltageThresholdHigh = 0x0A,
    /// Voltage threshold low limit.
    VoltageThresholdLow = 0x0B,
    /// Temperature reading high byte.
    TemperatureMsb = 0x0C,
    /// Temperature reading low byte.
    TemperatureLsb = 0x0D,
    /// Temperature threshold high limit.
    TemperatureThresholdHigh = 0x0E,
    /// Temperature threshold low limit.
    TemperatureThresholdLow = 0x0F,
}

impl Register {
    /// Returns the register address as a raw byte.
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Bit masks for the status register.
pub mod status {
    /// Undervoltage lockout alert.
    pub const UNDERVOLTAGE_LOCKOUT: u8 = 0x01;
    /// Voltage alert.
    pub const VOLTAGE_ALERT: u8 = 0x02;
    /// Charge alert low.
    pub const CHARGE_ALERT_LOW: u8 = 0x04;
    /// Charge alert high.
    pub const CHARGE_ALERT_HIGH: u8 = 0x08;
    /// Temperature alert.
    pub const TEMPERATURE_ALERT: u8 = 0x10;
    /// Accumulated charge overflow/underflow.
    pub const CHARGE_OVERFLOW: u8 = 0x20;
    /// Chip identification field.
    pub const CHIP_ID_MASK: u8 = 0xC0;
    /// Expected chip identification value.
    pub const CHIP_ID: u8 = 0x00;
}

/// Bit masks for the control register fields.
pub mod control {
    /// ADC operating mode field, B\[7:6\].
    pub const MODE_MASK: u8 = 0xC0;
    /// Coulomb counter prescaler field, B\[5:3\].
    pub const PRESCALER_MASK: u8 = 0x38;
    /// AL#/CC pin configuration field, B\[2:1\].
    pub const ALCC_MASK: u8 = 0x06;
    /// Shutdown bit, B\[0\]. Must be set to write the accumulator.
    pub const SHUTDOWN: u8 = 0x01;
}

/// ADC operating mode, control register B\[7:6\].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OperatingMode {
    /// ADC sleeps, coulomb counter keeps running.
    Sleep = 0x00,
    /// Single temperature conversion, then sleep.
    ManualTemperature = 0x40,
    /// Single voltage conversion, then sleep.
    ManualVoltage = 0x80,
    /// Voltage and temperature conversions on a fixed cadence.
    Automatic = 0xC0,
}

impl OperatingMode {
    /// Returns the field value placed in the control register.
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Coulomb counter prescaler M, control register B\[5:3\].
///
/// One accumulator LSB equals 0.085 mAh at M = 128 with a 50 mOhm sense
/// resistor and scales linearly with M.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Prescaler {
    M1 = 0x00,
    M2 = 0x08,
    M4 = 0x10,
    M8 = 0x18,
    M16 = 0x20,
    M32 = 0x28,
    M64 = 0x30,
    M128 = 0x38,
}

impl Prescaler {
    /// Returns the field value placed in the control register.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Returns the prescaler factor M.
    pub const fn value(self) -> u16 {
        1 << ((self as u8) >> 3)
    }

    /// Returns the prescaler encoding a factor M, for M a power of two
    /// up to 128.
    pub const fn from_value(m: u16) -> Option<Self> {
        match m {
            1 => Some(Prescaler::M1),
            2 => Some(Prescaler::M2),
            4 => Some(Prescaler::M4),
            8 => Some(Prescaler::M8),
            16 => Some(Prescaler::M16),
            32 => Some(Prescaler::M32),
            64 => Some(Prescaler::M64),
            128 => Some(Prescaler::M128),
            _ => None,
        }
    }
}

/// AL#/CC pin configuration, control register B\[2:1\].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AlccMode {
    /// Pin disabled.
    Disabled = 0x00,
    /// Pin driven as a charge complete input.
    ChargeComplete = 0x02,
    /// Pin driven as an alert output.
    Alert = 0x04,
}

impl AlccMode {
    /// Returns the field value placed in the control register.
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_addresses_match_datasheet() {
        assert_eq!(Register::Status.addr(), 0x00);
        assert_eq!(Register::Control.addr(), 0x01);
        assert_eq!(Register::AccumulatedChargeMsb.addr(), 0x02);
        assert_eq!(Register::AccumulatedChargeLsb.addr(), 0x03);
        assert_eq!(Register::ChargeThresholdHighMsb.addr(), 0x04);
        assert_eq!(Register::ChargeThresholdHighLsb.addr(), 0x05);
        assert_eq!(Register::ChargeThresholdLowMsb.addr(), 0x06);
        assert_eq!(Register::ChargeThresholdLowLsb.addr(), 0x07);
        assert_eq!(Register::VoltageMsb.addr(), 0x08);
        assert_eq!(Register::VoltageLsb.addr(), 0x09);
        assert_eq!(Register::VoltageThresholdHigh.addr(), 0x0A);
        assert_eq!(Register::VoltageThresholdLow.addr(), 0x0B);
        assert_eq!(Register::TemperatureMsb.addr(), 0x0C);
        assert_eq!(Register::TemperatureLsb.addr(), 0x0D);
        assert_eq!(Register::TemperatureThresholdHigh.addr(), 0x0E);
        assert_eq!(Register::TemperatureThresholdLow.addr(), 0x0F);
    }

    #[test]
    fn control_fields_are_disjoint() {
        assert_eq!(control::MODE_MASK & control::PRESCALER_MASK, 0);
        assert_eq!(control::MODE_MASK & control::ALCC_MASK, 0);
        assert_eq!(control::PRESCALER_MASK & control::ALCC_MASK, 0);
        assert_eq!(control::ALCC_MASK & control::SHUTDOWN, 0);
        assert_eq!(
            control::MODE_MASK | control::PRESCALER_MASK | control::ALCC_MASK | control::SHUTDOWN,
            0xFF
        );
    }

    #[test]
    fn prescaler_factors() {
        assert_eq!(Prescaler::M1.value(), 1);
        assert_eq!(Prescaler::M2.value(), 2);
        assert_eq!(Prescaler::M16.value(), 16);
        assert_eq!(Prescaler::M128.value(), 128);
    }

    #[test]
    fn prescaler_from_factor() {
        assert_eq!(Prescaler::from_value(1), Some(Prescaler::M1));
        assert_eq!(Prescaler::from_value(64), Some(Prescaler::M64));
        assert_eq!(Prescaler::from_value(0), None);
        assert_eq!(Prescaler::from_value(3), None);
        assert_eq!(Prescaler::from_value(256), None);
    }

    #[test]
    fn prescaler_field_encoding() {
        assert_eq!(Prescaler::M1.bits(), 0x00);
        assert_eq!(Prescaler::M2.bits(), 0x08);
        assert_eq!(Prescaler::M4.bits(), 0x10);
        assert_eq!(Prescaler::M8.bits(), 0x18);
        assert_eq!(Prescaler::M16.bits(), 0x20);
        assert_eq!(Prescaler::M32.bits(), 0x28);
        assert_eq!(Prescaler::M64.bits(), 0x30);
        assert_eq!(Prescaler::M128.bits(), 0x38);
        assert_eq!(Prescaler::M128.bits() & !control::PRESCALER_MASK, 0);
    }

    #[test]
    fn mode_and_alcc_encodings() {
        assert_eq!(OperatingMode::Sleep.bits(), 0x00);
        assert_eq!(OperatingMode::ManualTemperature.bits(), 0x40);
        assert_eq!(OperatingMode::ManualVoltage.bits(), 0x80);
        assert_eq!(OperatingMode::Automatic.bits(), 0xC0);
        assert_eq!(AlccMode::Disabled.bits(), 0x00);
        assert_eq!(AlccMode::ChargeComplete.bits(), 0x02);
        assert_eq!(AlccMode::Alert.bits(), 0x04);
    }
}
