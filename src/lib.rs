#![cfg_attr(not(test), no_std)]

//! A driver for the Linear Technology LTC2942 battery gas gauge, built on
//! the blocking `embedded-hal` I2C and delay traits.
//!
//! The chip keeps a 16-bit coulomb counter and measures battery voltage
//! and die temperature. Readings come back as raw register codes; the
//! [`convert`] module scales them into physical units when needed.
//!
//! Every operation takes `&mut self`, so a single driver value cannot
//! interleave its own bus sequences. To share one chip across tasks, wrap
//! the whole driver in a mutex and hold it across multi-step operations
//! such as [`Ltc2942::reset_charge`].
//!
//! ```rust
//! use ltc2942::{Config, Ltc2942, Ltc2942Driver};
//! # use embedded_hal_mock::eh1::delay::NoopDelay;
//! # use embedded_hal_mock::eh1::i2c::{Mock, Transaction};
//! # let expectations = [
//! #     Transaction::write(0x64, vec![0x01, 0xE8]),
//! #     Transaction::write_read(0x64, vec![0x08], vec![0x3A]),
//! #     Transaction::write_read(0x64, vec![0x09], vec![0x5C]),
//! # ];
//! # let i2c = Mock::new(&expectations);
//! # let delay = NoopDelay::new();
//! let mut gauge = Ltc2942Driver { i2c, delay };
//!
//! let config = Config {
//!     battery_capacity_mah: 1000,
//!     sense_resistor_mohm: 50,
//!     max_current_ma: 100,
//! };
//! gauge.init(config).unwrap();
//! let millivolts = gauge.voltage().unwrap();
//! # assert_eq!(millivolts, 0x3A5C);
//! # gauge.i2c.done();
//! ```

pub(crate) mod fmt;

pub mod convert;
pub mod registers;

use embedded_hal::{delay::DelayNs, i2c::I2c};

use crate::registers::{control, status, Register, ADDRESS};

pub use crate::registers::{AlccMode, OperatingMode, Prescaler};

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ltc2942Error<E> {
    /// The status register answered with a foreign chip identification.
    NotPresent,
    /// The configuration cannot be realized on the chip.
    InvalidConfig,
    /// Bus transaction failure.
    I2C { error: E },
}

impl<E> From<E> for Ltc2942Error<E> {
    fn from(value: E) -> Self {
        Ltc2942Error::I2C { error: value }
    }
}

/// Battery and sense network parameters the control register setup is
/// derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Battery capacity in mAh.
    pub battery_capacity_mah: u16,
    /// Sense resistor value in mOhm.
    pub sense_resistor_mohm: u16,
    /// Maximum system current in mA.
    pub max_current_ma: u16,
}

impl Config {
    /// Returns the smallest prescaler whose accumulator range still covers
    /// the battery capacity, or `None` when even M = 128 cannot.
    ///
    /// ```rust
    /// # use ltc2942::{Config, Prescaler};
    /// let config = Config {
    ///     battery_capacity_mah: 1000,
    ///     sense_resistor_mohm: 50,
    ///     max_current_ma: 100,
    /// };
    /// assert_eq!(config.prescaler(), Some(Prescaler::M32));
    /// ```
    pub const fn prescaler(&self) -> Option<Prescaler> {
        if self.sense_resistor_mohm == 0 {
            return None;
        }
        let needed_uah = self.battery_capacity_mah as u64 * 1_000;
        let mut m: u64 = 1;
        while m <= 128 {
            // 65536 accumulator steps of 85 uAh * (M / 128) * (50 mOhm / R).
            let span_uah = (65_536 * 85 * m * 50) / (128 * self.sense_resistor_mohm as u64);
            if span_uah >= needed_uah {
                return Prescaler::from_value(m as u16);
            }
            m *= 2;
        }
        None
    }

    /// Checks that the sense voltage stays inside the chip's 50 mV input
    /// range at the maximum system current.
    pub const fn sense_voltage_ok(&self) -> bool {
        self.max_current_ma as u32 * self.sense_resistor_mohm as u32 <= 50_000
    }
}

impl<I2C, DELAY, E> Ltc2942<E> for Ltc2942Driver<I2C, DELAY>
where
    I2C: I2c<Error = E>,
    DELAY: DelayNs,
{
    fn read_register(&mut self, register: Register) -> Result<u8, Ltc2942Error<E>> {
        let data: [u8; 1] = [register.addr()];
        let mut buffer: [u8; 1] = [0; 1];
        self.i2c.write_read(ADDRESS, &data, &mut buffer)?;
        trace!("read {:#x} = {:#x}", register.addr(), buffer[0]);
        Ok(buffer[0])
    }

    fn write_register(&mut self, register: Register, value: u8) -> Result<(), Ltc2942Error<E>> {
        trace!("write {:#x} = {:#x}", register.addr(), value);
        let data: [u8; 2] = [register.addr(), value];
        self.i2c.write(ADDRESS, &data)?;
        Ok(())
    }

    fn read_code(&mut self, msb: Register, lsb: Register) -> Result<u16, Ltc2942Error<E>> {
        let high = self.read_register(msb)?;
        self.delay.delay_us(1);
        let low = self.read_register(lsb)?;
        self.delay.delay_us(1);
        Ok(u16::from_be_bytes([high, low]))
    }

    fn device_present(&mut self) -> Result<bool, Ltc2942Error<E>> {
        let value = self.read_register(Register::Status)?;
        Ok(value & status::CHIP_ID_MASK == status::CHIP_ID)
    }

    fn verify_device(&mut self) -> Result<(), Ltc2942Error<E>> {
        if self.device_present()? {
            Ok(())
        } else {
            warn!("chip identification mismatch in the status register");
            Err(Ltc2942Error::NotPresent)
        }
    }

    fn status(&mut self) -> Result<Status, Ltc2942Error<E>> {
        let value = self.read_register(Register::Status)?;
        Ok(Status {
            chip_id_ok: value & status::CHIP_ID_MASK == status::CHIP_ID,
            charge_overflow: value & status::CHARGE_OVERFLOW != 0,
            temperature_alert: value & status::TEMPERATURE_ALERT != 0,
            charge_alert_high: value & status::CHARGE_ALERT_HIGH != 0,
            charge_alert_low: value & status::CHARGE_ALERT_LOW != 0,
            voltage_alert: value & status::VOLTAGE_ALERT != 0,
            undervoltage_lockout: value & status::UNDERVOLTAGE_LOCKOUT != 0,
            raw: value,
        })
    }

    fn init(&mut self, config: Config) -> Result<(), Ltc2942Error<E>> {
        if !config.sense_voltage_ok() {
            return Err(Ltc2942Error::InvalidConfig);
        }
        let prescaler = config.prescaler().ok_or(Ltc2942Error::InvalidConfig)?;
        let value = OperatingMode::Automatic.bits() | prescaler.bits() | AlccMode::Disabled.bits();
        debug!("setting control register to {:#x}", value);
        self.write_register(Register::Control, value)?;
        self.delay.delay_us(1);
        Ok(())
    }

    fn set_operating_mode(&mut self, mode: OperatingMode) -> Result<(), Ltc2942Error<E>> {
        let current = self.read_register(Register::Control)?;
        let value = (current & !control::MODE_MASK) | mode.bits();
        self.write_register(Register::Control, value)
    }

    fn set_prescaler(&mut self, prescaler: Prescaler) -> Result<(), Ltc2942Error<E>> {
        let current = self.read_register(Register::Control)?;
        let value = (current & !control::PRESCALER_MASK) | prescaler.bits();
        self.write_register(Register::Control, value)
    }

    fn set_alcc_mode(&mut self, mode: AlccMode) -> Result<(), Ltc2942Error<E>> {
        let current = self.read_register(Register::Control)?;
        let value = (current & !control::ALCC_MASK) | mode.bits();
        self.write_register(Register::Control, value)
    }

    fn reset_charge(&mut self) -> Result<(), Ltc2942Error<E>> {
        debug!("resetting the charge accumulator");
        let saved = self.read_register(Register::Control)?;
        // The accumulator only accepts writes with the shutdown bit set.
        self.write_register(Register::Control, saved | control::SHUTDOWN)?;
        self.write_register(Register::AccumulatedChargeMsb, 0x00)?;
        self.write_register(Register::AccumulatedChargeLsb, 0x00)?;
        // Power back on.
        self.write_register(Register::Control, saved)?;
        Ok(())
    }

    fn set_charge_thresholds(&mut self, low: u16, high: u16) -> Result<(), Ltc2942Error<E>> {
        let high = high.to_be_bytes();
        let low = low.to_be_bytes();
        self.write_register(Register::ChargeThresholdHighMsb, high[0])?;
        self.write_register(Register::ChargeThresholdHighLsb, high[1])?;
        self.write_register(Register::ChargeThresholdLowMsb, low[0])?;
        self.write_register(Register::ChargeThresholdLowLsb, low[1])?;
        Ok(())
    }

    fn set_voltage_thresholds(&mut self, low: u8, high: u8) -> Result<(), Ltc2942Error<E>> {
        self.write_register(Register::VoltageThresholdHigh, high)?;
        self.write_register(Register::VoltageThresholdLow, low)?;
        Ok(())
    }

    fn set_temperature_thresholds(&mut self, low: u8, high: u8) -> Result<(), Ltc2942Error<E>> {
        self.write_register(Register::TemperatureThresholdHigh, high)?;
        self.write_register(Register::TemperatureThresholdLow, low)?;
        Ok(())
    }

    fn accumulated_charge(&mut self) -> Result<u16, Ltc2942Error<E>> {
        self.read_code(
            Register::AccumulatedChargeMsb,
            Register::AccumulatedChargeLsb,
        )
    }

    fn voltage(&mut self) -> Result<u16, Ltc2942Error<E>> {
        self.read_code(Register::VoltageMsb, Register::VoltageLsb)
    }

    fn temperature(&mut self) -> Result<i16, Ltc2942Error<E>> {
        let code = self.read_code(Register::TemperatureMsb, Register::TemperatureLsb)?;
        Ok(code as i16)
    }
}

pub struct Ltc2942Driver<I2C, Delay> {
    pub i2c: I2C,
    pub delay: Delay,
}

pub trait Ltc2942<E> {
    fn read_register(&mut self, register: Register) -> Result<u8, Ltc2942Error<E>>;
    fn write_register(&mut self, register: Register, value: u8) -> Result<(), Ltc2942Error<E>>;
    /// Reads an MSB/LSB register pair into one code, high byte first.
    fn read_code(&mut self, msb: Register, lsb: Register) -> Result<u16, Ltc2942Error<E>>;

    /// Checks the chip identification bits in the status register.
    /// `Ok(false)` means the bus works but another device answered.
    fn device_present(&mut self) -> Result<bool, Ltc2942Error<E>>;
    /// Like [`Ltc2942::device_present`], but a mismatch becomes
    /// [`Ltc2942Error::NotPresent`].
    fn verify_device(&mut self) -> Result<(), Ltc2942Error<E>>;
    fn status(&mut self) -> Result<Status, Ltc2942Error<E>>;

    /// Programs the control register for automatic conversions with the
    /// prescaler derived from `config` and the AL#/CC pin disabled.
    fn init(&mut self, config: Config) -> Result<(), Ltc2942Error<E>>;
    fn set_operating_mode(&mut self, mode: OperatingMode) -> Result<(), Ltc2942Error<E>>;
    fn set_prescaler(&mut self, prescaler: Prescaler) -> Result<(), Ltc2942Error<E>>;
    fn set_alcc_mode(&mut self, mode: AlccMode) -> Result<(), Ltc2942Error<E>>;

    /// Zeroes the accumulator, bracketed by a shutdown so the chip accepts
    /// the write. The rest of the control register is restored afterwards.
    /// A failure mid-sequence is reported as is and can leave the chip shut
    /// down.
    fn reset_charge(&mut self) -> Result<(), Ltc2942Error<E>>;

    fn set_charge_thresholds(&mut self, low: u16, high: u16) -> Result<(), Ltc2942Error<E>>; // accumulator codes
    fn set_voltage_thresholds(&mut self, low: u8, high: u8) -> Result<(), Ltc2942Error<E>>; // voltage code MSBs
    fn set_temperature_thresholds(&mut self, low: u8, high: u8) -> Result<(), Ltc2942Error<E>>; // temperature code MSBs

    fn accumulated_charge(&mut self) -> Result<u16, Ltc2942Error<E>>; // accumulator code
    fn voltage(&mut self) -> Result<u16, Ltc2942Error<E>>; // mV
    /// Temperature code reinterpreted as a signed 16-bit value, so 0xFFFF
    /// reads as -1. See [`convert::temperature_code_to_centi_celsius`] for
    /// degrees.
    fn temperature(&mut self) -> Result<i16, Ltc2942Error<E>>;
}

/// Decoded status register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// The chip identification bits carry the expected pattern.
    pub chip_id_ok: bool,
    /// The accumulator overflowed or underflowed.
    pub charge_overflow: bool,
    pub temperature_alert: bool,
    pub charge_alert_high: bool,
    pub charge_alert_low: bool,
    pub voltage_alert: bool,
    /// The supply dipped below the undervoltage lockout level.
    pub undervoltage_lockout: bool,
    /// Raw register byte the flags were decoded from.
    pub raw: u8,
}
