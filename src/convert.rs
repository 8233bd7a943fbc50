//! Integer conversions from raw register codes to physical units.
//!
//! The driver returns 16-bit codes straight from the chip; the helpers in
//! this module turn them into microvolts, hundredths of a degree Celsius
//! and microamp-hours without touching floating point. Intermediate math
//! runs in u64 with the division last, so no input can overflow.

use crate::registers::Prescaler;

/// Voltage full scale, 6 V in microvolts.
const FULLSCALE_VOLTAGE_UV: u64 = 6_000_000;

/// Temperature full scale, 600 K in centikelvin.
const FULLSCALE_TEMPERATURE_CK: u64 = 60_000;

/// Zero degrees Celsius in centikelvin.
const ZERO_CELSIUS_CK: i32 = 27_315;

/// Accumulator LSB in microamp-hours at M = 128 with a 50 mOhm sense
/// resistor.
const CHARGE_LSB_UAH: u64 = 85;

/// Sense resistance the charge LSB is specified against, in milliohm.
const CHARGE_LSB_SENSE_MOHM: u64 = 50;

/// Prescaler value the charge LSB is specified against.
const CHARGE_LSB_PRESCALER: u64 = 128;

/// Converts a raw voltage code to microvolts.
///
/// The datasheet formula divides by 65535; this divides by 65536 with a
/// shift instead, which stays well below the converter's 78 mV step.
///
/// ```rust
/// # use ltc2942::convert::voltage_code_to_uv;
/// assert_eq!(voltage_code_to_uv(0), 0);
/// assert_eq!(voltage_code_to_uv(0x1000), 375_000);
/// assert_eq!(voltage_code_to_uv(0xFFFF), 5_999_908);
/// ```
pub const fn voltage_code_to_uv(code: u16) -> u32 {
    ((code as u64 * FULLSCALE_VOLTAGE_UV) >> 16) as u32
}

/// Converts a raw temperature code to hundredths of a degree Celsius.
///
/// The register counts up a 600 K full scale, so the result is the
/// centikelvin reading minus the 273.15 K offset. Divides by 65536 with a
/// shift, as in [`voltage_code_to_uv`].
///
/// ```rust
/// # use ltc2942::convert::temperature_code_to_centi_celsius;
/// assert_eq!(temperature_code_to_centi_celsius(0), -27_315);
/// assert_eq!(temperature_code_to_centi_celsius(0x8000), 2_685);
/// assert_eq!(temperature_code_to_centi_celsius(0xFFFF), 32_684);
/// ```
pub const fn temperature_code_to_centi_celsius(code: u16) -> i16 {
    let centikelvin = ((code as u64 * FULLSCALE_TEMPERATURE_CK) >> 16) as i32;
    (centikelvin - ZERO_CELSIUS_CK) as i16
}

/// Converts a raw accumulated charge code to microamp-hours.
///
/// One code step is 85 uAh scaled by M / 128 and by 50 mOhm / R_SENSE.
/// A zero sense resistance yields 0 instead of dividing by it.
///
/// ```rust
/// # use ltc2942::convert::charge_code_to_uah;
/// # use ltc2942::Prescaler;
/// assert_eq!(charge_code_to_uah(1, Prescaler::M128, 50), 85);
/// assert_eq!(charge_code_to_uah(1000, Prescaler::M128, 50), 85_000);
/// assert_eq!(charge_code_to_uah(1000, Prescaler::M2, 50), 1_328);
/// ```
pub const fn charge_code_to_uah(code: u16, prescaler: Prescaler, sense_resistor_mohm: u16) -> u32 {
    if sense_resistor_mohm == 0 {
        return 0;
    }
    let numerator =
        code as u64 * CHARGE_LSB_UAH * prescaler.value() as u64 * CHARGE_LSB_SENSE_MOHM;
    (numerator / (CHARGE_LSB_PRESCALER * sense_resistor_mohm as u64)) as u32
}
