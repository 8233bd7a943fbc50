//! Logging macros dispatching to `defmt` and/or `log`, selected by the
//! matching cargo features. With neither feature enabled the macros expand
//! to nothing but still consume their arguments.

#![macro_use]
#![allow(unused)]

macro_rules! trace {
    ($($args:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($args)*);
        #[cfg(feature = "log")]
        ::log::trace!($($args)*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        let _ = || ($($args)*);
    }};
}

macro_rules! debug {
    ($($args:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($args)*);
        #[cfg(feature = "log")]
        ::log::debug!($($args)*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        let _ = || ($($args)*);
    }};
}

macro_rules! info {
    ($($args:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($args)*);
        #[cfg(feature = "log")]
        ::log::info!($($args)*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        let _ = || ($($args)*);
    }};
}

macro_rules! warn {
    ($($args:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($args)*);
        #[cfg(feature = "log")]
        ::log::warn!($($args)*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        let _ = || ($($args)*);
    }};
}

macro_rules! error {
    ($($args:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::error!($($args)*);
        #[cfg(feature = "log")]
        ::log::error!($($args)*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        let _ = || ($($args)*);
    }};
}
