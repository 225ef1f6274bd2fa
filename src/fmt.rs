//! Logging macros
//!
//! Forwards to `defmt` on the target and to `log` on host builds, so the
//! same call sites work in firmware and in tests. Arguments must implement
//! both `defmt::Format` and `core::fmt::Display`.

#![macro_use]
#![allow(unused_macros)]

macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "embedded")]
            ::defmt::trace!($s $(, $x)*);
            #[cfg(feature = "std")]
            ::log::trace!($s $(, $x)*);
            #[cfg(not(any(feature = "embedded", feature = "std")))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "embedded")]
            ::defmt::debug!($s $(, $x)*);
            #[cfg(feature = "std")]
            ::log::debug!($s $(, $x)*);
            #[cfg(not(any(feature = "embedded", feature = "std")))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "embedded")]
            ::defmt::info!($s $(, $x)*);
            #[cfg(feature = "std")]
            ::log::info!($s $(, $x)*);
            #[cfg(not(any(feature = "embedded", feature = "std")))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "embedded")]
            ::defmt::warn!($s $(, $x)*);
            #[cfg(feature = "std")]
            ::log::warn!($s $(, $x)*);
            #[cfg(not(any(feature = "embedded", feature = "std")))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! error {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "embedded")]
            ::defmt::error!($s $(, $x)*);
            #[cfg(feature = "std")]
            ::log::error!($s $(, $x)*);
            #[cfg(not(any(feature = "embedded", feature = "std")))]
            let _ = ($( & $x ),*);
        }
    };
}
