//! Hardware drivers for the relay box status display
//!
//! Two concerns live here:
//!
//! - [`display`]: the SSD1306 OLED driver implementing the core crate's
//!   `DisplaySurface`
//! - [`relay`]: debounced sensing of the relay drive lines
//!
//! Both are written against `embedded-hal` traits so they test on the
//! host with bus doubles.

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod relay;
