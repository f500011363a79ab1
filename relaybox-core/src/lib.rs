//! Board-agnostic core for the relay box status display
//!
//! This crate holds everything about the status display that does not
//! touch hardware:
//!
//! - [`mask`]: the packed relay state snapshot
//! - [`surface`]: the pixel surface trait the renderer draws through
//! - [`render`]: the renderer that turns a mask into a status frame
//!
//! The concrete OLED driver lives in `relaybox-drivers` and plugs in
//! behind [`surface::DisplaySurface`], so all rendering logic here runs
//! unchanged on the host under `cargo test`.

#![no_std]
#![deny(unsafe_code)]

pub mod mask;
pub mod render;
pub mod surface;

pub use mask::{RelayMask, RELAY_COUNT};
pub use render::{RenderState, StatusRenderer};
pub use surface::{Color, DisplaySurface, SurfaceError};
