//! Display surface drivers
//!
//! Currently one panel is supported:
//!
//! - SSD1306: 128x64 monochrome OLED over I2C

pub mod font;
pub mod ssd1306;

pub use ssd1306::Ssd1306;
