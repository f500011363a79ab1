//! Pixel surface abstraction
//!
//! The seam between the renderer and the display hardware. The firmware
//! plugs in the real OLED driver; tests plug in recording doubles.

/// Pixel state on a monochrome panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Pixel dark
    Off,
    /// Pixel lit
    On,
}

/// Errors from the surface's bus-touching operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// A bus transaction with the panel failed
    Communication,
}

/// Monochrome pixel surface with a stateful text cursor
///
/// Drawing calls only mutate an in-memory frame; [`init`](Self::init)
/// and [`present`](Self::present) are the two operations that touch the
/// bus. The cursor, text scale and text colors are surface state that
/// persists across calls until changed.
pub trait DisplaySurface {
    /// Bring up the panel with its fixed hardware configuration
    fn init(&mut self) -> Result<(), SurfaceError>;

    /// Erase the whole frame to dark
    fn clear(&mut self);

    /// Move the text cursor (pixel coordinates, origin top-left)
    fn set_cursor(&mut self, x: u8, y: u8);

    /// Set the integer glyph magnification (1 = 6x8 pixel cells)
    fn set_text_scale(&mut self, scale: u8);

    /// Draw subsequent text in `fg` over a transparent background
    fn set_text_color(&mut self, fg: Color);

    /// Draw subsequent text in `fg` over an opaque `bg` cell
    ///
    /// `fg = Off, bg = On` is the inverse video used for highlights.
    fn set_text_color_on(&mut self, fg: Color, bg: Color);

    /// Draw text at the cursor, advancing it past the glyphs
    fn print(&mut self, text: &str);

    /// Draw text, then move the cursor to the start of the next text line
    fn println(&mut self, text: &str);

    /// Push the composed frame to the panel in one transfer
    fn present(&mut self) -> Result<(), SurfaceError>;
}
