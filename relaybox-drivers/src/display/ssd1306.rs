//! SSD1306 OLED display driver
//!
//! Driver for 128x64 SSD1306-based OLED displays via I2C, running the
//! panel off its internal charge pump. Implements the text-oriented
//! `DisplaySurface` the status renderer draws through.

use embedded_hal::i2c::I2c;

use relaybox_core::surface::{Color, DisplaySurface, SurfaceError};

use super::font::{glyph, GLYPH_HEIGHT, GLYPH_WIDTH};

/// SSD1306 I2C address (0x3D with the address strap high)
const SSD1306_ADDR: u8 = 0x3C;

/// Display dimensions
const WIDTH: usize = 128;
const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// SSD1306 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const RESUME_FROM_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_MEM_MODE: u8 = 0x20;
    pub const SET_COL_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// SSD1306 OLED driver
///
/// Owns the frame buffer plus the text cursor state. Drawing happens in
/// memory; `present` pushes the whole frame in a single data transfer.
/// Init leaves the controller in horizontal addressing mode, so the
/// frame data needs no per-page addressing.
pub struct Ssd1306<I2C> {
    i2c: I2C,
    /// Frame buffer (1 bit per pixel, organized as pages)
    buffer: [[u8; WIDTH]; PAGES],
    cursor_x: usize,
    cursor_y: usize,
    scale: usize,
    fg: Color,
    bg: Option<Color>,
}

impl<I2C> Ssd1306<I2C>
where
    I2C: I2c,
{
    /// Create a new SSD1306 driver
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            buffer: [[0; WIDTH]; PAGES],
            cursor_x: 0,
            cursor_y: 0,
            scale: 1,
            fg: Color::On,
            bg: None,
        }
    }

    /// Send a command byte to the display
    fn command(&mut self, cmd: u8) -> Result<(), SurfaceError> {
        self.i2c
            .write(SSD1306_ADDR, &[0x00, cmd])
            .map_err(|_| SurfaceError::Communication)
    }

    /// Set one pixel, silently clipping out-of-bounds coordinates
    fn set_pixel(&mut self, x: usize, y: usize, lit: bool) {
        if x >= WIDTH || y >= HEIGHT {
            return;
        }
        let bit = 1 << (y % 8);
        if lit {
            self.buffer[y / 8][x] |= bit;
        } else {
            self.buffer[y / 8][x] &= !bit;
        }
    }

    /// Draw one character cell at the cursor and advance past it
    fn draw_glyph(&mut self, ch: char) {
        let columns = glyph(ch);
        for (col, bits) in columns.iter().enumerate() {
            for row in 0..GLYPH_HEIGHT {
                let color = if (*bits >> row) & 1 == 1 {
                    self.fg
                } else if let Some(bg) = self.bg {
                    bg
                } else {
                    // Transparent background leaves the pixel alone
                    continue;
                };
                let lit = color == Color::On;
                for dy in 0..self.scale {
                    for dx in 0..self.scale {
                        self.set_pixel(
                            self.cursor_x + col * self.scale + dx,
                            self.cursor_y + row * self.scale + dy,
                            lit,
                        );
                    }
                }
            }
        }
        self.cursor_x += GLYPH_WIDTH * self.scale;
    }
}

impl<I2C> DisplaySurface for Ssd1306<I2C>
where
    I2C: I2c,
{
    fn init(&mut self) -> Result<(), SurfaceError> {
        // Initialization sequence for a 128x64 panel, charge pump on
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            0x3F, // 64 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE | 0x00,
            cmd::SET_CHARGE_PUMP,
            0x14, // Enable charge pump
            cmd::SET_MEM_MODE,
            0x00,                  // Horizontal addressing
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            0x12, // Alternative COM config
            cmd::SET_CONTRAST,
            0xCF, // High contrast
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::RESUME_FROM_RAM,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c)?;
        }

        Ok(())
    }

    fn clear(&mut self) {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
    }

    fn set_cursor(&mut self, x: u8, y: u8) {
        self.cursor_x = x as usize;
        self.cursor_y = y as usize;
    }

    fn set_text_scale(&mut self, scale: u8) {
        self.scale = scale.max(1) as usize;
    }

    fn set_text_color(&mut self, fg: Color) {
        self.fg = fg;
        self.bg = None;
    }

    fn set_text_color_on(&mut self, fg: Color, bg: Color) {
        self.fg = fg;
        self.bg = Some(bg);
    }

    fn print(&mut self, text: &str) {
        for ch in text.chars() {
            self.draw_glyph(ch);
        }
    }

    fn println(&mut self, text: &str) {
        self.print(text);
        self.cursor_x = 0;
        self.cursor_y += GLYPH_HEIGHT * self.scale;
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        // Reset the window so the frame data starts at the top left
        self.command(cmd::SET_COL_ADDR)?;
        self.command(0)?;
        self.command((WIDTH - 1) as u8)?;
        self.command(cmd::SET_PAGE_ADDR)?;
        self.command(0)?;
        self.command((PAGES - 1) as u8)?;

        // Whole frame in one data transfer
        let mut data = [0u8; WIDTH * PAGES + 1];
        data[0] = 0x40; // Data mode
        for (page, chunk) in self.buffer.iter().enumerate() {
            data[1 + page * WIDTH..1 + (page + 1) * WIDTH].copy_from_slice(chunk);
        }
        self.i2c
            .write(SSD1306_ADDR, &data)
            .map_err(|_| SurfaceError::Communication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, Operation};
    use heapless::Vec;

    /// I2C double that logs written bytes and per-write lengths
    struct BusLog {
        bytes: Vec<u8, 2048>,
        write_lens: Vec<usize, 64>,
        addrs: Vec<u8, 64>,
        fail: bool,
    }

    impl BusLog {
        fn new() -> Self {
            Self {
                bytes: Vec::new(),
                write_lens: Vec::new(),
                addrs: Vec::new(),
                fail: false,
            }
        }

        fn failing() -> Self {
            let mut log = Self::new();
            log.fail = true;
            log
        }
    }

    impl embedded_hal::i2c::ErrorType for BusLog {
        type Error = ErrorKind;
    }

    impl I2c for BusLog {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            self.addrs.push(address).unwrap();
            for op in operations {
                if let Operation::Write(data) = op {
                    self.write_lens.push(data.len()).unwrap();
                    self.bytes.extend_from_slice(data).unwrap();
                }
            }
            Ok(())
        }
    }

    /// First index where `needle` appears in `haystack`
    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn test_init_command_stream() {
        let mut display = Ssd1306::new(BusLog::new());
        display.init().unwrap();

        let bytes = display.i2c.bytes.as_slice();
        assert!(display.i2c.addrs.iter().all(|&a| a == SSD1306_ADDR));
        // Every init write is a control byte followed by one command
        assert!(display.i2c.write_lens.iter().all(|&len| len == 2));
        // Panel off first, on last
        assert_eq!(&bytes[..2], &[0x00, cmd::DISPLAY_OFF]);
        assert_eq!(&bytes[bytes.len() - 2..], &[0x00, cmd::DISPLAY_ON]);
        // Charge pump enabled, horizontal addressing selected
        assert!(find(bytes, &[0x00, cmd::SET_CHARGE_PUMP, 0x00, 0x14]).is_some());
        assert!(find(bytes, &[0x00, cmd::SET_MEM_MODE, 0x00, 0x00]).is_some());
    }

    #[test]
    fn test_init_failure_maps_to_communication() {
        let mut display = Ssd1306::new(BusLog::failing());
        assert_eq!(display.init(), Err(SurfaceError::Communication));
    }

    #[test]
    fn test_present_sends_whole_frame_in_one_write() {
        let mut display = Ssd1306::new(BusLog::new());
        display.present().unwrap();

        // Six window command writes, then a single data write
        let lens = display.i2c.write_lens.as_slice();
        assert_eq!(lens.len(), 7);
        assert!(lens[..6].iter().all(|&len| len == 2));
        assert_eq!(lens[6], 1 + WIDTH * PAGES);

        let bytes = display.i2c.bytes.as_slice();
        let frame = &bytes[bytes.len() - (1 + WIDTH * PAGES)..];
        assert_eq!(frame[0], 0x40);
        assert!(frame[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_present_failure_maps_to_communication() {
        let mut display = Ssd1306::new(BusLog::failing());
        assert_eq!(display.present(), Err(SurfaceError::Communication));
    }

    #[test]
    fn test_present_carries_drawn_pixels() {
        let mut display = Ssd1306::new(BusLog::new());
        display.set_cursor(0, 0);
        display.set_text_color(Color::On);
        display.print("1");
        display.present().unwrap();

        let bytes = display.i2c.bytes.as_slice();
        let frame = &bytes[bytes.len() - (WIDTH * PAGES)..];
        assert_eq!(&frame[..6], &[0x00, 0x42, 0x7F, 0x40, 0x00, 0x00]);
    }

    #[test]
    fn test_glyph_lands_in_buffer_at_cursor() {
        let mut display = Ssd1306::new(BusLog::new());
        display.set_cursor(12, 0);
        display.print("1");

        assert_eq!(
            &display.buffer[0][12..18],
            &[0x00, 0x42, 0x7F, 0x40, 0x00, 0x00]
        );
        assert_eq!(display.cursor_x, 18);
    }

    #[test]
    fn test_scale_two_doubles_rows_and_columns() {
        let mut display = Ssd1306::new(BusLog::new());
        display.set_text_scale(2);
        display.print("1");

        // Column 2 of '1' is 0x7F (rows 0-6), scaled to rows 0-13 at x 4-5
        assert_eq!(display.buffer[0][4], 0xFF);
        assert_eq!(display.buffer[1][4], 0x3F);
        assert_eq!(display.buffer[0][5], 0xFF);
        assert_eq!(display.buffer[1][5], 0x3F);
        // Advance doubles too
        assert_eq!(display.cursor_x, 12);
    }

    #[test]
    fn test_opaque_background_fills_cell() {
        let mut display = Ssd1306::new(BusLog::new());
        display.set_text_color_on(Color::Off, Color::On);
        display.print(" ");

        // Blank glyph, opaque lit background: the whole cell lights up
        assert_eq!(&display.buffer[0][..6], &[0xFF; 6]);

        // A dark digit on that background leaves only the glyph unlit
        display.print("1");
        assert_eq!(display.buffer[0][8], !0x7F);
    }

    #[test]
    fn test_transparent_background_preserves_pixels() {
        let mut display = Ssd1306::new(BusLog::new());
        display.print("1");
        display.set_cursor(0, 0);
        display.print(" ");

        // Overprinting with a transparent blank must not erase anything
        assert_eq!(display.buffer[0][2], 0x7F);
    }

    #[test]
    fn test_println_wraps_to_line_start() {
        let mut display = Ssd1306::new(BusLog::new());
        display.set_text_scale(2);
        display.println("R");

        assert_eq!(display.cursor_x, 0);
        assert_eq!(display.cursor_y, 16);

        // The next glyph lands on the new line
        display.print("1");
        assert_eq!(display.buffer[2][4], 0xFF);
    }

    #[test]
    fn test_clear_resets_frame() {
        let mut display = Ssd1306::new(BusLog::new());
        display.print("8");
        display.clear();

        for page in display.buffer.iter() {
            assert!(page.iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_offscreen_pixels_are_clipped() {
        let mut display = Ssd1306::new(BusLog::new());
        display.set_text_scale(2);
        display.set_cursor(120, 56);
        display.print("8");

        // Column 0 of '8' is 0x36; only its top rows fit the panel
        assert_eq!(display.buffer[7][120], 0x3C);
        // Cursor still advances past the clipped glyph
        assert_eq!(display.cursor_x, 132);
    }

    #[test]
    fn test_scale_zero_clamps_to_one() {
        let mut display = Ssd1306::new(BusLog::new());
        display.set_text_scale(0);
        display.print("1");

        assert_eq!(display.cursor_x, 6);
        assert_eq!(display.buffer[0][2], 0x7F);
    }
}
