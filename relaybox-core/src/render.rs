//! Relay status rendering
//!
//! Turns a [`RelayMask`] into the four-line status frame shown on the
//! panel. One line per channel:
//!
//! ```text
//! R 0 =  1
//! R 1 =  0
//! R 2 =  0
//! R 3 =  1
//! ```
//!
//! Energized channels get their value drawn inverse (dark digit on a
//! lit cell) so a live channel stands out across the room.

use core::fmt::Write;

use heapless::String;

use crate::mask::{RelayMask, RELAY_COUNT};
use crate::surface::{Color, DisplaySurface};

/// Glyph magnification for the status lines
///
/// At 2x a 6x8 cell becomes 12x16, so four lines fill a 64 pixel tall
/// panel exactly.
const TEXT_SCALE: u8 = 2;

/// Lifecycle of the renderer's panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderState {
    /// [`StatusRenderer::init`] has not run yet
    Uninitialized,
    /// Panel came up; frames are drawn and presented
    Ready,
    /// Panel bring-up failed; every render is a no-op
    Failed,
}

impl RenderState {
    /// Check whether frames reach the panel
    pub fn is_ready(self) -> bool {
        matches!(self, RenderState::Ready)
    }
}

/// Renders relay channel states onto an owned pixel surface
///
/// The surface is injected so the OLED driver can be swapped for a
/// recording double in tests. A failed [`init`](Self::init) parks the
/// renderer in [`RenderState::Failed`] for its whole lifetime: the box
/// keeps switching relays whether or not anyone can watch it.
pub struct StatusRenderer<S> {
    surface: S,
    state: RenderState,
}

impl<S: DisplaySurface> StatusRenderer<S> {
    /// Wrap a not-yet-initialized surface
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            state: RenderState::Uninitialized,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Check whether the panel came up
    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// Borrow the owned surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// One-time panel bring-up, then a first frame
    ///
    /// The hardware is only ever attempted from `Uninitialized`; a
    /// failure is permanent and not surfaced to the caller. The initial
    /// mask is rendered unconditionally, which is a no-op when the
    /// panel is absent.
    pub fn init(&mut self, initial: RelayMask) {
        if self.state == RenderState::Uninitialized {
            self.state = match self.surface.init() {
                Ok(()) => RenderState::Ready,
                Err(_) => RenderState::Failed,
            };
        }
        self.render(initial);
    }

    /// Draw and present one status frame for `mask`
    ///
    /// Returns without touching the surface unless the panel is ready.
    pub fn render(&mut self, mask: RelayMask) {
        if !self.state.is_ready() {
            return;
        }

        self.surface.clear();
        self.surface.set_cursor(0, 0);
        self.surface.set_text_scale(TEXT_SCALE);

        for i in 0..RELAY_COUNT {
            // The previous line may have left the surface in inverse mode
            self.surface.set_text_color(Color::On);
            self.surface.print(&line_label(i));

            if mask.is_on(i) {
                self.surface.set_text_color_on(Color::Off, Color::On);
                self.surface.println(" 1 ");
            } else {
                self.surface.println(" 0 ");
            }
        }

        // A frame the panel dropped looks the same as one it showed
        self.surface.present().ok();
    }
}

/// Compose the label for channel `index`
fn line_label(index: usize) -> String<8> {
    let mut label = String::new();
    // Cannot overflow: "R 3 = " is six bytes
    let _ = write!(label, "R {} = ", index);
    label
}
