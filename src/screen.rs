//! Screen state machine and page rendering.
//!
//! The active page is never assigned on its own - it is always the
//! output of `page_for(stream, confirm)`, recomputed after every
//! dispatch pass. Rendering issues a small fixed sequence of `Surface`
//! primitives per page; the surface implementation owns the pixels.

use crate::config::{
    BAR_HEIGHT, BAR_WIDTH, BAR_X, BAR_Y, BUTTON_HEIGHT, BUTTON_LEFT_X, BUTTON_RIGHT_X,
    BUTTON_WIDTH, BUTTON_Y, CONTENT_X, CONTENT_Y, DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_WIDTH,
};
use crate::confirm::Confirm;
use crate::io::{Art, Surface};
use crate::stream::StreamState;
use core::fmt::Write;

/// The fixed set of display layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Page {
    Idle,
    Running,
    Paused,
    Confirming,
}

/// Deterministic page selection. A live confirmation always wins.
pub fn page_for(stream: &StreamState, confirm: &Confirm) -> Page {
    if confirm.is_awaiting() {
        Page::Confirming
    } else if stream.running && !stream.paused {
        Page::Running
    } else if stream.paused {
        Page::Paused
    } else {
        Page::Idle
    }
}

/// Current display state: page, blinking soft buttons, redraw flag.
pub struct ScreenState {
    pub active_page: Page,
    pub blink_left: bool,
    pub blink_right: bool,
    pub needs_redraw: bool,
}

impl ScreenState {
    pub const fn new() -> Self {
        Self {
            active_page: Page::Idle,
            blink_left: false,
            blink_right: false,
            needs_redraw: true,
        }
    }

    /// Recompute the page and blink flags from the authoritative state.
    /// Any change flags a redraw.
    pub fn sync(&mut self, stream: &StreamState, confirm: &Confirm) {
        let page = page_for(stream, confirm);
        if page != self.active_page {
            self.active_page = page;
            self.needs_redraw = true;
        }
        // Both soft buttons flash while a confirmation is pending.
        let blink = page == Page::Confirming;
        if blink != self.blink_left || blink != self.blink_right {
            self.blink_left = blink;
            self.blink_right = blink;
            self.needs_redraw = true;
        }
    }

    /// Repaint the whole page and clear the redraw flag.
    pub fn render<S: Surface>(
        &mut self,
        stream: &StreamState,
        confirm: &Confirm,
        now: u64,
        blink_phase: bool,
        surface: &mut S,
    ) {
        surface.fill_rect(0, 0, DISPLAY_WIDTH, DISPLAY_HEIGHT, false);

        match self.active_page {
            Page::Idle => {
                surface.blit(Art::IdleArt, CONTENT_X, CONTENT_Y);
            }
            Page::Running => {
                surface.blit(Art::LiveBanner, CONTENT_X, CONTENT_Y);
                let mut line: heapless::String<16> = heapless::String::new();
                let _ = write!(line, "LIVE {}", format_elapsed(stream.elapsed(now)));
                surface.text(line.as_str(), 8, 32, true);
            }
            Page::Paused => {
                surface.blit(brb_frame(blink_phase), CONTENT_X, CONTENT_Y);
                let msg = "BE RIGHT BACK";
                surface.text(msg, centered_x(msg), 38, true);
            }
            Page::Confirming => {
                if let Some(action) = confirm.pending() {
                    let mut prompt: heapless::String<24> = heapless::String::new();
                    let _ = write!(prompt, "Really {}?", action.label());
                    surface.text(prompt.as_str(), centered_x(prompt.as_str()), 10, true);
                }
                draw_progress_bar(surface, confirm.progress_permille(now).unwrap_or(0));
            }
        }

        let (left, right) = button_labels(self.active_page);
        draw_button(surface, left, BUTTON_LEFT_X, self.blink_left && blink_phase);
        draw_button(surface, right, BUTTON_RIGHT_X, self.blink_right && blink_phase);

        surface.flush();
        self.needs_redraw = false;
    }

    /// Repaint only the elements stepped by the blink clock: flashing
    /// soft buttons and the pause animation frame. Called from the
    /// blink activity so screen and LED phase can never visibly drift
    /// apart.
    pub fn paint_blink<S: Surface>(&self, blink_phase: bool, surface: &mut S) {
        let animating = self.active_page == Page::Paused;
        if !self.blink_left && !self.blink_right && !animating {
            return;
        }
        if animating {
            surface.blit(brb_frame(blink_phase), CONTENT_X, CONTENT_Y);
        }
        let (left, right) = button_labels(self.active_page);
        if self.blink_left {
            draw_button(surface, left, BUTTON_LEFT_X, blink_phase);
        }
        if self.blink_right {
            draw_button(surface, right, BUTTON_RIGHT_X, blink_phase);
        }
        surface.flush();
    }
}

impl Default for ScreenState {
    fn default() -> Self {
        Self::new()
    }
}

/// Soft-button labels per page. Polarity is fixed: right confirms,
/// left cancels.
fn button_labels(page: Page) -> (&'static str, &'static str) {
    match page {
        Page::Confirming => ("Cancel", "Confirm"),
        _ => ("Left", "Right"),
    }
}

fn draw_button<S: Surface>(surface: &mut S, label: &str, x: i32, filled: bool) {
    surface.fill_rect(x, BUTTON_Y, BUTTON_WIDTH, BUTTON_HEIGHT, filled);
    let inset = (BUTTON_WIDTH as i32 - FONT_WIDTH * label.len() as i32) / 2;
    surface.text(label, x + inset.max(0), BUTTON_Y + 2, !filled);
}

fn draw_progress_bar<S: Surface>(surface: &mut S, permille: u16) {
    // Frame, hollow interior, then the elapsed fill.
    surface.fill_rect(BAR_X, BAR_Y, BAR_WIDTH, BAR_HEIGHT, true);
    surface.fill_rect(BAR_X + 1, BAR_Y + 1, BAR_WIDTH - 2, BAR_HEIGHT - 2, false);
    let fill = (BAR_WIDTH - 2) * u32::from(permille) / 1000;
    if fill > 0 {
        surface.fill_rect(BAR_X + 1, BAR_Y + 1, fill, BAR_HEIGHT - 2, true);
    }
}

/// Pause animation frame for the current blink phase.
fn brb_frame(blink_phase: bool) -> Art {
    if blink_phase {
        Art::BrbFrameB
    } else {
        Art::BrbFrameA
    }
}

fn centered_x(text: &str) -> i32 {
    ((DISPLAY_WIDTH as i32 - FONT_WIDTH * text.len() as i32) / 2).max(0)
}

/// `MM:SS` on-air readout.
fn format_elapsed(elapsed_ms: Option<u64>) -> heapless::String<8> {
    let mut out = heapless::String::new();
    let secs = elapsed_ms.unwrap_or(0) / 1000;
    let _ = write!(out, "{:02}:{:02}", (secs / 60) % 100, secs % 60);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::Action;

    fn running_stream() -> StreamState {
        let mut stream = StreamState::new();
        stream.running = true;
        stream.started_at = Some(0);
        stream
    }

    #[test]
    fn page_selection_truth_table() {
        let mut confirm = Confirm::new();
        let idle = StreamState::new();
        assert_eq!(page_for(&idle, &confirm), Page::Idle);

        let running = running_stream();
        assert_eq!(page_for(&running, &confirm), Page::Running);

        let mut paused = running_stream();
        paused.paused = true;
        assert_eq!(page_for(&paused, &confirm), Page::Paused);

        // A live confirmation overrides everything.
        confirm.request(Action::End, 0).unwrap();
        assert_eq!(page_for(&idle, &confirm), Page::Confirming);
        assert_eq!(page_for(&running, &confirm), Page::Confirming);
        assert_eq!(page_for(&paused, &confirm), Page::Confirming);
    }

    #[test]
    fn sync_recomputes_and_flags_redraw() {
        let mut screen = ScreenState::new();
        screen.needs_redraw = false;
        let confirm = Confirm::new();

        let running = running_stream();
        screen.sync(&running, &confirm);
        assert_eq!(screen.active_page, Page::Running);
        assert!(screen.needs_redraw);

        // No change, no redraw.
        screen.needs_redraw = false;
        screen.sync(&running, &confirm);
        assert!(!screen.needs_redraw);
    }

    #[test]
    fn buttons_blink_only_while_confirming() {
        let mut screen = ScreenState::new();
        let stream = StreamState::new();
        let mut confirm = Confirm::new();

        confirm.request(Action::Start, 0).unwrap();
        screen.sync(&stream, &confirm);
        assert!(screen.blink_left && screen.blink_right);

        confirm.resolve();
        screen.sync(&stream, &confirm);
        assert!(!screen.blink_left && !screen.blink_right);
    }

    #[test]
    fn elapsed_readout_format() {
        assert_eq!(format_elapsed(Some(0)).as_str(), "00:00");
        assert_eq!(format_elapsed(Some(61_000)).as_str(), "01:01");
        assert_eq!(format_elapsed(Some(3_599_000)).as_str(), "59:59");
        assert_eq!(format_elapsed(None).as_str(), "00:00");
    }
}
