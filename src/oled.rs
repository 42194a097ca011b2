//! SSD1306 OLED wrapper implementing the core's [`Surface`] capability.
//!
//! All drawing goes into the driver's buffered-graphics framebuffer;
//! nothing reaches the panel until `flush`. The 1-bpp art assets are
//! baked into flash at build time.

use crate::io::{Art, Surface};
use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Idle-page artwork, 124x44, 1 bpp, rows padded to whole bytes.
const IDLE_ART: &[u8] = include_bytes!("../assets/idle.raw");
const IDLE_ART_WIDTH: u32 = 124;

/// "LIVE" banner, 124x25.
const LIVE_BANNER: &[u8] = include_bytes!("../assets/live.raw");
const LIVE_BANNER_WIDTH: u32 = 124;

/// Two-phase pause animation, 124x30 per frame.
const BRB_FRAME_A: &[u8] = include_bytes!("../assets/brb_a.raw");
const BRB_FRAME_B: &[u8] = include_bytes!("../assets/brb_b.raw");
const BRB_FRAME_WIDTH: u32 = 124;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

pub struct Oled<I2C> {
    display: Display<I2C>,
}

impl<I2C> Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the display and show the boot splash.
    pub fn new(i2c: I2C) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        let _ = display.init();
        display.clear_buffer();

        let mut oled = Self { display };
        oled.text("LOADING", 40, 26, true);
        oled.flush();
        oled
    }

    fn style(on: bool) -> embedded_graphics::mono_font::MonoTextStyle<'static, BinaryColor> {
        MonoTextStyleBuilder::new()
            .font(&FONT_6X10)
            .text_color(if on { BinaryColor::On } else { BinaryColor::Off })
            .build()
    }
}

impl<I2C> Surface for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, on: bool) {
        let color = if on { BinaryColor::On } else { BinaryColor::Off };
        let _ = Rectangle::new(Point::new(x, y), Size::new(width, height))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.display);
    }

    fn blit(&mut self, art: Art, x: i32, y: i32) {
        let (data, width) = match art {
            Art::IdleArt => (IDLE_ART, IDLE_ART_WIDTH),
            Art::LiveBanner => (LIVE_BANNER, LIVE_BANNER_WIDTH),
            Art::BrbFrameA => (BRB_FRAME_A, BRB_FRAME_WIDTH),
            Art::BrbFrameB => (BRB_FRAME_B, BRB_FRAME_WIDTH),
        };
        let raw = ImageRaw::<BinaryColor>::new(data, width);
        let _ = Image::new(&raw, Point::new(x, y)).draw(&mut self.display);
    }

    fn text(&mut self, text: &str, x: i32, y: i32, on: bool) {
        // Core coordinates are top-left; FONT_6X10 renders from the
        // baseline, 8 px below the cell top.
        let _ = Text::new(text, Point::new(x, y + 8), Self::style(on)).draw(&mut self.display);
    }

    fn flush(&mut self) {
        let _ = self.display.flush();
    }
}
