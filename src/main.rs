//! streampad firmware entry point (RP2040).
//!
//! Brings up USB, the OLED and the GPIO bindings, then runs the
//! cooperative control loop: one `Controller::tick` per scheduler
//! period, awaiting the ticker in between. All shared state lives
//! inside the controller; the only suspension point is the ticker.

#![no_std]
#![no_main]

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, I2c};
use embassy_time::{Duration, Instant, Ticker};
use streampad::board::{KeyPins, PadLeds};
use streampad::config;
use streampad::control::Controller;
use streampad::oled::Oled;
use streampad::usb::hid_device;
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("streampad starting");

    let p = embassy_rp::init(Default::default());

    // USB HID keyboard.
    let usb = hid_device::init(p.USB);
    spawner.spawn(hid_device::run_usb_device(usb.device)).unwrap();
    spawner
        .spawn(hid_device::hid_writer_task(usb.keyboard_writer))
        .unwrap();
    let mut sender = hid_device::HidSender::new();

    // OLED on I2C0 (SDA=GP0, SCL=GP1). Shows the boot splash until the
    // first page render.
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_1, p.PIN_0, i2c::Config::default());
    let mut oled = Oled::new(i2c);

    // Keys and LEDs.
    let pins = KeyPins::new(p.PIN_8, p.PIN_9, p.PIN_13, p.PIN_27, p.PIN_5);
    let mut leds = PadLeds::new(p.PIN_28, p.PIN_15);

    let mut controller = Controller::new();
    let mut seen_faults = 0;

    info!("control loop running");

    let mut ticker = Ticker::every(Duration::from_millis(config::SCHED_TICK_MS));
    loop {
        let now = Instant::now().as_millis();
        controller.tick(now, &pins, &mut sender, &mut leds, &mut oled);

        if controller.faults() != seen_faults {
            seen_faults = controller.faults();
            warn!("rejected state transition (total {})", seen_faults);
        }

        ticker.next().await;
    }
}
