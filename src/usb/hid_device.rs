//! USB HID keyboard device.
//!
//! Initialises the Embassy USB stack on the RP2040 USB peripheral and
//! exposes a single boot-protocol keyboard endpoint. The synchronous
//! control loop hands chords to [`HidSender`], which queues press and
//! release reports on a channel; a dedicated writer task drains the
//! channel into the endpoint.

use crate::config;
use crate::io::KeySender;
use crate::keymap::{chord_sequence, Action, KeyboardReport, KEYBOARD_REPORT_DESCRIPTOR};
use defmt::{info, warn};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{Driver, InterruptHandler};
use embassy_rp::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Sender};
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<peripherals::USB>;
});

static KB_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();

/// Outbound reports from the control loop to the writer task.
/// Each chord occupies two slots (press + release).
static REPORT_CHANNEL: Channel<CriticalSectionRawMutex, KeyboardReport, 8> = Channel::new();

/// Build result containing the USB device runner and the HID writer.
pub struct UsbHidDevice {
    pub device: UsbDevice<'static, Driver<'static, USB>>,
    pub keyboard_writer: HidWriter<'static, Driver<'static, USB>, 8>,
}

/// Initialise the USB stack and create the HID keyboard device.
///
/// Must be called exactly once. All static buffers are consumed here.
pub fn init(usbd: USB) -> UsbHidDevice {
    let driver = Driver::new(usbd, Irqs);

    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let kb_state = KB_STATE.init(State::new());
    let kb_config = HidConfig {
        report_descriptor: KEYBOARD_REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 8,
    };
    let keyboard_writer = HidWriter::new(&mut builder, kb_state, kb_config);

    let device = builder.build();

    info!("USB HID keyboard initialised");

    UsbHidDevice {
        device,
        keyboard_writer,
    }
}

/// Run the USB device stack - must be spawned as a dedicated task.
#[embassy_executor::task]
pub async fn run_usb_device(mut device: UsbDevice<'static, Driver<'static, USB>>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Drains queued reports into the keyboard endpoint.
#[embassy_executor::task]
pub async fn hid_writer_task(mut keyboard: HidWriter<'static, Driver<'static, USB>, 8>) -> ! {
    info!("HID writer task started - waiting for reports");

    let mut buf = [0u8; 8];

    loop {
        let report = REPORT_CHANNEL.receive().await;
        let n = report.serialize(&mut buf);
        if keyboard.write(&buf[..n]).await.is_err() {
            warn!("USB keyboard write failed");
        }
    }
}

/// Synchronous [`KeySender`] backed by the report channel.
pub struct HidSender {
    tx: Sender<'static, CriticalSectionRawMutex, KeyboardReport, 8>,
}

impl HidSender {
    pub fn new() -> Self {
        Self {
            tx: REPORT_CHANNEL.sender(),
        }
    }
}

impl Default for HidSender {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySender for HidSender {
    fn send(&mut self, action: Action) {
        // All-or-nothing: queueing the press without its release would
        // leave the chord held on the host. The control loop is the
        // only producer, so the capacity check cannot race.
        if self.tx.free_capacity() < 2 {
            warn!("HID report channel full, dropped {}", action);
            return;
        }
        for report in chord_sequence(action) {
            let _ = self.tx.try_send(report);
        }
    }
}
