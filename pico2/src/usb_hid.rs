//! USB composite HID device: boot keyboard, consumer control and wheel mouse.
//!
//! The gesture loop never touches USB directly. It pushes [`HidCommand`]s into
//! [`HID_COMMANDS`] and the HID task turns them into reports.

use cuskey_common::{HidCommand, HidSink};
use cuskey_pico2::keyboard::KeyboardState;
use cuskey_pico2::selection::HID_QUEUE_DEPTH;
use defmt::{info, warn};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{Driver, InterruptHandler};
use embassy_rp::{Peri, bind_interrupts};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_usb::class::hid::{Config as HidConfig, HidBootProtocol, HidSubclass, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;
use usbd_hid::descriptor::{KeyboardReport, MediaKeyboardReport, MouseReport, SerializedDescriptor};

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

pub type UsbDriver = Driver<'static, USB>;

/// Commands from the gesture loop to the HID task.
pub static HID_COMMANDS: Channel<CriticalSectionRawMutex, HidCommand, HID_QUEUE_DEPTH> = Channel::new();

// =============================================================================
// Device Setup
// =============================================================================

const USB_VID: u16 = 0xC0DE;
const USB_PID: u16 = 0xCAFE;

static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static KEYBOARD_STATE: StaticCell<State<'static>> = StaticCell::new();
static MEDIA_STATE: StaticCell<State<'static>> = StaticCell::new();
static MOUSE_STATE: StaticCell<State<'static>> = StaticCell::new();

/// HID interfaces of the composite device.
pub struct HidWriters {
    pub keyboard: HidWriter<'static, UsbDriver, 8>,
    pub media: HidWriter<'static, UsbDriver, 8>,
    pub mouse: HidWriter<'static, UsbDriver, 8>,
}

/// Build the USB device and its three HID interfaces.
pub fn build(
    usb: Peri<'static, USB>,
    product: &'static str,
) -> (UsbDevice<'static, UsbDriver>, HidWriters) {
    let driver = Driver::new(usb, Irqs);

    let mut config = Config::new(USB_VID, USB_PID);
    config.manufacturer = Some("cuskey");
    config.product = Some(product);
    config.serial_number = Some("000001");
    config.max_power = 100;
    config.max_packet_size_0 = 64;

    let mut builder = Builder::new(
        driver,
        config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        &mut [],
        CONTROL_BUF.init([0; 64]),
    );

    let keyboard = HidWriter::new(
        &mut builder,
        KEYBOARD_STATE.init(State::new()),
        HidConfig {
            report_descriptor: KeyboardReport::desc(),
            request_handler: None,
            poll_ms: 10,
            max_packet_size: 8,
            hid_subclass: HidSubclass::Boot,
            hid_boot_protocol: HidBootProtocol::Keyboard,
        },
    );
    let media = HidWriter::new(
        &mut builder,
        MEDIA_STATE.init(State::new()),
        HidConfig {
            report_descriptor: MediaKeyboardReport::desc(),
            request_handler: None,
            poll_ms: 10,
            max_packet_size: 8,
            hid_subclass: HidSubclass::No,
            hid_boot_protocol: HidBootProtocol::None,
        },
    );
    let mouse = HidWriter::new(
        &mut builder,
        MOUSE_STATE.init(State::new()),
        HidConfig {
            report_descriptor: MouseReport::desc(),
            request_handler: None,
            poll_ms: 10,
            max_packet_size: 8,
            hid_subclass: HidSubclass::No,
            hid_boot_protocol: HidBootProtocol::None,
        },
    );

    (builder.build(), HidWriters { keyboard, media, mouse })
}

// =============================================================================
// Sink
// =============================================================================

/// [`HidSink`] that queues commands for the HID task without blocking.
pub struct ChannelSink;

impl HidSink for ChannelSink {
    fn emit(
        &mut self,
        command: HidCommand,
    ) {
        if HID_COMMANDS.try_send(command).is_err() {
            warn!("HID queue full, dropped {}", command);
        }
    }
}

// =============================================================================
// Tasks
// =============================================================================

#[embassy_executor::task]
pub async fn usb_task(mut usb: UsbDevice<'static, UsbDriver>) -> ! { usb.run().await }

/// Drain [`HID_COMMANDS`] into USB reports.
#[embassy_executor::task]
pub async fn hid_task(mut writers: HidWriters) {
    writers.keyboard.ready().await;
    info!("USB configured");

    let mut keys = KeyboardState::new();

    loop {
        match HID_COMMANDS.receive().await {
            HidCommand::SendKey(key) => {
                let mut tap = keys.clone();
                tap.press(key);
                write_keyboard(&mut writers.keyboard, &tap).await;
                write_keyboard(&mut writers.keyboard, &keys).await;
            }
            HidCommand::PressKey(key) => {
                if keys.press(key) {
                    write_keyboard(&mut writers.keyboard, &keys).await;
                }
            }
            HidCommand::ReleaseKey(key) => {
                if keys.release(key) {
                    write_keyboard(&mut writers.keyboard, &keys).await;
                }
            }
            HidCommand::SendConsumer(code) => {
                for usage_id in [code.0, 0] {
                    if let Err(e) = writers.media.write_serialize(&MediaKeyboardReport { usage_id }).await {
                        warn!("Consumer report failed: {}", e);
                    }
                }
            }
            HidCommand::Wheel(delta) => {
                let report = MouseReport {
                    buttons: 0,
                    x: 0,
                    y: 0,
                    wheel: delta,
                    pan: 0,
                };
                if let Err(e) = writers.mouse.write_serialize(&report).await {
                    warn!("Mouse report failed: {}", e);
                }
            }
        }
    }
}

async fn write_keyboard(
    writer: &mut HidWriter<'static, UsbDriver, 8>,
    state: &KeyboardState,
) {
    let snapshot = state.snapshot();
    let report = KeyboardReport {
        modifier: snapshot.modifier,
        reserved: 0,
        leds: 0,
        keycodes: snapshot.keycodes,
    };
    if let Err(e) = writer.write_serialize(&report).await {
        warn!("Keyboard report failed: {}", e);
    }
}
