#![no_std]
#![no_main]

mod ssd1306;
mod state;

use defmt::{error, info};
use defmt_rtt as _;
use panic_probe as _;

use rp_pico::entry;
use rp_pico::hal; // Hardware Abstraction Layer (higher-level drivers)
use rp_pico::hal::gpio::{FunctionI2C, Pin, PullUp};
use rp_pico::hal::pac; // Peripheral Access Crate (low-level register access)
use rp_pico::hal::pac::interrupt;
use rp_pico::hal::timer::Alarm; // brings enable_interrupt/schedule into scope

use fugit::{MicrosDurationU32, RateExtU32};
use portable_atomic::Ordering;
use rand::SeedableRng;
use rand_xoshiro::Xoroshiro128StarStar;

use blockwatch_core::face::WatchFace;
use blockwatch_core::framebuffer::FrameBuffer;
use blockwatch_core::probe;

// I2C1 at 200 kHz on the display header pins
const BUS_FREQUENCY_KHZ: u32 = 200;
const SDA_GPIO: u8 = 26;
const SCL_GPIO: u8 = 27;

/// A fresh face every ten seconds
const FRAME_TICK: MicrosDurationU32 = MicrosDurationU32::secs(10);

const RNG_SEED: u64 = 0xA3F1_58D0_77B2_4C19;

#[entry]
fn main() -> ! {
    info!("blockwatch starting");

    let mut pac = pac::Peripherals::take().unwrap();

    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);

    // Configure the clocks (125 MHz system clock)
    let clocks = hal::clocks::init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .unwrap();

    let sio = hal::Sio::new(pac.SIO); // single-cycle IO
    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let sda_pin: Pin<_, FunctionI2C, PullUp> = pins.gpio26.reconfigure();
    let scl_pin: Pin<_, FunctionI2C, PullUp> = pins.gpio27.reconfigure();
    let mut i2c = hal::I2C::i2c1(
        pac.I2C1,
        sda_pin,
        scl_pin,
        BUS_FREQUENCY_KHZ.kHz(),
        &mut pac.RESETS,
        &clocks.system_clock,
    );

    let mut timer = hal::Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let mut alarm0 = timer.alarm_0().unwrap();
    alarm0.enable_interrupt();
    cortex_m::interrupt::free(|cs| {
        state::SHARED_STATE
            .borrow(cs)
            .replace(Some(state::SharedState::new(alarm0)));
    });
    state::shared_state_interrupt_free(|s| s.alarm0_schedule(FRAME_TICK));

    unsafe {
        pac::NVIC::unmask(pac::Interrupt::TIMER_IRQ_0);
    }

    let address = match probe::find_display(&mut i2c) {
        Ok(address) => address,
        Err(probe::NoDisplayFound) => {
            error!("no I2C display found");
            halt();
        }
    };
    info!("I2C address      : {=u8:#x}", address);
    info!(
        "I2C configuration: I2C1 @ {=u32} kHz, SCL=GP{=u8}, SDA=GP{=u8}",
        BUS_FREQUENCY_KHZ, SCL_GPIO, SDA_GPIO
    );

    // The scan is done with the bus; hand it to the display for good
    let mut display = ssd1306::Ssd1306::new(i2c, address);
    display.init().unwrap();

    let mut frame = FrameBuffer::new();
    let mut face = WatchFace::new(Xoroshiro128StarStar::seed_from_u64(RNG_SEED));

    loop {
        let shown = face.render_frame(&mut frame);
        // A failed transfer is fatal; there is no recovery path
        display.flush(&frame).unwrap();
        info!("showing {=u8:02}:{=u8:02}", shown.hour, shown.minute);

        // Sleep until the next frame is due
        while state::ATOMIC_STATE.frame_due.load(Ordering::SeqCst) == 0 {
            cortex_m::asm::wfi();
        }
        state::ATOMIC_STATE.frame_due.store(0, Ordering::SeqCst);
    }
}

/// Parks the core for good; the end state when no display answered.
fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}

#[interrupt]
fn TIMER_IRQ_0() {
    state::ATOMIC_STATE.frame_due.store(1, Ordering::SeqCst);
    state::shared_state_interrupt_free(|s| {
        s.alarm0_schedule(FRAME_TICK);
        s.alarm0_clear_interrupt();
    });
}
