#![no_main]
#![no_std]

use cortex_m_rt::entry;
use panic_halt as _;

use cortex_m::delay::Delay;
use embedded_hal::blocking::delay::DelayUs;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use gambit::control::{Calibration, CalibrationError, Gantry, JogConfig, JogController, JogTick};
use gambit::drivers::{EnableLine, PulseTiming, StepDir};
use gambit::hw::{Adc, BoardPins, Led, Switch, Usart};
use gambit::motors::{Axis, AxisConfig};
use gambit::protocol::{Command, Parser};

// Gantry geometry: belt-driven X, lead-screw Y.
const X_STEPS_PER_MM: u32 = 10;
const Y_STEPS_PER_MM: u32 = 3;

// ADC1 channels for the jog panel (PA3, PC0).
const JOG_X_CHANNEL: u8 = 3;
const JOG_Y_CHANNEL: u8 = 10;

// Jog polling cadence.
const JOG_POLL_US: u32 = 10_000;

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    // GPIO
    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD);

    // LEDs
    let mut led_green = Led::active_high(pins.leds.green);
    let mut led_red = Led::active_high(pins.leds.red);

    // USART3 (ST-LINK VCP): host commands in, status out
    let usart_cfg = Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART3, (pins.usart3.tx, pins.usart3.rx), &clocks, usart_cfg);
    let mut usart = Usart::new(serial);

    let mut delay = Delay::new(cp.SYST, clocks.sysclk().raw());

    // Axes
    let (Ok(x_cfg), Ok(y_cfg)) = (
        AxisConfig::new(X_STEPS_PER_MM),
        AxisConfig::new(Y_STEPS_PER_MM),
    ) else {
        usart.println("FATAL: invalid axis configuration");
        led_red.on();
        loop {
            cortex_m::asm::nop();
        }
    };

    let x_axis = Axis::new(
        StepDir::new(
            pins.steppers.x_step,
            pins.steppers.x_dir,
            PulseTiming::default(),
        ),
        x_cfg,
    );
    let y_axis = Axis::new(
        StepDir::new(
            pins.steppers.y_step,
            pins.steppers.y_dir,
            PulseTiming::default(),
        ),
        y_cfg,
    );
    let mut gantry = Gantry::new(x_axis, y_axis);

    let mut enable = EnableLine::active_low(pins.steppers.enable);
    enable.enable();

    // Limit switches and homing
    let x_home = Switch::active_low(pins.limits.x_home);
    let y_home = Switch::active_low(pins.limits.y_home);
    let calibration = Calibration::default();

    usart.println("gambit: homing");
    match calibration.home_all(&mut gantry, &x_home, &y_home, &mut delay) {
        Ok(()) => {
            usart.println("homed, origin set");
            led_green.on();
        }
        Err(CalibrationError::Timeout { .. }) => {
            usart.println("FATAL: homing timed out, check limit switch wiring");
            led_red.on();
            enable.disable();
            loop {
                cortex_m::asm::nop();
            }
        }
    }

    // Jog panel: 12-bit conversions scaled onto the 0-1023 jog range
    let adc = Adc::adc1(dp.ADC1);
    let mut jog = JogController::new(
        || adc.read(JOG_X_CHANNEL) >> 2,
        || adc.read(JOG_Y_CHANNEL) >> 2,
        Switch::active_low(pins.jog.calibrate),
        JogConfig::default(),
    );

    let mut parser = Parser::new();

    loop {
        // Drain the host command stream first.
        while let Some(byte) = usart.read_byte() {
            let Some(cmd) = parser.push(byte) else {
                continue;
            };
            match cmd {
                Command::GoToSquare(square) => {
                    gantry.go_to_square(&mut delay, square);
                    report_position(&mut usart, &gantry);
                }
                Command::MoveRelative { dx_mm, dy_mm } => {
                    gantry.move_mm(&mut delay, dx_mm as f32, dy_mm as f32);
                    report_position(&mut usart, &gantry);
                }
                Command::Calibrate => {
                    match rehome(&calibration, &mut gantry, &x_home, &y_home, &mut delay, &mut usart) {
                        Ok(()) => {
                            led_red.off();
                            led_green.on();
                        }
                        Err(_) => {
                            led_green.off();
                            led_red.on();
                        }
                    }
                }
            }
        }

        // Manual jog tick
        if jog.tick(&mut gantry, &mut delay) == JogTick::Calibrate {
            match rehome(&calibration, &mut gantry, &x_home, &y_home, &mut delay, &mut usart) {
                Ok(()) => {
                    led_red.off();
                    led_green.on();
                }
                Err(_) => {
                    led_green.off();
                    led_red.on();
                }
            }
        }

        delay.delay_us(JOG_POLL_US);
    }
}

fn report_position<XS, XD, YS, YD, U>(usart: &mut Usart<U>, gantry: &Gantry<XS, XD, YS, YD>)
where
    XS: embedded_hal::digital::v2::OutputPin,
    XD: embedded_hal::digital::v2::OutputPin,
    YS: embedded_hal::digital::v2::OutputPin,
    YD: embedded_hal::digital::v2::OutputPin,
    U: hal::serial::Instance,
{
    usart.write_str("square ");
    usart.print_u32(gantry.square().index() as u32);
    usart.write_str("  x=");
    usart.print_i32(gantry.x().position_steps());
    usart.write_str(" y=");
    usart.print_i32(gantry.y().position_steps());
    usart.println(" steps");
}

fn rehome<XS, XD, YS, YD, SWX, SWY, D, U>(
    calibration: &Calibration,
    gantry: &mut Gantry<XS, XD, YS, YD>,
    x_home: &Switch<SWX>,
    y_home: &Switch<SWY>,
    delay: &mut D,
    usart: &mut Usart<U>,
) -> Result<(), CalibrationError>
where
    XS: embedded_hal::digital::v2::OutputPin,
    XD: embedded_hal::digital::v2::OutputPin,
    YS: embedded_hal::digital::v2::OutputPin,
    YD: embedded_hal::digital::v2::OutputPin,
    SWX: embedded_hal::digital::v2::InputPin,
    SWY: embedded_hal::digital::v2::InputPin,
    D: DelayUs<u32>,
    U: hal::serial::Instance,
{
    usart.println("rehoming");
    let result = calibration.home_all(gantry, x_home, y_home, delay);
    match &result {
        Ok(()) => usart.println("homed, origin set"),
        // Position math is no longer trustworthy; flag it and keep the
        // operator in charge.
        Err(CalibrationError::Timeout { .. }) => {
            usart.println("homing timed out, positions stale until rehomed")
        }
    }
    result
}
