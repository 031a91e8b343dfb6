// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the gantry controller on a NUCLEO-F767ZI.
//!
//! The stepper drivers sit on a breakout between the Nucleo headers and the
//! gantry loom; limit switches and the jog panel come in on the same headers.

use stm32f7xx_hal::{
    gpio::{gpioa, gpiob, gpioc, gpiod, Alternate, Analog, Input, Output, PullUp, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```rust
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD);
/// ```
pub struct BoardPins {
    pub leds: LedPins,
    pub usart3: Usart3Pins,
    pub steppers: StepperPins,
    pub limits: LimitPins,
    pub jog: JogPins,
}

/// Nucleo user LEDs.
pub struct LedPins {
    pub green: gpiob::PB0<Output<PushPull>>,
    pub red: gpiob::PB14<Output<PushPull>>,
}

/// ST-LINK virtual COM port.
pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

/// STEP/DIR lines for both axis drivers plus the shared enable.
pub struct StepperPins {
    pub x_step: gpiod::PD12<Output<PushPull>>,
    pub x_dir: gpiod::PD13<Output<PushPull>>,
    pub y_step: gpiod::PD14<Output<PushPull>>,
    pub y_dir: gpiod::PD15<Output<PushPull>>,
    pub enable: gpiod::PD11<Output<PushPull>>,
}

/// Home limit switches, normally-open to ground.
pub struct LimitPins {
    pub x_home: gpioc::PC6<Input<PullUp>>,
    pub y_home: gpioc::PC7<Input<PullUp>>,
}

/// Jog panel: two potentiometer channels and the recalibrate button.
pub struct JogPins {
    pub x_axis: gpioa::PA3<Analog>, // ADC1_IN3
    pub y_axis: gpioc::PC0<Analog>, // ADC1_IN10
    pub calibrate: gpioc::PC13<Input<PullUp>>,
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpiob: pac::GPIOB, gpioc: pac::GPIOC, gpiod: pac::GPIOD) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();

        Self {
            leds: LedPins {
                green: gpiob.pb0.into_push_pull_output(),
                red: gpiob.pb14.into_push_pull_output(),
            },

            usart3: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },

            steppers: StepperPins {
                x_step: gpiod.pd12.into_push_pull_output(),
                x_dir: gpiod.pd13.into_push_pull_output(),
                y_step: gpiod.pd14.into_push_pull_output(),
                y_dir: gpiod.pd15.into_push_pull_output(),
                enable: gpiod.pd11.into_push_pull_output(),
            },

            limits: LimitPins {
                x_home: gpioc.pc6.into_pull_up_input(),
                y_home: gpioc.pc7.into_pull_up_input(),
            },

            jog: JogPins {
                x_axis: gpioa.pa3.into_analog(),
                y_axis: gpioc.pc0.into_analog(),
                calibrate: gpioc.pc13.into_pull_up_input(),
            },
        }
    }
}
