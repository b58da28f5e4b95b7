//! Alarm sounds on a piezo buzzer
//!
//! Each `AlarmSound` is a short melody looped until stopped. Tones are
//! generated with a PWM slice at 50% duty.

mod melodies;

use embassy_rp::pwm::{Config as PwmConfig, Pwm};

pub use melodies::{melody, Note};

/// PWM clock divider; keeps `top` within 16 bits for audible tones
const PWM_DIVIDER: u8 = 64;

/// Lowest tone the divider allows without overflowing `top`
const MIN_TONE_HZ: u32 = 40;

/// Piezo buzzer on one PWM channel
pub struct Buzzer {
    pwm: Pwm<'static>,
    config: PwmConfig,
}

impl Buzzer {
    pub fn new(pwm: Pwm<'static>) -> Self {
        let mut config = PwmConfig::default();
        config.divider = PWM_DIVIDER.into();
        config.compare_b = 0;
        let mut buzzer = Self { pwm, config };
        buzzer.silence();
        buzzer
    }

    /// Play a square wave; zero means rest
    pub fn tone(&mut self, freq_hz: u32) {
        if freq_hz < MIN_TONE_HZ {
            self.silence();
            return;
        }
        let sys_hz = embassy_rp::clocks::clk_sys_freq();
        let top = (sys_hz / (PWM_DIVIDER as u32 * freq_hz)).saturating_sub(1);
        let top = top.min(u16::MAX as u32) as u16;
        self.config.top = top;
        self.config.compare_b = top / 2;
        self.pwm.set_config(&self.config);
    }

    pub fn silence(&mut self) {
        self.config.compare_b = 0;
        self.pwm.set_config(&self.config);
    }
}
