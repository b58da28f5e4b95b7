//! Melody tables for the five alarm sounds

use chime_core::sound::AlarmSound;

/// One note; `freq_hz == 0` is a rest
#[derive(Debug, Clone, Copy)]
pub struct Note {
    pub freq_hz: u16,
    pub ms: u16,
}

const fn n(freq_hz: u16, ms: u16) -> Note {
    Note { freq_hz, ms }
}

const REST: u16 = 0;
const C5: u16 = 523;
const D5: u16 = 587;
const E5: u16 = 659;
const F5: u16 = 698;
const G5: u16 = 784;
const A5: u16 = 880;
const B5: u16 = 988;
const C6: u16 = 1047;
const E6: u16 = 1319;
const G6: u16 = 1568;

/// Classic double beep
const ALARM1: &[Note] = &[
    n(A5, 120),
    n(REST, 80),
    n(A5, 120),
    n(REST, 600),
];

/// Rising arpeggio
const ALARM2: &[Note] = &[
    n(C5, 150),
    n(E5, 150),
    n(G5, 150),
    n(C6, 300),
    n(REST, 400),
];

/// Two-tone siren
const ALARM3: &[Note] = &[
    n(E6, 250),
    n(B5, 250),
    n(E6, 250),
    n(B5, 250),
];

/// Short scale run
const ALARM4: &[Note] = &[
    n(C5, 100),
    n(D5, 100),
    n(E5, 100),
    n(F5, 100),
    n(G5, 100),
    n(A5, 100),
    n(B5, 100),
    n(C6, 200),
    n(REST, 300),
];

/// Fast chirps
const ALARM5: &[Note] = &[
    n(G6, 60),
    n(REST, 40),
    n(G6, 60),
    n(REST, 40),
    n(G6, 60),
    n(REST, 500),
];

/// Notes for a sound
pub fn melody(sound: AlarmSound) -> &'static [Note] {
    match sound {
        AlarmSound::Alarm1 => ALARM1,
        AlarmSound::Alarm2 => ALARM2,
        AlarmSound::Alarm3 => ALARM3,
        AlarmSound::Alarm4 => ALARM4,
        AlarmSound::Alarm5 => ALARM5,
    }
}
