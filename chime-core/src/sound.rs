//! Alarm sound selection

/// One of the five alarm sounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmSound {
    Alarm1,
    Alarm2,
    Alarm3,
    Alarm4,
    Alarm5,
}

impl AlarmSound {
    /// All sounds, in index order
    pub const ALL: [AlarmSound; 5] = [
        AlarmSound::Alarm1,
        AlarmSound::Alarm2,
        AlarmSound::Alarm3,
        AlarmSound::Alarm4,
        AlarmSound::Alarm5,
    ];

    /// Pick a sound from a uniformly distributed random word
    pub fn from_random(random: u32) -> Self {
        Self::ALL[(random % Self::ALL.len() as u32) as usize]
    }

    /// Resource name
    pub fn name(self) -> &'static str {
        match self {
            AlarmSound::Alarm1 => "alarm1",
            AlarmSound::Alarm2 => "alarm2",
            AlarmSound::Alarm3 => "alarm3",
            AlarmSound::Alarm4 => "alarm4",
            AlarmSound::Alarm5 => "alarm5",
        }
    }
}
