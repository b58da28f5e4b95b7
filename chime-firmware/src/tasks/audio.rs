//! Audio task
//!
//! Plays alarm melodies on request. A new command interrupts the melody
//! in progress.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Timer};

use chime_core::sound::AlarmSound;

use crate::audio::{melody, Buzzer};
use crate::channels::{AudioCommand, AUDIO_CMD};

/// Playback gives up after this long even if nobody stops it
const MAX_PLAY_MS: u64 = 60_000;

/// Audio task - plays alarm sounds on request
#[embassy_executor::task]
pub async fn audio_task(mut buzzer: Buzzer) {
    info!("Audio task started");

    let mut pending = None;
    loop {
        let command = match pending.take() {
            Some(command) => command,
            None => AUDIO_CMD.wait().await,
        };

        match command {
            AudioCommand::Play(sound) => {
                info!("Playing {}", sound.name());
                pending = play(&mut buzzer, sound).await;
                buzzer.silence();
            }
            AudioCommand::Stop => {
                debug!("Sound stopped");
                buzzer.silence();
            }
        }
    }
}

/// Loop a melody; returns the command that interrupted it, if any
async fn play(buzzer: &mut Buzzer, sound: AlarmSound) -> Option<AudioCommand> {
    let started = Instant::now();
    let notes = melody(sound);

    while started.elapsed() < Duration::from_millis(MAX_PLAY_MS) {
        for note in notes {
            buzzer.tone(note.freq_hz as u32);
            match select(Timer::after_millis(note.ms as u64), AUDIO_CMD.wait()).await {
                Either::First(()) => {}
                Either::Second(command) => return Some(command),
            }
        }
    }

    info!("{} timed out", sound.name());
    None
}
