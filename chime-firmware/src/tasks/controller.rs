//! Main controller task
//!
//! Feeds button requests, sensor samples and ticks into the core
//! [`Controller`] and applies the effects it returns: timers, audio,
//! device commands and the display snapshot.

use defmt::*;
use embassy_futures::select::{select4, Either4};
use embassy_rp::clocks::RoscRng;
use rand_core::RngCore;

use chime_core::config::ControllerConfig;
use chime_core::{Controller, Effect, Effects};

use crate::channels::{
    AudioCommand, TimerControl, ALARM_CHECK_CONTROL, ALARM_TICK, AUDIO_CMD, COMMANDS,
    DISPLAY_REFRESH, PREVIEW_CONTROL, PREVIEW_TICK, REQUESTS, SAMPLES,
};
use crate::clock::RtcClock;
use crate::display::{DisplayState, DISPLAY_STATE};

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(config: ControllerConfig, mut clock: RtcClock) {
    info!("Controller task started");

    let mut controller = Controller::new(config);
    let mut rng = RoscRng;

    publish(&controller, &[]).await;

    loop {
        let previous = controller.state();
        let effects = match select4(
            REQUESTS.receive(),
            SAMPLES.receive(),
            PREVIEW_TICK.wait(),
            ALARM_TICK.wait(),
        )
        .await
        {
            Either4::First(request) => {
                debug!("Request: {:?}", request);
                controller.handle_request(request)
            }
            Either4::Second(sample) => controller.ingest(sample),
            Either4::Third(()) => {
                let mut effects = Effects::new();
                if let Some(time) = controller.preview_tick() {
                    let _ = effects.push(Effect::ShowTime(time));
                }
                effects
            }
            Either4::Fourth(()) => match controller.check_alarm(&mut clock, || rng.next_u32()) {
                Ok(effects) => effects,
                Err(e) => {
                    warn!("Wall clock unavailable: {:?}", e);
                    continue;
                }
            },
        };

        if effects.is_empty() {
            continue;
        }
        if controller.state() != previous {
            info!("Mode: {:?} -> {:?}", previous, controller.state());
        }
        debug!("{} effects", effects.len());
        if effects.contains(&Effect::StartAlarmCheck) {
            let alarm = controller.confirmed_time();
            info!("Alarm armed for {}:{}", alarm.hour(), alarm.minute());
        }

        for effect in &effects {
            dispatch(*effect);
        }
        publish(&controller, &effects).await;
    }
}

/// Forward an effect to the task that owns it
///
/// Visual effects are folded into the display snapshot by [`publish`].
fn dispatch(effect: Effect) {
    match effect {
        Effect::SendCommand(command) => {
            if COMMANDS.try_send(command).is_err() {
                warn!("Command queue full, dropping {:?}", command);
            }
        }
        Effect::PlaySound(sound) => AUDIO_CMD.signal(AudioCommand::Play(sound)),
        Effect::StopSound => AUDIO_CMD.signal(AudioCommand::Stop),
        Effect::StartPreview(field) => {
            debug!("Preview {:?}", field);
            PREVIEW_CONTROL.signal(TimerControl::Start);
        }
        Effect::StopPreview => PREVIEW_CONTROL.signal(TimerControl::Stop),
        Effect::StartAlarmCheck => ALARM_CHECK_CONTROL.signal(TimerControl::Start),
        Effect::CancelAlarmCheck => {
            info!("Alarm check cancelled");
            ALARM_CHECK_CONTROL.signal(TimerControl::Stop);
        }
        Effect::ShowTime(_) | Effect::Flash(_) | Effect::Invert(_) | Effect::LockControls(_) => {}
    }
}

/// Update the display snapshot and wake the display task
async fn publish(controller: &Controller, effects: &[Effect]) {
    {
        let mut state = DISPLAY_STATE.lock().await;
        for effect in effects {
            apply(&mut state, *effect);
        }
        state.hour_caption = controller.hour_caption();
        state.minute_caption = controller.minute_caption();
        state.mode = controller.state();
        state.ringing = controller.is_ringing();
    }
    DISPLAY_REFRESH.signal(());
}

fn apply(state: &mut DisplayState, effect: Effect) {
    match effect {
        Effect::ShowTime(time) => state.time = time,
        Effect::Flash(on) => state.flashing = on,
        Effect::Invert(on) => state.inverted = on,
        Effect::LockControls(on) => state.locked = on,
        _ => {}
    }
}
