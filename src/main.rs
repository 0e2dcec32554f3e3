//! Stride - Character locomotion demo
//!
//! Runs a scripted, headless session: the player drops onto a ledge, walks
//! off it, sprints, jumps and finally dies. Transitions and feedback requests
//! are reported through tracing (`RUST_LOG=debug` shows every step).

mod collaborators;
mod scenario;
mod settings;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stride_audio::AudioEngine;
use stride_core::GameTime;
use stride_game::{FeedbackEmitter, InputHandler, PlayerController, TransitionEvent};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::collaborators::{DeathScreen, KiraAudio, TracingAnimator};
use crate::scenario::Scenario;
use crate::settings::Settings;

/// Simulated frame length fed to the fixed-step accumulator
const FRAME_DELTA: f32 = 1.0 / 50.0;

/// Horizontal speed above which the walk cycle produces footsteps
const FOOTSTEP_MIN_SPEED: f32 = 0.5;

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let mut settings_path = None;
    for arg in std::env::args().skip(1) {
        if arg == "--init" {
            let path = Settings::default().save()?;
            println!("Wrote default settings to {}", path.display());
            return Ok(());
        }
        settings_path = Some(PathBuf::from(arg));
    }

    let settings = Settings::load(settings_path.as_deref());
    settings
        .locomotion
        .validate()
        .context("Invalid locomotion settings")?;
    settings.time.validate().context("Invalid time settings")?;

    info!("Starting Stride...");
    run(settings)
}

fn run(settings: Settings) -> Result<()> {
    let scenario = Scenario::new(settings.scenario.clone());
    let mut physics = scenario.build_world();

    let audio = if settings.scenario.enable_audio {
        match AudioEngine::new(settings.audio.clone()) {
            Ok(engine) => Some(Rc::new(RefCell::new(engine))),
            Err(e) => {
                warn!("Audio disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    let death_screen = DeathScreen::default();
    let mut builder = FeedbackEmitter::builder()
        .animation(TracingAnimator)
        .game_over(death_screen.clone())
        .volume(settings.feedback.volume);
    if let Some(engine) = &audio {
        builder = builder.audio(KiraAudio::new(Rc::clone(engine)));
    }
    if settings.feedback.landing_cue_on_contact {
        if let Some(clip) = settings.feedback.landing() {
            builder = builder.landing_cue(clip);
        }
    }

    let mut player = PlayerController::new(settings.locomotion.clone(), builder.build())
        .with_clips(settings.feedback.footsteps(), settings.feedback.landing());
    player.spawn(
        &mut physics,
        Vec3::new(0.0, settings.scenario.spawn_height, 0.0),
    );
    physics.update_queries();

    let mut input = InputHandler::new();
    let mut time = GameTime::new(settings.time.clone());
    let mut rng = StdRng::seed_from_u64(settings.scenario.seed);
    let dt = time.config.fixed_timestep;
    let mut footstep_timer = 0.0;

    while time.fixed_time() < scenario.duration() as f64 {
        time.update(FRAME_DELTA);
        let first_step = time.step_count;
        let steps = time.fixed_steps();

        for i in 0..steps {
            let t = (first_step + i as u64) as f32 * dt;
            scenario.apply(t, &mut input);

            if let Some(event) = player.fixed_update(&mut physics, &input.state, 0.0, dt) {
                info!(?event, t, position = ?player.position(), "Transition");
                if event == TransitionEvent::Landed && !settings.feedback.landing_cue_on_contact {
                    // The landing animation clip plays fully weighted on contact
                    player.on_land(1.0);
                }
            }
            physics.update_queries();

            let speed = Vec3::new(player.character.velocity.x, 0.0, player.character.velocity.z)
                .length();
            if player.is_grounded() && !player.is_dead() && speed > FOOTSTEP_MIN_SPEED {
                footstep_timer += dt;
                if footstep_timer >= scenario.footstep_interval() {
                    footstep_timer = 0.0;
                    player.on_footstep(1.0, &mut rng);
                }
            } else {
                footstep_timer = 0.0;
            }

            let gizmo = player.gizmo();
            debug!(
                phase = ?player.phase(),
                probe = ?gizmo.position,
                color = ?gizmo.color.to_array(),
                "Step"
            );
            input.end_frame();
        }

        if let Some(engine) = &audio {
            let mut engine = engine.borrow_mut();
            // Third-person listener behind the player
            let listener = player.center_position() + Vec3::new(0.0, 1.5, 4.0);
            engine.set_listener(listener, Vec3::NEG_Z, Vec3::Y);
            engine.update();
        }
    }

    info!(
        phase = ?player.phase(),
        position = ?player.position(),
        game_over = death_screen.is_shown(),
        "Session finished"
    );
    Ok(())
}
