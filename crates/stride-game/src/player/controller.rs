//! Player controller tying locomotion, input gating, feedback and the physics body together

use glam::Vec3;
use rand::Rng;
use stride_core::{AudioClip, EntityId};
use stride_physics::{CharacterController, PhysicsWorld};
use tracing::{debug, info, warn};

use crate::feedback::FeedbackEmitter;
use crate::gizmo::{gizmo_parameters, ground_probe_center, GizmoParams};
use crate::input::{InputAction, InputState};
use crate::locomotion::{
    filter_intent, LocomotionConfig, LocomotionPhase, LocomotionState, MovementIntent,
    TransitionEvent,
};

/// Player character driven by a host-owned fixed-step loop
pub struct PlayerController {
    /// Identifier used in logs
    pub id: EntityId,
    /// Physics body
    pub character: CharacterController,
    locomotion: LocomotionState,
    feedback: FeedbackEmitter,
    footstep_clips: Vec<AudioClip>,
    landing_clip: Option<AudioClip>,
    /// Horizontal velocity (X, Z only; Y comes from the locomotion state)
    horizontal_velocity: Vec3,
}

impl PlayerController {
    /// Create a player controller with the given locomotion config and feedback wiring
    pub fn new(config: LocomotionConfig, feedback: FeedbackEmitter) -> Self {
        Self {
            id: EntityId::new(),
            character: CharacterController::new(),
            locomotion: LocomotionState::new(config),
            feedback,
            footstep_clips: Vec::new(),
            landing_clip: None,
            horizontal_velocity: Vec3::ZERO,
        }
    }

    /// Clips used for footstep and landing animation events. A missing
    /// landing clip is reported here once; landing events then stay silent.
    pub fn with_clips(mut self, footsteps: Vec<AudioClip>, landing: Option<AudioClip>) -> Self {
        if landing.is_none() {
            warn!(character = %self.id, "No landing clip assigned, landings are silent");
        }
        self.footstep_clips = footsteps;
        self.landing_clip = landing;
        self
    }

    /// Spawn the player in the world at a position
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec3) {
        self.character.spawn(physics, position);
        self.horizontal_velocity = Vec3::ZERO;
        info!(character = %self.id, ?position, "Player spawned");
    }

    /// Advance one fixed step.
    ///
    /// Order: death trigger, ground probe, locomotion tick, feedback, gated
    /// movement. Returns the transition produced this step, if any.
    pub fn fixed_update(
        &mut self,
        physics: &mut PhysicsWorld,
        input: &InputState,
        camera_yaw: f32,
        dt: f32,
    ) -> Option<TransitionEvent> {
        if input.is_just_pressed(InputAction::Kill) {
            if let Some(event) = self.kill(physics) {
                return Some(event);
            }
        }
        if self.is_dead() {
            return None;
        }

        let config = self.locomotion.config();
        let center = ground_probe_center(self.character.position, config.grounded_offset);
        let grounded = self
            .character
            .probe_ground(physics, center, config.grounded_radius);

        let event = self.locomotion.tick(dt, grounded);
        if let Some(event) = event {
            self.feedback.on_transition(event, self.center_position());
        }

        let intent = filter_intent(MovementIntent::from_input(input), self.locomotion.state());
        if intent.jump && self.locomotion.try_jump() {
            debug!(character = %self.id, "Jump launched");
            self.feedback.on_jump();
        }

        self.apply_horizontal(&intent, camera_yaw, dt);

        self.character.velocity = Vec3::new(
            self.horizontal_velocity.x,
            self.locomotion.state().vertical_velocity,
            self.horizontal_velocity.z,
        );
        self.character.update(physics, dt);

        event
    }

    /// Kill the player. Freezes movement and disables the body's collision response.
    pub fn kill(&mut self, physics: &mut PhysicsWorld) -> Option<TransitionEvent> {
        let event = self.locomotion.kill()?;

        self.horizontal_velocity = Vec3::ZERO;
        self.character.velocity = Vec3::ZERO;
        self.character.set_enabled(physics, false);
        self.feedback.on_transition(event, self.center_position());
        info!(character = %self.id, position = ?self.position(), "Player killed");

        Some(event)
    }

    /// Footstep animation event from the host animator
    pub fn on_footstep<R: Rng + ?Sized>(&mut self, clip_weight: f32, rng: &mut R) {
        let position = self.center_position();
        self.feedback
            .on_footstep_sample(clip_weight, &self.footstep_clips, position, rng);
    }

    /// Landing animation event from the host animator
    pub fn on_land(&mut self, clip_weight: f32) {
        let position = self.center_position();
        if let Some(clip) = &self.landing_clip {
            self.feedback.on_landing_sample(clip_weight, clip, position);
        }
    }

    /// Debug gizmo for the ground probe
    pub fn gizmo(&self) -> GizmoParams {
        gizmo_parameters(
            self.locomotion.state().grounded,
            self.character.position,
            self.locomotion.config(),
        )
    }

    /// Get the player's current position (feet)
    pub fn position(&self) -> Vec3 {
        self.character.position
    }

    /// Audio emitter position (capsule center)
    pub fn center_position(&self) -> Vec3 {
        self.character.center_position()
    }

    pub fn is_grounded(&self) -> bool {
        self.locomotion.state().grounded
    }

    pub fn is_dead(&self) -> bool {
        self.locomotion.state().dead
    }

    pub fn phase(&self) -> LocomotionPhase {
        self.locomotion.phase()
    }

    pub fn locomotion(&self) -> &LocomotionState {
        &self.locomotion
    }

    fn apply_horizontal(&mut self, intent: &MovementIntent, camera_yaw: f32, dt: f32) {
        let config = self.locomotion.config();

        // Forward is -Z before the camera rotation
        let mut move_dir = Vec3::new(intent.move_axis.x, 0.0, -intent.move_axis.y);
        if move_dir.length_squared() > 0.0 {
            move_dir = move_dir.normalize();
            let (sin_yaw, cos_yaw) = camera_yaw.sin_cos();
            move_dir = Vec3::new(
                move_dir.x * cos_yaw - move_dir.z * sin_yaw,
                0.0,
                move_dir.x * sin_yaw + move_dir.z * cos_yaw,
            );
        }

        let target = move_dir * config.max_speed(intent.sprint);
        self.horizontal_velocity =
            Self::move_towards_vec3(self.horizontal_velocity, target, config.acceleration * dt);
    }

    /// Move a vector towards a target by a maximum delta
    fn move_towards_vec3(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
        let diff = target - current;
        let distance = diff.length();

        if distance <= max_delta || distance == 0.0 {
            target
        } else {
            current + diff / distance * max_delta
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::tests::{Call, Recorder};
    use crate::feedback::AnimationFlag;
    use crate::input::InputHandler;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> PhysicsWorld {
        let mut physics = PhysicsWorld::new();
        physics.create_ground(0.0);
        physics
    }

    fn spawned(physics: &mut PhysicsWorld, height: f32, recorder: &Recorder) -> PlayerController {
        let mut player = PlayerController::new(LocomotionConfig::default(), recorder.emitter());
        player.spawn(physics, Vec3::new(0.0, height, 0.0));
        physics.update_queries();
        player
    }

    #[test]
    fn test_move_towards() {
        let result =
            PlayerController::move_towards_vec3(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 5.0);
        assert!((result.x - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_fall_then_land() {
        let mut physics = world();
        let recorder = Recorder::default();
        let mut player = spawned(&mut physics, 3.0, &recorder);
        let input = InputState::new();

        let mut events = Vec::new();
        for _ in 0..240 {
            if let Some(event) = player.fixed_update(&mut physics, &input, 0.0, DT) {
                events.push(event);
            }
        }

        assert_eq!(
            events,
            vec![TransitionEvent::EnteredAirborneLong, TransitionEvent::Landed]
        );
        assert!(player.is_grounded());
        assert!(player.position().y < 0.2);
        assert!(recorder
            .calls()
            .contains(&Call::Flag(AnimationFlag::FreeFall, false)));
    }

    #[test]
    fn test_kill_key_is_debounced() {
        let mut physics = world();
        let recorder = Recorder::default();
        let mut player = spawned(&mut physics, 0.05, &recorder);
        let mut input = InputHandler::new();

        input.press(InputAction::Kill);
        let first = player.fixed_update(&mut physics, &input.state, 0.0, DT);
        input.end_frame();
        input.release(InputAction::Kill);
        input.end_frame();
        input.press(InputAction::Kill);
        let second = player.fixed_update(&mut physics, &input.state, 0.0, DT);

        assert_eq!(first, Some(TransitionEvent::Died));
        assert_eq!(second, None);
        assert!(!player.character.is_enabled());
        let game_overs = recorder
            .calls()
            .iter()
            .filter(|c| **c == Call::GameOver)
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_dead_player_ignores_movement() {
        let mut physics = world();
        let recorder = Recorder::default();
        let mut player = spawned(&mut physics, 0.05, &recorder);
        player.kill(&mut physics);
        let frozen = player.position();

        let mut input = InputHandler::new();
        input.press(InputAction::MoveForward);
        input.press(InputAction::Sprint);
        for _ in 0..30 {
            player.fixed_update(&mut physics, &input.state, 0.0, DT);
        }

        assert_eq!(player.position(), frozen);
        assert_eq!(player.phase(), LocomotionPhase::Dead);
    }

    #[test]
    fn test_walk_forward_moves_along_negative_z() {
        let mut physics = world();
        let recorder = Recorder::default();
        let mut player = spawned(&mut physics, 0.05, &recorder);

        let mut input = InputHandler::new();
        input.press(InputAction::MoveForward);
        for _ in 0..60 {
            player.fixed_update(&mut physics, &input.state, 0.0, DT);
        }

        assert!(player.position().z < -1.0);
        assert!(player.position().x.abs() < 0.01);
        assert!(player.is_grounded());
    }

    #[test]
    fn test_jump_after_cooldown() {
        let mut physics = world();
        let recorder = Recorder::default();
        let mut player = spawned(&mut physics, 0.05, &recorder);
        let mut input = InputHandler::new();

        for _ in 0..40 {
            player.fixed_update(&mut physics, &input.state, 0.0, DT);
        }
        assert!(player.locomotion().jump_ready());

        input.press(InputAction::Jump);
        let mut apex: f32 = 0.0;
        for _ in 0..30 {
            player.fixed_update(&mut physics, &input.state, 0.0, DT);
            apex = apex.max(player.position().y);
        }

        assert!(apex > 0.5, "apex was {apex}");
        assert!(recorder.calls().contains(&Call::Flag(AnimationFlag::Jump, true)));
    }

    #[test]
    fn test_gizmo_tracks_probe() {
        let mut physics = world();
        let recorder = Recorder::default();
        let mut player = spawned(&mut physics, 5.0, &recorder);

        player.fixed_update(&mut physics, &InputState::new(), 0.0, DT);
        let gizmo = player.gizmo();
        assert_eq!(gizmo.color, crate::gizmo::AIRBORNE_COLOR);
        assert_eq!(gizmo.radius, 0.28);
        assert!((gizmo.position.y - (player.position().y + 0.14)).abs() < 1e-5);
    }

    #[test]
    fn test_missing_landing_clip_warns_once() {
        use std::io;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Captured {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let recorder = Recorder::default();
        tracing::subscriber::with_default(subscriber, || {
            let mut physics = world();
            let mut player = spawned(&mut physics, 0.05, &recorder)
                .with_clips(vec![AudioClip::from_path("audio/step.wav")], None);
            for _ in 0..3 {
                player.on_land(1.0);
            }
        });

        let log = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert_eq!(log.matches("No landing clip assigned").count(), 1);
        assert!(log.contains("WARN"));
        assert!(!recorder.calls().iter().any(|c| matches!(c, Call::Play(..))));
    }

    #[test]
    fn test_footstep_uses_configured_clips() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut physics = world();
        let recorder = Recorder::default();
        let mut player = spawned(&mut physics, 0.05, &recorder)
            .with_clips(vec![AudioClip::from_path("audio/step.wav")], None);

        player.on_footstep(0.9, &mut StdRng::seed_from_u64(3));
        player.on_land(0.9);

        let plays: Vec<_> = recorder
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Play(..)))
            .collect();
        assert_eq!(plays.len(), 1);
    }
}
