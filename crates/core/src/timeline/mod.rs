//! Playback timing and the instruction-driven state machine.
//!
//! The engine is pull-based: nothing happens between calls. Callers drive it
//! with [`PlaybackEngine::update`] at whatever cadence suits them and the
//! engine recomputes elapsed time from its [`Clock`] on every call.

mod clock;
mod shared;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::{
    color::resolve_color, config::PlaybackConfig, GroupInstruction, GroupState,
    LightingInstruction, Result, Rgb, SceneState, TransitionType,
};

pub use clock::{Clock, ManualClock, SystemClock};
pub use shared::SharedEngine;

const EVENT_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Clock bookkeeping for one session.
///
/// While playing, elapsed time is `now - start_reference`. While paused or
/// stopped, `elapsed` holds the frozen value.
#[derive(Debug, Default, Clone)]
pub struct PlaybackClock {
    pub state: PlaybackState,
    pub start_reference: f64,
    pub elapsed: f64,
    pub total_duration: f64,
}

impl PlaybackClock {
    pub fn reset(&mut self) {
        self.state = PlaybackState::Stopped;
        self.start_reference = 0.0;
        self.elapsed = 0.0;
    }

    pub fn status(&self) -> PlaybackStatus {
        let progress = if self.total_duration > 0.0 {
            self.elapsed / self.total_duration
        } else {
            0.0
        };

        PlaybackStatus {
            is_playing: self.state != PlaybackState::Stopped,
            is_paused: self.state == PlaybackState::Paused,
            elapsed_time: self.elapsed,
            total_duration: self.total_duration,
            progress,
        }
    }
}

/// Snapshot of the transport, polled by control surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub is_playing: bool,
    pub is_paused: bool,
    pub elapsed_time: f64,
    pub total_duration: f64,
    pub progress: f64,
}

/// Notifications published by the engine on every transport change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlaybackEvent {
    Loaded { instructions: usize, total_duration: f64 },
    Play { elapsed: f64 },
    Resume { elapsed: f64 },
    Pause { elapsed: f64 },
    Stop,
    Seek { elapsed: f64 },
    Complete { total_duration: f64 },
}

/// State of a group captured when a fade first started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionOrigin {
    pub intensity: f32,
    pub color: Rgb,
}

impl TransitionOrigin {
    fn capture(state: Option<&GroupState>) -> Self {
        match state {
            Some(state) => Self {
                intensity: state.intensity,
                color: state.color,
            },
            None => Self {
                intensity: 0.0,
                color: Rgb::OFF,
            },
        }
    }
}

type OriginKey = (String, String);

/// Plays a loaded instruction set against a [`SceneState`].
///
/// The engine is the only writer of its scene state. Share it across tasks
/// through [`SharedEngine`].
#[derive(Debug)]
pub struct PlaybackEngine<C: Clock = SystemClock> {
    clock: C,
    playback: PlaybackClock,
    instructions: Vec<LightingInstruction>,
    scene: SceneState,
    origins: HashMap<OriginKey, TransitionOrigin>,
    fade_transitions: Vec<TransitionType>,
    events: broadcast::Sender<PlaybackEvent>,
}

impl PlaybackEngine<SystemClock> {
    /// Creates an engine driven by the system monotonic clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for PlaybackEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> PlaybackEngine<C> {
    pub fn with_clock(clock: C) -> Self {
        Self::with_config(clock, &PlaybackConfig::default())
    }

    pub fn with_config(clock: C, config: &PlaybackConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            clock,
            playback: PlaybackClock::default(),
            instructions: Vec::new(),
            scene: SceneState::new(),
            origins: HashMap::new(),
            fade_transitions: config.fade_transitions.clone(),
            events,
        }
    }

    /// Subscribes to transport events. Dropping the receiver is always safe.
    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    /// Replaces the instruction set and returns to the stopped state.
    ///
    /// Every instruction is checked before anything changes, so a rejected
    /// load leaves the previous set in place.
    pub fn load(&mut self, mut instructions: Vec<LightingInstruction>) -> Result<()> {
        for instruction in &instructions {
            instruction.validate()?;
        }

        instructions.sort_by(|a, b| a.time_window.start.total_cmp(&b.time_window.start));
        let total_duration = instructions
            .iter()
            .map(|instruction| instruction.time_window.end)
            .fold(0.0, f64::max);

        self.instructions = instructions;
        self.playback.reset();
        self.playback.total_duration = total_duration;
        self.scene.reset();
        self.origins.clear();

        tracing::info!(
            instructions = self.instructions.len(),
            total_duration,
            "loaded instruction set"
        );
        self.publish(PlaybackEvent::Loaded {
            instructions: self.instructions.len(),
            total_duration,
        });
        Ok(())
    }

    /// Starts from the top when stopped, or resumes when paused.
    pub fn play(&mut self) {
        let now = self.clock.now();

        match self.playback.state {
            PlaybackState::Stopped => {
                self.playback.elapsed = 0.0;
                self.playback.start_reference = now;
                self.playback.state = PlaybackState::Playing;
                self.scene.reset();
                self.origins.clear();

                tracing::info!("playback started");
                self.publish(PlaybackEvent::Play { elapsed: 0.0 });
            }
            PlaybackState::Paused => {
                self.playback.start_reference = now - self.playback.elapsed;
                self.playback.state = PlaybackState::Playing;

                tracing::info!(elapsed = self.playback.elapsed, "playback resumed");
                self.publish(PlaybackEvent::Resume {
                    elapsed: self.playback.elapsed,
                });
            }
            PlaybackState::Playing => {
                tracing::debug!("play requested while already playing");
            }
        }
    }

    /// Freezes elapsed time. Ignored unless playing.
    pub fn pause(&mut self) {
        if self.playback.state != PlaybackState::Playing {
            return;
        }

        self.playback.elapsed = self.clock.now() - self.playback.start_reference;
        self.playback.state = PlaybackState::Paused;

        tracing::info!(elapsed = self.playback.elapsed, "playback paused");
        self.publish(PlaybackEvent::Pause {
            elapsed: self.playback.elapsed,
        });
    }

    /// Returns to the top and blacks out every known group.
    pub fn stop(&mut self) {
        self.playback.reset();
        self.scene.reset();
        self.origins.clear();

        tracing::info!("playback stopped");
        self.publish(PlaybackEvent::Stop);
    }

    /// Jumps to `time_seconds`, clamped into `[0, total_duration]`, and
    /// renders that instant straight away.
    pub fn seek(&mut self, time_seconds: f64) -> PlaybackStatus {
        let target = if time_seconds.is_nan() {
            0.0
        } else {
            time_seconds.clamp(0.0, self.playback.total_duration)
        };

        self.playback.elapsed = target;
        if self.playback.state == PlaybackState::Playing {
            self.playback.start_reference = self.clock.now() - target;
        }

        // No history before an arbitrary jump point to interpolate from.
        self.origins.clear();
        self.apply_state_at(target);

        tracing::info!(requested = time_seconds, elapsed = target, "seek");
        self.publish(PlaybackEvent::Seek { elapsed: target });
        self.status()
    }

    /// Advances playback from the clock and renders the current instant.
    ///
    /// Outside of the playing state this only reports status.
    pub fn update(&mut self) -> PlaybackStatus {
        if self.playback.state != PlaybackState::Playing {
            return self.status();
        }

        let elapsed = self.clock.now() - self.playback.start_reference;
        self.playback.elapsed = elapsed;

        if elapsed >= self.playback.total_duration {
            let total_duration = self.playback.total_duration;
            tracing::info!(total_duration, "playback complete");
            self.publish(PlaybackEvent::Complete { total_duration });
            self.stop();
            return self.status();
        }

        self.apply_state_at(elapsed);
        self.status()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.playback.status()
    }

    pub fn state(&self) -> PlaybackState {
        self.playback.state
    }

    pub fn total_duration(&self) -> f64 {
        self.playback.total_duration
    }

    /// Loaded instructions, sorted by start time.
    pub fn instructions(&self) -> &[LightingInstruction] {
        &self.instructions
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn snapshot(&self) -> Vec<GroupState> {
        self.scene.snapshot()
    }

    /// Interpolation origin captured for a group within a scene, if a fade
    /// has started since the last stop or seek.
    pub fn transition_origin(&self, scene_id: &str, group_id: &str) -> Option<TransitionOrigin> {
        self.origins
            .get(&(scene_id.to_string(), group_id.to_string()))
            .copied()
    }

    /// Writes the state for time `t` into the scene. Instructions are visited
    /// in load order, so the last active instruction for a group wins.
    fn apply_state_at(&mut self, t: f64) {
        for instruction in &self.instructions {
            if !instruction.is_active_at(t) {
                continue;
            }

            for group in &instruction.groups {
                let params = &group.parameters;
                let target = unit_target(params.intensity);
                let color = params.color.as_deref().map(resolve_color);

                let intensity =
                    match fade_progress(&self.fade_transitions, instruction, group, t) {
                        Some(alpha) => {
                            let key = (instruction.scene_id.clone(), group.group_id.clone());
                            let origin = match self.origins.get(&key) {
                                Some(origin) => *origin,
                                None => {
                                    let origin =
                                        TransitionOrigin::capture(self.scene.get(&group.group_id));
                                    self.origins.insert(key, origin);
                                    origin
                                }
                            };
                            origin.intensity + (target - origin.intensity) * alpha
                        }
                        None => target,
                    };

                // Colour snaps to the target even mid-fade.
                self.scene.update_group(
                    &group.group_id,
                    Some(intensity),
                    color,
                    params.focus_area.as_deref(),
                );
            }
        }
    }

    fn publish(&self, event: PlaybackEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

/// Percent intensity as a 0-1 target. NaN maps to zero.
fn unit_target(percent: f32) -> f32 {
    if percent.is_nan() {
        0.0
    } else {
        (percent / 100.0).clamp(0.0, 1.0)
    }
}

/// Fraction of the way through a fade at time `t`, or `None` when the group
/// should take its target value directly.
fn fade_progress(
    fade_transitions: &[TransitionType],
    instruction: &LightingInstruction,
    group: &GroupInstruction,
    t: f64,
) -> Option<f32> {
    let transition = group.transition.as_ref()?;
    if !fade_transitions.contains(&transition.kind) {
        return None;
    }

    let duration = transition.duration_seconds;
    let into = t - instruction.time_window.start;
    if duration > 0.0 && into < duration {
        Some((into / duration).clamp(0.0, 1.0) as f32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{GroupInstruction, Transition};

    fn engine() -> (PlaybackEngine<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (PlaybackEngine::with_clock(clock.clone()), clock)
    }

    fn intensity(engine: &PlaybackEngine<ManualClock>, group: &str) -> f32 {
        engine.scene().get(group).map(|s| s.intensity).unwrap_or(0.0)
    }

    fn show() -> Vec<LightingInstruction> {
        vec![
            LightingInstruction::new("s1", 0.0, 5.0)
                .with_group(GroupInstruction::new("front_wash", 100.0, "white")),
            LightingInstruction::new("s2", 5.0, 10.0).with_group(
                GroupInstruction::new("front_wash", 0.0, "off")
                    .with_transition(Transition::fade(3.0)),
            ),
        ]
    }

    #[test]
    fn total_duration_is_max_end() {
        let (mut engine, _) = engine();
        engine
            .load(vec![
                LightingInstruction::new("late", 4.0, 12.5),
                LightingInstruction::new("long", 0.0, 8.0),
            ])
            .unwrap();
        assert_eq!(engine.total_duration(), 12.5);

        engine.load(Vec::new()).unwrap();
        assert_eq!(engine.total_duration(), 0.0);
    }

    #[test]
    fn rejected_load_keeps_previous_set() {
        let (mut engine, _) = engine();
        engine.load(show()).unwrap();

        let err = engine
            .load(vec![LightingInstruction::new("broken", 3.0, 1.0)])
            .unwrap_err();
        assert!(format!("{err}").contains("broken"));
        assert_eq!(engine.instructions().len(), 2);
        assert_eq!(engine.total_duration(), 10.0);
    }

    #[test]
    fn instructions_are_sorted_by_start() {
        let (mut engine, _) = engine();
        engine
            .load(vec![
                LightingInstruction::new("b", 5.0, 6.0),
                LightingInstruction::new("a", 0.0, 1.0),
            ])
            .unwrap();
        let ids: Vec<_> = engine.instructions().iter().map(|i| i.scene_id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn play_pause_resume_tracks_elapsed_time() {
        let (mut engine, clock) = engine();
        engine.load(show()).unwrap();
        clock.set(100.0);

        engine.play();
        clock.advance(2.0);
        let status = engine.update();
        assert!(status.is_playing);
        assert_abs_diff_eq!(status.elapsed_time, 2.0);

        engine.pause();
        clock.advance(30.0);
        let status = engine.update();
        assert!(status.is_paused);
        assert_abs_diff_eq!(status.elapsed_time, 2.0);

        engine.play();
        clock.advance(1.0);
        let status = engine.update();
        assert!(!status.is_paused);
        assert_abs_diff_eq!(status.elapsed_time, 3.0);
        assert_abs_diff_eq!(status.progress, 0.3);
    }

    #[test]
    fn pause_is_ignored_unless_playing() {
        let (mut engine, _) = engine();
        engine.load(show()).unwrap();
        engine.pause();
        assert_eq!(engine.state(), PlaybackState::Stopped);
    }

    #[test]
    fn reaching_the_end_stops_without_looping() {
        let (mut engine, clock) = engine();
        engine.load(show()).unwrap();
        engine.play();

        clock.advance(4.0);
        engine.update();
        assert_abs_diff_eq!(intensity(&engine, "front_wash"), 1.0);

        clock.advance(6.0);
        let status = engine.update();
        assert!(!status.is_playing);
        assert_eq!(status.elapsed_time, 0.0);
        assert_eq!(engine.state(), PlaybackState::Stopped);
        assert_eq!(intensity(&engine, "front_wash"), 0.0);
    }

    #[test]
    fn seek_is_clamped_into_the_show() {
        let (mut engine, _) = engine();
        engine.load(show()).unwrap();

        assert_eq!(engine.seek(-4.0).elapsed_time, 0.0);
        assert_eq!(engine.seek(99.0).elapsed_time, 10.0);
        assert_eq!(engine.seek(f64::NAN).elapsed_time, 0.0);
        assert_eq!(engine.seek(7.5).elapsed_time, 7.5);
    }

    #[test]
    fn seek_renders_immediately_and_reanchors_the_clock() {
        let (mut engine, clock) = engine();
        engine
            .load(vec![LightingInstruction::new("s1", 0.0, 20.0)
                .with_group(GroupInstruction::new("center_spot", 60.0, "red"))])
            .unwrap();
        engine.play();
        clock.advance(1.0);

        engine.seek(12.0);
        assert_abs_diff_eq!(intensity(&engine, "center_spot"), 0.6);
        assert_eq!(
            engine.scene().get("center_spot").unwrap().color,
            Rgb::new(255, 0, 0)
        );

        clock.advance(2.0);
        assert_abs_diff_eq!(engine.update().elapsed_time, 14.0);
    }

    #[test]
    fn seek_clears_transition_memory() {
        let (mut engine, clock) = engine();
        engine.load(show()).unwrap();
        engine.play();
        clock.advance(1.0);
        engine.update();
        clock.advance(5.0);
        engine.update();
        assert!(engine.transition_origin("s2", "front_wash").is_some());

        engine.seek(2.0);
        assert!(engine.transition_origin("s2", "front_wash").is_none());
    }

    #[test]
    fn stop_blacks_out_without_forgetting_groups() {
        let (mut engine, clock) = engine();
        engine
            .load(vec![LightingInstruction::new("s1", 0.0, 10.0)
                .with_group(GroupInstruction::new("front_wash", 80.0, "amber"))
                .with_group(GroupInstruction::new("back_light", 40.0, "blue"))])
            .unwrap();
        engine.play();
        clock.advance(1.0);
        engine.update();
        assert!(intensity(&engine, "back_light") > 0.0);

        engine.stop();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.len(), 2);
        for state in snapshot {
            assert_eq!(state.intensity, 0.0);
            assert_eq!(state.color, Rgb::OFF);
        }
    }

    #[test]
    fn fade_interpolates_intensity_from_captured_origin() {
        let (mut engine, clock) = engine();
        engine
            .load(vec![
                LightingInstruction::new("base", 0.0, 4.0)
                    .with_group(GroupInstruction::new("side_fill", 20.0, "blue")),
                LightingInstruction::new("rise", 4.0, 10.0).with_group(
                    GroupInstruction::new("side_fill", 80.0, "red")
                        .with_transition(Transition::fade(2.0)),
                ),
            ])
            .unwrap();
        engine.play();

        clock.set(1.0);
        engine.update();
        assert_abs_diff_eq!(intensity(&engine, "side_fill"), 0.2, epsilon = 1e-6);

        clock.set(4.0);
        engine.update();
        assert_abs_diff_eq!(intensity(&engine, "side_fill"), 0.2, epsilon = 1e-6);

        clock.set(5.0);
        engine.update();
        assert_abs_diff_eq!(intensity(&engine, "side_fill"), 0.5, epsilon = 1e-6);
        // Colour snaps rather than blending.
        assert_eq!(
            engine.scene().get("side_fill").unwrap().color,
            Rgb::new(255, 0, 0)
        );

        clock.set(6.0);
        engine.update();
        assert_eq!(intensity(&engine, "side_fill"), 0.8);

        clock.set(8.5);
        engine.update();
        assert_eq!(intensity(&engine, "side_fill"), 0.8);
    }

    #[test]
    fn out_of_range_targets_are_clamped_before_fading() {
        let (mut engine, clock) = engine();
        engine
            .load(vec![
                LightingInstruction::new("base", 0.0, 4.0)
                    .with_group(GroupInstruction::new("specials", 100.0, "white")),
                LightingInstruction::new("swell", 0.0, 10.0).with_group(
                    GroupInstruction::new("front_wash", 150.0, "white")
                        .with_transition(Transition::fade(2.0)),
                ),
                LightingInstruction::new("sink", 4.0, 10.0).with_group(
                    GroupInstruction::new("specials", -50.0, "white")
                        .with_transition(Transition::fade(2.0)),
                ),
            ])
            .unwrap();
        engine.play();

        clock.set(1.0);
        engine.update();
        assert_abs_diff_eq!(intensity(&engine, "front_wash"), 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(intensity(&engine, "specials"), 1.0, epsilon = 1e-6);

        clock.set(5.0);
        engine.update();
        assert_eq!(intensity(&engine, "front_wash"), 1.0);
        assert_abs_diff_eq!(intensity(&engine, "specials"), 0.5, epsilon = 1e-6);

        clock.set(7.0);
        engine.update();
        assert_eq!(intensity(&engine, "specials"), 0.0);
    }

    #[test]
    fn fade_from_unknown_group_starts_dark() {
        let (mut engine, clock) = engine();
        engine
            .load(vec![LightingInstruction::new("s1", 0.0, 10.0).with_group(
                GroupInstruction::new("ambient", 100.0, "cyan")
                    .with_transition(Transition::fade(4.0)),
            )])
            .unwrap();
        engine.play();
        clock.set(1.0);
        engine.update();

        assert_abs_diff_eq!(intensity(&engine, "ambient"), 0.25, epsilon = 1e-6);
        let origin = engine.transition_origin("s1", "ambient").unwrap();
        assert_eq!(origin.intensity, 0.0);
        assert_eq!(origin.color, Rgb::OFF);
    }

    #[test]
    fn non_fade_transitions_apply_immediately() {
        let (mut engine, clock) = engine();
        engine
            .load(vec![LightingInstruction::new("s1", 0.0, 10.0)
                .with_group(
                    GroupInstruction::new("specials", 70.0, "white")
                        .with_transition(Transition::new(TransitionType::Strobe, 5.0)),
                )
                .with_group(
                    GroupInstruction::new("ambient", 30.0, "white")
                        .with_transition(Transition::fade(0.0)),
                )])
            .unwrap();
        engine.play();
        clock.set(0.5);
        engine.update();

        assert_abs_diff_eq!(intensity(&engine, "specials"), 0.7, epsilon = 1e-6);
        assert_abs_diff_eq!(intensity(&engine, "ambient"), 0.3, epsilon = 1e-6);
    }

    #[test]
    fn configured_fade_types_are_honoured() {
        let clock = ManualClock::new();
        let config = PlaybackConfig {
            fade_transitions: vec![TransitionType::Smooth],
        };
        let mut engine = PlaybackEngine::with_config(clock.clone(), &config);
        engine
            .load(vec![LightingInstruction::new("s1", 0.0, 10.0).with_group(
                GroupInstruction::new("ambient", 100.0, "white")
                    .with_transition(Transition::new(TransitionType::Smooth, 2.0)),
            )])
            .unwrap();
        engine.play();
        clock.set(1.0);
        engine.update();

        assert_abs_diff_eq!(intensity(&engine, "ambient"), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn later_instruction_wins_on_overlap() {
        let (mut engine, _) = engine();
        engine
            .load(vec![
                LightingInstruction::new("a", 0.0, 10.0)
                    .with_group(GroupInstruction::new("front_wash", 20.0, "white")),
                LightingInstruction::new("b", 5.0, 15.0)
                    .with_group(GroupInstruction::new("front_wash", 90.0, "white")),
            ])
            .unwrap();

        engine.seek(7.0);
        assert_abs_diff_eq!(intensity(&engine, "front_wash"), 0.9, epsilon = 1e-6);

        engine.seek(3.0);
        assert_abs_diff_eq!(intensity(&engine, "front_wash"), 0.2, epsilon = 1e-6);
    }

    #[test]
    fn scripted_fade_out_between_scenes() {
        let (mut engine, clock) = engine();
        engine.load(show()).unwrap();
        engine.play();

        for t in [0.0, 1.0, 2.5, 4.9] {
            clock.set(t);
            engine.update();
        }
        assert_abs_diff_eq!(intensity(&engine, "front_wash"), 1.0);

        clock.set(6.0);
        engine.update();
        let at_six = intensity(&engine, "front_wash");
        assert!(at_six < 1.0 && at_six > 0.0);
        assert_abs_diff_eq!(at_six, 2.0 / 3.0, epsilon = 1e-4);

        clock.set(7.0);
        engine.update();
        assert_abs_diff_eq!(intensity(&engine, "front_wash"), 1.0 / 3.0, epsilon = 1e-4);

        clock.set(9.0);
        engine.update();
        assert_eq!(intensity(&engine, "front_wash"), 0.0);
        assert_eq!(engine.scene().get("front_wash").unwrap().color, Rgb::OFF);
    }

    #[test]
    fn publishes_transport_events() {
        let (mut engine, clock) = engine();
        let mut events = engine.subscribe();
        engine.load(show()).unwrap();
        engine.play();
        clock.advance(1.0);
        engine.pause();
        engine.play();
        engine.seek(3.0);
        clock.advance(20.0);
        engine.update();

        let received: Vec<_> = std::iter::from_fn(|| events.try_recv().ok()).collect();
        assert_eq!(
            received,
            vec![
                PlaybackEvent::Loaded {
                    instructions: 2,
                    total_duration: 10.0
                },
                PlaybackEvent::Play { elapsed: 0.0 },
                PlaybackEvent::Pause { elapsed: 1.0 },
                PlaybackEvent::Resume { elapsed: 1.0 },
                PlaybackEvent::Seek { elapsed: 3.0 },
                PlaybackEvent::Complete {
                    total_duration: 10.0
                },
                PlaybackEvent::Stop,
            ]
        );
    }

    #[test]
    fn update_is_a_pure_read_when_not_playing() {
        let (mut engine, clock) = engine();
        engine.load(show()).unwrap();
        engine.seek(2.0);
        let before = engine.snapshot();

        clock.advance(50.0);
        let status = engine.update();
        assert_eq!(status.elapsed_time, 2.0);
        assert_eq!(engine.snapshot(), before);
    }
}
