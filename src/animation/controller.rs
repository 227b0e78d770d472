//! Frame sequencing driven by a cooldown.
//!
//! The controller only tracks which frame of which sequence is showing.
//! Turning that into an image is the renderer's job.

use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{Cooldown, SimClock};
use crate::physics::Side;

/// Default time each frame stays on screen.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimKind {
    Idle,
    Run,
    Jump,
    Death,
    /// The single sequence of props like coins, plates and fireballs
    Spin,
}

impl AnimKind {
    pub fn name(self) -> &'static str {
        match self {
            AnimKind::Idle => "idle",
            AnimKind::Run => "run",
            AnimKind::Jump => "jump",
            AnimKind::Death => "death",
            AnimKind::Spin => "spin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Loop,
    /// Stop on the last frame
    Once,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequence {
    pub kind: AnimKind,
    pub side: Side,
    pub frames: usize,
    pub playback: Playback,
}

impl Sequence {
    pub fn looping(kind: AnimKind, side: Side, frames: usize) -> Self {
        Self {
            kind,
            side,
            frames: frames.max(1),
            playback: Playback::Loop,
        }
    }

    pub fn once(kind: AnimKind, side: Side, frames: usize) -> Self {
        Self {
            playback: Playback::Once,
            ..Self::looping(kind, side, frames)
        }
    }

    fn same_as(&self, other: &Sequence) -> bool {
        self.kind == other.kind && self.side == other.side
    }
}

/// Frame counts for each sequence an actor can play.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FrameCounts {
    pub idle: usize,
    pub run: usize,
    #[serde(default)]
    pub jump: usize,
    pub death: usize,
}

impl Default for FrameCounts {
    fn default() -> Self {
        Self {
            idle: 4,
            run: 6,
            jump: 0,
            death: 6,
        }
    }
}

impl FrameCounts {
    /// Build the sequence for `kind`. Death plays once, the rest loop.
    pub fn sequence(&self, kind: AnimKind, side: Side) -> Sequence {
        match kind {
            AnimKind::Idle => Sequence::looping(kind, side, self.idle),
            AnimKind::Run => Sequence::looping(kind, side, self.run),
            AnimKind::Jump => Sequence::looping(kind, side, self.jump.max(1)),
            AnimKind::Death => Sequence::once(kind, side, self.death),
            AnimKind::Spin => Sequence::looping(kind, side, self.idle),
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct AnimationController {
    current: Sequence,
    index: usize,
    timer: Cooldown,
}

impl AnimationController {
    pub fn new(sequence: Sequence) -> Self {
        Self::with_interval(sequence, FRAME_INTERVAL)
    }

    pub fn with_interval(sequence: Sequence, interval: Duration) -> Self {
        Self {
            current: sequence,
            index: 0,
            timer: Cooldown::new(interval),
        }
    }

    pub fn current(&self) -> &Sequence {
        &self.current
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Switch sequences. Re-assigning the active one keeps the current frame.
    pub fn set_animation(&mut self, sequence: Sequence) {
        if !self.current.same_as(&sequence) {
            self.current = sequence;
            self.index = 0;
        }
    }

    pub fn play(&mut self, counts: &FrameCounts, kind: AnimKind, side: Side) {
        self.set_animation(counts.sequence(kind, side));
    }

    /// Step one frame when the frame timer fires.
    pub fn advance(&mut self, now: Duration) -> bool {
        if !self.timer.check(now) {
            return false;
        }
        let last = self.current.frames - 1;
        if self.index < last {
            self.index += 1;
        } else if self.current.playback == Playback::Loop {
            self.index = 0;
        }
        true
    }

    /// A play-once sequence sitting on its final frame.
    pub fn is_finished(&self) -> bool {
        self.current.playback == Playback::Once && self.index + 1 >= self.current.frames
    }
}

pub fn advance_animations(clock: Res<SimClock>, mut query: Query<&mut AnimationController>) {
    for mut controller in query.iter_mut() {
        controller.advance(clock.now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn looping_sequence_wraps() {
        let mut controller =
            AnimationController::new(Sequence::looping(AnimKind::Run, Side::Right, 3));
        let mut seen = Vec::new();
        for step in 0..5 {
            controller.advance(ms(step * 100));
            seen.push(controller.index());
        }
        assert_eq!(seen, vec![1, 2, 0, 1, 2]);
    }

    #[test]
    fn reassigning_same_sequence_keeps_frame() {
        let counts = FrameCounts::default();
        let mut controller =
            AnimationController::new(counts.sequence(AnimKind::Run, Side::Left));
        controller.advance(ms(0));
        controller.advance(ms(100));
        assert_eq!(controller.index(), 2);

        controller.play(&counts, AnimKind::Run, Side::Left);
        assert_eq!(controller.index(), 2);

        controller.play(&counts, AnimKind::Run, Side::Right);
        assert_eq!(controller.index(), 0);
    }

    #[test]
    fn death_sequence_holds_last_frame() {
        let mut controller =
            AnimationController::new(Sequence::once(AnimKind::Death, Side::Right, 6));
        for step in 0..20 {
            controller.advance(ms(step * 100));
        }
        assert_eq!(controller.index(), 5);
        assert!(controller.is_finished());
    }

    #[test]
    fn frames_only_advance_when_timer_fires() {
        let mut controller =
            AnimationController::new(Sequence::looping(AnimKind::Idle, Side::Right, 4));
        assert!(controller.advance(ms(0)));
        assert!(!controller.advance(ms(50)));
        assert_eq!(controller.index(), 1);
    }
}
