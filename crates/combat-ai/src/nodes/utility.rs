//! Timing, messaging and exit leaves.

use behavior_tree::{Behavior, Status};

use crate::context::Context;

/// Succeeds at most once every `cooldown` seconds, `Running` in between.
///
/// The first evaluation succeeds. With `reset_if_interrupted`, skipping a
/// frame restarts the wait from the next evaluation.
pub struct Wait {
    cooldown: f32,
    reset_if_interrupted: bool,
    last_completion: Option<f32>,
    last_frame: Option<u64>,
}

impl Wait {
    pub fn new(cooldown: f32, reset_if_interrupted: bool) -> Self {
        Self {
            cooldown,
            reset_if_interrupted,
            last_completion: None,
            last_frame: None,
        }
    }
}

impl Behavior<Context> for Wait {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        let now = ctx.elapsed_time();
        let frame = ctx.frame_id();

        let interrupted = self
            .last_frame
            .is_some_and(|last| frame > last.saturating_add(1));
        if interrupted && self.reset_if_interrupted && self.last_completion.is_some() {
            self.last_completion = Some(now);
        }
        self.last_frame = Some(frame);

        match self.last_completion {
            Some(completed) if now - completed < self.cooldown => Status::Running,
            _ => {
                self.last_completion = Some(now);
                Status::Success
            }
        }
    }
}

/// Queues a message once per node instance.
///
/// The text is localized when the tree is built.
pub struct ShowMessage {
    text: String,
    color: Option<String>,
    shown: bool,
}

impl ShowMessage {
    pub fn new(text: String, color: Option<String>) -> Self {
        Self {
            text,
            color,
            shown: false,
        }
    }
}

impl Behavior<Context> for ShowMessage {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        if !self.shown {
            self.shown = true;
            ctx.post_message(self.text.clone(), self.color.clone());
        }
        Status::Success
    }
}

/// Writes a debug log line. Always succeeds.
pub struct DebugLog {
    text: String,
}

impl DebugLog {
    pub fn new(text: String) -> Self {
        Self { text }
    }
}

impl Behavior<Context> for DebugLog {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        tracing::debug!("Ship {}: {}", ctx.ship_id(), self.text);
        Status::Success
    }
}

/// Orders the ship to leave the battle.
pub struct Vanish;

impl Behavior<Context> for Vanish {
    fn tick(&mut self, ctx: &mut Context) -> Status {
        ctx.controls_mut().vanish = true;
        Status::Success
    }
}
