//! Randomized composite.
//!
//! [`RandomSelector`] picks one child at random and keeps ticking that child
//! until its cooldown expires. In [`RandomMode::Executor`] a running child is
//! additionally allowed to finish before the next roll.

use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, RngCore};

use crate::{Behavior, Node, Status, TickContext};

/// Re-roll discipline of a [`RandomSelector`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RandomMode {
    /// Re-roll whenever the cooldown has expired.
    #[default]
    Selector,
    /// Re-roll only after the cooldown has expired *and* the selected child
    /// returned a terminal result.
    Executor,
}

/// How the next child is drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RandomPolicy {
    /// Uniform over all children, with replacement.
    #[default]
    Uniform,
    /// Uniform over the children not yet picked in the current cycle. The
    /// cycle restarts once every child has been picked.
    NoRepeat,
    /// Proportional to per-child weights. Falls back to `Uniform` if the
    /// weights do not match the children or are all zero.
    Weighted(Vec<u32>),
}

/// Ticks one randomly selected child.
///
/// # Semantics
///
/// - A roll happens on the first tick and whenever `time - last_roll > cooldown`.
///   The comparison is strict, so repeated evaluations at the same simulation
///   time never re-roll, even with a zero cooldown.
/// - Only the selected child is ticked and its status is returned unchanged.
/// - In executor mode a child that last returned `Running` is never replaced.
pub struct RandomSelector<C> {
    children: Vec<Node<C>>,
    cooldown: f32,
    mode: RandomMode,
    policy: RandomPolicy,
    weights: Option<WeightedIndex<u32>>,
    picked: Vec<bool>,
    selected: Option<usize>,
    last_roll: f32,
    last_status: Status,
}

impl<C> RandomSelector<C> {
    /// Creates a new random selector.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(
        children: Vec<Node<C>>,
        cooldown: f32,
        mode: RandomMode,
        policy: RandomPolicy,
    ) -> Self {
        assert!(
            !children.is_empty(),
            "RandomSelector must have at least one child"
        );

        let weights = match &policy {
            RandomPolicy::Weighted(weights) if weights.len() == children.len() => {
                WeightedIndex::new(weights.iter().copied()).ok()
            }
            _ => None,
        };

        let count = children.len();
        Self {
            children,
            cooldown: cooldown.max(0.0),
            mode,
            policy,
            weights,
            picked: vec![false; count],
            selected: None,
            last_roll: 0.0,
            last_status: Status::Failure,
        }
    }

    /// Index of the currently selected child, if a roll has happened.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    fn reroll_due(&self, now: f32) -> bool {
        if self.mode == RandomMode::Executor && self.last_status.is_running() {
            return false;
        }
        now - self.last_roll > self.cooldown
    }

    fn roll(&mut self, rng: &mut dyn RngCore) -> usize {
        let count = self.children.len();
        match (&self.policy, &self.weights) {
            (RandomPolicy::Weighted(_), Some(weights)) => weights.sample(rng),
            (RandomPolicy::NoRepeat, _) => {
                if self.picked.iter().all(|picked| *picked) {
                    self.picked.iter_mut().for_each(|picked| *picked = false);
                }
                let remaining = self.picked.iter().filter(|picked| !**picked).count();
                let nth = rng.gen_range(0..remaining);
                let index = self
                    .picked
                    .iter()
                    .enumerate()
                    .filter(|(_, picked)| !**picked)
                    .map(|(index, _)| index)
                    .nth(nth)
                    .unwrap_or(0);
                self.picked[index] = true;
                index
            }
            _ => rng.gen_range(0..count),
        }
    }
}

impl<C: TickContext> Behavior<C> for RandomSelector<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        let now = ctx.time();
        let index = match self.selected {
            Some(index) if !self.reroll_due(now) => index,
            _ => {
                let index = self.roll(ctx.rng());
                self.selected = Some(index);
                self.last_roll = now;
                index
            }
        };

        let status = self.children[index].tick(ctx);
        self.last_status = status;
        status
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    struct TestContext {
        time: f32,
        frame: u64,
        rng: ChaCha8Rng,
        ticks: Vec<usize>,
    }

    impl TestContext {
        fn new(seed: u64) -> Self {
            Self {
                time: 0.0,
                frame: 0,
                rng: ChaCha8Rng::seed_from_u64(seed),
                ticks: Vec::new(),
            }
        }

        fn advance(&mut self, dt: f32) {
            self.time += dt;
            self.frame += 1;
        }
    }

    impl TickContext for TestContext {
        fn time(&self) -> f32 {
            self.time
        }

        fn frame_id(&self) -> u64 {
            self.frame
        }

        fn rng(&mut self) -> &mut dyn RngCore {
            &mut self.rng
        }
    }

    /// Records its index and returns a fixed status.
    struct Probe(usize, Status);
    impl Behavior<TestContext> for Probe {
        fn tick(&mut self, ctx: &mut TestContext) -> Status {
            ctx.ticks.push(self.0);
            self.1
        }
    }

    fn probes(statuses: &[Status]) -> Vec<Node<TestContext>> {
        statuses
            .iter()
            .enumerate()
            .map(|(index, status)| Box::new(Probe(index, *status)) as Node<TestContext>)
            .collect()
    }

    #[test]
    fn keeps_selection_within_same_tick() {
        let mut node = RandomSelector::new(
            probes(&[Status::Success, Status::Failure]),
            0.0,
            RandomMode::Selector,
            RandomPolicy::Uniform,
        );
        let mut ctx = TestContext::new(7);

        let first = node.tick(&mut ctx);
        let selected = node.selected();
        for _ in 0..20 {
            assert_eq!(node.tick(&mut ctx), first);
            assert_eq!(node.selected(), selected);
        }
        assert!(ctx.ticks.iter().all(|index| Some(*index) == selected));
    }

    #[test]
    fn rerolls_after_cooldown() {
        let mut node = RandomSelector::new(
            probes(&[Status::Success, Status::Failure]),
            0.0,
            RandomMode::Selector,
            RandomPolicy::Uniform,
        );
        let mut ctx = TestContext::new(3);

        let mut seen = [false; 2];
        for _ in 0..64 {
            node.tick(&mut ctx);
            if let Some(index) = node.selected() {
                seen[index] = true;
            }
            ctx.advance(0.1);
        }
        assert!(seen[0] && seen[1], "both children should be rolled eventually");
    }

    #[test]
    fn executor_waits_for_running_child() {
        let mut node = RandomSelector::new(
            probes(&[Status::Running, Status::Running]),
            0.0,
            RandomMode::Executor,
            RandomPolicy::Uniform,
        );
        let mut ctx = TestContext::new(11);

        node.tick(&mut ctx);
        let selected = node.selected();
        for _ in 0..32 {
            ctx.advance(1.0);
            assert_eq!(node.tick(&mut ctx), Status::Running);
            assert_eq!(node.selected(), selected);
        }
    }

    #[test]
    fn no_repeat_cycles_through_every_child() {
        let mut node = RandomSelector::new(
            probes(&[Status::Success, Status::Success, Status::Success]),
            0.0,
            RandomMode::Selector,
            RandomPolicy::NoRepeat,
        );
        let mut ctx = TestContext::new(5);

        for _ in 0..3 {
            node.tick(&mut ctx);
            ctx.advance(1.0);
        }
        let mut first_cycle = ctx.ticks.clone();
        first_cycle.sort_unstable();
        assert_eq!(first_cycle, vec![0, 1, 2]);
    }

    #[test]
    fn weighted_never_picks_zero_weight() {
        let mut node = RandomSelector::new(
            probes(&[Status::Success, Status::Failure]),
            0.0,
            RandomMode::Selector,
            RandomPolicy::Weighted(vec![0, 1]),
        );
        let mut ctx = TestContext::new(9);

        for _ in 0..32 {
            assert_eq!(node.tick(&mut ctx), Status::Failure);
            ctx.advance(1.0);
        }
    }
}
