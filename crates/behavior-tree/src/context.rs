//! Context capabilities required by time- and chance-driven nodes.

use rand::RngCore;

/// Clock and random source exposed by an evaluation context.
///
/// Plain composites work with any context type. Nodes that re-roll or expire
/// on a timer ([`crate::RandomSelector`]) need the context to expose the
/// simulation clock and a random source owned by that context.
pub trait TickContext {
    /// Elapsed simulation time in seconds.
    fn time(&self) -> f32;

    /// Number of ticks since the context was created.
    fn frame_id(&self) -> u64;

    /// Random source for this context.
    fn rng(&mut self) -> &mut dyn RngCore;
}
