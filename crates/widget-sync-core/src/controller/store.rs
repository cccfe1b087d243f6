use super::effects::Effect;
use super::events::PageEvent;

/// Trait for feeding page events into a controller.
///
/// # Semantics
///
/// - **Ordering**: Events are handled in the order received, each to
///   completion before the next. There is no interleaving.
/// - **Errors**: None. Missing elements, malformed input and an absent host
///   degrade to no-ops; the returned effects show what actually happened.
/// - **Effects**: Ordered chronologically. Callers mirror timer and hook
///   effects and may ignore the rest.
pub trait Dispatch {
    fn dispatch(&mut self, event: PageEvent) -> Vec<Effect>;
}
