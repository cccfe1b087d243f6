//! Event wiring: page events in, effects out.

pub mod dispatch;
pub mod effects;
pub mod events;
pub mod store;

pub use dispatch::WidgetController;
pub use effects::Effect;
pub use events::PageEvent;
pub use store::Dispatch;
