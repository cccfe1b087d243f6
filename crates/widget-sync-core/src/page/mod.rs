pub mod memory;
pub mod traits;

pub use memory::{MemoryHistory, MemoryPage, SharedHost};
pub use traits::{History, Page, Picker, WidgetHost};
