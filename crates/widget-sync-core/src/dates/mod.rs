//! Calendar-day matching and the two date string formats in play:
//! parameters use `M/D/YYYY`, the date picker uses `YYYY-MM-DD`.

pub mod clock;
pub mod matcher;

pub use clock::{Clock, FixedClock, LocalClock};
pub use matcher::{format_param_date, is_today, to_param_format, to_picker_format};
