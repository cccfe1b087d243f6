//! Parameter codec: the ordered `@key=value&...` mapping shared by the URL,
//! the widget mount element and the pickers.

pub mod codec;
pub mod types;

pub use codec::{clean, parse, serialize};
pub use types::{ALLOWED_KEYS, PREFIX_MARKER, ParamKey, ParameterSet};
