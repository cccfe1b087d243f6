use tracing::debug;

use crate::escape::param_value_escape;

use super::types::{PREFIX_MARKER, ParameterSet};

/// Parse a delimited parameter string such as `@Date=3/15/2024&@EventID=12`.
///
/// Segments are trimmed, doubled prefix markers collapse to one, and leading
/// markers are stripped from keys. Values are percent-decoded. A segment
/// without `=` keeps its key with an empty value; segments without a key are
/// dropped. Never fails.
pub fn parse(raw: &str) -> ParameterSet {
    let doubled = format!("{PREFIX_MARKER}{PREFIX_MARKER}");
    let collapsed = raw.replace(&doubled, &PREFIX_MARKER.to_string());

    let mut set = ParameterSet::new();
    for segment in collapsed.split('&').map(str::trim) {
        if segment.is_empty() {
            continue;
        }

        let unprefixed = segment.trim_start_matches(PREFIX_MARKER);
        let (key, value) = unprefixed.split_once('=').unwrap_or((unprefixed, ""));

        if key.is_empty() {
            debug!(event = "core.params.segment_dropped", segment = segment);
            continue;
        }

        let decoded = urlencoding::decode(value)
            .unwrap_or_else(|_| value.into())
            .into_owned();
        set.set(key, decoded);
    }

    set
}

/// Join non-empty entries as `key=value` (or `@key=value`) with `&`.
///
/// Values are escaped so that [`parse`] reads back exactly the same set.
pub fn serialize(set: &ParameterSet, with_prefix: bool) -> String {
    set.iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| {
            let value = param_value_escape(value);
            if with_prefix {
                format!("{PREFIX_MARKER}{key}={value}")
            } else {
                format!("{key}={value}")
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Free-function form of [`ParameterSet::clean`].
pub fn clean(set: &mut ParameterSet) -> &mut ParameterSet {
    set.clean()
}
