use serde::{Deserialize, Serialize};

/// Leading marker that distinguishes widget-bound parameters in query strings.
pub const PREFIX_MARKER: char = '@';

/// The recognized parameter names, in the order they are documented to hosts.
///
/// Keys are stored unprefixed and compared case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamKey {
    UserName,
    CongregationID,
    EventTypeID,
    ProgramID,
    Date,
    EventID,
}

pub const ALLOWED_KEYS: [ParamKey; 6] = [
    ParamKey::UserName,
    ParamKey::CongregationID,
    ParamKey::EventTypeID,
    ParamKey::ProgramID,
    ParamKey::Date,
    ParamKey::EventID,
];

impl ParamKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKey::UserName => "UserName",
            ParamKey::CongregationID => "CongregationID",
            ParamKey::EventTypeID => "EventTypeID",
            ParamKey::ProgramID => "ProgramID",
            ParamKey::Date => "Date",
            ParamKey::EventID => "EventID",
        }
    }

    /// The key as it appears in a query string, e.g. `@Date`.
    pub fn prefixed(&self) -> String {
        format!("{}{}", PREFIX_MARKER, self.as_str())
    }

    /// Look up an unprefixed key. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        ALLOWED_KEYS.into_iter().find(|key| key.as_str() == name)
    }

    /// Look up a key in its query-string form (`@Date`).
    pub fn from_prefixed(name: &str) -> Option<Self> {
        name.strip_prefix(PREFIX_MARKER).and_then(Self::from_name)
    }
}

impl std::fmt::Display for ParamKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered parameter mapping.
///
/// Insertion order is preserved; setting an existing key replaces the value
/// in place. Empty values may exist transiently (a malformed segment parses
/// to an empty value) until [`ParameterSet::clean`] removes them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSet {
    entries: Vec<(String, String)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_key(&self, key: ParamKey) -> Option<&str> {
        self.get(key.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn set_key(&mut self, key: ParamKey, value: impl Into<String>) {
        self.set(key.as_str(), value);
    }

    /// Remove a key, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Remove entries whose value is empty or whitespace-only.
    ///
    /// Idempotent; returns the same instance for chaining.
    pub fn clean(&mut self) -> &mut Self {
        self.entries.retain(|(_, v)| !v.trim().is_empty());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for (k, v) in iter {
            set.set(k, v);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_key_lookup_is_case_sensitive() {
        assert_eq!(ParamKey::from_name("Date"), Some(ParamKey::Date));
        assert_eq!(ParamKey::from_name("date"), None);
        assert_eq!(ParamKey::from_prefixed("@EventID"), Some(ParamKey::EventID));
        assert_eq!(ParamKey::from_prefixed("EventID"), None);
        assert_eq!(ParamKey::ProgramID.prefixed(), "@ProgramID");
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut set = ParameterSet::new();
        set.set("Date", "1/1/2024");
        set.set("EventID", "7");
        set.set("Date", "2/2/2024");

        let pairs: Vec<_> = set.iter().collect();
        assert_eq!(pairs, vec![("Date", "2/2/2024"), ("EventID", "7")]);
    }

    #[test]
    fn test_remove_returns_previous_value() {
        let mut set: ParameterSet = [("EventID", "9")].into_iter().collect();
        assert_eq!(set.remove("EventID"), Some("9".to_string()));
        assert_eq!(set.remove("EventID"), None);
        assert!(set.is_empty());
    }

    #[test]
    fn test_clean_drops_blank_values_and_is_idempotent() {
        let mut set: ParameterSet = [
            ("UserName", "ann"),
            ("Date", "   "),
            ("EventID", ""),
            ("ProgramID", "4"),
        ]
        .into_iter()
        .collect();

        set.clean();
        let once = set.clone();
        set.clean();

        assert_eq!(set, once);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("UserName"), Some("ann"));
        assert_eq!(set.get_key(ParamKey::ProgramID), Some("4"));
        assert!(!set.contains("Date"));
    }
}
