//! Address-bar synchronization.
//!
//! The query string carries the allow-listed parameters in prefixed form
//! (`?@Date=3/15/2024&@EventID=12`). Unrelated query pairs are left alone.

use tracing::debug;
use url::Url;

use crate::page::History;
use crate::params::{ParamKey, ParameterSet};

/// Read the allow-listed, non-empty parameters from a page URL.
///
/// Unknown keys and blank values are dropped. A repeated key keeps its first
/// position and its last value.
pub fn params_from_url(url: &Url) -> ParameterSet {
    let mut params = ParameterSet::new();
    for (name, value) in url.query_pairs() {
        let Some(key) = ParamKey::from_prefixed(&name) else {
            continue;
        };
        if value.trim().is_empty() {
            continue;
        }
        params.set_key(key, value.into_owned());
    }
    params
}

/// Return `url` with every allow-listed key replaced by the values in `params`.
pub fn rewrite_url(url: &Url, params: &ParameterSet) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| ParamKey::from_prefixed(name).is_none())
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    let mut next = url.clone();
    next.set_query(None);
    {
        let mut query = next.query_pairs_mut();
        query.extend_pairs(kept);
        for (name, value) in params.iter() {
            let Some(key) = ParamKey::from_name(name) else {
                continue;
            };
            if value.trim().is_empty() {
                continue;
            }
            query.append_pair(&key.prefixed(), value);
        }
    }

    if next.query() == Some("") {
        next.set_query(None);
    }
    next
}

/// Reflect `params` into the address bar via a non-navigating replace.
pub fn sync(params: &ParameterSet, history: &mut impl History) -> Url {
    let current = history.current_url();
    let next = rewrite_url(&current, params);

    debug!(
        event = "core.url_sync.replaced",
        from = %current,
        to = %next
    );

    history.replace_url(next.clone());
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MemoryHistory;

    fn url(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    fn decoded_pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_params_from_url_keeps_allow_listed_non_empty() {
        let page = url(
            "https://example.org/p?@Date=3/15/2024&@EventID=&other=1&@Unknown=x&Date=9/9/2024",
        );
        let params = params_from_url(&page);
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("Date", "3/15/2024")]);
    }

    #[test]
    fn test_params_from_url_decodes_values() {
        let page = url("https://example.org/p?%40UserName=ann%20lee&%40Date=3%2F15%2F2024");
        let params = params_from_url(&page);
        assert_eq!(params.get("UserName"), Some("ann lee"));
        assert_eq!(params.get("Date"), Some("3/15/2024"));
    }

    #[test]
    fn test_params_from_url_duplicate_keeps_last_value() {
        let page = url("https://example.org/p?@EventID=1&@Date=1/1/2024&@EventID=2");
        let params = params_from_url(&page);
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("EventID", "2"), ("Date", "1/1/2024")]);
    }

    #[test]
    fn test_rewrite_replaces_allow_listed_and_keeps_others() {
        let page = url("https://example.org/p?utm=mail&@Date=1/1/2024&@EventID=4#top");
        let params: ParameterSet = [("Date", "3/15/2024")].into_iter().collect();

        let next = rewrite_url(&page, &params);

        assert_eq!(
            decoded_pairs(&next),
            vec![
                ("utm".to_string(), "mail".to_string()),
                ("@Date".to_string(), "3/15/2024".to_string()),
            ]
        );
        assert_eq!(next.fragment(), Some("top"));
        assert_eq!(next.path(), "/p");
    }

    #[test]
    fn test_rewrite_skips_blank_and_unknown_params() {
        let page = url("https://example.org/p");
        let params: ParameterSet = [("Date", "3/15/2024"), ("EventID", " "), ("Extra", "1")]
            .into_iter()
            .collect();

        let next = rewrite_url(&page, &params);
        assert_eq!(
            decoded_pairs(&next),
            vec![("@Date".to_string(), "3/15/2024".to_string())]
        );
    }

    #[test]
    fn test_rewrite_with_nothing_left_drops_query() {
        let page = url("https://example.org/p?@Date=1/1/2024");
        let next = rewrite_url(&page, &ParameterSet::new());
        assert_eq!(next.query(), None);
        assert_eq!(next.as_str(), "https://example.org/p");
    }

    #[test]
    fn test_sync_replaces_history_entry() {
        let mut history = MemoryHistory::new(url("https://example.org/p?@Date=1/1/2024"));
        let params: ParameterSet = [("Date", "2/2/2024"), ("EventID", "8")]
            .into_iter()
            .collect();

        let next = sync(&params, &mut history);

        assert_eq!(history.replacements(), 1);
        assert_eq!(history.current_url(), next);
        assert_eq!(params_from_url(&next), params);
    }
}
