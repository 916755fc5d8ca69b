//! Query-string access for deep links (shared conversations, invite codes).

use std::collections::BTreeMap;

/// All query parameters of `url`, percent-decoded. Repeated keys keep the
/// last value.
pub fn query_params(url: &str) -> Result<BTreeMap<String, String>, String> {
    let parsed = reqwest::Url::parse(url).map_err(|e| format!("invalid URL {url}: {e}"))?;
    Ok(parsed
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect())
}

/// First value of `key` in the query of `url`, or an empty string.
pub fn query_param(url: &str, key: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .query_pairs()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned())
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_decoded_params() {
        let params = query_params("https://chat.test/?share=abc%20d&ref=x&ref=y").unwrap();
        assert_eq!(params["share"], "abc d");
        assert_eq!(params["ref"], "y");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn no_query_is_empty() {
        assert!(query_params("https://chat.test/home").unwrap().is_empty());
    }

    #[test]
    fn invalid_url_is_an_error() {
        assert!(query_params("not a url").is_err());
    }

    #[test]
    fn single_param_lookup() {
        let url = "https://chat.test/?invite=K9&invite=K10";
        assert_eq!(query_param(url, "invite"), "K9");
        assert_eq!(query_param(url, "missing"), "");
        assert_eq!(query_param("::bad::", "invite"), "");
    }
}
