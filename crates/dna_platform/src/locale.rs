//! System locale detection.

/// Environment variables consulted, highest priority first.
const LOCALE_VARS: &[&str] = &["LC_ALL", "LC_MESSAGES", "LANG"];

/// The user's message locale, e.g. `en_GB.UTF-8`. `None` when nothing is set
/// or the value is the POSIX default.
pub fn system_locale() -> Option<String> {
    locale_from(|name| std::env::var(name).ok())
}

fn locale_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    LOCALE_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn lc_all_wins() {
        let lookup = env(&[("LC_ALL", "pt_BR.UTF-8"), ("LANG", "en_GB.UTF-8")]);
        assert_eq!(locale_from(lookup), Some("pt_BR.UTF-8".to_string()));
    }

    #[test]
    fn empty_and_posix_values_are_skipped() {
        let lookup = env(&[("LC_ALL", ""), ("LC_MESSAGES", "C"), ("LANG", "en_GB.UTF-8")]);
        assert_eq!(locale_from(lookup), Some("en_GB.UTF-8".to_string()));
    }

    #[test]
    fn nothing_set() {
        assert_eq!(locale_from(env(&[("LANG", "POSIX")])), None);
        assert_eq!(locale_from(env(&[])), None);
    }
}
