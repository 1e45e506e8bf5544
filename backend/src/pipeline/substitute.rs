//! Placeholder substitution over template text.
//!
//! Templates carry literal tokens such as `{{devedor}}`. A [`PlaceholderMap`]
//! pairs each token with its replacement and [`substitute`] swaps every
//! occurrence in a single pass, so replacement values are never re-scanned
//! and the order of entries does not affect the result.

use log::warn;
use regex::{Captures, Regex};

/// Ordered mapping from a literal token to its replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMap {
    entries: Vec<(String, String)>,
}

impl PlaceholderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement for `key`, keeping its position if already present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Like [`insert`](Self::insert), with a missing value stored as `""`.
    pub fn insert_opt<V: Into<String>>(&mut self, key: impl Into<String>, value: Option<V>) {
        self.insert(key, value.map(Into::into).unwrap_or_default());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Alternation of every key, escaped, longest first.
    fn pattern(&self) -> Option<String> {
        let mut keys: Vec<&str> = self
            .entries
            .iter()
            .map(|(k, _)| k.as_str())
            .filter(|k| !k.is_empty())
            .collect();
        if keys.is_empty() {
            return None;
        }
        keys.sort_by(|a, b| b.len().cmp(&a.len()));
        Some(
            keys.into_iter()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join("|"),
        )
    }
}

/// Replaces every occurrence of every key of `map` in `template`.
///
/// Text matching no key, including tokens the map does not know, is copied
/// through unchanged.
pub fn substitute(template: &str, map: &PlaceholderMap) -> String {
    if map.is_empty() {
        return template.to_string();
    }
    let Some(pattern) = map.pattern() else {
        return template.to_string();
    };
    match Regex::new(&pattern) {
        Ok(re) => re
            .replace_all(template, |caps: &Captures| {
                map.get(&caps[0]).unwrap_or_default().to_string()
            })
            .into_owned(),
        Err(e) => {
            warn!("Placeholder pattern rejected ({}), replacing key by key", e);
            map.iter()
                .fold(template.to_string(), |text, (key, value)| {
                    if key.is_empty() {
                        text
                    } else {
                        text.replace(key, value)
                    }
                })
        }
    }
}

/// Tokens of the `{{name}}` form still present in `text`, first occurrence order.
pub fn unresolved_tokens(text: &str) -> Vec<String> {
    let Ok(re) = Regex::new(r"\{\{[^{}]+\}\}") else {
        return Vec::new();
    };
    let mut tokens: Vec<String> = Vec::new();
    for m in re.find_iter(text) {
        if !tokens.iter().any(|t| t == m.as_str()) {
            tokens.push(m.as_str().to_string());
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> PlaceholderMap {
        let mut map = PlaceholderMap::new();
        for (k, v) in entries {
            map.insert(*k, *v);
        }
        map
    }

    #[test]
    fn replaces_every_occurrence() {
        let template = "<p>{{devedor}}</p><p>{{devedor}}</p><b>{{devedor}}</b>";
        let out = substitute(template, &map(&[("{{devedor}}", "Maria Silva")]));
        assert_eq!(out.matches("Maria Silva").count(), 3);
        assert!(!out.contains("{{devedor}}"));
    }

    #[test]
    fn replacement_count_matches_token_count_for_each_key() {
        let template = "{{cpf}} {{email}} {{cpf}} {{telefone}} {{cpf}} {{email}}";
        let entries = [
            ("{{cpf}}", "123.456.789-00"),
            ("{{email}}", "maria@example.com"),
            ("{{telefone}}", "(11) 99999-0000"),
        ];
        let out = substitute(template, &map(&entries));
        for (key, value) in entries {
            assert_eq!(out.matches(key).count(), 0);
            assert_eq!(out.matches(value).count(), template.matches(key).count());
        }
    }

    #[test]
    fn missing_value_becomes_empty() {
        let mut m = PlaceholderMap::new();
        m.insert_opt::<String>("{{telefone}}", None);
        let out = substitute("Tel: [{{telefone}}]", &m);
        assert_eq!(out, "Tel: []");
        assert!(!out.contains("undefined"));
        assert!(!out.contains("null"));
    }

    #[test]
    fn unknown_tokens_stay_visible() {
        let out = substitute(
            "{{devedor}} deve {{multa}}",
            &map(&[("{{devedor}}", "Maria")]),
        );
        assert_eq!(out, "Maria deve {{multa}}");
        assert_eq!(unresolved_tokens(&out), vec!["{{multa}}".to_string()]);
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let m = map(&[("{{devedor}}", "Maria"), ("{{valor_total}}", "1.234,56")]);
        let once = substitute("{{devedor}} R$ {{valor_total}}", &m);
        assert_eq!(substitute(&once, &m), once);
    }

    #[test]
    fn values_are_inserted_literally() {
        let m = map(&[("{{valor_total}}", "R$ $1 ${name}"), ("{{x}}", "{{devedor}}")]);
        let out = substitute("{{valor_total}}|{{x}}", &m);
        assert_eq!(out, "R$ $1 ${name}|{{devedor}}");
    }

    #[test]
    fn keys_with_regex_metacharacters_match_literally() {
        let m = map(&[("[ph.(1)]", "ok"), ("a+b", "sum")]);
        assert_eq!(substitute("[ph.(1)] aab a+b", &m), "ok aab sum");
    }

    #[test]
    fn empty_map_leaves_template_untouched() {
        let m = PlaceholderMap::new();
        assert!(m.is_empty());
        assert_eq!(substitute("{{devedor}} R$ $1", &m), "{{devedor}} R$ $1");
        assert!(!map(&[("", "x")]).is_empty());
        assert_eq!(substitute("abc", &map(&[("", "x")])), "abc");
    }

    #[test]
    fn insert_overwrites_in_place() {
        let mut m = map(&[("{{a}}", "1"), ("{{b}}", "2")]);
        m.insert("{{a}}", "3");
        let entries: Vec<_> = m.iter().collect();
        assert_eq!(entries, vec![("{{a}}", "3"), ("{{b}}", "2")]);
    }

    #[test]
    fn unresolved_tokens_are_deduplicated() {
        let tokens = unresolved_tokens("{{a}} {{b}} {{a}} {not} {{}}");
        assert_eq!(tokens, vec!["{{a}}".to_string(), "{{b}}".to_string()]);
    }
}
