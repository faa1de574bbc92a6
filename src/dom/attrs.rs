//! Ordered attribute list.

/// Attribute list of one element, kept in source order.
///
/// A `None` value is a bare attribute (`<input disabled>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, Option<String>)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a value. Bare attributes yield `Some("")`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref().unwrap_or_default())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Insert or overwrite. Overwriting keeps the original position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set_raw(key.into(), Some(value.into()));
    }

    pub(crate) fn set_raw(&mut self, key: String, value: Option<String>) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Option<String>> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Replace `old` with `new` in place, assigning `value`.
    ///
    /// Appends when `old` is absent.
    pub fn replace_key(&mut self, old: &str, new: impl Into<String>, value: impl Into<String>) {
        let new = new.into();
        let value = Some(value.into());
        match self.entries.iter_mut().find(|(k, _)| k == old) {
            Some(slot) => *slot = (new, value),
            None => self.set_raw(new, value),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (k, v) in iter {
            attrs.set(k, v);
        }
        attrs
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_preserves_position() {
        let mut attrs = Attributes::from([("a", "1"), ("b", "2"), ("c", "3")]);
        attrs.set("b", "20");
        let keys: Vec<_> = attrs.keys().collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(attrs.get("b"), Some("20"));
    }

    #[test]
    fn test_replace_key_in_place() {
        let mut attrs = Attributes::from([("class", "x"), ("href", "about.html"), ("id", "y")]);
        attrs.replace_key("href", "to", "about");
        let keys: Vec<_> = attrs.keys().collect();
        assert_eq!(keys, ["class", "to", "id"]);
        assert_eq!(attrs.get("to"), Some("about"));
        assert!(!attrs.contains("href"));
    }

    #[test]
    fn test_bare_attribute() {
        let mut attrs = Attributes::new();
        attrs.set_raw("disabled".into(), None);
        assert_eq!(attrs.get("disabled"), Some(""));
        assert_eq!(attrs.iter().next(), Some(("disabled", None)));
    }

    #[test]
    fn test_remove() {
        let mut attrs = Attributes::from([("a", "1"), ("b", "2")]);
        assert_eq!(attrs.remove("a"), Some(Some("1".to_string())));
        assert_eq!(attrs.remove("a"), None);
        assert_eq!(attrs.len(), 1);
    }
}
