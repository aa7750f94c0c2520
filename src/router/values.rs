use std::iter::FromIterator;
use std::ops::Deref;
use std::str::FromStr;

use smallvec::SmallVec;

/// Name/value pairs bound by a route, looked up ignoring the case of the name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteValues {
    buf: SmallVec<[(String, String); 8]>,
}

impl RouteValues {
    pub fn new() -> Self {
        Self {
            buf: SmallVec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.buf[i].1.as_str())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(T::from_str)
    }

    /// Inserts a value, replacing one already bound under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(i) => Some(std::mem::replace(&mut self.buf[i].1, value)),
            None => {
                self.buf.push((name, value));
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let i = self.position(name)?;
        Some(self.buf.remove(i).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.buf.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Checks that every expected name is bound to a value equal to the
    /// expected one, ignoring case on both sides.
    pub fn matches_expected(&self, expected: &[(&str, &str)]) -> bool {
        expected.iter().all(|&(name, value)| match self.get(name) {
            Some(v) => v.eq_ignore_ascii_case(value),
            None => false,
        })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.buf
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(name))
    }
}

impl Deref for RouteValues {
    type Target = [(String, String)];
    fn deref(&self) -> &Self::Target {
        &*self.buf
    }
}

impl<K, V> FromIterator<(K, V)> for RouteValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}

impl IntoIterator for RouteValues {
    type Item = (String, String);
    type IntoIter = smallvec::IntoIter<[(String, String); 8]>;
    fn into_iter(self) -> Self::IntoIter {
        self.buf.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn values_ignore_name_case() {
        let mut values = RouteValues::new();
        values.insert("controller", "Home");
        values.insert("id", "42");
        assert_eq!(values.insert("Controller", "Customer"), Some("Home".to_owned()));

        assert_eq!(values.len(), 2);
        assert_eq!(values.get("CONTROLLER"), Some("Customer"));
        assert_eq!(values.parse::<u32>("ID"), Some(Ok(42)));
        assert!(values.get("action").is_none());

        assert_eq!(values.remove("Id"), Some("42".to_owned()));
        assert!(!values.contains_key("id"));
    }

    #[test]
    fn values_matches_expected() {
        let values: RouteValues = vec![("controller", "home"), ("action", "Index")]
            .into_iter()
            .collect();

        assert!(values.matches_expected(&[("Controller", "Home"), ("action", "INDEX")]));
        assert!(values.matches_expected(&[]));
        assert!(!values.matches_expected(&[("controller", "Customer")]));
        assert!(!values.matches_expected(&[("id", "1")]));
    }
}
