use std::cmp::Ordering;

/// A sorted map keyed by names compared with ASCII case folded.
///
/// Keys keep the spelling they were first inserted with.
#[derive(Debug, Clone)]
pub struct StrMap<T> {
    keys: Vec<Box<str>>,
    values: Vec<T>,
}

impl<T> Default for StrMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StrMap<T> {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn find(&self, key: &str) -> Option<&T> {
        match self.find_index(key) {
            Ok(i) => self.values.get(i),
            Err(_) => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_index(key).is_ok()
    }

    /// Inserts or replaces, returning the previous value.
    pub fn insert(&mut self, key: &str, value: T) -> Option<T> {
        match self.find_index(key) {
            Ok(i) => Some(std::mem::replace(&mut self.values[i], value)),
            Err(i) => {
                self.keys.insert(i, key.into());
                self.values.insert(i, value);
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.keys.iter().map(|k| &**k).zip(self.values.iter())
    }

    fn find_index(&self, key: &str) -> Result<usize, usize> {
        self.keys.binary_search_by(|k| cmp_ignore_case(k, key))
    }
}

fn cmp_ignore_case(lhs: &str, rhs: &str) -> Ordering {
    let lhs = lhs.bytes().map(|b| b.to_ascii_lowercase());
    let rhs = rhs.bytes().map(|b| b.to_ascii_lowercase());
    lhs.cmp(rhs)
}
