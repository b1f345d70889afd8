//! Core, format-agnostic types for langbundle.
//! Loaders decode into these; the serializer encodes these.

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, SeqAccess, Visitor},
    ser::SerializeMap,
};

/// A string-keyed map that remembers insertion order.
///
/// Replacing the value of an existing key keeps the key at its original
/// position, which is what the generated documents rely on. Equality is
/// order-insensitive.
#[derive(Debug, Clone)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

/// One locale's translations: nested keys down to translation strings.
pub type LocaleTree = OrderedMap<TreeValue>;

/// All locales of one run, keyed by locale code.
pub type LocaleCollection = OrderedMap<LocaleTree>;

/// A value inside a [`LocaleTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeValue {
    /// A translation string.
    Leaf(String),
    /// A nested group of translations.
    Node(LocaleTree),
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        OrderedMap {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.position(key).map(move |i| &mut self.entries[i].1)
    }

    /// Inserts a value, returning the previous one for that key.
    ///
    /// A new key is appended; an existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.position(&key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Removes a key, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    /// Returns the value for `key`, appending `default()` first if absent.
    pub fn get_or_insert_with(&mut self, key: &str, default: impl FnOnce() -> V) -> &mut V {
        let index = match self.position(key) {
            Some(i) => i,
            None => {
                self.entries.push((key.to_string(), default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut V)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Shallow merge: every key of `other` is inserted, replacing ours.
    pub fn merge_replacing(&mut self, other: OrderedMap<V>) {
        for (key, value) in other {
            self.insert(key, value);
        }
    }
}

impl<V: PartialEq> PartialEq for OrderedMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

impl<V: Eq> Eq for OrderedMap<V> {}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl TreeValue {
    pub fn leaf(value: impl Into<String>) -> Self {
        TreeValue::Leaf(value.into())
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            TreeValue::Leaf(s) => Some(s),
            TreeValue::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&LocaleTree> {
        match self {
            TreeValue::Node(tree) => Some(tree),
            TreeValue::Leaf(_) => None,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, TreeValue::Node(_))
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for TreeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TreeValue::Leaf(s) => serializer.serialize_str(s),
            TreeValue::Node(tree) => tree.serialize(serializer),
        }
    }
}

/// Map keys as they appear in source files: strings, or the integer keys
/// of list-like arrays.
struct TreeKey(String);

impl<'de> Deserialize<'de> for TreeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = TreeKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer key")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TreeKey, E> {
                Ok(TreeKey(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<TreeKey, E> {
                Ok(TreeKey(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<TreeKey, E> {
                Ok(TreeKey(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<TreeKey, E> {
                Ok(TreeKey(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<TreeKey, E> {
                Ok(TreeKey(if v { "1" } else { "0" }.to_string()))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapVisitor<V>(std::marker::PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for MapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of translations")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = OrderedMap::new();
                while let Some((TreeKey(key), value)) = access.next_entry::<TreeKey, V>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(MapVisitor(std::marker::PhantomData))
    }
}

impl<'de> Deserialize<'de> for TreeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = TreeValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a translation string or a nested map")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TreeValue, E> {
                Ok(TreeValue::leaf(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<TreeValue, E> {
                Ok(TreeValue::Leaf(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<TreeValue, E> {
                Ok(TreeValue::leaf(if v { "1" } else { "" }))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<TreeValue, E> {
                Ok(TreeValue::Leaf(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<TreeValue, E> {
                Ok(TreeValue::Leaf(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<TreeValue, E> {
                Ok(TreeValue::Leaf(v.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<TreeValue, E> {
                Err(E::custom("null is not a translation value"))
            }

            fn visit_none<E: de::Error>(self) -> Result<TreeValue, E> {
                self.visit_unit()
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<TreeValue, A::Error> {
                let mut tree = LocaleTree::new();
                let mut index = 0usize;
                while let Some(value) = seq.next_element::<TreeValue>()? {
                    tree.insert(index.to_string(), value);
                    index += 1;
                }
                Ok(TreeValue::Node(tree))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<TreeValue, A::Error> {
                let mut tree = LocaleTree::new();
                while let Some((TreeKey(key), value)) = access.next_entry::<TreeKey, TreeValue>()? {
                    tree.insert(key, value);
                }
                Ok(TreeValue::Node(tree))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
