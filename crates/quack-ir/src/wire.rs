//! Serde helpers for string-keyed JSON objects.

/// Keeps every entry of a JSON object, in document order.
///
/// Deserializing into a map type resolves a repeated key last-wins before
/// any validation runs. Use as `#[serde(with = "quack_ir::wire::entries")]`
/// on a `Vec<(String, V)>` field so repeated keys reach the caller's
/// checks instead.
pub mod entries {
    use std::fmt;
    use std::marker::PhantomData;

    use serde::de::{MapAccess, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, V>(entries: &[(String, V)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        serializer.collect_map(entries.iter().map(|(k, v)| (k, v)))
    }

    pub fn deserialize<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }

    struct EntriesVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a JSON object")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Doc {
        #[serde(with = "super::entries")]
        values: Vec<(String, f64)>,
    }

    #[test]
    fn test_repeated_keys_are_kept() {
        let source = r#"{"values": {"a": 1.0, "b": 2.0, "a": 3.0}}"#;
        let doc: Doc = serde_json::from_str(source).unwrap();
        assert_eq!(
            doc.values,
            vec![("a".into(), 1.0), ("b".into(), 2.0), ("a".into(), 3.0)]
        );
    }

    #[test]
    fn test_serializes_as_object_in_order() {
        let doc = Doc {
            values: vec![("z".into(), 1.0), ("a".into(), 2.0)],
        };
        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            r#"{"values":{"z":1.0,"a":2.0}}"#
        );
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(serde_json::from_str::<Doc>(r#"{"values": [1.0]}"#).is_err());
    }
}
