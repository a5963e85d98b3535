//! `Serialize` for parsed values, so any subtree can be handed to a serde
//! serializer without going through the typed getters.

use serde::{Serialize, Serializer, ser::Error};

use crate::{error::JsonType, get::ValueRef};

impl Serialize for ValueRef<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.json_type() {
            JsonType::Null => serializer.serialize_unit(),
            JsonType::Bool => serializer.serialize_bool(self.as_bool().unwrap_or_default()),
            JsonType::Number => {
                let text = self.number_text().unwrap_or_default();
                if !text.contains(['.', 'e', 'E']) {
                    if let Ok(n) = text.parse::<i64>() {
                        return serializer.serialize_i64(n);
                    }
                    if let Ok(n) = text.parse::<u64>() {
                        return serializer.serialize_u64(n);
                    }
                }
                match text.parse::<f64>() {
                    Ok(n) if n.is_finite() => serializer.serialize_f64(n),
                    _ => Err(S::Error::custom("number out of range for f64")),
                }
            }
            JsonType::String => serializer.serialize_str(&self.to_str().unwrap_or_default()),
            JsonType::Array => serializer.collect_seq(self.items()),
            JsonType::Object => serializer.collect_map(self.entries()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{At, Session};

    #[test]
    fn serializes_like_serde_json_reads() {
        let text = r#"{"n": -3, "big": 18446744073709551615, "f": 0.25, "s": "a\u0041", "l": [true, null]}"#;
        let mut session = Session::new();
        session.parse(text).unwrap();
        let value = session.get_value(At::Root).unwrap();
        let ours = serde_json::to_value(value).unwrap();
        let theirs: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(ours, theirs);
    }
}
