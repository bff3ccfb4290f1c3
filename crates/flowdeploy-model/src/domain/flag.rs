use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Boolean flag as reported by the remote platform.
///
/// The platform is inconsistent about the wire type: the same field may arrive
/// as a JSON boolean or as the string `"true"` / `"false"`. Both are accepted;
/// serialisation always emits a plain boolean.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flag(pub bool);

impl Flag {
    #[inline]
    pub fn is_set(self) -> bool {
        self.0
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Flag(value)
    }
}

impl From<Flag> for bool {
    fn from(flag: Flag) -> Self {
        flag.0
    }
}

impl FromStr for Flag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim();
        if norm.eq_ignore_ascii_case("true") {
            Ok(Flag(true))
        } else if norm.eq_ignore_ascii_case("false") {
            Ok(Flag(false))
        } else {
            Err(format!("invalid flag value: '{s}' (expected: true|false)"))
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.0)
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FlagVisitor;

        impl de::Visitor<'_> for FlagVisitor {
            type Value = Flag;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a boolean or the string \"true\" / \"false\"")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Flag, E> {
                Ok(Flag(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Flag, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(FlagVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::Flag;

    #[test]
    fn accepts_bool_and_string_forms() {
        let from_bool: Flag = serde_json::from_str("true").unwrap();
        let from_str: Flag = serde_json::from_str(r#""true""#).unwrap();
        let upper: Flag = serde_json::from_str(r#""FALSE""#).unwrap();

        assert!(from_bool.is_set());
        assert_eq!(from_bool, from_str);
        assert!(!upper.is_set());
    }

    #[test]
    fn rejects_other_strings() {
        assert!(serde_json::from_str::<Flag>(r#""yes""#).is_err());
        assert!("1".parse::<Flag>().is_err());
    }

    #[test]
    fn serializes_as_bool() {
        assert_eq!(serde_json::to_string(&Flag(true)).unwrap(), "true");
    }
}
