//! Registry token types (`PizzaOptionId`, `VoterId`) with strict charset.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

fn is_token(s: &str) -> bool {
    let len = s.len();
    if !(1..=64).contains(&len) {
        return false;
    }
    s.bytes().all(|b| matches!(b,
        b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' |
        b'_' | b'-' | b':' | b'.'
    ))
}

macro_rules! def_token {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }

        impl FromStr for $name {
            type Err = CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if is_token(s) { Ok(Self(s.to_string())) } else { Err(CoreError::InvalidToken(s.to_string())) }
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;
            fn try_from(s: String) -> Result<Self, Self::Error> {
                if is_token(&s) { Ok(Self(s)) } else { Err(CoreError::InvalidToken(s)) }
            }
        }

        impl From<$name> for String {
            fn from(t: $name) -> String { t.0 }
        }
    }
}

def_token!(
    /// Identifier of one pizza option configured for an event.
    PizzaOptionId
);
def_token!(
    /// Identifier of one voter (one vote per voter per event).
    VoterId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_registry_charset() {
        let id: PizzaOptionId = "pz:margherita-2.v1".parse().unwrap();
        assert_eq!(id.as_str(), "pz:margherita-2.v1");
    }

    #[test]
    fn rejects_empty_spaces_and_overlong() {
        assert!("".parse::<VoterId>().is_err());
        assert!("two words".parse::<VoterId>().is_err());
        assert!("x".repeat(65).parse::<VoterId>().is_err());
        assert!("x".repeat(64).parse::<VoterId>().is_ok());
    }

    #[test]
    fn serde_round_trip_enforces_charset() {
        let ok: PizzaOptionId = serde_json::from_str("\"hawaiian\"").unwrap();
        assert_eq!(serde_json::to_string(&ok).unwrap(), "\"hawaiian\"");
        assert!(serde_json::from_str::<PizzaOptionId>("\"no/slash\"").is_err());
    }
}
