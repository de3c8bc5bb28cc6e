//! Global object identifiers.
//!
//! A global id packs a `(type name, local id)` pair into one opaque
//! string. The payload is `"<len>:<type name><local id>"` where `<len>` is
//! the byte length of the type name, rendered as standard base64. The
//! length prefix makes the pack self-delimiting, so neither field needs
//! escaping.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{RelayError, RelayResult};

/// Opaque identifier for any node, across all types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalId(String);

impl GlobalId {
    /// Wrap a raw id string received from a client. No validation happens
    /// until [`GlobalId::decode`].
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Encode a type name and local id into a global id.
    pub fn encode(type_name: &str, local_id: &str) -> Self {
        let payload = format!("{}:{}{}", type_name.len(), type_name, local_id);
        Self(STANDARD.encode(payload))
    }

    /// Decode back into `(type name, local id)`.
    pub fn decode(&self) -> RelayResult<DecodedId> {
        let malformed = || RelayError::MalformedId(self.0.clone());

        let bytes = STANDARD.decode(&self.0).map_err(|_| malformed())?;
        let payload = String::from_utf8(bytes).map_err(|_| malformed())?;

        let (len, rest) = payload.split_once(':').ok_or_else(malformed)?;
        if len.is_empty() || !len.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let len: usize = len.parse().map_err(|_| malformed())?;

        // `get` rejects both overlong prefixes and splits inside a char.
        let type_name = rest.get(..len).ok_or_else(malformed)?;
        let local_id = &rest[len..];

        Ok(DecodedId {
            type_name: type_name.to_string(),
            local_id: local_id.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for GlobalId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for GlobalId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The two halves of a decoded [`GlobalId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedId {
    pub type_name: String,
    pub local_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test critique: roundtrip exact, y compris avec le séparateur dans les champs
    #[test]
    fn test_global_id_roundtrip_with_separator() {
        let cases = [
            ("Video", "a"),
            ("Video", "missing-id"),
            ("Vi:deo", "1:2:3"),
            ("12:", ":"),
            ("", ""),
            ("Type", ""),
            ("Émission", "identifiant-été"),
        ];

        for (type_name, local_id) in cases {
            let decoded = GlobalId::encode(type_name, local_id).decode().unwrap();
            assert_eq!(decoded.type_name, type_name);
            assert_eq!(decoded.local_id, local_id);
        }
    }

    // Test critique: l'encodage est injectif même quand la concaténation est identique
    #[test]
    fn test_global_id_is_injective() {
        assert_ne!(GlobalId::encode("ab", "c"), GlobalId::encode("a", "bc"));
        assert_ne!(GlobalId::encode("a:b", "c"), GlobalId::encode("a", "b:c"));
        assert_eq!(GlobalId::encode("Video", "a"), GlobalId::encode("Video", "a"));
    }

    #[test]
    fn test_global_id_rejects_malformed_input() {
        // Pas du base64
        assert!(matches!(
            GlobalId::new("not-a-valid-id").decode(),
            Err(RelayError::MalformedId(_))
        ));

        let encoded = |raw: &[u8]| GlobalId::new(STANDARD.encode(raw));

        // Pas de préfixe de longueur
        assert!(encoded(b"Video").decode().is_err());
        // Préfixe non numérique
        assert!(encoded(b"x:Video").decode().is_err());
        assert!(encoded(b"+5:Video").decode().is_err());
        // Préfixe plus long que le contenu
        assert!(encoded(b"9:Video").decode().is_err());
        // UTF-8 invalide
        assert!(encoded(&[0x31, b':', 0xff]).decode().is_err());
        // Coupe au milieu d'un caractère multi-octets
        assert!(encoded("1:é".as_bytes()).decode().is_err());
    }
}
