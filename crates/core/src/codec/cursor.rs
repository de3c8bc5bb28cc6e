//! Offset cursors for array-backed connections.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{RelayError, RelayResult};
use crate::ports::Cursor;

/// Prefix shared by every offset cursor.
const CURSOR_PREFIX: &str = "arrayconnection:";

impl Cursor {
    /// Build the cursor for a zero-based offset.
    pub fn from_offset(offset: usize) -> Self {
        Self {
            value: STANDARD.encode(format!("{}{}", CURSOR_PREFIX, offset)),
        }
    }

    /// Decode the zero-based offset carried by this cursor.
    pub fn offset(&self) -> RelayResult<usize> {
        let invalid = || RelayError::InvalidCursor(self.value.clone());

        let bytes = STANDARD.decode(&self.value).map_err(|_| invalid())?;
        let payload = std::str::from_utf8(&bytes).map_err(|_| invalid())?;
        let digits = payload.strip_prefix(CURSOR_PREFIX).ok_or_else(invalid)?;

        // One spelling per offset: no sign, no padding, no leading zeros.
        let canonical = !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
            && (digits == "0" || !digits.starts_with('0'));
        if !canonical {
            return Err(invalid());
        }

        digits.parse().map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_roundtrip() {
        for offset in [0, 1, 2, 41, usize::MAX] {
            assert_eq!(Cursor::from_offset(offset).offset().unwrap(), offset);
        }
    }

    // Test critique: même format que les curseurs Relay standards
    #[test]
    fn test_cursor_wire_format() {
        assert_eq!(Cursor::from_offset(0).value, "YXJyYXljb25uZWN0aW9uOjA=");
    }

    // Test critique: les curseurs forgés ou corrompus sont rejetés
    #[test]
    fn test_cursor_rejects_malformed_input() {
        let forged = |payload: &str| Cursor {
            value: STANDARD.encode(payload),
        };

        assert!(matches!(
            Cursor { value: "%%%".into() }.offset(),
            Err(RelayError::InvalidCursor(_))
        ));
        assert!(forged("arrayconnection:").offset().is_err());
        assert!(forged("arrayconnection:-1").offset().is_err());
        assert!(forged("arrayconnection:+1").offset().is_err());
        assert!(forged("arrayconnection:01").offset().is_err());
        assert!(forged("arrayconnection:1.5").offset().is_err());
        assert!(forged("otherconnection:1").offset().is_err());
        // Dépasse usize
        assert!(forged("arrayconnection:99999999999999999999999999").offset().is_err());
    }
}
