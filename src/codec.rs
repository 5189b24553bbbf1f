//! Text codec for list-valued listing columns.
//!
//! `allowed_pets`, `amenities` and `photos` are stored as a single TEXT
//! column holding a JSON array of strings. The domain never queries inside
//! these lists, so they are opaque to SQL; order is preserved end to end.

/// Encodes an ordered string list into its column representation.
pub fn encode(values: &[String]) -> String {
    // A vector of strings always serializes cleanly.
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

/// Decodes a column value back into an ordered string list.
///
/// Blank column text decodes to the empty list; anything else must be a
/// JSON array of strings.
pub fn decode(raw: &str) -> Result<Vec<String>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_order() {
        let values = vec![
            "dogs".to_string(),
            "cats".to_string(),
            "small_mammals".to_string(),
        ];
        let encoded = encode(&values);
        assert_eq!(decode(&encoded).unwrap(), values);
    }

    #[test]
    fn empty_list_round_trips() {
        assert_eq!(encode(&[]), "[]");
        assert_eq!(decode("[]").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn blank_column_decodes_to_empty_list() {
        assert_eq!(decode("").unwrap(), Vec::<String>::new());
        assert_eq!(decode("   ").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn corrupt_column_is_an_error() {
        assert!(decode("not json").is_err());
        assert!(decode("{\"a\":1}").is_err());
    }

    #[test]
    fn values_with_commas_and_quotes_survive() {
        let values = vec![
            "Water fountains, heated".to_string(),
            "\"quiet\" corner".to_string(),
        ];
        assert_eq!(decode(&encode(&values)).unwrap(), values);
    }
}
