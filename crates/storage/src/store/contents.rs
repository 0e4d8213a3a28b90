#![forbid(unsafe_code)]

use super::StoreError;
use cart_core::ids::ProductId;

pub(in crate::store) fn encode_contents(items: &[ProductId]) -> String {
    let raw: Vec<i64> = items.iter().map(|item| item.as_i64()).collect();
    serde_json::to_string(&raw).unwrap_or_else(|_| "[]".to_string())
}

pub(in crate::store) fn decode_contents(
    raw: Option<String>,
) -> Result<Vec<ProductId>, StoreError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str::<Vec<i64>>(trimmed)
        .map(|items| items.into_iter().map(ProductId::new).collect())
        .map_err(|_| StoreError::InvalidInput("stored cart contents are invalid json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_treats_absent_and_blank_as_empty() {
        assert_eq!(decode_contents(None).expect("absent decodes"), Vec::new());
        assert_eq!(
            decode_contents(Some("   ".to_string())).expect("blank decodes"),
            Vec::new()
        );
    }

    #[test]
    fn decode_rejects_malformed_text() {
        let err = decode_contents(Some("not json".to_string()))
            .expect_err("malformed contents must not decode");
        assert!(matches!(err, StoreError::InvalidInput(_)));

        let err = decode_contents(Some(r#"{"a":1}"#.to_string()))
            .expect_err("a json object is not a product list");
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[test]
    fn encode_keeps_order_and_duplicates() {
        let items = [
            ProductId::new(10),
            ProductId::new(20),
            ProductId::new(10),
        ];
        let raw = encode_contents(&items);
        assert_eq!(raw, "[10,20,10]");
        assert_eq!(
            decode_contents(Some(raw)).expect("own encoding must decode"),
            items.to_vec()
        );
    }
}
