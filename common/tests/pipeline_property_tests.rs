// Property-based tests for extraction and encoding
// Feature: data-request-worker

use common::encoding::{ByteOrder, ResultEncoder, U256};
use common::errors::ExecutionError;
use common::extract::{extract_value, FieldPath};
use common::models::HttpOutcome;
use common::response::validate_response;
use proptest::prelude::*;
use serde_json::json;

fn view_count_path() -> FieldPath {
    FieldPath::parse("items[0].statistics.viewCount").unwrap()
}

fn byte_order_strategy() -> impl Strategy<Value = ByteOrder> {
    prop_oneof![Just(ByteOrder::Big), Just(ByteOrder::Little)]
}

/// **Property: decoded result equals the extracted value**
///
/// *For any* well-formed body whose view count is a decimal string, the
/// encoded result decodes back to that count.
mod property_decoded_result_matches_field {
    use super::*;

    proptest! {
        #[test]
        fn test_decoded_equals_field(count in any::<u128>()) {
            let body = json!({"items": [{"statistics": {"viewCount": count.to_string()}}]});
            let data = validate_response(HttpOutcome::ok(body.to_string())).unwrap();
            let value = extract_value(&data, &view_count_path()).unwrap();
            let encoded = ResultEncoder::uint256().encode(&value).unwrap();

            prop_assert_eq!(encoded.width(), 32);
            prop_assert_eq!(encoded.value(), U256::from(count));
            prop_assert_eq!(&encoded.as_bytes()[16..], &count.to_be_bytes()[..]);
        }

        #[test]
        fn test_json_integer_counts(count in any::<u64>()) {
            let body = json!({"items": [{"statistics": {"viewCount": count}}]});
            let value = extract_value(&body, &view_count_path()).unwrap();
            prop_assert_eq!(value, U256::from(count));
        }
    }
}

/// **Property: encoding is deterministic**
///
/// *For any* value, width and byte order, encoding twice yields identical bytes.
mod property_encoding_idempotence {
    use super::*;

    proptest! {
        #[test]
        fn test_encode_twice_identical(
            value in any::<u64>(),
            width in 8usize..=32,
            order in byte_order_strategy(),
        ) {
            let encoder = ResultEncoder::new(width, order).unwrap();
            let value = U256::from(value);
            let first = encoder.encode(&value).unwrap();
            let second = encoder.encode(&value).unwrap();
            prop_assert_eq!(first.as_bytes(), second.as_bytes());
            prop_assert_eq!(first.width(), width);
            prop_assert_eq!(first.value(), value);
        }
    }
}

/// **Property: values wider than the configured width overflow**
mod property_width_overflow {
    use super::*;

    proptest! {
        #[test]
        fn test_overflow_iff_too_wide(value in any::<u64>(), width in 1usize..=8) {
            let encoder = ResultEncoder::new(width, ByteOrder::Big).unwrap();
            let fits = width == 8 || value < (1u64 << (width * 8));
            let result = encoder.encode(&U256::from(value));
            if fits {
                prop_assert!(result.is_ok());
            } else {
                prop_assert!(matches!(result, Err(ExecutionError::Overflow(_))));
            }
        }
    }
}

/// **Property: decimal strings extract to the integer they spell**
mod property_decimal_parsing {
    use super::*;

    proptest! {
        #[test]
        fn test_decimal_string_round_trips(value in any::<u128>(), zeros in 0usize..4) {
            let text = format!("{}{}", "0".repeat(zeros), value);
            let body = json!({"items": [{"statistics": {"viewCount": text}}]});
            let parsed = extract_value(&body, &view_count_path()).unwrap();
            prop_assert_eq!(parsed, U256::from(value));
            prop_assert_eq!(parsed.to_string(), value.to_string());
        }

        #[test]
        fn test_non_digit_strings_are_malformed(s in "[0-9]{0,5}[a-zA-Z.\\- ][0-9a-z]{0,5}") {
            let body = json!({"items": [{"statistics": {"viewCount": s}}]});
            prop_assert!(matches!(
                extract_value(&body, &view_count_path()),
                Err(ExecutionError::MalformedValue(_))
            ));
        }
    }
}
