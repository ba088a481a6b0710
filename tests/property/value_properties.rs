use proptest::prelude::*;
use serde_json::json;

use goo::{get_value, mcp::handlers::handle_tool_call, mcp::tools::GET_VALUE_TOOL};

proptest! {
    #[test]
    fn test_get_value_is_total_and_deterministic(a in any::<i32>(), b in any::<i32>()) {
        // No panic anywhere in the domain, same answer every time.
        let first = get_value(a, b);
        prop_assert_eq!(get_value(a, b), first);
    }

    #[test]
    fn test_tool_agrees_with_library(a in any::<i32>(), b in any::<i32>()) {
        let result = handle_tool_call(GET_VALUE_TOOL, json!({"a": a, "b": b})).unwrap();
        prop_assert_eq!(result.content[0].text.clone(), get_value(a, b).to_string());
    }

    #[test]
    fn test_out_of_range_operands_are_rejected(
        a in prop_oneof![
            (i64::from(i32::MAX) + 1)..i64::MAX,
            i64::MIN..i64::from(i32::MIN),
        ],
    ) {
        let err = handle_tool_call(GET_VALUE_TOOL, json!({"a": a, "b": 0})).unwrap_err();
        prop_assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_operands_beyond_i64_are_out_of_range(a in (i64::MAX as u64 + 1)..=u64::MAX) {
        let err = handle_tool_call(GET_VALUE_TOOL, json!({"a": 0, "b": a})).unwrap_err();
        prop_assert_eq!(err.to_string(), format!("Operand b out of range: {}", a));
    }

    #[test]
    fn test_non_integer_operands_are_rejected(s in "\\PC*") {
        let err = handle_tool_call(GET_VALUE_TOOL, json!({"a": s, "b": 0})).unwrap_err();
        prop_assert!(err.to_string().contains("must be an integer"));
    }
}
