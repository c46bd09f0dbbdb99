//! Tool schema generation tests

use std::collections::HashMap;

use serde_json::{json, Value};
use swarm::tools::{
    function_to_schema, function_to_schema_with_annotations, Param, Signature, Tool, ToolOutput,
};

fn build(params: Vec<Param>) -> Tool {
    let mut builder = Tool::builder("probe").description("Probe tool");
    for param in params {
        builder = builder.param(param);
    }
    builder
        .handler(|_| Ok(ToolOutput::data(Value::Null)))
        .build()
        .unwrap()
}

#[test]
fn test_required_count_matches_params_without_defaults() {
    // every subset of defaulted params over five parameters
    for mask in 0u32..32 {
        let params: Vec<Param> = (0..5)
            .map(|i| {
                let param = Param::new(format!("p{}", i));
                if mask & (1 << i) != 0 {
                    param.with_default("0")
                } else {
                    param
                }
            })
            .collect();
        let expected: Vec<String> = params
            .iter()
            .filter(|p| p.default.is_none())
            .map(|p| p.name.clone())
            .collect();

        let schema = function_to_schema(&build(params));

        assert_eq!(
            schema.function.parameters.required.len(),
            5 - mask.count_ones() as usize
        );
        assert_eq!(schema.function.parameters.required, expected);
        assert_eq!(schema.function.parameters.properties.len(), 5);
    }
}

#[test]
fn test_full_schema_shape() {
    let tool = Tool::builder("execute_refund")
        .description("Use to issue a refund by item ID.")
        .signature("(item_id, reason = \"not provided\", amount: number = 0)")
        .handler(|_| Ok(ToolOutput::data("Success")))
        .build()
        .unwrap();

    let value = serde_json::to_value(function_to_schema(&tool)).unwrap();

    assert_eq!(
        value,
        json!({
            "type": "function",
            "function": {
                "name": "execute_refund",
                "description": "Use to issue a refund by item ID.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "item_id": {"type": "string"},
                        "reason": {"type": "string"},
                        "amount": {"type": "number"}
                    },
                    "required": ["item_id"]
                }
            }
        })
    );
}

#[test]
fn test_unsupported_type_falls_back_to_string() {
    let tool = build(vec![
        Param::new("when").typed("Date"),
        Param::new("maybe").typed("Option<u8>"),
    ]);
    let schema = function_to_schema(&tool);
    for name in ["when", "maybe"] {
        assert_eq!(schema.function.parameters.properties[name]["type"], "string");
    }
}

#[test]
fn test_same_input_same_bytes() {
    let tool = build(vec![
        Param::new("query"),
        Param::new("limit").typed("usize").with_default("10"),
        Param::new("tags").typed("Vec<String>"),
    ]);
    let annotations = HashMap::from([("query".to_string(), "Object".to_string())]);

    let first = serde_json::to_vec(&function_to_schema_with_annotations(&tool, &annotations)).unwrap();
    let second =
        serde_json::to_vec(&function_to_schema_with_annotations(&tool, &annotations)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_signature_limitations_fail_cleanly() {
    for text in ["({ id, name })", "(...args)", "([a, b] = [])", "(a, b"] {
        assert!(Signature::parse(text).is_err(), "{} should be rejected", text);
    }
}

#[test]
fn test_bracketed_default_is_not_destructuring() {
    let tool = Tool::builder("tag")
        .signature("(name, tags = [], meta: object = {})")
        .handler(|_| Ok(ToolOutput::data(Value::Null)))
        .build()
        .unwrap();
    let schema = function_to_schema(&tool);
    assert_eq!(schema.function.parameters.required, vec!["name"]);
    assert_eq!(schema.function.parameters.properties["meta"]["type"], "object");
}
