//! Tool schema generation
//!
//! Turns a [`Tool`]'s name, description and parameter descriptors into the
//! `{"type": "function", ...}` object the completion API expects. Schemas are
//! derived on demand and never cached.

use std::collections::HashMap;

use serde_json::json;

use crate::core::{ParametersSchema, Result, SwarmError, ToolDefinition};
use crate::tools::tool::{Param, Tool};

/// Name used when a tool has none
pub const ANONYMOUS: &str = "anonymous";

/// A tool schema is the definition sent to the completion API
pub type ToolSchema = ToolDefinition;

/// JSON Schema primitive types a parameter can map to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaType {
    String,
    /// Integers and floats alike
    Number,
    Boolean,
    Array,
    Object,
}

impl SchemaType {
    /// JSON Schema spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
        }
    }
}

impl std::fmt::Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const TYPE_TABLE: &[(&str, SchemaType)] = &[
    ("String", SchemaType::String),
    ("string", SchemaType::String),
    ("str", SchemaType::String),
    ("&str", SchemaType::String),
    ("Number", SchemaType::Number),
    ("number", SchemaType::Number),
    ("integer", SchemaType::Number),
    ("int", SchemaType::Number),
    ("float", SchemaType::Number),
    ("i8", SchemaType::Number),
    ("i16", SchemaType::Number),
    ("i32", SchemaType::Number),
    ("i64", SchemaType::Number),
    ("isize", SchemaType::Number),
    ("u8", SchemaType::Number),
    ("u16", SchemaType::Number),
    ("u32", SchemaType::Number),
    ("u64", SchemaType::Number),
    ("usize", SchemaType::Number),
    ("f32", SchemaType::Number),
    ("f64", SchemaType::Number),
    ("Boolean", SchemaType::Boolean),
    ("boolean", SchemaType::Boolean),
    ("bool", SchemaType::Boolean),
    ("Array", SchemaType::Array),
    ("array", SchemaType::Array),
    ("Vec", SchemaType::Array),
    ("list", SchemaType::Array),
    ("Object", SchemaType::Object),
    ("object", SchemaType::Object),
    ("Map", SchemaType::Object),
    ("HashMap", SchemaType::Object),
    ("map", SchemaType::Object),
];

/// Map a declared type annotation to a schema type; unknown or missing means string
pub fn resolve_type(declared: Option<&str>) -> SchemaType {
    let Some(declared) = declared else {
        return SchemaType::String;
    };

    // `Vec<String>` resolves through its outer type
    let base = declared.split('<').next().unwrap_or_default().trim();

    TYPE_TABLE
        .iter()
        .find(|(name, _)| *name == base)
        .map(|(_, schema_type)| *schema_type)
        .unwrap_or(SchemaType::String)
}

/// Build the schema for a tool using its own declared types
pub fn function_to_schema(tool: &Tool) -> ToolSchema {
    function_to_schema_with_annotations(tool, &HashMap::new())
}

/// Build the schema for a tool; entries in `annotations` override declared types
pub fn function_to_schema_with_annotations(
    tool: &Tool,
    annotations: &HashMap<String, String>,
) -> ToolSchema {
    let name = if tool.name().is_empty() {
        ANONYMOUS
    } else {
        tool.name()
    };

    let mut parameters = ParametersSchema::default();

    for param in tool.params() {
        let declared = annotations
            .get(&param.name)
            .map(String::as_str)
            .or(param.declared_type.as_deref());

        parameters.properties.insert(
            param.name.clone(),
            json!({ "type": resolve_type(declared).as_str() }),
        );

        if param.is_required() {
            parameters.required.push(param.name.clone());
        }
    }

    ToolDefinition::function(name, tool.description(), parameters)
}

/// Parser for textual parameter lists
pub struct Signature;

impl Signature {
    /// Parse `(a, b: number, c = 3)` into parameter descriptors
    ///
    /// Only the first parenthesised group is read; text without parentheses is
    /// treated as the bare list. Anything after `=` counts as a default.
    /// Destructured and variadic parameters, and bare arrow expressions such as
    /// `x => x`, are rejected.
    pub fn parse(text: &str) -> Result<Vec<Param>> {
        let list = match text.find('(') {
            Some(open) => {
                let rest = &text[open + 1..];
                let close = rest.find(')').ok_or_else(|| {
                    SwarmError::schema(format!("unclosed parameter list in '{}'", text.trim()))
                })?;
                &rest[..close]
            }
            None => text,
        };

        list.split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(Self::parse_param)
            .collect()
    }

    fn parse_param(piece: &str) -> Result<Param> {
        let (head, default) = match piece.split_once('=') {
            Some((_, rest)) if rest.starts_with('>') => {
                return Err(SwarmError::schema(format!(
                    "arrow expression '{}' is not a parameter list",
                    piece
                )));
            }
            Some((head, default)) => (head.trim(), Some(default.trim())),
            None => (piece, None),
        };

        // Only the name side is checked; `items = []` is an ordinary default
        if head.starts_with("...") || head.contains(['{', '}', '[', ']']) {
            return Err(SwarmError::schema(format!(
                "destructured or variadic parameter '{}' is not supported",
                piece
            )));
        }

        let (name, declared_type) = match head.split_once(':') {
            Some((name, ty)) => (name.trim(), Some(ty.trim())),
            None => (head.trim(), None),
        };

        let valid_name = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '$');
        if !valid_name {
            return Err(SwarmError::schema(format!(
                "cannot read a parameter name from '{}'",
                piece
            )));
        }

        let mut param = Param::new(name);
        if let Some(ty) = declared_type.filter(|ty| !ty.is_empty()) {
            param = param.typed(ty);
        }
        if let Some(default) = default {
            param = param.with_default(default);
        }
        Ok(param)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolOutput;
    use serde_json::Value;

    fn tool_with(params: Vec<Param>) -> Tool {
        params
            .into_iter()
            .fold(Tool::builder("sample").description("A sample"), |b, p| {
                b.param(p)
            })
            .handler(|_| Ok(ToolOutput::data(Value::Null)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_required_excludes_defaults_in_order() {
        let tool = tool_with(vec![
            Param::new("a"),
            Param::new("b").with_default("1"),
            Param::new("c"),
            Param::new("d").with_default("\"x\""),
            Param::new("e"),
        ]);
        let schema = function_to_schema(&tool);
        let params = &schema.function.parameters;
        assert_eq!(params.properties.len(), 5);
        assert_eq!(params.required, vec!["a", "c", "e"]);
    }

    #[test]
    fn test_no_params() {
        let schema = function_to_schema(&tool_with(vec![]));
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "function",
                "function": {
                    "name": "sample",
                    "description": "A sample",
                    "parameters": {"type": "object", "properties": {}, "required": []}
                }
            })
        );
    }

    #[test]
    fn test_type_resolution() {
        assert_eq!(resolve_type(None), SchemaType::String);
        assert_eq!(resolve_type(Some("Number")), SchemaType::Number);
        assert_eq!(resolve_type(Some("i64")), SchemaType::Number);
        assert_eq!(resolve_type(Some("bool")), SchemaType::Boolean);
        assert_eq!(resolve_type(Some("Vec<String>")), SchemaType::Array);
        assert_eq!(resolve_type(Some("HashMap")), SchemaType::Object);
        assert_eq!(resolve_type(Some("Date")), SchemaType::String);
        assert_eq!(resolve_type(Some("null")), SchemaType::String);
    }

    #[test]
    fn test_annotations_override_declared_types() {
        let tool = tool_with(vec![Param::new("count").typed("string"), Param::new("flag")]);
        let annotations = HashMap::from([
            ("count".to_string(), "Number".to_string()),
            ("flag".to_string(), "Boolean".to_string()),
        ]);
        let schema = function_to_schema_with_annotations(&tool, &annotations);
        let props = &schema.function.parameters.properties;
        assert_eq!(props["count"]["type"], "number");
        assert_eq!(props["flag"]["type"], "boolean");
    }

    #[test]
    fn test_schema_is_stable() {
        let tool = tool_with(vec![
            Param::new("zeta"),
            Param::new("alpha").typed("number"),
            Param::new("mid").with_default("0"),
        ]);
        let first = serde_json::to_string(&function_to_schema(&tool)).unwrap();
        let second = serde_json::to_string(&function_to_schema(&tool)).unwrap();
        assert_eq!(first, second);
        // declaration order, not alphabetical
        assert!(first.find("zeta").unwrap() < first.find("alpha").unwrap());
    }

    #[test]
    fn test_anonymous_name() {
        let tool = Tool::builder("")
            .handler(|_| Ok(ToolOutput::data(Value::Null)))
            .build()
            .unwrap();
        assert_eq!(function_to_schema(&tool).function.name, ANONYMOUS);
    }

    #[test]
    fn test_signature_parse() {
        let params = Signature::parse("function execute_refund(item_id, reason = \"not provided\")")
            .unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0], Param::new("item_id"));
        assert_eq!(params[1].name, "reason");
        assert_eq!(params[1].default.as_deref(), Some("\"not provided\""));
    }

    #[test]
    fn test_signature_annotations_and_bare_lists() {
        let params = Signature::parse("count: number, verbose: bool = false").unwrap();
        assert_eq!(params[0].declared_type.as_deref(), Some("number"));
        assert!(params[0].is_required());
        assert_eq!(params[1].declared_type.as_deref(), Some("bool"));
        assert!(!params[1].is_required());
    }

    #[test]
    fn test_signature_any_default_text_counts() {
        let params = Signature::parse("(x = )").unwrap();
        assert!(!params[0].is_required());
        let params = Signature::parse("(x = not valid at all)").unwrap();
        assert!(!params[0].is_required());
    }

    #[test]
    fn test_signature_bracketed_defaults_are_optional() {
        for text in ["(items = [])", "(opts = {})", "(label = \"[draft]\")"] {
            let params = Signature::parse(text).unwrap();
            assert_eq!(params.len(), 1, "{}", text);
            assert!(!params[0].is_required(), "{}", text);
        }
        let params = Signature::parse("(items = [])").unwrap();
        assert_eq!(params[0].name, "items");
        assert_eq!(params[0].default_value(), Some(serde_json::json!([])));
    }

    #[test]
    fn test_signature_rejects_arrow_expressions() {
        let err = Signature::parse("x => x").unwrap_err();
        assert!(matches!(err, SwarmError::Schema(_)));
        assert!(Signature::parse("(a, b) => a + b").unwrap()[1].is_required());
    }

    #[test]
    fn test_signature_empty() {
        assert!(Signature::parse("()").unwrap().is_empty());
        assert!(Signature::parse("transfer_back_to_triage()").unwrap().is_empty());
        assert!(Signature::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_signature_rejects_unsupported_forms() {
        assert!(Signature::parse("({ a, b })").is_err());
        assert!(Signature::parse("([first, second])").is_err());
        assert!(Signature::parse("(...rest)").is_err());
        assert!(Signature::parse("(a, b").is_err());
    }
}
