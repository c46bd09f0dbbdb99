//! Tools module - tool descriptors, schema generation, and dispatch

pub mod registry;
pub mod schema;
pub mod tool;

pub use registry::ToolRegistry;
pub use schema::{
    function_to_schema, function_to_schema_with_annotations, resolve_type, SchemaType, Signature,
    ToolSchema,
};
pub use tool::{Arguments, Param, Tool, ToolBuilder, ToolHandler, ToolOutput};
