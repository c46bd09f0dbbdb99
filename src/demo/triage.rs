//! Triage example
//!
//! A triage agent routes a refund request: it hands off to inventory to find
//! the item ID, takes control back, then hands off to refunds.
//! The agents refer to each other, so each one is built by a function that the
//! handoff tools call when they fire.

use serde_json::json;

use crate::agent::Agent;
use crate::core::{Message, Result, ToolCall};
use crate::tools::{Param, Tool, ToolOutput};

/// Item ID returned by every lookup
pub const ITEM_ID: &str = "item_00000";

/// Triage agent: routes requests to inventory and refunds
pub fn triage_agent(model: &str) -> Result<Agent> {
    Ok(Agent::builder()
        .name("Triage Agent")
        .model(model)
        .instructions(
            "Analyze the user's request and determine the appropriate course of action.\n\
             - If the request involves a refund, first obtain the item ID from the Inventory Agent.\n\
             - After obtaining the item ID, transfer to the Refunds Agent to process the refund.\n\
             - Ensure that all necessary information is gathered before processing.",
        )
        .tool(transfer_to_inventory_agent(model)?)
        .tool(transfer_to_refunds_agent(model)?)
        .build())
}

/// Inventory agent: finds item IDs
pub fn inventory_agent(model: &str) -> Result<Agent> {
    Ok(Agent::builder()
        .name("Inventory Agent")
        .model(model)
        .instructions(
            "Assist with finding item IDs for refunding items, then transfer back to triage.",
        )
        .tool(look_up_item()?)
        .tool(transfer_back_to_triage(model)?)
        .build())
}

/// Refunds agent: issues refunds by item ID
pub fn refunds_agent(model: &str) -> Result<Agent> {
    Ok(Agent::builder()
        .name("Refunds Agent")
        .model(model)
        .instructions(
            "Assist with issuing refunds using an item ID, then transfer back to triage.",
        )
        .tool(execute_refund()?)
        .tool(transfer_back_to_triage(model)?)
        .build())
}

fn look_up_item() -> Result<Tool> {
    Tool::builder("look_up_item")
        .description("Use to find an item ID. Search query can be a description or keywords.")
        .param(Param::new("search_query"))
        .handler(|_args| Ok(ToolOutput::data(ITEM_ID)))
        .build()
}

fn execute_refund() -> Result<Tool> {
    Tool::builder("execute_refund")
        .description("Use to issue a refund by item ID.")
        .signature("(item_id, reason = \"not provided\")")
        .handler(|args| {
            let item_id = args.require_string("item_id")?;
            let reason = args.get_string("reason").unwrap_or_default();
            log::info!("[REFUND] Summary: {}; {};", item_id, reason);
            Ok(ToolOutput::data("Success"))
        })
        .build()
}

fn transfer_back_to_triage(model: &str) -> Result<Tool> {
    let model = model.to_string();
    Tool::builder("transfer_back_to_triage")
        .description(
            "Call this function if a user is asking about a topic that is not handled by the current agent.",
        )
        .handler(move |_args| Ok(ToolOutput::handoff(triage_agent(&model)?)))
        .build()
}

fn transfer_to_inventory_agent(model: &str) -> Result<Tool> {
    let model = model.to_string();
    Tool::builder("transfer_to_inventory_agent")
        .description("Transfers to the Inventory Agent.")
        .handler(move |_args| Ok(ToolOutput::handoff(inventory_agent(&model)?)))
        .build()
}

fn transfer_to_refunds_agent(model: &str) -> Result<Tool> {
    let model = model.to_string();
    Tool::builder("transfer_to_refunds_agent")
        .description("Transfers to the Refunds Agent.")
        .handler(move |_args| Ok(ToolOutput::handoff(refunds_agent(&model)?)))
        .build()
}

/// Assistant replies that walk the triage agents through a christmas-tree refund
pub fn christmas_tree_script() -> Vec<Message> {
    let call = |id: &str, name: &str, arguments: serde_json::Value| {
        Message::assistant_with_tool_calls(vec![ToolCall::new(id, name, arguments.to_string())])
    };

    vec![
        call("call_1", "transfer_to_inventory_agent", json!({})),
        call(
            "call_2",
            "look_up_item",
            json!({ "search_query": "christmas tree" }),
        ),
        call("call_3", "transfer_back_to_triage", json!({})),
        call("call_4", "transfer_to_refunds_agent", json!({})),
        call(
            "call_5",
            "execute_refund",
            json!({ "item_id": ITEM_ID, "reason": "Customer wants to return the christmas tree" }),
        ),
        Message::assistant(format!(
            "Your refund for the christmas tree ({}) was processed successfully.",
            ITEM_ID
        )),
    ]
}
