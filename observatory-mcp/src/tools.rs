//! MCP tools over the conversion engine
//!
//! Conversion failures are tool results with `isError: true`; only malformed
//! calls become JSON-RPC errors.

use observatory_core::ConversionError;
use observatory_units::{
    CategoryRegistry, ConversionRequest, ConversionResult, DefaultUnits,
};
use serde_json::{json, Value as JsonValue};
use tracing::debug;

use crate::config::ServerConfig;
use crate::McpError;

pub fn tool_definitions() -> JsonValue {
    let conversion_schema = json!({
        "type": "object",
        "properties": {
            "category": {
                "type": "string",
                "description": "Category key, e.g. length, temperature, cooking"
            },
            "from": {
                "type": "string",
                "description": "Source unit symbol or alias"
            },
            "to": {
                "type": "string",
                "description": "Target unit symbol or alias"
            },
            "amount": {
                "type": "number",
                "description": "Amount in the source unit"
            },
            "substance": {
                "type": "string",
                "description": "Ingredient for density categories (e.g. 'Flour (All Purpose)')"
            }
        },
        "required": ["category", "from", "to", "amount"]
    });

    json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert an amount between two units of the same category.",
                "inputSchema": conversion_schema
            },
            {
                "name": "explain",
                "description": "Convert and show the route through the category's base unit.",
                "inputSchema": conversion_schema
            },
            {
                "name": "list_categories",
                "description": "List categories with their kind and base unit.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "list_units",
                "description": "List the units of a category, and its substances for density categories.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Category key"
                        }
                    },
                    "required": ["category"]
                }
            },
            {
                "name": "default_units",
                "description": "Suggested starting units (and substance) for a category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Category key (defaults to the server's default category)"
                        }
                    }
                }
            }
        ]
    })
}

pub fn call_tool(
    registry: &CategoryRegistry,
    config: &ServerConfig,
    name: &str,
    args: &JsonValue,
) -> Result<JsonValue, McpError> {
    match name {
        "convert" => tool_convert(registry, args),
        "explain" => tool_explain(registry, args),
        "list_categories" => tool_list_categories(registry),
        "list_units" => tool_list_units(registry, args),
        "default_units" => tool_default_units(registry, config, args),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

fn tool_convert(registry: &CategoryRegistry, args: &JsonValue) -> Result<JsonValue, McpError> {
    let request = request_from_args(args)?;
    Ok(match registry.convert(&request) {
        Ok(result) => conversion_result(&request, &result),
        Err(e) => error_result(&e),
    })
}

fn tool_explain(registry: &CategoryRegistry, args: &JsonValue) -> Result<JsonValue, McpError> {
    let request = request_from_args(args)?;
    Ok(match registry.explain(&request) {
        Ok(explanation) => json!({
            "content": [{ "type": "text", "text": format!(
                "{}\n\nOne base unit covers {} unit pairs.",
                explanation.summary, explanation.pair_count
            ) }],
            "data": explanation,
            "isError": false
        }),
        Err(e) => error_result(&e),
    })
}

fn tool_list_categories(registry: &CategoryRegistry) -> Result<JsonValue, McpError> {
    let summaries = registry.summaries();
    let text = summaries
        .iter()
        .map(|s| format!("- {} ({}): {} units", s.key, s.display_name, s.unit_count))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "data": summaries
    }))
}

fn tool_list_units(registry: &CategoryRegistry, args: &JsonValue) -> Result<JsonValue, McpError> {
    let key = required_str(args, "category")?;
    let category = match registry.get_category(key) {
        Ok(c) => c,
        Err(e) => return Ok(error_result(&e)),
    };

    let units = category.units();
    let mut text = units
        .iter()
        .map(|u| format!("- {}: {}", u.symbol, u.label))
        .collect::<Vec<_>>()
        .join("\n");

    let mut data = json!({
        "category": category.key,
        "kind": category.kind(),
        "units": units,
    });
    if let Some(table) = category.density_table() {
        text.push_str(&format!("\n\nSubstances: {}", table.substance_names().join(", ")));
        data["substances"] = json!(table.substances);
        data["default_substance"] = json!(table.default_substance);
    }

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "data": data
    }))
}

fn tool_default_units(
    registry: &CategoryRegistry,
    config: &ServerConfig,
    args: &JsonValue,
) -> Result<JsonValue, McpError> {
    let key = args
        .get("category")
        .and_then(|v| v.as_str())
        .unwrap_or(config.default_category.as_str());

    Ok(match registry.default_units_for(key) {
        Ok(defaults) => json!({
            "content": [{ "type": "text", "text": describe_defaults(key, &defaults) }],
            "data": defaults
        }),
        Err(e) => error_result(&e),
    })
}

fn describe_defaults(key: &str, defaults: &DefaultUnits) -> String {
    match &defaults.substance {
        Some(substance) => format!("{}: {} -> {} ({})", key, defaults.from, defaults.to, substance),
        None => format!("{}: {} -> {}", key, defaults.from, defaults.to),
    }
}

/// Build a request from tool arguments; missing fields are bad params
fn request_from_args(args: &JsonValue) -> Result<ConversionRequest, McpError> {
    let category = required_str(args, "category")?;
    let from = required_str(args, "from")?;
    let to = required_str(args, "to")?;
    let amount = amount_arg(args)?;

    let mut request = ConversionRequest::new(category, from, to, amount);
    request.substance = args
        .get("substance")
        .and_then(|v| v.as_str())
        .map(str::to_string);
    Ok(request)
}

fn required_str<'a>(args: &'a JsonValue, field: &str) -> Result<&'a str, McpError> {
    args.get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params(format!("Missing {} argument", field)))
}

/// Amount as a JSON number, or a numeric string ("1e3", "NaN")
fn amount_arg(args: &JsonValue) -> Result<f64, McpError> {
    match args.get("amount") {
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .ok_or_else(|| McpError::invalid_params("amount is not representable")),
        Some(JsonValue::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| McpError::invalid_params(format!("amount '{}' is not a number", s))),
        Some(_) => Err(McpError::invalid_params("amount must be a number")),
        None => Err(McpError::invalid_params("Missing amount argument")),
    }
}

fn conversion_result(request: &ConversionRequest, result: &ConversionResult) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": format!(
            "{} {} = {} {}",
            request.amount, request.from_unit, result.formatted, request.to_unit
        ) }],
        "data": result,
        "isError": false
    })
}

fn error_result(error: &ConversionError) -> JsonValue {
    debug!(code = error.code(), "tool call rejected");
    let body = json!({
        "code": error.code(),
        "message": error.to_string(),
        "suggestion": error.suggestion(),
    });
    json!({
        "content": [{ "type": "text", "text": format!("Error: {}\n{}", error, error.suggestion()) }],
        "data": body,
        "isError": true
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: JsonValue) -> JsonValue {
        let registry = CategoryRegistry::builtin();
        call_tool(&registry, &ServerConfig::default(), name, &args).unwrap()
    }

    #[test]
    fn test_convert_tool() {
        let r = call("convert", json!({"category": "temperature", "from": "C", "to": "F", "amount": 100}));
        assert_eq!(r["isError"], false);
        assert_eq!(r["data"]["value"], 212.0);
        assert_eq!(r["data"]["formatted"], "212");
    }

    #[test]
    fn test_convert_density_tool() {
        let r = call("convert", json!({
            "category": "cooking", "from": "cup", "to": "g", "amount": 1,
            "substance": "Flour (All Purpose)"
        }));
        assert_eq!(r["data"]["value"], 120.0);
    }

    #[test]
    fn test_conversion_errors_are_results() {
        let r = call("convert", json!({"category": "length", "from": "m", "to": "parsecs", "amount": 1}));
        assert_eq!(r["isError"], true);
        assert_eq!(r["data"]["code"], "UNKNOWN_UNIT");
        assert!(r["data"]["suggestion"].as_str().unwrap().contains("list_units"));

        let r = call("convert", json!({"category": "length", "from": "m", "to": "ft", "amount": "NaN"}));
        assert_eq!(r["data"]["code"], "INVALID_AMOUNT");
    }

    #[test]
    fn test_missing_arguments_are_bad_params() {
        let registry = CategoryRegistry::builtin();
        let err = call_tool(
            &registry,
            &ServerConfig::default(),
            "convert",
            &json!({"category": "length", "from": "m"}),
        )
        .unwrap_err();
        assert_eq!(err.code, -32602);
    }

    #[test]
    fn test_explain_tool() {
        let r = call("explain", json!({"category": "length", "from": "km", "to": "m", "amount": 1}));
        assert_eq!(r["data"]["route"]["via"], "via_base");
        assert_eq!(r["data"]["pair_count"], 72);
    }

    #[test]
    fn test_list_categories_tool() {
        let r = call("list_categories", json!({}));
        let data = r["data"].as_array().unwrap();
        assert_eq!(data.len(), 20);
        assert_eq!(data[0]["key"], "length");
        assert_eq!(data[2]["kind"], "affine");
    }

    #[test]
    fn test_list_units_tool() {
        let r = call("list_units", json!({"category": "cooking"}));
        assert_eq!(r["data"]["kind"], "density");
        assert_eq!(r["data"]["units"][0]["symbol"], "cup");
        assert_eq!(r["data"]["default_substance"], "Flour (All Purpose)");

        let r = call("list_units", json!({"category": "nonexistent"}));
        assert_eq!(r["data"]["code"], "UNKNOWN_CATEGORY");
    }

    #[test]
    fn test_default_units_tool() {
        let r = call("default_units", json!({}));
        assert_eq!(r["data"]["from"], "m");

        let r = call("default_units", json!({"category": "cooking"}));
        assert_eq!(r["data"]["substance"], "Flour (All Purpose)");
    }
}
