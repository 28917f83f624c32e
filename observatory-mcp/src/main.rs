//! Observatory MCP Server
//!
//! Line-delimited JSON-RPC 2.0 over stdin/stdout. Logs go to stderr.
//!
//! Tools:
//! - convert: Convert an amount between two units
//! - explain: Convert and show the route taken
//! - list_categories: List available categories
//! - list_units: List the units (and substances) of a category
//! - default_units: Starting units for a category

mod config;
mod tools;

use std::io::{self, BufRead, Write};

use observatory_units::{CategoryRegistry, REGISTRY};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use config::ServerConfig;

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "observatory";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const PARSE_ERROR: i32 = -32700;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

// MCP Protocol types
#[derive(Debug, Deserialize)]
struct McpRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
struct McpResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
pub(crate) struct McpError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl McpError {
    pub(crate) fn invalid_params(message: impl Into<String>) -> Self {
        McpError {
            code: INVALID_PARAMS,
            message: message.into(),
            data: None,
        }
    }
}

impl McpResponse {
    fn parse_error(message: String) -> Self {
        McpResponse {
            jsonrpc: "2.0".to_string(),
            id: None,
            result: None,
            error: Some(McpError {
                code: PARSE_ERROR,
                message,
                data: None,
            }),
        }
    }
}

fn init_logging(config: &ServerConfig) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn main() {
    let config = ServerConfig::from_env();
    init_logging(&config);
    let config = config.checked(&REGISTRY);

    info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "Observatory MCP Server started");
    info!(
        categories = REGISTRY.len(),
        default_category = %config.default_category,
        "Registry loaded"
    );

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("Client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                debug!(bytes = line.len(), "Received");

                let Some(response) = handle_line(&REGISTRY, &config, line) else {
                    continue;
                };

                let response_json = match serde_json::to_string(&response) {
                    Ok(s) => s,
                    Err(e) => {
                        error!(error = %e, "Error serializing response");
                        continue;
                    }
                };
                let mut stdout = io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{}", response_json).and_then(|_| stdout.flush()) {
                    error!(error = %e, "Error writing response");
                    break;
                }
            }
            Err(e) => {
                error!(error = %e, "Error reading input");
                break;
            }
        }
    }

    info!("Server shutting down");
}

/// Parse and dispatch one input line; notifications produce no response
fn handle_line(registry: &CategoryRegistry, config: &ServerConfig, line: &str) -> Option<McpResponse> {
    let request: McpRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "Error parsing request");
            return Some(McpResponse::parse_error(format!("Parse error: {}", e)));
        }
    };

    debug!(method = %request.method, "Processing");
    let response = handle_request(registry, config, &request);

    if request.id.is_none() {
        debug!(method = %request.method, "Notification processed (no response)");
        return None;
    }
    Some(response)
}

fn handle_request(registry: &CategoryRegistry, config: &ServerConfig, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" => Ok(json!({})),
        "notifications/initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => Ok(tools::tool_definitions()),
        "tools/call" => handle_tool_call(registry, config, &request.params),

        _ => Err(McpError {
            code: METHOD_NOT_FOUND,
            message: format!("Method not found: {}", request.method),
            data: None,
        }),
    };

    match result {
        Ok(r) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: Some(r),
            error: None,
        },
        Err(e) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: None,
            error: Some(e),
        },
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "Client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Unit conversion across length, mass, temperature, cooking and more"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Use list_categories to discover categories and list_units for the units of one. Cooking conversions need a substance. Use explain to show how a result was reached."
    }))
}

fn handle_tool_call(
    registry: &CategoryRegistry,
    config: &ServerConfig,
    params: &Option<JsonValue>,
) -> Result<JsonValue, McpError> {
    let params = params
        .as_ref()
        .ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    tools::call_tool(registry, config, name, &args)
}
