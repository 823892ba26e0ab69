//! MCP tool table and argument coercion.
//!
//! Responsibilities:
//! - Describe every tool (name, description, JSON Schema input).
//! - Coerce loosely typed arguments into API requests.
//! - Map each tool to exactly one client call.
//!
//! Invariants:
//! - Numeric strings are accepted where numbers are expected, and
//!   `"true"`/`"false"` where booleans are expected.
//! - Unknown tool names are reported as [`ToolError::UnknownTool`] and never
//!   reach the API.

use std::collections::BTreeMap;

use runloop_client::{
    ClientError, CreateDevboxRequest, ExecutionRequest, LaunchParameters, ListParams,
    RunloopClient,
};
use runloop_config::constants::DEFAULT_LIST_LIMIT;
use serde::Serialize;
use serde_json::{Map, Value, json};

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },

    #[error(transparent)]
    Api(#[from] ClientError),

    #[error("Failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ToolError {
    fn invalid(name: &str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Clone, Copy)]
enum ParamType {
    String,
    Integer,
    Boolean,
    Object,
    StringArray,
}

impl ParamType {
    fn schema(self) -> Value {
        match self {
            Self::String => json!({"type": "string"}),
            Self::Integer => json!({"type": "integer"}),
            Self::Boolean => json!({"type": "boolean"}),
            Self::Object => json!({"type": "object", "additionalProperties": {"type": "string"}}),
            Self::StringArray => json!({"type": "array", "items": {"type": "string"}}),
        }
    }
}

struct Param {
    name: &'static str,
    kind: ParamType,
    required: bool,
    description: &'static str,
}

const fn param(
    name: &'static str,
    kind: ParamType,
    required: bool,
    description: &'static str,
) -> Param {
    Param {
        name,
        kind,
        required,
        description,
    }
}

struct ToolDef {
    name: &'static str,
    description: &'static str,
    params: &'static [Param],
}

const ID: Param = param("id", ParamType::String, true, "Resource ID");
const LIMIT: Param = param("limit", ParamType::Integer, false, "Maximum items to return");
const STARTING_AFTER: Param = param(
    "starting_after",
    ParamType::String,
    false,
    "Return items after this ID",
);

const TOOLS: &[ToolDef] = &[
    ToolDef {
        name: "list_devboxes",
        description: "List devboxes, newest first",
        params: &[
            LIMIT,
            STARTING_AFTER,
            param("status", ParamType::String, false, "Only devboxes in this status"),
            param("search", ParamType::String, false, "Free-text search"),
        ],
    },
    ToolDef {
        name: "get_devbox",
        description: "Get one devbox",
        params: &[ID],
    },
    ToolDef {
        name: "create_devbox",
        description: "Create a devbox",
        params: &[
            param("name", ParamType::String, false, "Devbox name"),
            param("blueprint_id", ParamType::String, false, "Blueprint to boot from"),
            param("blueprint_name", ParamType::String, false, "Blueprint to boot from, by name"),
            param("snapshot_id", ParamType::String, false, "Disk snapshot to boot from"),
            param("entrypoint", ParamType::String, false, "Command run at start"),
            param("environment_variables", ParamType::Object, false, "Environment variables"),
            param("launch_commands", ParamType::StringArray, false, "Commands run at launch"),
            param("resource_size", ParamType::String, false, "Resource size, e.g. SMALL"),
            param("architecture", ParamType::String, false, "x86_64 or arm64"),
            param("keep_alive_time_seconds", ParamType::Integer, false, "Idle keep-alive"),
        ],
    },
    ToolDef {
        name: "execute_command",
        description: "Run a shell command in a devbox and wait for the result",
        params: &[
            ID,
            param("command", ParamType::String, true, "Command to run"),
            param("shell_name", ParamType::String, false, "Named shell session"),
        ],
    },
    ToolDef {
        name: "shutdown_devbox",
        description: "Shut a devbox down",
        params: &[ID],
    },
    ToolDef {
        name: "suspend_devbox",
        description: "Suspend a running devbox",
        params: &[ID],
    },
    ToolDef {
        name: "resume_devbox",
        description: "Resume a suspended devbox",
        params: &[ID],
    },
    ToolDef {
        name: "get_devbox_logs",
        description: "Get devbox logs",
        params: &[
            ID,
            param("execution_id", ParamType::String, false, "Only this execution"),
        ],
    },
    ToolDef {
        name: "list_blueprints",
        description: "List blueprints",
        params: &[
            LIMIT,
            STARTING_AFTER,
            param("name", ParamType::String, false, "Only blueprints with this name"),
        ],
    },
    ToolDef {
        name: "get_blueprint",
        description: "Get one blueprint",
        params: &[ID],
    },
    ToolDef {
        name: "list_snapshots",
        description: "List disk snapshots",
        params: &[
            LIMIT,
            STARTING_AFTER,
            param("devbox_id", ParamType::String, false, "Only snapshots of this devbox"),
        ],
    },
    ToolDef {
        name: "create_snapshot",
        description: "Start a disk snapshot of a devbox",
        params: &[ID, param("name", ParamType::String, false, "Snapshot name")],
    },
    ToolDef {
        name: "list_secrets",
        description: "List secret names (values are never returned)",
        params: &[LIMIT, STARTING_AFTER],
    },
    ToolDef {
        name: "list_objects",
        description: "List storage objects",
        params: &[
            LIMIT,
            STARTING_AFTER,
            param("name", ParamType::String, false, "Only objects with this name"),
            param("public", ParamType::Boolean, false, "List public objects"),
        ],
    },
    ToolDef {
        name: "get_object",
        description: "Get one storage object",
        params: &[ID],
    },
];

/// `tools/list` payload.
pub fn tool_list() -> Value {
    let tools: Vec<Value> = TOOLS
        .iter()
        .map(|tool| {
            let properties: Map<String, Value> = tool
                .params
                .iter()
                .map(|p| {
                    let mut schema = p.kind.schema();
                    schema["description"] = Value::from(p.description);
                    (p.name.to_string(), schema)
                })
                .collect();
            let required: Vec<&str> = tool
                .params
                .iter()
                .filter(|p| p.required)
                .map(|p| p.name)
                .collect();
            json!({
                "name": tool.name,
                "description": tool.description,
                "inputSchema": {
                    "type": "object",
                    "properties": properties,
                    "required": required,
                },
            })
        })
        .collect();
    json!({ "tools": tools })
}

pub fn is_known(name: &str) -> bool {
    TOOLS.iter().any(|t| t.name == name)
}

/// Tool arguments with lenient typing.
pub struct Args<'a>(&'a Map<String, Value>);

impl<'a> Args<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self(map)
    }

    fn present(&self, name: &str) -> Option<&'a Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    pub fn opt_str(&self, name: &str) -> Result<Option<String>, ToolError> {
        match self.present(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(_) => Err(ToolError::invalid(name, "expected a string")),
        }
    }

    pub fn str(&self, name: &str) -> Result<String, ToolError> {
        self.opt_str(name)?
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ToolError::invalid(name, "is required"))
    }

    pub fn opt_u64(&self, name: &str) -> Result<Option<u64>, ToolError> {
        match self.present(name) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_u64()
                .map(Some)
                .ok_or_else(|| ToolError::invalid(name, "expected a non-negative integer")),
            Some(Value::String(s)) => s
                .trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|_| ToolError::invalid(name, format!("'{s}' is not an integer"))),
            Some(_) => Err(ToolError::invalid(name, "expected an integer")),
        }
    }

    pub fn opt_bool(&self, name: &str) -> Result<Option<bool>, ToolError> {
        match self.present(name) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(ToolError::invalid(name, format!("'{s}' is not a boolean"))),
            },
            Some(_) => Err(ToolError::invalid(name, "expected a boolean")),
        }
    }

    pub fn opt_string_list(&self, name: &str) -> Result<Option<Vec<String>>, ToolError> {
        match self.present(name) {
            None => Ok(None),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    _ => Err(ToolError::invalid(name, "expected an array of strings")),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Some(Value::String(s)) => Ok(Some(vec![s.clone()])),
            Some(_) => Err(ToolError::invalid(name, "expected an array of strings")),
        }
    }

    pub fn string_map(&self, name: &str) -> Result<BTreeMap<String, String>, ToolError> {
        match self.present(name) {
            None => Ok(BTreeMap::new()),
            Some(Value::Object(map)) => map
                .iter()
                .map(|(k, v)| match v {
                    Value::String(s) => Ok((k.clone(), s.clone())),
                    Value::Number(_) | Value::Bool(_) => Ok((k.clone(), v.to_string())),
                    _ => Err(ToolError::invalid(name, format!("value of '{k}' must be a string"))),
                })
                .collect(),
            Some(_) => Err(ToolError::invalid(name, "expected an object")),
        }
    }

    fn list_params(&self) -> Result<ListParams, ToolError> {
        let limit = self.opt_u64("limit")?.map_or(DEFAULT_LIST_LIMIT, |l| l as usize);
        Ok(ListParams::new()
            .limit(limit)
            .starting_after(self.opt_str("starting_after")?))
    }
}

fn to_value<T: Serialize>(value: T) -> Result<Value, ToolError> {
    Ok(serde_json::to_value(value)?)
}

fn create_devbox_request(args: &Args<'_>) -> Result<CreateDevboxRequest, ToolError> {
    let request = CreateDevboxRequest {
        name: args.opt_str("name")?,
        entrypoint: args.opt_str("entrypoint")?,
        environment_variables: args.string_map("environment_variables")?,
        blueprint_id: args.opt_str("blueprint_id")?,
        blueprint_name: args.opt_str("blueprint_name")?,
        snapshot_id: args.opt_str("snapshot_id")?,
        launch_parameters: LaunchParameters {
            resource_size_request: args.opt_str("resource_size")?,
            architecture: args.opt_str("architecture")?,
            launch_commands: args.opt_string_list("launch_commands")?,
            keep_alive_time_seconds: args.opt_u64("keep_alive_time_seconds")?,
            ..LaunchParameters::default()
        },
        ..CreateDevboxRequest::default()
    };
    request.validate()?;
    Ok(request)
}

/// Run `name` with `arguments`; one API call per tool.
pub async fn call(
    client: &RunloopClient,
    name: &str,
    arguments: &Map<String, Value>,
) -> Result<Value, ToolError> {
    let args = Args::new(arguments);
    match name {
        "list_devboxes" => {
            let params = args
                .list_params()?
                .search(args.opt_str("search")?)
                .filter_opt("status", args.opt_str("status")?);
            to_value(client.list_devboxes(&params).await?)
        }
        "get_devbox" => to_value(client.get_devbox(&args.str("id")?).await?),
        "create_devbox" => {
            let request = create_devbox_request(&args)?;
            to_value(client.create_devbox(&request).await?)
        }
        "execute_command" => {
            let request = ExecutionRequest {
                command: args.str("command")?,
                shell_name: args.opt_str("shell_name")?,
            };
            to_value(client.execute_sync(&args.str("id")?, &request).await?)
        }
        "shutdown_devbox" => to_value(client.shutdown_devbox(&args.str("id")?).await?),
        "suspend_devbox" => to_value(client.suspend_devbox(&args.str("id")?).await?),
        "resume_devbox" => to_value(client.resume_devbox(&args.str("id")?).await?),
        "get_devbox_logs" => {
            let execution_id = args.opt_str("execution_id")?;
            to_value(
                client
                    .get_devbox_logs(&args.str("id")?, execution_id.as_deref())
                    .await?,
            )
        }
        "list_blueprints" => {
            let params = args.list_params()?.filter_opt("name", args.opt_str("name")?);
            to_value(client.list_blueprints(&params).await?)
        }
        "get_blueprint" => to_value(client.get_blueprint(&args.str("id")?).await?),
        "list_snapshots" => {
            let params = args
                .list_params()?
                .filter_opt("devbox_id", args.opt_str("devbox_id")?);
            to_value(client.list_snapshots(&params).await?)
        }
        "create_snapshot" => {
            let snapshot_name = args.opt_str("name")?;
            to_value(
                client
                    .snapshot_disk_async(&args.str("id")?, snapshot_name.as_deref())
                    .await?,
            )
        }
        "list_secrets" => to_value(client.list_secrets(&args.list_params()?).await?),
        "list_objects" => {
            let params = args.list_params()?.filter_opt("name", args.opt_str("name")?);
            let public = args.opt_bool("public")?.unwrap_or(false);
            to_value(client.list_objects(&params, public).await?)
        }
        "get_object" => to_value(client.get_object(&args.str("id")?).await?),
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_tool_list_covers_every_tool() {
        let list = tool_list();
        let names: Vec<&str> = list["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names.len(), 15);
        assert!(names.contains(&"execute_command"));
        assert!(names.contains(&"create_snapshot"));

        let exec = &list["tools"][3];
        assert_eq!(exec["inputSchema"]["required"], json!(["id", "command"]));
    }

    #[test]
    fn test_numeric_and_boolean_strings_coerced() {
        let raw = map(json!({"limit": "5", "public": "true", "keep": 3}));
        let args = Args::new(&raw);
        assert_eq!(args.opt_u64("limit").unwrap(), Some(5));
        assert_eq!(args.opt_bool("public").unwrap(), Some(true));
        assert_eq!(args.opt_str("keep").unwrap().as_deref(), Some("3"));
        assert!(Args::new(&map(json!({"limit": "five"}))).opt_u64("limit").is_err());
        assert!(Args::new(&map(json!({"public": "yes"}))).opt_bool("public").is_err());
    }

    #[test]
    fn test_required_string_rejects_missing_and_blank() {
        let raw = map(json!({"id": "  "}));
        assert!(Args::new(&raw).str("id").is_err());
        assert!(Args::new(&Map::new()).str("id").is_err());
    }

    #[test]
    fn test_create_devbox_request_validation() {
        let raw = map(json!({
            "name": "agent",
            "environment_variables": {"DEBUG": "1", "PORT": 8080},
            "launch_commands": "make setup",
            "keep_alive_time_seconds": "600"
        }));
        let request = create_devbox_request(&Args::new(&raw)).unwrap();
        assert_eq!(request.environment_variables["PORT"], "8080");
        assert_eq!(
            request.launch_parameters.launch_commands,
            Some(vec!["make setup".to_string()])
        );
        assert_eq!(request.launch_parameters.keep_alive_time_seconds, Some(600));

        let conflicting = map(json!({"blueprint_id": "bpt_1", "architecture": "arm64"}));
        assert!(create_devbox_request(&Args::new(&conflicting)).is_err());
    }

    #[test]
    fn test_unknown_tool_detection() {
        assert!(is_known("get_object"));
        assert!(!is_known("drop_database"));
    }
}
