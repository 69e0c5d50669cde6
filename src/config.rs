use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "EXAMPLE_MCP_CONFIG";

const CONFIG_FILE_NAME: &str = "example-mcp-server.json";

const DEFAULT_INSTRUCTIONS: &str = "Example MCP server exposing application status, \
     user lookup and item creation tools.";

/// Server configuration, read from an optional JSON file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    /// Instructions advertised to clients during initialization.
    pub instructions: String,
    /// Names of bundled tools that should not be registered.
    pub disabled_tools: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            disabled_tools: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Returns `false` if the tool is listed in `disabledTools`.
    pub fn is_tool_enabled(&self, name: &str) -> bool {
        !self.disabled_tools.iter().any(|t| t == name)
    }

    /// Parse a config from its JSON text, expanding `${VAR}` references.
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let mut cfg: ServerConfig = serde_json::from_str(raw)?;
        cfg.instructions = expand_env_vars(&cfg.instructions);
        Ok(cfg)
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
        Self::from_json(&raw)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }
}

/// Locate a config file.
///
/// An explicit path (flag or `EXAMPLE_MCP_CONFIG`) always wins and must
/// exist. Otherwise the XDG config dir and the working directory are tried.
/// Returns `Ok(None)` when no file is found.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> anyhow::Result<Option<PathBuf>> {
    let explicit = explicit.or_else(|| env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from));
    if let Some(p) = explicit {
        if !p.exists() {
            return Err(anyhow::anyhow!(
                "Config file {} does not exist",
                p.display()
            ));
        }
        return Ok(Some(p));
    }

    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let candidate = PathBuf::from(xdg)
            .join("example-mcp-server")
            .join("config.json");
        if candidate.exists() {
            return Ok(Some(candidate));
        }
    }

    let candidate = PathBuf::from(CONFIG_FILE_NAME);
    if candidate.exists() {
        return Ok(Some(candidate));
    }

    Ok(None)
}

/// Resolve and load the server configuration, falling back to defaults.
pub fn load_server_config(explicit: Option<PathBuf>) -> anyhow::Result<ServerConfig> {
    match resolve_config_path(explicit)? {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading server config");
            ServerConfig::from_file(&path)
        }
        None => {
            tracing::debug!("No config file found; using defaults");
            Ok(ServerConfig::default())
        }
    }
}

fn expand_env_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next(); // consume '{'
            let mut name = String::new();
            for c in chars.by_ref() {
                if c == '}' {
                    break;
                }
                name.push(c);
            }
            if let Ok(val) = env::var(&name) {
                out.push_str(&val);
            } else {
                out.push_str("${");
                out.push_str(&name);
                out.push('}');
            }
        } else {
            out.push(ch);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = ServerConfig::default();
        assert!(cfg.disabled_tools.is_empty());
        assert!(cfg.is_tool_enabled("app_get_user"));
        assert!(!cfg.instructions.is_empty());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = ServerConfig::from_json(r#"{ "disabledTools": ["app_create_item"] }"#).unwrap();
        assert_eq!(cfg.disabled_tools, vec!["app_create_item"]);
        assert!(!cfg.is_tool_enabled("app_create_item"));
        assert_eq!(cfg.instructions, ServerConfig::default().instructions);
    }

    #[test]
    fn test_unset_env_reference_is_kept() {
        let cfg = ServerConfig::from_json(
            r#"{ "instructions": "hello ${EXAMPLE_MCP_SERVER_SURELY_UNSET_VAR}" }"#,
        )
        .unwrap();
        assert_eq!(cfg.instructions, "hello ${EXAMPLE_MCP_SERVER_SURELY_UNSET_VAR}");
    }

    #[test]
    fn test_env_reference_is_expanded() {
        let path = env::var("PATH").unwrap_or_default();
        let cfg = ServerConfig::from_json(r#"{ "instructions": "[${PATH}]" }"#).unwrap();
        assert_eq!(cfg.instructions, format!("[{}]", path));
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(ServerConfig::from_json(r#"{ "disabledTools": "nope" }"#).is_err());
    }

    #[test]
    fn test_load_from_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "instructions": "custom", "disabledTools": ["app_get_status"] }}"#
        )
        .unwrap();

        let cfg = load_server_config(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(cfg.instructions, "custom");
        assert_eq!(cfg.disabled_tools, vec!["app_get_status"]);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(load_server_config(Some(missing)).is_err());
    }
}
