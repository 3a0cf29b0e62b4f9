use anyhow::Context;
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use wrk_resume::runner::DEFAULT_TIMEOUT_SEC;
use wrk_resume::{ContextMode, Tool};

/// Keys whose values are always stored as JSON strings.
pub const STRING_KEYS: &[&str] = &["board_prefix", "default_tool", "context"];

/// Well-known paths under `.wrk/`.
#[derive(Debug, Clone)]
pub struct WrkPaths {
    pub root: PathBuf,
    pub wrk_dir: PathBuf,
    pub config_json: PathBuf,
}

impl WrkPaths {
    /// Derive all paths from a working directory. Pure computation, no I/O.
    pub fn discover(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let wrk_dir = root.join(".wrk");
        Self {
            config_json: wrk_dir.join("config.json"),
            wrk_dir,
            root,
        }
    }
}

/// Typed view of `.wrk/config.json`. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WrkConfig {
    pub board_prefix: String,
    pub default_tool: Option<Tool>,
    pub context: ContextMode,
    pub timeout_sec: u64,
}

impl Default for WrkConfig {
    fn default() -> Self {
        Self {
            board_prefix: "WRK".to_string(),
            default_tool: None,
            context: ContextMode::Full,
            timeout_sec: DEFAULT_TIMEOUT_SEC,
        }
    }
}

impl WrkConfig {
    pub fn load(paths: &WrkPaths) -> anyhow::Result<Self> {
        let map = read_config(&paths.config_json)?;
        Self::from_map(map)
    }

    pub fn from_map(map: serde_json::Map<String, serde_json::Value>) -> anyhow::Result<Self> {
        serde_json::from_value(serde_json::Value::Object(map))
            .map_err(|e| anyhow::anyhow!("invalid .wrk/config.json: {e}"))
    }
}

/// Untyped `.wrk/config.json` contents, as `wrk config get/list` show them.
/// A workspace that never ran `wrk config set` has an empty config.
pub fn read_config(path: &Path) -> anyhow::Result<serde_json::Map<String, serde_json::Value>> {
    if !path.exists() {
        return Ok(serde_json::Map::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let val: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    match val {
        serde_json::Value::Object(map) => Ok(map),
        _ => Ok(serde_json::Map::new()),
    }
}

/// Replace `.wrk/config.json`, creating `.wrk/` on first use.
pub fn write_config(
    path: &Path,
    config: &serde_json::Map<String, serde_json::Value>,
) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&config)?;
    write_atomic(path, json.as_bytes())
}

/// JSON value stored for `wrk config set <key> <value>`.
///
/// Keys in [`STRING_KEYS`] keep the raw text so `board_prefix 42` stays `"42"`;
/// any other key is typed as bool, integer, float or string.
pub fn parse_value(key: &str, s: &str) -> serde_json::Value {
    if STRING_KEYS.contains(&key) {
        return serde_json::Value::String(s.to_string());
    }
    match s {
        "true" => serde_json::Value::Bool(true),
        "false" => serde_json::Value::Bool(false),
        _ => {
            if let Ok(n) = s.parse::<i64>() {
                serde_json::Value::Number(n.into())
            } else if let Ok(f) = s.parse::<f64>() {
                serde_json::json!(f)
            } else {
                serde_json::Value::String(s.to_string())
            }
        }
    }
}

/// Readers of `.wrk/config.json` see the old file or the new one, never a partial write.
fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("no parent dir for {}", path.display()))?;
    std::fs::create_dir_all(parent)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = WrkConfig::load(&WrkPaths::discover(tmp.path())).unwrap();
        assert_eq!(cfg, WrkConfig::default());
        assert_eq!(cfg.board_prefix, "WRK");
        assert_eq!(cfg.timeout_sec, 1800);
    }

    #[test]
    fn write_then_load_typed() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = WrkPaths::discover(tmp.path());
        let mut map = serde_json::Map::new();
        map.insert("board_prefix".into(), parse_value("board_prefix", "API"));
        map.insert("default_tool".into(), parse_value("default_tool", "claude-code"));
        map.insert("context".into(), parse_value("context", "minimal"));
        map.insert("timeout_sec".into(), parse_value("timeout_sec", "60"));
        map.insert("unrelated".into(), parse_value("unrelated", "true"));
        write_config(&paths.config_json, &map).unwrap();

        let cfg = WrkConfig::load(&paths).unwrap();
        assert_eq!(cfg.board_prefix, "API");
        assert_eq!(cfg.default_tool, Some(Tool::ClaudeCode));
        assert_eq!(cfg.context, ContextMode::Minimal);
        assert_eq!(cfg.timeout_sec, 60);
    }

    #[test]
    fn unknown_tool_in_config_is_an_error() {
        let mut map = serde_json::Map::new();
        map.insert("default_tool".into(), serde_json::json!("cursor"));
        assert!(WrkConfig::from_map(map).is_err());
    }

    #[test]
    fn numeric_prefix_stays_a_string() {
        assert_eq!(parse_value("board_prefix", "42"), serde_json::json!("42"));
        assert_eq!(parse_value("timeout_sec", "42"), serde_json::json!(42));
        assert_eq!(parse_value("x", "false"), serde_json::json!(false));
        assert_eq!(parse_value("x", "1.5"), serde_json::json!(1.5));
    }

    #[test]
    fn non_object_config_reads_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, "[1,2,3]").unwrap();
        assert!(read_config(&path).unwrap().is_empty());
    }

    #[test]
    fn malformed_config_error_names_file() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = WrkPaths::discover(tmp.path());
        std::fs::create_dir_all(&paths.wrk_dir).unwrap();
        std::fs::write(&paths.config_json, "{ not json").unwrap();
        let err = WrkConfig::load(&paths).unwrap_err();
        assert!(format!("{err:#}").contains("config.json is not valid JSON"));
    }
}
