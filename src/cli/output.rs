//! Output formatting for CLI commands

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Every command prints one JSON document through this context
#[derive(Debug, Clone)]
pub struct OutputContext {
    /// Working directory for relative path calculation
    root: PathBuf,
}

impl OutputContext {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Convert an absolute path to relative (if within root)
    pub fn relative_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| path.display().to_string())
    }

    /// Print a successful response with data fields at top level
    pub fn print_success_flat<T: Serialize>(&self, data: T) {
        print_json(&flat_success(data));
    }

    pub fn print_error(&self, message: &str) {
        let response = serde_json::json!({
            "success": false,
            "error": message
        });
        print_json(&response);
    }
}

fn flat_success<T: Serialize>(data: T) -> serde_json::Value {
    let mut response = serde_json::to_value(data).unwrap_or(serde_json::json!({}));
    if let Some(obj) = response.as_object_mut() {
        obj.insert("success".to_string(), serde_json::json!(true));
    }
    response
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to serialize output: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path() {
        let ctx = OutputContext::new(PathBuf::from("/project"));

        assert_eq!(
            ctx.relative_path(Path::new("/project/src/app.py")),
            "src/app.py"
        );

        // Path outside root stays absolute
        assert_eq!(
            ctx.relative_path(Path::new("/other/file.py")),
            "/other/file.py"
        );
    }

    #[test]
    fn test_flat_success_adds_flag() {
        let value = flat_success(serde_json::json!({"found": false}));
        assert_eq!(value["success"], serde_json::json!(true));
        assert_eq!(value["found"], serde_json::json!(false));
    }
}
