//! Built-in example tools: echo, read_file, list_files
//!
//! Stand-ins for arbitrary tools under audit. They reject missing required
//! arguments and unknown argument keys with a structured invalid-params error.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::protocol::{ServiceError, ServiceResponse, ToolHandler};

use super::definition::ToolDefinition;

/// All built-in tools, in catalog order
pub fn all() -> Vec<Arc<dyn ToolHandler>> {
    vec![Arc::new(ReadFile), Arc::new(ListFiles), Arc::new(Echo)]
}

/// Check arguments against the declared properties and `required` list
pub fn check_arguments(
    definition: &ToolDefinition,
    arguments: &Map<String, Value>,
) -> Result<(), ServiceError> {
    let properties = definition.object_properties();

    if let Some(unknown) = arguments
        .keys()
        .find(|key| !properties.is_some_and(|p| p.contains_key(*key)))
    {
        return Err(ServiceError::invalid_params(format!("Unknown argument: {}", unknown)));
    }

    if let Some(missing) = definition
        .required()
        .into_iter()
        .find(|name| !arguments.contains_key(*name))
    {
        return Err(ServiceError::invalid_params(format!(
            "Missing required argument: {}",
            missing
        )));
    }

    Ok(())
}

fn string_arg<'a>(arguments: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>, ServiceError> {
    match arguments.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(ServiceError::invalid_params(format!("Argument '{}' must be a string", key))),
    }
}

/// Echo the input message back
pub struct Echo;

#[async_trait]
impl ToolHandler for Echo {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("echo", "Echo back the input message").with_schema(json!({
            "type": "object",
            "properties": {
                "message": {
                    "type": "string",
                    "description": "Message to echo back"
                }
            },
            "required": ["message"]
        }))
    }

    async fn call(&self, arguments: &Map<String, Value>) -> ServiceResponse {
        if let Err(e) = check_arguments(&self.definition(), arguments) {
            return ServiceResponse::error(e);
        }
        match string_arg(arguments, "message") {
            Ok(message) => ServiceResponse::text(format!("Echo: {}", message.unwrap_or_default())),
            Err(e) => ServiceResponse::error(e),
        }
    }
}

/// Read a UTF-8 file
pub struct ReadFile;

#[async_trait]
impl ToolHandler for ReadFile {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("read_file", "Read contents of a file").with_schema(json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path to the file to read"
                }
            },
            "required": ["path"]
        }))
    }

    async fn call(&self, arguments: &Map<String, Value>) -> ServiceResponse {
        if let Err(e) = check_arguments(&self.definition(), arguments) {
            return ServiceResponse::error(e);
        }
        let path = match string_arg(arguments, "path") {
            Ok(Some(path)) => Path::new(path).to_path_buf(),
            Ok(None) => return ServiceResponse::error(ServiceError::invalid_params("Missing 'path'")),
            Err(e) => return ServiceResponse::error(e),
        };

        if !path.exists() {
            return ServiceResponse::text(format!("Error: File not found: {}", path.display()));
        }

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => ServiceResponse::text(content),
            Err(e) => ServiceResponse::text(format!("Error reading file: {}", e)),
        }
    }
}

/// List a directory, directories tagged `[DIR]`, files `[FILE]`
pub struct ListFiles;

impl ListFiles {
    async fn list(directory: &Path) -> std::io::Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(directory).await?;
        let mut listing = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let tag = if entry.file_type().await?.is_dir() { "[DIR]" } else { "[FILE]" };
            listing.push(format!("{} {}", tag, entry.file_name().to_string_lossy()));
        }
        listing.sort();
        Ok(listing)
    }
}

#[async_trait]
impl ToolHandler for ListFiles {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("list_files", "List files in a directory").with_schema(json!({
            "type": "object",
            "properties": {
                "directory": {
                    "type": "string",
                    "description": "Directory path to list",
                    "default": "."
                }
            }
        }))
    }

    async fn call(&self, arguments: &Map<String, Value>) -> ServiceResponse {
        if let Err(e) = check_arguments(&self.definition(), arguments) {
            return ServiceResponse::error(e);
        }
        let directory = match string_arg(arguments, "directory") {
            Ok(dir) => Path::new(dir.unwrap_or(".")).to_path_buf(),
            Err(e) => return ServiceResponse::error(e),
        };

        if !directory.exists() {
            return ServiceResponse::text(format!("Error: Directory not found: {}", directory.display()));
        }

        match Self::list(&directory).await {
            Ok(listing) => ServiceResponse::text(listing.join("\n")),
            Err(e) => ServiceResponse::text(format!("Error listing directory: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ErrorCode;
    use tempfile::TempDir;

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn text(response: &ServiceResponse) -> String {
        response.to_value()["content"][0]["text"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }

    #[tokio::test]
    async fn test_echo() {
        let response = Echo.call(&args(json!({"message": "First call"}))).await;
        assert_eq!(text(&response), "Echo: First call");
    }

    #[tokio::test]
    async fn test_echo_rejects_empty_arguments() {
        let response = Echo.call(&Map::new()).await;
        assert_eq!(response.as_error().unwrap().code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_echo_rejects_unknown_key() {
        let response = Echo.call(&args(json!({"invalid_key": 12345}))).await;
        assert!(response.is_error());
    }

    #[tokio::test]
    async fn test_echo_rejects_non_string() {
        let response = Echo.call(&args(json!({"message": 5}))).await;
        assert!(response.is_error());
    }

    #[tokio::test]
    async fn test_read_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "hello").unwrap();

        let response = ReadFile
            .call(&args(json!({"path": path.to_string_lossy()})))
            .await;
        assert_eq!(text(&response), "hello");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_content() {
        let response = ReadFile
            .call(&args(json!({"path": "/definitely/not/here.txt"})))
            .await;
        assert!(response.has_content());
        assert!(text(&response).starts_with("Error: File not found"));
    }

    #[tokio::test]
    async fn test_list_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("a")).unwrap();

        let response = ListFiles
            .call(&args(json!({"directory": dir.path().to_string_lossy()})))
            .await;
        assert_eq!(text(&response), "[DIR] a\n[FILE] b.txt");
    }

    #[tokio::test]
    async fn test_list_files_defaults_to_cwd() {
        let response = ListFiles.call(&Map::new()).await;
        assert!(response.has_content());
    }

    #[tokio::test]
    async fn test_list_files_rejects_unknown_key() {
        let response = ListFiles.call(&args(json!({"wrong_field": "value"}))).await;
        assert!(response.is_error());
    }

    #[test]
    fn test_all_order() {
        let names: Vec<String> = all()
            .iter()
            .map(|h| h.definition().display_name().to_string())
            .collect();
        assert_eq!(names, vec!["read_file", "list_files", "echo"]);
    }
}
