//! Operating instructions for the tool loop, loaded from YAML with env overrides.
//!
//! **Canonical source**: the default text lives in `toolloop/prompts/tool_loop.yaml`,
//! embedded at compile time. A file passed to [`load_file`] (or named by
//! `TOOLLOOP_PROMPTS_FILE` for [`load_or_default`]) replaces it; `TOOLLOOP_SYSTEM_PROMPT`
//! and `TOOLLOOP_REACT_PROMPT` override single fields on top of either.

use std::path::Path;

use serde::Deserialize;

use crate::tools::ToolRegistry;

const EMBED_TOOL_LOOP: &str = include_str!("../prompts/tool_loop.yaml");

/// Used when neither the YAML nor the env provides a system prompt.
pub const FALLBACK_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Use the available tools when they are needed to answer.";

/// Used when neither the YAML nor the env provides a ReAct template.
pub const FALLBACK_REACT_TEMPLATE: &str = "Answer the following questions as best you can. You have access to the following tools:\n{tool_descriptions}\n\nUse the following format:\n\nQuestion: the input question you must answer\nThought: you should always think about what to do\nAction: the action to take, should be one of [{tool_names}]\nAction Input: the input to the action as a JSON object\nObservation: the result of the action\n... (this Thought/Action/Action Input/Observation can repeat N times)\nThought: I now know the final answer\nFinal Answer: the final answer to the original input question\n\nBegin!";

/// Error when loading a prompts file.
#[derive(Debug, thiserror::Error)]
pub enum PromptLoadError {
    #[error("failed to read prompts file {path}: {message}")]
    ReadFile { path: String, message: String },
    #[error("failed to parse YAML in {path}: {message}")]
    ParseYaml { path: String, message: String },
}

/// Contents of `tool_loop.yaml`. Missing fields fall back to the code constants.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ToolLoopPrompts {
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub react_template: Option<String>,
}

impl ToolLoopPrompts {
    /// System prompt for the structured and JSON-arguments strategies.
    pub fn system_prompt(&self) -> &str {
        self.system_prompt
            .as_deref()
            .unwrap_or(FALLBACK_SYSTEM_PROMPT)
    }

    /// ReAct template with `{tool_descriptions}` and `{tool_names}` placeholders.
    pub fn react_template(&self) -> &str {
        self.react_template
            .as_deref()
            .unwrap_or(FALLBACK_REACT_TEMPLATE)
    }

    fn apply_env_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(s) = lookup("TOOLLOOP_SYSTEM_PROMPT") {
            self.system_prompt = Some(s);
        }
        if let Some(s) = lookup("TOOLLOOP_REACT_PROMPT") {
            self.react_template = Some(s);
        }
        self
    }

    fn apply_env(self) -> Self {
        self.apply_env_with(|key| std::env::var(key).ok())
    }
}

/// Default prompts parsed from the embedded YAML, with env overrides applied.
pub fn default_from_embedded() -> ToolLoopPrompts {
    let file: ToolLoopPrompts = serde_yaml::from_str(EMBED_TOOL_LOOP).unwrap_or_default();
    file.apply_env()
}

/// Loads prompts from a YAML file and applies env overrides.
pub fn load_file(path: &Path) -> Result<ToolLoopPrompts, PromptLoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| PromptLoadError::ReadFile {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let file: ToolLoopPrompts =
        serde_yaml::from_str(&content).map_err(|e| PromptLoadError::ParseYaml {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    Ok(file.apply_env())
}

/// Loads `path` (or `TOOLLOOP_PROMPTS_FILE` when `path` is `None`); falls back to the
/// embedded defaults when no file is named or it cannot be loaded.
pub fn load_or_default(path: Option<&Path>) -> ToolLoopPrompts {
    let from_env = std::env::var("TOOLLOOP_PROMPTS_FILE").ok();
    let path = path.or(from_env.as_deref().map(Path::new));
    match path {
        Some(p) => match load_file(p) {
            Ok(prompts) => prompts,
            Err(e) => {
                tracing::warn!(error = %e, "prompts file ignored, using embedded defaults");
                default_from_embedded()
            }
        },
        None => default_from_embedded(),
    }
}

/// One line per tool: `name(arg: type, ...): description`.
pub fn tool_descriptions(tools: &ToolRegistry) -> String {
    tools
        .list()
        .iter()
        .map(|spec| match &spec.description {
            Some(d) => format!("{}: {}", spec.signature(), d),
            None => spec.signature(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fills `{tool_descriptions}` and `{tool_names}` in a ReAct template.
pub fn render_react_prompt(template: &str, tools: &ToolRegistry) -> String {
    template
        .replace("{tool_descriptions}", &tool_descriptions(tools))
        .replace("{tool_names}", &tools.names().join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::catalog_registry;

    #[test]
    fn embedded_yaml_provides_both_prompts() {
        let p: ToolLoopPrompts = serde_yaml::from_str(EMBED_TOOL_LOOP).unwrap();
        assert!(p.system_prompt().contains("get_product_price"));
        assert!(p.react_template().contains("{tool_descriptions}"));
        assert!(p.react_template().contains("Action Input:"));
    }

    #[test]
    fn missing_fields_fall_back_to_constants() {
        let p = ToolLoopPrompts::default();
        assert_eq!(p.system_prompt(), FALLBACK_SYSTEM_PROMPT);
        assert_eq!(p.react_template(), FALLBACK_REACT_TEMPLATE);
    }

    #[test]
    fn env_lookup_overrides_fields() {
        let p = ToolLoopPrompts::default().apply_env_with(|key| match key {
            "TOOLLOOP_SYSTEM_PROMPT" => Some("From env.".to_string()),
            _ => None,
        });
        assert_eq!(p.system_prompt(), "From env.");
        assert_eq!(p.react_template(), FALLBACK_REACT_TEMPLATE);
    }

    #[test]
    fn load_file_reads_yaml() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("prompts.yaml");
        std::fs::write(&path, "system_prompt: \"From file.\"\n").unwrap();
        let p = load_file(&path).unwrap();
        assert_eq!(p.system_prompt.as_deref(), Some("From file."));
        assert!(p.react_template.is_none());
    }

    #[test]
    fn load_file_errors() {
        let err = load_file(Path::new("/nonexistent_prompts_12345.yaml")).unwrap_err();
        assert!(matches!(err, PromptLoadError::ReadFile { .. }));

        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("bad.yaml");
        std::fs::write(&path, "system_prompt: [not closed").unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, PromptLoadError::ParseYaml { .. }));
    }

    #[test]
    fn load_or_default_with_missing_file_uses_embedded() {
        let p = load_or_default(Some(Path::new("/nonexistent_prompts_12345.yaml")));
        assert!(p.react_template().contains("{tool_names}"));
    }

    #[test]
    fn react_prompt_lists_tool_signatures() {
        let tools = catalog_registry();
        let prompt = render_react_prompt("{tool_descriptions}\n[{tool_names}]", &tools);
        assert_eq!(
            prompt,
            "apply_discount(price: number, discount_tier: string): A tool that takes in product price and discount tier, and returns the discounted price.\n\
             get_product_price(product: string): A tool that returns the price of a product based on its name.\n\
             [apply_discount, get_product_price]"
        );
    }
}
