//! `[output]` section: how `generate` and `simulate` render results

use groupgo_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// Rendering preferences; `--output` on the command line wins over `format`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Default rendering when `--output` is not given
    pub format: Option<OutputFormat>,
    /// Colored text rendering; ignored for JSON
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl FileOutputConfig {
    /// The format to render with, given the command-line choice if any
    pub fn resolve_format(&self, requested: Option<OutputFormat>) -> OutputFormat {
        requested.or(self.format).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileConfig;

    #[test]
    fn test_output_section() {
        let config: FileConfig = toml::from_str(
            r#"
[output]
format = "json"
color = false
"#,
        )
        .unwrap();
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
    }

    #[test]
    fn test_resolve_format_prefers_command_line() {
        let output = FileOutputConfig {
            format: Some(OutputFormat::Json),
            color: true,
        };
        assert_eq!(output.resolve_format(None), OutputFormat::Json);
        assert_eq!(
            output.resolve_format(Some(OutputFormat::Text)),
            OutputFormat::Text
        );
        assert_eq!(
            FileOutputConfig::default().resolve_format(None),
            OutputFormat::Text
        );
    }
}
