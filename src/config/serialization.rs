//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

/// Render a string as a TOML basic string literal (quotes and escapes included)
fn toml_str(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

impl Config {
    /// Serialize the share command, or a commented example when unset
    pub(super) fn share_command_to_toml(&self) -> String {
        match &self.share_command {
            Some(command) => {
                let parts: Vec<String> = command.iter().map(|p| toml_str(p)).collect();
                format!("share_command = [{}]\n", parts.join(", "))
            }
            None => "# share_command = [\"wl-copy\"]   # receives the text on stdin\n".to_string(),
        }
    }

    /// Serialize the demo data path, or a commented example when unset
    pub(super) fn demo_data_to_toml(&self) -> String {
        match &self.demo.data {
            Some(path) => format!("data = {}\n", toml_str(&path.display().to_string())),
            None => "# data = \"excerpts.json\"   # output of `booktok chunk`\n".to_string(),
        }
    }

    /// Generate the full config file contents
    pub fn to_toml(&self) -> String {
        format!(
            r#"# booktok configuration

# Backend origin serving GET /api/excerpts?page=N&size=M
api_url = {api_url}

# Excerpts per page
page_size = {page_size}

# Where favorites exports are written
export_dir = {export_dir}

# Theme: Midnight, Paper, Terminal
theme = {theme}

# Share: program that receives the excerpt text on stdin.
# BOOKTOK_SHARE_TITLE is set to "Excerpt #<id>". Without it, share copies to the clipboard.
{share_command}
# Demo catalog (enable with BOOKTOK_DEMO=1)
[demo]
{demo_data}latency_ms = {demo_latency}

# When to fetch the next page
[observer]
threshold = {threshold:?}      # fraction of the sentinel that must be visible
lookahead_rows = {lookahead}    # rows of lookahead past the viewport

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# File logging (in addition to the TUI log buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = {log_file_rotation}  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            api_url = toml_str(&self.api_url),
            page_size = self.page_size,
            export_dir = toml_str(&self.export_dir.display().to_string()),
            theme = toml_str(&self.theme),
            share_command = self.share_command_to_toml(),
            demo_data = self.demo_data_to_toml(),
            demo_latency = self.demo.latency_ms,
            threshold = self.observer.threshold,
            lookahead = self.observer.lookahead_rows,
            log_level = toml_str(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = toml_str(&self.logging.file_dir.display().to_string()),
            log_file_rotation = toml_str(self.logging.file_rotation.as_str()),
            log_file_prefix = toml_str(&self.logging.file_prefix),
        )
    }
}
