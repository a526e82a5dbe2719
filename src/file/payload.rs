// src/file/payload.rs
use super::{extension, FileHandler};
use crate::analysis::AnalysisPayload;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

/// Prepared analysis payloads. JSON is read key by key so one malformed
/// sub-report does not reject the file; RON is read strictly.
#[derive(Debug, Default)]
pub struct PayloadFileHandler;

impl PayloadFileHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FileHandler<AnalysisPayload> for PayloadFileHandler {
    fn load(&self, path: &Path) -> Result<AnalysisPayload> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let payload = match extension(path).as_deref() {
            Some("json") => {
                let value: serde_json::Value = serde_json::from_str(&content)
                    .context("Failed to parse analysis JSON")?;
                AnalysisPayload::from_json(value)
            }
            Some("ron") => ron::from_str(&content).context("Failed to parse analysis file")?,
            _ => return Err(anyhow!("Not an analysis file: {}", path.display())),
        };

        log::info!("Loaded analysis payload from {}", path.display());
        Ok(payload)
    }

    fn save(&self, data: &AnalysisPayload, path: &Path) -> Result<()> {
        let content = match extension(path).as_deref() {
            Some("json") => serde_json::to_string_pretty(data)?,
            Some("ron") => ron::ser::to_string_pretty(
                data,
                ron::ser::PrettyConfig::new()
                    .new_line("\n".to_string())
                    .depth_limit(4)
                    .separate_tuple_members(true),
            )?,
            _ => return Err(anyhow!("Not an analysis file: {}", path.display())),
        };
        fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
