//! JSON file backed [`TemplateStore`].
//!
//! The artifact is one JSON object mapping series name to `{"release", "reserve"}`. It is read
//! in full at startup and rewritten in full (temp sibling + rename) on every upsert.

use async_trait::async_trait;
use repost_core::{RepostError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, instrument, warn};

use crate::models::{SeriesTemplate, TemplateRecord};
use crate::repository::TemplateStore;

/// Default bound on one file write.
pub const DEFAULT_PERSIST_TIMEOUT: Duration = Duration::from_secs(10);

/// Template store persisted to a single JSON file.
pub struct JsonTemplateStore {
    path: PathBuf,
    persist_timeout: Duration,
    templates: RwLock<Vec<SeriesTemplate>>,
    /// Held for the whole read-modify-persist-commit of an upsert.
    writer: Mutex<()>,
}

impl JsonTemplateStore {
    /// Loads the store from `path`. A missing file yields an empty store. An unparseable file is
    /// renamed to `<file>.corrupt-<timestamp>` and the store starts empty.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let templates = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => match parse_templates(&raw) {
                Ok(templates) => templates,
                Err(e) => {
                    let aside = quarantine(&path).await?;
                    error!(
                        error = %e,
                        moved_to = %aside.display(),
                        "Template file is not valid, moved aside; starting with no templates"
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Template file not found; starting with no templates");
                Vec::new()
            }
            Err(e) => {
                return Err(RepostError::Persistence(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        info!(count = templates.len(), "Templates loaded");

        Ok(Self {
            path,
            persist_timeout: DEFAULT_PERSIST_TIMEOUT,
            templates: RwLock::new(templates),
            writer: Mutex::new(()),
        })
    }

    /// Sets the bound on each file write.
    pub fn with_persist_timeout(mut self, timeout: Duration) -> Self {
        self.persist_timeout = timeout;
        self
    }

    async fn persist(&self, templates: &[SeriesTemplate]) -> Result<()> {
        let bytes = serialize_templates(templates)?;
        match tokio::time::timeout(self.persist_timeout, write_atomically(&self.path, &bytes))
            .await
        {
            Ok(result) => result.map_err(|e| {
                RepostError::Persistence(format!("failed to write {}: {}", self.path.display(), e))
            }),
            Err(_) => Err(RepostError::Persistence(format!(
                "writing {} timed out after {:?}",
                self.path.display(),
                self.persist_timeout
            ))),
        }
    }
}

#[async_trait]
impl TemplateStore for JsonTemplateStore {
    async fn get(&self, name: &str) -> Result<SeriesTemplate> {
        self.templates
            .read()
            .await
            .iter()
            .find(|t| t.name == name)
            .cloned()
            .ok_or_else(|| RepostError::NotFound(name.to_string()))
    }

    async fn list_names(&self) -> Vec<String> {
        self.templates
            .read()
            .await
            .iter()
            .map(|t| t.name.clone())
            .collect()
    }

    async fn list(&self) -> Vec<SeriesTemplate> {
        self.templates.read().await.clone()
    }

    #[instrument(skip(self, template), fields(name = %template.name))]
    async fn upsert(&self, template: SeriesTemplate) -> Result<()> {
        if template.name.trim().is_empty() {
            return Err(RepostError::Validation("template name is empty".to_string()));
        }
        if template.release.is_empty() || template.reserve.is_empty() {
            return Err(RepostError::Validation(
                "caption patterns must not be empty".to_string(),
            ));
        }

        let _writer = self.writer.lock().await;

        let mut next = self.templates.read().await.clone();
        let replaced = match next.iter_mut().find(|t| t.name == template.name) {
            Some(existing) => {
                *existing = template;
                true
            }
            None => {
                next.push(template);
                false
            }
        };

        if let Err(e) = self.persist(&next).await {
            warn!(error = %e, "Template not saved; store left unchanged");
            return Err(e);
        }

        *self.templates.write().await = next;
        info!(replaced = replaced, "Template saved");
        Ok(())
    }
}

pub(crate) fn parse_templates(raw: &str) -> std::result::Result<Vec<SeriesTemplate>, String> {
    let map: Map<String, Value> = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    map.into_iter()
        .map(|(name, value)| -> std::result::Result<SeriesTemplate, String> {
            let record: TemplateRecord = serde_json::from_value(value)
                .map_err(|e| format!("template '{}': {}", name, e))?;
            Ok(SeriesTemplate {
                name,
                release: record.release,
                reserve: record.reserve,
            })
        })
        .collect()
}

/// Pretty JSON with 4-space indentation; non-ASCII text is written as-is.
pub(crate) fn serialize_templates(templates: &[SeriesTemplate]) -> Result<Vec<u8>> {
    let mut map = Map::new();
    for t in templates {
        let record = serde_json::to_value(TemplateRecord::from(t))
            .map_err(|e| RepostError::Persistence(e.to_string()))?;
        map.insert(t.name.clone(), record);
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    map.serialize(&mut ser)
        .map_err(|e| RepostError::Persistence(e.to_string()))?;
    Ok(buf)
}

async fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            tokio::fs::create_dir_all(dir).await?;
        }
    }
    let tmp = sibling(path, "tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await
}

async fn quarantine(path: &Path) -> Result<PathBuf> {
    let stamp = chrono::Local::now().format("%Y%m%d%H%M%S").to_string();
    let aside = sibling(path, &format!("corrupt-{}", stamp));
    tokio::fs::rename(path, &aside).await.map_err(|e| {
        RepostError::Persistence(format!(
            "failed to move invalid template file {} aside: {}",
            path.display(),
            e
        ))
    })?;
    Ok(aside)
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}
