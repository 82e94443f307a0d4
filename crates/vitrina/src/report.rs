//! Report sink: step annotations and named attachments.
//!
//! The accessor and the page flows are pure producers; each operation records
//! a step, and observations (alert text, screenshots, title lists) are
//! attached under a name. [`Reporter::write_to_dir`] persists everything plus
//! a JSON summary for CI artifact collection.

use crate::result::VitrinaResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Payload of a named attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentBody {
    /// Plain text
    Text(String),
    /// PNG image bytes
    Png(Vec<u8>),
}

impl AttachmentBody {
    /// File extension used when persisting
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Text(_) => "txt",
            Self::Png(_) => "png",
        }
    }

    /// Size of the payload in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Png(bytes) => bytes.len(),
        }
    }

    /// Whether the payload is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named observation attached to the report
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Attachment name
    pub name: String,
    /// Payload
    pub body: AttachmentBody,
    /// When the observation was captured
    pub recorded_at: DateTime<Utc>,
}

/// One step annotation
#[derive(Debug, Clone)]
pub struct StepRecord {
    /// Human-readable step description
    pub description: String,
    /// When the step ran
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct ReportLog {
    steps: Vec<StepRecord>,
    attachments: Vec<Attachment>,
}

/// Collects step annotations and attachments for one test.
///
/// Cheap to clone; clones share the same log, so a session and the alert
/// handles it produces can all report into one place.
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    log: Arc<Mutex<ReportLog>>,
}

impl Reporter {
    /// Create an empty reporter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a step annotation
    pub fn step(&self, description: impl Into<String>) {
        let description = description.into();
        tracing::debug!(step = %description);
        if let Ok(mut log) = self.log.lock() {
            log.steps.push(StepRecord {
                description,
                recorded_at: Utc::now(),
            });
        }
    }

    /// Attach named text
    pub fn attach_text(&self, name: impl Into<String>, text: impl Into<String>) {
        self.attach(name, AttachmentBody::Text(text.into()));
    }

    /// Attach a named PNG image
    pub fn attach_png(&self, name: impl Into<String>, bytes: Vec<u8>) {
        self.attach(name, AttachmentBody::Png(bytes));
    }

    fn attach(&self, name: impl Into<String>, body: AttachmentBody) {
        if let Ok(mut log) = self.log.lock() {
            log.attachments.push(Attachment {
                name: name.into(),
                body,
                recorded_at: Utc::now(),
            });
        }
    }

    /// All recorded steps
    #[must_use]
    pub fn steps(&self) -> Vec<StepRecord> {
        self.log.lock().map(|log| log.steps.clone()).unwrap_or_default()
    }

    /// All recorded attachments
    #[must_use]
    pub fn attachments(&self) -> Vec<Attachment> {
        self.log
            .lock()
            .map(|log| log.attachments.clone())
            .unwrap_or_default()
    }

    /// Number of recorded steps
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.log.lock().map(|log| log.steps.len()).unwrap_or(0)
    }

    /// Persist attachments and a `report.json` summary under `dir`.
    ///
    /// Attachments are written as `NNN-<sanitized-name>.<ext>` in recording
    /// order; the summary references those file names.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> VitrinaResult<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let attachments = self.attachments();
        let mut summaries = Vec::with_capacity(attachments.len());
        for (index, attachment) in attachments.iter().enumerate() {
            let file = format!(
                "{index:03}-{}.{}",
                sanitize(&attachment.name),
                attachment.body.extension()
            );
            match &attachment.body {
                AttachmentBody::Text(text) => std::fs::write(dir.join(&file), text)?,
                AttachmentBody::Png(bytes) => std::fs::write(dir.join(&file), bytes)?,
            }
            summaries.push(AttachmentSummary {
                name: attachment.name.clone(),
                file,
                kind: attachment.body.extension(),
                bytes: attachment.body.len(),
                recorded_at: attachment.recorded_at.to_rfc3339(),
            });
        }

        let summary = ReportSummary {
            written_at: Utc::now().to_rfc3339(),
            steps: self
                .steps()
                .into_iter()
                .map(|step| StepSummary {
                    description: step.description,
                    recorded_at: step.recorded_at.to_rfc3339(),
                })
                .collect(),
            attachments: summaries,
        };
        let json = serde_json::to_vec_pretty(&summary)?;
        std::fs::write(dir.join("report.json"), json)?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct ReportSummary {
    written_at: String,
    steps: Vec<StepSummary>,
    attachments: Vec<AttachmentSummary>,
}

#[derive(Debug, Serialize)]
struct StepSummary {
    description: String,
    recorded_at: String,
}

#[derive(Debug, Serialize)]
struct AttachmentSummary {
    name: String,
    file: String,
    kind: &'static str,
    bytes: usize,
    recorded_at: String,
}

fn sanitize(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    while out.contains("--") {
        out = out.replace("--", "-");
    }
    out.trim_matches('-').to_string()
}
