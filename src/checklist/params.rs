//! Checklist URL parameters and serial number naming.

pub const DEFAULT_TYPE_ID: u32 = 1;
pub const DEFAULT_REPEAT_COUNT: u32 = 3;

/// What the checklist URL identifies: `/checklist/{project}[/{type}[/{repeat}]]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistParams {
    pub project_id: String,
    pub type_id: u32,
    /// Used when the project has no association for the type yet
    pub repeat_count: u32,
}

impl ChecklistParams {
    pub fn new(project_id: impl Into<String>, type_id: u32, repeat_count: u32) -> Self {
        Self {
            project_id: project_id.into(),
            type_id,
            repeat_count,
        }
    }

    /// Build from the path segments after `/checklist/`. Missing or
    /// unparsable type and repeat values fall back to the defaults.
    pub fn from_segments(segments: &[&str]) -> Option<Self> {
        let project_id = segments.first().filter(|id| !id.is_empty())?;
        let type_id = segments
            .get(1)
            .and_then(|t| t.parse().ok())
            .unwrap_or(DEFAULT_TYPE_ID);
        let repeat_count = segments
            .get(2)
            .and_then(|r| r.parse().ok())
            .filter(|r| *r > 0)
            .unwrap_or(DEFAULT_REPEAT_COUNT);
        Some(Self::new(*project_id, type_id, repeat_count))
    }

    pub fn path(&self) -> String {
        format!(
            "/checklist/{}/{}/{}",
            crate::api::path_segment(&self.project_id),
            self.type_id,
            self.repeat_count
        )
    }
}

/// Serial number string for repetition `index` (0-based)
pub fn serial_value(project_id: &str, type_id: u32, index: u32) -> String {
    format!("{}-{}-{}", project_id, type_id, index + 1)
}

/// Repetition number shown to the user: the last `-` separated part
pub fn repetition_label(serial: &str) -> &str {
    serial.rsplit('-').next().unwrap_or(serial)
}
