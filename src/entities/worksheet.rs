//! FMEA worksheet entity (header record plus ordered failure-mode rows)

use serde::{Deserialize, Serialize};

/// Risk level band derived from an RPN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Band an RPN value
    pub fn from_rpn(rpn: i64) -> Self {
        match rpn {
            i64::MIN..=50 => RiskLevel::Low,
            51..=150 => RiskLevel::Medium,
            151..=400 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
            RiskLevel::Critical => write!(f, "critical"),
        }
    }
}

/// Worksheet-level metadata
///
/// Keys unknown to the schema (including a client-supplied `id`) are ignored
/// on input. Absent fields serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorksheetHeader {
    pub company: Option<String>,
    pub product_name: Option<String>,
    pub product_number: Option<String>,
    pub model_year: Option<String>,
    pub team: Option<String>,
    pub prepared_by: Option<String>,
    pub date_prepared: Option<String>,
    pub approved_by: Option<String>,
    pub date_approved: Option<String>,
    pub revision: Option<String>,
    pub page: Option<String>,
    /// DFMEA, PFMEA, ...
    pub fmea_type: Option<String>,
    pub fmea_number: Option<String>,
}

/// One failure-mode entry of a worksheet
///
/// The client's row `id` and the legacy `function` column are not part of
/// this struct and are dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorksheetRow {
    pub item: Option<String>,

    /// How the failure manifests (FMEA: Failure Mode)
    pub failure_mode: Option<String>,
    pub effects_of_failure: Option<String>,

    /// Severity rating 1-10 (FMEA: S)
    pub severity: Option<i64>,
    pub classification: Option<String>,
    pub causes_of_failure: Option<String>,

    /// Occurrence rating 1-10 (FMEA: O)
    pub occurrence: Option<i64>,
    pub current_controls_prevention: Option<String>,
    pub current_controls_detection: Option<String>,

    /// Detection rating 1-10 (FMEA: D)
    pub detection: Option<i64>,

    /// Risk Priority Number as entered by the client
    pub rpn: Option<i64>,
    pub recommended_actions: Option<String>,
    pub responsibility: Option<String>,
    pub target_date: Option<String>,
    pub actions_taken: Option<String>,
    pub completion_date: Option<String>,

    // Re-assessment after the recommended actions
    pub new_severity: Option<i64>,
    pub new_occurrence: Option<i64>,
    pub new_detection: Option<i64>,
    pub new_rpn: Option<i64>,
}

impl WorksheetRow {
    /// Calculate RPN from severity, occurrence, and detection
    ///
    /// Ratings are not range-checked on save, so a product that overflows
    /// `i64` yields `None`.
    pub fn calculate_rpn(&self) -> Option<i64> {
        product(self.severity, self.occurrence, self.detection)
    }

    /// Calculate the post-action RPN from the re-assessed ratings
    pub fn calculate_new_rpn(&self) -> Option<i64> {
        product(self.new_severity, self.new_occurrence, self.new_detection)
    }

    /// Check if stored RPN matches computed RPN
    pub fn is_rpn_stale(&self) -> bool {
        match (self.rpn, self.calculate_rpn()) {
            (Some(stored), Some(computed)) => stored != computed,
            _ => false,
        }
    }

    /// Same check for the re-assessed RPN
    pub fn is_new_rpn_stale(&self) -> bool {
        match (self.new_rpn, self.calculate_new_rpn()) {
            (Some(stored), Some(computed)) => stored != computed,
            _ => false,
        }
    }

    /// Risk level for display - prefers computed value over stored RPN
    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.calculate_rpn().or(self.rpn).map(RiskLevel::from_rpn)
    }
}

fn product(s: Option<i64>, o: Option<i64>, d: Option<i64>) -> Option<i64> {
    s?.checked_mul(o?)?.checked_mul(d?)
}

/// A row as persisted, with its store-assigned identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRow {
    pub id: i64,
    pub row: WorksheetRow,
}

/// A complete saved worksheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worksheet {
    pub id: i64,
    pub header: WorksheetHeader,
    pub rows: Vec<StoredRow>,
}

/// Summary projection used by listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetSummary {
    pub id: i64,
    pub product_name: Option<String>,
    pub fmea_number: Option<String>,
    pub date_prepared: Option<String>,
}

/// Outbound row shape: store id rendered as a string, no owner reference
#[derive(Debug, Serialize)]
pub struct RowDocument<'a> {
    pub id: String,
    #[serde(flatten)]
    pub row: &'a WorksheetRow,
}

/// Outbound worksheet shape: `{headerData, rows}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetDocument<'a> {
    pub header_data: &'a WorksheetHeader,
    pub rows: Vec<RowDocument<'a>>,
}

impl Worksheet {
    /// Borrow this worksheet in its outbound JSON shape
    pub fn document(&self) -> WorksheetDocument<'_> {
        WorksheetDocument {
            header_data: &self.header,
            rows: self
                .rows
                .iter()
                .map(|stored| RowDocument {
                    id: stored.id.to_string(),
                    row: &stored.row,
                })
                .collect(),
        }
    }
}
