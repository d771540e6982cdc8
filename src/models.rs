//! Typed result shapes and the field mappings that build them from raw
//! SonarCloud JSON.
//!
//! Optional fields missing upstream serialize as `null`; required fields
//! missing upstream are reported as a malformed response.

use crate::constants::pagination as pagination_constants;
use crate::errors::ToolError;
use serde::Serialize;
use serde_json::{Map, Value};

type Object = Map<String, Value>;

fn as_object<'a>(value: &'a Value, entity: &str) -> Result<&'a Object, ToolError> {
    value.as_object().ok_or_else(|| {
        ToolError::internal(format!("Malformed SonarCloud response: {} is not an object", entity))
    })
}

fn required_str(obj: &Object, entity: &str, field: &str) -> Result<String, ToolError> {
    obj.get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| missing_field(entity, field))
}

fn required_object(obj: &Object, entity: &str, field: &str) -> Result<Object, ToolError> {
    obj.get(field)
        .and_then(|v| v.as_object())
        .cloned()
        .ok_or_else(|| missing_field(entity, field))
}

fn optional_str(obj: &Object, field: &str) -> Option<String> {
    obj.get(field).and_then(|v| v.as_str()).map(|s| s.to_string())
}

fn optional_i64(obj: &Object, field: &str) -> Option<i64> {
    obj.get(field).and_then(|v| v.as_i64())
}

fn missing_field(entity: &str, field: &str) -> ToolError {
    ToolError::internal(format!(
        "Malformed SonarCloud response: {} is missing '{}'",
        entity, field
    ))
}

fn elements<'a>(root: &'a Value, field: &str) -> &'a [Value] {
    root.get(field)
        .and_then(|v| v.as_array())
        .map(|arr| arr.as_slice())
        .unwrap_or(&[])
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paging {
    #[serde(rename = "pageIndex")]
    pub page_index: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    pub total: u64,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page_index: pagination_constants::DEFAULT_PAGE_INDEX,
            page_size: pagination_constants::DEFAULT_PAGE_SIZE,
            total: pagination_constants::DEFAULT_TOTAL,
        }
    }
}

impl Paging {
    /// Reads `root.paging`, defaulting each missing field independently.
    /// A page index or size that does not fit in `u32` reads as missing.
    pub fn from_response(root: &Value) -> Self {
        let defaults = Self::default();
        let Some(paging) = root.get("paging") else {
            return defaults;
        };
        Self {
            page_index: paging
                .get("pageIndex")
                .and_then(|v| v.as_u64())
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(defaults.page_index),
            page_size: paging
                .get("pageSize")
                .and_then(|v| v.as_u64())
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(defaults.page_size),
            total: paging
                .get("total")
                .and_then(|v| v.as_u64())
                .unwrap_or(defaults.total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub key: String,
    pub name: String,
}

impl Project {
    pub fn from_json(value: &Value) -> Result<Self, ToolError> {
        let obj = as_object(value, "project")?;
        Ok(Self {
            key: required_str(obj, "project", "key")?,
            name: required_str(obj, "project", "name")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchProjectsResponse {
    pub projects: Vec<Project>,
    pub paging: Paging,
}

impl SearchProjectsResponse {
    pub fn from_json(root: &Value) -> Result<Self, ToolError> {
        let projects = elements(root, "components")
            .iter()
            .map(Project::from_json)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            projects,
            paging: Paging::from_response(root),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub key: String,
    pub rule: String,
    pub severity: Option<String>,
    pub component: String,
    pub message: String,
    pub line: Option<i64>,
    pub status: String,
    #[serde(rename = "type")]
    pub issue_type: String,
}

impl Issue {
    pub fn from_json(value: &Value) -> Result<Self, ToolError> {
        let obj = as_object(value, "issue")?;
        Ok(Self {
            key: required_str(obj, "issue", "key")?,
            rule: required_str(obj, "issue", "rule")?,
            severity: optional_str(obj, "severity"),
            component: required_str(obj, "issue", "component")?,
            message: required_str(obj, "issue", "message")?,
            line: optional_i64(obj, "line"),
            status: required_str(obj, "issue", "status")?,
            issue_type: required_str(obj, "issue", "type")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchIssuesResponse {
    pub issues: Vec<Issue>,
    pub total: u64,
    pub paging: Paging,
}

impl SearchIssuesResponse {
    pub fn from_json(root: &Value) -> Result<Self, ToolError> {
        let issues = elements(root, "issues")
            .iter()
            .map(Issue::from_json)
            .collect::<Result<Vec<_>, _>>()?;
        let total = root
            .get("total")
            .and_then(|v| v.as_u64())
            .unwrap_or(issues.len() as u64);
        Ok(Self {
            issues,
            total,
            paging: Paging::from_response(root),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityGateCondition {
    pub status: String,
    #[serde(rename = "metricKey")]
    pub metric_key: String,
    #[serde(rename = "actualValue")]
    pub actual_value: Option<String>,
    #[serde(rename = "errorThreshold")]
    pub error_threshold: Option<String>,
}

impl QualityGateCondition {
    pub fn from_json(value: &Value) -> Result<Self, ToolError> {
        let obj = as_object(value, "quality gate condition")?;
        Ok(Self {
            status: required_str(obj, "quality gate condition", "status")?,
            metric_key: required_str(obj, "quality gate condition", "metricKey")?,
            actual_value: optional_str(obj, "actualValue"),
            error_threshold: optional_str(obj, "errorThreshold"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityGateStatus {
    pub status: String,
    pub conditions: Vec<QualityGateCondition>,
}

impl QualityGateStatus {
    /// Reads `root.projectStatus`; a missing status reads as `NONE`.
    pub fn from_json(root: &Value) -> Result<Self, ToolError> {
        let project_status = root.get("projectStatus").unwrap_or(&Value::Null);
        let conditions = elements(project_status, "conditions")
            .iter()
            .map(QualityGateCondition::from_json)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            status: project_status
                .get("status")
                .and_then(|v| v.as_str())
                .unwrap_or("NONE")
                .to_string(),
            conditions,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hotspot {
    pub key: String,
    pub component: String,
    pub message: String,
    pub author: Option<String>,
    pub status: String,
    pub resolution: Option<String>,
    pub line: Option<i64>,
    #[serde(rename = "vulnerabilityProbability")]
    pub vulnerability_probability: Option<String>,
}

impl Hotspot {
    pub fn from_json(value: &Value) -> Result<Self, ToolError> {
        let obj = as_object(value, "hotspot")?;
        Ok(Self {
            key: required_str(obj, "hotspot", "key")?,
            component: required_str(obj, "hotspot", "component")?,
            message: required_str(obj, "hotspot", "message")?,
            author: optional_str(obj, "author"),
            status: required_str(obj, "hotspot", "status")?,
            resolution: optional_str(obj, "resolution"),
            line: optional_i64(obj, "line"),
            vulnerability_probability: optional_str(obj, "vulnerabilityProbability"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHotspotsResponse {
    pub hotspots: Vec<Hotspot>,
    pub paging: Paging,
}

impl SearchHotspotsResponse {
    pub fn from_json(root: &Value) -> Result<Self, ToolError> {
        let hotspots = elements(root, "hotspots")
            .iter()
            .map(Hotspot::from_json)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            hotspots,
            paging: Paging::from_response(root),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotspotDetails {
    pub key: String,
    pub message: String,
    pub component: Object,
    pub status: String,
    pub resolution: Option<String>,
    pub author: Option<String>,
    pub rule: Object,
    #[serde(rename = "canChangeStatus")]
    pub can_change_status: bool,
}

impl HotspotDetails {
    pub fn from_json(value: &Value) -> Result<Self, ToolError> {
        let obj = as_object(value, "hotspot details")?;
        Ok(Self {
            key: required_str(obj, "hotspot details", "key")?,
            message: required_str(obj, "hotspot details", "message")?,
            component: required_object(obj, "hotspot details", "component")?,
            status: required_str(obj, "hotspot details", "status")?,
            resolution: optional_str(obj, "resolution"),
            author: optional_str(obj, "author"),
            rule: required_object(obj, "hotspot details", "rule")?,
            can_change_status: obj
                .get("canChangeStatus")
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeHotspotStatusResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paging_defaults_when_absent() {
        assert_eq!(
            Paging::from_response(&json!({})),
            Paging {
                page_index: 1,
                page_size: 100,
                total: 0
            }
        );
        let partial = Paging::from_response(&json!({"paging": {"total": 7}}));
        assert_eq!(partial.page_index, 1);
        assert_eq!(partial.page_size, 100);
        assert_eq!(partial.total, 7);
    }

    #[test]
    fn oversized_paging_fields_fall_back_to_defaults() {
        let paging = Paging::from_response(&json!({
            "paging": {"pageIndex": 4294967297u64, "pageSize": 50, "total": 4294967297u64}
        }));
        assert_eq!(paging.page_index, 1);
        assert_eq!(paging.page_size, 50);
        assert_eq!(paging.total, 4_294_967_297);

        let paging = Paging::from_response(&json!({"paging": {"pageSize": 4294967296u64}}));
        assert_eq!(paging.page_size, 100);
    }

    #[test]
    fn issue_optionals_serialize_as_null() {
        let issue = Issue::from_json(&json!({
            "key": "AX1",
            "rule": "java:S100",
            "component": "p1:src/A.java",
            "message": "Rename",
            "status": "OPEN",
            "type": "CODE_SMELL"
        }))
        .expect("issue");
        let value = serde_json::to_value(&issue).expect("serialize");
        assert!(value.get("severity").expect("key present").is_null());
        assert!(value.get("line").expect("key present").is_null());
        assert_eq!(value["type"], "CODE_SMELL");
    }

    #[test]
    fn issue_missing_required_field_is_reported() {
        let err = Issue::from_json(&json!({"key": "AX1"})).unwrap_err();
        assert!(err.message.contains("'rule'"), "{}", err.message);
    }

    #[test]
    fn issues_total_falls_back_to_count() {
        let response = SearchIssuesResponse::from_json(&json!({
            "issues": [{
                "key": "AX1", "rule": "r", "component": "c", "message": "m",
                "status": "OPEN", "type": "BUG", "severity": "MAJOR", "line": 4
            }]
        }))
        .expect("response");
        assert_eq!(response.total, 1);
        assert_eq!(response.issues[0].line, Some(4));
        assert_eq!(response.paging, Paging::default());
    }

    #[test]
    fn quality_gate_status_defaults_to_none() {
        let status = QualityGateStatus::from_json(&json!({})).expect("status");
        assert_eq!(status.status, "NONE");
        assert!(status.conditions.is_empty());
    }

    #[test]
    fn quality_gate_conditions_keep_order_and_nulls() {
        let status = QualityGateStatus::from_json(&json!({
            "projectStatus": {
                "status": "ERROR",
                "conditions": [
                    {"status": "ERROR", "metricKey": "new_coverage", "actualValue": "41.2", "errorThreshold": "80"},
                    {"status": "OK", "metricKey": "new_bugs"}
                ]
            }
        }))
        .expect("status");
        assert_eq!(status.status, "ERROR");
        assert_eq!(status.conditions[0].metric_key, "new_coverage");
        assert_eq!(status.conditions[1].metric_key, "new_bugs");
        let value = serde_json::to_value(&status.conditions[1]).expect("serialize");
        assert!(value["actualValue"].is_null());
        assert!(value["errorThreshold"].is_null());
    }

    #[test]
    fn hotspot_details_default_can_change_status() {
        let details = HotspotDetails::from_json(&json!({
            "key": "AX123",
            "message": "Check this",
            "component": {"key": "p1:src/A.java"},
            "status": "TO_REVIEW",
            "rule": {"key": "java:S2068"}
        }))
        .expect("details");
        assert!(!details.can_change_status);
        assert!(details.author.is_none());
        assert_eq!(details.rule["key"], "java:S2068");
    }

    #[test]
    fn hotspot_details_require_nested_objects() {
        let err = HotspotDetails::from_json(&json!({
            "key": "AX123",
            "message": "m",
            "component": "p1:src/A.java",
            "status": "TO_REVIEW",
            "rule": {}
        }))
        .unwrap_err();
        assert!(err.message.contains("'component'"));
    }
}
