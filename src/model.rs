use serde::{Deserialize, Serialize};

/// Body of `POST /asignar`. The `pin` field is only sent in the PIN variant.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AssignmentRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
}

/// The person a participant gives a gift to, as the backend reports it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssignedTo {
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "familia")]
    pub group: Option<String>,
}

/// Successful response of `POST /asignar`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssignmentResult {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "asignadoA")]
    pub assigned_to: Option<AssignedTo>,
}

/// One entry of the organizer summary, `GET /resumen`. The backend returns
/// an ordered array of these; `pin` is only present in the PIN variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryRow {
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "familia")]
    pub group: Option<String>,
    pub pin: Option<String>,
    #[serde(rename = "asignadoA")]
    pub assigned_to: Option<AssignedTo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_wire_names() {
        let with_pin = AssignmentRequest {
            name: "Alejandro".to_string(),
            pin: Some("0420".to_string()),
        };
        assert_eq!(
            serde_json::to_string(&with_pin).unwrap(),
            r#"{"nombre":"Alejandro","pin":"0420"}"#
        );

        // The PIN-less variant must not send a pin field at all.
        let without_pin = AssignmentRequest {
            name: "Maru".to_string(),
            pin: None,
        };
        assert_eq!(
            serde_json::to_string(&without_pin).unwrap(),
            r#"{"nombre":"Maru"}"#
        );
    }

    #[test]
    fn test_result_deserializes() {
        let full: AssignmentResult = serde_json::from_str(
            r#"{"message":"ok","asignadoA":{"nombre":"X","familia":"Y"}}"#,
        )
        .unwrap();
        assert_eq!(full.message, "ok");
        let assigned = full.assigned_to.unwrap();
        assert_eq!(assigned.name, "X");
        assert_eq!(assigned.group.as_deref(), Some("Y"));

        // Every field beyond the bare object is optional on the wire.
        let bare: AssignmentResult = serde_json::from_str("{}").unwrap();
        assert_eq!(bare.message, "");
        assert!(bare.assigned_to.is_none());
    }

    #[test]
    fn test_summary_rows_deserialize_in_order() {
        let rows: Vec<SummaryRow> = serde_json::from_str(
            r#"[
                {"nombre":"Ana","familia":"Lopez","pin":"11","asignadoA":{"nombre":"Beto"}},
                {"nombre":"Beto"}
            ]"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Ana");
        assert_eq!(rows[0].pin.as_deref(), Some("11"));
        let target = rows[0].assigned_to.as_ref().unwrap();
        assert_eq!(target.name, "Beto");
        assert!(target.group.is_none());
        assert_eq!(rows[1].name, "Beto");
        assert!(rows[1].group.is_none());
        assert!(rows[1].assigned_to.is_none());
    }
}
