//! Order record and request/response DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use super::store::StoreError;

/// Custom deserializer for non-empty strings
fn deserialize_non_empty_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.is_empty() {
        return Err(serde::de::Error::custom("string cannot be empty"));
    }
    Ok(s)
}

/// A stored order row
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Order {
    /// System-assigned identifier
    pub order_id: Uuid,
    /// Business identity key (at most one order per iqama)
    #[schema(example = "2345678901")]
    pub iqama: String,
    /// Phone lookup key
    #[schema(example = "0551234567")]
    pub mobile: String,
    /// Submission timestamp, sort key for listings
    pub order_date: DateTime<Utc>,
    /// Free-form status string (OTP/lifecycle fields live here or in extra)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Arbitrary additional fields carried with the order
    #[schema(value_type = Object)]
    pub extra: Value,
}

/// Order submission (HTTP request deserialization)
///
/// Unknown fields are collected into `extra` rather than rejected; the
/// legacy clients send anything from delivery notes to OTP state here.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubmitOrderRequest {
    /// Business identity key. Legacy payloads used `iqamaNumber`.
    #[serde(alias = "iqamaNumber", deserialize_with = "deserialize_non_empty_string")]
    #[schema(example = "2345678901")]
    pub iqama: String,
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    #[schema(example = "0551234567")]
    pub mobile: String,
    /// Defaults to submission time when omitted
    pub order_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    /// Everything else in the payload
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

/// Which branch the upsert took
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubmitOutcome {
    Created,
    Updated,
}

/// Submit response data
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitOrderData {
    pub order_id: Uuid,
    pub outcome: SubmitOutcome,
}

/// Paginated order listing
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderPage {
    pub total_orders: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub orders: Vec<Order>,
}

/// Bulk delete request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkDeleteRequest {
    /// Order identifiers; every entry must be a well-formed UUID
    pub ids: Vec<String>,
}

/// Bulk delete response data
#[derive(Debug, Serialize, ToSchema)]
pub struct BulkDeleteData {
    pub deleted: u64,
}

/// Pagination query parameters
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct ListParams {
    /// 1-based page number (default 1)
    pub page: Option<i64>,
    /// Page size, 1..=100 (default 10)
    pub limit: Option<i64>,
}

impl ListParams {
    pub const DEFAULT_LIMIT: i64 = 10;
    pub const MAX_LIMIT: i64 = 100;

    /// Resolve defaults and reject out-of-range values
    pub fn resolve(&self) -> Result<(i64, i64), &'static str> {
        let page = self.page.unwrap_or(1);
        if page < 1 {
            return Err("page must be >= 1");
        }
        let limit = self.limit.unwrap_or(Self::DEFAULT_LIMIT);
        if !(1..=Self::MAX_LIMIT).contains(&limit) {
            return Err("limit must be between 1 and 100");
        }
        Ok((page, limit))
    }
}

/// A generic patch body split into typed columns and the leftover map
///
/// Known columns (`iqama`, `mobile`, `status`, `order_date`) update the
/// typed fields; every other key is merged into `extra`.
#[derive(Debug, Default)]
pub struct PatchFields {
    pub iqama: Option<String>,
    pub mobile: Option<String>,
    pub status: Option<String>,
    pub order_date: Option<DateTime<Utc>>,
    pub extra: Map<String, Value>,
}

impl PatchFields {
    pub fn from_map(mut fields: Map<String, Value>) -> Result<Self, StoreError> {
        let mut patch = PatchFields::default();

        // Legacy payloads used `iqamaNumber` for the same column
        if let Some(v) = fields.remove("iqama").or_else(|| fields.remove("iqamaNumber")) {
            patch.iqama = Some(take_string("iqama", v)?);
        }
        if let Some(v) = fields.remove("mobile") {
            patch.mobile = Some(take_string("mobile", v)?);
        }
        if let Some(v) = fields.remove("status") {
            patch.status = Some(take_string("status", v)?);
        }
        if let Some(v) = fields.remove("order_date") {
            let s = take_string("order_date", v)?;
            let parsed = DateTime::parse_from_rfc3339(&s)
                .map_err(|_| StoreError::InvalidField("order_date"))?;
            patch.order_date = Some(parsed.with_timezone(&Utc));
        }

        patch.extra = fields;
        Ok(patch)
    }
}

fn take_string(field: &'static str, value: Value) -> Result<String, StoreError> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(StoreError::InvalidField(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_submit_request_collects_extra_fields() {
        let body = json!({
            "iqama": "2345678901",
            "mobile": "0551234567",
            "customerName": "Ahmed",
            "quantity": 2
        });
        let req: SubmitOrderRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.iqama, "2345678901");
        assert_eq!(req.extra["customerName"], "Ahmed");
        assert_eq!(req.extra["quantity"], 2);
        assert!(req.order_date.is_none());
    }

    #[test]
    fn test_submit_request_accepts_legacy_iqama_field() {
        let body = json!({"iqamaNumber": "111", "mobile": "0550000000"});
        let req: SubmitOrderRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.iqama, "111");
    }

    #[test]
    fn test_submit_request_rejects_empty_iqama() {
        let body = json!({"iqama": "", "mobile": "0550000000"});
        let result: Result<SubmitOrderRequest, _> = serde_json::from_value(body);
        assert!(result.is_err());
    }

    #[test]
    fn test_submit_request_rejects_missing_mobile() {
        let body = json!({"iqama": "111"});
        let result: Result<SubmitOrderRequest, _> = serde_json::from_value(body);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_params_defaults() {
        let params = ListParams::default();
        assert_eq!(params.resolve().unwrap(), (1, 10));
    }

    #[test]
    fn test_list_params_rejects_zero_limit() {
        let params = ListParams {
            page: Some(1),
            limit: Some(0),
        };
        assert!(params.resolve().is_err());
    }

    #[test]
    fn test_list_params_rejects_negative_page() {
        let params = ListParams {
            page: Some(-1),
            limit: Some(10),
        };
        assert!(params.resolve().is_err());
    }

    #[test]
    fn test_list_params_rejects_oversized_limit() {
        let params = ListParams {
            page: Some(1),
            limit: Some(101),
        };
        assert!(params.resolve().is_err());
    }

    #[test]
    fn test_patch_fields_split_typed_and_extra() {
        let body = json!({
            "mobile": "0559999999",
            "otp": "4821",
            "deliveryNote": "leave at gate"
        });
        let Value::Object(map) = body else { unreachable!() };
        let patch = PatchFields::from_map(map).unwrap();
        assert_eq!(patch.mobile.as_deref(), Some("0559999999"));
        assert!(patch.iqama.is_none());
        assert_eq!(patch.extra["otp"], "4821");
        assert_eq!(patch.extra["deliveryNote"], "leave at gate");
    }

    #[test]
    fn test_patch_fields_legacy_iqama_alias() {
        let body = json!({"iqamaNumber": "222"});
        let Value::Object(map) = body else { unreachable!() };
        let patch = PatchFields::from_map(map).unwrap();
        assert_eq!(patch.iqama.as_deref(), Some("222"));
        assert!(patch.extra.is_empty());
    }

    #[test]
    fn test_patch_fields_rejects_non_string_typed_column() {
        let body = json!({"mobile": 12345});
        let Value::Object(map) = body else { unreachable!() };
        assert!(matches!(
            PatchFields::from_map(map),
            Err(StoreError::InvalidField("mobile"))
        ));
    }

    #[test]
    fn test_patch_fields_rejects_bad_order_date() {
        let body = json!({"order_date": "yesterday"});
        let Value::Object(map) = body else { unreachable!() };
        assert!(matches!(
            PatchFields::from_map(map),
            Err(StoreError::InvalidField("order_date"))
        ));
    }

    #[test]
    fn test_submit_outcome_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(SubmitOutcome::Created).unwrap(),
            json!("created")
        );
        assert_eq!(
            serde_json::to_value(SubmitOutcome::Updated).unwrap(),
            json!("updated")
        );
    }
}
