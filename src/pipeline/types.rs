//! Pipeline row types
//!
//! Rows are opaque records produced by the backend. They are decoded as-is
//! and never reordered; numeric fields are `f64` because the live query
//! emits every number, counts included, as a float.
//!
//! The backend writes SQL NULLs and NaN averages as JSON `null`. A missing
//! or `null` number decodes as `0.0` and a missing or `null` label as `""`.

use serde::{Deserialize, Deserializer, Serialize};

/// One row of the pipeline-by-region report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRow {
    #[serde(alias = "REGION", default, deserialize_with = "null_as_empty")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub deal_count: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub avg_deal_size: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub closed_amount: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub open_amount: f64,
}

/// One row of the pipeline-by-product report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    #[serde(alias = "PRODUCT", default, deserialize_with = "null_as_empty")]
    pub product: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub deal_count: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub avg_deal_size: f64,
}

/// One row of the last-month sales report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastMonthRow {
    #[serde(alias = "PRODUCT", default, deserialize_with = "null_as_empty")]
    pub product: String,
    #[serde(alias = "REGION", default, deserialize_with = "null_as_empty")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub deal_count: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub closed_amount: f64,
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response body shared by every reporting endpoint
///
/// Successful responses look like `{"status": "success", "data": [...]}`;
/// failures look like `{"status": "error", "message": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub status: Option<String>,
    pub data: Option<Vec<T>>,
    pub message: Option<String>,
    /// Product filter echoed back by the last-month query
    pub filter: Option<String>,
}

impl<T> Envelope<T> {
    /// The rows carried by this envelope, empty when `data` is absent or null
    pub fn into_rows(self) -> Vec<T> {
        self.data.unwrap_or_default()
    }
}

/// The three reporting endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ByRegion,
    ByProduct,
    LastMonth,
}

impl Endpoint {
    /// Path suffix appended to the configured base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::ByRegion => "/pipeline/by-region",
            Endpoint::ByProduct => "/pipeline/by-product",
            Endpoint::LastMonth => "/sales/last-month",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_data() {
        let body = r#"{"status": "success", "data": [
            {"region": "West", "total_amount": 100000, "deal_count": 4,
             "avg_deal_size": 25000, "closed_amount": 60000, "open_amount": 40000}
        ]}"#;

        let envelope: Envelope<RegionRow> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.status.as_deref(), Some("success"));

        let rows = envelope.into_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].region, "West");
        assert_eq!(rows[0].deal_count, 4.0);
        assert_eq!(rows[0].open_amount, 40000.0);
    }

    #[test]
    fn test_envelope_missing_or_null_data() {
        let missing: Envelope<ProductRow> = serde_json::from_str(r#"{"status": "success"}"#).unwrap();
        assert!(missing.into_rows().is_empty());

        let null: Envelope<ProductRow> = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(null.into_rows().is_empty());
    }

    #[test]
    fn test_envelope_error_message() {
        let envelope: Envelope<LastMonthRow> =
            serde_json::from_str(r#"{"status": "error", "message": "warehouse offline"}"#).unwrap();
        assert_eq!(envelope.message.as_deref(), Some("warehouse offline"));
        assert!(envelope.into_rows().is_empty());
    }

    #[test]
    fn test_upper_case_columns_and_missing_numbers() {
        let body = r#"{"data": [{"PRODUCT": "Cloud", "REGION": "EMEA", "total_amount": 12.5}]}"#;
        let envelope: Envelope<LastMonthRow> = serde_json::from_str(body).unwrap();
        let rows = envelope.into_rows();

        assert_eq!(rows[0].product, "Cloud");
        assert_eq!(rows[0].region, "EMEA");
        assert_eq!(rows[0].total_amount, 12.5);
        assert_eq!(rows[0].deal_count, 0.0);
    }

    #[test]
    fn test_null_numbers_decode_as_zero() {
        let body = r#"{"data": [{"region": "West", "total_amount": 100000, "deal_count": 4,
            "avg_deal_size": null, "closed_amount": null, "open_amount": 40000}]}"#;
        let rows = serde_json::from_str::<Envelope<RegionRow>>(body).unwrap().into_rows();

        assert_eq!(rows[0].avg_deal_size, 0.0);
        assert_eq!(rows[0].closed_amount, 0.0);
        assert_eq!(rows[0].open_amount, 40000.0);
    }

    #[test]
    fn test_null_labels_decode_as_empty() {
        let body = r#"{"data": [{"PRODUCT": null, "REGION": null, "total_amount": 5}]}"#;
        let rows = serde_json::from_str::<Envelope<LastMonthRow>>(body).unwrap().into_rows();
        assert_eq!(rows[0].product, "");
        assert_eq!(rows[0].region, "");
        assert_eq!(rows[0].total_amount, 5.0);

        let body = r#"{"data": [{"total_amount": 5}]}"#;
        let rows = serde_json::from_str::<Envelope<ProductRow>>(body).unwrap().into_rows();
        assert_eq!(rows[0].product, "");
    }

    #[test]
    fn test_rows_keep_received_order() {
        let body = r#"{"data": [{"product": "B"}, {"product": "A"}, {"product": "B"}]}"#;
        let rows = serde_json::from_str::<Envelope<ProductRow>>(body).unwrap().into_rows();
        let names: Vec<_> = rows.iter().map(|r| r.product.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "B"]);
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::ByRegion.path(), "/pipeline/by-region");
        assert_eq!(Endpoint::ByProduct.path(), "/pipeline/by-product");
        assert_eq!(Endpoint::LastMonth.to_string(), "/sales/last-month");
    }
}
