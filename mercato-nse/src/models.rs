//! NSE `quote-equity` payload.
#![allow(missing_docs)]

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityQuote {
    #[serde(default)]
    pub info: Info,
    pub price_info: Option<PriceInfo>,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub symbol: Option<String>,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub series: Option<String>,
    pub last_update_time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInfo {
    pub last_price: Option<f64>,
    pub change: Option<f64>,
    /// Already in percentage points.
    pub p_change: Option<f64>,
    pub previous_close: Option<f64>,
    pub open: Option<f64>,
    pub intra_day_high_low: Option<HighLow>,
    pub total_traded_volume: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HighLow {
    pub min: Option<f64>,
    pub max: Option<f64>,
}
