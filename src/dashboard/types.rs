//! Dashboard metric types

use serde::{Deserialize, Serialize};

/// Time range presets the dashboard series endpoints accept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsRange {
    /// Last 7 days
    Week,

    /// Last 30 days
    Month,

    /// Last 12 months
    Year,
}

impl StatsRange {
    /// The query-parameter value for this range
    pub fn as_str(&self) -> &'static str {
        match self {
            StatsRange::Week => "7d",
            StatsRange::Month => "30d",
            StatsRange::Year => "12m",
        }
    }
}

/// Headline dashboard figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_revenue: f64,

    pub total_orders: u64,

    pub total_customers: u64,

    pub total_visitors: u64,

    /// Revenue change versus the previous period, as a fraction
    pub revenue_change: Option<f64>,

    /// Order-count change versus the previous period, as a fraction
    pub orders_change: Option<f64>,
}

/// One point on the revenue chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenuePoint {
    /// Bucket label, e.g. a date or month
    pub period: String,

    pub revenue: f64,
}

/// One point on the customers chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPoint {
    pub period: String,

    pub count: u64,
}

/// One point on the visitors chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorPoint {
    pub period: String,

    pub count: u64,
}

/// A row in the recent-transactions table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    pub customer: Option<String>,

    pub amount: f64,

    pub status: Option<String>,

    pub created_at: Option<String>,
}

/// A row in the recent-orders table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    pub customer: Option<String>,

    pub total: f64,

    pub status: Option<String>,

    pub items_count: Option<u32>,

    pub created_at: Option<String>,
}

/// A row in the top-products table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    pub name: String,

    /// Units sold in the period
    pub sold: u64,

    pub revenue: f64,

    pub image: Option<String>,
}

/// A row in the top-customers table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCustomer {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    pub name: Option<String>,

    pub email: Option<String>,

    pub orders: u64,

    pub spent: f64,
}
