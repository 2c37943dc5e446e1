//! Normalized product records and scored output rows.

use serde::{Deserialize, Serialize};

use super::fields::Field;

/// One normalized row of the working table.
///
/// Numeric metrics are `Option<f64>`: `None` marks a missing value,
/// distinct from zero, so the weight resolver can tell "present but
/// zero" apart from "absent". `product_url` is the deduplication key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_name: String,
    pub product_url: String,
    pub category_l1: String,
    pub commission: Option<f64>,
    pub sales_7d: Option<f64>,
    pub gmv_7d: Option<f64>,
    pub sales_30d: Option<f64>,
    pub gmv_30d: Option<f64>,
    pub live_gmv_30d: Option<f64>,
    pub live_gmv_7d: Option<f64>,
    pub card_gmv_30d: Option<f64>,
    pub sales_1y: Option<f64>,
    pub conv_30d: Option<f64>,
    pub rank_type: String,
    pub rank_no: Option<f64>,
    pub influencer_7d: Option<f64>,
    pub snapshot_tag: String,
}

impl ProductRecord {
    /// Read a numeric metric by field. Returns `None` for string fields.
    #[must_use]
    pub fn numeric(&self, field: Field) -> Option<f64> {
        match field {
            Field::Commission => self.commission,
            Field::Sales7d => self.sales_7d,
            Field::Gmv7d => self.gmv_7d,
            Field::Sales30d => self.sales_30d,
            Field::Gmv30d => self.gmv_30d,
            Field::LiveGmv30d => self.live_gmv_30d,
            Field::LiveGmv7d => self.live_gmv_7d,
            Field::CardGmv30d => self.card_gmv_30d,
            Field::Sales1y => self.sales_1y,
            Field::Conv30d => self.conv_30d,
            Field::RankNo => self.rank_no,
            Field::Influencer7d => self.influencer_7d,
            Field::ProductName
            | Field::ProductUrl
            | Field::CategoryL1
            | Field::RankType
            | Field::SnapshotTag => None,
        }
    }

    /// Write a numeric metric by field. String fields are ignored.
    pub fn set_numeric(&mut self, field: Field, value: Option<f64>) {
        match field {
            Field::Commission => self.commission = value,
            Field::Sales7d => self.sales_7d = value,
            Field::Gmv7d => self.gmv_7d = value,
            Field::Sales30d => self.sales_30d = value,
            Field::Gmv30d => self.gmv_30d = value,
            Field::LiveGmv30d => self.live_gmv_30d = value,
            Field::LiveGmv7d => self.live_gmv_7d = value,
            Field::CardGmv30d => self.card_gmv_30d = value,
            Field::Sales1y => self.sales_1y = value,
            Field::Conv30d => self.conv_30d = value,
            Field::RankNo => self.rank_no = value,
            Field::Influencer7d => self.influencer_7d = value,
            Field::ProductName
            | Field::ProductUrl
            | Field::CategoryL1
            | Field::RankType
            | Field::SnapshotTag => {}
        }
    }

    /// Write a string field by field. Numeric fields are ignored.
    pub fn set_string(&mut self, field: Field, value: String) {
        match field {
            Field::ProductName => self.product_name = value,
            Field::ProductUrl => self.product_url = value,
            Field::CategoryL1 => self.category_l1 = value,
            Field::RankType => self.rank_type = value,
            Field::SnapshotTag => self.snapshot_tag = value,
            _ => {}
        }
    }
}

/// A record that survived the quality gate, with its weighted total.
///
/// All 17 canonical fields are retained alongside `total_score`; no field
/// is dropped even when the active scenario assigns it zero weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: ProductRecord,
    pub total_score: f64,
}
