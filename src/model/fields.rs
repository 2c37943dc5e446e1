//! Canonical field set for product records.
//!
//! Source exports arrive with best-effort column captions; everything
//! downstream of the normalizer speaks in terms of these 17 canonical
//! fields. The numeric subset carries the business metrics the dimension
//! scorers read.

use serde::{Deserialize, Serialize};

/// One of the 17 canonical columns of the working table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    ProductName,
    ProductUrl,
    CategoryL1,
    Commission,
    Sales7d,
    Gmv7d,
    Sales30d,
    Gmv30d,
    LiveGmv30d,
    LiveGmv7d,
    CardGmv30d,
    Sales1y,
    Conv30d,
    RankType,
    RankNo,
    Influencer7d,
    SnapshotTag,
}

impl Field {
    /// All canonical fields, in output column order.
    pub const ALL: [Self; 17] = [
        Self::ProductName,
        Self::ProductUrl,
        Self::CategoryL1,
        Self::Commission,
        Self::Sales7d,
        Self::Gmv7d,
        Self::Sales30d,
        Self::Gmv30d,
        Self::LiveGmv30d,
        Self::LiveGmv7d,
        Self::CardGmv30d,
        Self::Sales1y,
        Self::Conv30d,
        Self::RankType,
        Self::RankNo,
        Self::Influencer7d,
        Self::SnapshotTag,
    ];

    /// The numeric business metrics (coerced to `f64` by the normalizer).
    pub const NUMERIC: [Self; 12] = [
        Self::Commission,
        Self::Sales7d,
        Self::Gmv7d,
        Self::Sales30d,
        Self::Gmv30d,
        Self::LiveGmv30d,
        Self::LiveGmv7d,
        Self::CardGmv30d,
        Self::Sales1y,
        Self::Conv30d,
        Self::RankNo,
        Self::Influencer7d,
    ];

    /// Canonical snake_case column name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ProductName => "product_name",
            Self::ProductUrl => "product_url",
            Self::CategoryL1 => "category_l1",
            Self::Commission => "commission",
            Self::Sales7d => "sales_7d",
            Self::Gmv7d => "gmv_7d",
            Self::Sales30d => "sales_30d",
            Self::Gmv30d => "gmv_30d",
            Self::LiveGmv30d => "live_gmv_30d",
            Self::LiveGmv7d => "live_gmv_7d",
            Self::CardGmv30d => "card_gmv_30d",
            Self::Sales1y => "sales_1y",
            Self::Conv30d => "conv_30d",
            Self::RankType => "rank_type",
            Self::RankNo => "rank_no",
            Self::Influencer7d => "influencer_7d",
            Self::SnapshotTag => "snapshot_tag",
        }
    }

    /// Look up a field by its canonical name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Whether this field is part of the numeric metric subset.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        !matches!(
            self,
            Self::ProductName
                | Self::ProductUrl
                | Self::CategoryL1
                | Self::RankType
                | Self::SnapshotTag
        )
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fields_count() {
        assert_eq!(Field::ALL.len(), 17);
        assert_eq!(Field::NUMERIC.len(), 12);
    }

    #[test]
    fn test_name_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_name("unknown_column"), None);
    }

    #[test]
    fn test_numeric_subset_consistent() {
        for field in Field::NUMERIC {
            assert!(field.is_numeric(), "{field} should be numeric");
        }
        assert!(!Field::ProductUrl.is_numeric());
        assert!(!Field::RankType.is_numeric());
    }
}
