//! Field normalization: raw columns in, canonical records out.
//!
//! The normalizer never fails on cell content: malformed numerics
//! degrade to missing values. The only hard failure is a structurally
//! unusable table (no resolvable `product_url` column).

mod header;
mod numeric;

pub use header::resolve_caption;
pub use numeric::{parse_numeric_cell, parse_numeric_str};

use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::{Result, ScoreError};
use crate::model::{Field, ProductRecord, RawTable};

/// Per-batch column availability: which canonical numeric columns were
/// resolved from the input AND carry at least one non-missing value.
///
/// Computed once at normalization, immutable thereafter. "Present but
/// zero" counts as present; an absent or entirely-null column does not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnPresence {
    present: std::collections::BTreeSet<Field>,
}

impl ColumnPresence {
    /// Whether the given numeric column is usably populated.
    #[must_use]
    pub fn has(&self, field: Field) -> bool {
        self.present.contains(&field)
    }

    /// Both 7-day sales and 7-day GMV are usably populated.
    #[must_use]
    pub fn has_7d_pair(&self) -> bool {
        self.has(Field::Sales7d) && self.has(Field::Gmv7d)
    }

    /// Both 30-day sales and 30-day GMV are usably populated.
    #[must_use]
    pub fn has_30d_pair(&self) -> bool {
        self.has(Field::Sales30d) && self.has(Field::Gmv30d)
    }

    fn mark(&mut self, field: Field) {
        self.present.insert(field);
    }
}

/// A normalized batch: canonical records plus column availability.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub records: Vec<ProductRecord>,
    pub presence: ColumnPresence,
}

/// Normalize a raw table into canonical product records.
///
/// Every canonical numeric field exists on every record afterwards, with
/// `None` marking absent columns and unparsable cells. String fields are
/// whitespace-trimmed. Duplicate captions resolving to the same canonical
/// field keep the first occurrence.
pub fn normalize_table(table: &RawTable) -> Result<NormalizedBatch> {
    let mut resolved: BTreeMap<Field, &str> = BTreeMap::new();
    for caption in table.captions() {
        match resolve_caption(caption) {
            Some(field) => {
                if let Some(first) = resolved.get(&field) {
                    warn!(
                        field = %field,
                        kept = first,
                        dropped = caption,
                        "duplicate columns resolve to the same field"
                    );
                } else {
                    resolved.insert(field, caption);
                }
            }
            None => debug!(caption, "ignoring unrecognized column"),
        }
    }

    if !resolved.contains_key(&Field::ProductUrl) {
        return Err(ScoreError::missing_column(Field::ProductUrl.name()));
    }

    let rows = table.rows();
    let mut records = vec![ProductRecord::default(); rows];
    let mut presence = ColumnPresence::default();

    for (&field, &caption) in &resolved {
        let cells = table
            .column(caption)
            .ok_or_else(|| ScoreError::missing_column(caption))?;
        if field.is_numeric() {
            let mut any_value = false;
            for (record, cell) in records.iter_mut().zip(cells) {
                let value = parse_numeric_cell(cell);
                any_value |= value.is_some();
                record.set_numeric(field, value);
            }
            if any_value {
                presence.mark(field);
            }
        } else {
            for (record, cell) in records.iter_mut().zip(cells) {
                let text = match cell {
                    crate::model::RawCell::Number(v) => v.to_string(),
                    _ => cell.as_text().unwrap_or_default().to_string(),
                };
                record.set_string(field, text);
            }
        }
    }

    debug!(
        rows,
        columns = resolved.len(),
        has_7d = presence.has_7d_pair(),
        has_30d = presence.has_30d_pair(),
        "normalized batch"
    );

    Ok(NormalizedBatch { records, presence })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawCell;

    fn table(columns: &[(&str, Vec<RawCell>)]) -> RawTable {
        let mut t = RawTable::new();
        for (caption, cells) in columns {
            t.insert_column(*caption, cells.clone());
        }
        t
    }

    #[test]
    fn test_missing_url_column_rejected() {
        let t = table(&[("product_name", vec!["a".into(), "b".into()])]);
        let err = normalize_table(&t).expect_err("should reject");
        assert!(matches!(err, ScoreError::Shape(_)));
    }

    #[test]
    fn test_absent_column_is_missing_not_zero() {
        let t = table(&[
            ("product_url", vec!["u1".into()]),
            ("sales_30d", vec![RawCell::Number(0.0)]),
        ]);
        let batch = normalize_table(&t).expect("normalize");
        // present-but-zero is present
        assert!(batch.presence.has(Field::Sales30d));
        assert_eq!(batch.records[0].sales_30d, Some(0.0));
        // absent column is missing on every record
        assert!(!batch.presence.has(Field::Sales7d));
        assert_eq!(batch.records[0].sales_7d, None);
    }

    #[test]
    fn test_entirely_null_column_not_present() {
        let t = table(&[
            ("product_url", vec!["u1".into(), "u2".into()]),
            ("gmv_7d", vec![RawCell::Empty, RawCell::Text("n/a".into())]),
        ]);
        let batch = normalize_table(&t).expect("normalize");
        assert!(!batch.presence.has(Field::Gmv7d));
        assert_eq!(batch.records[1].gmv_7d, None);
    }

    #[test]
    fn test_chinese_captions_and_formatted_numbers() {
        let t = table(&[
            ("商品链接", vec!["https://x/1".into()]),
            ("近30天销售额", vec!["3.2w".into()]),
            ("佣金率", vec!["15%".into()]),
            ("商品名称", vec!["  面膜  ".into()]),
        ]);
        let batch = normalize_table(&t).expect("normalize");
        let rec = &batch.records[0];
        assert_eq!(rec.product_url, "https://x/1");
        assert_eq!(rec.gmv_30d, Some(32_000.0));
        assert_eq!(rec.commission, Some(0.15));
        assert_eq!(rec.product_name, "面膜");
    }

    #[test]
    fn test_duplicate_captions_first_wins() {
        let t = table(&[
            ("product_url", vec!["first".into()]),
            ("商品链接", vec!["second".into()]),
        ]);
        let batch = normalize_table(&t).expect("normalize");
        assert_eq!(batch.records[0].product_url, "first");
    }

    #[test]
    fn test_numeric_string_field_stringified() {
        let t = table(&[
            ("product_url", vec![RawCell::Number(123.0)]),
            ("rank_type", vec!["潜力榜".into()]),
        ]);
        let batch = normalize_table(&t).expect("normalize");
        assert_eq!(batch.records[0].product_url, "123");
        assert_eq!(batch.records[0].rank_type, "潜力榜");
    }
}
