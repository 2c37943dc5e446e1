//! Input loading: JSON row arrays into the column-oriented raw table.

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, ScoreError};
use crate::model::{RawCell, RawTable};

/// Read a batch file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| ScoreError::io("<stdin>", e))?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(|e| ScoreError::io(path, e))
}

/// Parse a JSON array of row objects into a [`RawTable`].
///
/// Column order follows first appearance across the rows; keys absent
/// from a row become empty cells. Scalar values map onto raw cells,
/// anything structured (arrays, objects) is treated as empty.
pub fn table_from_json_str(input: &str) -> Result<RawTable> {
    let value: Value = serde_json::from_str(input)?;
    let rows = value
        .as_array()
        .ok_or_else(|| ScoreError::input("expected a JSON array of row objects"))?;

    let mut table = RawTable::new();
    let mut captions: Vec<String> = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let object = row.as_object().ok_or_else(|| {
            ScoreError::input(format!("row {index} is not a JSON object"))
        })?;
        for caption in object.keys() {
            if !captions.iter().any(|c| c == caption) {
                captions.push(caption.clone());
            }
        }
    }

    for caption in &captions {
        let cells: Vec<RawCell> = rows
            .iter()
            .map(|row| cell_from_value(row.get(caption)))
            .collect();
        table.insert_column(caption, cells);
    }

    debug!(
        rows = rows.len(),
        columns = captions.len(),
        "parsed input table"
    );
    Ok(table)
}

fn cell_from_value(value: Option<&Value>) -> RawCell {
    match value {
        Some(Value::Number(n)) => n.as_f64().map_or(RawCell::Empty, RawCell::Number),
        Some(Value::String(s)) => RawCell::Text(s.clone()),
        Some(Value::Bool(b)) => RawCell::Number(f64::from(u8::from(*b))),
        _ => RawCell::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_to_columns() {
        let table = table_from_json_str(
            r#"[
                {"product_url": "u1", "sales_30d": 100},
                {"product_url": "u2", "sales_30d": "3.2w", "commission": "15%"}
            ]"#,
        )
        .expect("parse");
        assert_eq!(table.rows(), 2);
        assert_eq!(table.width(), 3);
        // column absent from the first row pads with an empty cell
        let commission = table.column("commission").expect("column");
        assert_eq!(commission[0], RawCell::Empty);
        assert_eq!(commission[1], RawCell::Text("15%".to_string()));
    }

    #[test]
    fn test_null_cells_empty() {
        let table =
            table_from_json_str(r#"[{"product_url": "u1", "gmv_7d": null}]"#).expect("parse");
        assert_eq!(table.column("gmv_7d").expect("column")[0], RawCell::Empty);
    }

    #[test]
    fn test_non_array_rejected() {
        let err = table_from_json_str(r#"{"product_url": "u1"}"#).expect_err("reject");
        assert!(matches!(err, ScoreError::Input(_)));
    }

    #[test]
    fn test_non_object_row_rejected() {
        let err = table_from_json_str(r#"[1, 2]"#).expect_err("reject");
        assert!(matches!(err, ScoreError::Input(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = table_from_json_str("[{").expect_err("reject");
        assert!(matches!(err, ScoreError::Input(_)));
    }
}
