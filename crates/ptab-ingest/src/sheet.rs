use serde_json::Value;
use tracing::debug;

use ptab_types::{FieldValue, Row};

use crate::config::IngestConfig;
use crate::error::{IngestError, IngestResult};
use crate::header::normalize_header;

/// Convert a sheet grid into rows.
///
/// The first grid row holds the headers. Columns whose header normalizes to
/// an empty name are dropped, missing trailing cells become `Null`, and rows
/// whose every value is blank are removed.
pub fn rows_from_grid(grid: &[Vec<FieldValue>], config: &IngestConfig) -> IngestResult<Vec<Row>> {
    let (header_row, body) = grid.split_first().ok_or(IngestError::MissingHeader)?;
    let headers: Vec<String> = header_row
        .iter()
        .map(|h| normalize_header(h, config))
        .collect();

    let mut rows = Vec::with_capacity(body.len());
    for cells in body {
        let mut row = Row::new();
        for (idx, field) in headers.iter().enumerate() {
            if field.is_empty() {
                continue;
            }
            let value = cells.get(idx).cloned().unwrap_or(FieldValue::Null);
            row.insert(field.clone(), value);
        }
        if row.is_blank() {
            continue;
        }
        if config.coerce_numeric {
            coerce_numeric(&mut row, config);
        }
        rows.push(row);
    }

    debug!(
        columns = headers.iter().filter(|h| !h.is_empty()).count(),
        rows = rows.len(),
        dropped = body.len() - rows.len(),
        "sheet grid ingested"
    );
    Ok(rows)
}

/// Parse rows from JSON.
///
/// Accepts either an array of flat records (already keyed by field name) or
/// an array of arrays, which is treated as a sheet grid.
pub fn rows_from_json(text: &str, config: &IngestConfig) -> IngestResult<Vec<Row>> {
    let items = match serde_json::from_str(text)? {
        Value::Array(items) => items,
        other => return Err(IngestError::NotTabular(json_kind(&other))),
    };

    if items.first().is_some_and(Value::is_array) {
        let grid = items
            .into_iter()
            .map(|item| match item {
                Value::Array(cells) => Ok(cells.into_iter().map(FieldValue::from).collect()),
                other => Err(IngestError::NotTabular(json_kind(&other))),
            })
            .collect::<IngestResult<Vec<Vec<FieldValue>>>>()?;
        return rows_from_grid(&grid, config);
    }

    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let mut row = Row::from_json(item).map_err(|_| IngestError::BadRecord { index })?;
        if row.is_blank() {
            continue;
        }
        if config.coerce_numeric {
            coerce_numeric(&mut row, config);
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Convert numeric-looking text in the configured price columns to numbers.
///
/// Thousands separators are ignored (`"35,000"` → `35000`); blank text
/// becomes `Null`; anything else that does not parse is left untouched.
pub fn coerce_numeric(row: &mut Row, config: &IngestConfig) {
    for field in &config.numeric_fields {
        let Some(FieldValue::Text(text)) = row.get(field) else {
            continue;
        };
        let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
        let coerced = if cleaned.is_empty() {
            FieldValue::Null
        } else {
            match cleaned.parse::<f64>() {
                Ok(n) if n.is_finite() => FieldValue::Number(n),
                _ => continue,
            }
        };
        row.insert(field.clone(), coerced);
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptab_types::fields::{CODE, MODEL};

    fn cell(s: &str) -> FieldValue {
        FieldValue::from(s)
    }

    #[test]
    fn grid_to_rows() {
        let grid = vec![
            vec![cell("모델"), cell("코드"), cell("A 급"), cell("LCD점멍(미파손)")],
            vec![cell("갤럭시Z플립3"), cell("F711"), FieldValue::from(120000), cell("5,000")],
        ];
        let rows = rows_from_grid(&grid, &IngestConfig::default()).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.get(MODEL), Some(&cell("갤럭시Z플립3")));
        assert_eq!(row.code().as_deref(), Some("F711"));
        assert_eq!(row.get("A급"), Some(&FieldValue::Number(120000.0)));
        assert_eq!(row.get("LCD점멍_미파손"), Some(&FieldValue::Number(5000.0)));
    }

    #[test]
    fn short_rows_padded_with_null() {
        let grid = vec![
            vec![cell("코드"), cell("단가")],
            vec![cell("X1")],
        ];
        let rows = rows_from_grid(&grid, &IngestConfig::default()).unwrap();
        assert_eq!(rows[0].get("단가"), Some(&FieldValue::Null));
    }

    #[test]
    fn blank_rows_and_empty_headers_dropped() {
        let grid = vec![
            vec![cell("코드"), FieldValue::Null, cell(" ")],
            vec![cell("X1"), cell("ignored"), cell("ignored")],
            vec![FieldValue::Null, cell("x"), cell("y")],
            vec![cell("  ")],
        ];
        let rows = rows_from_grid(&grid, &IngestConfig::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 1);
    }

    #[test]
    fn empty_grid_has_no_header() {
        let err = rows_from_grid(&[], &IngestConfig::default()).unwrap_err();
        assert!(matches!(err, IngestError::MissingHeader));
    }

    #[test]
    fn coercion_only_on_price_fields() {
        let mut row = Row::new()
            .with(CODE, "1234")
            .with("A급", " 1,500 ")
            .with("B급", "")
            .with("폐폰", "문의");
        coerce_numeric(&mut row, &IngestConfig::default());
        assert_eq!(row.get(CODE), Some(&cell("1234")));
        assert_eq!(row.get("A급"), Some(&FieldValue::Number(1500.0)));
        assert_eq!(row.get("B급"), Some(&FieldValue::Null));
        assert_eq!(row.get("폐폰"), Some(&cell("문의")));
    }

    #[test]
    fn coercion_can_be_disabled() {
        let config = IngestConfig { coerce_numeric: false, ..IngestConfig::default() };
        let grid = vec![vec![cell("A급")], vec![cell("100")]];
        let rows = rows_from_grid(&grid, &config).unwrap();
        assert_eq!(rows[0].get("A급"), Some(&cell("100")));
    }

    #[test]
    fn json_records() {
        let text = r#"[{"코드": "X1", "단가": 100}, {"코드": null}, {"코드": "X2", "A급": "300"}]"#;
        let rows = rows_from_json(text, &IngestConfig::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("A급"), Some(&FieldValue::Number(300.0)));
    }

    #[test]
    fn json_grid() {
        let text = r#"[["코드", "단가"], ["X1", 100]]"#;
        let rows = rows_from_json(text, &IngestConfig::default()).unwrap();
        assert_eq!(rows[0].get("단가"), Some(&FieldValue::Number(100.0)));
    }

    #[test]
    fn json_errors() {
        let config = IngestConfig::default();
        assert!(matches!(rows_from_json("{}", &config), Err(IngestError::NotTabular(_))));
        assert!(matches!(rows_from_json("[1]", &config), Err(IngestError::BadRecord { index: 0 })));
        assert!(matches!(rows_from_json("[", &config), Err(IngestError::Json(_))));
        assert!(matches!(
            rows_from_json(r#"[["a"], 5]"#, &config),
            Err(IngestError::NotTabular(_))
        ));
    }
}
