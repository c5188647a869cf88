use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{FieldValue, RawTable};
use super::DataError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a raw startup table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with column names, one startup per row
/// * `.json`    – `[{ "Startup Name": "...", ...columns }, ...]`
/// * `.parquet` – scalar columns (string / int / float / bool)
pub fn load_file(path: &Path) -> Result<RawTable, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => read_csv(File::open(path)?)?,
        "json" => read_json(File::open(path)?)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "loaded {}: {} rows, {} columns",
        path.display(),
        table.len(),
        table.headers.len()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, every other row one startup.
/// Cell types are guessed per cell; empty cells become `Null`.
pub fn read_csv<R: Read>(reader: R) -> Result<RawTable, DataError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DataError::Parse(format!("reading CSV headers: {e}")))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| DataError::Parse(format!("CSV row {row_no}: {e}")))?;
        let mut row = BTreeMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if let Some(name) = headers.get(col_idx) {
                row.insert(name.clone(), guess_cell_type(value));
            }
        }
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}

fn guess_cell_type(s: &str) -> FieldValue {
    if s.is_empty() {
        return FieldValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return FieldValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return FieldValue::Float(f);
    }
    if s == "true" || s == "false" {
        return FieldValue::Bool(s == "true");
    }
    FieldValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Startup Name": "Acme", "Industry": "FinTech", "Employees": 120 },
///   ...
/// ]
/// ```
///
/// Headers are the union of keys in order of first appearance.
pub fn read_json<R: Read>(mut reader: R) -> Result<RawTable, DataError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let root: JsonValue =
        serde_json::from_str(&text).map_err(|e| DataError::Parse(format!("parsing JSON: {e}")))?;

    let records = root
        .as_array()
        .ok_or_else(|| DataError::Parse("expected top-level JSON array".to_string()))?;

    let mut headers: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| DataError::Parse(format!("row {i} is not a JSON object")))?;

        let mut row = BTreeMap::new();
        for (key, val) in obj {
            if !headers.iter().any(|h| h == key) {
                headers.push(key.clone());
            }
            row.insert(key.clone(), json_to_field(val));
        }
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}

fn json_to_field(val: &JsonValue) -> FieldValue {
    match val {
        JsonValue::String(s) => FieldValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                FieldValue::Float(f)
            } else {
                FieldValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => FieldValue::Bool(*b),
        JsonValue::Null => FieldValue::Null,
        other => FieldValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of scalar startup columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<RawTable, DataError> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| DataError::Parse(format!("reading parquet metadata: {e}")))?;
    let reader = builder
        .build()
        .map_err(|e| DataError::Parse(format!("building parquet reader: {e}")))?;

    let mut headers: Vec<String> = Vec::new();
    let mut rows = Vec::new();

    for batch_result in reader {
        let batch =
            batch_result.map_err(|e| DataError::Parse(format!("reading parquet batch: {e}")))?;
        let schema = batch.schema();

        if headers.is_empty() {
            headers = schema.fields().iter().map(|f| f.name().clone()).collect();
        }

        for row in 0..batch.num_rows() {
            let mut cells = BTreeMap::new();
            for (col_idx, field) in schema.fields().iter().enumerate() {
                let value = extract_field_value(batch.column(col_idx), row);
                cells.insert(field.name().clone(), value);
            }
            rows.push(cells);
        }
    }

    Ok(RawTable { headers, rows })
}

/// Extract a single scalar from an Arrow column at a given row.
fn extract_field_value(col: &Arc<dyn Array>, row: usize) -> FieldValue {
    if col.is_null(row) {
        return FieldValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            if let Some(s) = col.as_any().downcast_ref::<StringArray>() {
                FieldValue::String(s.value(row).to_string())
            } else {
                // LargeStringArray
                let s = col.as_string::<i64>();
                FieldValue::String(s.value(row).to_string())
            }
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            FieldValue::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            FieldValue::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            FieldValue::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            FieldValue::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>().unwrap();
            FieldValue::Bool(arr.value(row))
        }
        other => {
            log::warn!("unsupported parquet column type {other:?}, treating cell as null");
            FieldValue::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_cells_are_type_guessed() {
        let csv = "Startup Name,Employees,Market Share (%),Profitable,Notes\n\
                   Acme,120,3.5,true,\n\
                   Globex,9,0.2,0,fresh seed\n";
        let table = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.headers.len(), 5);
        assert_eq!(table.len(), 2);
        let first = &table.rows[0];
        assert_eq!(first["Employees"], FieldValue::Integer(120));
        assert_eq!(first["Market Share (%)"], FieldValue::Float(3.5));
        assert_eq!(first["Profitable"], FieldValue::Bool(true));
        assert_eq!(first["Notes"], FieldValue::Null);
        assert_eq!(
            table.rows[1]["Notes"],
            FieldValue::String("fresh seed".into())
        );
    }

    #[test]
    fn json_records_build_union_headers() {
        let json = r#"[
            {"Startup Name": "Acme", "Employees": 120},
            {"Startup Name": "Globex", "Employees": 9, "Founded Year": 2019}
        ]"#;
        let table = read_json(json.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.headers.contains(&"Founded Year".to_string()));
        assert_eq!(table.rows[1]["Founded Year"], FieldValue::Integer(2019));
    }

    #[test]
    fn json_non_object_row_is_a_parse_error() {
        let err = read_json("[1, 2, 3]".as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("startups.xlsx")).unwrap_err();
        match err {
            DataError::UnsupportedFormat(ext) => assert_eq!(ext, "xlsx"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn parquet_round_trips_scalar_columns() {
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("Startup Name", DataType::Utf8, false),
            Field::new("Valuation (M USD)", DataType::Float64, false),
            Field::new("Employees", DataType::Int64, false),
            Field::new("Profitable", DataType::Boolean, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Acme", "Globex"])),
                Arc::new(Float64Array::from(vec![1200.0, 5.0])),
                Arc::new(Int64Array::from(vec![10, 500])),
                Arc::new(BooleanArray::from(vec![true, false])),
            ],
        )
        .unwrap();

        let path = std::env::temp_dir().join(format!(
            "startup-insights-loader-test-{}.parquet",
            std::process::id()
        ));
        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.rows[0]["Startup Name"],
            FieldValue::String("Acme".into())
        );
        assert_eq!(
            table.rows[1]["Valuation (M USD)"],
            FieldValue::Float(5.0)
        );
        assert_eq!(table.rows[0]["Profitable"], FieldValue::Bool(true));
    }
}
