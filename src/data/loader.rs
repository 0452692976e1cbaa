use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a job-record dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one record per line (the usual `ds_salaries.csv`)
/// * `.json`    – `[{ "job_title": "...", "salary_in_usd": 123, ... }, ...]`
/// * `.parquet` – flat scalar columns
///
/// Files without a recognised extension are read as CSV.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        _ => load_csv(path),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} records from {} with columns {:?}",
        dataset.len(),
        path.display(),
        dataset.columns
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Dataset> {
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    // Cells stay text here; typing is decided per column.
    let mut rows: Vec<Vec<String>> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(|v| v.trim().to_string()).collect());
    }

    Ok(Dataset::from_text_rows(columns, rows)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "job_title": "Data Scientist", "employee_residence": "US", "salary_in_usd": 150000, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    // Union of keys, in order of first appearance.
    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let rows: Vec<Vec<CellValue>> = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(Dataset::from_rows(columns, rows)?)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one scalar column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let mut cells = Vec::with_capacity(columns.len());
            for col in batch.columns() {
                cells.push(extract_cell(col, row)?);
            }
            rows.push(cells);
        }
    }

    Ok(Dataset::from_rows(columns, rows)?)
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int8 => CellValue::Integer(col.as_primitive::<Int8Type>().value(row) as i64),
        DataType::Int16 => CellValue::Integer(col.as_primitive::<Int16Type>().value(row) as i64),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        other => bail!("Unsupported parquet column type {other:?}"),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::{mean_salary_by, RankedGroup};
    use crate::data::model::{DataError, Dimension, Record};
    use std::fs;
    use tempfile::tempdir;

    const CSV: &str = "\
work_year,experience_level,job_title,salary_in_usd,employee_residence,remote_ratio
2023,SE,Principal Data Scientist,85847,ES,100
2023,MI,ML Engineer,30000,US,100
2023,MI,ML Engineer,25500,US,100
2023,SE,Data Scientist,175000,CA,100
";

    #[test]
    fn test_load_csv_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ds_salaries.csv");
        fs::write(&path, CSV).unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.columns[0], "work_year");
        assert_eq!(ds.records[1].job_title.as_deref(), Some("ML Engineer"));
        assert_eq!(ds.records[3].salary_in_usd, Some(175000.0));
        assert_eq!(ds.options(Dimension::RemoteRatio).len(), 1);
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("opening CSV"));
    }

    #[test]
    fn test_missing_required_column_fails() {
        let text = "job_title,salary_in_usd\nDS,100\n";
        let err = read_csv(csv::Reader::from_reader(text.as_bytes())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::MissingColumn("employee_residence"))
        ));
    }

    #[test]
    fn test_ragged_csv_is_malformed() {
        let text = "job_title,employee_residence,experience_level,remote_ratio,salary_in_usd\nDS,US\n";
        assert!(read_csv(csv::Reader::from_reader(text.as_bytes())).is_err());
    }

    #[test]
    fn test_nan_salary_is_skipped_by_ranking() {
        let text = "\
job_title,employee_residence,experience_level,remote_ratio,salary_in_usd
A,US,SE,0,NaN
A,US,SE,0,100
B,US,SE,0,50
";
        let ds = read_csv(csv::Reader::from_reader(text.as_bytes())).unwrap();
        assert_eq!(ds.records[0].salary_in_usd, None);

        let rows: Vec<&Record> = ds.records.iter().collect();
        let ranking = mean_salary_by(&rows, Dimension::JobTitle);
        assert_eq!(
            ranking,
            vec![
                RankedGroup { key: CellValue::from("A"), mean: 100.0 },
                RankedGroup { key: CellValue::from("B"), mean: 50.0 },
            ]
        );
    }

    #[test]
    fn test_numeric_looking_categories_keep_their_text() {
        let text = "\
job_title,employee_residence,experience_level,remote_ratio,salary_in_usd
007,1e2,1.50,0,100
";
        let ds = read_csv(csv::Reader::from_reader(text.as_bytes())).unwrap();
        let rec = &ds.records[0];
        assert_eq!(rec.job_title.as_deref(), Some("007"));
        assert_eq!(rec.employee_residence.as_deref(), Some("1e2"));
        assert_eq!(rec.experience_level.as_deref(), Some("1.50"));
        assert_eq!(
            rec.cells[..3],
            [CellValue::from("007"), CellValue::from("1e2"), CellValue::from("1.50")]
        );
        assert_eq!(rec.remote_ratio, Some(0));
    }

    #[test]
    fn test_parse_json_records() {
        let text = r#"[
            {"job_title": "Data Engineer", "employee_residence": "GB", "experience_level": "MI",
             "remote_ratio": 0, "salary_in_usd": 65000.5, "company_size": "M"},
            {"job_title": "Data Engineer", "employee_residence": null, "experience_level": "SE",
             "remote_ratio": 50, "salary_in_usd": 90000}
        ]"#;
        let ds = parse_json(text).unwrap();
        assert_eq!(ds.len(), 2);
        assert!(ds.columns.iter().any(|c| c == "company_size"));
        assert_eq!(ds.records[0].salary_in_usd, Some(65000.5));
        assert_eq!(ds.records[1].employee_residence, None);
    }

    #[test]
    fn test_load_parquet_file() {
        use arrow::array::{Float64Array, Int64Array, StringArray};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("job_title", DataType::Utf8, false),
            Field::new("employee_residence", DataType::Utf8, false),
            Field::new("experience_level", DataType::Utf8, false),
            Field::new("remote_ratio", DataType::Int64, false),
            Field::new("salary_in_usd", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["DS", "DE"])),
                Arc::new(StringArray::from(vec!["US", "FR"])),
                Arc::new(StringArray::from(vec!["SE", "EN"])),
                Arc::new(Int64Array::from(vec![100, 0])),
                Arc::new(Float64Array::from(vec![120000.0, 45000.0])),
            ],
        )
        .unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("salaries.parquet");
        let file = fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].employee_residence.as_deref(), Some("FR"));
        assert_eq!(ds.records[0].remote_ratio, Some(100));
    }
}
