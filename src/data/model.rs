use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use thiserror::Error;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the source table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
/// Used as filter and group-by key downstream, so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl CellValue {
    /// Position of the variant in the sort order: null first, text last.
    fn rank(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Bool(_) => 1,
            CellValue::Integer(_) => 2,
            CellValue::Float(_) => 3,
            CellValue::String(_) => 4,
        }
    }
}

// Floats compare by `total_cmp`, which makes the order total and lets
// CellValue key a BTreeSet.
impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Integer(a), CellValue::Integer(b)) => a.cmp(b),
            (CellValue::Float(a), CellValue::Float(b)) => a.total_cmp(b),
            (CellValue::String(a), CellValue::String(b)) => a.cmp(b),
            // Different variants, or both null.
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            CellValue::Bool(b) => b.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::String(s) => s.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

/// Text read as a missing value. These are the tokens dataframe readers treat
/// as NA by default, so a CSV exported with `NaN` or `NULL` holes loads the same way.
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

impl CellValue {
    /// Infer a typed value from raw text: NA tokens → Null, then integer,
    /// float, boolean, and finally string.
    pub fn parse(s: &str) -> Self {
        if NA_TOKENS.contains(&s) {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::String(s.to_string())
    }

    /// Raw text kept verbatim, with NA tokens still read as Null.
    pub fn text(s: &str) -> Self {
        if NA_TOKENS.contains(&s) {
            CellValue::Null
        } else {
            CellValue::String(s.to_string())
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Dimension – the categorical attributes used for filtering and grouping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Country,
    JobTitle,
    ExperienceLevel,
    RemoteRatio,
}

impl Dimension {
    /// The four filter dimensions, in side-panel order.
    pub const ALL: [Dimension; 4] = [
        Dimension::Country,
        Dimension::JobTitle,
        Dimension::ExperienceLevel,
        Dimension::RemoteRatio,
    ];

    /// Source column name.
    pub fn column(self) -> &'static str {
        match self {
            Dimension::Country => "employee_residence",
            Dimension::JobTitle => "job_title",
            Dimension::ExperienceLevel => "experience_level",
            Dimension::RemoteRatio => "remote_ratio",
        }
    }

    /// Human-readable axis / widget label.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Country => "Country",
            Dimension::JobTitle => "Job Role",
            Dimension::ExperienceLevel => "Experience Level",
            Dimension::RemoteRatio => "Remote Work Ratio",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const SALARY_COLUMN: &str = "salary_in_usd";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DataError {
    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("dataset has no header row")]
    Empty,
}

// ---------------------------------------------------------------------------
// Record – one row of the dataset
// ---------------------------------------------------------------------------

/// A single job record. The typed fields are `None` when the source cell is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub job_title: Option<String>,
    pub employee_residence: Option<String>,
    pub experience_level: Option<String>,
    pub remote_ratio: Option<i64>,
    pub salary_in_usd: Option<f64>,
    /// The full raw row, aligned with [`Dataset::columns`].
    pub cells: Vec<CellValue>,
}

impl Record {
    /// The record's value for a dimension, as a group/filter key.
    pub fn dimension(&self, dim: Dimension) -> Option<CellValue> {
        match dim {
            Dimension::JobTitle => self.job_title.as_deref().map(CellValue::from),
            Dimension::Country => self.employee_residence.as_deref().map(CellValue::from),
            Dimension::ExperienceLevel => self.experience_level.as_deref().map(CellValue::from),
            Dimension::RemoteRatio => self.remote_ratio.map(CellValue::Integer),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed option lists per dimension.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Column names in source order.
    pub columns: Vec<String>,
    /// All records, in source order.
    pub records: Vec<Record>,
    /// For each dimension the sorted set of distinct non-null values.
    options: BTreeMap<Dimension, BTreeSet<CellValue>>,
}

impl Dataset {
    /// Build typed records from raw rows. Every row must be aligned with `columns`
    /// (short rows are padded with nulls).
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, DataError> {
        if columns.is_empty() {
            return Err(DataError::Empty);
        }

        let index_of = |name: &'static str| {
            columns
                .iter()
                .position(|c| c == name)
                .ok_or(DataError::MissingColumn(name))
        };
        let job_idx = index_of(Dimension::JobTitle.column())?;
        let country_idx = index_of(Dimension::Country.column())?;
        let exp_idx = index_of(Dimension::ExperienceLevel.column())?;
        let remote_idx = index_of(Dimension::RemoteRatio.column())?;
        let salary_idx = index_of(SALARY_COLUMN)?;

        let mut records = Vec::with_capacity(rows.len());
        for (row_no, mut cells) in rows.into_iter().enumerate() {
            cells.resize(columns.len(), CellValue::Null);

            let remote_ratio = match &cells[remote_idx] {
                CellValue::Null => None,
                CellValue::Integer(i) => Some(*i),
                CellValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
                other => {
                    return Err(DataError::InvalidValue {
                        row: row_no,
                        column: Dimension::RemoteRatio.column(),
                        value: other.to_string(),
                    })
                }
            };
            let salary_in_usd = match &cells[salary_idx] {
                CellValue::Null => None,
                other => {
                    let salary = other.as_f64().ok_or_else(|| DataError::InvalidValue {
                        row: row_no,
                        column: SALARY_COLUMN,
                        value: other.to_string(),
                    })?;
                    // NaN and infinities are holes, not salaries.
                    salary.is_finite().then_some(salary)
                }
            };

            records.push(Record {
                job_title: text_cell(&cells[job_idx]),
                employee_residence: text_cell(&cells[country_idx]),
                experience_level: text_cell(&cells[exp_idx]),
                remote_ratio,
                salary_in_usd,
                cells,
            });
        }

        Ok(Self::from_records(columns, records))
    }

    /// Build a dataset from untyped text rows (CSV). Columns are typed as a
    /// whole: the categorical columns keep their text verbatim, the remote
    /// ratio and salary parse cell by cell, and any other column becomes
    /// numeric only when all of its non-missing cells are numbers.
    pub fn from_text_rows(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, DataError> {
        let kinds: Vec<ColumnKind> = columns
            .iter()
            .enumerate()
            .map(|(i, name)| ColumnKind::infer(name, rows.iter().filter_map(|row| row.get(i))))
            .collect();

        let typed: Vec<Vec<CellValue>> = rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&kinds)
                    .map(|(text, kind)| kind.cell(text))
                    .collect::<Vec<CellValue>>()
            })
            .collect();

        Self::from_rows(columns, typed)
    }

    /// Wrap already-typed records and index their distinct dimension values.
    pub fn from_records(columns: Vec<String>, records: Vec<Record>) -> Self {
        let mut options: BTreeMap<Dimension, BTreeSet<CellValue>> =
            Dimension::ALL.iter().map(|&d| (d, BTreeSet::new())).collect();

        for rec in &records {
            for dim in Dimension::ALL {
                if let Some(val) = rec.dimension(dim) {
                    options.entry(dim).or_default().insert(val);
                }
            }
        }

        Dataset {
            columns,
            records,
            options,
        }
    }

    /// Sorted distinct non-null values of a dimension.
    pub fn options(&self, dim: Dimension) -> &BTreeSet<CellValue> {
        // Every dimension is seeded in `from_records`.
        &self.options[&dim]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// How a text column is turned into cells.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ColumnKind {
    Text,
    Parsed,
}

impl ColumnKind {
    fn infer<'a>(name: &str, mut cells: impl Iterator<Item = &'a String>) -> Self {
        let categorical = [Dimension::JobTitle, Dimension::Country, Dimension::ExperienceLevel];
        if categorical.iter().any(|d| d.column() == name) {
            return ColumnKind::Text;
        }
        if name == Dimension::RemoteRatio.column() || name == SALARY_COLUMN {
            return ColumnKind::Parsed;
        }
        if cells.all(|c| !matches!(CellValue::parse(c), CellValue::String(_))) {
            ColumnKind::Parsed
        } else {
            ColumnKind::Text
        }
    }

    fn cell(self, text: &str) -> CellValue {
        match self {
            ColumnKind::Text => CellValue::text(text),
            ColumnKind::Parsed => CellValue::parse(text),
        }
    }
}

/// Categorical value of a cell. Text is taken as is; typed sources (JSON,
/// Parquet) may hold numbers, which are shown in their display form.
fn text_cell(value: &CellValue) -> Option<String> {
    match value {
        CellValue::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(job: &str, country: &str, exp: &str, remote: i64, salary: f64) -> Record {
        Record {
            job_title: Some(job.to_string()),
            employee_residence: Some(country.to_string()),
            experience_level: Some(exp.to_string()),
            remote_ratio: Some(remote),
            salary_in_usd: Some(salary),
            cells: vec![
                CellValue::from(job),
                CellValue::from(country),
                CellValue::from(exp),
                CellValue::Integer(remote),
                CellValue::Float(salary),
            ],
        }
    }

    pub(crate) fn sample_dataset() -> Dataset {
        Dataset::from_records(
            vec![
                "job_title".into(),
                "employee_residence".into(),
                "experience_level".into(),
                "remote_ratio".into(),
                "salary_in_usd".into(),
            ],
            vec![
                record("A", "US", "EN", 100, 100.0),
                record("A", "US", "EN", 100, 300.0),
                record("B", "DE", "SE", 0, 200.0),
            ],
        )
    }

    fn header() -> Vec<String> {
        ["work_year", "job_title", "employee_residence", "experience_level", "remote_ratio", "salary_in_usd"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|c| CellValue::parse(c)).collect()
    }

    #[test]
    fn test_parse_infers_types() {
        assert_eq!(CellValue::parse(""), CellValue::Null);
        assert_eq!(CellValue::parse("50"), CellValue::Integer(50));
        assert_eq!(CellValue::parse("1.5"), CellValue::Float(1.5));
        assert_eq!(CellValue::parse("true"), CellValue::Bool(true));
        assert_eq!(CellValue::parse("SE"), CellValue::from("SE"));
    }

    #[test]
    fn test_options_are_sorted_and_drop_nulls() {
        let ds = Dataset::from_rows(
            header(),
            vec![
                row(&["2023", "ML Engineer", "US", "SE", "100", "150000"]),
                row(&["2023", "Data Analyst", "", "EN", "0", "60000"]),
                row(&["2022", "Data Analyst", "DE", "MI", "50", "80000"]),
                row(&["2022", "", "CA", "", "", "90000"]),
            ],
        )
        .unwrap();

        let jobs: Vec<String> = ds.options(Dimension::JobTitle).iter().map(|v| v.to_string()).collect();
        assert_eq!(jobs, vec!["Data Analyst", "ML Engineer"]);

        let countries: Vec<String> = ds.options(Dimension::Country).iter().map(|v| v.to_string()).collect();
        assert_eq!(countries, vec!["CA", "DE", "US"]);

        let remote: Vec<CellValue> = ds.options(Dimension::RemoteRatio).iter().cloned().collect();
        assert_eq!(remote, vec![CellValue::Integer(0), CellValue::Integer(50), CellValue::Integer(100)]);

        assert_eq!(ds.len(), 4);
        assert_eq!(ds.records[3].job_title, None);
        assert_eq!(ds.records[3].remote_ratio, None);
    }

    #[test]
    fn test_extra_columns_are_preserved() {
        let ds = Dataset::from_rows(header(), vec![row(&["2021", "BI Analyst", "FR", "MI", "50", "70000"])]).unwrap();
        assert_eq!(ds.records[0].cells[0], CellValue::Integer(2021));
        assert_eq!(ds.records[0].salary_in_usd, Some(70000.0));
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let columns = vec!["job_title".to_string(), "salary_in_usd".to_string()];
        let err = Dataset::from_rows(columns, Vec::new()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn("employee_residence")));
    }

    #[test]
    fn test_non_numeric_salary_is_an_error() {
        let err = Dataset::from_rows(header(), vec![row(&["2023", "DS", "US", "SE", "100", "lots"])]).unwrap_err();
        assert!(matches!(err, DataError::InvalidValue { row: 0, column: "salary_in_usd", .. }));
    }

    #[test]
    fn test_integral_float_remote_ratio_is_accepted() {
        let ds = Dataset::from_rows(header(), vec![row(&["2023", "DS", "US", "SE", "50.0", "1"])]).unwrap();
        assert_eq!(ds.records[0].remote_ratio, Some(50));
    }

    fn text_row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_na_tokens_parse_as_null() {
        for token in ["NaN", "nan", "NA", "N/A", "null", "NULL", "None", "<NA>"] {
            assert_eq!(CellValue::parse(token), CellValue::Null, "{token}");
            assert_eq!(CellValue::text(token), CellValue::Null, "{token}");
        }
        assert_eq!(CellValue::text("007"), CellValue::from("007"));
    }

    #[test]
    fn test_non_finite_salary_is_missing() {
        let ds = Dataset::from_rows(
            header(),
            vec![
                row(&["2023", "DS", "US", "SE", "100", "inf"]),
                vec![
                    CellValue::Integer(2023),
                    CellValue::from("DS"),
                    CellValue::from("US"),
                    CellValue::from("SE"),
                    CellValue::Integer(100),
                    CellValue::Float(f64::NAN),
                ],
                row(&["2023", "DS", "US", "SE", "100", "NaN"]),
            ],
        )
        .unwrap();
        assert!(ds.records.iter().all(|r| r.salary_in_usd.is_none()));
    }

    #[test]
    fn test_text_rows_keep_categorical_text_verbatim() {
        let ds = Dataset::from_text_rows(header(), vec![text_row(&["2023", "007", "1e2", "1.50", "0", "100"])])
            .unwrap();
        let rec = &ds.records[0];
        assert_eq!(rec.job_title.as_deref(), Some("007"));
        assert_eq!(rec.employee_residence.as_deref(), Some("1e2"));
        assert_eq!(rec.experience_level.as_deref(), Some("1.50"));
        assert_eq!(rec.cells[1], CellValue::from("007"));
        assert_eq!(rec.cells[3], CellValue::from("1.50"));
        assert_eq!(rec.cells[0], CellValue::Integer(2023));
        assert_eq!(rec.salary_in_usd, Some(100.0));
    }

    #[test]
    fn test_text_rows_distinct_spellings_stay_distinct() {
        let ds = Dataset::from_text_rows(
            header(),
            vec![
                text_row(&["2023", "DS", "US", "1.5", "0", "100"]),
                text_row(&["2023", "DS", "US", "1.50", "0", "200"]),
            ],
        )
        .unwrap();
        assert_eq!(ds.options(Dimension::ExperienceLevel).len(), 2);
    }

    #[test]
    fn test_text_rows_mixed_extra_column_stays_text() {
        let mut columns = header();
        columns.push("company_code".to_string());
        let ds = Dataset::from_text_rows(
            columns,
            vec![
                text_row(&["2023", "DS", "US", "SE", "0", "100", "0042"]),
                text_row(&["2023", "DS", "US", "SE", "0", "100", "X9"]),
                text_row(&["2023", "DS", "US", "SE", "0", "100", "NaN"]),
            ],
        )
        .unwrap();
        assert_eq!(ds.records[0].cells[6], CellValue::from("0042"));
        assert_eq!(ds.records[2].cells[6], CellValue::Null);
    }

    #[test]
    fn test_cell_order_is_total() {
        let mut values = vec![
            CellValue::from("b"),
            CellValue::Float(f64::NAN),
            CellValue::Integer(3),
            CellValue::Null,
            CellValue::Bool(true),
            CellValue::Float(1.0),
            CellValue::from("a"),
        ];
        values.sort();
        assert_eq!(values[0], CellValue::Null);
        assert_eq!(values[1], CellValue::Bool(true));
        assert_eq!(values[2], CellValue::Integer(3));
        assert_eq!(values[3], CellValue::Float(1.0));
        assert_eq!(values[5], CellValue::from("a"));
        assert_eq!(CellValue::Null.cmp(&CellValue::Null), Ordering::Equal);
    }
}
