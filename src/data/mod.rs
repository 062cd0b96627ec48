//! Restaurant datasets.
//!
//! Two row-aligned tables are loaded from CSV: the cleaned restaurant rows
//! ([`Dataset`]) and the PCA vectors precomputed for those same rows
//! ([`PcaFrame`]). Row `i` of one always describes the same restaurant as
//! row `i` of the other; the loader checks the row counts agree.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DinerecError, Result};
use crate::primitives::Matrix;

/// Columns the cleaned dataset must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = ["name", "city", "cuisine", "rating", "rating_count", "cost"];

/// One row of the cleaned restaurant dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    /// Restaurant name.
    pub name: String,
    /// City the restaurant is in.
    pub city: String,
    /// Cuisine label, possibly several joined by a separator.
    pub cuisine: String,
    /// Average rating.
    pub rating: f64,
    /// Number of ratings.
    pub rating_count: f64,
    /// Cost for the listed cuisine.
    pub cost: f64,
    /// Street address, if known.
    #[serde(default)]
    pub address: Option<String>,
    /// Online ordering link, if known.
    #[serde(default)]
    pub link: Option<String>,
}

impl RestaurantRecord {
    fn normalize(mut self) -> Self {
        self.address = non_blank(self.address);
        self.link = non_blank(self.link);
        self
    }
}

// pandas writes missing values as empty fields or the literal "nan"
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && !v.eq_ignore_ascii_case("nan")
    })
}

/// The cleaned restaurant dataset, indexed by row position.
///
/// # Examples
///
/// ```
/// use dinerec::data::Dataset;
///
/// let csv = "name,city,cuisine,rating,rating_count,cost,address\n\
///            Pizza Place,Metro,Italian,4.5,100,300,1 Main St\n";
/// let ds = Dataset::from_reader(csv.as_bytes(), "inline.csv").expect("valid CSV");
/// assert_eq!(ds.len(), 1);
/// assert_eq!(ds.get(0).unwrap().address.as_deref(), Some("1 Main St"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<RestaurantRecord>,
}

impl Dataset {
    /// Creates a dataset from records already in row order.
    #[must_use]
    pub fn new(records: Vec<RestaurantRecord>) -> Self {
        Self { records }
    }

    /// Loads the cleaned dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, a required column is absent,
    /// or a row does not parse.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = open(path)?;
        Self::from_reader(file, path)
    }

    /// Loads the cleaned dataset from any CSV reader.
    ///
    /// `origin` only labels errors.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is absent or a row does not parse.
    pub fn from_reader<R: Read>(reader: R, origin: impl AsRef<Path>) -> Result<Self> {
        let origin = origin.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| csv_error(origin, &e))?
            .clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(DinerecError::MissingColumn {
                    path: origin.to_path_buf(),
                    column: column.to_string(),
                });
            }
        }

        let records = reader
            .deserialize::<RestaurantRecord>()
            .map(|row| {
                row.map(RestaurantRecord::normalize)
                    .map_err(|e| csv_error(origin, &e))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { records })
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the dataset has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the row at `idx`.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&RestaurantRecord> {
        self.records.get(idx)
    }

    /// Returns all rows in order.
    #[must_use]
    pub fn records(&self) -> &[RestaurantRecord] {
        &self.records
    }
}

/// Precomputed PCA vectors, one per cleaned-dataset row.
#[derive(Debug, Clone, PartialEq)]
pub struct PcaFrame {
    columns: Vec<String>,
    vectors: Matrix<f32>,
}

impl PcaFrame {
    /// Creates a frame from column names and a vector matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the column count differs from the matrix width.
    pub fn new(columns: Vec<String>, vectors: Matrix<f32>) -> Result<Self> {
        if columns.len() != vectors.n_cols() {
            return Err(DinerecError::dimension_mismatch(
                "pca columns",
                vectors.n_cols(),
                columns.len(),
            ));
        }
        Ok(Self { columns, vectors })
    }

    /// Loads the PCA dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or a value is not numeric.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = open(path)?;
        Self::from_reader(file, path)
    }

    /// Loads the PCA dataset from any CSV reader.
    ///
    /// A leading index column (empty header, or `Unnamed: 0` as written by
    /// pandas) is skipped; every other column must be numeric.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no numeric columns or a value does not
    /// parse.
    pub fn from_reader<R: Read>(reader: R, origin: impl AsRef<Path>) -> Result<Self> {
        let origin = origin.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| csv_error(origin, &e))?
            .clone();
        let skip = usize::from(
            headers
                .get(0)
                .is_some_and(|h| h.is_empty() || h.starts_with("Unnamed")),
        );
        let columns: Vec<String> = headers.iter().skip(skip).map(str::to_string).collect();
        if columns.is_empty() {
            return Err(DinerecError::Csv {
                path: origin.to_path_buf(),
                message: "no PCA component columns".to_string(),
            });
        }

        let mut data = Vec::new();
        let mut n_rows = 0;
        for (line, row) in reader.records().enumerate() {
            let row = row.map_err(|e| csv_error(origin, &e))?;
            for (field, column) in row.iter().skip(skip).zip(&columns) {
                let value = field.parse::<f32>().map_err(|_| DinerecError::Csv {
                    path: origin.to_path_buf(),
                    message: format!(
                        "line {}: column '{column}' value '{field}' is not numeric",
                        line + 2
                    ),
                })?;
                data.push(value);
            }
            n_rows += 1;
        }

        let vectors = Matrix::from_vec(n_rows, columns.len(), data).map_err(|e| {
            DinerecError::Csv {
                path: origin.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        Ok(Self { columns, vectors })
    }

    /// Returns the component column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.vectors.n_rows()
    }

    /// Returns the vector width.
    #[must_use]
    pub fn n_components(&self) -> usize {
        self.vectors.n_cols()
    }

    /// Returns the PCA vector of row `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    #[must_use]
    pub fn vector(&self, idx: usize) -> &[f32] {
        self.vectors.row(idx)
    }

    /// Returns the underlying matrix.
    #[must_use]
    pub fn vectors(&self) -> &Matrix<f32> {
        &self.vectors
    }
}

fn open(path: &Path) -> Result<File> {
    if !path.exists() {
        return Err(DinerecError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    File::open(path).map_err(|e| DinerecError::io(path, e))
}

fn csv_error(origin: &Path, err: &csv::Error) -> DinerecError {
    DinerecError::Csv {
        path: origin.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
#[path = "data_tests.rs"]
mod tests;
