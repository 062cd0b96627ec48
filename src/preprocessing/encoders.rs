//! Fitted categorical encoders.
//!
//! `OneHotEncoder` maps a single categorical column onto one indicator
//! column per category (`<feature>_<category>`). `MultiLabelBinarizer` maps a
//! set of labels onto one indicator column per class, named by the class
//! itself.
//!
//! Unseen values are rejected by `OneHotEncoder` and skipped with a warning
//! by `MultiLabelBinarizer`, unless the artifact sets `handle_unknown`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{DinerecError, Result};
use crate::traits::CategoricalEncoder;

/// What an encoder does with a value it never saw at fit time.
///
/// The derived default is the one-hot policy; see
/// [`MultiLabelBinarizer`] for the multi-label one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleUnknown {
    /// Reject the value with [`DinerecError::UnknownCategory`].
    #[default]
    Error,
    /// Encode the value as all zeros.
    Ignore,
}

fn index_of(values: &[String], what: &str) -> Result<HashMap<String, usize>> {
    if values.is_empty() {
        return Err(DinerecError::InvalidConfig {
            param: what.to_string(),
            value: "[]".to_string(),
            constraint: "at least one entry".to_string(),
        });
    }

    let mut index = HashMap::with_capacity(values.len());
    for (i, value) in values.iter().enumerate() {
        if index.insert(value.clone(), i).is_some() {
            return Err(DinerecError::InvalidConfig {
                param: what.to_string(),
                value: value.clone(),
                constraint: "unique entries".to_string(),
            });
        }
    }
    Ok(index)
}

/// One-hot encoder for a single categorical feature.
///
/// # Examples
///
/// ```
/// use dinerec::preprocessing::OneHotEncoder;
/// use dinerec::traits::CategoricalEncoder;
///
/// let enc = OneHotEncoder::new("city", vec!["Metro".into(), "Pune".into()]).unwrap();
/// assert_eq!(enc.feature_names(), vec!["city_Metro", "city_Pune"]);
/// assert_eq!(enc.encode("Pune").unwrap(), vec![0.0, 1.0]);
/// assert!(enc.encode("Atlantis").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "OneHotParams")]
pub struct OneHotEncoder {
    /// Input column name, used as the output column prefix.
    feature: String,
    /// Categories seen at fit time, in output order.
    categories: Vec<String>,
    /// Policy for unseen values.
    handle_unknown: HandleUnknown,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct OneHotParams {
    feature: String,
    categories: Vec<String>,
    #[serde(default)]
    handle_unknown: HandleUnknown,
}

impl TryFrom<OneHotParams> for OneHotEncoder {
    type Error = DinerecError;

    fn try_from(p: OneHotParams) -> Result<Self> {
        Ok(Self::new(p.feature, p.categories)?.with_handle_unknown(p.handle_unknown))
    }
}

impl OneHotEncoder {
    /// Creates an encoder over fitted categories.
    ///
    /// # Errors
    ///
    /// Returns an error if `categories` is empty or has duplicates.
    pub fn new(feature: impl Into<String>, categories: Vec<String>) -> Result<Self> {
        let index = index_of(&categories, "categories")?;
        Ok(Self {
            feature: feature.into(),
            categories,
            handle_unknown: HandleUnknown::Error,
            index,
        })
    }

    /// Sets the policy for unseen values.
    #[must_use]
    pub fn with_handle_unknown(mut self, handle_unknown: HandleUnknown) -> Self {
        self.handle_unknown = handle_unknown;
        self
    }

    /// Returns the input column name.
    #[must_use]
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Returns the fitted categories.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}

impl CategoricalEncoder for OneHotEncoder {
    fn feature_names(&self) -> Vec<String> {
        self.categories
            .iter()
            .map(|c| format!("{}_{c}", self.feature))
            .collect()
    }

    fn encode(&self, value: &str) -> Result<Vec<f32>> {
        let mut out = vec![0.0; self.categories.len()];
        match (self.index.get(value), self.handle_unknown) {
            (Some(&i), _) => out[i] = 1.0,
            (None, HandleUnknown::Ignore) => {}
            (None, HandleUnknown::Error) => {
                return Err(DinerecError::UnknownCategory {
                    encoder: self.feature.clone(),
                    value: value.to_string(),
                })
            }
        }
        Ok(out)
    }
}

/// Multi-label binarizer over a fixed class list.
///
/// A raw value is one label, or several labels when a `separator` is set
/// (e.g. `"Chinese,Thai"` with separator `","`). Each known label sets its
/// class column to 1. Unknown labels are skipped with a warning by default,
/// so an unseen value encodes as all zeros.
///
/// # Examples
///
/// ```
/// use dinerec::preprocessing::MultiLabelBinarizer;
/// use dinerec::traits::CategoricalEncoder;
///
/// let enc = MultiLabelBinarizer::new(vec!["Chinese".into(), "Italian".into(), "Thai".into()])
///     .unwrap()
///     .with_separator(",");
/// assert_eq!(enc.encode("Thai, Chinese").unwrap(), vec![1.0, 0.0, 1.0]);
/// assert_eq!(enc.encode("Martian").unwrap(), vec![0.0, 0.0, 0.0]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "BinarizerParams")]
pub struct MultiLabelBinarizer {
    /// Name reported in errors.
    name: String,
    /// Classes seen at fit time, in output order.
    classes: Vec<String>,
    /// Optional label separator inside one raw value.
    separator: Option<String>,
    /// Policy for unseen labels.
    handle_unknown: HandleUnknown,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct BinarizerParams {
    #[serde(default = "default_binarizer_name")]
    name: String,
    classes: Vec<String>,
    #[serde(default)]
    separator: Option<String>,
    #[serde(default = "default_binarizer_unknown")]
    handle_unknown: HandleUnknown,
}

fn default_binarizer_name() -> String {
    "cuisine".to_string()
}

fn default_binarizer_unknown() -> HandleUnknown {
    HandleUnknown::Ignore
}

impl TryFrom<BinarizerParams> for MultiLabelBinarizer {
    type Error = DinerecError;

    fn try_from(p: BinarizerParams) -> Result<Self> {
        let mut enc = Self::new(p.classes)?
            .with_name(p.name)
            .with_handle_unknown(p.handle_unknown);
        if let Some(sep) = p.separator.filter(|s| !s.is_empty()) {
            enc = enc.with_separator(sep);
        }
        Ok(enc)
    }
}

impl MultiLabelBinarizer {
    /// Creates a binarizer over fitted classes that ignores unknown labels.
    ///
    /// # Errors
    ///
    /// Returns an error if `classes` is empty or has duplicates.
    pub fn new(classes: Vec<String>) -> Result<Self> {
        let index = index_of(&classes, "classes")?;
        Ok(Self {
            name: default_binarizer_name(),
            classes,
            separator: None,
            handle_unknown: default_binarizer_unknown(),
            index,
        })
    }

    /// Sets the name reported in errors.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Splits raw values into several labels on `separator`.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Sets the policy for unseen labels.
    #[must_use]
    pub fn with_handle_unknown(mut self, handle_unknown: HandleUnknown) -> Self {
        self.handle_unknown = handle_unknown;
        self
    }

    /// Returns the fitted classes.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    fn labels<'a>(&self, value: &'a str) -> Vec<&'a str> {
        match &self.separator {
            Some(sep) => value
                .split(sep.as_str())
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect(),
            None => vec![value],
        }
    }
}

impl CategoricalEncoder for MultiLabelBinarizer {
    fn feature_names(&self) -> Vec<String> {
        self.classes.clone()
    }

    fn encode(&self, value: &str) -> Result<Vec<f32>> {
        let mut out = vec![0.0; self.classes.len()];
        for label in self.labels(value) {
            match (self.index.get(label), self.handle_unknown) {
                (Some(&i), _) => out[i] = 1.0,
                (None, HandleUnknown::Ignore) => {
                    warn!(encoder = %self.name, label, "ignoring unknown label");
                }
                (None, HandleUnknown::Error) => {
                    return Err(DinerecError::UnknownCategory {
                        encoder: self.name.clone(),
                        value: label.to_string(),
                    })
                }
            }
        }
        Ok(out)
    }
}
