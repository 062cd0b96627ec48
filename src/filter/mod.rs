//! Cascading filter options.
//!
//! The selectors form a chain: city → cuisine → rating → rating count →
//! cost. The options offered at each level are the sorted distinct values
//! among rows matching every choice made above it. Everything here is a pure
//! function of the dataset and the choices, recomputed on every call.
//!
//! # Example
//!
//! ```
//! use dinerec::data::{Dataset, RestaurantRecord};
//! use dinerec::filter::{available_options, FilterState};
//!
//! let row = |city: &str, cuisine: &str, rating: f64| RestaurantRecord {
//!     name: "R".into(),
//!     city: city.into(),
//!     cuisine: cuisine.into(),
//!     rating,
//!     rating_count: 10.0,
//!     cost: 200.0,
//!     address: None,
//!     link: None,
//! };
//! let ds = Dataset::new(vec![row("Pune", "Thai", 4.0), row("Agra", "Thai", 3.5)]);
//!
//! let opts = available_options(&ds, &FilterState::new().with_city("Pune")).unwrap();
//! assert_eq!(opts.cities, vec!["Agra", "Pune"]);
//! assert_eq!(opts.cuisines, Some(vec!["Thai".to_string()]));
//! assert!(opts.ratings.is_none());
//! ```

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::{Dataset, RestaurantRecord};
use crate::error::{DinerecError, Result};
use crate::metrics::DistanceMethod;

/// One selector in the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterLevel {
    /// City selector.
    City,
    /// Cuisine selector.
    Cuisine,
    /// Rating selector.
    Rating,
    /// Rating count selector.
    RatingCount,
    /// Cost selector.
    Cost,
}

impl FilterLevel {
    /// All levels, top of the cascade first.
    pub const ALL: [FilterLevel; 5] = [
        FilterLevel::City,
        FilterLevel::Cuisine,
        FilterLevel::Rating,
        FilterLevel::RatingCount,
        FilterLevel::Cost,
    ];

    /// Label used in prompts and headings.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FilterLevel::City => "City",
            FilterLevel::Cuisine => "Cuisine",
            FilterLevel::Rating => "Rating",
            FilterLevel::RatingCount => "Rating Count",
            FilterLevel::Cost => "Cost",
        }
    }
}

impl fmt::Display for FilterLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FilterLevel::City => "city",
            FilterLevel::Cuisine => "cuisine",
            FilterLevel::Rating => "rating",
            FilterLevel::RatingCount => "rating count",
            FilterLevel::Cost => "cost",
        })
    }
}

/// Formats a numeric option the way it is displayed and typed.
///
/// Whole numbers print without a fractional part (`300`, not `300.0`).
#[must_use]
pub fn format_value(value: f64) -> String {
    value.to_string()
}

/// Sorted distinct cities.
#[must_use]
pub fn cities(dataset: &Dataset) -> Vec<String> {
    distinct_strings(dataset.records().iter(), |r| &r.city)
}

/// Sorted distinct cuisines among rows in `city`.
#[must_use]
pub fn cuisines(dataset: &Dataset, city: &str) -> Vec<String> {
    distinct_strings(
        dataset.records().iter().filter(|r| r.city == city),
        |r| &r.cuisine,
    )
}

/// Sorted distinct ratings among rows in `city` serving `cuisine`.
#[must_use]
pub fn ratings(dataset: &Dataset, city: &str, cuisine: &str) -> Vec<f64> {
    distinct_numbers(
        dataset
            .records()
            .iter()
            .filter(|r| r.city == city && r.cuisine == cuisine),
        |r| r.rating,
    )
}

/// Sorted distinct rating counts among rows additionally rated `rating`.
#[must_use]
pub fn rating_counts(dataset: &Dataset, city: &str, cuisine: &str, rating: f64) -> Vec<f64> {
    distinct_numbers(
        dataset
            .records()
            .iter()
            .filter(|r| r.city == city && r.cuisine == cuisine && r.rating == rating),
        |r| r.rating_count,
    )
}

/// Sorted distinct costs among rows additionally matching rating and count.
#[must_use]
pub fn costs(
    dataset: &Dataset,
    city: &str,
    cuisine: &str,
    rating: f64,
    rating_count: f64,
) -> Vec<f64> {
    distinct_numbers(
        dataset.records().iter().filter(|r| {
            r.city == city
                && r.cuisine == cuisine
                && r.rating == rating
                && r.rating_count == rating_count
        }),
        |r| r.cost,
    )
}

fn distinct_strings<'a, I, F>(rows: I, field: F) -> Vec<String>
where
    I: Iterator<Item = &'a RestaurantRecord>,
    F: Fn(&'a RestaurantRecord) -> &'a String,
{
    rows.map(field)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect()
}

fn distinct_numbers<'a, I, F>(rows: I, field: F) -> Vec<f64>
where
    I: Iterator<Item = &'a RestaurantRecord>,
    F: Fn(&'a RestaurantRecord) -> f64,
{
    let mut values: Vec<f64> = rows.map(field).collect();
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| a.total_cmp(b).is_eq());
    values
}

/// Choices made so far, top of the cascade first.
///
/// A level is only consulted when every level above it is chosen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Chosen city.
    pub city: Option<String>,
    /// Chosen cuisine.
    pub cuisine: Option<String>,
    /// Chosen rating.
    pub rating: Option<f64>,
    /// Chosen rating count.
    pub rating_count: Option<f64>,
    /// Chosen cost.
    pub cost: Option<f64>,
}

impl FilterState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the city.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Sets the cuisine.
    #[must_use]
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    /// Sets the rating.
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Sets the rating count.
    #[must_use]
    pub fn with_rating_count(mut self, rating_count: f64) -> Self {
        self.rating_count = Some(rating_count);
        self
    }

    /// Sets the cost.
    #[must_use]
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Validates a complete state into a [`UserSelection`].
    ///
    /// # Errors
    ///
    /// Returns [`DinerecError::MissingSelection`] for the first unchosen
    /// level, [`DinerecError::InvalidSelection`] when a choice is not among
    /// its level's options, or [`DinerecError::NoOptions`] when a level is
    /// empty.
    pub fn resolve(&self, dataset: &Dataset, method: DistanceMethod) -> Result<UserSelection> {
        let options = available_options(dataset, self)?;
        if let Some(level) = options.next_level {
            return Err(DinerecError::MissingSelection { level });
        }

        // every level is chosen and validated once next_level is None
        match (
            &self.city,
            &self.cuisine,
            self.rating,
            self.rating_count,
            self.cost,
        ) {
            (Some(city), Some(cuisine), Some(rating), Some(rating_count), Some(cost)) => {
                Ok(UserSelection {
                    city: city.clone(),
                    cuisine: cuisine.clone(),
                    rating,
                    rating_count,
                    cost,
                    method,
                })
            }
            _ => Err(DinerecError::MissingSelection {
                level: FilterLevel::City,
            }),
        }
    }
}

/// Option lists for every level down to the first unchosen one.
///
/// A level below the first unchosen level is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// City options (always computed).
    pub cities: Vec<String>,
    /// Cuisine options, once a city is chosen.
    pub cuisines: Option<Vec<String>>,
    /// Rating options, once a cuisine is chosen.
    pub ratings: Option<Vec<f64>>,
    /// Rating count options, once a rating is chosen.
    pub rating_counts: Option<Vec<f64>>,
    /// Cost options, once a rating count is chosen.
    pub costs: Option<Vec<f64>>,
    /// First level still waiting for a choice, `None` when all are chosen.
    pub next_level: Option<FilterLevel>,
}

/// Computes the cascade of options for the choices in `state`.
///
/// Each chosen value must be among the options of its level.
///
/// # Errors
///
/// Returns [`DinerecError::NoOptions`] when a reached level has no options
/// (e.g. a city with no cuisines), and [`DinerecError::InvalidSelection`]
/// when a choice is not offered at its level. Both are recoverable.
pub fn available_options(dataset: &Dataset, state: &FilterState) -> Result<FilterOptions> {
    let mut options = FilterOptions {
        cities: non_empty(cities(dataset), FilterLevel::City)?,
        ..FilterOptions::default()
    };

    let Some(city) = state.city.as_deref() else {
        options.next_level = Some(FilterLevel::City);
        return Ok(options);
    };
    require_string(&options.cities, city, FilterLevel::City)?;
    let cuisine_opts = non_empty(cuisines(dataset, city), FilterLevel::Cuisine)?;

    let Some(cuisine) = state.cuisine.as_deref() else {
        options.cuisines = Some(cuisine_opts);
        options.next_level = Some(FilterLevel::Cuisine);
        return Ok(options);
    };
    require_string(&cuisine_opts, cuisine, FilterLevel::Cuisine)?;
    options.cuisines = Some(cuisine_opts);
    let rating_opts = non_empty(ratings(dataset, city, cuisine), FilterLevel::Rating)?;

    let Some(rating) = state.rating else {
        options.ratings = Some(rating_opts);
        options.next_level = Some(FilterLevel::Rating);
        return Ok(options);
    };
    require_number(&rating_opts, rating, FilterLevel::Rating)?;
    options.ratings = Some(rating_opts);
    let count_opts = non_empty(
        rating_counts(dataset, city, cuisine, rating),
        FilterLevel::RatingCount,
    )?;

    let Some(rating_count) = state.rating_count else {
        options.rating_counts = Some(count_opts);
        options.next_level = Some(FilterLevel::RatingCount);
        return Ok(options);
    };
    require_number(&count_opts, rating_count, FilterLevel::RatingCount)?;
    options.rating_counts = Some(count_opts);
    let cost_opts = non_empty(
        costs(dataset, city, cuisine, rating, rating_count),
        FilterLevel::Cost,
    )?;

    let Some(cost) = state.cost else {
        options.costs = Some(cost_opts);
        options.next_level = Some(FilterLevel::Cost);
        return Ok(options);
    };
    require_number(&cost_opts, cost, FilterLevel::Cost)?;
    options.costs = Some(cost_opts);

    Ok(options)
}

fn non_empty<T>(values: Vec<T>, level: FilterLevel) -> Result<Vec<T>> {
    if values.is_empty() {
        Err(DinerecError::NoOptions { level })
    } else {
        Ok(values)
    }
}

fn require_string(options: &[String], value: &str, level: FilterLevel) -> Result<()> {
    if options.iter().any(|o| o == value) {
        Ok(())
    } else {
        Err(DinerecError::InvalidSelection {
            level,
            value: value.to_string(),
        })
    }
}

fn require_number(options: &[f64], value: f64, level: FilterLevel) -> Result<()> {
    if options.iter().any(|&o| o == value) {
        Ok(())
    } else {
        Err(DinerecError::InvalidSelection {
            level,
            value: format_value(value),
        })
    }
}

/// A complete, validated filter selection plus the ranking metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSelection {
    /// Selected city.
    pub city: String,
    /// Selected cuisine.
    pub cuisine: String,
    /// Selected rating.
    pub rating: f64,
    /// Selected rating count.
    pub rating_count: f64,
    /// Selected cost.
    pub cost: f64,
    /// Distance used for ranking.
    pub method: DistanceMethod,
}
