//! On-disk fixture shared by the integration tests.
//!
//! Writes a real `encoded_data.zip` plus the six JSON model artifacts into a
//! temp dir. PCA vectors are produced by encoding every row with the fixture
//! models, so a selection equal to a row lands exactly on that row's vector.

#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use dinerec::prelude::*;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Feature columns the scaler was fitted on.
pub const COLUMNS: [&str; 8] = [
    "rating",
    "rating_count",
    "cost",
    "city_Bangalore",
    "city_Mumbai",
    "Chinese",
    "Italian",
    "Pizzas",
];

/// Row of "Pizza Place", the only Bangalore pizzeria.
pub const PIZZA_PLACE: usize = 0;
/// Row of "Dragon Wok", one of three Bangalore Chinese restaurants.
pub const DRAGON_WOK: usize = 1;
/// Row of "Lonely Diner", trained into the Bangalore cluster.
pub const LONELY_DINER: usize = 6;

#[allow(clippy::too_many_arguments)]
fn record(
    name: &str,
    city: &str,
    cuisine: &str,
    rating: f64,
    rating_count: f64,
    cost: f64,
    address: Option<&str>,
    link: Option<&str>,
) -> RestaurantRecord {
    RestaurantRecord {
        name: name.to_string(),
        city: city.to_string(),
        cuisine: cuisine.to_string(),
        rating,
        rating_count,
        cost,
        address: address.map(str::to_string),
        link: link.map(str::to_string),
    }
}

/// The cleaned dataset rows.
pub fn records() -> Vec<RestaurantRecord> {
    vec![
        record(
            "Pizza Place",
            "Bangalore",
            "Pizzas",
            4.2,
            120.0,
            400.0,
            Some("12 MG Road, Bangalore"),
            Some("https://order.example/pizza-place"),
        ),
        record(
            "Dragon Wok",
            "Bangalore",
            "Chinese",
            4.0,
            80.0,
            300.0,
            Some("5 Church Street"),
            Some("https://order.example/dragon-wok"),
        ),
        record("Golden Chopsticks", "Bangalore", "Chinese", 3.8, 40.0, 250.0, None, None),
        record(
            "Wok Express",
            "Bangalore",
            "Chinese",
            4.0,
            80.0,
            350.0,
            Some("9 Brigade Road"),
            None,
        ),
        record(
            "Trattoria Roma",
            "Mumbai",
            "Italian",
            4.5,
            200.0,
            600.0,
            Some("1 Marine Drive"),
            Some("https://order.example/trattoria-roma"),
        ),
        record(
            "Bombay Noodles",
            "Mumbai",
            "Chinese",
            3.9,
            60.0,
            200.0,
            None,
            Some("https://order.example/bombay-noodles"),
        ),
        record("Lonely Diner", "Mumbai", "Pizzas", 3.5, 10.0, 150.0, None, None),
        record("Noodle Bar", "Mumbai", "Chinese", 3.9, 60.0, 200.0, None, None),
    ]
}

/// Training labels: cluster 0 is Bangalore, cluster 1 is Mumbai, except for
/// the Lonely Diner.
pub fn labels() -> Vec<usize> {
    vec![0, 0, 0, 0, 1, 1, 0, 1]
}

fn city_encoder() -> OneHotEncoder {
    OneHotEncoder::new("city", vec!["Bangalore".into(), "Mumbai".into()]).expect("encoder")
}

fn cuisine_encoder() -> MultiLabelBinarizer {
    MultiLabelBinarizer::new(vec!["Chinese".into(), "Italian".into(), "Pizzas".into()])
        .expect("binarizer")
        .with_separator(",")
}

fn scaler() -> StandardScaler {
    StandardScaler::from_parts(
        vec![4.0, 100.0, 300.0, 0.5, 0.5, 0.3, 0.3, 0.3],
        vec![0.5, 100.0, 200.0, 0.5, 0.5, 0.5, 0.5, 0.5],
    )
    .expect("scaler")
}

fn pca() -> PCA {
    #[rustfmt::skip]
    let components = vec![
        0.6, 0.3, 0.5, 0.0, 0.0,  0.0, 0.0,  0.0,
        0.0, 0.0, 0.0, 0.7, -0.7, 0.0, 0.0,  0.0,
        0.0, 0.0, 0.0, 0.0, 0.0,  0.5, 0.5, -0.7,
    ];
    PCA::from_parts(
        vec![0.0; COLUMNS.len()],
        Matrix::from_vec(3, COLUMNS.len(), components).expect("components"),
    )
    .expect("pca")
}

fn kmeans(labels: Vec<usize>) -> KMeans {
    KMeans::from_parts(
        Matrix::from_vec(2, 3, vec![0.0, 1.4, 0.0, 0.0, -1.4, 0.0]).expect("centroids"),
        labels,
    )
    .expect("kmeans")
}

/// The fixture models with the default labels.
pub fn models() -> ModelBundle {
    ModelBundle {
        city_encoder: city_encoder(),
        cuisine_encoder: cuisine_encoder(),
        scaler: scaler(),
        pca: pca(),
        kmeans: kmeans(labels()),
        pca_input_columns: COLUMNS.iter().map(|s| (*s).to_string()).collect(),
    }
}

/// The selection describing dataset row `row`.
pub fn selection(row: usize, method: DistanceMethod) -> UserSelection {
    let r = &records()[row];
    UserSelection {
        city: r.city.clone(),
        cuisine: r.cuisine.clone(),
        rating: r.rating,
        rating_count: r.rating_count,
        cost: r.cost,
        method,
    }
}

/// CLI arguments selecting dataset row `row`.
pub fn selection_args(row: usize) -> Vec<String> {
    let r = &records()[row];
    vec![
        "--city".to_string(),
        r.city.clone(),
        "--cuisine".to_string(),
        r.cuisine.clone(),
        "--rating".to_string(),
        r.rating.to_string(),
        "--rating-count".to_string(),
        r.rating_count.to_string(),
        "--cost".to_string(),
        r.cost.to_string(),
    ]
}

/// Encoded vector of every row, in row order.
pub fn pca_vectors() -> Vec<Vec<f32>> {
    let models = models();
    let encoder = FeatureEncoder::from_models(&models);
    (0..records().len())
        .map(|row| {
            encoder
                .encode(&selection(row, DistanceMethod::Euclidean))
                .expect("fixture rows encode")
        })
        .collect()
}

fn cleaned_csv() -> Vec<u8> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for r in records() {
        writer.serialize(r).expect("serialize row");
    }
    writer.into_inner().expect("flush csv")
}

fn pca_csv() -> Vec<u8> {
    // pandas-style leading index column
    let mut out = String::from(",PC1,PC2,PC3\n");
    for (i, v) in pca_vectors().iter().enumerate() {
        let values: Vec<String> = v.iter().map(f32::to_string).collect();
        out.push_str(&format!("{i},{}\n", values.join(",")));
    }
    out.into_bytes()
}

/// A data directory holding every artifact.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    /// Writes the complete fixture.
    pub fn new() -> Self {
        let fixture = Self {
            dir: tempfile::tempdir().expect("temp dir"),
        };
        fixture.write_archive(&[
            ("cleaned_data.csv", cleaned_csv()),
            ("encoded_data.csv", pca_csv()),
        ]);

        let m = models();
        fixture.write_json("city_encoder.json", &m.city_encoder);
        fixture.write_json("cuisine_encoder.json", &m.cuisine_encoder);
        fixture.write_json("scaler.json", &m.scaler);
        fixture.write_json("pca_model.json", &m.pca);
        fixture.write_json("kmeans_model.json", &m.kmeans);
        fixture.write_json("pca_input_columns.json", &m.pca_input_columns);
        fs::write(fixture.path().join("images.png"), b"\x89PNG\r\n\x1a\n").expect("image");
        fixture
    }

    /// The data directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Artifact config rooted at the data directory.
    pub fn config(&self) -> ArtifactConfig {
        ArtifactConfig::default().with_data_dir(self.path())
    }

    /// Replaces the dataset archive.
    pub fn write_archive(&self, entries: &[(&str, Vec<u8>)]) {
        let file = File::create(self.path().join("encoded_data.zip")).expect("archive");
        let mut zip = zip::ZipWriter::new(file);
        for (name, body) in entries {
            zip.start_file(*name, SimpleFileOptions::default())
                .expect("start entry");
            zip.write_all(body).expect("write entry");
        }
        zip.finish().expect("finish archive");
    }

    /// Writes `value` as JSON to `name`.
    pub fn write_json<T: serde::Serialize + ?Sized>(&self, name: &str, value: &T) {
        let file = File::create(self.path().join(name)).expect("artifact");
        serde_json::to_writer_pretty(file, value).expect("write json");
    }

    /// Writes raw text to `name`.
    pub fn write_text(&self, name: &str, text: &str) {
        fs::write(self.path().join(name), text).expect("write");
    }

    /// Deletes `name` from the data directory.
    pub fn remove(&self, name: &str) {
        fs::remove_file(self.path().join(name)).expect("remove");
    }

    /// Rewrites the k-means artifact with other training labels.
    pub fn set_labels(&self, labels: Vec<usize>) {
        self.write_json("kmeans_model.json", &kmeans(labels));
    }
}
