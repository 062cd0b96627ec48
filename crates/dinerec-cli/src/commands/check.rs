//! Artifact validation

use std::fs;

use dinerec::traits::{ClusterModel, Transformer};
use serde::Serialize;

use super::Settings;
use crate::error::Result;
use crate::output;

#[derive(Serialize)]
struct CheckReport {
    data_dir: String,
    archive_bytes: Option<u64>,
    rows: usize,
    n_features: usize,
    n_components: usize,
    pca_columns: Vec<String>,
    n_clusters: usize,
    cluster_sizes: Vec<usize>,
    cities: usize,
    cuisines: usize,
    home_image: bool,
}

/// Load every artifact and report shapes
pub(crate) fn run(settings: &Settings) -> Result<()> {
    let ctx = settings.load_context()?;
    let models = ctx.models();

    let report = CheckReport {
        data_dir: ctx.config().data_dir.display().to_string(),
        archive_bytes: fs::metadata(ctx.config().archive_path())
            .ok()
            .map(|m| m.len()),
        rows: ctx.dataset().len(),
        n_features: models.scaler.n_features_in(),
        n_components: models.pca.n_components(),
        pca_columns: ctx.pca_vectors().columns().to_vec(),
        n_clusters: models.kmeans.n_clusters(),
        cluster_sizes: models.kmeans.cluster_sizes(),
        cities: models.city_encoder.categories().len(),
        cuisines: models.cuisine_encoder.classes().len(),
        home_image: ctx.home_image().is_some(),
    };

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::section("Artifacts");
    output::kv("Data dir", &report.data_dir);
    match report.archive_bytes {
        Some(bytes) => output::kv("Archive", output::format_size(bytes)),
        None => output::kv("Archive", "absent (using extracted data)"),
    }
    output::kv("Restaurants", report.rows);
    output::kv("Feature columns", report.n_features);
    output::kv("PCA components", report.n_components);
    output::kv("PCA columns", report.pca_columns.join(", "));
    output::kv("City categories", report.cities);
    output::kv("Cuisine classes", report.cuisines);

    output::section("Clusters");
    for (k, size) in report.cluster_sizes.iter().enumerate() {
        output::kv(&format!("Cluster {k}"), size);
    }

    if !report.home_image {
        output::warning("Home image not found");
    }
    if !settings.quiet {
        output::success("All artifacts loaded and consistent");
    }
    Ok(())
}
