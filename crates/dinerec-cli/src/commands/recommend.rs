//! The recommendation action

use std::io::{self, Write};

use dinerec::config::RecommenderConfig;
use dinerec::filter::FilterState;
use dinerec::metrics::DistanceMethod;
use dinerec::recommend::{Recommendations, Recommender};
use dinerec::render::{self, ResultCard, NO_RESULTS};
use serde::Serialize;

use super::Settings;
use crate::error::Result;
use crate::output;

#[derive(Serialize)]
struct Report<'a> {
    heading: String,
    method: DistanceMethod,
    cluster: usize,
    results: &'a [ResultCard],
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

/// Validate a full selection and print its recommendations
pub(crate) fn run(settings: &Settings, state: &FilterState, method: DistanceMethod) -> Result<()> {
    let ctx = settings.load_context()?;
    let selection = state.resolve(ctx.dataset(), method)?;
    let recs = Recommender::with_config(&ctx, &settings.recommender).recommend(&selection)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if settings.json {
        write_json(&mut out, &recs, method, &settings.recommender)
    } else {
        write_results(&mut out, &recs, method, &settings.recommender)
    }
}

/// Write recommendations as a heading followed by cards
pub(crate) fn write_results<W: Write>(
    w: &mut W,
    recs: &Recommendations<'_>,
    method: DistanceMethod,
    config: &RecommenderConfig,
) -> Result<()> {
    if recs.is_empty() {
        output::write_warning(w, NO_RESULTS)?;
        return Ok(());
    }
    output::write_heading(w, &render::heading(config.top_k, method))?;
    for card in render::cards(recs, config) {
        output::write_card(w, &card)?;
    }
    Ok(())
}

/// Write recommendations as one JSON document
pub(crate) fn write_json<W: Write>(
    w: &mut W,
    recs: &Recommendations<'_>,
    method: DistanceMethod,
    config: &RecommenderConfig,
) -> Result<()> {
    let cards = render::cards(recs, config);
    let report = Report {
        heading: render::heading(config.top_k, method),
        method,
        cluster: recs.cluster(),
        results: &cards,
        message: recs.is_empty().then_some(NO_RESULTS),
    };
    serde_json::to_writer_pretty(&mut *w, &report)?;
    writeln!(w)?;
    Ok(())
}
