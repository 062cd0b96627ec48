//! Interactive session walking the filter cascade with numbered menus

use std::io::{self, BufRead, Write};

use colored::Colorize;
use dinerec::config::RecommenderConfig;
use dinerec::filter::{available_options, format_value, FilterLevel, FilterOptions, FilterState};
use dinerec::loading::AppContext;
use dinerec::metrics::DistanceMethod;
use dinerec::recommend::Recommender;
use tracing::debug;

use super::recommend::write_results;
use super::Settings;
use crate::error::Result;
use crate::output;

enum Round {
    Done,
    Quit,
}

/// Run the interactive session on stdin/stdout
pub(crate) fn run(settings: &Settings) -> Result<()> {
    let ctx = settings.load_context()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    session(&ctx, &settings.recommender, stdin.lock(), stdout.lock())
}

/// Loop over searches until the user quits or input ends
pub(crate) fn session<R: BufRead, W: Write>(
    ctx: &AppContext,
    config: &RecommenderConfig,
    mut input: R,
    mut out: W,
) -> Result<()> {
    writeln!(
        out,
        "{}",
        "Smart Restaurant Recommender".yellow().bold()
    )?;
    writeln!(out, "Press Enter to take the first option, q to quit.")?;

    loop {
        if let Round::Quit = search(ctx, config, &mut input, &mut out)? {
            return Ok(());
        }
        write!(out, "\nSearch again? [Y/n]: ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        if matches!(line.trim().to_ascii_lowercase().as_str(), "n" | "no" | "q" | "quit") {
            return Ok(());
        }
    }
}

fn search<R: BufRead, W: Write>(
    ctx: &AppContext,
    config: &RecommenderConfig,
    input: &mut R,
    out: &mut W,
) -> Result<Round> {
    let mut state = FilterState::new();

    loop {
        let opts = match available_options(ctx.dataset(), &state) {
            Ok(opts) => opts,
            Err(e) if e.is_recoverable() => {
                output::write_warning(out, &e.to_string())?;
                return Ok(Round::Done);
            }
            Err(e) => return Err(e.into()),
        };
        let Some(level) = opts.next_level else {
            break;
        };

        let mut choices = choices(&state, level, &opts);
        let labels: Vec<String> = choices.iter().map(|(label, _)| label.clone()).collect();
        let Some(idx) = choose(input, out, &format!("Select {}", level.label()), &labels)? else {
            return Ok(Round::Quit);
        };
        state = choices.swap_remove(idx).1;
        debug!(%level, choice = %labels[idx], "filter chosen");
    }

    let methods: Vec<String> = DistanceMethod::ALL.iter().map(ToString::to_string).collect();
    let Some(m) = choose(input, out, "Select Distance Method", &methods)? else {
        return Ok(Round::Quit);
    };
    let method = DistanceMethod::ALL[m];

    let outcome = state
        .resolve(ctx.dataset(), method)
        .and_then(|selection| Recommender::with_config(ctx, config).recommend(&selection));
    match outcome {
        Ok(recs) => write_results(out, &recs, method, config)?,
        Err(e) if e.is_recoverable() => output::write_warning(out, &e.to_string())?,
        Err(e) => return Err(e.into()),
    }
    Ok(Round::Done)
}

/// Every option of `level` paired with the state choosing it
fn choices(state: &FilterState, level: FilterLevel, opts: &FilterOptions) -> Vec<(String, FilterState)> {
    let numbers = |values: &Option<Vec<f64>>, set: fn(FilterState, f64) -> FilterState| {
        values
            .iter()
            .flatten()
            .map(|&v| (format_value(v), set(state.clone(), v)))
            .collect::<Vec<_>>()
    };
    match level {
        FilterLevel::City => opts
            .cities
            .iter()
            .map(|c| (c.clone(), state.clone().with_city(c.clone())))
            .collect(),
        FilterLevel::Cuisine => opts
            .cuisines
            .iter()
            .flatten()
            .map(|c| (c.clone(), state.clone().with_cuisine(c.clone())))
            .collect(),
        FilterLevel::Rating => numbers(&opts.ratings, FilterState::with_rating),
        FilterLevel::RatingCount => numbers(&opts.rating_counts, FilterState::with_rating_count),
        FilterLevel::Cost => numbers(&opts.costs, FilterState::with_cost),
    }
}

/// Numbered menu; `None` means quit or end of input
fn choose<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    title: &str,
    labels: &[String],
) -> Result<Option<usize>> {
    writeln!(out, "\n{}", title.cyan().bold())?;
    for (i, label) in labels.iter().enumerate() {
        writeln!(out, "  {:>2}) {label}", i + 1)?;
    }

    loop {
        write!(out, "Choice [1]: ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim();
        if answer.eq_ignore_ascii_case("q") || answer.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }
        if answer.is_empty() {
            return Ok(Some(0));
        }
        if let Ok(n) = answer.parse::<usize>() {
            if (1..=labels.len()).contains(&n) {
                return Ok(Some(n - 1));
            }
        }
        if let Some(i) = labels.iter().position(|l| l == answer) {
            return Ok(Some(i));
        }
        writeln!(
            out,
            "Enter a number between 1 and {}, or q to quit",
            labels.len()
        )?;
    }
}
