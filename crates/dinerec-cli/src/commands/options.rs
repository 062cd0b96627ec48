//! Cascading filter options

use dinerec::filter::{available_options, format_value, FilterLevel, FilterState};

use super::Settings;
use crate::error::Result;
use crate::output;

/// Print the option lists down to the first unchosen level
pub(crate) fn run(settings: &Settings, state: &FilterState) -> Result<()> {
    let ctx = settings.load_context()?;
    let opts = available_options(ctx.dataset(), state)?;

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&opts)?);
        return Ok(());
    }

    output::section("Filter Options");
    print_level(FilterLevel::City, &opts.cities);
    if let Some(values) = &opts.cuisines {
        print_level(FilterLevel::Cuisine, values);
    }
    for (level, values) in [
        (FilterLevel::Rating, &opts.ratings),
        (FilterLevel::RatingCount, &opts.rating_counts),
        (FilterLevel::Cost, &opts.costs),
    ] {
        if let Some(values) = values {
            let shown: Vec<String> = values.iter().copied().map(format_value).collect();
            print_level(level, &shown);
        }
    }

    if !settings.quiet {
        match opts.next_level {
            Some(level) => output::info(&format!("Next: choose a {level}")),
            None => output::success("Selection complete"),
        }
    }
    Ok(())
}

fn print_level(level: FilterLevel, values: &[String]) {
    output::kv(&format!("Select {}", level.label()), values.join(", "));
}
