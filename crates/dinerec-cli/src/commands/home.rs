//! Welcome page

use colored::Colorize;
use serde::Serialize;

use super::Settings;
use crate::error::Result;
use crate::output;

const TITLE: &str = "Welcome to the Smart Restaurant Recommender!";
const SUBTITLE: &str = "Your personalized restaurant guide based on city, cuisine, and preferences.";
const TAGLINE: &str = "Get the best recommendations tailored to your taste.";

#[derive(Serialize)]
struct HomePage<'a> {
    title: &'a str,
    subtitle: &'a str,
    tagline: &'a str,
    image: Option<String>,
}

/// Print the welcome banner and the home image location
///
/// Every artifact is loaded first, so a broken install fails here too.
pub(crate) fn run(settings: &Settings) -> Result<()> {
    let ctx = settings.load_context()?;
    let image = ctx.home_image().map(|p| p.display().to_string());

    if settings.json {
        let page = HomePage {
            title: TITLE,
            subtitle: SUBTITLE,
            tagline: TAGLINE,
            image,
        };
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    println!("{}", TITLE.yellow().bold());
    println!("{}", SUBTITLE.cyan());
    println!("{}", TAGLINE.magenta());
    match image {
        Some(image) => output::kv("Image", image),
        None if !settings.quiet => output::info("No home image found"),
        None => {}
    }
    Ok(())
}
