//! Folio, the CAD project portfolio viewer. Runs the model_viewer app.
//!
//! `folio --sitemap` prints the sitemap as JSON instead of opening a window.

use model_viewer::config;
use model_viewer::prelude::*;

fn main() {
    let _ = dotenvy::dotenv();
    let config = config::viewer_config();

    if std::env::args().skip(1).any(|arg| arg == "--sitemap") {
        match serde_json::to_string_pretty(&sitemap(&config.site_url)) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("folio: failed to serialize sitemap: {err}");
                std::process::exit(1);
            }
        }
        return;
    }

    ViewerBuilder::new().config(config).build().run();
}
