//! This binary shows how weekly-tasks can be used.
//! It fetches the tasks from the configured server, and prints them week by week.
//!
//! An optional argument is used as a search query.

use weekly_tasks::app::App;
use weekly_tasks::client::Client;
use weekly_tasks::config::{API_URL, API_URL_ENV_VAR};
use weekly_tasks::utils::print_weeks;

#[tokio::main]
async fn main() {
    env_logger::init();

    println!("Fetching tasks from {} (set {} to use another server).", API_URL.as_str(), API_URL_ENV_VAR);
    println!("You can also set the RUST_LOG environment variable to display more info.");
    println!();

    let client = match Client::from_config() {
        Ok(client) => client,
        Err(err) => {
            log::error!("Invalid server URL: {}", err);
            std::process::exit(1);
        },
    };

    let mut app = App::new(client);
    if let Err(err) = app.load().await {
        println!("Unable to fetch tasks: {}", err);
    }

    if let Some(query) = std::env::args().nth(1) {
        app.state_mut().set_search(query);
    }

    // Unfold every week, so that tasks are listed as well
    let keys: Vec<_> = app.state().weeks().iter().map(|w| w.key()).collect();
    for key in keys {
        app.state_mut().toggle_week(key);
    }

    let weeks = app.state().weeks();
    if weeks.is_empty() {
        println!("No tasks.");
    }
    print_weeks(&weeks);
}
