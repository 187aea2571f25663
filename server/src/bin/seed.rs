//! Wipes the database and loads the sample clinical intake data set.
//!
//! Run with: cargo run --bin seed

use clap::{Arg, Command};
use querydesk_models::{FormData, Query};
use querydesk_server::config::AppConfig;
use querydesk_server::database::Database;
use querydesk_server::error::AppResult;
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn sample_form_data() -> Vec<FormData> {
    [
        ("What is your date of birth?", "1985-03-14"),
        (
            "Are you currently taking any prescription medication?",
            "Yes, lisinopril 10mg daily.",
        ),
        ("Do you have any known drug allergies?", "Penicillin."),
        (
            "Have you been hospitalized in the last twelve months?",
            "No.",
        ),
        (
            "How many days per week do you exercise for at least 30 minutes?",
            "Two or three.",
        ),
        ("Do you smoke or use tobacco products?", "No, quit in 2019."),
    ]
    .into_iter()
    .map(|(question, answer)| FormData::new(question.to_string(), answer.to_string()))
    .collect()
}

fn main() -> AppResult<()> {
    let matches = Command::new("seed")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reset the querydesk database to the sample data set")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file")
                .value_name("FILE"),
        )
        .get_matches();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("seed=info".parse().unwrap())
                .add_directive("querydesk_server=info".parse().unwrap()),
        )
        .init();

    let config = match matches.get_one::<String>("config") {
        Some(path) => AppConfig::load_from_file(Path::new(path))?,
        None => AppConfig::load()?,
    };

    let database = Database::new(&config.database.path)?;

    database.delete_all_records()?;

    let entries = sample_form_data();
    for entry in &entries {
        database.create_form_data(entry)?;
    }
    tracing::info!("Created {} form data rows", entries.len());

    // A couple of rows start out with an open query, like a review session
    // already in progress.
    let samples = [
        (
            2usize,
            "Verify allergy information",
            "Please confirm if the patient is allergic to penicillin.",
        ),
        (
            4,
            "Exercise routine clarification",
            "Ask the patient for more details on their daily physical activity.",
        ),
    ];
    for (index, title, description) in samples {
        let query = Query::new(
            title.to_string(),
            Some(description.to_string()),
            entries[index].id.clone(),
        );
        database.create_query(&query)?;
    }

    tracing::info!(
        "Seeded {} form data rows and {} queries at {:?}",
        database.count_form_data()?,
        database.count_queries()?,
        config.database.path
    );

    Ok(())
}
