mod prompt;
pub mod render;

use std::{process::ExitCode, sync::Arc, time::Duration};

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    request_schema, FormField, ItineraryClient, PendingRequest, SubmissionPhase, TripRequestForm,
    BASE_URL_ENV, TIMEOUT_ENV,
};

const EXIT_FAILED: u8 = 1;
const EXIT_INVALID_INPUT: u8 = 2;
const EXIT_INTERRUPTED: u8 = 130;

/// CLI entry point for the trip-planner tool
pub async fn run() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    init_tracing();

    let matches = command().get_matches();

    if matches.get_flag("schema") {
        let schema = request_schema().context("failed to build request schema")?;
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(ExitCode::SUCCESS);
    }

    let mut form = TripRequestForm::new();
    apply_arguments(&mut form, &matches);

    if matches.get_flag("interactive") {
        prompt::fill_form(&mut form)?;
    }

    if !matches.get_flag("skip-validation") {
        let issues = form.validate();
        if !issues.is_empty() {
            for issue in &issues {
                eprintln!("{}", render::render_issue(issue));
            }
            return Ok(ExitCode::from(EXIT_INVALID_INPUT));
        }
    }

    if matches.get_flag("dry-run") {
        let payload = form.build_request().to_value()?;
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(ExitCode::SUCCESS);
    }

    let client = build_client(&matches)?;
    let json_output = matches.get_flag("json");
    info!("Base URL: {}", client.base_url());

    let submission = form.begin_submit();
    if !json_output {
        eprintln!("{}", render::render_status(&form));
    }

    let pending = PendingRequest::spawn(Arc::new(client), submission);
    let (ticket, outcome) = tokio::select! {
        settled = pending.wait() => settled,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted while waiting for the itinerary");
            eprintln!("{}", render::render_cancelled());
            return Ok(ExitCode::from(EXIT_INTERRUPTED));
        }
    };

    let failure = outcome.as_ref().err().map(|err| err.to_error_payload());
    form.settle(ticket, outcome);

    if json_output {
        let rendered = render::render_json(&form, failure);
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        println!("{}", render::render_outcome(&form));
    }

    Ok(match form.phase() {
        SubmissionPhase::Failed => ExitCode::from(EXIT_FAILED),
        _ => ExitCode::SUCCESS,
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn command() -> Command {
    Command::new("trip-planner")
        .version("0.1.0")
        .about("Enter your trip details to generate an AI-powered itinerary")
        .arg(
            Arg::new("dates")
                .short('d')
                .long("dates")
                .value_name("TEXT")
                .help("Travel dates, e.g. \"June 14 - June 17\""),
        )
        .arg(
            Arg::new("adults")
                .short('a')
                .long("adults")
                .value_name("COUNT")
                .allow_hyphen_values(true)
                .help("Number of adults [default: 2]"),
        )
        .arg(
            Arg::new("children")
                .short('c')
                .long("children")
                .value_name("COUNT")
                .allow_hyphen_values(true)
                .help("Number of children [default: 0]"),
        )
        .arg(
            Arg::new("ages")
                .short('g')
                .long("ages")
                .value_name("LIST")
                .help("Children ages, comma-separated, e.g. \"5, 9\""),
        )
        .arg(
            Arg::new("preferences")
                .short('p')
                .long("preferences")
                .value_name("TEXT")
                .help("Preferences, e.g. \"Minimize wait times, loves princesses\""),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .action(ArgAction::SetTrue)
                .help("Prompt for each field"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help(format!("Itinerary backend base URL (or set {BASE_URL_ENV})")),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .value_parser(value_parser!(u64).range(1..))
                .help(format!("Request timeout in seconds (or set {TIMEOUT_ENV})")),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Print the request body instead of sending it"),
        )
        .arg(
            Arg::new("schema")
                .long("schema")
                .action(ArgAction::SetTrue)
                .help("Print the JSON schema of the request body and exit"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the itinerary or error as JSON"),
        )
        .arg(
            Arg::new("skip-validation")
                .long("skip-validation")
                .action(ArgAction::SetTrue)
                .help("Send the request even if fields are missing or out of range"),
        )
}

fn apply_arguments(form: &mut TripRequestForm, matches: &ArgMatches) {
    for (id, field) in [
        ("dates", FormField::TravelDates),
        ("adults", FormField::NumberOfAdults),
        ("children", FormField::NumberOfChildren),
        ("ages", FormField::ChildrenAges),
        ("preferences", FormField::Preferences),
    ] {
        if let Some(raw) = matches.get_one::<String>(id) {
            form.update(field, raw);
        }
    }
}

fn build_client(matches: &ArgMatches) -> anyhow::Result<ItineraryClient> {
    let mut client = ItineraryClient::from_env().context("invalid backend configuration")?;

    if let Some(base_url) = matches.get_one::<String>("base-url") {
        client = client.with_base_url(base_url.as_str());
    }

    if let Some(seconds) = matches.get_one::<u64>("timeout") {
        client = client.with_timeout(Duration::from_secs(*seconds));
    }

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        command().debug_assert();
    }

    #[test]
    fn arguments_fill_the_form() {
        let matches = command().get_matches_from([
            "trip-planner",
            "--dates",
            "June 14 - June 17",
            "--children",
            "1",
            "--ages",
            "5",
            "-p",
            "loves princesses",
        ]);

        let mut form = TripRequestForm::new();
        apply_arguments(&mut form, &matches);

        assert_eq!(form.travel_dates(), "June 14 - June 17");
        assert_eq!(form.number_of_adults(), Some(2));
        assert_eq!(form.number_of_children(), Some(1));
        assert_eq!(form.build_request().children_ages, vec![5]);
        assert_eq!(form.preferences(), "loves princesses");
    }

    #[test]
    fn flags_override_client_settings() {
        let matches = command().get_matches_from([
            "trip-planner",
            "--base-url",
            "http://localhost:8000/",
            "--timeout",
            "5",
        ]);

        let client = build_client(&matches).unwrap();
        assert_eq!(client.endpoint_url(), "http://localhost:8000/generate-itinerary");
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = command().try_get_matches_from(["trip-planner", "--timeout", "0"]);
        assert!(result.is_err());
    }
}
