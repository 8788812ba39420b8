//! Interactive filter session over stdin.

use std::io::{self, Write};

use anyhow::{Context, Result};
use comfy_table::Table;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use vmc_client::CollegeDirectory;
use vmc_model::Field;
use vmc_session::{Driver, FilterSession, Mode};

use vmc_cli::logging::redact_value;
use vmc_cli::render::{apply_table_style, options_table, render_page};

const HELP: &str = "\
Commands:
  level <ug|pg>        set the education level
  stream <name>        set the stream (see `options`)
  spec <name>          set the specialization
  city <name|All>      set the city (undergraduate only)
  name <text>          set the student name
  search <text>        search colleges by name (empty text clears)
  submit               validate the form and list matching colleges
  next | prev          move between result pages
  show                 show the current result page
  options              show the choices for the current form
  state                show the form values
  help                 show this help
  quit                 leave";

#[derive(Debug, PartialEq, Eq)]
enum BrowseCommand {
    Set(Field, String),
    Submit,
    Next,
    Prev,
    Show,
    Options,
    State,
    Help,
    Quit,
    Empty,
}

fn parse_command(line: &str) -> Result<BrowseCommand, String> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));
    let command = match word.to_ascii_lowercase().as_str() {
        "" => BrowseCommand::Empty,
        "submit" => BrowseCommand::Submit,
        "next" => BrowseCommand::Next,
        "prev" | "previous" => BrowseCommand::Prev,
        "show" => BrowseCommand::Show,
        "options" => BrowseCommand::Options,
        "state" => BrowseCommand::State,
        "help" | "?" => BrowseCommand::Help,
        "quit" | "exit" => BrowseCommand::Quit,
        _ => {
            let field = word.parse::<Field>().map_err(|_| {
                format!("Unknown command '{word}'. Type 'help' for a list of commands.")
            })?;
            BrowseCommand::Set(field, rest.to_string())
        }
    };
    Ok(command)
}

pub async fn run_browse<D: CollegeDirectory>(driver: &Driver<D>, page_size: usize) -> Result<()> {
    let mut session = FilterSession::new(page_size);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{HELP}");
    loop {
        print!("[{}] > ", session.mode().submit_label());
        io::stdout().flush().context("flush prompt")?;
        let Some(line) = lines.next_line().await.context("read command")? else {
            break;
        };
        match parse_command(&line) {
            Ok(BrowseCommand::Quit) => break,
            Ok(command) => execute(driver, &mut session, command).await,
            Err(message) => println!("{message}"),
        }
    }
    Ok(())
}

async fn execute<D: CollegeDirectory>(
    driver: &Driver<D>,
    session: &mut FilterSession,
    command: BrowseCommand,
) {
    match command {
        BrowseCommand::Set(field, value) => {
            if let Err(err) = driver.set_field(session, field, &value).await {
                println!("{err}");
                return;
            }
            match field {
                Field::StudentName => info!(student = redact_value(&value), "Student name set"),
                Field::SearchQuery if !value.trim().is_empty() => print_results(session),
                _ => {}
            }
        }
        BrowseCommand::Submit => match driver.submit(session).await {
            Ok(Mode::Shown) => print_results(session),
            Ok(mode) => println!("Submit is not available ({mode})."),
            Err(err) => {
                warn!(error = %err, "Submit failed");
                println!("{}", err.user_message());
            }
        },
        BrowseCommand::Next => {
            if !session.results_visible() {
                println!("No results displayed.");
            } else if session.next_page() {
                print_results(session);
            } else {
                println!("Already on the last page.");
            }
        }
        BrowseCommand::Prev => {
            if !session.results_visible() {
                println!("No results displayed.");
            } else if session.prev_page() {
                print_results(session);
            } else {
                println!("Already on the first page.");
            }
        }
        BrowseCommand::Show => {
            if session.results_visible() {
                print_results(session);
            } else {
                println!("No results displayed.");
            }
        }
        BrowseCommand::Options => print_options(session),
        BrowseCommand::State => println!("{}", state_table(session)),
        BrowseCommand::Help => println!("{HELP}"),
        BrowseCommand::Quit | BrowseCommand::Empty => {}
    }
}

fn print_results(session: &FilterSession) {
    println!("{}", render_page(&session.page_view()));
}

fn print_options(session: &FilterSession) {
    let streams = session.stream_options();
    if streams.is_empty() {
        println!("Select an education level (ug or pg) first.");
        return;
    }
    let values: Vec<&str> = streams.iter().map(|option| option.value).collect();
    println!("{}", options_table("Stream", &values));
    if !session.specializations().is_empty() {
        println!("{}", options_table("Specialization", session.specializations()));
    }
    let cities = session.city_options();
    if !cities.is_empty() {
        println!("{}", options_table("City", &cities));
    }
}

fn state_table(session: &FilterSession) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Value"]);
    apply_table_style(&mut table);
    for field in Field::ALL {
        table.add_row(vec![field.label(), session.state().value(field)]);
    }
    table.add_row(vec!["Mode", session.mode().submit_label()]);
    table
}
