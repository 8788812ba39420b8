use anyhow::{Context, Result, bail};
use tracing::info;

use vmc_client::{CollegeDirectory, DirectoryClient};
use vmc_model::{CollegeQuery, CollegeRecord, ResultSchema};
use vmc_session::{PageView, Pager};

use vmc_cli::render::{
    ResultsReport, options_table, render_page, streams_table,
};

use crate::cli::{CollegesArgs, OutputArgs, OutputFormatArg, SearchArgs, StreamArgs, StreamsArgs};

pub fn run_streams(args: &StreamsArgs) {
    println!("{}", streams_table(args.level.map(Into::into)));
}

pub async fn run_specializations(client: &DirectoryClient, args: &StreamArgs) -> Result<()> {
    let specializations = client
        .specializations(&args.stream)
        .await
        .with_context(|| format!("fetch specializations for {}", args.stream))?;
    if specializations.is_empty() {
        println!("No specializations found for {}.", args.stream);
    } else {
        println!("{}", options_table("Specialization", &specializations));
    }
    Ok(())
}

pub async fn run_cities(client: &DirectoryClient, args: &StreamArgs) -> Result<()> {
    let cities = client
        .cities(&args.stream)
        .await
        .with_context(|| format!("fetch cities for {}", args.stream))?;
    if cities.is_empty() {
        println!("No cities found for {}.", args.stream);
    } else {
        println!("{}", options_table("City", &cities));
    }
    Ok(())
}

pub async fn run_colleges(
    client: &DirectoryClient,
    args: &CollegesArgs,
    page_size: usize,
) -> Result<()> {
    let query = CollegeQuery {
        stream: args.stream.clone(),
        specialization: args.specialization.clone(),
        city: args.city.clone().filter(|city| !city.is_empty()),
    };
    let colleges = client.colleges(&query).await.context("fetch colleges")?;
    info!(count = colleges.len(), "Colleges fetched");
    print_results(&colleges, &args.output, page_size)
}

pub async fn run_search(client: &DirectoryClient, args: &SearchArgs, page_size: usize) -> Result<()> {
    let query = args.query.trim();
    if query.is_empty() {
        bail!("search text is empty");
    }
    let colleges = client
        .search(query)
        .await
        .with_context(|| format!("search colleges for '{query}'"))?;
    info!(count = colleges.len(), "Search finished");
    print_results(&colleges, &args.output, page_size)
}

fn print_results(records: &[CollegeRecord], output: &OutputArgs, page_size: usize) -> Result<()> {
    let mut pager = Pager::new(page_size);
    pager.go_to(output.page, records.len());
    let view = PageView::new(records, &pager, ResultSchema::of(records));
    match output.format {
        OutputFormatArg::Table => println!("{}", render_page(&view)),
        OutputFormatArg::Json => {
            let json = serde_json::to_string_pretty(&ResultsReport::new(&view))
                .context("serialize results")?;
            println!("{json}");
        }
    }
    Ok(())
}
