use std::path::PathBuf;

use clap::{Parser, Subcommand};
use time::OffsetDateTime;

use vigil_service::{SearchFilters, VigilService, time_serde};
use vigil_storage::db::Db;

#[derive(Debug, Parser)]
#[command(
	version = vigil_cli::VERSION,
	rename_all = "kebab",
	styles = vigil_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE", global = true, default_value = "vigil.toml")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Run a ranked search and print the response as JSON.
	Search(SearchArgs),
	/// Build search vectors for events that do not have one yet.
	BackfillIndex {
		#[arg(long, default_value_t = 500)]
		batch: u32,
	},
	/// Create the tables and indexes if they are missing.
	InitSchema,
}

#[derive(Debug, clap::Args)]
pub struct SearchArgs {
	#[arg(long, short = 'q', default_value = "")]
	pub query: String,
	#[arg(long = "camera", value_name = "ID")]
	pub cameras: Vec<String>,
	#[arg(long = "severity", value_name = "LEVEL")]
	pub severities: Vec<String>,
	#[arg(long = "object-type", value_name = "TYPE")]
	pub object_types: Vec<String>,
	#[arg(long)]
	pub reviewed: Option<bool>,
	/// Inclusive lower bound on the event start time (RFC 3339).
	#[arg(long, value_parser = parse_timestamp)]
	pub start: Option<OffsetDateTime>,
	/// Exclusive upper bound on the event start time (RFC 3339).
	#[arg(long, value_parser = parse_timestamp)]
	pub end: Option<OffsetDateTime>,
	#[arg(long, default_value_t = 20)]
	pub limit: u32,
	#[arg(long, default_value_t = 0)]
	pub offset: u32,
}
impl SearchArgs {
	pub fn filters(&self) -> SearchFilters {
		SearchFilters {
			start_date: self.start,
			end_date: self.end,
			camera_ids: self.cameras.iter().cloned().collect(),
			severity: self.severities.iter().cloned().collect(),
			object_types: self.object_types.iter().cloned().collect(),
			reviewed: self.reviewed,
		}
	}
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = vigil_config::load(&args.config)?;

	vigil_cli::init_tracing(&config.service.log_level);

	let db = Db::connect(&config.storage.postgres).await?;

	match args.command {
		Command::InitSchema => {
			db.ensure_schema().await?;

			tracing::info!("Schema is up to date.");
		},
		Command::BackfillIndex { batch } => {
			let service = VigilService::new(config, db);
			let report = service.backfill_index(batch).await?;

			tracing::info!(indexed_count = report.indexed_count, "Backfill finished.");
			println!("{}", serde_json::to_string_pretty(&report)?);
		},
		Command::Search(search) => {
			let filters = search.filters();
			let service = VigilService::new(config, db);
			let response =
				service.search(&search.query, &filters, search.limit, search.offset).await?;

			println!("{}", serde_json::to_string_pretty(&response)?);
		},
	}

	Ok(())
}

fn parse_timestamp(raw: &str) -> Result<OffsetDateTime, String> {
	time_serde::parse(raw).map_err(|err| format!("expected RFC 3339: {err}"))
}
