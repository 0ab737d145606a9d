use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	/// A `tracing_subscriber::EnvFilter` directive, e.g. "info" or "vigil_service=debug".
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Text search configuration (`regconfig`) used to parse queries and build vectors.
	pub text_search_config: String,
	/// Multiplier applied to `ts_rank` before the score is capped at 1.0.
	pub rank_scale: f64,
}
impl Default for Search {
	fn default() -> Self {
		Self { text_search_config: "english".to_string(), rank_scale: 10.0 }
	}
}
