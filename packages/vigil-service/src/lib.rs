pub mod admin;
pub mod search;
pub mod time_serde;

mod error;

pub use admin::BackfillReport;
pub use error::{Error, Result};
pub use search::{SearchFilters, SearchResponse, SearchResult};

use vigil_config::Config;
use vigil_storage::db::Db;

pub struct VigilService {
	pub cfg: Config,
	pub db: Db,
}
impl VigilService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db }
	}
}
