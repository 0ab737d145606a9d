use serde::{Deserialize, Serialize};

use crate::{Error, Result, VigilService};
use vigil_storage::queries;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackfillReport {
	pub indexed_count: u64,
}

impl VigilService {
	/// Builds search vectors for events that are still served by the unindexed fallback.
	pub async fn backfill_index(&self, batch_size: u32) -> Result<BackfillReport> {
		if batch_size == 0 {
			return Err(Error::InvalidRequest {
				message: "batch_size must be greater than zero.".to_string(),
			});
		}

		let indexed_count = queries::backfill_search_vectors(
			&self.db,
			&self.cfg.search.text_search_config,
			batch_size,
		)
		.await?;

		Ok(BackfillReport { indexed_count })
	}

	/// Rebuilds the search vector of one event after its text changed.
	pub async fn reindex_event(&self, event_id: i64) -> Result<()> {
		queries::index_event(&self.db, event_id, &self.cfg.search.text_search_config).await?;

		Ok(())
	}
}
