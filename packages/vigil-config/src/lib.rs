mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Postgres, Search, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}

	let text_search_config = cfg.search.text_search_config.as_str();

	if text_search_config.is_empty() {
		return Err(Error::Validation {
			message: "search.text_search_config must be non-empty.".to_string(),
		});
	}
	if !text_search_config.chars().all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.'))
	{
		return Err(Error::Validation {
			message:
				"search.text_search_config must contain only ASCII letters, digits, '_' or '.'."
					.to_string(),
		});
	}
	if !cfg.search.rank_scale.is_finite() {
		return Err(Error::Validation {
			message: "search.rank_scale must be a finite number.".to_string(),
		});
	}
	if cfg.search.rank_scale <= 0.0 {
		return Err(Error::Validation {
			message: "search.rank_scale must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.service.log_level = cfg.service.log_level.trim().to_string();
	cfg.search.text_search_config = cfg.search.text_search_config.trim().to_string();
}
