pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid detection id {element:?} in detection list {raw:?}.")]
	InvalidDetectionIds { raw: String, element: String },
}
