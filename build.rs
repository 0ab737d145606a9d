use std::error::Error;

use vergen_gitcl::{CargoBuilder, Emitter, GitclBuilder};

fn main() -> Result<(), Box<dyn Error>> {
	let mut emitter = Emitter::default();

	emitter.add_instructions(&CargoBuilder::default().target_triple(true).build()?)?;

	// Builds outside a git checkout (e.g. from a source tarball) have no sha to report.
	if emitter
		.clone()
		.add_instructions(&GitclBuilder::default().sha(true).build()?)?
		.fail_on_error()
		.emit()
		.is_err()
	{
		println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");

		emitter.emit()?;
	} else {
		emitter.add_instructions(&GitclBuilder::default().sha(true).build()?)?.emit()?;
	}

	Ok(())
}
