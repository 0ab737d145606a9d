use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = vigil_search::Args::parse();

	vigil_search::run(args).await
}
