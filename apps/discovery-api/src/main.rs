use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = discovery_api::Args::parse();

	discovery_api::run(args).await
}
