use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = recircle_api::Args::parse();
	recircle_api::run(args).await
}
