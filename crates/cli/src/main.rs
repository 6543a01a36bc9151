mod cli;
mod output;

use cli::run_cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let status = run_cli().await?;
	if !status.success() {
		std::process::exit(status.code().unwrap_or(1));
	}

	Ok(())
}
