use anyhow::Result;

fn main() -> Result<()> {
    posixcap::cli::run()
}
