use anyhow::Result;

fn main() -> Result<()> {
    checkimport::run_cli()
}
