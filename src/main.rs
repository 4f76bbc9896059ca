use anyhow::Result;

fn main() -> Result<()> {
    clear::cli::run()
}
