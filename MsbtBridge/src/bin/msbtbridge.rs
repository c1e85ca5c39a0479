fn main() -> anyhow::Result<()> {
    msbtbridge::cli::run_cli()
}
