fn main() -> anyhow::Result<()> {
    pzmod::cli::run_cli()
}
