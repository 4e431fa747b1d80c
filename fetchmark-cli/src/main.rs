fn main() -> anyhow::Result<()> {
    fetchmark_cli::run()
}
