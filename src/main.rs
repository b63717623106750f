fn main() -> anyhow::Result<()> {
    // Initialize logging
    roomkit::init_logging()?;

    roomkit::cli::run_from_env()
}
