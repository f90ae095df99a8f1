fn main() -> anyhow::Result<()> {
    transcript_studio::cli::run()
}
