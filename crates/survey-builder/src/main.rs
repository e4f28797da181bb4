fn main() -> anyhow::Result<()> {
    survey_builder::cli::main()
}
