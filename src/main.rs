fn main() -> anyhow::Result<()> {
    adofai_tools::run()
}
