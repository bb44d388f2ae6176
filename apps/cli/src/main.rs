fn main() -> anyhow::Result<()> {
    vocadeck::run()
}
