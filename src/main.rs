fn main() -> anyhow::Result<()> {
    skewer_app::run()
}
