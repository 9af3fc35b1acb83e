fn main() -> anyhow::Result<()> {
    hanyu_drills_terminal::run()
}
