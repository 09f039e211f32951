fn main() -> anyhow::Result<()> {
    scanframe_lib::run()
}
