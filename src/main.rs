use readme_combiner::app;

fn main() -> anyhow::Result<()> {
    app::run()
}
