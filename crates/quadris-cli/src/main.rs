mod app;
mod command;
mod ui;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
