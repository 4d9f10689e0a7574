mod command;
mod config;
mod data;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
