use clap::Parser;
use galaxy_collision::Args;

fn main() -> anyhow::Result<()> {
    galaxy_collision::start(Args::parse())
}
