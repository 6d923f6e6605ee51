use clap::Parser;
use eyre::Result;
use movie_catalog::{
    app::{application::ApplicationBuilder, config_loader::ConfigLoader},
    Cli,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::new(&cli).load_config()?;
    let app = ApplicationBuilder::new(config).build()?;

    app.run(&cli.command)
}
