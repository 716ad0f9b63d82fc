use railmap::{config::StaticMapConfig, Error};

fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter("railmap=info,railway_png=info")
        .init();

    match railmap::kml2png(&StaticMapConfig::default()) {
        Err(Error::NoRoutes { dir }) => {
            tracing::warn!("no route found in {}, nothing to draw", dir.display());
            Ok(())
        }
        result => Ok(result?),
    }
}
