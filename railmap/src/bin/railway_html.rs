use railmap::{config::WebMapConfig, Error};

fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter("railmap=info,railway_html=info")
        .init();

    match railmap::kml2html(&WebMapConfig::default()) {
        Err(Error::NoRoutes { dir }) => {
            tracing::warn!("no route found in {}, the map was not written", dir.display());
            Ok(())
        }
        result => Ok(result?),
    }
}
