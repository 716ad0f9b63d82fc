use std::path::{Path, PathBuf};

use crate::{kml, Error, RouteCollection, RouteSource};

/// Regular files of `dir` with a `kml` extension (any case), sorted by name.
pub fn kml_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, Error> {
    let mut files = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()?;

    files.retain(|path| {
        path.is_file()
            && path
                .extension()
                .map_or(false, |ext| ext.eq_ignore_ascii_case("kml"))
    });
    files.sort();
    Ok(files)
}

/// Extracts the lines of every kml file of `dir`. Fails with
/// [`Error::NoRoutes`] when not a single line was found.
pub fn load_routes(dir: impl AsRef<Path>) -> Result<RouteCollection, Error> {
    let dir = dir.as_ref();
    let files = kml_files(dir)?;
    debug!("found {} kml files in {}", files.len(), dir.display());

    let sources = files
        .iter()
        .map(|path| {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(RouteSource::new(file_name, kml::extract_lines(path)?))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let routes = RouteCollection::new(sources);
    if routes.is_empty() {
        return Err(Error::NoRoutes {
            dir: dir.to_path_buf(),
        });
    }

    info!("loaded {} routes from {} files", routes.len(), files.len());
    Ok(routes)
}
