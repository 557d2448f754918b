use camino::Utf8Path;
use color_eyre::{eyre::Context as _, Result};
use langgen::Config;

/// Read a [`Config`] from a TOML file.
pub fn read(path: &Utf8Path) -> Result<Config> {
    let src = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    toml::from_str(&src).with_context(|| format!("parsing {path}"))
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;

    use super::*;

    fn scratch(name: &str, contents: &str) -> Utf8PathBuf {
        let dir = Utf8PathBuf::try_from(std::env::temp_dir()).unwrap();
        let path = dir.join(format!("langgen-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_toml() {
        let path = scratch("ok.toml", "workers = 2\npoll_interval_ms = 5\n");
        let config = read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.worker_count().get(), 2);
        assert_eq!(config.poll_interval_ms, 5);
    }

    #[test]
    fn reports_the_path_on_error() {
        let path = scratch("bad.toml", "workers = \"many\"");
        let err = read(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(err.to_string(), format!("parsing {path}"));
    }

    #[test]
    fn missing_file() {
        let err = read(Utf8Path::new("/nonexistent/langgen.toml")).unwrap_err();
        assert_eq!(err.to_string(), "reading /nonexistent/langgen.toml");
    }
}
