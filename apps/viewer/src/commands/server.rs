//! # Server Command
//!
//! Prints or changes the endpoint `list`/`show` fetch from. A new URL is
//! normalized (trailing `/`) and saved to the config file.

use std::path::PathBuf;

use zebraget_catalog::ViewerConfig;

/// Printed when no server is configured.
pub const NOT_CONFIGURED: &str = "(not configured)";

/// `zebraget server [URL] [--clear]`
pub fn run(
    mut config: ViewerConfig,
    config_path: Option<PathBuf>,
    url: Option<&str>,
    clear: bool,
) -> anyhow::Result<bool> {
    if clear {
        config.server.url = None;
        config.save(config_path)?;
        println!("Server cleared; only cached data will be shown");
        return Ok(true);
    }

    let Some(raw) = url else {
        println!("{}", config.server_url().unwrap_or(NOT_CONFIGURED));
        return Ok(true);
    };

    if let Err(e) = config.set_server_url(raw) {
        eprintln!("{}", e);
        return Ok(false);
    }

    config.save(config_path)?;
    println!("Server set to {}", config.server_url().unwrap_or(NOT_CONFIGURED));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved(path: &PathBuf) -> ViewerConfig {
        ViewerConfig::load_or_default(Some(path.clone()))
    }

    #[test]
    fn test_set_url_is_normalized_and_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.toml");

        let ok = run(
            ViewerConfig::default(),
            Some(path.clone()),
            Some("http://10.1.1.9:3000"),
            false,
        )
        .unwrap();
        assert!(ok);
        assert_eq!(saved(&path).server_url(), Some("http://10.1.1.9:3000/"));
    }

    #[test]
    fn test_invalid_url_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.toml");

        let ok = run(ViewerConfig::default(), Some(path.clone()), Some("ftp://h"), false).unwrap();
        assert!(!ok);
        assert!(!path.exists());
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.toml");

        assert!(run(ViewerConfig::default(), Some(path.clone()), None, true).unwrap());
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("url = \"\""));
    }
}
