use lumina_core::config::Config;
use lumina_core::grid::OverflowPolicy;

#[test]
fn first_load_writes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config::load_from(&path).unwrap();
    assert!(path.exists());
    assert_eq!(config.grid.columns, 5);

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("[grid]"));
    assert!(written.contains("api_key_env = \"API_KEY\""));
}

#[test]
fn saved_changes_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.grid.overflow = OverflowPolicy::Clamp;
    config.ui.animation_ms = 0;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.grid.overflow, OverflowPolicy::Clamp);
    assert_eq!(loaded.ui.animation_ms, 0);
}

#[test]
fn invalid_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[grid]\ncolumns = \"five\"\n").unwrap();
    assert!(Config::load_from(&path).is_err());
}
