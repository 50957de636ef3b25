use super::*;

use std::collections::HashMap;

use tempfile::TempDir;

/// Writes `contents` as `lecturelm.toml` in a fresh directory removed on drop.
fn temp_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, contents).expect("write config");
    (dir, path)
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_point_at_local_api() {
    let settings = load_settings_from(Path::new("does/not/exist.toml"), env_from(&[]));

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.api_base_url, "http://localhost:8000");
    assert_eq!(settings.export_filename, "notes.pdf");
    assert_eq!(settings.request_timeout(), Duration::from_secs(120));
}

#[test]
fn file_values_override_defaults() {
    let (_dir, path) = temp_config(
        r#"
api_base_url = "https://notes.example.com"
request_timeout_secs = 30
output_dir = "exports"
"#,
    );

    let settings = load_settings_from(&path, env_from(&[]));

    assert_eq!(settings.api_base_url, "https://notes.example.com");
    assert_eq!(settings.request_timeout_secs, 30);
    assert_eq!(settings.output_dir, PathBuf::from("exports"));
    assert_eq!(settings.export_filename, "notes.pdf");
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let (_dir, path) = temp_config("api_base_url = \"https://file.example.com\"\n");

    let settings = load_settings_from(
        &path,
        env_from(&[
            ("LECTURELM_API_URL", "https://env.example.com"),
            ("APP__API_BASE_URL", "https://app.example.com"),
            ("APP__REQUEST_TIMEOUT_SECS", "15"),
            ("APP__OUTPUT_DIR", "/tmp/notes"),
        ]),
    );

    assert_eq!(settings.api_base_url, "https://app.example.com");
    assert_eq!(settings.request_timeout_secs, 15);
    assert_eq!(settings.output_dir, PathBuf::from("/tmp/notes"));
}

#[test]
fn blank_or_invalid_env_values_are_ignored() {
    let settings = load_settings_from(
        Path::new("does/not/exist.toml"),
        env_from(&[
            ("LECTURELM_API_URL", "   "),
            ("APP__REQUEST_TIMEOUT_SECS", "soon"),
        ]),
    );

    assert_eq!(settings.api_base_url, "http://localhost:8000");
    assert_eq!(settings.request_timeout_secs, 120);
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let (_dir, path) = temp_config("api_base_url = [not toml");

    let settings = load_settings_from(&path, env_from(&[]));

    assert_eq!(settings, Settings::default());
}
