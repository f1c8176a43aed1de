use crossterm::event::{KeyCode, KeyModifiers};
use gobarber::config::Config;
use gobarber::keymap::{Action, KeyBinding, KeymapPreset};
use gobarber::styles::ThemeType;
use tempfile::TempDir;

#[test]
fn test_keymap_override_in_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let mut config = Config::default();
    config.keymap.preset = KeymapPreset::Vim;
    // Book with ctrl+b instead of ctrl+s
    config.keymap.overrides.push(KeyBinding::new("ctrl+b", Action::Submit));
    config.keymap.overrides.push(KeyBinding::new("x", Action::Quit));
    config.save(&config_path).unwrap();

    let loaded = Config::load_or_create(&config_path).unwrap();
    assert_eq!(loaded.keymap.preset, KeymapPreset::Vim);
    assert_eq!(loaded.keymap.overrides.len(), 2);

    let keymap = &loaded.keymap;
    assert_eq!(
        keymap.get_action(KeyCode::Char('b'), KeyModifiers::CONTROL),
        Some(Action::Submit)
    );
    assert_eq!(keymap.get_action(KeyCode::Char('x'), KeyModifiers::NONE), Some(Action::Quit));

    // Overrides shadow every preset binding for the same action
    assert_eq!(keymap.get_action(KeyCode::Char('s'), KeyModifiers::CONTROL), None);
    assert_eq!(keymap.get_action(KeyCode::Char('q'), KeyModifiers::NONE), None);

    // Other vim bindings still work
    assert_eq!(keymap.get_action(KeyCode::Char('j'), KeyModifiers::NONE), Some(Action::MoveDown));
}

#[test]
fn test_hand_written_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
api_url = "https://booking.example.com"
request_timeout_secs = 3
theme = "light"
last_email = "ana@example.com"

[keymap]
preset = "vim"

[[keymap.overrides]]
key = "ctrl+p"
action = "open_profile"
"#,
    )
    .unwrap();

    let config = Config::load_or_create(&config_path).unwrap();
    assert_eq!(config.api_url, "https://booking.example.com");
    assert_eq!(config.request_timeout().as_secs(), 3);
    assert_eq!(config.theme, ThemeType::Light);
    assert_eq!(config.last_email.as_deref(), Some("ana@example.com"));
    assert_eq!(
        config.keymap.get_action(KeyCode::Char('p'), KeyModifiers::CONTROL),
        Some(Action::OpenProfile)
    );
}

#[test]
fn test_missing_file_is_created_with_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let config = Config::load_or_create(&config_path).unwrap();
    assert!(config_path.exists());
    assert_eq!(config.api_url, "http://localhost:3333");
    assert_eq!(config.request_timeout_secs, 10);
    assert_eq!(config.keymap.preset, KeymapPreset::Standard);
    assert!(config.last_email.is_none());
}

#[test]
fn test_api_url_override() {
    let config = Config::default();
    assert_eq!(
        config.api_url_with_override(Some("http://10.0.0.2:3333")),
        "http://10.0.0.2:3333"
    );
    assert_eq!(config.api_url_with_override(Some("  ")), "http://localhost:3333");
    assert_eq!(config.api_url_with_override(None), "http://localhost:3333");
}
