use std::time::Duration;

use nightlight_core::config::ShellConfig;
use nightlight_core::navigation::{NavigationRequest, Route};
use nightlight_core::shell::Shell;
use nightlight_core::splash::PlaybackProgress;
use nightlight_services::{PreferenceStore, SettingsRegistry};
use nightlight_theme::ThemePreference;

fn eventually(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    condition()
}

#[cfg(feature = "tokio-runner")]
#[test]
fn test_default_shell_starts_a_runner_for_appearance() {
    let (shell, _queue) = Shell::new(
        ShellConfig::default(),
        PreferenceStore::in_memory("theme_preference"),
    );

    assert!(shell.config().follow_system_appearance);
    assert!(nightlight_core::tasks::runtime_handle().is_some());
}

#[test]
fn test_from_settings() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("store").join("preferences.toml");

    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        "[general]\nlog_level = \"info\"\n\n[splash]\noverlap_ms = 400\ndestination = \"/home\"\n",
    )
    .unwrap();
    let theme_path = dir.path().join("theme.toml");
    std::fs::write(
        &theme_path,
        format!(
            "[theme]\nstorage_key = \"app.theme\"\nstore_path = {:?}\n",
            store_path.to_string_lossy()
        ),
    )
    .unwrap();

    let mut settings = SettingsRegistry::with_defaults();
    let results = pollster::block_on(settings.load_from_paths_async(vec![config_path, theme_path]));
    assert!(results.iter().all(|r| r.is_ok()));

    let (shell, mut queue) = Shell::from_settings(&settings).unwrap();
    assert_eq!(log::max_level(), log::LevelFilter::Info);
    assert_eq!(shell.theme().store().key(), "app.theme");

    // Splash settings reach the trigger.
    let mut trigger = shell.splash_trigger();
    assert_eq!(trigger.overlap_ms(), 400);
    assert!(trigger.on_playback_status(&PlaybackProgress::playing(1599, 2000)).is_none());
    assert!(trigger.on_playback_status(&PlaybackProgress::playing(1600, 2000)).is_some());
    assert_eq!(
        queue.try_next(),
        Some(NavigationRequest::Replace(Route::new("/home")))
    );

    // The preference lands in the configured store.
    shell.theme().set_preference(ThemePreference::Dark);
    let reader = PreferenceStore::from_config(&settings.theme_config).unwrap();
    assert!(eventually(|| {
        pollster::block_on(reader.load()) == Some(ThemePreference::Dark)
    }));
    assert!(store_path.exists());
}
