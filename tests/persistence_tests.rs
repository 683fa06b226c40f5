use classroom_signage::persistence::{SLOTS_KEY, TEMPLATES_KEY, TIMETABLE_KEY};
use classroom_signage::{
    FileSettingsStore, MemorySettingsStore, PersistenceError, Settings, SettingsStore, TimeSlot,
    load_settings, save_settings,
};
use tempfile::TempDir;

fn sample_settings() -> Settings {
    let mut settings = Settings::default();
    settings.slots = vec![
        TimeSlot::new("1", "早修", "07:30", "08:00"),
        TimeSlot::new("2", "第一節", "08:10", "09:00"),
    ];
    settings.timetable.set(1, "2", "國文");
    settings.timetable.set(5, "1", "班會");
    settings.templates[0].title = "集合".into();
    settings
}

#[test]
fn first_run_yields_defaults() {
    let store = MemorySettingsStore::new();
    let settings = load_settings(&store);

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.slots.len(), 13);
    assert_eq!(settings.slots[0], TimeSlot::new("1", "第一節", "08:10", "09:00"));
    assert_eq!(settings.slots[12], TimeSlot::new("13", "第C節", "20:15", "21:05"));
    assert!(settings.timetable.is_empty());
    assert_eq!(settings.templates.len(), 3);
    assert_eq!(settings.templates[1].btn_name, "安靜午休");
}

#[test]
fn corrupt_records_fall_back_individually() {
    let store = MemorySettingsStore::with_entries([
        (SLOTS_KEY, "{not json"),
        (TIMETABLE_KEY, r#"{"1":{"1":"國文"}}"#),
        (TEMPLATES_KEY, r#"[{"id":"x"}]"#),
    ]);

    let settings = load_settings(&store);

    assert_eq!(settings.slots, Settings::default().slots);
    assert_eq!(settings.timetable.subject(1, "1"), Some("國文"));
    assert_eq!(settings.templates, Settings::default().templates);
}

#[test]
fn records_use_the_documented_json_shapes() {
    let store = MemorySettingsStore::new();
    save_settings(&store, &sample_settings()).unwrap();

    let slots: serde_json::Value =
        serde_json::from_str(&store.read(SLOTS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(
        slots[0],
        serde_json::json!({ "id": "1", "name": "早修", "start": "07:30", "end": "08:00" })
    );

    let timetable: serde_json::Value =
        serde_json::from_str(&store.read(TIMETABLE_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(timetable["1"]["2"], "國文");
    assert_eq!(timetable["5"]["1"], "班會");

    let templates: serde_json::Value =
        serde_json::from_str(&store.read(TEMPLATES_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(templates[0]["btnName"], "下課休息");
    assert_eq!(templates[0]["title"], "集合");
}

#[test]
fn file_store_round_trip_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let settings = sample_settings();
    {
        let store = FileSettingsStore::new(dir.path()).unwrap();
        save_settings(&store, &settings).unwrap();
    }

    let store = FileSettingsStore::new(dir.path()).unwrap();
    assert!(dir.path().join("slots.json").exists());
    assert_eq!(load_settings(&store), settings);
}

#[test]
fn file_store_reports_missing_keys_as_absent() {
    let dir = TempDir::new().unwrap();
    let store = FileSettingsStore::new(dir.path().join("nested")).unwrap();
    assert_eq!(store.read(SLOTS_KEY).unwrap(), None);
}

#[test]
fn file_store_treats_garbage_as_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("templates.json"), "\u{0}\u{1}garbage").unwrap();
    let store = FileSettingsStore::new(dir.path()).unwrap();

    assert_eq!(load_settings(&store).templates, Settings::default().templates);
}

#[test]
fn file_store_rejects_path_like_keys() {
    let dir = TempDir::new().unwrap();
    let store = FileSettingsStore::new(dir.path()).unwrap();
    match store.write("../escape", "{}") {
        Err(PersistenceError::InvalidData(msg)) => assert!(msg.contains("invalid settings key")),
        other => panic!("expected InvalidData, got {other:?}"),
    }
}

#[cfg(feature = "sqlite")]
#[test]
fn sqlite_store_round_trip_and_overwrite() {
    use classroom_signage::SqliteSettingsStore;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.sqlite3");
    let settings = sample_settings();
    {
        let store = SqliteSettingsStore::new(&path).unwrap();
        save_settings(&store, &Settings::default()).unwrap();
        save_settings(&store, &settings).unwrap();
    }

    let store = SqliteSettingsStore::new(&path).unwrap();
    assert_eq!(load_settings(&store), settings);
}

#[cfg(feature = "sqlite")]
#[test]
fn sqlite_store_missing_key_is_absent() {
    let store = classroom_signage::SqliteSettingsStore::in_memory().unwrap();
    assert_eq!(store.read(TIMETABLE_KEY).unwrap(), None);
    assert_eq!(load_settings(&store), Settings::default());
}
