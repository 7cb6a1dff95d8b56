use chrono::NaiveTime;
use deskhive::Config;
use deskhive::models::spaces::{NewSpace, Space, SpaceType, WeekDay, WorkingTime};
use deskhive::services::spaces::publish_space;
use deskhive::store::MemoryStore;

/// Default configuration used across tests. Collection names match the
/// shipped defaults; the clock timeout is kept short so timeout tests run
/// quickly.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.clock.sync_timeout_ms = 200;
    config
}

/// A well-formed publish payload.
pub fn sample_new_space(name: &str) -> NewSpace {
    NewSpace {
        name: name.to_string(),
        address: "12 Mill Lane".to_string(),
        geo_address: "51.5074,-0.1278".to_string(),
        working_days: vec![
            WeekDay::Monday,
            WeekDay::Tuesday,
            WeekDay::Wednesday,
            WeekDay::Thursday,
            WeekDay::Friday,
        ],
        working_time: WorkingTime {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        },
        capacity: 8,
        min_duration: 30,
        max_duration: 480,
        min_charge: 5.0,
        max_charge: 40.0,
        images: vec!["https://img.example/loft.jpg".to_string()],
        contact_line: "+44 20 0000 0000".to_string(),
        features: vec!["wifi".to_string(), "projector".to_string()],
        space_type: SpaceType::Room,
        description: Some("Bright loft space".to_string()),
        visible: Some(true),
    }
}

/// A memory store pre-seeded with one published space; returns the store and
/// the stored record.
pub async fn seeded_store(config: &Config) -> (MemoryStore, Space) {
    let store = MemoryStore::new();
    let space = publish_space(
        &store,
        &config.store.spaces_collection,
        sample_new_space("Loft 12"),
    )
    .await
    .expect("seeding the test store should succeed");
    (store, space)
}
