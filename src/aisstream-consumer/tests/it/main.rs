#![deny(warnings)]
#![deny(rust_2018_idioms)]

use aisstream_consumer::settings::Settings;
use config::{Config, File};

pub mod consumer;
pub mod watchdog;

#[test]
fn test_local_settings_are_valid() {
    Config::builder()
        .add_source(File::with_name("config/local.yml").required(true))
        .set_override("api_key", "test")
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize::<Settings>()
        .unwrap();
}

#[test]
fn test_production_settings_are_valid() {
    let settings = Config::builder()
        .add_source(File::with_name("config/production.yml").required(true))
        .set_override("api_key", "test")
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize::<Settings>()
        .unwrap();

    assert_eq!(settings.message_types().len(), 7);
}

#[test]
fn test_settings_require_api_key() {
    assert!(
        Config::builder()
            .add_source(File::with_name("config/local.yml").required(true))
            .build()
            .unwrap()
            .try_deserialize::<Settings>()
            .is_err()
    );
}
