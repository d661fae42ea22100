use super::*;
use vrp_seed_core::utils::Random;

fn read(json: &str) -> GenericResult<Config> {
    read_config(BufReader::new(json.as_bytes()))
}

#[test]
fn can_read_full_config() {
    let config = read(
        r#"{
            "timeLimit": 30,
            "randomSeed": 42,
            "initial": { "pathMargin": 4, "mode": "clustering" },
            "telemetry": { "logging": { "enabled": true, "prefix": "[seed] " } }
        }"#,
    )
    .expect("cannot read config");

    assert_eq!(config.time_limit(), 30.);
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.initial_settings(), InitialSettings { path_margin: 4, mode: InitialMode::Clustering });
    let logging = config.telemetry.and_then(|telemetry| telemetry.logging).expect("no logging");
    assert!(logging.enabled);
    assert_eq!(logging.prefix.as_deref(), Some("[seed] "));
}

#[test]
fn can_use_defaults_for_empty_config() {
    let config = read("{}").expect("cannot read config");

    assert_eq!(config.time_limit(), DEFAULT_TIME_LIMIT);
    assert_eq!(config.initial_settings(), InitialSettings::default());
    assert_eq!(config.initial_settings().path_margin, 10);
    assert_eq!(config.initial_settings().mode, InitialMode::Auto);
}

#[test]
fn can_use_defaults_for_partial_initial_config() {
    let config = read(r#"{ "initial": { "mode": "replay" } }"#).expect("cannot read config");

    assert_eq!(config.initial_settings(), InitialSettings { path_margin: 10, mode: InitialMode::Replay });
}

parameterized_test! {can_reject_invalid_config, json, {
    assert!(read(json).is_err());
}}

can_reject_invalid_config! {
    case01_negative_time_limit: r#"{ "timeLimit": -1 }"#,
    case02_unknown_mode: r#"{ "initial": { "mode": "random" } }"#,
    case03_negative_margin: r#"{ "initial": { "pathMargin": -2 } }"#,
    case04_not_json: "time limit is 10",
}

#[test]
fn can_create_repeatable_environment() {
    let config = read(r#"{ "randomSeed": 7, "telemetry": { "logging": { "enabled": false } } }"#)
        .expect("cannot read config");

    let first = create_environment(&config);
    let second = create_environment(&config);

    let sample =
        |environment: &Environment| (0..10).map(|_| environment.random.uniform_int(0, 1000)).collect::<Vec<_>>();
    assert_eq!(sample(&first), sample(&second));
    (first.logger)("not printed");
}
