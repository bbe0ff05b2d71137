use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::env;
use std::fs;

mod common;
use common::{init_db_with_data, rat, setup_test_db};

#[test]
fn test_map_prints_embed_url_for_located_attendee() {
    let db_path = setup_test_db("map_located");
    init_db_with_data(&db_path);

    rat()
        .args(["--db", &db_path, "map", "1"])
        .assert()
        .success()
        .stdout(contains("Bob's Location"))
        .stdout(contains("https://www.google.com/maps?q=14.5,121&z=15&t=k&output=embed"));
}

#[test]
fn test_map_without_location_warns() {
    let db_path = setup_test_db("map_no_location");
    init_db_with_data(&db_path);

    rat()
        .args(["--db", &db_path, "map", "2"])
        .assert()
        .success()
        .stdout(contains("Alice has no recorded location."))
        .stdout(contains("google.com").not());
}

#[test]
fn test_map_invalid_position_fails() {
    let db_path = setup_test_db("map_invalid");
    init_db_with_data(&db_path);

    rat()
        .args(["--db", &db_path, "map", "9"])
        .assert()
        .failure()
        .stderr(contains("No attendee at position 9"));
}

#[test]
fn test_weather_prints_request_url() {
    let db_path = setup_test_db("weather_url");
    init_db_with_data(&db_path);

    rat()
        .args(["--db", &db_path, "weather", "1"])
        .assert()
        .success()
        .stdout(contains("https://api.open-meteo.com/v1/forecast?latitude=14.5&longitude=121"));
}

#[test]
fn test_weather_decodes_saved_response() {
    let db_path = setup_test_db("weather_response");
    init_db_with_data(&db_path);

    let mut response = env::temp_dir();
    response.push("weather_response_rattendance.json");
    fs::write(
        &response,
        r#"{"current":{"temperature_2m":29.6,"relative_humidity_2m":78,"weather_code":2,"wind_speed_10m":3.04}}"#,
    )
    .unwrap();

    rat()
        .args([
            "--db",
            &db_path,
            "weather",
            "1",
            "--response",
            response.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(contains("30°C Partly cloudy | 💧 78% | 💨 3.0 m/s"));
}

#[test]
fn test_weather_bad_response_is_unavailable() {
    let db_path = setup_test_db("weather_bad_response");
    init_db_with_data(&db_path);

    let mut response = env::temp_dir();
    response.push("weather_bad_response_rattendance.json");
    fs::write(&response, "not json").unwrap();

    rat()
        .args([
            "--db",
            &db_path,
            "weather",
            "1",
            "--response",
            response.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(contains("Weather unavailable"));
}
