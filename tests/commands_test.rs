//! End-to-end tests: profile store on disk through to rendered reports

mod common;

use chrono::{TimeZone, Utc};
use common::{ENV_MUTEX, EnvVarGuard, ProfileFixture, sample_document};
use quitstat::{
    QuitstatError,
    commands::{Report, ReportContext, render_report},
    output::{JsonFormatter, TableFormatter},
    profile_loader::{PROFILE_ENV_VAR, ProfileLoader},
    timezone::TimezoneConfig,
};
use serde_json::{Value, json};

async fn context_for(fixture: &ProfileFixture, now: chrono::DateTime<Utc>) -> ReportContext {
    let loaded = ProfileLoader::at(fixture.path()).load().await.unwrap();
    ReportContext::new(loaded.profile, loaded.usage, now, TimezoneConfig::utc())
}

fn ten_days_later() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 11, 8, 30, 0).unwrap()
}

#[tokio::test]
async fn test_status_json_from_profile_store() {
    let fixture = ProfileFixture::new(&sample_document("2024-03-01T08:30:00Z")).await;
    let context = context_for(&fixture, ten_days_later()).await;

    let output = render_report(Report::Status, &context, &JsonFormatter);
    let parsed: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(parsed["elapsed"]["days"], 10);
    assert_eq!(parsed["cigarettes_avoided"], 200.0);
    assert_eq!(parsed["money_saved"], 100.0);
    assert_eq!(parsed["next_milestone"]["threshold_minutes"], 43_200);
}

#[tokio::test]
async fn test_status_table_from_profile_store() {
    let fixture = ProfileFixture::new(&sample_document("2024-03-01T08:30:00Z")).await;
    let context = context_for(&fixture, ten_days_later()).await;

    let output = render_report(Report::Status, &context, &TableFormatter::new());
    assert!(output.contains("$100.00"));
    assert!(output.contains("10d 00:00:00"));
}

#[tokio::test]
async fn test_achievements_include_usage_counters() {
    let fixture = ProfileFixture::new(&sample_document("2024-03-01T08:30:00Z")).await;
    let context = context_for(&fixture, ten_days_later()).await;

    let output = render_report(Report::Achievements, &context, &JsonFormatter);
    let parsed: Value = serde_json::from_str(&output).unwrap();
    let unlocked: Vec<&str> = parsed["achievements"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|a| a["unlocked"] == true)
        .map(|a| a["id"].as_str().unwrap())
        .collect();

    // Five milestones are behind at ten days, enough for health_hero
    assert_eq!(
        unlocked,
        [
            "first_day",
            "week_warrior",
            "money_saver",
            "breath_master",
            "health_hero"
        ]
    );
}

#[tokio::test]
async fn test_lifetime_report() {
    let fixture = ProfileFixture::new(&sample_document("2024-03-01T08:30:00Z")).await;
    let context = context_for(&fixture, ten_days_later()).await;

    let output = render_report(Report::Lifetime, &context, &JsonFormatter);
    let parsed: Value = serde_json::from_str(&output).unwrap();
    // One year back from 2024-03-11 spans the leap day, ending at the quit date
    assert_eq!(parsed["days_as_smoker"], 356);
    assert_eq!(parsed["cigarettes_smoked"], 7_120.0);
}

#[tokio::test]
async fn test_flat_document_without_quit_date() {
    let fixture = ProfileFixture::new(&json!({
        "cigarettesPerDay": 15,
        "pricePerPack": 8,
        "breathingExercises": 3
    }))
    .await;
    let context = context_for(&fixture, ten_days_later()).await;

    assert!(context.profile.quit_timestamp().is_none());
    let output = render_report(Report::Status, &context, &JsonFormatter);
    assert!(output.contains("no_quit_date"));
}

#[tokio::test]
async fn test_malformed_profile_store() {
    let fixture = ProfileFixture::raw("{ not json").await;
    let err = ProfileLoader::at(fixture.path()).load().await.unwrap_err();
    assert!(matches!(err, QuitstatError::Json(_)));
}

#[tokio::test]
async fn test_profile_location_from_environment() {
    let _lock = ENV_MUTEX.lock().await;
    let fixture = ProfileFixture::new(&sample_document("2024-03-01T08:30:00Z")).await;
    let _guard = EnvVarGuard::set(PROFILE_ENV_VAR, fixture.path());

    let loader = ProfileLoader::new(None).unwrap();
    assert_eq!(loader.path(), fixture.path());

    let loaded = loader.load().await.unwrap();
    assert_eq!(loaded.usage.consecutive_days, Some(10));
}

#[tokio::test]
async fn test_explicit_path_beats_environment() {
    let _lock = ENV_MUTEX.lock().await;
    let _guard = EnvVarGuard::set(PROFILE_ENV_VAR, "/nonexistent/env-profile.json");

    let fixture = ProfileFixture::new(&sample_document("2024-03-01T08:30:00Z")).await;
    let loader = ProfileLoader::new(Some(fixture.path().to_path_buf())).unwrap();
    assert_eq!(loader.path(), fixture.path());
}

#[tokio::test]
async fn test_missing_profile_store() {
    let _lock = ENV_MUTEX.lock().await;
    let _guard = EnvVarGuard::set(PROFILE_ENV_VAR, "/nonexistent/quitstat/profile.json");

    let err = ProfileLoader::new(None).unwrap().load().await.unwrap_err();
    assert!(matches!(err, QuitstatError::ProfileNotFound(_)));
    assert!(err.to_string().contains("/nonexistent/quitstat/profile.json"));
}
