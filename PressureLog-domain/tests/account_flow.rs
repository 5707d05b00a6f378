use chrono::{Duration, TimeZone, Utc};
use pressure_log_data::models::StoredAccount;
use pressure_log_data::store::{open_store, SharedStore, SqliteStore, StoreBackend, StoreConfig};
use pressure_log_domain::auth::SessionManager;
use pressure_log_domain::entities::{
    BloodPressureCategory, LoginRequest, NewDependent, NewReading, RegisterRequest, SubjectKind,
};
use pressure_log_domain::services::{
    dashboard_summary, period_report, RecordService, ReportConfig, SubjectFilter,
};

// Initialize tracing once for all tests
static INIT: std::sync::Once = std::sync::Once::new();
fn initialize() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("info")
            .with_test_writer()
            .try_init();
    });
}

fn demo_account() -> StoredAccount {
    StoredAccount {
        id: "user-1".to_string(),
        name: "John Doe".to_string(),
        email: "john@example.com".to_string(),
        password: "password123".to_string(),
        created_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

fn reading(subject_id: &str, kind: SubjectKind, systolic: u16, diastolic: u16, days_ago: i64) -> NewReading {
    let now = Utc.with_ymd_and_hms(2024, 10, 14, 8, 0, 0).unwrap();
    NewReading {
        systolic,
        diastolic,
        pulse: Some(70),
        timestamp: now - Duration::days(days_ago),
        notes: None,
        subject_id: subject_id.to_string(),
        subject_kind: kind,
    }
}

#[test]
fn test_login_record_and_report() {
    initialize();
    let config = StoreConfig {
        backend: StoreBackend::Memory,
        ..StoreConfig::default()
    };
    let store: SharedStore = open_store(&config).unwrap();
    let auth = SessionManager::new(store.clone()).with_builtin_accounts(vec![demo_account()]);

    let session = auth
        .login(&LoginRequest {
            email: "john@example.com".to_string(),
            password: "password123".to_string(),
        })
        .unwrap();

    let mut records = RecordService::open(store.clone(), &session).unwrap();
    let son = records
        .add_dependent(NewDependent {
            name: "Michael Doe".to_string(),
            relationship: "Son".to_string(),
            age: Some(12),
            gender: None,
        })
        .unwrap();

    records.add_reading(reading("user-1", SubjectKind::Owner, 118, 76, 1)).unwrap();
    records.add_reading(reading("user-1", SubjectKind::Owner, 136, 88, 2)).unwrap();
    records.add_reading(reading(&son.id, SubjectKind::Dependent, 110, 70, 3)).unwrap();
    records.add_reading(reading("user-1", SubjectKind::Owner, 150, 95, 50)).unwrap();

    let now = Utc.with_ymd_and_hms(2024, 10, 14, 12, 0, 0).unwrap();
    let config = ReportConfig::default();

    let dashboard = dashboard_summary(records.readings(), records.dependents(), &Utc, &config);
    assert_eq!(dashboard.stats.total_records, 4);
    assert_eq!(dashboard.dependent_count, 1);
    assert_eq!(dashboard.recent.len(), 4);
    assert_eq!(dashboard.recent[0].systolic, 118);

    let report = period_report(records.readings(), now, &Utc, &config);
    assert_eq!(report.stats.total_records, 3);
    assert_eq!(report.stats.stage1_readings, 1);
    // 121/78 on average
    assert_eq!(report.average_category, Some(BloodPressureCategory::Elevated));
    assert!(report.has_time_of_day_data());

    let outcome = records.delete_dependent(&son.id).unwrap();
    assert_eq!(outcome.readings_removed, 1);
    assert_eq!(records.readings_for(&SubjectFilter::Me).len(), 3);

    auth.logout(&session).unwrap();
    assert!(auth.restore().unwrap().is_none());

    let session = auth
        .login(&LoginRequest {
            email: "john@example.com".to_string(),
            password: "password123".to_string(),
        })
        .unwrap();
    let reopened = RecordService::open(store, &session).unwrap();
    assert_eq!(reopened.readings().len(), 3);
    assert!(reopened.dependents().is_empty());
}

#[test]
fn test_registered_account_survives_sqlite_reopen() {
    initialize();
    let path = std::env::temp_dir().join(format!(
        "pressure_log_flow_{}_{}.db",
        std::process::id(),
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    let config = StoreConfig::default();

    let owner_id = {
        let store = SqliteStore::open(&path, &config).unwrap();
        let auth = SessionManager::new(store.clone());
        let session = auth
            .register(&RegisterRequest {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                password: "secret1".to_string(),
            })
            .unwrap();

        let mut records = RecordService::open(store, &session).unwrap();
        records
            .add_reading(reading(session.owner_id(), SubjectKind::Owner, 124, 78, 0))
            .unwrap();
        session.owner_id().to_string()
    };

    let store = SqliteStore::open(&path, &config).unwrap();
    let auth = SessionManager::new(store.clone());
    let session = auth.restore().unwrap().expect("session should survive reopen");
    assert_eq!(session.owner_id(), owner_id);

    let records = RecordService::open(store, &session).unwrap();
    assert_eq!(records.readings().len(), 1);
    assert_eq!(records.resolve_subject_name(&owner_id, SubjectKind::Owner), "Jane Doe (Me)");
    assert_eq!(
        records.readings()[0].category(),
        BloodPressureCategory::Elevated
    );

    let _ = std::fs::remove_file(&path);
}
