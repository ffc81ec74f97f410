use surgitrack_cli::commands;
use surgitrack_storage::history::PracticeStore;

async fn store() -> (tempfile::TempDir, PracticeStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = PracticeStore::open(dir.path()).await.unwrap();
    (dir, store)
}

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn calculator_listing_names_every_calculator() {
    let listing = commands::list_calculators();
    for id in ["rcri", "surgical_apgar", "asa", "possum", "caprini"] {
        assert!(listing.contains(id), "{id} missing from listing");
    }
}

#[test]
fn describe_shows_selection_options() {
    let text = commands::describe("asa").unwrap();
    assert!(text.contains("ASA Class (selection) one of: ASA I | ASA II"));
    assert!(text.contains("Emergency Surgery (boolean)"));
    assert!(commands::describe("meld").is_err());
}

#[tokio::test]
async fn calculate_without_patient_records_nothing() {
    let (_dir, store) = store().await;
    let (calculator, result, record) = commands::calculate(
        &store,
        "asa",
        &args(&["ASA Class=ASA III", "Emergency Surgery=yes"]),
        None,
    )
    .await
    .unwrap();

    assert_eq!(calculator.name, "ASA Physical Status");
    assert_eq!(result.score, 3.0);
    assert!(record.is_none());
    let rendered = commands::render_result(&calculator, &result);
    assert!(rendered.contains("Risk:  5.4%"));
}

#[tokio::test]
async fn calculate_with_patient_appends_history() {
    let (_dir, store) = store().await;
    let patient = commands::add_patient(&store, "Ada", Some("MRN-7".into()), Some("1960-03-01"))
        .await
        .unwrap();

    let (_, _, record) = commands::calculate(
        &store,
        "possum",
        &args(&["Physiological Score=12", "Operative Severity Score=6"]),
        Some(patient.id),
    )
    .await
    .unwrap();

    let record = record.unwrap();
    let history = store.list_calculations(patient.id).await.unwrap();
    assert_eq!(history, vec![record]);
    assert!(commands::render_history(&patient, &history).contains("POSSUM"));
}

#[tokio::test]
async fn bad_assignments_are_errors() {
    let (_dir, store) = store().await;
    for bad in [
        vec!["ASA Class"],
        vec!["Class=ASA I", "Emergency Surgery=no"],
        vec!["ASA Class=ASA VII", "Emergency Surgery=no"],
        vec!["ASA Class=ASA I"],
    ] {
        let result = commands::calculate(&store, "asa", &args(&bad), None).await;
        assert!(result.is_err(), "{bad:?} should fail");
    }
}

#[test]
fn empty_patient_list_renders_placeholder() {
    assert_eq!(commands::render_patients(&[]), "No patients found.\n");
}
