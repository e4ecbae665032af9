//! Tests for the study plan store.

use dbs_core::{GeneratedImage, StudyStatus};
use dbs_error::PlanErrorKind;
use dbs_planner::StudyPlan;
use tempfile::TempDir;

fn plan_in(temp_dir: &TempDir) -> StudyPlan {
    StudyPlan::load_from(temp_dir.path().join("nested").join("study_plan.json")).unwrap()
}

fn image(n: usize) -> GeneratedImage {
    GeneratedImage {
        filename: format!("/tmp/output/John_3_16-17/img_{}.png", n),
        verse_range: "16".to_string(),
        description: format!("Scene {}", n),
    }
}

#[test]
fn test_missing_file_loads_empty() {
    let temp_dir = TempDir::new().unwrap();
    let plan = plan_in(&temp_dir);

    assert!(plan.list().is_empty());
    assert!(plan.get_next_pending().is_none());
    assert!(!plan.path().exists());
}

#[test]
fn test_add_persists_pending_item() {
    let temp_dir = TempDir::new().unwrap();
    let mut plan = plan_in(&temp_dir);

    plan.add("John 3:16-17").unwrap();

    let reloaded = StudyPlan::load_from(plan.path()).unwrap();
    assert_eq!(reloaded.list().len(), 1);
    let item = &reloaded.list()[0];
    assert_eq!(item.reference, "John 3:16-17");
    assert_eq!(item.status, StudyStatus::Pending);
    assert_eq!(item.created_at, item.updated_at);
}

#[test]
fn test_duplicate_add_leaves_existing_item() {
    let temp_dir = TempDir::new().unwrap();
    let mut plan = plan_in(&temp_dir);
    plan.add("Psalms 23:1-6").unwrap();
    let before = plan.get("Psalms 23:1-6").unwrap().clone();
    let file_before = std::fs::read_to_string(plan.path()).unwrap();

    let err = plan.add("Psalms 23:1-6").unwrap_err();

    assert_eq!(
        err.kind,
        PlanErrorKind::DuplicateReference("Psalms 23:1-6".to_string())
    );
    assert_eq!(plan.get("Psalms 23:1-6").unwrap(), &before);
    assert_eq!(std::fs::read_to_string(plan.path()).unwrap(), file_before);
}

#[test]
fn test_update_missing_reference_leaves_file_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let mut plan = plan_in(&temp_dir);
    plan.add("John 3:16").unwrap();
    let file_before = std::fs::read_to_string(plan.path()).unwrap();

    let err = plan
        .update_status("Romans 8:28", StudyStatus::Complete)
        .unwrap_err();
    assert_eq!(err.kind, PlanErrorKind::NotFound("Romans 8:28".to_string()));
    assert!(plan.update_title("Romans 8:28", "x").is_err());
    assert!(plan.update_images("Romans 8:28", vec![image(0)]).is_err());

    assert_eq!(std::fs::read_to_string(plan.path()).unwrap(), file_before);
}

#[test]
fn test_updates_touch_timestamp_and_persist() {
    let temp_dir = TempDir::new().unwrap();
    let mut plan = plan_in(&temp_dir);
    plan.add("John 3:16-17").unwrap();
    let created = plan.get("John 3:16-17").unwrap().created_at;

    plan.update_title("John 3:16-17", "For God So Loved the World")
        .unwrap();
    plan.update_images("John 3:16-17", vec![image(0), image(1)])
        .unwrap();
    plan.update_status("John 3:16-17", StudyStatus::Complete)
        .unwrap();

    let reloaded = StudyPlan::load_from(plan.path()).unwrap();
    let item = reloaded.get("John 3:16-17").unwrap();
    assert_eq!(item.title, "For God So Loved the World");
    assert_eq!(item.generated_images, vec![image(0), image(1)]);
    assert_eq!(item.status, StudyStatus::Complete);
    assert_eq!(item.created_at, created);
    assert!(item.updated_at >= created);
}

#[test]
fn test_next_pending_follows_insertion_order() {
    let temp_dir = TempDir::new().unwrap();
    let mut plan = plan_in(&temp_dir);
    plan.add("Genesis 1:1-5").unwrap();
    plan.add("John 1:1-5").unwrap();
    plan.add("Psalms 23:1-6").unwrap();

    assert_eq!(plan.get_next_pending().unwrap().reference, "Genesis 1:1-5");

    plan.update_status("Genesis 1:1-5", StudyStatus::Processed)
        .unwrap();
    assert_eq!(plan.get_next_pending().unwrap().reference, "John 1:1-5");

    plan.update_status("John 1:1-5", StudyStatus::Complete).unwrap();
    plan.update_status("Psalms 23:1-6", StudyStatus::Complete)
        .unwrap();
    assert!(plan.get_next_pending().is_none());
}

#[test]
fn test_record_run_applies_everything_at_once() {
    let temp_dir = TempDir::new().unwrap();
    let mut plan = plan_in(&temp_dir);
    plan.add("John 3:16-17").unwrap();
    plan.update_title("John 3:16-17", "Earlier Title").unwrap();

    plan.record_run("John 3:16-17", "", vec![image(0)]).unwrap();

    let item = StudyPlan::load_from(plan.path())
        .unwrap()
        .get("John 3:16-17")
        .unwrap()
        .clone();
    assert_eq!(item.status, StudyStatus::Processed);
    assert_eq!(item.title, "Earlier Title");
    assert_eq!(item.generated_images, vec![image(0)]);
}

#[test]
fn test_round_trip_preserves_order_and_fields() {
    for count in [0usize, 1, 7] {
        let temp_dir = TempDir::new().unwrap();
        let mut plan = plan_in(&temp_dir);
        for i in 0..count {
            plan.add(&format!("John {}:1", i + 1)).unwrap();
        }
        if count > 0 {
            plan.record_run("John 1:1", "In the Beginning", vec![image(0)])
                .unwrap();
        }
        plan.save().unwrap();

        let reloaded = StudyPlan::load_from(plan.path()).unwrap();
        assert_eq!(reloaded, plan);
    }
}

#[test]
fn test_file_format() {
    let temp_dir = TempDir::new().unwrap();
    let mut plan = plan_in(&temp_dir);
    plan.add("John 3:16").unwrap();

    let raw = std::fs::read_to_string(plan.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert!(raw.contains("\n  \"items\""));
    let item = &value["items"][0];
    assert_eq!(item["reference"], "John 3:16");
    assert_eq!(item["status"], "Pending");
    assert!(item.get("title").is_none());
    assert!(item.get("generated_images").is_none());
    assert!(
        chrono::DateTime::parse_from_rfc3339(item["created_at"].as_str().unwrap()).is_ok()
    );
}

#[test]
fn test_corrupt_file_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("study_plan.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = StudyPlan::load_from(&path).unwrap_err();

    assert!(matches!(err.kind, PlanErrorKind::Parse(_)));
}
