//! Reference processing command handler.

use dbs::{DbsConfig, DbsOrchestrator, DbsResult, RunReport, StudyPlan};
use tracing::{info, warn};

/// Process `reference` end to end, then record the run in the study plan.
pub async fn process_reference(reference: &str) -> DbsResult<()> {
    let config = DbsConfig::load()?;
    run_and_record(&config, reference).await
}

/// Run the pipeline and, if `reference` is queued in the plan, mark it processed.
pub(crate) async fn run_and_record(config: &DbsConfig, reference: &str) -> DbsResult<()> {
    info!(reference, "Processing reference");

    let orchestrator = DbsOrchestrator::from_config(config);
    let report = orchestrator.process(reference).await?;

    record_in_plan(config, reference, &report);
    println!(
        "Processed {} ({} image(s) generated).",
        report.reference(),
        report.images().len()
    );
    Ok(())
}

/// Plan bookkeeping never fails a run that already changed OBS.
fn record_in_plan(config: &DbsConfig, reference: &str, report: &RunReport) {
    let plan = config
        .plan_path()
        .and_then(StudyPlan::load_from);
    let mut plan = match plan {
        Ok(plan) => plan,
        Err(e) => {
            warn!(error = %e, "Could not load study plan");
            return;
        }
    };

    if plan.get(reference).is_none() {
        return;
    }

    match plan.record_run(reference, report.title(), report.images().clone()) {
        Ok(()) => info!(reference, "Marked as Processed in plan"),
        Err(e) => warn!(reference, error = %e, "Could not update study plan"),
    }
}
