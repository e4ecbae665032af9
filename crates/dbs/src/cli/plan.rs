//! Study plan command handlers.

use super::commands::PlanCommands;
use super::process::run_and_record;
use dbs::{DbsConfig, DbsResult, StudyItem, StudyPlan};

/// Handle study plan commands.
pub async fn handle_plan_command(cmd: PlanCommands) -> DbsResult<()> {
    let config = DbsConfig::load()?;
    let mut plan = StudyPlan::load_from(config.plan_path()?)?;

    match cmd {
        PlanCommands::Add { reference } => {
            let reference = reference.join(" ");
            plan.add(&reference)?;
            println!("Added '{}' to plan.", reference);
        }

        PlanCommands::List => {
            print!("{}", format_plan_table(plan.list()));
        }

        PlanCommands::Next => {
            let Some(next) = plan.get_next_pending() else {
                println!("No pending items in plan.");
                return Ok(());
            };
            let reference = next.reference.clone();
            println!("Processing next pending item: {}", reference);
            run_and_record(&config, &reference).await?;
        }

        PlanCommands::Mark { reference, status } => {
            plan.update_status(&reference, status)?;
            println!("Marked '{}' as {}.", reference, status);
        }
    }

    Ok(())
}

/// Fixed-width listing of plan items.
fn format_plan_table(items: &[StudyItem]) -> String {
    if items.is_empty() {
        return "Plan is empty.\n".to_string();
    }

    let mut out = format!(
        "{:<30} {:<12} {:<35} {}\n{:-<95}\n",
        "Reference", "Status", "Title", "Created At", ""
    );
    for item in items {
        out.push_str(&format!(
            "{:<30} {:<12} {:<35} {}\n",
            item.reference,
            item.status.to_string(),
            truncate(&item.title, 35),
            item.created_at.format("%Y-%m-%d %H:%M")
        ));
    }
    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width - 3).collect();
    short.push_str("...");
    short
}
