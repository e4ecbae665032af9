//! Study plan queue for dbs.
//!
//! A plan is an ordered list of references to work through, persisted as
//! pretty-printed JSON (by default `~/.dbs-initiator/study_plan.json`).
//! Every mutation rewrites the whole file. There is no locking, so two
//! processes editing the same plan will race.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod plan;

pub use plan::{PLAN_DIR_NAME, PLAN_FILE_NAME, StudyPlan, default_plan_path};
