//! Then steps for draft review BDD scenarios.

use super::world::{DraftReviewWorld, run_async};
use rstest_bdd_macros::then;
use taskflow::draft::{
    domain::{DraftDomainError, DraftStatus},
    services::DraftReviewError,
};
use taskflow::task::ports::TaskStore;

#[then(r#"the draft status is "{status}""#)]
fn draft_status_is(world: &DraftReviewWorld, status: String) -> Result<(), eyre::Report> {
    let expected = DraftStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;

    let id = world.current_id()?;
    let draft = run_async(world.service.get_draft(id))?;
    if draft.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            draft.status().as_str()
        ));
    }
    Ok(())
}

#[then("exactly {count:usize} canonical tasks exist")]
fn canonical_task_count(world: &DraftReviewWorld, count: usize) -> Result<(), eyre::Report> {
    let tasks = run_async(world.store.list())?;
    if tasks.len() != count {
        return Err(eyre::eyre!(
            "expected {count} canonical tasks, found {}",
            tasks.len()
        ));
    }
    Ok(())
}

#[then(r#"the canonical task is titled "{title}""#)]
fn canonical_task_titled(world: &DraftReviewWorld, title: String) -> Result<(), eyre::Report> {
    let tasks = run_async(world.store.list())?;
    let found = tasks.iter().any(|task| task.title() == title);
    if !found {
        return Err(eyre::eyre!("no canonical task titled {title:?}"));
    }
    Ok(())
}

#[then("the approval fails because the draft is not pending")]
fn approval_fails_not_pending(world: &DraftReviewWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_approval
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing approval result"))?;

    if !matches!(
        result,
        Err(DraftReviewError::Domain(DraftDomainError::NotPending { .. }))
    ) {
        return Err(eyre::eyre!("expected NotPending error, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the draft is titled "{title}""#)]
fn draft_titled(world: &DraftReviewWorld, title: String) -> Result<(), eyre::Report> {
    let draft = world
        .last_draft
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing draft in scenario world"))?;
    if draft.fields().title() != title {
        return Err(eyre::eyre!(
            "expected title {title:?}, found {:?}",
            draft.fields().title()
        ));
    }
    Ok(())
}

#[then("the draft keeps its description")]
fn draft_keeps_description(world: &DraftReviewWorld) -> Result<(), eyre::Report> {
    let draft = world
        .last_draft
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing draft in scenario world"))?;
    if draft.fields().description().is_none() {
        return Err(eyre::eyre!("draft description was dropped by the edit"));
    }
    Ok(())
}

#[then("the bulk report lists {count:usize} failed drafts")]
fn bulk_report_failures(world: &DraftReviewWorld, count: usize) -> Result<(), eyre::Report> {
    let report = world
        .bulk_report
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing bulk report"))?;
    let failed = report.failed();
    if failed.len() != count {
        return Err(eyre::eyre!(
            "expected {count} failed drafts, found {} ({failed:?})",
            failed.len()
        ));
    }
    Ok(())
}
