//! When steps for draft review BDD scenarios.

use super::world::{DraftReviewWorld, run_async};
use rstest_bdd_macros::when;
use taskflow::draft::domain::DraftEdit;

#[when("the draft is approved")]
fn approve_draft(world: &mut DraftReviewWorld) -> Result<(), eyre::Report> {
    let id = world.current_id()?;
    let result = run_async(world.service.approve_draft(id, None));
    if let Ok(ref approved) = result {
        world.last_draft = Some(approved.draft.clone());
    }
    world.last_approval = Some(result);
    Ok(())
}

#[when(r#"the draft is approved with title "{title}""#)]
fn approve_draft_with_title(
    world: &mut DraftReviewWorld,
    title: String,
) -> Result<(), eyre::Report> {
    let id = world.current_id()?;
    let edits = DraftEdit::new().with_title(title);
    let result = run_async(world.service.approve_draft(id, Some(edits)));
    if let Ok(ref approved) = result {
        world.last_draft = Some(approved.draft.clone());
    }
    world.last_approval = Some(result);
    Ok(())
}

#[when("the draft is rejected")]
fn reject_draft(world: &mut DraftReviewWorld) -> Result<(), eyre::Report> {
    let id = world.current_id()?;
    let rejected = run_async(world.service.reject_draft(id))?;
    world.last_draft = Some(rejected);
    Ok(())
}

#[when(r#"the draft title is edited to "{title}""#)]
fn edit_draft_title(world: &mut DraftReviewWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.current_id()?;
    let edit = DraftEdit::new().with_title(title);
    let updated = run_async(world.service.edit_draft(id, edit))?;
    world.last_draft = Some(updated);
    Ok(())
}

#[when("every seeded draft is bulk approved")]
fn bulk_approve_seeded(world: &mut DraftReviewWorld) -> Result<(), eyre::Report> {
    let ids = world.seeded_ids.clone();
    let report = run_async(world.service.bulk_approve(ids));
    world.bulk_report = Some(report);
    Ok(())
}
