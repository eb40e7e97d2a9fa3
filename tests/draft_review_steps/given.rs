//! Given steps for draft review BDD scenarios.

use super::world::{DraftReviewWorld, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use taskflow::draft::domain::{DraftEdit, DraftFields, NewDraft, Source};
use taskflow::draft::ports::DraftRepository;

#[given(r#"a pending draft titled "{title}""#)]
fn pending_draft(world: &mut DraftReviewWorld, title: String) -> Result<(), eyre::Report> {
    let fields = DraftFields::new(title).wrap_err("draft title rejected in scenario setup")?;
    let new_draft = NewDraft::new(Source::Gmail, fields, None, &DefaultClock);
    let stored = run_async(world.repository.create(&new_draft))
        .wrap_err("seed draft in scenario setup")?;
    world.seeded_ids.push(stored.id());
    world.last_draft = Some(stored);
    Ok(())
}

#[given(r#"the draft has description "{description}""#)]
fn draft_has_description(
    world: &mut DraftReviewWorld,
    description: String,
) -> Result<(), eyre::Report> {
    let id = world.current_id()?;
    let edit = DraftEdit::new().with_description(description);
    let updated = run_async(world.service.edit_draft(id, edit))
        .wrap_err("set draft description in scenario setup")?;
    world.last_draft = Some(updated);
    Ok(())
}

#[given("the draft has already been approved")]
fn draft_already_approved(world: &mut DraftReviewWorld) -> Result<(), eyre::Report> {
    let id = world.current_id()?;
    run_async(world.service.approve_draft(id, None))
        .wrap_err("approve draft in scenario setup")?;
    Ok(())
}

#[given("the draft has been deleted")]
fn draft_deleted(world: &mut DraftReviewWorld) -> Result<(), eyre::Report> {
    let id = world.current_id()?;
    run_async(world.service.delete_draft(id)).wrap_err("delete draft in scenario setup")?;
    Ok(())
}
