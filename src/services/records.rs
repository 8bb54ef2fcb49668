use crate::domain::errors::EditorialError;
use crate::domain::locale::Locale;
use crate::domain::moderation::ModerationStateMachine;
use crate::domain::query::build_query;
use crate::domain::record::{ContentRecord, RecordContent};
use crate::domain::types::RecordId;
use crate::domain::validation::ValidationRules;
use crate::dto::records::{ContentDetail, ContentListItem, ContentPage};
use crate::forms::content::ContentForm;
use crate::forms::filters::CatalogFilterForm;
use crate::repository::{ContentReader, ContentWriter, DEFAULT_ITEMS_PER_PAGE, RecordListQuery};

use super::{EditorialContext, ServiceError, ServiceResult};

fn load_record<R>(repo: &R, id: &RecordId) -> ServiceResult<ContentRecord>
where
    R: ContentReader,
{
    match repo.get_record_by_id(id) {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get record {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

fn store_record<R>(repo: &R, record: &ContentRecord) -> ServiceResult<()>
where
    R: ContentWriter,
{
    repo.save_record(record).map(|_| ()).map_err(|e| {
        log::error!("Failed to save record {}: {e}", record.id);
        ServiceError::Internal
    })
}

fn refused(action: &str, id: &RecordId, err: impl Into<EditorialError>) -> ServiceError {
    let err = err.into();
    log::warn!("Refused to {action} record {id}: {err}");
    ServiceError::Editorial(err)
}

/// Field-level checks plus hierarchy consistency, then the configured
/// locale fill.
fn prepare_content(
    content: RecordContent,
    ctx: &EditorialContext<'_>,
) -> Result<RecordContent, EditorialError> {
    ValidationRules::check_fields(&content)?;
    if let Some(geo) = &content.geo {
        geo.validate_against_hierarchy(ctx.geo)?;
    }
    if ctx.config.fill_secondary_locales {
        Ok(content.with_fallback_fill())
    } else {
        Ok(content)
    }
}

/// Creates a new `draft` record from a submitted form.
pub fn create_record<R>(
    form: ContentForm,
    ctx: &EditorialContext<'_>,
    repo: &R,
) -> ServiceResult<ContentRecord>
where
    R: ContentWriter,
{
    ctx.actor()?;

    let content = RecordContent::try_from(form).map_err(|e| {
        log::warn!("Rejected content form: {e}");
        ServiceError::from(e)
    })?;
    let content = prepare_content(content, ctx).map_err(|e| {
        log::warn!("Refused to create record: {e}");
        ServiceError::Editorial(e)
    })?;

    let id = repo.next_record_id().map_err(|e| {
        log::error!("Failed to allocate record id: {e}");
        ServiceError::Internal
    })?;
    let record = ContentRecord::draft(id, content, ctx.now());
    store_record(repo, &record)?;
    log::info!("Created {} record {}", record.kind(), record.id);
    Ok(record)
}

/// Replaces the content of an existing record.
pub fn edit_record<R>(
    id: &RecordId,
    form: ContentForm,
    ctx: &EditorialContext<'_>,
    repo: &R,
) -> ServiceResult<ContentRecord>
where
    R: ContentReader + ContentWriter,
{
    let actor = ctx.actor()?;
    let record = load_record(repo, id)?;

    let content = RecordContent::try_from(form).map_err(|e| {
        log::warn!("Rejected content form for record {id}: {e}");
        ServiceError::from(e)
    })?;
    let content = prepare_content(content, ctx).map_err(|e| refused("edit", id, e))?;

    let edited = ModerationStateMachine::edit(
        &record,
        content,
        &actor,
        ctx.now(),
        ctx.config.published_edit_policy,
    )
    .map_err(|e| refused("edit", id, e))?;
    store_record(repo, &edited)?;
    if edited.status != record.status {
        log::info!(
            "Record {id} moved from {} to {} after edit by {actor}",
            record.status,
            edited.status
        );
    }
    Ok(edited)
}

pub fn submit_record<R>(
    id: &RecordId,
    ctx: &EditorialContext<'_>,
    repo: &R,
) -> ServiceResult<ContentRecord>
where
    R: ContentReader + ContentWriter,
{
    let actor = ctx.actor()?;
    let record = load_record(repo, id)?;

    let submitted = ModerationStateMachine::submit(&record, &actor, ctx.now())
        .map_err(|e| refused("submit", id, e))?;
    if let Some(geo) = submitted.geo() {
        geo.validate_against_hierarchy(ctx.geo)
            .map_err(|e| refused("submit", id, e))?;
    }

    store_record(repo, &submitted)?;
    log::info!("Record {id} submitted for review by {actor}");
    Ok(submitted)
}

pub fn approve_record<R>(
    id: &RecordId,
    ctx: &EditorialContext<'_>,
    repo: &R,
) -> ServiceResult<ContentRecord>
where
    R: ContentReader + ContentWriter,
{
    let actor = ctx.actor()?;
    let record = load_record(repo, id)?;

    let approved = ModerationStateMachine::approve(&record, &actor, ctx.now())
        .map_err(|e| refused("approve", id, e))?;
    store_record(repo, &approved)?;
    log::info!("Record {id} published by {actor}");
    Ok(approved)
}

pub fn reject_record<R>(
    id: &RecordId,
    reason: &str,
    ctx: &EditorialContext<'_>,
    repo: &R,
) -> ServiceResult<ContentRecord>
where
    R: ContentReader + ContentWriter,
{
    let actor = ctx.actor()?;
    let record = load_record(repo, id)?;

    let rejected = ModerationStateMachine::reject(&record, &actor, reason, ctx.now())
        .map_err(|e| refused("reject", id, e))?;
    store_record(repo, &rejected)?;
    log::info!("Record {id} returned to draft by {actor}");
    Ok(rejected)
}

/// Toggles visibility. Allowed in every status.
pub fn set_record_active<R>(
    id: &RecordId,
    is_active: bool,
    ctx: &EditorialContext<'_>,
    repo: &R,
) -> ServiceResult<ContentRecord>
where
    R: ContentReader + ContentWriter,
{
    ctx.actor()?;
    let record = load_record(repo, id)?;

    let updated = record.with_active(is_active, ctx.now());
    store_record(repo, &updated)?;
    Ok(updated)
}

pub fn delete_record<R>(id: &RecordId, ctx: &EditorialContext<'_>, repo: &R) -> ServiceResult<()>
where
    R: ContentReader + ContentWriter,
{
    let actor = ctx.actor()?;
    let record = load_record(repo, id)?;
    ModerationStateMachine::delete(&record).map_err(|e| refused("delete", id, e))?;

    match repo.delete_record(id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => {
            log::info!("Record {id} deleted by {actor}");
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete record {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Lists one page of records matching the submitted filters.
///
/// `page` is 1-based; names are resolved in the requested locale, or the
/// configured default.
pub fn list_records<R>(
    form: CatalogFilterForm,
    page: usize,
    ctx: &EditorialContext<'_>,
    repo: &R,
) -> ServiceResult<ContentPage>
where
    R: ContentReader,
{
    let filters = form.into_filters(ctx.config.default_locale)?;
    let query = build_query(filters).map_err(|e| {
        log::warn!("Rejected catalog query: {e}");
        ServiceError::Editorial(e.into())
    })?;
    log::debug!("Listing records with {:?}", query.filters());

    let locale = query.locale();
    let page = page.max(1);
    match repo.list_records(RecordListQuery::new(query).paginate(page, DEFAULT_ITEMS_PER_PAGE)) {
        Ok((total, records)) => Ok(ContentPage {
            total,
            page,
            items: records
                .iter()
                .map(|record| ContentListItem::localized(record, locale))
                .collect(),
        }),
        Err(e) => {
            log::error!("Failed to list records: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_record<R>(id: &RecordId, locale: Locale, repo: &R) -> ServiceResult<ContentDetail>
where
    R: ContentReader,
{
    let record = load_record(repo, id)?;
    Ok(ContentDetail::localized(&record, locale))
}
