use crate::domain::place::Place;
use crate::forms::places::PlaceForm;
use crate::repository::PlaceWriter;

use super::{EditorialContext, ServiceError, ServiceResult};

/// Validates a province or city against the hierarchy and stores it.
///
/// Places skip moderation: a valid place is live as soon as it is saved.
pub fn save_place<R>(form: PlaceForm, ctx: &EditorialContext<'_>, repo: &R) -> ServiceResult<Place>
where
    R: PlaceWriter,
{
    ctx.actor()?;

    let mut place = Place::try_from(form)?;
    if let Err(e) = place.validate(ctx.geo) {
        log::warn!("Refused to save {:?} place: {e}", place.kind);
        return Err(ServiceError::Editorial(e));
    }

    if ctx.config.fill_secondary_locales {
        place.name = place.name.with_fallback_fill();
    }
    place.updated_at = Some(ctx.now());

    match repo.save_place(&place) {
        Ok(_) => Ok(place),
        Err(e) => {
            log::error!("Failed to save place: {e}");
            Err(ServiceError::Internal)
        }
    }
}
