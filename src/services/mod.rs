//! Editorial operations wired to storage and the injected capabilities.
//!
//! Service functions are generic over the repository traits and receive the
//! remaining collaborators through an [`EditorialContext`].

use chrono::{NaiveDateTime, Utc};
use thiserror::Error;

use crate::config::EditorialConfig;
use crate::domain::errors::EditorialError;
use crate::domain::geo::GeoLookup;
use crate::domain::types::ActorId;

pub mod places;
pub mod records;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    /// No actor could be resolved for the operation.
    #[error("unauthorized")]
    Unauthorized,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// The editorial core refused the operation.
    #[error(transparent)]
    Editorial(EditorialError),
    #[error("type constraint violated: {0}")]
    TypeConstraint(String),
    #[error("invalid form: {0}")]
    Form(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Source of audit timestamps.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// Resolves who is performing the current operation.
pub trait ActorProvider {
    fn current_actor(&self) -> Option<ActorId>;
}

/// Collaborators shared by every editorial service call.
#[derive(Clone, Copy)]
pub struct EditorialContext<'a> {
    pub clock: &'a dyn Clock,
    pub actors: &'a dyn ActorProvider,
    pub geo: &'a dyn GeoLookup,
    pub config: &'a EditorialConfig,
}

impl<'a> EditorialContext<'a> {
    pub fn new(
        clock: &'a dyn Clock,
        actors: &'a dyn ActorProvider,
        geo: &'a dyn GeoLookup,
        config: &'a EditorialConfig,
    ) -> Self {
        Self {
            clock,
            actors,
            geo,
            config,
        }
    }

    /// The acting user, or [`ServiceError::Unauthorized`] when there is none.
    pub fn actor(&self) -> ServiceResult<ActorId> {
        self.actors.current_actor().ok_or_else(|| {
            log::warn!("Editorial operation attempted without an actor");
            ServiceError::Unauthorized
        })
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, NaiveDateTime};

    use super::{ActorProvider, Clock};
    use crate::domain::types::ActorId;

    pub struct FixedClock(pub NaiveDateTime);

    impl FixedClock {
        pub fn at(secs: i64) -> Self {
            Self(DateTime::from_timestamp(secs, 0).unwrap().naive_utc())
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    pub struct StaticActor(pub Option<&'static str>);

    impl ActorProvider for StaticActor {
        fn current_actor(&self) -> Option<ActorId> {
            self.0.and_then(|id| ActorId::new(id).ok())
        }
    }
}
