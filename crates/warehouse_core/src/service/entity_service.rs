//! Generic entity use-case service.
//!
//! # Responsibility
//! - Sequence pre-condition checks around repository mutations.
//! - Forward or widen repository error kinds for callers.
//! - Assign storage-generated ids back onto created records.
//!
//! # Invariants
//! - `create` checks the unique key first, then each foreign reference in
//!   declaration order; `insert` runs only when every check passed.
//! - A failed pre-condition leaves storage untouched.
//! - The service never inspects storage errors; classification happens in
//!   the repository.

use crate::context::OpContext;
use crate::model::entity::{display_value, foreign_references, Entity, MissingRecordPolicy, RecordId};
use crate::repo::{RepoError, Repository};
use crate::service::error::{ServiceError, ServiceResult};
use log::{info, warn};
use std::marker::PhantomData;

/// CRUD service for one entity type over any [`Repository`] implementation.
pub struct EntityService<E: Entity, R: Repository<E>> {
    repo: R,
    _entity: PhantomData<E>,
}

impl<E: Entity, R: Repository<E>> EntityService<E, R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            _entity: PhantomData,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Lists every record. Any repository failure is `Storage`.
    pub fn list(&self, ctx: &OpContext) -> ServiceResult<Vec<E>> {
        self.repo.find_all(ctx).map_err(|err| {
            log_failure(ctx, "entity_list", E::NAME, &err);
            ServiceError::Storage(err)
        })
    }

    /// Loads one record.
    ///
    /// A miss is reported as `NotFound` or `Invalid` per `E::MISSING_ON_GET`.
    pub fn get(&self, ctx: &OpContext, id: RecordId) -> ServiceResult<E> {
        match self.repo.find_by_id(ctx, id) {
            Ok(record) => Ok(record),
            Err(RepoError::NotFound { entity, id }) => match E::MISSING_ON_GET {
                MissingRecordPolicy::NotFound => Err(ServiceError::NotFound { entity, id }),
                MissingRecordPolicy::Invalid => Err(ServiceError::Invalid {
                    entity,
                    cause: RepoError::NotFound { entity, id },
                }),
            },
            Err(err) => {
                log_failure(ctx, "entity_get", E::NAME, &err);
                Err(ServiceError::Storage(err))
            }
        }
    }

    /// Creates a record and returns it with its assigned id.
    ///
    /// # Errors
    /// - `AlreadyExists` when the unique key is taken, checked first.
    /// - `ForeignKeyMissing` naming the first absent reference.
    /// - Classified insert failures are forwarded; the storage constraint
    ///   still decides when a concurrent create slips past the pre-checks.
    pub fn create(&self, ctx: &OpContext, mut record: E) -> ServiceResult<E> {
        let key = record.unique_key();
        if self.repo.exists_by_unique_key(ctx, &key) {
            info!(
                "event=entity_create module=service status=rejected entity={} request_id={} reason=already_exists",
                E::NAME,
                ctx.request_id()
            );
            return Err(ServiceError::AlreadyExists {
                entity: E::NAME,
                column: E::UNIQUE_KEY.to_string(),
                key: display_value(&key),
            });
        }

        for (foreign_key, value) in foreign_references(&record) {
            if !self.repo.exists_foreign_key(ctx, foreign_key, &value) {
                info!(
                    "event=entity_create module=service status=rejected entity={} request_id={} reason=foreign_key_missing reference={}",
                    E::NAME,
                    ctx.request_id(),
                    foreign_key.entity
                );
                return Err(ServiceError::ForeignKeyMissing {
                    entity: E::NAME,
                    reference: Some(foreign_key.entity),
                    value: Some(display_value(&value)),
                });
            }
        }

        let id = self.repo.insert(ctx, &record).map_err(|err| {
            log_failure(ctx, "entity_create", E::NAME, &err);
            ServiceError::from_repo(E::NAME, err)
        })?;
        record.set_id(id);

        info!(
            "event=entity_create module=service status=ok entity={} request_id={} id={}",
            E::NAME,
            ctx.request_id(),
            id
        );
        Ok(record)
    }

    /// Rewrites an existing record.
    ///
    /// The stored record is fetched best-effort; when it cannot be read the
    /// unique key is treated as changed.
    pub fn update(&self, ctx: &OpContext, record: E) -> ServiceResult<E> {
        let prior = match self.repo.find_by_id(ctx, record.id()) {
            Ok(prior) => Some(prior),
            Err(err) => {
                warn!(
                    "event=entity_update module=service status=prior_unavailable entity={} request_id={} id={} error_kind={}",
                    E::NAME,
                    ctx.request_id(),
                    record.id(),
                    err.kind()
                );
                None
            }
        };

        let key = record.unique_key();
        let key_changed = prior.map_or(true, |prior| prior.unique_key() != key);
        if key_changed && self.repo.exists_by_unique_key(ctx, &key) {
            info!(
                "event=entity_update module=service status=rejected entity={} request_id={} id={} reason=already_exists",
                E::NAME,
                ctx.request_id(),
                record.id()
            );
            return Err(ServiceError::AlreadyExists {
                entity: E::NAME,
                column: E::UNIQUE_KEY.to_string(),
                key: display_value(&key),
            });
        }

        self.repo.update(ctx, &record).map_err(|err| {
            log_failure(ctx, "entity_update", E::NAME, &err);
            ServiceError::from_repo(E::NAME, err)
        })?;

        info!(
            "event=entity_update module=service status=ok entity={} request_id={} id={}",
            E::NAME,
            ctx.request_id(),
            record.id()
        );
        Ok(record)
    }

    /// Hard-deletes one record. `NotFound` passes through; anything else is
    /// `Storage`.
    pub fn delete(&self, ctx: &OpContext, id: RecordId) -> ServiceResult<()> {
        match self.repo.delete(ctx, id) {
            Ok(()) => {
                info!(
                    "event=entity_delete module=service status=ok entity={} request_id={} id={}",
                    E::NAME,
                    ctx.request_id(),
                    id
                );
                Ok(())
            }
            Err(RepoError::NotFound { entity, id }) => Err(ServiceError::NotFound { entity, id }),
            Err(err) => {
                log_failure(ctx, "entity_delete", E::NAME, &err);
                Err(ServiceError::Storage(err))
            }
        }
    }
}

pub(crate) fn log_failure(ctx: &OpContext, event: &str, entity: &str, err: &RepoError) {
    let kind = err.kind();
    if kind.is_expected() {
        info!(
            "event={} module=service status=rejected entity={} request_id={} error_kind={}",
            event,
            entity,
            ctx.request_id(),
            kind
        );
    } else {
        warn!(
            "event={} module=service status=error entity={} request_id={} error_kind={} error={}",
            event,
            entity,
            ctx.request_id(),
            kind,
            err
        );
    }
}
