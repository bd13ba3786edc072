//! Locality use-case service.

use crate::context::OpContext;
use crate::model::locality::Locality;
use crate::repo::locality_repo::LocalityRepository;
use crate::repo::RepoError;
use crate::service::entity_service::log_failure;
use crate::service::error::{ServiceError, ServiceResult};
use log::info;

pub struct LocalityService<R: LocalityRepository> {
    repo: R,
}

impl<R: LocalityRepository> LocalityService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list(&self, ctx: &OpContext) -> ServiceResult<Vec<Locality>> {
        self.repo.find_all(ctx).map_err(|err| {
            log_failure(ctx, "entity_list", "locality", &err);
            ServiceError::Storage(err)
        })
    }

    pub fn get(&self, ctx: &OpContext, id: &str) -> ServiceResult<Locality> {
        match self.repo.find_by_id(ctx, id) {
            Ok(locality) => Ok(locality),
            Err(RepoError::NotFound { entity, id }) => Err(ServiceError::NotFound { entity, id }),
            Err(err) => {
                log_failure(ctx, "entity_get", "locality", &err);
                Err(ServiceError::Storage(err))
            }
        }
    }

    /// Registers a locality under its caller-supplied id.
    ///
    /// # Errors
    /// - `AlreadyExists` when the id is taken.
    /// - `Invalid` when a field is blank.
    pub fn create(&self, ctx: &OpContext, locality: Locality) -> ServiceResult<Locality> {
        if self.repo.exists(ctx, &locality.id) {
            return Err(ServiceError::AlreadyExists {
                entity: "locality",
                column: "id".to_string(),
                key: locality.id,
            });
        }

        self.repo.insert(ctx, &locality).map_err(|err| {
            log_failure(ctx, "entity_create", "locality", &err);
            ServiceError::from_repo("locality", err)
        })?;

        info!(
            "event=entity_create module=service status=ok entity=locality request_id={}",
            ctx.request_id()
        );
        Ok(locality)
    }
}
