//! Report use-case service.
//!
//! Each report takes an optional parent id: `None` covers every parent,
//! `Some(id)` one parent or `NotFound`.

use crate::context::OpContext;
use crate::model::entity::RecordId;
use crate::model::report::{
    BuyerPurchaseOrders, EmployeeInboundOrders, LocalityCount, SectionProducts,
};
use crate::repo::report_repo::ReportRepository;
use crate::repo::{RepoError, RepoResult};
use crate::service::entity_service::log_failure;
use crate::service::error::{ServiceError, ServiceResult};

pub struct ReportService<R: ReportRepository> {
    repo: R,
}

impl<R: ReportRepository> ReportService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn report_carriers(
        &self,
        ctx: &OpContext,
        locality_id: Option<&str>,
    ) -> ServiceResult<Vec<LocalityCount>> {
        forward(ctx, "report_carriers", self.repo.carriers_per_locality(ctx, locality_id))
    }

    pub fn report_sellers(
        &self,
        ctx: &OpContext,
        locality_id: Option<&str>,
    ) -> ServiceResult<Vec<LocalityCount>> {
        forward(ctx, "report_sellers", self.repo.sellers_per_locality(ctx, locality_id))
    }

    pub fn report_inbound_orders(
        &self,
        ctx: &OpContext,
        employee_id: Option<RecordId>,
    ) -> ServiceResult<Vec<EmployeeInboundOrders>> {
        forward(
            ctx,
            "report_inbound_orders",
            self.repo.inbound_orders_per_employee(ctx, employee_id),
        )
    }

    pub fn report_products(
        &self,
        ctx: &OpContext,
        section_id: Option<RecordId>,
    ) -> ServiceResult<Vec<SectionProducts>> {
        forward(
            ctx,
            "report_products",
            self.repo.products_per_section(ctx, section_id),
        )
    }

    pub fn report_purchase_orders(
        &self,
        ctx: &OpContext,
        buyer_id: Option<RecordId>,
    ) -> ServiceResult<Vec<BuyerPurchaseOrders>> {
        forward(
            ctx,
            "report_purchase_orders",
            self.repo.purchase_orders_per_buyer(ctx, buyer_id),
        )
    }
}

fn forward<T>(ctx: &OpContext, report: &str, result: RepoResult<T>) -> ServiceResult<T> {
    result.map_err(|err| match err {
        RepoError::NotFound { entity, id } => ServiceError::NotFound { entity, id },
        err => {
            log_failure(ctx, report, "report", &err);
            ServiceError::Storage(err)
        }
    })
}
