//! Service layer.
//!
//! Application logic over the coupon store. Handlers call into
//! [`CouponService`]; the service never touches HTTP types.

pub mod coupon_service;

pub use coupon_service::CouponService;

use coupon_core::{CoreError, ValidationError};
use coupon_db::DbError;

/// Failures surfaced by the service layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Core(CoreError::InvalidInput(err))
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
