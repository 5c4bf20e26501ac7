//! Admin dashboard snapshot.

use crate::model::inquiry::Inquiry;
use crate::model::product::{Product, ProductView};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::inquiry_repo::InquiryRepository;
use crate::repo::product_repo::ProductRepository;
use crate::service::catalog_service::{CatalogService, CatalogServiceError};
use crate::service::inquiry_service::{InquiryService, InquiryServiceError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Inquiries listed under "recent inquiries".
pub const RECENT_INQUIRIES_LIMIT: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub total_products: i64,
    pub total_categories: i64,
    pub total_inquiries: i64,
    pub new_inquiries: i64,
    pub total_views: i64,
    pub top_products: Vec<Product>,
    pub recent_views: Vec<ProductView>,
    pub recent_inquiries: Vec<Inquiry>,
}

#[derive(Debug)]
pub enum DashboardError {
    Catalog(CatalogServiceError),
    Inquiry(InquiryServiceError),
}

impl Display for DashboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Catalog(err) => write!(f, "{err}"),
            Self::Inquiry(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DashboardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Catalog(err) => Some(err),
            Self::Inquiry(err) => Some(err),
        }
    }
}

impl From<CatalogServiceError> for DashboardError {
    fn from(value: CatalogServiceError) -> Self {
        Self::Catalog(value)
    }
}

impl From<InquiryServiceError> for DashboardError {
    fn from(value: InquiryServiceError) -> Self {
        Self::Inquiry(value)
    }
}

/// Collects the dashboard counters and lists in one pass.
pub fn build_dashboard<P, C, I>(
    catalog: &CatalogService<P, C>,
    inquiries: &InquiryService<I>,
) -> Result<Dashboard, DashboardError>
where
    P: ProductRepository,
    C: CategoryRepository,
    I: InquiryRepository,
{
    let stats = catalog.product_stats()?;
    let categories = catalog.categories()?;
    let summary = inquiries.summary()?;

    Ok(Dashboard {
        total_products: stats.total_products,
        total_categories: i64::try_from(categories.len()).unwrap_or(i64::MAX),
        total_inquiries: summary.total,
        new_inquiries: summary.new,
        total_views: stats.total_views,
        top_products: stats.top_products,
        recent_views: stats.recent_views,
        recent_inquiries: inquiries.recent(RECENT_INQUIRIES_LIMIT)?,
    })
}
