//! Page flow objects.
//!
//! Each page type declares its locator set and composes accessor calls into
//! named business flows. Polymorphism across page types is a shared
//! capability trait rather than inheritance.

use crate::result::VitrinaResult;
use async_trait::async_trait;

/// Capability shared by all page flow objects.
#[async_trait]
pub trait PageFlow {
    /// Navigate to the page.
    async fn open(&self) -> VitrinaResult<()>;

    /// Whether the page's landmark element is rendered.
    async fn is_ready(&self) -> VitrinaResult<bool>;

    /// Page name for logging/debugging.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

mod storefront;

pub use storefront::{looks_like_phone, Category, KeywordScan, Storefront, PHONE_KEYWORDS};
