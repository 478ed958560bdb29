//! Business logic services for the Market System

pub mod branch;
pub mod client;
pub mod coming;
pub mod increment;
pub mod picking_list;
pub mod product;
pub mod remainder;
pub mod reporting;
pub mod sale;
pub mod sale_product;

pub use branch::BranchService;
pub use client::ClientService;
pub use coming::ComingService;
pub use picking_list::PickingListService;
pub use product::ProductService;
pub use remainder::RemainderService;
pub use reporting::ReportingService;
pub use sale::SaleService;
pub use sale_product::SaleProductService;
