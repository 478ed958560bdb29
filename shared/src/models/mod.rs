//! Domain models for the Market System

mod branch;
mod client;
mod coming;
mod picking_list;
mod product;
mod remainder;
mod report;
mod sale;
mod sale_product;

pub use branch::*;
pub use client::*;
pub use coming::*;
pub use picking_list::*;
pub use product::*;
pub use remainder::*;
pub use report::*;
pub use sale::*;
pub use sale_product::*;
