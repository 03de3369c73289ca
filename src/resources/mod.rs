//! Service methods, one struct per API resource.

mod companies;
mod documents;
mod individuals;

pub use companies::Companies;
pub use documents::Documents;
pub use individuals::Individuals;
