pub mod browser;
pub mod cards;
pub mod error;
pub mod filter;
pub mod parse;
pub mod record;
mod search;
pub mod session;

pub use browser::HeadlessBrowser;
pub use error::ScrapeError;
pub use filter::apply_fee_cap;
pub use record::extract_listings;
pub use session::scrape;
