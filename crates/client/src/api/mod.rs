//! OpenProject operation catalogue
//!
//! Each operation is a thin composition over the request executor, the
//! reference-data cache, and the pagination walker: request-shape
//! construction on the way out, response-shape extraction on the way back,
//! input-shape validation as a precondition. No business logic lives here.

mod client;
mod projects;
mod reference;
mod relations;
mod time_entries;
mod users;
mod work_packages;

pub use client::OpenProjectClient;
pub use reference::{PRIORITIES_CACHE_KEY, STATUSES_CACHE_KEY, TYPES_CACHE_KEY};
pub use time_entries::ACTIVITIES_CACHE_KEY;
