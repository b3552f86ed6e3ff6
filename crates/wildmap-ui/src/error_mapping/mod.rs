//! Maps UI service errors to wildmap_core::AppError for consistent user-facing messages.
//! Each service has its own module to keep mappings small and readable.

mod entry;
mod forecast;
mod place;
