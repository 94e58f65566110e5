//! Guard for the authenticated area of the site.

pub(crate) mod service;


pub use service::{login_redirect_target, AuthGuard};
