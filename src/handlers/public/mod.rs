// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition and service discovery. These routes never sit behind the
// bearer-token middleware, whatever `security.require_auth` says.
pub mod login;
pub mod service;

pub use login::login;
pub use service::{health, root};
