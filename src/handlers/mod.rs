// handlers/mod.rs - Handler tiers
//
// Public (no auth): login, service root, health
// Protected: student CRUD, behind the bearer-token middleware when `security.require_auth` is on
pub mod public;
pub mod protected;
