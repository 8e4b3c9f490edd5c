//! Authentication middleware for workspace users

pub mod workspace_auth;

pub use workspace_auth::{WorkspaceIdentity, create_token, workspace_auth_middleware};
