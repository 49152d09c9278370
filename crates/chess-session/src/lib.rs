//! Single-writer game sessions.
//!
//! This crate wraps a [`chess_rules::Board`] for use by a front end and a
//! remote peer at once:
//! - [`Session`] - the authoritative board behind one lock
//! - [`SessionConfig`] - TOML configuration of the starting layout
//! - [`replay`] - application of serialized move records
//!
//! # Example
//!
//! ```
//! use chess_session::{Session, SessionConfig};
//!
//! let session = Session::new(SessionConfig::default()).unwrap();
//! session.apply_json(r#"{"from":"e2","to":"e4"}"#).unwrap();
//! assert_eq!(session.last_record().unwrap().to_compact(), "e2e4");
//! ```

mod config;
mod session;

pub use config::{ConfigError, SessionConfig};
pub use session::{replay, ReplayError, Session};
