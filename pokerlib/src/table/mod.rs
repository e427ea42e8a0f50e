//! The table layer: configuration, the command protocol and the controller
//! that owns the seats and the active round.
//!
//! ## Example
//!
//! ```
//! use pokerlib::table::{Table, TableConfig, UserCommand};
//!
//! let mut table = Table::new(TableConfig {
//!     num_seats: 3,
//!     buy_in: 150,
//!     seed: Some(42),
//!     ..Default::default()
//! })
//! .unwrap();
//! for (id, name) in [(1, "alice"), (2, "bob"), (3, "carol")] {
//!     table
//!         .apply(id, UserCommand::Sit { name: name.to_string(), seat: None })
//!         .unwrap();
//! }
//! let notifications = table.apply(1, UserCommand::StartRound).unwrap();
//! assert!(!notifications.is_empty());
//! ```

pub mod config;
pub mod controller;
pub mod errors;
pub mod messages;

pub use config::{RebuyPolicy, TableConfig};
pub use controller::Table;
pub use errors::{ConfigError, TableError};
pub use messages::{ClientMessage, Notification, PrivateEvent, TableEvent, UserCommand};
