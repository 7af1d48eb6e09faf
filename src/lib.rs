//! In-memory faculty records: an owning record store, an AVL tree sorted
//! by id and a `BinaryHeap` ranking by experience, driven by a text menu.

pub mod avl;
pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod ranking;
pub mod record;
pub mod registry;
pub mod store;

pub use avl::AvlTree;
pub use config::{load_seed, AppConfig};
pub use console::{Console, Style};
pub use error::{ConfigError, InputError, InvariantViolation};
pub use ranking::{RankKey, RankingQueue};
pub use record::{Faculty, FacultyId};
pub use registry::{AddOutcome, Registry, SeedSummary};
pub use store::RecordStore;
