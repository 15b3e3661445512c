//! timemachine-git - repository gateway for the timemachine TUI
//!
//! Translates the controller's commands into git2 calls against the
//! repository at one working directory.
//!
//! # Features
//!
//! - Status snapshot with staged/modified/untracked lists and ahead/behind
//! - Checkpoints (stage everything, commit under a fixed identity)
//! - History and hard-reset rollback
//! - Sync: pull, automatic conflict resolution, push with forced fallback
//!
//! # Example
//!
//! ```no_run
//! use timemachine_git::{Gateway, GatewayConfig, GitGateway};
//!
//! let gateway = GitGateway::new(".", GatewayConfig::default());
//! let report = gateway.load_status()?;
//! # Ok::<(), timemachine_git::GitError>(())
//! ```

pub mod error;
pub mod gateway;
pub mod remote;
pub mod repo;
pub mod sync;

pub use error::{GitError, GitResult};
pub use gateway::{Gateway, GatewayConfig, GitGateway};
pub use remote::{PullResult, PushResult};
pub use repo::{CheckpointRepo, FileLists, Identity};
pub use sync::{run_sync, SyncBackend};
