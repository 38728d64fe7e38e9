//! Signing configuration resolution
//!
//! # Precedence
//!
//! Each of the four signing values is taken from the first non-blank of:
//!
//! 1. **Environment** - `KEYSTORE_PATH`, `KEYSTORE_PASSWORD`, `KEY_ALIAS`, `KEY_PASSWORD`
//! 2. **Properties** - `storeFile`, `storePassword`, `keyAlias`, `keyPassword`
//!    from `android/key.properties`
//!
//! # Fallback
//!
//! A release build is signed with the resolved descriptor only when its
//! keystore exists. Otherwise the plan is debug signing, with the reason
//! logged as a warning; resolution itself never aborts the build.
//!
//! # Example
//!
//! ```ignore
//! use relsign_core::signing::{BuildType, SigningContext};
//! use relsign_fs::NormalizedPath;
//!
//! let context = SigningContext::new(NormalizedPath::new("/path/to/project"));
//! let descriptor = context.resolve()?;
//! match descriptor.plan(BuildType::Release) {
//!     SigningPlan::Release(d) => sign_with(d),
//!     SigningPlan::Debug { reason } => eprintln!("debug signing: {reason}"),
//! }
//! ```

mod context;
mod descriptor;
mod plan;
mod resolver;

pub use context::{DEFAULT_MODULE_DIR, DEFAULT_PROPERTIES_PATH, SigningContext};
pub use descriptor::{SigningDescriptor, SigningSummary};
pub use plan::{BuildType, DebugReason, SigningPlan};
pub use resolver::SigningConfigResolver;
