//! Platform-admin access decisions for opsdeck.
//!
//! This crate provides:
//! - The per-request caller identity (`Identity`)
//! - The derived access decision and role (`AccessDecision`, `Role`)
//! - The configuration-sourced admin allow-list (`AdminAllowList`)
//! - The startup-resolved admin policy (`AdminPolicy`)
//! - The classifier that turns identities into decisions (`AdminClassifier`)
//! - The seam over the persisted membership table (`MembershipStore`)
//!
//! # Access Control Model
//!
//! A caller is a platform admin iff their e-mail address is on the
//! configured allow-list, or a membership row exists for their user id.
//! The allow-list check always runs first and short-circuits the
//! membership lookup: it needs no backend call, and it keeps admin
//! access working while the persisted store is being bootstrapped or is
//! unreachable. A membership lookup failure is surfaced as an error,
//! never as a decision.
//!
//! # Example
//!
//! ```
//! use opsdeck_access::{AdminAllowList, AdminClassifier, AdminPolicy};
//!
//! let allow_list = AdminAllowList::parse("root@example.com, OPS@example.com");
//! assert!(allow_list.contains("ops@example.com"));
//!
//! let classifier = AdminClassifier::new(AdminPolicy::AllowListOnly { allow_list });
//! assert_eq!(classifier.policy().describe(), "allow-list");
//! ```

pub mod allow_list;
pub mod classifier;
pub mod decision;
pub mod error;
pub mod identity;
pub mod membership;
pub mod policy;
pub mod role;

// Re-export main types at crate root
pub use allow_list::AdminAllowList;
pub use classifier::AdminClassifier;
pub use decision::AccessDecision;
pub use error::AccessError;
pub use identity::Identity;
pub use membership::{MembershipError, MembershipStore};
pub use policy::AdminPolicy;
pub use role::Role;
