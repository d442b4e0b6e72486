//! # Quorate Governance
//!
//! Threshold governance facet: a dynamic member set, a `percentage / precision`
//! quorum threshold, and validation of signature sets against both.
//!
//! ## Components
//!
//! - **Store**: namespaced state shared by independent facets
//! - **Membership**: unique member set that can never become empty
//! - **Threshold**: quorum arithmetic over the live member count
//! - **Validator**: signer recovery, membership and duplicate checks
//! - **Ownership**: administrator gate for mutations
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                       StateStore                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌───────────────┐  │
//! │  │  governance  │  │  ownership   │  │    events     │  │
//! │  └──────▲───────┘  └──────▲───────┘  └───────▲───────┘  │
//! └─────────┼─────────────────┼──────────────────┼──────────┘
//!           │                 │                  │
//!  ┌────────┴────────┐ ┌──────┴─────────┐        │
//!  │ GovernanceFacet │ │ OwnershipFacet │────────┤
//!  │   (Validator)   │ └────────────────┘        │
//!  └────────┬────────┘                           │
//!           └────────────────────────────────────┘
//! ```

pub mod config;
pub mod events;
pub mod facet;
pub mod membership;
pub mod ownership;
pub mod shared;
pub mod state;
pub mod store;
pub mod threshold;
pub mod validator;

pub use config::GovernanceConfig;
pub use events::{EventLog, GovernanceEvent};
pub use facet::GovernanceFacet;
pub use ownership::OwnershipFacet;
pub use shared::SharedGovernance;
pub use state::{GovernanceState, MemberSet};
pub use store::{NamespaceKey, SiblingStore, StateStore};
pub use threshold::{quorum_floor, required_signers};
pub use validator::QuorumValidator;
