//! Dataset Access Marketplace on Casper Network
//!
//! Two contracts form the core:
//! - `AccessTokenRegistry` — canonical record of every minted token
//!   (permanent ownership or time-boxed access), its transferability
//!   and validity.
//! - `DataMarketplace` — dataset records with tiered pricing and
//!   royalty tables; orchestrates purchases, payment splitting and
//!   access revocation through the registry.
//!
//! Built with Odra framework for Casper Network.

#![cfg_attr(target_arch = "wasm32", no_std)]
#![cfg_attr(target_arch = "wasm32", no_main)]

extern crate alloc;

pub mod access_registry;
pub mod capabilities;
pub mod errors;
pub mod events;
pub mod marketplace;
pub mod pause;
pub mod types;

pub use access_registry::AccessTokenRegistry;
pub use marketplace::DataMarketplace;
