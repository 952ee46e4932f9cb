//! Capability-based authorization submodule
//!
//! Three named capabilities gate the privileged operations: Mint, Burn
//! and Admin. Grants are managed by a single super admin fixed at
//! initialization. The super admin does not implicitly hold Mint or
//! Burn; operators (including contract addresses) are granted
//! capabilities explicitly.

use odra::prelude::*;

use crate::errors::Error;
use crate::events::{CapabilityGranted, CapabilityRevoked};

/// Capability identifiers, passed as u8 across entry-point boundaries
pub mod capability {
    /// Permission to mint tokens
    pub const MINT: u8 = 0;
    /// Permission to burn tokens unconditionally
    pub const BURN: u8 = 1;
    /// Permission for administrative operations (pause, transferability,
    /// fee and wallet updates, dataset activation, sweeps)
    pub const ADMIN: u8 = 2;
}

/// Returns true if the identifier names a known capability
pub fn is_known_capability(cap: u8) -> bool {
    cap <= capability::ADMIN
}

/// Authorization state shared by the registry and marketplace contracts
#[odra::module(events = [CapabilityGranted, CapabilityRevoked])]
pub struct Capabilities {
    /// Sole account allowed to grant and revoke capabilities
    super_admin: Var<Address>,
    /// (capability, account) -> granted
    grants: Mapping<(u8, Address), bool>,
}

impl Capabilities {
    /// Set the super admin and grant it the Admin capability.
    /// Called once from the parent module's init.
    pub fn bootstrap(&mut self, admin: Address) {
        self.super_admin.set(admin);
        self.grants.set(&(capability::ADMIN, admin), true);
    }

    /// The configured super admin
    pub fn super_admin(&self) -> Option<Address> {
        self.super_admin.get()
    }

    /// Check whether an account holds a capability
    pub fn has(&self, cap: u8, account: &Address) -> bool {
        self.grants.get_or_default(&(cap, *account))
    }

    /// Revert unless the account holds the capability
    pub fn ensure(&self, cap: u8, account: &Address) {
        if !self.has(cap, account) {
            let error = match cap {
                capability::MINT => Error::MissingMintCapability,
                capability::BURN => Error::MissingBurnCapability,
                capability::ADMIN => Error::MissingAdminCapability,
                _ => Error::UnknownCapability,
            };
            self.env().revert(error);
        }
    }

    /// Revert unless the account is the super admin
    pub fn ensure_super_admin(&self, account: &Address) {
        let super_admin = self.super_admin.get()
            .unwrap_or_else(|| self.env().revert(Error::Unauthorized));
        if super_admin != *account {
            self.env().revert(Error::Unauthorized);
        }
    }

    /// Grant a capability; caller must be the super admin
    pub fn grant(&mut self, cap: u8, account: Address, caller: &Address) {
        self.ensure_super_admin(caller);
        if !is_known_capability(cap) {
            self.env().revert(Error::UnknownCapability);
        }
        self.grants.set(&(cap, account), true);
        self.env().emit_event(CapabilityGranted {
            capability: cap,
            account,
            timestamp: self.env().get_block_time(),
        });
    }

    /// Revoke a capability; caller must be the super admin
    pub fn revoke(&mut self, cap: u8, account: Address, caller: &Address) {
        self.ensure_super_admin(caller);
        if !is_known_capability(cap) {
            self.env().revert(Error::UnknownCapability);
        }
        self.grants.set(&(cap, account), false);
        self.env().emit_event(CapabilityRevoked {
            capability: cap,
            account,
            timestamp: self.env().get_block_time(),
        });
    }
}
