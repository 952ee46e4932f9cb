//! Halt-gate submodule
//!
//! A process-wide flag that disables all mutating operations until
//! cleared. Queries stay available while paused. Authorization is the
//! parent module's responsibility; this module only owns the flag.

use odra::prelude::*;

use crate::errors::Error;
use crate::events::{ContractPaused, ContractUnpaused};

/// Pause state composed into each contract module
#[odra::module(events = [ContractPaused, ContractUnpaused])]
pub struct Pauseable {
    paused: Var<bool>,
}

impl Pauseable {
    /// Whether the contract is currently paused
    pub fn is_paused(&self) -> bool {
        self.paused.get_or_default()
    }

    /// Revert with `ContractPaused` if the contract is halted.
    /// Called at the top of every mutating entry point.
    pub fn ensure_not_paused(&self) {
        if self.is_paused() {
            self.env().revert(Error::ContractPaused);
        }
    }

    /// Halt all mutating operations
    pub fn pause(&mut self, account: Address) {
        if self.is_paused() {
            self.env().revert(Error::ContractPaused);
        }
        self.paused.set(true);
        self.env().emit_event(ContractPaused {
            account,
            timestamp: self.env().get_block_time(),
        });
    }

    /// Lift the halt
    pub fn unpause(&mut self, account: Address) {
        if !self.is_paused() {
            self.env().revert(Error::ContractNotPaused);
        }
        self.paused.set(false);
        self.env().emit_event(ContractUnpaused {
            account,
            timestamp: self.env().get_block_time(),
        });
    }
}
