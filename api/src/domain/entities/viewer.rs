//! Viewer session
//!
//! The connected wallet account, passed explicitly into every service call
//! instead of living in process-wide state.

use super::Address;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub account: Address,
}

impl Viewer {
    pub fn new(account: Address) -> Self {
        Self { account }
    }

    pub fn is(&self, other: &Address) -> bool {
        self.account.eq_ignore_case(other)
    }
}
