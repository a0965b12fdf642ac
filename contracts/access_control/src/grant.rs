//! Per-(patient, provider) consent grant and its state machine.
//!
//! ```text
//! None ──request──▶ Requested ──approve──▶ Approved ──revoke──▶ Revoked
//!   ▲                                                              │
//!   └──────────────── request (new consent round) ◀────────────────┘
//! ```
//!
//! Only `Approved` authorizes a provider. A missing entry reads as `None`.

use common::{ttl, ContractError};
use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, Symbol};

const GRANT: Symbol = symbol_short!("GRANT");

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GrantState {
    None,
    Requested,
    Approved,
    Revoked,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessGrant {
    pub patient: Address,
    pub provider: Address,
    pub state: GrantState,
    /// Commitment to the stated purpose of the current consent round.
    pub purpose_hash: BytesN<32>,
    pub requested_at: u64,
    /// Zero unless the current round has been approved.
    pub approved_at: u64,
    /// Zero unless the current round has been revoked.
    pub revoked_at: u64,
}

impl AccessGrant {
    /// The implicit grant of a pair that has never been requested.
    pub fn none(env: &Env, patient: &Address, provider: &Address) -> Self {
        AccessGrant {
            patient: patient.clone(),
            provider: provider.clone(),
            state: GrantState::None,
            purpose_hash: BytesN::from_array(env, &[0u8; 32]),
            requested_at: 0,
            approved_at: 0,
            revoked_at: 0,
        }
    }

    /// Opens a new consent round. Allowed from `None` and `Revoked`.
    pub fn request(&mut self, purpose_hash: BytesN<32>, now: u64) -> Result<(), ContractError> {
        match self.state {
            GrantState::None | GrantState::Revoked => {
                self.state = GrantState::Requested;
                self.purpose_hash = purpose_hash;
                self.requested_at = now;
                self.approved_at = 0;
                self.revoked_at = 0;
                Ok(())
            }
            GrantState::Requested | GrantState::Approved => Err(ContractError::InvalidState),
        }
    }

    pub fn approve(&mut self, now: u64) -> Result<(), ContractError> {
        if self.state != GrantState::Requested {
            return Err(ContractError::InvalidState);
        }
        self.state = GrantState::Approved;
        self.approved_at = now;
        Ok(())
    }

    /// Revokes an approved grant. A pending request cannot be revoked.
    pub fn revoke(&mut self, now: u64) -> Result<(), ContractError> {
        if self.state != GrantState::Approved {
            return Err(ContractError::InvalidState);
        }
        self.state = GrantState::Revoked;
        self.revoked_at = now;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.state == GrantState::Approved
    }
}

fn grant_key(patient: &Address, provider: &Address) -> (Symbol, Address, Address) {
    (GRANT, patient.clone(), provider.clone())
}

/// Loads the stored grant for the pair, or the implicit `None` grant.
pub fn load(env: &Env, patient: &Address, provider: &Address) -> AccessGrant {
    let key = grant_key(patient, provider);
    match env.storage().persistent().get::<_, AccessGrant>(&key) {
        Some(grant) => {
            ttl::extend_persistent(env, &key);
            grant
        }
        None => AccessGrant::none(env, patient, provider),
    }
}

pub fn save(env: &Env, grant: &AccessGrant) {
    let key = grant_key(&grant.patient, &grant.provider);
    env.storage().persistent().set(&key, grant);
    ttl::extend_persistent(env, &key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;

    fn fresh(env: &Env) -> AccessGrant {
        AccessGrant::none(env, &Address::generate(env), &Address::generate(env))
    }

    fn purpose(env: &Env, tag: u8) -> BytesN<32> {
        BytesN::from_array(env, &[tag; 32])
    }

    #[test]
    fn full_round_trip() {
        let env = Env::default();
        let mut grant = fresh(&env);
        assert!(!grant.is_active());

        grant.request(purpose(&env, 1), 10).unwrap();
        assert_eq!(grant.state, GrantState::Requested);
        assert!(!grant.is_active());

        grant.approve(20).unwrap();
        assert!(grant.is_active());
        assert_eq!(grant.approved_at, 20);

        grant.revoke(30).unwrap();
        assert_eq!(grant.state, GrantState::Revoked);
        assert!(!grant.is_active());

        // A new round resets the timestamps of the previous one.
        grant.request(purpose(&env, 2), 40).unwrap();
        assert_eq!(grant.state, GrantState::Requested);
        assert_eq!(grant.purpose_hash, purpose(&env, 2));
        assert_eq!(grant.requested_at, 40);
        assert_eq!(grant.approved_at, 0);
        assert_eq!(grant.revoked_at, 0);
    }

    #[test]
    fn rejected_transitions_leave_grant_unchanged() {
        let env = Env::default();
        let mut grant = fresh(&env);

        let before = grant.clone();
        assert_eq!(grant.approve(1), Err(ContractError::InvalidState));
        assert_eq!(grant.revoke(1), Err(ContractError::InvalidState));
        assert_eq!(grant, before);

        grant.request(purpose(&env, 1), 1).unwrap();
        let before = grant.clone();
        assert_eq!(grant.request(purpose(&env, 9), 2), Err(ContractError::InvalidState));
        assert_eq!(grant.revoke(2), Err(ContractError::InvalidState));
        assert_eq!(grant, before);

        grant.approve(3).unwrap();
        let before = grant.clone();
        assert_eq!(grant.request(purpose(&env, 9), 4), Err(ContractError::InvalidState));
        assert_eq!(grant.approve(4), Err(ContractError::InvalidState));
        assert_eq!(grant, before);

        grant.revoke(5).unwrap();
        let before = grant.clone();
        assert_eq!(grant.approve(6), Err(ContractError::InvalidState));
        assert_eq!(grant.revoke(6), Err(ContractError::InvalidState));
        assert_eq!(grant, before);
    }
}
