use soroban_sdk::{symbol_short, Address, BytesN, Env};

/// Event published when the collaborator registries are configured.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub patient_registry: Address,
    pub provider_registry: Address,
    pub timestamp: u64,
}

/// Event published when a verified provider asks a patient for access.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRequestedEvent {
    pub patient: Address,
    pub provider: Address,
    pub purpose_hash: BytesN<32>,
    pub timestamp: u64,
}

/// Event published when a patient approves a pending request.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessApprovedEvent {
    pub patient: Address,
    pub provider: Address,
    pub timestamp: u64,
}

/// Event published when a patient revokes an approved grant.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRevokedEvent {
    pub patient: Address,
    pub provider: Address,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, patient_registry: Address, provider_registry: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        patient_registry,
        provider_registry,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when access is requested.
/// This event includes the patient, provider, purpose hash, and request timestamp.
pub fn publish_access_requested(
    env: &Env,
    patient: Address,
    provider: Address,
    purpose_hash: BytesN<32>,
) {
    let topics = (symbol_short!("ACC_REQ"), patient.clone(), provider.clone());
    let data = AccessRequestedEvent {
        patient,
        provider,
        purpose_hash,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_access_approved(env: &Env, patient: Address, provider: Address) {
    let topics = (symbol_short!("ACC_APP"), patient.clone(), provider.clone());
    let data = AccessApprovedEvent {
        patient,
        provider,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when access is revoked.
/// The grant entry is overwritten, so this event is the lasting record of the revocation.
pub fn publish_access_revoked(env: &Env, patient: Address, provider: Address) {
    let topics = (symbol_short!("ACC_REV"), patient.clone(), provider.clone());
    let data = AccessRevokedEvent {
        patient,
        provider,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
