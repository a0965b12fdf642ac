//! Cross-contract views of the identity registries.
//!
//! Only the read-only queries access control depends on are declared here, so
//! this contract does not link the registry implementations.

use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "PatientRegistryClient")]
pub trait PatientRegistry {
    fn is_patient_registered(env: Env, patient: Address) -> bool;
}

#[contractclient(name = "ProviderRegistryClient")]
pub trait ProviderRegistry {
    fn is_provider_verified(env: Env, provider: Address) -> bool;
}
