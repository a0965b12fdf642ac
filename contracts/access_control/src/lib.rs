#![no_std]

pub mod events;
pub mod grant;
pub mod registry;


use common::{reject, ttl};
use soroban_sdk::{contract, contractimpl, log, symbol_short, Address, BytesN, Env, Symbol};

pub use common::ContractError;
pub use grant::{AccessGrant, GrantState};
use registry::{PatientRegistryClient, ProviderRegistryClient};

/// Storage keys for the contract
const INITIALIZED: Symbol = symbol_short!("INIT");
const PATIENTS: Symbol = symbol_short!("PATIENTS");
const PROVIDERS: Symbol = symbol_short!("PROVIDERS");

#[contract]
pub struct AccessControlContract;

#[contractimpl]
impl AccessControlContract {
    /// Wire the contract to the patient and provider registries it consults.
    pub fn initialize(
        env: Env,
        patient_registry: Address,
        provider_registry: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(reject(
                &env,
                symbol_short!("init"),
                ContractError::AlreadyInitialized,
            ));
        }

        env.storage().instance().set(&PATIENTS, &patient_registry);
        env.storage().instance().set(&PROVIDERS, &provider_registry);
        env.storage().instance().set(&INITIALIZED, &true);
        ttl::extend_instance(&env);

        events::publish_initialized(&env, patient_registry, provider_registry);

        Ok(())
    }

    /// Returns the `(patient_registry, provider_registry)` addresses.
    pub fn get_registries(env: Env) -> Result<(Address, Address), ContractError> {
        let patients: Address = env
            .storage()
            .instance()
            .get(&PATIENTS)
            .ok_or_else(|| reject(&env, symbol_short!("registry"), ContractError::NotInitialized))?;
        let providers: Address = env
            .storage()
            .instance()
            .get(&PROVIDERS)
            .ok_or_else(|| reject(&env, symbol_short!("registry"), ContractError::NotInitialized))?;
        Ok((patients, providers))
    }

    /// A verified provider asks `patient` for access, stating a purpose.
    ///
    /// Opens a new consent round from `None` or `Revoked`; a round that is
    /// still pending or approved cannot be re-requested.
    pub fn request_access(
        env: Env,
        provider: Address,
        patient: Address,
        purpose_hash: BytesN<32>,
    ) -> Result<(), ContractError> {
        provider.require_auth();

        let (patients, providers) = Self::get_registries(env.clone())?;

        // Unknown providers are reported as unverified.
        if !ProviderRegistryClient::new(&env, &providers).is_provider_verified(&provider) {
            return Err(reject(
                &env,
                symbol_short!("req_acc"),
                ContractError::NotAuthorized,
            ));
        }

        if !PatientRegistryClient::new(&env, &patients).is_patient_registered(&patient) {
            return Err(reject(
                &env,
                symbol_short!("req_acc"),
                ContractError::PatientUnknown,
            ));
        }

        let mut grant = grant::load(&env, &patient, &provider);
        grant
            .request(purpose_hash.clone(), env.ledger().timestamp())
            .map_err(|e| reject(&env, symbol_short!("req_acc"), e))?;
        grant::save(&env, &grant);
        ttl::extend_instance(&env);

        log!(&env, "access requested: {} by {}", patient, provider);
        events::publish_access_requested(&env, patient, provider, purpose_hash);

        Ok(())
    }

    /// The patient approves a pending request from `provider`.
    pub fn approve_access(
        env: Env,
        patient: Address,
        provider: Address,
    ) -> Result<(), ContractError> {
        patient.require_auth();

        let mut grant = grant::load(&env, &patient, &provider);
        grant
            .approve(env.ledger().timestamp())
            .map_err(|e| reject(&env, symbol_short!("app_acc"), e))?;
        grant::save(&env, &grant);

        log!(&env, "access approved: {} for {}", patient, provider);
        events::publish_access_approved(&env, patient, provider);

        Ok(())
    }

    /// The patient withdraws an approved grant. Records already written stay;
    /// the provider loses read and upload rights from now on.
    pub fn revoke_access(
        env: Env,
        patient: Address,
        provider: Address,
    ) -> Result<(), ContractError> {
        patient.require_auth();

        let mut grant = grant::load(&env, &patient, &provider);
        grant
            .revoke(env.ledger().timestamp())
            .map_err(|e| reject(&env, symbol_short!("rev_acc"), e))?;
        grant::save(&env, &grant);

        log!(&env, "access revoked: {} for {}", patient, provider);
        events::publish_access_revoked(&env, patient, provider);

        Ok(())
    }

    /// True iff the pair's grant is currently `Approved`.
    pub fn check_access(env: Env, patient: Address, provider: Address) -> bool {
        grant::load(&env, &patient, &provider).is_active()
    }

    pub fn get_access_state(env: Env, patient: Address, provider: Address) -> GrantState {
        grant::load(&env, &patient, &provider).state
    }

    /// Returns the pair's grant, or a `None`-state grant if never requested.
    pub fn get_grant(env: Env, patient: Address, provider: Address) -> AccessGrant {
        grant::load(&env, &patient, &provider)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }
}
