// ==========================================================================
// MÓDULO: reputation-registry/src/reputation_registry.rs
// Descrição: Registro de reputação dos inquilinos. Mantém score e faixa por
//            endereço, atualizados apenas pelo contrato de pagamento, e
//            responde consultas de elegibilidade a crédito
// ==========================================================================

#![no_std]

multiversx_sc::imports!();

use noma_common::errors::*;
use noma_common::{
    check_eligibility, LendingRequirements, PaymentTiming, Reputation, ReputationTier, TierThresholds,
    DEFAULT_TIER_THRESHOLDS, MAX_SCORE,
};

#[multiversx_sc::contract]
pub trait ReputationRegistry {
    // Inicializa os limites de faixa e os requisitos de crédito padrão
    #[init]
    fn init(&self) {
        self.tier_thresholds().set_if_empty(DEFAULT_TIER_THRESHOLDS);
        self.lending_requirements().set_if_empty(LendingRequirements::default());
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ======== CONFIGURAÇÃO ========

    // Define o único endereço autorizado a registrar pagamentos
    #[only_owner]
    #[endpoint(setPaymentContract)]
    fn set_payment_contract(&self, payment_contract: ManagedAddress) {
        require!(!payment_contract.is_zero(), ERR_INVALID_ADDRESS);
        self.payment_contract().set(payment_contract);
    }

    #[only_owner]
    #[endpoint(setTierThresholds)]
    fn set_tier_thresholds(&self, basic: u64, trusted: u64, premium: u64) {
        let thresholds = TierThresholds { basic, trusted, premium };
        require!(thresholds.is_valid(), ERR_INVALID_THRESHOLDS);

        self.tier_thresholds().set(thresholds);
        self.tier_thresholds_updated_event(basic, trusted, premium);
    }

    #[only_owner]
    #[endpoint(setLendingRequirements)]
    fn set_lending_requirements(&self, min_score: u64, min_tier: ReputationTier) {
        require!(min_score <= MAX_SCORE, ERR_INVALID_SCORE);
        self.lending_requirements().set(LendingRequirements { min_score, min_tier });
    }

    // ======== ATUALIZAÇÃO (somente contrato de pagamento) ========

    /// Registra um pagamento classificado e recalcula score e faixa.
    /// O registro do inquilino é criado no primeiro pagamento.
    #[endpoint(recordPayment)]
    fn record_payment(&self, tenant: ManagedAddress, timing: PaymentTiming, yield_earned: BigUint) {
        self.require_payment_contract();

        let thresholds = self.tier_thresholds().get();
        let mut reputation = self.load_or_create(&tenant);
        reputation.record_payment(timing, &yield_earned, &thresholds);

        self.store_and_notify(&tenant, reputation);
    }

    #[endpoint(recordMissedPayment)]
    fn record_missed_payment(&self, tenant: ManagedAddress) {
        self.require_payment_contract();

        let thresholds = self.tier_thresholds().get();
        let mut reputation = self.load_or_create(&tenant);
        reputation.record_missed(&thresholds);

        self.store_and_notify(&tenant, reputation);
    }

    // ======== CONSULTAS ========

    /// Reputação atual. Para quem ainda não pagou, devolve o registro
    /// inicial (score base, faixa New) sem gravá-lo.
    #[view(getReputation)]
    fn get_reputation(&self, tenant: ManagedAddress) -> Reputation<Self::Api> {
        let thresholds = self.tier_thresholds().get();
        let mut reputation = if self.reputations(&tenant).is_empty() {
            Reputation::new(tenant)
        } else {
            self.reputations(&tenant).get()
        };
        reputation.refresh_tier(&thresholds);

        reputation
    }

    #[view(hasReputation)]
    fn has_reputation(&self, tenant: ManagedAddress) -> bool {
        !self.reputations(&tenant).is_empty()
    }

    #[view(getScore)]
    fn get_score(&self, tenant: ManagedAddress) -> u64 {
        self.get_reputation(tenant).score
    }

    #[view(getTier)]
    fn get_tier(&self, tenant: ManagedAddress) -> ReputationTier {
        self.get_reputation(tenant).tier
    }

    /// (elegível, motivo legível)
    #[view(checkLendingEligibility)]
    fn check_lending_eligibility(&self, tenant: ManagedAddress) -> MultiValue2<bool, ManagedBuffer> {
        let reputation = self.get_reputation(tenant);
        let requirements = self.lending_requirements().get();

        let (eligible, reason) = check_eligibility(reputation.tier, reputation.score, &requirements);

        (eligible, ManagedBuffer::new_from_bytes(reason)).into()
    }

    #[view(getTierThresholds)]
    fn get_tier_thresholds(&self) -> TierThresholds {
        self.tier_thresholds().get()
    }

    #[view(getLendingRequirements)]
    fn get_lending_requirements(&self) -> LendingRequirements {
        self.lending_requirements().get()
    }

    #[view(getPaymentContract)]
    fn get_payment_contract(&self) -> ManagedAddress {
        self.payment_contract().get()
    }

    #[view(getTenantCount)]
    fn get_tenant_count(&self) -> u64 {
        self.tenant_count().get()
    }

    // ======== FUNÇÕES INTERNAS ========

    fn require_payment_contract(&self) {
        require!(!self.payment_contract().is_empty(), ERR_CONTRACTS_NOT_CONFIGURED);
        require!(
            self.blockchain().get_caller() == self.payment_contract().get(),
            ERR_ONLY_PAYMENT_CONTRACT
        );
    }

    fn load_or_create(&self, tenant: &ManagedAddress) -> Reputation<Self::Api> {
        if self.reputations(tenant).is_empty() {
            self.tenant_count().update(|count| *count += 1);
            return Reputation::new(tenant.clone());
        }

        self.reputations(tenant).get()
    }

    fn store_and_notify(&self, tenant: &ManagedAddress, reputation: Reputation<Self::Api>) {
        let new_score = reputation.score;
        let new_tier = reputation.tier;
        self.reputations(tenant).set(reputation);

        self.reputation_updated_event(tenant, new_score, new_tier);
    }

    // ======== EVENTOS ========

    #[event("reputation_updated")]
    fn reputation_updated_event(
        &self,
        #[indexed] tenant: &ManagedAddress,
        #[indexed] new_score: u64,
        #[indexed] new_tier: ReputationTier,
    );

    #[event("tier_thresholds_updated")]
    fn tier_thresholds_updated_event(
        &self,
        #[indexed] basic: u64,
        #[indexed] trusted: u64,
        #[indexed] premium: u64,
    );

    // ======== STORAGE ========

    #[storage_mapper("payment_contract")]
    fn payment_contract(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("tier_thresholds")]
    fn tier_thresholds(&self) -> SingleValueMapper<TierThresholds>;

    #[storage_mapper("lending_requirements")]
    fn lending_requirements(&self) -> SingleValueMapper<LendingRequirements>;

    #[storage_mapper("reputations")]
    fn reputations(&self, tenant: &ManagedAddress) -> SingleValueMapper<Reputation<Self::Api>>;

    #[storage_mapper("tenant_count")]
    fn tenant_count(&self) -> SingleValueMapper<u64>;
}
