// ==========================================================================
// MÓDULO: lease-nft/src/lease_nft.rs
// Descrição: Registro de contratos de aluguel. Cada contrato recebe um id de
//            token, guarda os termos acordados e as estatísticas acumuladas
//            de pagamento, e controla o ciclo de vida Active -> Completed /
//            Terminated
// ==========================================================================

#![no_std]

multiversx_sc::imports!();

use noma_common::errors::*;
use noma_common::{Lease, LeaseStatus, LEASE_TERM_DAYS, MAX_DUE_DAY, MIN_DUE_DAY, SECONDS_PER_DAY};

pub const LEASE_CREATED_ACTION: &[u8] = b"lease_created";

#[multiversx_sc::contract]
pub trait LeaseNft {
    #[init]
    fn init(&self) {
        self.lease_counter().set_if_empty(0u64);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // Define o contrato de pagamento, único autorizado a alterar contadores
    #[only_owner]
    #[endpoint(setPaymentContract)]
    fn set_payment_contract(&self, payment_contract: ManagedAddress) {
        require!(!payment_contract.is_zero(), ERR_INVALID_ADDRESS);
        self.payment_contract().set(payment_contract);
    }

    // ============================
    // Criação de contratos
    // ============================

    /// Inquilino registra o contrato com o locador
    #[endpoint(createLeaseAsTenant)]
    fn create_lease_as_tenant(&self, landlord: ManagedAddress, monthly_rent: BigUint, due_day: u8) -> u64 {
        let tenant = self.blockchain().get_caller();
        self.create_lease(tenant, landlord, monthly_rent, due_day)
    }

    /// Locador registra o contrato com o inquilino
    #[endpoint(createLeaseAsLandlord)]
    fn create_lease_as_landlord(&self, tenant: ManagedAddress, monthly_rent: BigUint, due_day: u8) -> u64 {
        let landlord = self.blockchain().get_caller();
        self.create_lease(tenant, landlord, monthly_rent, due_day)
    }

    // ============================
    // Atualizações do contrato de pagamento
    // ============================

    #[endpoint(recordPayment)]
    fn record_payment(&self, lease_id: u64, amount: BigUint) {
        self.require_payment_contract();
        let mut lease = self.require_open_period(lease_id);

        lease.total_paid += &amount;
        lease.payment_count += 1;
        self.leases(lease_id).set(lease);
    }

    // Avança o cronograma sobre um período não pago
    #[endpoint(recordMissedPeriod)]
    fn record_missed_period(&self, lease_id: u64) {
        self.require_payment_contract();
        let mut lease = self.require_open_period(lease_id);

        lease.missed_count += 1;
        self.leases(lease_id).set(lease);
    }

    // ============================
    // Ciclo de vida
    // ============================

    /// Encerramento normal, pelo locador, depois do fim do prazo
    #[endpoint(completeLease)]
    fn complete_lease(&self, lease_id: u64) {
        let mut lease = self.require_active_lease(lease_id);
        require!(self.blockchain().get_caller() == lease.landlord, ERR_NOT_LANDLORD);
        require!(
            self.blockchain().get_block_timestamp() >= lease.end_date,
            ERR_LEASE_NOT_ENDED
        );

        lease.status = LeaseStatus::Completed;
        self.leases(lease_id).set(lease);
        self.lease_status_changed_event(lease_id, LeaseStatus::Completed);
    }

    /// Rescisão antecipada por qualquer uma das partes
    #[endpoint(terminateLease)]
    fn terminate_lease(&self, lease_id: u64) {
        let mut lease = self.require_active_lease(lease_id);
        let caller = self.blockchain().get_caller();
        require!(
            caller == lease.tenant || caller == lease.landlord,
            ERR_NOT_LEASE_PARTY
        );

        lease.status = LeaseStatus::Terminated;
        self.leases(lease_id).set(lease);
        self.lease_status_changed_event(lease_id, LeaseStatus::Terminated);
    }

    // ============================
    // Consultas
    // ============================

    #[view(getLease)]
    fn get_lease(&self, lease_id: u64) -> Lease<Self::Api> {
        require!(!self.leases(lease_id).is_empty(), ERR_LEASE_NOT_FOUND);
        self.leases(lease_id).get()
    }

    #[view(getTenantLeases)]
    fn get_tenant_leases(&self, tenant: ManagedAddress) -> MultiValueEncoded<u64> {
        self.tenant_leases(&tenant).iter().collect()
    }

    #[view(getLandlordLeases)]
    fn get_landlord_leases(&self, landlord: ManagedAddress) -> MultiValueEncoded<u64> {
        self.landlord_leases(&landlord).iter().collect()
    }

    // Detentor do token do contrato (sempre o inquilino)
    #[view(ownerOf)]
    fn owner_of(&self, lease_id: u64) -> ManagedAddress {
        require!(!self.lease_holder(lease_id).is_empty(), ERR_LEASE_NOT_FOUND);
        self.lease_holder(lease_id).get()
    }

    #[view(getLeaseCount)]
    fn get_lease_count(&self) -> u64 {
        self.lease_counter().get()
    }

    #[view(getPaymentContract)]
    fn get_payment_contract(&self) -> ManagedAddress {
        self.payment_contract().get()
    }

    // ============================
    // Funções internas
    // ============================

    fn create_lease(
        &self,
        tenant: ManagedAddress,
        landlord: ManagedAddress,
        monthly_rent: BigUint,
        due_day: u8,
    ) -> u64 {
        require!(
            (MIN_DUE_DAY..=MAX_DUE_DAY).contains(&due_day),
            ERR_INVALID_DUE_DAY
        );
        require!(!tenant.is_zero() && !landlord.is_zero(), ERR_INVALID_ADDRESS);
        require!(tenant != landlord, ERR_SELF_LEASE);
        require!(monthly_rent > 0u64, ERR_INVALID_AMOUNT);

        // Ids começam em 1
        let lease_id = self.lease_counter().get() + 1;
        self.lease_counter().set(lease_id);

        let start_date = self.blockchain().get_block_timestamp();
        let lease = Lease {
            lease_id,
            tenant: tenant.clone(),
            landlord: landlord.clone(),
            monthly_rent: monthly_rent.clone(),
            due_day,
            start_date,
            end_date: start_date + LEASE_TERM_DAYS * SECONDS_PER_DAY,
            status: LeaseStatus::Active,
            total_paid: BigUint::zero(),
            payment_count: 0,
            missed_count: 0,
        };
        self.leases(lease_id).set(lease);

        self.lease_holder(lease_id).set(&tenant);
        self.tenant_leases(&tenant).push(&lease_id);
        self.landlord_leases(&landlord).push(&lease_id);

        self.lease_created_event(lease_id, &tenant, &landlord, &monthly_rent, due_day);
        self.ai_agent_trigger_event(lease_id, &ManagedBuffer::new_from_bytes(LEASE_CREATED_ACTION));

        lease_id
    }

    fn require_payment_contract(&self) {
        require!(!self.payment_contract().is_empty(), ERR_CONTRACTS_NOT_CONFIGURED);
        require!(
            self.blockchain().get_caller() == self.payment_contract().get(),
            ERR_ONLY_PAYMENT_CONTRACT
        );
    }

    fn require_active_lease(&self, lease_id: u64) -> Lease<Self::Api> {
        let lease = self.get_lease(lease_id);
        require!(lease.is_active(), ERR_LEASE_NOT_ACTIVE);
        lease
    }

    fn require_open_period(&self, lease_id: u64) -> Lease<Self::Api> {
        let lease = self.require_active_lease(lease_id);
        require!(lease.has_open_period(), ERR_TERM_FULLY_SETTLED);
        lease
    }

    // ============================
    // Eventos
    // ============================

    #[event("lease_created")]
    fn lease_created_event(
        &self,
        #[indexed] lease_id: u64,
        #[indexed] tenant: &ManagedAddress,
        #[indexed] landlord: &ManagedAddress,
        #[indexed] monthly_rent: &BigUint,
        #[indexed] due_day: u8,
    );

    #[event("lease_status_changed")]
    fn lease_status_changed_event(&self, #[indexed] lease_id: u64, #[indexed] status: LeaseStatus);

    // Gatilho consumido por agentes externos (notificações, automações)
    #[event("ai_agent_trigger")]
    fn ai_agent_trigger_event(&self, #[indexed] lease_id: u64, #[indexed] action: &ManagedBuffer);

    // ============================
    // Storage
    // ============================

    #[storage_mapper("payment_contract")]
    fn payment_contract(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("lease_counter")]
    fn lease_counter(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("leases")]
    fn leases(&self, lease_id: u64) -> SingleValueMapper<Lease<Self::Api>>;

    #[storage_mapper("lease_holder")]
    fn lease_holder(&self, lease_id: u64) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("tenant_leases")]
    fn tenant_leases(&self, tenant: &ManagedAddress) -> VecMapper<u64>;

    #[storage_mapper("landlord_leases")]
    fn landlord_leases(&self, landlord: &ManagedAddress) -> VecMapper<u64>;
}
