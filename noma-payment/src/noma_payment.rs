// ==========================================================================
// MÓDULO: noma-payment/src/noma_payment.rs
// Descrição: Orquestra o pagamento de aluguel. Classifica o pagamento em
//            relação ao vencimento, movimenta o token do inquilino para o
//            cofre e do cofre para o locador, e atualiza contrato, histórico
//            e reputação numa única transação
// ==========================================================================

#![no_std]

multiversx_sc::imports!();

use noma_common::errors::*;
use noma_common::{classify_payment, days_early, settle_payment, Lease, PaymentStatus, PaymentTiming, RentPayment};

mod lease_nft_proxy {
    multiversx_sc::imports!();
    use noma_common::Lease;

    #[multiversx_sc::proxy]
    pub trait LeaseNft {
        #[endpoint(getLease)]
        fn get_lease(&self, lease_id: u64) -> Lease<Self::Api>;

        #[endpoint(recordPayment)]
        fn record_payment(&self, lease_id: u64, amount: BigUint);

        #[endpoint(recordMissedPeriod)]
        fn record_missed_period(&self, lease_id: u64);
    }
}

mod vault_proxy {
    multiversx_sc::imports!();

    #[multiversx_sc::proxy]
    pub trait NomaVault {
        #[endpoint(depositForLease)]
        fn deposit_for_lease(&self, lease_id: u64, amount: BigUint, days_early: u64) -> BigUint;

        #[endpoint(releaseToLandlord)]
        fn release_to_landlord(&self, lease_id: u64, landlord: ManagedAddress, amount: BigUint);

        #[endpoint(getApy)]
        fn get_apy(&self) -> u64;
    }
}

mod reputation_proxy {
    multiversx_sc::imports!();
    use noma_common::PaymentTiming;

    #[multiversx_sc::proxy]
    pub trait ReputationRegistry {
        #[endpoint(recordPayment)]
        fn record_payment(&self, tenant: ManagedAddress, timing: PaymentTiming, yield_earned: BigUint);

        #[endpoint(recordMissedPayment)]
        fn record_missed_payment(&self, tenant: ManagedAddress);
    }
}

mod token_proxy {
    multiversx_sc::imports!();

    #[multiversx_sc::proxy]
    pub trait StableToken {
        #[endpoint(balanceOf)]
        fn balance_of(&self, address: ManagedAddress) -> BigUint;

        #[endpoint(allowance)]
        fn allowance(&self, owner: ManagedAddress, spender: ManagedAddress) -> BigUint;

        #[endpoint(transferFrom)]
        fn transfer_from(&self, from: ManagedAddress, to: ManagedAddress, amount: BigUint);
    }
}

#[multiversx_sc::contract]
pub trait NomaPayment {
    // Token de pagamento e rótulo da rede de liquidação informado nos eventos
    #[init]
    fn init(&self, usdc_address: ManagedAddress, settlement_network: ManagedBuffer) {
        require!(!usdc_address.is_zero(), ERR_INVALID_ADDRESS);

        self.usdc_address().set(usdc_address);
        self.settlement_network().set(settlement_network);
        self.payment_counter().set_if_empty(0u64);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // Liga os contratos de aluguel, cofre e reputação
    #[only_owner]
    #[endpoint(setContracts)]
    fn set_contracts(&self, lease_nft: ManagedAddress, vault: ManagedAddress, reputation: ManagedAddress) {
        require!(
            !lease_nft.is_zero() && !vault.is_zero() && !reputation.is_zero(),
            ERR_INVALID_ADDRESS
        );

        self.lease_nft_address().set(lease_nft);
        self.vault_address().set(vault);
        self.reputation_address().set(reputation);
    }

    // ============================
    // Pagamento
    // ============================

    /// Paga o aluguel do período corrente do contrato.
    /// Retorna (status, antecipado, rendimento gerado).
    #[endpoint(payRent)]
    fn pay_rent(&self, lease_id: u64) -> MultiValue3<PaymentStatus, bool, BigUint> {
        self.require_contracts_configured();

        let tenant = self.blockchain().get_caller();
        let lease = self.load_lease(lease_id);
        require!(lease.tenant == tenant, ERR_NOT_TENANT);
        require!(lease.is_active(), ERR_LEASE_NOT_ACTIVE);
        require!(lease.has_open_period(), ERR_TERM_FULLY_SETTLED);

        // Saldo e autorização conferidos antes de qualquer escrita
        let rent = lease.monthly_rent.clone();
        let usdc_address = self.usdc_address().get();
        let own_address = self.blockchain().get_sc_address();

        let allowance: BigUint = self
            .token_proxy(usdc_address.clone())
            .allowance(tenant.clone(), own_address)
            .execute_on_dest_context();
        require!(allowance >= rent, ERR_INSUFFICIENT_ALLOWANCE);

        let balance: BigUint = self
            .token_proxy(usdc_address.clone())
            .balance_of(tenant.clone())
            .execute_on_dest_context();
        require!(balance >= rent, ERR_INSUFFICIENT_BALANCE);

        let vault_address = self.vault_address().get();
        let due_date = lease.next_due_date();
        let paid_date = self.blockchain().get_block_timestamp();
        let timing = classify_payment(due_date, paid_date);
        let early_days = days_early(due_date, paid_date);

        // Inquilino -> cofre -> locador. O rendimento vem do cofre, que
        // aplica a própria taxa aos dias de antecipação
        self.token_proxy(usdc_address)
            .transfer_from(tenant.clone(), vault_address.clone(), rent.clone())
            .execute_on_dest_context::<()>();

        let yield_earned: BigUint = self
            .vault_proxy(vault_address.clone())
            .deposit_for_lease(lease_id, rent.clone(), early_days)
            .execute_on_dest_context();

        self.vault_proxy(vault_address)
            .release_to_landlord(lease_id, lease.landlord.clone(), rent.clone())
            .execute_on_dest_context::<()>();

        self.lease_nft_proxy(self.lease_nft_address().get())
            .record_payment(lease_id, rent.clone())
            .execute_on_dest_context::<()>();

        let payment_id = self.append_payment(RentPayment {
            payment_id: 0,
            lease_id,
            amount: rent.clone(),
            due_date,
            paid_date,
            status: timing.payment_status(),
            is_early: timing.is_early(),
            yield_earned: yield_earned.clone(),
        });

        self.reputation_proxy(self.reputation_address().get())
            .record_payment(tenant.clone(), timing, yield_earned.clone())
            .execute_on_dest_context::<()>();

        self.rent_paid_event(lease_id, payment_id, &tenant, &rent, timing.is_early(), &yield_earned);
        self.payment_settled_event(payment_id, lease_id, &rent, &self.settlement_network().get());

        (timing.payment_status(), timing.is_early(), yield_earned).into()
    }

    /// Registra o período corrente como não pago. Só é aceito depois que o
    /// vencimento passou. O cronograma avança e o inquilino sofre a
    /// penalidade de pagamento perdido.
    #[only_owner]
    #[endpoint(recordMissedPayment)]
    fn record_missed_payment(&self, lease_id: u64) -> u64 {
        self.require_contracts_configured();

        let lease = self.load_lease(lease_id);
        require!(lease.is_active(), ERR_LEASE_NOT_ACTIVE);
        require!(lease.has_open_period(), ERR_TERM_FULLY_SETTLED);

        let due_date = lease.next_due_date();
        let now = self.blockchain().get_block_timestamp();
        require!(classify_payment(due_date, now) == PaymentTiming::Late, ERR_NOT_YET_DUE);

        self.lease_nft_proxy(self.lease_nft_address().get())
            .record_missed_period(lease_id)
            .execute_on_dest_context::<()>();

        // paid_date zero: o período nunca foi quitado
        let payment_id = self.append_payment(RentPayment {
            payment_id: 0,
            lease_id,
            amount: BigUint::zero(),
            due_date,
            paid_date: 0,
            status: PaymentStatus::Missed,
            is_early: false,
            yield_earned: BigUint::zero(),
        });

        self.reputation_proxy(self.reputation_address().get())
            .record_missed_payment(lease.tenant.clone())
            .execute_on_dest_context::<()>();

        self.payment_missed_event(lease_id, payment_id, &lease.tenant, due_date);

        payment_id
    }

    // ============================
    // Consultas
    // ============================

    #[view(getPaymentHistory)]
    fn get_payment_history(&self, lease_id: u64) -> MultiValueEncoded<RentPayment<Self::Api>> {
        let mut history = MultiValueEncoded::new();
        for payment_id in self.lease_payments(lease_id).iter() {
            history.push(self.payments(payment_id).get());
        }

        history
    }

    #[view(getPayment)]
    fn get_payment(&self, payment_id: u64) -> RentPayment<Self::Api> {
        require!(!self.payments(payment_id).is_empty(), ERR_PAYMENT_NOT_FOUND);
        self.payments(payment_id).get()
    }

    #[view(getNextDueDate)]
    fn get_next_due_date(&self, lease_id: u64) -> u64 {
        self.require_contracts_configured();
        self.load_lease(lease_id).next_due_date()
    }

    // Rendimento que um pagamento feito agora geraria; zero com o prazo quitado
    #[view(estimateEarlyPaymentYield)]
    fn estimate_early_payment_yield(&self, lease_id: u64) -> BigUint {
        self.require_contracts_configured();

        let lease = self.load_lease(lease_id);
        if !lease.has_open_period() {
            return BigUint::zero();
        }

        let apy_bps: u64 = self.vault_proxy(self.vault_address().get()).get_apy().execute_on_dest_context();
        let now = self.blockchain().get_block_timestamp();

        settle_payment(lease.next_due_date(), now, &lease.monthly_rent, apy_bps).yield_earned
    }

    #[view(getPaymentCount)]
    fn get_payment_count(&self) -> u64 {
        self.payment_counter().get()
    }

    #[view(getSettlementNetwork)]
    fn get_settlement_network(&self) -> ManagedBuffer {
        self.settlement_network().get()
    }

    #[view(getContracts)]
    fn get_contracts(&self) -> MultiValue3<ManagedAddress, ManagedAddress, ManagedAddress> {
        (
            self.lease_nft_address().get(),
            self.vault_address().get(),
            self.reputation_address().get(),
        )
            .into()
    }

    // ============================
    // Funções internas
    // ============================

    fn require_contracts_configured(&self) {
        require!(
            !self.lease_nft_address().is_empty()
                && !self.vault_address().is_empty()
                && !self.reputation_address().is_empty(),
            ERR_CONTRACTS_NOT_CONFIGURED
        );
    }

    fn load_lease(&self, lease_id: u64) -> Lease<Self::Api> {
        self.lease_nft_proxy(self.lease_nft_address().get())
            .get_lease(lease_id)
            .execute_on_dest_context()
    }

    // Ids de pagamento começam em 1 e são globais
    fn append_payment(&self, mut payment: RentPayment<Self::Api>) -> u64 {
        let payment_id = self.payment_counter().get() + 1;
        self.payment_counter().set(payment_id);

        payment.payment_id = payment_id;
        self.lease_payments(payment.lease_id).push(&payment_id);
        self.payments(payment_id).set(payment);

        payment_id
    }

    #[proxy]
    fn lease_nft_proxy(&self, address: ManagedAddress) -> lease_nft_proxy::Proxy<Self::Api>;

    #[proxy]
    fn vault_proxy(&self, address: ManagedAddress) -> vault_proxy::Proxy<Self::Api>;

    #[proxy]
    fn reputation_proxy(&self, address: ManagedAddress) -> reputation_proxy::Proxy<Self::Api>;

    #[proxy]
    fn token_proxy(&self, address: ManagedAddress) -> token_proxy::Proxy<Self::Api>;

    // ============================
    // Eventos
    // ============================

    #[event("rent_paid")]
    fn rent_paid_event(
        &self,
        #[indexed] lease_id: u64,
        #[indexed] payment_id: u64,
        #[indexed] tenant: &ManagedAddress,
        #[indexed] amount: &BigUint,
        #[indexed] is_early: bool,
        #[indexed] yield_earned: &BigUint,
    );

    #[event("payment_settled")]
    fn payment_settled_event(
        &self,
        #[indexed] payment_id: u64,
        #[indexed] lease_id: u64,
        #[indexed] amount: &BigUint,
        #[indexed] settlement_network: &ManagedBuffer,
    );

    #[event("payment_missed")]
    fn payment_missed_event(
        &self,
        #[indexed] lease_id: u64,
        #[indexed] payment_id: u64,
        #[indexed] tenant: &ManagedAddress,
        #[indexed] due_date: u64,
    );

    // ============================
    // Storage
    // ============================

    #[storage_mapper("usdc_address")]
    fn usdc_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("settlement_network")]
    fn settlement_network(&self) -> SingleValueMapper<ManagedBuffer>;

    #[storage_mapper("lease_nft_address")]
    fn lease_nft_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("vault_address")]
    fn vault_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("reputation_address")]
    fn reputation_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("payment_counter")]
    fn payment_counter(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("payments")]
    fn payments(&self, payment_id: u64) -> SingleValueMapper<RentPayment<Self::Api>>;

    #[storage_mapper("lease_payments")]
    fn lease_payments(&self, lease_id: u64) -> VecMapper<u64>;
}
