// ==========================================================================
// MÓDULO: noma-common/src/lib.rs
// Descrição: Tipos compartilhados, constantes de política e funções puras
//            de decisão usados pelos contratos NOMA (aluguel, cofre,
//            reputação e pagamento)
// ==========================================================================

#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

pub mod errors;
pub mod policy;
pub mod schedule;
pub mod scoring;

pub use policy::*;
pub use schedule::{classify_payment, days_early, due_date_for_period, settle_payment, PaymentTiming};
pub use scoring::{apply_score_delta, check_eligibility, estimate_yield, score_delta, tier_for};

// Estado do contrato de aluguel. Completed e Terminated são terminais.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum LeaseStatus {
    Active,
    Completed,
    Terminated,
}

// Situação registrada para cada pagamento de aluguel
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Late,
    Missed,
}

// Faixa de reputação derivada apenas da quantidade de pagamentos
#[type_abi]
#[derive(
    TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug,
)]
pub enum ReputationTier {
    New,
    Basic,
    Trusted,
    Premium,
}

/// Termos e estatísticas acumuladas de um contrato de aluguel.
/// `tenant`, `landlord` e `due_day` nunca mudam depois da criação.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct Lease<M: ManagedTypeApi> {
    pub lease_id: u64,
    pub tenant: ManagedAddress<M>,
    pub landlord: ManagedAddress<M>,
    pub monthly_rent: BigUint<M>,
    pub due_day: u8,
    pub start_date: u64,
    pub end_date: u64,
    pub status: LeaseStatus,
    pub total_paid: BigUint<M>,
    pub payment_count: u64,
    pub missed_count: u64,
}

impl<M: ManagedTypeApi> Lease<M> {
    pub fn is_active(&self) -> bool {
        self.status == LeaseStatus::Active
    }

    // Índice (base 0) do período que o próximo pagamento vai quitar
    pub fn current_period(&self) -> u64 {
        self.payment_count + self.missed_count
    }

    // Ainda há vencimento dentro do prazo a quitar ou marcar como perdido
    pub fn has_open_period(&self) -> bool {
        self.current_period() < LEASE_TERM_PERIODS
    }

    pub fn next_due_date(&self) -> u64 {
        due_date_for_period(self.start_date, self.due_day, self.current_period())
    }
}

/// Registro imutável de um pagamento (histórico append-only por contrato)
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct RentPayment<M: ManagedTypeApi> {
    pub payment_id: u64,
    pub lease_id: u64,
    pub amount: BigUint<M>,
    pub due_date: u64,
    pub paid_date: u64,
    pub status: PaymentStatus,
    pub is_early: bool,
    pub yield_earned: BigUint<M>,
}

/// Reputação acumulada de um inquilino
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct Reputation<M: ManagedTypeApi> {
    pub tenant: ManagedAddress<M>,
    pub total_payments: u64,
    pub on_time_payments: u64,
    pub early_payments: u64,
    pub late_payments: u64,
    pub missed_payments: u64,
    pub total_yield_earned: BigUint<M>,
    pub tier: ReputationTier,
    pub score: u64,
}

impl<M: ManagedTypeApi> Reputation<M> {
    pub fn new(tenant: ManagedAddress<M>) -> Self {
        Reputation {
            tenant,
            total_payments: 0,
            on_time_payments: 0,
            early_payments: 0,
            late_payments: 0,
            missed_payments: 0,
            total_yield_earned: BigUint::zero(),
            tier: ReputationTier::New,
            score: BASE_SCORE,
        }
    }

    /// Registra um pagamento classificado, ajusta o score e recalcula a faixa
    pub fn record_payment(
        &mut self,
        timing: PaymentTiming,
        yield_earned: &BigUint<M>,
        thresholds: &TierThresholds,
    ) {
        match timing {
            PaymentTiming::Early => self.early_payments += 1,
            PaymentTiming::OnTime => self.on_time_payments += 1,
            PaymentTiming::Late => self.late_payments += 1,
        }
        self.total_payments += 1;
        self.total_yield_earned += yield_earned;
        self.score = apply_score_delta(self.score, score_delta(timing));
        self.refresh_tier(thresholds);
    }

    pub fn record_missed(&mut self, thresholds: &TierThresholds) {
        self.missed_payments += 1;
        self.total_payments += 1;
        self.score = apply_score_delta(self.score, SCORE_DELTA_MISSED);
        self.refresh_tier(thresholds);
    }

    pub fn refresh_tier(&mut self, thresholds: &TierThresholds) {
        self.tier = tier_for(self.total_payments, thresholds);
    }

    pub fn counters_consistent(&self) -> bool {
        self.on_time_payments + self.early_payments + self.late_payments + self.missed_payments
            == self.total_payments
    }
}
