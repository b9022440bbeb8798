multiversx_sc::derive_imports!();

use crate::ReputationTier;

// Score inicial de um inquilino novo e limites do intervalo
pub const BASE_SCORE: u64 = 500;
pub const MIN_SCORE: u64 = 0;
pub const MAX_SCORE: u64 = 1000;

// Variação de score por classificação de pagamento
pub const SCORE_DELTA_ON_TIME: i64 = 50;
pub const SCORE_DELTA_EARLY: i64 = 75;
pub const SCORE_DELTA_LATE: i64 = -100;
pub const SCORE_DELTA_MISSED: i64 = -200;

// Dia de vencimento limitado a 28 para existir em todos os meses
pub const MIN_DUE_DAY: u8 = 1;
pub const MAX_DUE_DAY: u8 = 28;

pub const SECONDS_PER_DAY: u64 = 86_400;
pub const DAYS_PER_YEAR: u64 = 365;
pub const LEASE_TERM_DAYS: u64 = 365;
// Vencimentos mensais cobertos pelo prazo de um contrato
pub const LEASE_TERM_PERIODS: u64 = 12;
pub const BPS_DENOMINATOR: u64 = 10_000;

// Requisitos padrão para elegibilidade a crédito
pub const DEFAULT_LENDING_MIN_SCORE: u64 = 700;
pub const DEFAULT_LENDING_MIN_TIER: ReputationTier = ReputationTier::Trusted;

pub const ELIGIBLE_REASON: &[u8] = b"Eligible for rent-backed lending";
pub const BUILD_REPUTATION_REASON: &[u8] = b"Build more reputation: more rent payments required";
pub const LOW_SCORE_REASON: &[u8] = b"Score too low: pay rent on time to improve it";

/// Quantidade mínima de pagamentos para cada faixa de reputação.
/// Única fonte dos limites: o registro guarda uma cópia configurável e a
/// expõe em `getTierThresholds` para qualquer camada de exibição.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub struct TierThresholds {
    pub basic: u64,
    pub trusted: u64,
    pub premium: u64,
}

pub const DEFAULT_TIER_THRESHOLDS: TierThresholds = TierThresholds {
    basic: 3,
    trusted: 6,
    premium: 12,
};

impl TierThresholds {
    pub fn is_valid(&self) -> bool {
        self.basic >= 1 && self.basic < self.trusted && self.trusted < self.premium
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        DEFAULT_TIER_THRESHOLDS
    }
}

/// Combinação mínima de score e faixa exigida para crédito
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub struct LendingRequirements {
    pub min_score: u64,
    pub min_tier: ReputationTier,
}

impl Default for LendingRequirements {
    fn default() -> Self {
        LendingRequirements {
            min_score: DEFAULT_LENDING_MIN_SCORE,
            min_tier: DEFAULT_LENDING_MIN_TIER,
        }
    }
}
