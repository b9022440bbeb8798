multiversx_sc::imports!();

use crate::{
    LendingRequirements, PaymentTiming, ReputationTier, TierThresholds, BPS_DENOMINATOR,
    BUILD_REPUTATION_REASON, DAYS_PER_YEAR, ELIGIBLE_REASON, LOW_SCORE_REASON, MAX_SCORE,
    MIN_SCORE, SCORE_DELTA_EARLY, SCORE_DELTA_LATE, SCORE_DELTA_ON_TIME,
};

pub fn score_delta(timing: PaymentTiming) -> i64 {
    match timing {
        PaymentTiming::Early => SCORE_DELTA_EARLY,
        PaymentTiming::OnTime => SCORE_DELTA_ON_TIME,
        PaymentTiming::Late => SCORE_DELTA_LATE,
    }
}

/// Aplica a variação e mantém o score em [MIN_SCORE, MAX_SCORE]
pub fn apply_score_delta(score: u64, delta: i64) -> u64 {
    let updated = if delta >= 0 {
        score.saturating_add(delta as u64)
    } else {
        score.saturating_sub(delta.unsigned_abs())
    };

    updated.clamp(MIN_SCORE, MAX_SCORE)
}

// A faixa depende só da contagem de pagamentos, nunca do score
pub fn tier_for(total_payments: u64, thresholds: &TierThresholds) -> ReputationTier {
    if total_payments >= thresholds.premium {
        ReputationTier::Premium
    } else if total_payments >= thresholds.trusted {
        ReputationTier::Trusted
    } else if total_payments >= thresholds.basic {
        ReputationTier::Basic
    } else {
        ReputationTier::New
    }
}

/// Rendimento linear da antecipação:
/// amount * apy_bps * days_early / (365 * 10000), arredondado para baixo
pub fn estimate_yield<M: ManagedTypeApi>(amount: &BigUint<M>, apy_bps: u64, days_early: u64) -> BigUint<M> {
    if days_early == 0 || apy_bps == 0 {
        return BigUint::zero();
    }

    amount.clone() * BigUint::from(apy_bps) * BigUint::from(days_early)
        / BigUint::from(DAYS_PER_YEAR * BPS_DENOMINATOR)
}

/// Decide a elegibilidade a crédito e devolve o motivo legível
pub fn check_eligibility(
    tier: ReputationTier,
    score: u64,
    requirements: &LendingRequirements,
) -> (bool, &'static [u8]) {
    if tier < requirements.min_tier {
        return (false, BUILD_REPUTATION_REASON);
    }
    if score < requirements.min_score {
        return (false, LOW_SCORE_REASON);
    }

    (true, ELIGIBLE_REASON)
}
