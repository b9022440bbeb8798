multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use crate::{estimate_yield, PaymentStatus, SECONDS_PER_DAY};

/// Classificação de um pagamento em relação ao vencimento (granularidade de dia UTC)
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum PaymentTiming {
    Early,
    OnTime,
    Late,
}

impl PaymentTiming {
    pub fn payment_status(self) -> PaymentStatus {
        match self {
            PaymentTiming::Late => PaymentStatus::Late,
            PaymentTiming::Early | PaymentTiming::OnTime => PaymentStatus::Paid,
        }
    }

    pub fn is_early(self) -> bool {
        self == PaymentTiming::Early
    }
}

/// Resultado da liquidação de um pagamento
pub struct Settlement<M: ManagedTypeApi> {
    pub timing: PaymentTiming,
    pub status: PaymentStatus,
    pub is_early: bool,
    pub days_early: u64,
    pub yield_earned: BigUint<M>,
}

pub fn classify_payment(due_date: u64, paid_date: u64) -> PaymentTiming {
    let due_day = due_date / SECONDS_PER_DAY;
    let paid_day = paid_date / SECONDS_PER_DAY;

    if paid_day < due_day {
        PaymentTiming::Early
    } else if paid_day == due_day {
        PaymentTiming::OnTime
    } else {
        PaymentTiming::Late
    }
}

// Dias inteiros entre o pagamento e o vencimento; zero se não for antecipado
pub fn days_early(due_date: u64, paid_date: u64) -> u64 {
    (due_date / SECONDS_PER_DAY).saturating_sub(paid_date / SECONDS_PER_DAY)
}

/// Classifica o pagamento e calcula o rendimento da antecipação
pub fn settle_payment<M: ManagedTypeApi>(
    due_date: u64,
    paid_date: u64,
    amount: &BigUint<M>,
    apy_bps: u64,
) -> Settlement<M> {
    let timing = classify_payment(due_date, paid_date);
    let days_early = days_early(due_date, paid_date);

    Settlement {
        timing,
        status: timing.payment_status(),
        is_early: timing.is_early(),
        days_early,
        yield_earned: estimate_yield(amount, apy_bps, days_early),
    }
}

/// Vencimento (00:00 UTC) do período `period` (base 0) de um contrato.
/// O primeiro vencimento é o `due_day` do mês de início, ou do mês seguinte
/// quando o contrato começa depois desse dia.
pub fn due_date_for_period(start_date: u64, due_day: u8, period: u64) -> u64 {
    let (year, month, day) = civil_from_days(start_date / SECONDS_PER_DAY);
    let due_day = due_day as u64;

    let first_offset = if day <= due_day { 0 } else { 1 };
    let month_index = year * 12 + (month - 1) + first_offset + period;

    let due_year = month_index / 12;
    let due_month = month_index % 12 + 1;

    days_from_civil(due_year, due_month, due_day) * SECONDS_PER_DAY
}

// Dias desde 1970-01-01 para uma data civil (ano >= 1970)
pub fn days_from_civil(year: u64, month: u64, day: u64) -> u64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y / 400;
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;

    era * 146_097 + doe - 719_468
}

// (ano, mês, dia) para um número de dias desde 1970-01-01
pub fn civil_from_days(days: u64) -> (u64, u64, u64) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };

    (year, month, day)
}
