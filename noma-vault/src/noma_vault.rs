// ==========================================================================
// MÓDULO: noma-vault/src/noma_vault.rs
// Descrição: Cofre que recebe o aluguel antes do repasse ao locador e
//            contabiliza o rendimento gerado pelos pagamentos antecipados
// ==========================================================================

#![no_std]

multiversx_sc::imports!();

use noma_common::errors::*;
use noma_common::{estimate_yield, BPS_DENOMINATOR};

mod token_proxy {
    multiversx_sc::imports!();

    #[multiversx_sc::proxy]
    pub trait StableToken {
        #[endpoint]
        fn transfer(&self, to: ManagedAddress, amount: BigUint);
    }
}

#[multiversx_sc::contract]
pub trait NomaVault {
    // Token usado na custódia, taxa anual (base 10000) e nome da estratégia
    #[init]
    fn init(&self, usdc_address: ManagedAddress, apy_bps: u64, strategy_name: ManagedBuffer) {
        require!(!usdc_address.is_zero(), ERR_INVALID_ADDRESS);
        require!(apy_bps <= BPS_DENOMINATOR, ERR_INVALID_APY);

        self.usdc_address().set(usdc_address);
        self.apy_bps().set(apy_bps);
        self.strategy_name().set(strategy_name);
        self.total_deposits().set_if_empty(BigUint::zero());
        self.total_yield_generated().set_if_empty(BigUint::zero());
    }

    #[upgrade]
    fn upgrade(&self) {}

    #[only_owner]
    #[endpoint(setPaymentContract)]
    fn set_payment_contract(&self, payment_contract: ManagedAddress) {
        require!(!payment_contract.is_zero(), ERR_INVALID_ADDRESS);
        self.payment_contract().set(payment_contract);
    }

    #[only_owner]
    #[endpoint(setApy)]
    fn set_apy(&self, apy_bps: u64) {
        require!(apy_bps <= BPS_DENOMINATOR, ERR_INVALID_APY);
        self.apy_bps().set(apy_bps);
    }

    /// Registra o aluguel recém transferido para o cofre e devolve o
    /// rendimento dos dias de antecipação. O rendimento é apenas
    /// contabilizado, nunca pago.
    #[endpoint(depositForLease)]
    fn deposit_for_lease(&self, lease_id: u64, amount: BigUint, days_early: u64) -> BigUint {
        self.require_payment_contract();
        require!(amount > 0u64, ERR_INVALID_AMOUNT);

        let yield_earned = estimate_yield(&amount, self.apy_bps().get(), days_early);

        self.total_deposits().update(|total| *total += &amount);
        self.lease_deposits(lease_id).update(|total| *total += &amount);
        self.lease_yield(lease_id).update(|total| *total += &yield_earned);
        self.total_yield_generated().update(|total| *total += &yield_earned);

        self.vault_deposit_event(lease_id, &amount, days_early, &yield_earned);

        yield_earned
    }

    // Repasse ao locador a partir da custódia
    #[endpoint(releaseToLandlord)]
    fn release_to_landlord(&self, lease_id: u64, landlord: ManagedAddress, amount: BigUint) {
        self.require_payment_contract();
        require!(!landlord.is_zero(), ERR_INVALID_ADDRESS);
        require!(amount <= self.total_deposits().get(), ERR_INSUFFICIENT_CUSTODY);

        self.total_deposits().update(|total| *total -= &amount);

        self.token_proxy(self.usdc_address().get())
            .transfer(landlord.clone(), amount.clone())
            .execute_on_dest_context::<()>();

        self.vault_release_event(lease_id, &landlord, &amount);
    }

    // ======== CONSULTAS ========

    /// (depósitos em custódia, rendimento total, estratégia, apy em bps)
    #[view(getVaultStats)]
    fn get_vault_stats(&self) -> MultiValue4<BigUint, BigUint, ManagedBuffer, u64> {
        (
            self.total_deposits().get(),
            self.total_yield_generated().get(),
            self.strategy_name().get(),
            self.apy_bps().get(),
        )
            .into()
    }

    #[view(estimateYield)]
    fn estimate_yield_view(&self, amount: BigUint, days_early: u64) -> BigUint {
        estimate_yield(&amount, self.apy_bps().get(), days_early)
    }

    #[view(leaseDeposits)]
    fn get_lease_deposits(&self, lease_id: u64) -> BigUint {
        self.lease_deposits(lease_id).get()
    }

    #[view(leaseYield)]
    fn get_lease_yield(&self, lease_id: u64) -> BigUint {
        self.lease_yield(lease_id).get()
    }

    #[view(getApy)]
    fn get_apy(&self) -> u64 {
        self.apy_bps().get()
    }

    #[view(getUsdcAddress)]
    fn get_usdc_address(&self) -> ManagedAddress {
        self.usdc_address().get()
    }

    #[view(getPaymentContract)]
    fn get_payment_contract(&self) -> ManagedAddress {
        self.payment_contract().get()
    }

    fn require_payment_contract(&self) {
        require!(!self.payment_contract().is_empty(), ERR_CONTRACTS_NOT_CONFIGURED);
        require!(
            self.blockchain().get_caller() == self.payment_contract().get(),
            ERR_ONLY_PAYMENT_CONTRACT
        );
    }

    #[proxy]
    fn token_proxy(&self, address: ManagedAddress) -> token_proxy::Proxy<Self::Api>;

    // ======== EVENTOS ========

    #[event("vault_deposit")]
    fn vault_deposit_event(
        &self,
        #[indexed] lease_id: u64,
        #[indexed] amount: &BigUint,
        #[indexed] days_early: u64,
        #[indexed] yield_earned: &BigUint,
    );

    #[event("vault_release")]
    fn vault_release_event(
        &self,
        #[indexed] lease_id: u64,
        #[indexed] landlord: &ManagedAddress,
        #[indexed] amount: &BigUint,
    );

    // ======== STORAGE ========

    #[storage_mapper("usdc_address")]
    fn usdc_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("payment_contract")]
    fn payment_contract(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("apy_bps")]
    fn apy_bps(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("strategy_name")]
    fn strategy_name(&self) -> SingleValueMapper<ManagedBuffer>;

    #[storage_mapper("total_deposits")]
    fn total_deposits(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("total_yield_generated")]
    fn total_yield_generated(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("lease_deposits")]
    fn lease_deposits(&self, lease_id: u64) -> SingleValueMapper<BigUint>;

    #[storage_mapper("lease_yield")]
    fn lease_yield(&self, lease_id: u64) -> SingleValueMapper<BigUint>;
}
