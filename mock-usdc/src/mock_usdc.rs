// ==========================================================================
// MÓDULO: mock-usdc/src/mock_usdc.rs
// Descrição: Stablecoin de teste (6 casas decimais) no modelo de saldo e
//            allowance, usada pelos inquilinos para pagar aluguel
// ==========================================================================

#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use noma_common::errors::*;

pub const USDC_DECIMALS: u8 = 6;
pub const FAUCET_COOLDOWN_SECONDS: u64 = 86_400;

/// Informações básicas do token
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct TokenInfo<M: ManagedTypeApi> {
    pub name: ManagedBuffer<M>,
    pub ticker: ManagedBuffer<M>,
    pub decimals: u8,
}

#[multiversx_sc::contract]
pub trait MockUsdc {
    /// Inicializa o token
    /// @param token_name: nome completo (ex: "USD Coin")
    /// @param token_ticker: símbolo (ex: "USDC")
    /// @param faucet_drip: quantidade entregue por `getFaucetDrip`
    #[init]
    fn init(&self, token_name: ManagedBuffer, token_ticker: ManagedBuffer, faucet_drip: BigUint) {
        self.token_info().set(TokenInfo {
            name: token_name,
            ticker: token_ticker,
            decimals: USDC_DECIMALS,
        });
        self.faucet_drip().set(faucet_drip);
    }

    // ======== VIEWS ========

    #[view(getName)]
    fn get_name(&self) -> ManagedBuffer {
        self.token_info().get().name
    }

    #[view(getTicker)]
    fn get_ticker(&self) -> ManagedBuffer {
        self.token_info().get().ticker
    }

    #[view(getDecimals)]
    fn get_decimals(&self) -> u8 {
        self.token_info().get().decimals
    }

    #[view(totalSupply)]
    fn total_supply(&self) -> BigUint {
        self.total_token_supply().get()
    }

    #[view(balanceOf)]
    fn balance_of(&self, address: ManagedAddress) -> BigUint {
        self.balances(&address).get()
    }

    /// Quanto `spender` ainda pode gastar em nome de `owner`
    #[view(allowance)]
    fn allowance(&self, owner: ManagedAddress, spender: ManagedAddress) -> BigUint {
        self.allowances(&owner, &spender).get()
    }

    #[view(getFaucetDripAmount)]
    fn get_faucet_drip_amount(&self) -> BigUint {
        self.faucet_drip().get()
    }

    // ======== TRANSFERÊNCIAS ========

    /// Transfere tokens do chamador para `to`
    #[endpoint]
    fn transfer(&self, to: ManagedAddress, amount: BigUint) {
        let caller = self.blockchain().get_caller();
        self.perform_transfer(&caller, &to, &amount);
    }

    /// Autoriza `spender` a gastar até `amount` em nome do chamador
    #[endpoint]
    fn approve(&self, spender: ManagedAddress, amount: BigUint) {
        let caller = self.blockchain().get_caller();
        self.allowances(&caller, &spender).set(&amount);
        self.approve_event(&caller, &spender, &amount);
    }

    /// Transfere tokens de `from` usando o allowance concedido ao chamador
    #[endpoint(transferFrom)]
    fn transfer_from(&self, from: ManagedAddress, to: ManagedAddress, amount: BigUint) {
        let caller = self.blockchain().get_caller();

        let allowance = self.allowances(&from, &caller).get();
        require!(allowance >= amount, ERR_INSUFFICIENT_ALLOWANCE);

        self.allowances(&from, &caller).set(&(&allowance - &amount));
        self.perform_transfer(&from, &to, &amount);
    }

    // ======== EMISSÃO ========

    #[only_owner]
    #[endpoint(mint)]
    fn mint_endpoint(&self, to: ManagedAddress, amount: BigUint) {
        require!(!to.is_zero(), ERR_INVALID_ADDRESS);
        self.mint(&to, &amount);
    }

    /// Faucet público: entrega `faucet_drip` tokens, uma vez a cada 24h por endereço
    #[endpoint(getFaucetDrip)]
    fn get_faucet_drip(&self) -> BigUint {
        let caller = self.blockchain().get_caller();
        let now = self.blockchain().get_block_timestamp();

        let last_claim = self.last_faucet_claim(&caller);
        require!(
            last_claim.is_empty() || now >= last_claim.get() + FAUCET_COOLDOWN_SECONDS,
            ERR_FAUCET_COOLDOWN
        );
        last_claim.set(now);

        let drip = self.faucet_drip().get();
        self.mint(&caller, &drip);

        drip
    }

    // ======== FUNÇÕES INTERNAS ========

    fn mint(&self, to: &ManagedAddress, amount: &BigUint) {
        require!(amount > &0u64, ERR_INVALID_AMOUNT);

        self.balances(to).update(|balance| *balance += amount);
        self.total_token_supply().update(|supply| *supply += amount);

        self.mint_event(to, amount);
    }

    fn perform_transfer(&self, from: &ManagedAddress, to: &ManagedAddress, amount: &BigUint) {
        require!(!to.is_zero(), ERR_INVALID_ADDRESS);

        let balance = self.balances(from).get();
        require!(&balance >= amount, ERR_INSUFFICIENT_BALANCE);

        self.balances(from).set(&(&balance - amount));
        self.balances(to).update(|to_balance| *to_balance += amount);

        self.transfer_event(from, to, amount);
    }

    // ======== EVENTOS ========

    #[event("transfer")]
    fn transfer_event(
        &self,
        #[indexed] from: &ManagedAddress,
        #[indexed] to: &ManagedAddress,
        #[indexed] amount: &BigUint,
    );

    #[event("approve")]
    fn approve_event(
        &self,
        #[indexed] owner: &ManagedAddress,
        #[indexed] spender: &ManagedAddress,
        #[indexed] amount: &BigUint,
    );

    #[event("mint")]
    fn mint_event(&self, #[indexed] to: &ManagedAddress, #[indexed] amount: &BigUint);

    // ======== STORAGE ========

    #[storage_mapper("token_info")]
    fn token_info(&self) -> SingleValueMapper<TokenInfo<Self::Api>>;

    #[storage_mapper("total_supply")]
    fn total_token_supply(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("balances")]
    fn balances(&self, address: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[storage_mapper("allowances")]
    fn allowances(&self, owner: &ManagedAddress, spender: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[storage_mapper("faucet_drip")]
    fn faucet_drip(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("last_faucet_claim")]
    fn last_faucet_claim(&self, address: &ManagedAddress) -> SingleValueMapper<u64>;
}
