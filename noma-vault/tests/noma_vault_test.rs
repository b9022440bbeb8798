use multiversx_sc::types::{Address, ManagedBuffer};
use multiversx_sc_scenario::{
    managed_address, managed_biguint, rust_biguint,
    whitebox_legacy::{BlockchainStateWrapper, ContractObjWrapper},
    DebugApi,
};

use mock_usdc::MockUsdc;
use noma_common::errors::*;
use noma_vault::*;

const VAULT_WASM_PATH: &str = "output/noma-vault.wasm";
const USDC_WASM_PATH: &str = "output/mock-usdc.wasm";

const APY_BPS: u64 = 500;
const STRATEGY: &[u8] = b"USYC";
const RENT: u64 = 1_500_000_000;

type UsdcBuilder = fn() -> mock_usdc::ContractObj<DebugApi>;
type VaultBuilder = fn() -> noma_vault::ContractObj<DebugApi>;

struct VaultSetup {
    pub blockchain_wrapper: BlockchainStateWrapper,
    pub owner_address: Address,
    pub payment_address: Address,
    pub landlord_address: Address,
    pub usdc_wrapper: ContractObjWrapper<mock_usdc::ContractObj<DebugApi>, UsdcBuilder>,
    pub vault_wrapper: ContractObjWrapper<noma_vault::ContractObj<DebugApi>, VaultBuilder>,
}

fn setup_vault(configure_payment: bool) -> VaultSetup {
    let rust_zero = rust_biguint!(0u64);
    let mut blockchain_wrapper = BlockchainStateWrapper::new();
    let owner_address = blockchain_wrapper.create_user_account(&rust_zero);
    let payment_address = blockchain_wrapper.create_user_account(&rust_zero);
    let landlord_address = blockchain_wrapper.create_user_account(&rust_zero);

    let usdc_wrapper = blockchain_wrapper.create_sc_account(
        &rust_zero,
        Some(&owner_address),
        mock_usdc::contract_obj as UsdcBuilder,
        USDC_WASM_PATH,
    );
    let vault_wrapper = blockchain_wrapper.create_sc_account(
        &rust_zero,
        Some(&owner_address),
        noma_vault::contract_obj as VaultBuilder,
        VAULT_WASM_PATH,
    );

    blockchain_wrapper
        .execute_tx(&owner_address, &usdc_wrapper, &rust_zero, |sc| {
            sc.init(
                ManagedBuffer::from(b"Mock USDC"),
                ManagedBuffer::from(b"USDC"),
                managed_biguint!(1_000_000_000u64),
            );
        })
        .assert_ok();

    let usdc_address = usdc_wrapper.address_ref().clone();
    blockchain_wrapper
        .execute_tx(&owner_address, &vault_wrapper, &rust_zero, |sc| {
            sc.init(managed_address!(&usdc_address), APY_BPS, ManagedBuffer::from(STRATEGY));
            if configure_payment {
                sc.set_payment_contract(managed_address!(&payment_address));
            }
        })
        .assert_ok();

    VaultSetup {
        blockchain_wrapper,
        owner_address,
        payment_address,
        landlord_address,
        usdc_wrapper,
        vault_wrapper,
    }
}

// Coloca saldo em custódia como se o aluguel tivesse sido transferido ao cofre
fn fund_vault(setup: &mut VaultSetup, amount: u64) {
    let vault_address = setup.vault_wrapper.address_ref().clone();
    setup
        .blockchain_wrapper
        .execute_tx(&setup.owner_address, &setup.usdc_wrapper, &rust_biguint!(0), |sc| {
            sc.mint_endpoint(managed_address!(&vault_address), managed_biguint!(amount));
        })
        .assert_ok();
}

#[test]
fn test_init_and_stats() {
    let mut setup = setup_vault(true);
    let usdc_address = setup.usdc_wrapper.address_ref().clone();

    setup
        .blockchain_wrapper
        .execute_query(&setup.vault_wrapper, |sc| {
            let (deposits, total_yield, strategy, apy) = sc.get_vault_stats().into_tuple();

            assert_eq!(deposits, managed_biguint!(0u64));
            assert_eq!(total_yield, managed_biguint!(0u64));
            assert_eq!(strategy, ManagedBuffer::from(STRATEGY));
            assert_eq!(apy, APY_BPS);
            assert_eq!(sc.get_usdc_address(), managed_address!(&usdc_address));
        })
        .assert_ok();
}

#[test]
fn test_estimate_yield() {
    let mut setup = setup_vault(true);

    setup
        .blockchain_wrapper
        .execute_query(&setup.vault_wrapper, |sc| {
            assert_eq!(sc.estimate_yield_view(managed_biguint!(RENT), 5u64), managed_biguint!(1_027_397u64));
            assert_eq!(sc.estimate_yield_view(managed_biguint!(RENT), 10u64), managed_biguint!(2_054_794u64));
            assert_eq!(sc.estimate_yield_view(managed_biguint!(RENT), 0u64), managed_biguint!(0u64));
        })
        .assert_ok();
}

#[test]
fn test_deposit_and_release() {
    let mut setup = setup_vault(true);
    fund_vault(&mut setup, RENT);
    let landlord = setup.landlord_address.clone();

    setup
        .blockchain_wrapper
        .execute_tx(&setup.payment_address, &setup.vault_wrapper, &rust_biguint!(0), |sc| {
            let yield_earned = sc.deposit_for_lease(1u64, managed_biguint!(RENT), 5u64);
            assert_eq!(yield_earned, managed_biguint!(1_027_397u64));
        })
        .assert_ok();

    setup
        .blockchain_wrapper
        .execute_query(&setup.vault_wrapper, |sc| {
            let (deposits, total_yield, _, _) = sc.get_vault_stats().into_tuple();
            assert_eq!(deposits, managed_biguint!(RENT));
            assert_eq!(total_yield, managed_biguint!(1_027_397u64));
        })
        .assert_ok();

    setup
        .blockchain_wrapper
        .execute_tx(&setup.payment_address, &setup.vault_wrapper, &rust_biguint!(0), |sc| {
            sc.release_to_landlord(1u64, managed_address!(&landlord), managed_biguint!(RENT));
        })
        .assert_ok();

    // Custódia zerada, histórico do contrato preservado
    setup
        .blockchain_wrapper
        .execute_query(&setup.vault_wrapper, |sc| {
            let (deposits, total_yield, _, _) = sc.get_vault_stats().into_tuple();
            assert_eq!(deposits, managed_biguint!(0u64));
            assert_eq!(total_yield, managed_biguint!(1_027_397u64));
            assert_eq!(sc.get_lease_deposits(1u64), managed_biguint!(RENT));
            assert_eq!(sc.get_lease_yield(1u64), managed_biguint!(1_027_397u64));
        })
        .assert_ok();

    let vault_address = setup.vault_wrapper.address_ref().clone();
    setup
        .blockchain_wrapper
        .execute_query(&setup.usdc_wrapper, |sc| {
            assert_eq!(sc.balance_of(managed_address!(&landlord)), managed_biguint!(RENT));
            assert_eq!(sc.balance_of(managed_address!(&vault_address)), managed_biguint!(0u64));
        })
        .assert_ok();
}

#[test]
fn test_release_above_custody_rejected() {
    let mut setup = setup_vault(true);
    fund_vault(&mut setup, RENT);
    let landlord = setup.landlord_address.clone();

    setup
        .blockchain_wrapper
        .execute_tx(&setup.payment_address, &setup.vault_wrapper, &rust_biguint!(0), |sc| {
            sc.deposit_for_lease(1u64, managed_biguint!(RENT), 0u64);
        })
        .assert_ok();

    setup
        .blockchain_wrapper
        .execute_tx(&setup.payment_address, &setup.vault_wrapper, &rust_biguint!(0), |sc| {
            sc.release_to_landlord(1u64, managed_address!(&landlord), managed_biguint!(RENT + 1));
        })
        .assert_error(4, ERR_INSUFFICIENT_CUSTODY);
}

#[test]
fn test_only_payment_contract() {
    let mut setup = setup_vault(true);
    fund_vault(&mut setup, RENT);
    let landlord = setup.landlord_address.clone();

    setup
        .blockchain_wrapper
        .execute_tx(&landlord, &setup.vault_wrapper, &rust_biguint!(0), |sc| {
            sc.deposit_for_lease(1u64, managed_biguint!(RENT), 10u64);
        })
        .assert_error(4, ERR_ONLY_PAYMENT_CONTRACT);

    setup
        .blockchain_wrapper
        .execute_tx(&landlord, &setup.vault_wrapper, &rust_biguint!(0), |sc| {
            sc.release_to_landlord(1u64, managed_address!(&landlord), managed_biguint!(RENT));
        })
        .assert_error(4, ERR_ONLY_PAYMENT_CONTRACT);
}

#[test]
fn test_payment_contract_not_configured() {
    let mut setup = setup_vault(false);

    setup
        .blockchain_wrapper
        .execute_tx(&setup.payment_address, &setup.vault_wrapper, &rust_biguint!(0), |sc| {
            sc.deposit_for_lease(1u64, managed_biguint!(RENT), 10u64);
        })
        .assert_error(4, ERR_CONTRACTS_NOT_CONFIGURED);
}

#[test]
fn test_apy_configuration() {
    let mut setup = setup_vault(true);

    setup
        .blockchain_wrapper
        .execute_tx(&setup.owner_address, &setup.vault_wrapper, &rust_biguint!(0), |sc| {
            sc.set_apy(10_001u64);
        })
        .assert_error(4, ERR_INVALID_APY);

    setup
        .blockchain_wrapper
        .execute_tx(&setup.payment_address, &setup.vault_wrapper, &rust_biguint!(0), |sc| {
            sc.set_apy(1_000u64);
        })
        .assert_error(4, "Endpoint can only be called by owner");

    setup
        .blockchain_wrapper
        .execute_tx(&setup.owner_address, &setup.vault_wrapper, &rust_biguint!(0), |sc| {
            sc.set_apy(1_000u64);
        })
        .assert_ok();

    setup
        .blockchain_wrapper
        .execute_query(&setup.vault_wrapper, |sc| {
            assert_eq!(sc.get_apy(), 1_000u64);
            assert_eq!(sc.estimate_yield_view(managed_biguint!(RENT), 5u64), managed_biguint!(2_054_794u64));
        })
        .assert_ok();
}
