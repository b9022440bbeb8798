use multiversx_sc::types::{Address, BigUint, ManagedBuffer};
use multiversx_sc_scenario::{
    managed_address, managed_biguint, rust_biguint,
    whitebox_legacy::{BlockchainStateWrapper, ContractObjWrapper},
    DebugApi,
};

use mock_usdc::*;
use noma_common::errors::*;

const WASM_PATH: &str = "output/mock-usdc.wasm";
const FAUCET_DRIP: u64 = 10_000_000_000; // 10.000 USDC

struct ContractSetup<ContractObjBuilder>
where
    ContractObjBuilder: 'static + Copy + Fn() -> mock_usdc::ContractObj<DebugApi>,
{
    pub blockchain_wrapper: BlockchainStateWrapper,
    pub owner_address: Address,
    pub tenant_address: Address,
    pub spender_address: Address,
    pub contract_wrapper: ContractObjWrapper<mock_usdc::ContractObj<DebugApi>, ContractObjBuilder>,
}

fn setup_contract<ContractObjBuilder>(builder: ContractObjBuilder) -> ContractSetup<ContractObjBuilder>
where
    ContractObjBuilder: 'static + Copy + Fn() -> mock_usdc::ContractObj<DebugApi>,
{
    let rust_zero = rust_biguint!(0u64);
    let mut blockchain_wrapper = BlockchainStateWrapper::new();
    let owner_address = blockchain_wrapper.create_user_account(&rust_zero);
    let tenant_address = blockchain_wrapper.create_user_account(&rust_zero);
    let spender_address = blockchain_wrapper.create_user_account(&rust_zero);

    let contract_wrapper =
        blockchain_wrapper.create_sc_account(&rust_zero, Some(&owner_address), builder, WASM_PATH);

    blockchain_wrapper
        .execute_tx(&owner_address, &contract_wrapper, &rust_zero, |sc| {
            sc.init(
                ManagedBuffer::from("USD Coin"),
                ManagedBuffer::from("USDC"),
                managed_biguint!(FAUCET_DRIP),
            );
        })
        .assert_ok();

    ContractSetup {
        blockchain_wrapper,
        owner_address,
        tenant_address,
        spender_address,
        contract_wrapper,
    }
}

#[test]
fn test_init() {
    let mut setup = setup_contract(mock_usdc::contract_obj);

    setup
        .blockchain_wrapper
        .execute_query(&setup.contract_wrapper, |sc| {
            assert_eq!(sc.get_name(), ManagedBuffer::from("USD Coin"));
            assert_eq!(sc.get_ticker(), ManagedBuffer::from("USDC"));
            assert_eq!(sc.get_decimals(), 6u8);
            assert_eq!(sc.total_supply(), BigUint::zero());
            assert_eq!(sc.get_faucet_drip_amount(), managed_biguint!(FAUCET_DRIP));
        })
        .assert_ok();
}

#[test]
fn test_mint_and_transfer() {
    let mut setup = setup_contract(mock_usdc::contract_obj);
    let tenant = setup.tenant_address.clone();
    let spender = setup.spender_address.clone();

    setup
        .blockchain_wrapper
        .execute_tx(&setup.owner_address, &setup.contract_wrapper, &rust_biguint!(0), |sc| {
            sc.mint_endpoint(managed_address!(&tenant), managed_biguint!(5_000u64));
        })
        .assert_ok();

    setup
        .blockchain_wrapper
        .execute_tx(&tenant, &setup.contract_wrapper, &rust_biguint!(0), |sc| {
            sc.transfer(managed_address!(&spender), managed_biguint!(1_500u64));
        })
        .assert_ok();

    setup
        .blockchain_wrapper
        .execute_query(&setup.contract_wrapper, |sc| {
            assert_eq!(sc.balance_of(managed_address!(&tenant)), managed_biguint!(3_500u64));
            assert_eq!(sc.balance_of(managed_address!(&spender)), managed_biguint!(1_500u64));
            assert_eq!(sc.total_supply(), managed_biguint!(5_000u64));
        })
        .assert_ok();
}

#[test]
fn test_transfer_insufficient_balance() {
    let mut setup = setup_contract(mock_usdc::contract_obj);
    let tenant = setup.tenant_address.clone();
    let spender = setup.spender_address.clone();

    setup
        .blockchain_wrapper
        .execute_tx(&tenant, &setup.contract_wrapper, &rust_biguint!(0), |sc| {
            sc.transfer(managed_address!(&spender), managed_biguint!(1u64));
        })
        .assert_error(4, ERR_INSUFFICIENT_BALANCE);
}

#[test]
fn test_approve_and_transfer_from() {
    let mut setup = setup_contract(mock_usdc::contract_obj);
    let owner = setup.owner_address.clone();
    let tenant = setup.tenant_address.clone();
    let spender = setup.spender_address.clone();

    setup
        .blockchain_wrapper
        .execute_tx(&owner, &setup.contract_wrapper, &rust_biguint!(0), |sc| {
            sc.mint_endpoint(managed_address!(&tenant), managed_biguint!(3_000u64));
        })
        .assert_ok();

    setup
        .blockchain_wrapper
        .execute_tx(&tenant, &setup.contract_wrapper, &rust_biguint!(0), |sc| {
            sc.approve(managed_address!(&spender), managed_biguint!(2_000u64));
        })
        .assert_ok();

    // O spender move 1.500 do inquilino para o owner
    setup
        .blockchain_wrapper
        .execute_tx(&spender, &setup.contract_wrapper, &rust_biguint!(0), |sc| {
            sc.transfer_from(
                managed_address!(&tenant),
                managed_address!(&owner),
                managed_biguint!(1_500u64),
            );
        })
        .assert_ok();

    setup
        .blockchain_wrapper
        .execute_query(&setup.contract_wrapper, |sc| {
            assert_eq!(sc.balance_of(managed_address!(&tenant)), managed_biguint!(1_500u64));
            assert_eq!(sc.balance_of(managed_address!(&owner)), managed_biguint!(1_500u64));
            assert_eq!(
                sc.allowance(managed_address!(&tenant), managed_address!(&spender)),
                managed_biguint!(500u64)
            );
        })
        .assert_ok();

    // Allowance restante não cobre o valor
    setup
        .blockchain_wrapper
        .execute_tx(&spender, &setup.contract_wrapper, &rust_biguint!(0), |sc| {
            sc.transfer_from(
                managed_address!(&tenant),
                managed_address!(&owner),
                managed_biguint!(1_000u64),
            );
        })
        .assert_error(4, ERR_INSUFFICIENT_ALLOWANCE);
}

#[test]
fn test_transfer_from_insufficient_balance() {
    let mut setup = setup_contract(mock_usdc::contract_obj);
    let tenant = setup.tenant_address.clone();
    let spender = setup.spender_address.clone();

    setup
        .blockchain_wrapper
        .execute_tx(&tenant, &setup.contract_wrapper, &rust_biguint!(0), |sc| {
            sc.approve(managed_address!(&spender), managed_biguint!(2_000u64));
        })
        .assert_ok();

    setup
        .blockchain_wrapper
        .execute_tx(&spender, &setup.contract_wrapper, &rust_biguint!(0), |sc| {
            sc.transfer_from(
                managed_address!(&tenant),
                managed_address!(&spender),
                managed_biguint!(2_000u64),
            );
        })
        .assert_error(4, ERR_INSUFFICIENT_BALANCE);
}

#[test]
fn test_only_owner_can_mint() {
    let mut setup = setup_contract(mock_usdc::contract_obj);
    let tenant = setup.tenant_address.clone();

    setup
        .blockchain_wrapper
        .execute_tx(&tenant, &setup.contract_wrapper, &rust_biguint!(0), |sc| {
            sc.mint_endpoint(managed_address!(&tenant), managed_biguint!(1_000u64));
        })
        .assert_error(4, "Endpoint can only be called by owner");
}

#[test]
fn test_faucet_drip_with_cooldown() {
    let mut setup = setup_contract(mock_usdc::contract_obj);
    let tenant = setup.tenant_address.clone();

    setup.blockchain_wrapper.set_block_timestamp(1_000);
    setup
        .blockchain_wrapper
        .execute_tx(&tenant, &setup.contract_wrapper, &rust_biguint!(0), |sc| {
            let drip = sc.get_faucet_drip();
            assert_eq!(drip, managed_biguint!(FAUCET_DRIP));
        })
        .assert_ok();

    // Segunda tentativa antes de 24h
    setup.blockchain_wrapper.set_block_timestamp(1_000 + FAUCET_COOLDOWN_SECONDS - 1);
    setup
        .blockchain_wrapper
        .execute_tx(&tenant, &setup.contract_wrapper, &rust_biguint!(0), |sc| {
            sc.get_faucet_drip();
        })
        .assert_error(4, ERR_FAUCET_COOLDOWN);

    setup.blockchain_wrapper.set_block_timestamp(1_000 + FAUCET_COOLDOWN_SECONDS);
    setup
        .blockchain_wrapper
        .execute_tx(&tenant, &setup.contract_wrapper, &rust_biguint!(0), |sc| {
            sc.get_faucet_drip();
        })
        .assert_ok();

    setup
        .blockchain_wrapper
        .execute_query(&setup.contract_wrapper, |sc| {
            assert_eq!(sc.balance_of(managed_address!(&tenant)), managed_biguint!(2 * FAUCET_DRIP));
        })
        .assert_ok();
}
