fn main() {
    multiversx_sc_meta_lib::cli_main::<lease_nft::AbiProvider>();
}
