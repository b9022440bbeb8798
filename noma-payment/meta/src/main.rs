fn main() {
    multiversx_sc_meta_lib::cli_main::<noma_payment::AbiProvider>();
}
