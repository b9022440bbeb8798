// Mensagens de erro compartilhadas entre contratos e testes

pub const ERR_INVALID_DUE_DAY: &str = "Invalid due day: must be between 1 and 28";
pub const ERR_NOT_TENANT: &str = "Only the lease tenant can pay rent";
pub const ERR_INSUFFICIENT_ALLOWANCE: &str = "insufficient allowance";
pub const ERR_INSUFFICIENT_BALANCE: &str = "insufficient balance";

pub const ERR_LEASE_NOT_FOUND: &str = "Lease does not exist";
pub const ERR_LEASE_NOT_ACTIVE: &str = "Lease is not active";
pub const ERR_LEASE_NOT_ENDED: &str = "Lease term has not ended";
pub const ERR_NOT_LANDLORD: &str = "Only the landlord can perform this action";
pub const ERR_NOT_LEASE_PARTY: &str = "Only the tenant or the landlord can terminate";
pub const ERR_INVALID_ADDRESS: &str = "Invalid address";
pub const ERR_SELF_LEASE: &str = "Tenant and landlord must differ";
pub const ERR_INVALID_AMOUNT: &str = "Amount must be greater than zero";

pub const ERR_ONLY_PAYMENT_CONTRACT: &str = "Only payment contract";
pub const ERR_CONTRACTS_NOT_CONFIGURED: &str = "Contracts not configured";
pub const ERR_PAYMENT_NOT_FOUND: &str = "Payment does not exist";
pub const ERR_NOT_YET_DUE: &str = "Current period is not overdue yet";
pub const ERR_TERM_FULLY_SETTLED: &str = "All periods of the lease term are already settled";

pub const ERR_INVALID_THRESHOLDS: &str = "Tier thresholds must be strictly increasing";
pub const ERR_INVALID_SCORE: &str = "Score out of valid range";
pub const ERR_INVALID_APY: &str = "APY cannot exceed 100%";
pub const ERR_INSUFFICIENT_CUSTODY: &str = "Vault custody below release amount";

pub const ERR_FAUCET_COOLDOWN: &str = "Faucet drip already claimed, try again later";
