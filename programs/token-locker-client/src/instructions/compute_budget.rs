use anchor_lang::solana_program::instruction::Instruction;
use solana_sdk::compute_budget::ComputeBudgetInstruction;

/// Raises the transaction's compute unit limit
pub fn set_compute_unit_limit(units: u32) -> Instruction {
    ComputeBudgetInstruction::set_compute_unit_limit(units)
}

/// Sets the priority fee in micro-lamports per compute unit
pub fn set_compute_unit_price(micro_lamports: u64) -> Instruction {
    ComputeBudgetInstruction::set_compute_unit_price(micro_lamports)
}
