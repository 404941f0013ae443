use crate::domain::model::U256;
use crate::utils::error::{GatewayError, Result};

/// 1 ether = 10^18 wei
pub const WEI_PER_ETHER: U256 = U256([1_000_000_000_000_000_000, 0, 0, 0]);

/// 將整數主幣單位換算為 wei；超過 uint256 視為輸入錯誤
pub fn to_wei(field: &str, amount: U256) -> Result<U256> {
    amount.checked_mul(WEI_PER_ETHER).ok_or_else(|| {
        GatewayError::validation(
            field,
            format!("{} is too large to convert to base units", field),
        )
    })
}

/// JSON-RPC 的十六進位 quantity 表示法
pub fn to_hex_quantity(value: U256) -> String {
    format!("0x{:x}", value)
}

pub fn parse_hex_quantity(raw: &str) -> Option<u64> {
    let digits = raw.strip_prefix("0x")?;
    if digits.is_empty() {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}
