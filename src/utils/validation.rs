use crate::domain::model::Address;
use crate::utils::error::{GatewayError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(GatewayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(GatewayError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(GatewayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_address(field_name: &str, value: &str) -> Result<Address> {
    Address::parse(value).map_err(|e| GatewayError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

pub fn validate_bind_address(field_name: &str, value: &str) -> Result<std::net::SocketAddr> {
    value
        .parse()
        .map_err(|e: std::net::AddrParseError| GatewayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(GatewayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GatewayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(GatewayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("ledger.rpc_url", "https://example.com").is_ok());
        assert!(validate_url("ledger.rpc_url", "http://127.0.0.1:7545").is_ok());
        assert!(validate_url("ledger.rpc_url", "").is_err());
        assert!(validate_url("ledger.rpc_url", "invalid-url").is_err());
        assert!(validate_url("ledger.rpc_url", "ws://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("confirmation.poll_interval_ms", 5, 1).is_ok());
        assert!(validate_positive_number("confirmation.poll_interval_ms", 0, 1).is_err());
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address("operator.address", "0x0000000000000000000000000000000000000001").is_ok());
        assert!(validate_address("operator.address", "0xYourWalletAddressHere").is_err());
    }

    #[test]
    fn test_validate_bind_address() {
        assert!(validate_bind_address("server.bind", "0.0.0.0:5000").is_ok());
        assert!(validate_bind_address("server.bind", "localhost").is_err());
    }
}
