use crate::domain::model::Damage;
use crate::utils::error::{HitError, Result};
use std::num::IntErrorKind;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 解析使用者輸入的傷害值，只接受大於零的整數
pub fn parse_damage(input: &str) -> Result<Damage> {
    let trimmed = input.trim();
    let invalid = |reason: &str| HitError::InvalidDamage {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let value: u64 = match trimmed.parse() {
        Ok(value) => value,
        Err(e) => {
            return Err(match e.kind() {
                IntErrorKind::PosOverflow => invalid("too large, the maximum is 18446744073709551615"),
                _ if is_negative_integer(trimmed) => invalid("must be greater than zero"),
                _ => invalid("not a whole number"),
            })
        }
    };

    Damage::new(value).ok_or_else(|| invalid("must be greater than zero"))
}

fn is_negative_integer(text: &str) -> bool {
    text.strip_prefix('-')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// 資料來源可以是本機檔案或 http(s) URL
pub fn validate_source_location(field_name: &str, location: &str) -> Result<()> {
    let invalid = |reason: String| HitError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: location.to_string(),
        reason,
    };

    if location.trim().is_empty() {
        return Err(invalid("Source location cannot be empty".to_string()));
    }

    if !looks_like_url(location) {
        if location.contains('\0') {
            return Err(invalid("File path contains null bytes".to_string()));
        }
        return Ok(());
    }

    let url = Url::parse(location).map_err(|e| invalid(format!("Invalid source URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "Character data can only be fetched over http or https, not {}",
            url.scheme()
        )));
    }
    if url.host_str().is_none() {
        return Err(invalid("Source URL has no host".to_string()));
    }

    Ok(())
}

pub fn looks_like_url(location: &str) -> bool {
    location.contains("://")
}
