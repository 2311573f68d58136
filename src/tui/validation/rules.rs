//! Rule functions. Each returns `Err(message)` with the text shown under
//! the offending field.

use crate::models::money::{format_naira, parse_amount};

pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 16;

pub fn required(value: &str, message: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(message.to_string())
    } else {
        Ok(())
    }
}

/// At least `min` characters after trimming
pub fn min_chars(value: &str, min: usize, message: &str) -> Result<(), String> {
    if value.trim().chars().count() < min {
        Err(message.to_string())
    } else {
        Ok(())
    }
}

pub fn email(value: &str) -> Result<(), String> {
    const MESSAGE: &str = "Invalid email address";
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return Err(MESSAGE.to_string());
    }
    let Some((local, domain)) = value.split_once('@') else {
        return Err(MESSAGE.to_string());
    };
    let domain_ok = !domain.contains('@')
        && domain
            .rsplit_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && tld.len() >= 2)
        && !domain.starts_with('.')
        && !domain.contains("..");
    if local.is_empty() || !domain_ok {
        return Err(MESSAGE.to_string());
    }
    Ok(())
}

/// Reports the first failing clause only
pub fn password_policy(value: &str) -> Result<(), String> {
    let len = value.chars().count();
    if len < PASSWORD_MIN {
        return Err("Password must be at least 8 characters".to_string());
    }
    if len > PASSWORD_MAX {
        return Err("Password must be max 16 characters".to_string());
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Must contain uppercase letter".to_string());
    }
    if !value.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Must contain lowercase letter".to_string());
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Err("Must contain number".to_string());
    }
    if !value.chars().any(|c| !c.is_ascii_alphanumeric()) {
        return Err("Must contain symbol".to_string());
    }
    Ok(())
}

pub fn matches(confirm: &str, password: &str) -> Result<(), String> {
    if confirm == password {
        Ok(())
    } else {
        Err("Passwords do not match".to_string())
    }
}

/// Parse an amount and check it lies in `[min, max]`
pub fn amount_in_range(value: &str, min: u64, max: u64) -> Result<u64, String> {
    let amount = parse_amount(value).ok_or_else(|| "Enter a valid amount".to_string())?;
    if amount < min {
        return Err(format!("Minimum amount is {}", format_naira(min)));
    }
    if amount > max {
        return Err(format!("Maximum amount is {}", format_naira(max)));
    }
    Ok(amount)
}
