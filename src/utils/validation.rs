use crate::utils::error::{Result, StreakError};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static GITHUB_LOGIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+(-[A-Za-z0-9]+)*$").expect("valid login regex"));

static SVG_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})|[a-zA-Z]+)$").expect("valid color regex")
});

const MAX_LOGIN_LENGTH: usize = 39;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(StreakError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(StreakError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(StreakError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(StreakError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(StreakError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| StreakError::MissingConfigError {
            field: field_name.to_string(),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StreakError::InvalidConfigValueError {
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
        return Err(StreakError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// GitHub logins are 1-39 alphanumerics, with single hyphens allowed between them.
pub fn validate_github_login(field_name: &str, login: &str) -> Result<()> {
    validate_non_empty_string(field_name, login)?;

    if login.len() > MAX_LOGIN_LENGTH || !GITHUB_LOGIN.is_match(login) {
        return Err(StreakError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: login.to_string(),
            reason: format!(
                "Not a valid GitHub login (alphanumerics and single hyphens, at most {} characters)",
                MAX_LOGIN_LENGTH
            ),
        });
    }
    Ok(())
}

pub fn validate_color(field_name: &str, color: &str) -> Result<()> {
    if !SVG_COLOR.is_match(color) {
        return Err(StreakError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: color.to_string(),
            reason: "Expected #rgb, #rrggbb or a named color".to_string(),
        });
    }
    Ok(())
}

pub fn validate_allowed_values(field_name: &str, values: &[String], allowed: &[&str]) -> Result<()> {
    for value in values {
        if !allowed.contains(&value.as_str()) {
            return Err(StreakError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: format!("Unsupported value. Allowed: {}", allowed.join(", ")),
            });
        }
    }
    Ok(())
}
