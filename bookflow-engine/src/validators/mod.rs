//! Per-stage input validation
//!
//! Runs synchronously inside `advance()`; a failure blocks the transition
//! and is always recoverable by re-input. Backward navigation never
//! validates.
//!
//! The optional genre stages (the young "additional" and 11+ "extra"
//! stages) deliberately accept zero selections while the primary pick
//! stages enforce counts; that unevenness matches the shipped behavior.

use crate::models::{Profile, Stage};
use bookflow_common::{EngineConfig, Error, Result};

/// Validate the current stage's required fields before a forward transition
pub fn validate_stage(
    stage: Stage,
    profile: &Profile,
    visible_series: &[String],
    config: &EngineConfig,
) -> Result<()> {
    match stage {
        Stage::Consent => validate_consent(profile),
        Stage::IdentifyName => validate_name(&profile.name, config),
        Stage::IdentifyAge => validate_age(profile.age, config),
        Stage::GenreSelectionYoung => {
            let picks = non_blank(&profile.young_genre_picks);
            if picks != config.young_pick_count {
                return Err(Error::Validation(format!(
                    "Pick exactly {} genres ({} selected)",
                    config.young_pick_count, picks
                )));
            }
            Ok(())
        }
        Stage::GenreSelectionFiction => {
            let picks = non_blank(&profile.fiction_genre_picks);
            if picks < config.fiction_pick_min || picks > config.fiction_pick_max {
                return Err(Error::Validation(format!(
                    "Pick between {} and {} genres ({} selected)",
                    config.fiction_pick_min, config.fiction_pick_max, picks
                )));
            }
            Ok(())
        }
        // An untouched slider is allowed; only an out-of-range value blocks
        Stage::FictionRatio => match profile.fiction_ratio {
            Some(ratio) if ratio > 100 => Err(Error::Validation(format!(
                "Fiction ratio must be between 0 and 100 (got {})",
                ratio
            ))),
            _ => Ok(()),
        },
        Stage::SeriesReactions => validate_reactions(profile, visible_series),
        // Start, results, the reading-habit choice, and every optional
        // genre/interest stage validate vacuously
        _ => Ok(()),
    }
}

fn validate_consent(profile: &Profile) -> Result<()> {
    let email = profile.parent_email.as_deref().map(str::trim).unwrap_or("");
    let phone = profile.parent_phone.as_deref().map(str::trim).unwrap_or("");

    if email.is_empty() && phone.is_empty() {
        return Err(Error::Validation(
            "Provide a parent email or phone number".into(),
        ));
    }
    if !email.is_empty() && !email_is_valid(email) {
        return Err(Error::Validation(format!("'{}' is not a valid email", email)));
    }
    if !phone.is_empty() && !phone_is_valid(phone) {
        return Err(Error::Validation(format!(
            "'{}' is not a valid phone number",
            phone
        )));
    }
    Ok(())
}

fn validate_name(name: &str, config: &EngineConfig) -> Result<()> {
    if name.trim().chars().count() < config.min_name_len {
        return Err(Error::Validation(format!(
            "Name must be at least {} characters",
            config.min_name_len
        )));
    }
    Ok(())
}

/// An unset age is allowed (the resolver falls back to the 11+ path); a
/// supplied age must lie in the supported range.
fn validate_age(age: Option<u8>, config: &EngineConfig) -> Result<()> {
    match age {
        None => Ok(()),
        Some(a) if a >= config.min_age && a <= config.max_age => Ok(()),
        Some(a) => Err(Error::Validation(format!(
            "Age must be between {} and {} (got {})",
            config.min_age, config.max_age, a
        ))),
    }
}

/// Every visible item needs a read/not-read choice, and every read item
/// needs a response; the transient read-without-response state must be
/// resolved before advancing.
fn validate_reactions(profile: &Profile, visible_series: &[String]) -> Result<()> {
    for item_id in visible_series {
        match profile.reactions.get(item_id) {
            None => {
                return Err(Error::Validation(format!(
                    "Choose read or not read for '{}'",
                    item_id
                )))
            }
            Some(entry) if entry.has_read && entry.response.is_none() => {
                return Err(Error::Validation(format!(
                    "Choose a reaction for '{}'",
                    item_id
                )))
            }
            Some(_) => {}
        }
    }
    Ok(())
}

fn non_blank(values: &[String]) -> usize {
    values.iter().filter(|v| !v.trim().is_empty()).count()
}

/// Minimal email shape check: a user part, an `@`, and a dotted domain
pub fn email_is_valid(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let (Some(user), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if user.is_empty() || domain.is_empty() || email.contains(char::is_whitespace) {
        return false;
    }
    domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@')
}

/// Minimal phone shape check: 7-15 digits after stripping separators
pub fn phone_is_valid(phone: &str) -> bool {
    let mut digits = 0usize;
    for c in phone.chars() {
        match c {
            '0'..='9' => digits += 1,
            '+' | '-' | '(' | ')' | '.' | ' ' => {}
            _ => return false,
        }
    }
    (7..=15).contains(&digits)
}
