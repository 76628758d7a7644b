use std::fmt;

use serde::Serialize;

use super::login::{has_digit, has_lowercase, has_special, has_uppercase};

/// Length at which a password earns the length point.
const STRONG_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StrengthLabel {
    Weak,
    Moderate,
    Strong,
}

impl StrengthLabel {
    fn from_score(score: u8) -> Self {
        match score {
            0..=1 => StrengthLabel::Weak,
            2..=3 => StrengthLabel::Moderate,
            _ => StrengthLabel::Strong,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Moderate => "Moderate",
            StrengthLabel::Strong => "Strong",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory strength score; unrelated to whether the login form accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    /// 0..=5, one point per satisfied criterion.
    pub score: u8,
    pub label: StrengthLabel,
}

/// Score a password: one point each for a lowercase letter, an uppercase
/// letter, a digit, a special character and a length of at least 8.
pub fn score_password_strength(password: &str) -> PasswordStrength {
    let checks = [
        has_lowercase(password),
        has_uppercase(password),
        has_digit(password),
        has_special(password),
        password.chars().count() >= STRONG_LENGTH,
    ];
    let score = checks.iter().filter(|&&ok| ok).count() as u8;
    PasswordStrength {
        score,
        label: StrengthLabel::from_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_criterion_is_strong() {
        let s = score_password_strength("Aa1!aaaa");
        assert_eq!(s.score, 5);
        assert_eq!(s.label, StrengthLabel::Strong);
    }

    #[test]
    fn seven_lowercase_is_weak() {
        let s = score_password_strength("aaaaaaa");
        assert_eq!(s.score, 1);
        assert_eq!(s.label, StrengthLabel::Weak);
    }

    #[test]
    fn empty_scores_zero() {
        let s = score_password_strength("");
        assert_eq!(s.score, 0);
        assert_eq!(s.label, StrengthLabel::Weak);
    }

    #[test]
    fn label_boundaries() {
        // lowercase + length
        assert_eq!(score_password_strength("aaaaaaaa").label, StrengthLabel::Moderate);
        // lowercase + upper + digit
        let s = score_password_strength("aB3");
        assert_eq!(s.score, 3);
        assert_eq!(s.label, StrengthLabel::Moderate);
        // lowercase + upper + digit + special
        let s = score_password_strength("aB3#");
        assert_eq!(s.score, 4);
        assert_eq!(s.label, StrengthLabel::Strong);
    }

    #[test]
    fn label_display() {
        assert_eq!(StrengthLabel::Moderate.to_string(), "Moderate");
    }
}
