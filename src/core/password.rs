/// Random password generation and strength rating
///
/// Passwords are drawn from the enabled character categories. At least one
/// character of every enabled category is always present.

use std::fmt;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SPECIAL: &[u8] = b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Default password length
pub const DEFAULT_LENGTH: usize = 12;

/// Errors raised when a password cannot be generated
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordError {
    #[error("No character types selected!")]
    NoCharacterTypes,

    #[error("Length {length} too short for {required} selected character types!")]
    LengthTooShort { length: usize, required: usize },
}

/// Which characters a generated password may contain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    /// Number of characters to generate
    pub length: usize,
    pub use_uppercase: bool,
    pub use_lowercase: bool,
    pub use_digits: bool,
    /// ASCII punctuation
    pub use_special: bool,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            use_uppercase: true,
            use_lowercase: true,
            use_digits: true,
            use_special: true,
        }
    }
}

impl PasswordConfig {
    /// Enabled character categories, lowercase first
    fn categories(&self) -> Vec<&'static [u8]> {
        let mut categories = Vec::with_capacity(4);
        if self.use_lowercase {
            categories.push(LOWERCASE);
        }
        if self.use_uppercase {
            categories.push(UPPERCASE);
        }
        if self.use_digits {
            categories.push(DIGITS);
        }
        if self.use_special {
            categories.push(SPECIAL);
        }
        categories
    }
}

/// Generate a password with the given random number generator
pub fn generate_password<R: Rng + ?Sized>(
    config: &PasswordConfig,
    rng: &mut R,
) -> Result<String, PasswordError> {
    let categories = config.categories();
    if categories.is_empty() {
        return Err(PasswordError::NoCharacterTypes);
    }
    if config.length < categories.len() {
        return Err(PasswordError::LengthTooShort {
            length: config.length,
            required: categories.len(),
        });
    }

    let pool: Vec<u8> = categories.concat();
    let mut password: Vec<u8> = Vec::with_capacity(config.length);

    // One guaranteed character per category
    for category in &categories {
        if let Some(&c) = category.choose(rng) {
            password.push(c);
        }
    }
    while password.len() < config.length {
        if let Some(&c) = pool.choose(rng) {
            password.push(c);
        }
    }
    password.shuffle(rng);

    debug!(
        "Generated {} character password from a pool of {}",
        password.len(),
        pool.len()
    );

    Ok(password.into_iter().map(char::from).collect())
}

/// Generate a password with the thread-local random number generator
pub fn generate(config: &PasswordConfig) -> Result<String, PasswordError> {
    generate_password(config, &mut rand::thread_rng())
}

/// Strength rating derived from a 0-5 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
    VeryStrong,
}

impl PasswordStrength {
    /// Rating for a score, saturating at VeryStrong
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => PasswordStrength::VeryWeak,
            1 => PasswordStrength::Weak,
            2 => PasswordStrength::Fair,
            3 => PasswordStrength::Good,
            4 => PasswordStrength::Strong,
            _ => PasswordStrength::VeryStrong,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PasswordStrength::VeryWeak => "Very Weak",
            PasswordStrength::Weak => "Weak",
            PasswordStrength::Fair => "Fair",
            PasswordStrength::Good => "Good",
            PasswordStrength::Strong => "Strong",
            PasswordStrength::VeryStrong => "Very Strong",
        }
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score a password
///
/// One point each for a length of at least 8, a length of at least 12, a
/// lowercase letter, an uppercase letter and a digit.
pub fn password_strength(password: &str) -> PasswordStrength {
    let length = password.chars().count();
    let checks = [
        length >= 8,
        length >= 12,
        password.chars().any(char::is_lowercase),
        password.chars().any(char::is_uppercase),
        password.chars().any(|c| c.is_ascii_digit()),
    ];
    let score = checks.iter().filter(|&&passed| passed).count() as u8;
    PasswordStrength::from_score(score)
}
