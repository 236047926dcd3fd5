//! Temporary administrator password generation.

use rand::Rng;

/// Characters a generated password is drawn from: mixed-case letters,
/// digits, and a handful of unambiguous symbols.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%&*-_+=?";

/// Generated password length. The minimum requirement is 12; 16 gives
/// headroom without hurting manual entry from the welcome email.
const PASSWORD_LEN: usize = 16;

/// A generated temporary password.
///
/// The value is only ever communicated inside the welcome email
/// payload. `Debug` is redacted so instrumented spans and log lines
/// cannot leak it, and the type deliberately implements neither
/// `Display` nor `Serialize`.
#[derive(Clone, PartialEq, Eq)]
pub struct TempPassword(String);

impl TempPassword {
    /// Generates a fresh password, each character sampled uniformly
    /// from the alphabet.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rng())
    }

    /// Generates a fresh password from the given RNG.
    pub fn generate_with<R: Rng>(rng: &mut R) -> Self {
        let password = (0..PASSWORD_LEN)
            .map(|_| {
                let idx = rng.random_range(0..ALPHABET.len());
                ALPHABET[idx] as char
            })
            .collect();
        Self(password)
    }

    /// Returns the plaintext password for inclusion in the email
    /// payload or the identity-creation request.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for TempPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TempPassword(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_password_meets_length_requirement() {
        let password = TempPassword::generate();
        assert!(password.expose().len() >= 12);
        assert_eq!(password.expose().len(), PASSWORD_LEN);
    }

    #[test]
    fn generated_password_stays_within_alphabet() {
        let password = TempPassword::generate();
        assert!(
            password
                .expose()
                .bytes()
                .all(|b| ALPHABET.contains(&b))
        );
    }

    #[test]
    fn generated_passwords_are_not_repeated() {
        let samples: Vec<String> = (0..32)
            .map(|_| TempPassword::generate().expose().to_string())
            .collect();
        let mut deduped = samples.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(samples.len(), deduped.len());
    }

    #[test]
    fn debug_output_is_redacted() {
        let password = TempPassword::generate();
        let debug = format!("{password:?}");
        assert_eq!(debug, "TempPassword(<redacted>)");
        assert!(!debug.contains(password.expose()));
    }
}
