//! Authentication primitives: login and signup credentials plus the stored
//! password digest.
//!
//! Handlers parse raw strings through these constructors before any port or
//! service sees them. Plaintext passwords live in [`Zeroizing`] buffers and
//! are only ever compared through [`PasswordDigest::verify`].

use std::fmt;

use zeroize::Zeroizing;

use super::user::{Role, UserValidationError, Username};

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
    /// Username failed the directory rules.
    InvalidUsername(UserValidationError),
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::InvalidUsername(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated login credentials used by the account service.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("admin", "admin").unwrap();
/// assert_eq!(creds.username(), "admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for directory lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated signup request.
///
/// The requested role is carried through so the account service can refuse
/// admin self-registration with a dedicated error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupCredentials {
    username: Username,
    password: Zeroizing<String>,
    requested_role: Role,
}

impl SignupCredentials {
    /// Construct signup credentials; `role` defaults to [`Role::Member`].
    pub fn try_from_parts(
        username: &str,
        password: &str,
        role: Option<Role>,
    ) -> Result<Self, CredentialsValidationError> {
        if username.trim().is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        let username =
            Username::new(username).map_err(CredentialsValidationError::InvalidUsername)?;

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
            requested_role: role.unwrap_or(Role::Member),
        })
    }

    /// Validated username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Role the caller asked for.
    pub fn requested_role(&self) -> Role {
        self.requested_role
    }
}

/// bcrypt password digest as stored by the user directory.
///
/// The stored form is the modular crypt string (`$2b$<cost>$<salt+hash>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

/// Work factor for newly hashed passwords.
pub const PASSWORD_HASH_COST: u32 = 10;

/// Failure hashing a password.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {message}")]
pub struct PasswordHashError {
    message: String,
}

impl PasswordDigest {
    /// Hash `password` under a fresh random salt.
    pub fn generate(password: &str) -> Result<Self, PasswordHashError> {
        bcrypt::hash(password, PASSWORD_HASH_COST)
            .map(Self)
            .map_err(|err| PasswordHashError {
                message: err.to_string(),
            })
    }

    /// Parse a stored digest; `None` when the stored value is malformed.
    pub fn parse(stored: &str) -> Option<Self> {
        stored
            .parse::<bcrypt::HashParts>()
            .ok()
            .map(|_| Self(stored.to_owned()))
    }

    /// Whether `password` hashes to this digest.
    pub fn verify(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.0).unwrap_or(false)
    }

    /// Storage representation.
    pub fn to_stored(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialsValidationError::EmptyUsername)]
    #[case("   ", "pw", CredentialsValidationError::EmptyUsername)]
    #[case("user", "", CredentialsValidationError::EmptyPassword)]
    fn invalid_login_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  admin  ", "secret")]
    #[case("alice", "correct horse battery staple")]
    fn valid_login_credentials_trim_username(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    fn signup_defaults_to_member() {
        let creds = SignupCredentials::try_from_parts("carol", "pw", None).expect("valid signup");
        assert_eq!(creds.requested_role(), Role::Member);
        assert_eq!(creds.username().as_ref(), "carol");
    }

    #[rstest]
    fn signup_rejects_bad_usernames() {
        let err = SignupCredentials::try_from_parts("no", "pw", None).expect_err("too short");
        assert!(matches!(err, CredentialsValidationError::InvalidUsername(_)));
    }

    #[rstest]
    fn digest_verifies_only_the_original_password() {
        let digest = PasswordDigest::generate("password").expect("hash");
        assert!(digest.verify("password"));
        assert!(!digest.verify("Password"));
    }

    #[rstest]
    fn digest_survives_storage() {
        let digest = PasswordDigest::generate("admin").expect("hash");
        let parsed = PasswordDigest::parse(&digest.to_stored()).expect("stored form parses");
        assert_eq!(parsed, digest);
        assert!(parsed.verify("admin"));
    }

    #[rstest]
    #[case("")]
    #[case("nosalt")]
    #[case("$hash")]
    #[case("salt$0123456789abcdef")]
    fn malformed_digest_is_rejected(#[case] stored: &str) {
        assert!(PasswordDigest::parse(stored).is_none());
    }

    #[rstest]
    fn digest_uses_bcrypt_modular_crypt_format() {
        let stored = PasswordDigest::generate("pw").expect("hash").to_stored();
        assert!(stored.starts_with(&format!("$2b${PASSWORD_HASH_COST}$")));
        assert!(!stored.contains("pw"));
    }

    #[rstest]
    fn salts_differ_between_digests() {
        let first = PasswordDigest::generate("same").expect("hash");
        let second = PasswordDigest::generate("same").expect("hash");
        assert_ne!(first.to_stored(), second.to_stored());
    }
}
