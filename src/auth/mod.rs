//! Session credential storage (encrypted file-based key-value store)
//!
//! Stores the bearer token and the cached identity of the logged-in user,
//! encrypted with AES-256-GCM in ~/.config/recipebox/credentials.enc.
//! The encryption key is derived from machine-specific identifiers.
//!
//! Token validity is never stored: it is read from the token's own `exp`
//! claim every time it is asked for.

pub mod jwt;

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::paths;

pub use jwt::{CLOCK_SKEW_SECS, Claims};

const NONCE_SIZE: usize = 12;

const KEY_TOKEN: &str = "jwt_token";
const KEY_USER_ID: &str = "user_id";
const KEY_USERNAME: &str = "username";
const KEY_USER_ROLE: &str = "user_role";
const KEY_USER_EMAIL: &str = "user_email";

const SESSION_KEYS: [&str; 5] = [
    KEY_TOKEN,
    KEY_USER_ID,
    KEY_USERNAME,
    KEY_USER_ROLE,
    KEY_USER_EMAIL,
];

/// Role reported when none has been cached
pub const DEFAULT_ROLE: &str = "user";

/// Everything persisted on login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer token as issued by the backend
    pub token: String,
    /// Server-side user id
    pub user_id: Option<i64>,
    /// Display username
    pub username: Option<String>,
    /// Role name
    pub role: Option<String>,
    /// Login email
    pub email: Option<String>,
}

impl Session {
    /// Build a session from a freshly issued token, filling identity from
    /// its claims. The backend uses the login email as the subject, so the
    /// username is left for the profile to supply.
    pub fn from_token(token: &str) -> Self {
        let claims = jwt::decode_claims(token).unwrap_or_default();
        Self {
            token: token.to_string(),
            user_id: claims.user_id,
            username: None,
            role: claims.role,
            email: claims.sub,
        }
    }
}

enum Backend {
    File(PathBuf),
    Memory(HashMap<String, String>),
}

/// Durable key-value store for the session credential
pub struct CredentialStore {
    backend: Mutex<Backend>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.backend.lock() {
            Ok(guard) => match &*guard {
                Backend::File(path) => format!("file:{}", path.display()),
                Backend::Memory(_) => "memory".to_string(),
            },
            Err(_) => "poisoned".to_string(),
        };
        f.debug_struct("CredentialStore").field("backend", &kind).finish()
    }
}

impl CredentialStore {
    /// Open the store at the default location
    pub fn open() -> Result<Self> {
        Ok(Self::open_at(paths::credentials_path()?))
    }

    /// Open the store backed by a specific file. The file is created on the
    /// first write.
    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: Mutex::new(Backend::File(path.into())),
        }
    }

    /// A store that lives only as long as this value
    pub fn in_memory() -> Self {
        Self {
            backend: Mutex::new(Backend::Memory(HashMap::new())),
        }
    }

    /// Store a bearer token, overwriting any previous one
    pub fn save_token(&self, token: &str) -> Result<()> {
        self.update(|values| {
            values.insert(KEY_TOKEN.to_string(), token.to_string());
        })
    }

    /// Current bearer token, if any
    pub fn token(&self) -> Option<String> {
        self.get(KEY_TOKEN)
    }

    /// Forget the bearer token, keeping the cached identity
    pub fn clear_token(&self) -> Result<()> {
        self.update(|values| {
            values.remove(KEY_TOKEN);
        })
    }

    /// Persist a whole session in a single write
    pub fn save_session(&self, session: &Session) -> Result<()> {
        self.update(|values| {
            for key in SESSION_KEYS {
                values.remove(key);
            }
            values.insert(KEY_TOKEN.to_string(), session.token.clone());
            if let Some(id) = session.user_id {
                values.insert(KEY_USER_ID.to_string(), id.to_string());
            }
            if let Some(username) = &session.username {
                values.insert(KEY_USERNAME.to_string(), username.clone());
            }
            if let Some(role) = &session.role {
                values.insert(KEY_USER_ROLE.to_string(), role.clone());
            }
            if let Some(email) = &session.email {
                values.insert(KEY_USER_EMAIL.to_string(), email.clone());
            }
        })
    }

    /// Remove the token and every cached identity field (logout)
    pub fn clear_session(&self) -> Result<()> {
        self.update(|values| {
            for key in SESSION_KEYS {
                values.remove(key);
            }
        })
    }

    /// Cached user id
    pub fn user_id(&self) -> Option<i64> {
        self.get(KEY_USER_ID)?.parse().ok()
    }

    /// Cached username
    pub fn username(&self) -> Option<String> {
        self.get(KEY_USERNAME)
    }

    /// Cached role, `"user"` when nothing is stored
    pub fn user_role(&self) -> String {
        self.get(KEY_USER_ROLE)
            .unwrap_or_else(|| DEFAULT_ROLE.to_string())
    }

    /// Cached login email
    pub fn user_email(&self) -> Option<String> {
        self.get(KEY_USER_EMAIL)
    }

    /// Overwrite the cached username
    pub fn save_username(&self, username: &str) -> Result<()> {
        self.update(|values| {
            values.insert(KEY_USERNAME.to_string(), username.to_string());
        })
    }

    /// Overwrite the cached role
    pub fn save_user_role(&self, role: &str) -> Result<()> {
        self.update(|values| {
            values.insert(KEY_USER_ROLE.to_string(), role.to_string());
        })
    }

    /// Whether the stored token decodes and has not expired
    pub fn is_token_valid(&self) -> bool {
        self.is_token_valid_at(Utc::now())
    }

    /// Validity check against an explicit clock
    pub fn is_token_valid_at(&self, now: DateTime<Utc>) -> bool {
        let Some(token) = self.token() else {
            return false;
        };
        match jwt::decode_claims(&token) {
            Some(claims) => !claims.is_expired_at(now, CLOCK_SKEW_SECS),
            None => false,
        }
    }

    /// Token present and valid
    pub fn is_logged_in(&self) -> bool {
        self.token().is_some() && self.is_token_valid()
    }

    fn get(&self, key: &str) -> Option<String> {
        let guard = self.backend.lock().ok()?;
        match &*guard {
            Backend::Memory(values) => values.get(key).cloned(),
            Backend::File(path) => match load_credentials(path) {
                Ok(values) => values.get(key).cloned(),
                Err(e) => {
                    tracing::warn!("Failed to read credentials: {e:#}");
                    None
                }
            },
        }
    }

    fn update(&self, f: impl FnOnce(&mut HashMap<String, String>)) -> Result<()> {
        let mut guard = self
            .backend
            .lock()
            .map_err(|_| anyhow::anyhow!("Credential store lock poisoned"))?;
        match &mut *guard {
            Backend::Memory(values) => {
                f(values);
                Ok(())
            }
            Backend::File(path) => {
                let mut values = load_credentials(path).unwrap_or_default();
                f(&mut values);
                save_credentials(path, &values)
            }
        }
    }
}

/// Get machine ID for key derivation (cross-platform)
fn get_machine_id() -> String {
    #[cfg(target_os = "linux")]
    {
        if let Ok(id) = fs::read_to_string("/etc/machine-id") {
            return id.trim().to_string();
        }
        if let Ok(id) = fs::read_to_string("/var/lib/dbus/machine-id") {
            return id.trim().to_string();
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(output) = std::process::Command::new("ioreg")
            .args(["-rd1", "-c", "IOPlatformExpertDevice"])
            .output()
        {
            let stdout = String::from_utf8_lossy(&output.stdout);
            for line in stdout.lines() {
                if line.contains("IOPlatformUUID")
                    && let Some(uuid) = line.split('"').nth(3)
                {
                    return uuid.to_string();
                }
            }
        }
    }

    dirs::home_dir()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "recipebox-fallback-key".to_string())
}

/// Derive encryption key from machine-specific data
fn derive_key() -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(get_machine_id().as_bytes());
    if let Some(home) = dirs::home_dir() {
        hasher.update(home.to_string_lossy().as_bytes());
    }
    hasher.update(b"recipebox-credentials-v1");
    hasher.finalize().into()
}

fn cipher() -> Result<Aes256Gcm> {
    Aes256Gcm::new_from_slice(&derive_key()).map_err(|_| anyhow::anyhow!("Invalid key length"))
}

/// Load all values from the encrypted file
fn load_credentials(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let encrypted = fs::read(path).context("Failed to read credentials file")?;
    if encrypted.len() < NONCE_SIZE {
        return Ok(HashMap::new());
    }

    let (nonce_bytes, ciphertext) = encrypted.split_at(NONCE_SIZE);
    let nonce = Nonce::from_slice(nonce_bytes);

    let plaintext = cipher()?
        .decrypt(nonce, ciphertext)
        .map_err(|_| anyhow::anyhow!("Failed to decrypt credentials"))?;

    serde_json::from_slice(&plaintext).context("Invalid credentials payload")
}

/// Save all values to the encrypted file
fn save_credentials(path: &Path, values: &HashMap<String, String>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create credentials directory")?;
    }

    let json = serde_json::to_vec(values)?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::rng().fill(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher()?
        .encrypt(nonce, json.as_slice())
        .map_err(|_| anyhow::anyhow!("Failed to encrypt credentials"))?;

    let mut output = nonce_bytes.to_vec();
    output.extend(ciphertext);

    fs::write(path, output).context("Failed to write credentials file")?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }

    Ok(())
}
