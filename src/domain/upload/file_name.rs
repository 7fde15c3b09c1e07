use rand::Rng;
use std::fmt;

const TOKEN_SKIP: usize = 2;
const TOKEN_LEN: usize = 5;

/// Name under which an uploaded photo is stored upstream: `<token>.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFileName {
    token: String,
    extension: String,
}

impl PhotoFileName {
    /// Generates a fresh name from the wall clock and the thread RNG.
    ///
    /// Collisions are possible in principle and are not guarded against.
    pub fn generate(extension: &str) -> Self {
        let now_millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
        let jitter: f64 = rand::thread_rng().r#gen();
        Self::from_parts(now_millis, jitter, extension)
    }

    /// Deterministic variant of [`PhotoFileName::generate`]; `jitter` is in `[0, 1)`.
    pub fn from_parts(now_millis: u64, jitter: f64, extension: &str) -> Self {
        let seed = (now_millis as f64 * (1.0 + jitter)) as u64;
        let token: String = to_base36(seed)
            .chars()
            .skip(TOKEN_SKIP)
            .take(TOKEN_LEN)
            .collect();
        Self {
            token,
            extension: extension.to_string(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl fmt::Display for PhotoFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.token, self.extension)
    }
}

/// Key the attachment endpoints use for a stored photo: the name before the first `.`.
pub fn photo_key(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
