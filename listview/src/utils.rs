use chrono::{Local, SecondsFormat};
use rand::Rng;

const NAME_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of generated name suffixes.
pub const RANDOM_NAME_LEN: usize = 6;

/// Random lowercase base-36 suffix for suggested row names.
pub fn random_name() -> String {
    let mut rng = rand::thread_rng();
    (0..RANDOM_NAME_LEN)
        .map(|_| NAME_ALPHABET[rng.gen_range(0..NAME_ALPHABET.len())] as char)
        .collect()
}

/// Current local time as RFC 3339 with an explicit offset.
pub fn now_rfc3339() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_name_shape() {
        let name = random_name();
        assert_eq!(name.len(), RANDOM_NAME_LEN);
        assert!(name
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_now_parses_back() {
        let now = now_rfc3339();
        assert!(chrono::DateTime::parse_from_rfc3339(&now).is_ok());
    }
}
