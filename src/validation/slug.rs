//! Slug pattern and generation.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-z0-9-]+$").expect("covered by tests"));

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_SUFFIX_LEN: usize = 6;

pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_PATTERN.is_match(slug)
}

/// `base36(now_millis)-xxxxxx` with six random base36 characters.
///
/// Not collision checked; the timestamp prefix keeps clashes unlikely.
pub fn generate_slug<R: Rng>(now_millis: i64, rng: &mut R) -> String {
    let suffix: String = (0..RANDOM_SUFFIX_LEN)
        .map(|_| BASE36_DIGITS[rng.random_range(0..BASE36_DIGITS.len())] as char)
        .collect();

    format!("{}-{}", to_base36(now_millis.max(0) as u64), suffix)
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();

    String::from_utf8(digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_slug_pattern() {
        assert!(is_valid_slug("hello-world-2"));
        assert!(is_valid_slug("-"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Hello"));
        assert!(!is_valid_slug("hello world"));
        assert!(!is_valid_slug("héllo"));
        assert!(!is_valid_slug("hello_world"));
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        // 2024-01-01T00:00:00Z in millis
        assert_eq!(to_base36(1_704_067_200_000), "lqu5m2o0");
    }

    #[test]
    fn test_generated_slugs_match_pattern() {
        let shape = Regex::new("^[0-9a-z]+-[0-9a-z]{6}$").unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for millis in [0, 1, 1_704_067_200_000, i64::MAX, -5] {
            let slug = generate_slug(millis, &mut rng);
            assert!(shape.is_match(&slug), "unexpected slug {slug}");
            assert!(is_valid_slug(&slug));
        }
    }

    #[test]
    fn test_generated_slug_prefix_is_timestamp() {
        let mut rng = StdRng::seed_from_u64(1);
        let slug = generate_slug(36, &mut rng);
        assert!(slug.starts_with("10-"));
    }
}
