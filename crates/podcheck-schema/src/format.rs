//! # Format Predicates
//!
//! Pure, stateless checks over scalar text. None of these report anything;
//! the validator decides which message a failed check produces.

use once_cell::sync::Lazy;
use regex::Regex;

/// Registry host every container image must be pulled from.
pub const IMAGE_REGISTRY: &str = "registry.bigbrother.io";

/// Accepted `apiVersion` values.
pub const API_VERSIONS: &[&str] = &["v1"];

/// Accepted `kind` values.
pub const KINDS: &[&str] = &["Pod"];

/// Accepted `spec.os` values.
pub const OPERATING_SYSTEMS: &[&str] = &["linux", "windows"];

/// Accepted `ports[].protocol` values.
pub const PROTOCOLS: &[&str] = &["TCP", "UDP"];

/// Lowest valid port number.
pub const MIN_PORT: i64 = 1;

/// Highest valid port number.
pub const MAX_PORT: i64 = 65535;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]+(_[a-z]+)*$").expect("identifier pattern compiles"));

static IMAGE_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"^{}/[a-zA-Z0-9][a-zA-Z0-9_.-]+:[a-zA-Z0-9_.-]+$",
        regex::escape(IMAGE_REGISTRY)
    );
    Regex::new(&pattern).expect("image reference pattern compiles")
});

static INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("integer pattern compiles"));

static MEMORY_QUANTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(Gi|Mi|Ki)$").expect("memory quantity pattern compiles"));

/// Lowercase words joined by single underscores: `web`, `log_shipper`.
///
/// Digits, leading/trailing underscores, and doubled underscores are
/// rejected.
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}

/// `registry.bigbrother.io/<repository>:<tag>` with a non-empty tag.
pub fn is_image_reference(s: &str) -> bool {
    IMAGE_REFERENCE.is_match(s)
}

/// Digits followed by exactly one of `Gi`, `Mi`, `Ki`.
pub fn is_memory_quantity(s: &str) -> bool {
    MEMORY_QUANTITY.is_match(s)
}

/// Base-10 integer with an optional sign.
///
/// Well-formed integers beyond the `i64` range saturate to `i64::MAX` or
/// `i64::MIN`, so range checks still see them as too large or too small.
pub fn parse_int(s: &str) -> Option<i64> {
    if !INTEGER.is_match(s) {
        return None;
    }
    match s.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) if s.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// 1 through 65535, both ends included.
pub fn is_port_in_range(port: i64) -> bool {
    (MIN_PORT..=MAX_PORT).contains(&port)
}

pub fn is_absolute_path(s: &str) -> bool {
    s.starts_with('/')
}

/// Exact, case-sensitive membership.
pub fn is_one_of(s: &str, allowed: &[&str]) -> bool {
    allowed.contains(&s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn identifiers() {
        for ok in ["web", "log_shipper", "a_b_c", "x"] {
            assert!(is_identifier(ok), "{ok} should be valid");
        }
        for bad in ["", "Web", "web1", "_web", "web_", "log__shipper", "web-app", "web app"] {
            assert!(!is_identifier(bad), "{bad:?} should be invalid");
        }
    }

    #[test]
    fn image_references() {
        assert!(is_image_reference("registry.bigbrother.io/app:v1"));
        assert!(is_image_reference("registry.bigbrother.io/my-app.v2:1.0.3_rc"));
        assert!(!is_image_reference("registry.bigbrother.io/app"));
        assert!(!is_image_reference("registry.bigbrother.io/app:"));
        assert!(!is_image_reference("registry.bigbrother.io/:v1"));
        assert!(!is_image_reference("registry.bigbrother.io/-app:v1"));
        assert!(!is_image_reference("docker.io/app:v1"));
        assert!(!is_image_reference("registry.bigbrotherXio/app:v1"));
        assert!(!is_image_reference("registry.bigbrother.io/team/app:v1"));
    }

    #[test]
    fn image_repository_needs_two_characters() {
        assert!(!is_image_reference("registry.bigbrother.io/a:v1"));
        assert!(is_image_reference("registry.bigbrother.io/ab:v1"));
    }

    #[test]
    fn memory_quantities() {
        for ok in ["512Mi", "1Gi", "64Ki", "0Mi"] {
            assert!(is_memory_quantity(ok), "{ok} should be valid");
        }
        for bad in ["512M", "512", "Mi", "1.5Gi", "512mi", "512Mi ", "-1Gi", "1Ti"] {
            assert!(!is_memory_quantity(bad), "{bad:?} should be invalid");
        }
    }

    #[test]
    fn integers() {
        assert_eq!(parse_int("8080"), Some(8080));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("+7"), Some(7));
        assert_eq!(parse_int("1.5"), None);
        assert_eq!(parse_int("two"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int(" 8"), None);
    }

    #[test]
    fn oversized_integers_saturate() {
        assert_eq!(parse_int("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_int("+99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_int("-99999999999999999999"), Some(i64::MIN));
        assert_eq!(parse_int("9223372036854775807"), Some(i64::MAX));
        assert!(!is_port_in_range(i64::MAX));
    }

    #[test]
    fn image_pattern_uses_registry_host() {
        let image = format!("{IMAGE_REGISTRY}/app:v1");
        assert!(is_image_reference(&image));
        let dotless = IMAGE_REGISTRY.replace('.', "x");
        assert!(!is_image_reference(&format!("{dotless}/app:v1")));
    }

    #[test]
    fn port_range_endpoints() {
        assert!(!is_port_in_range(0));
        assert!(is_port_in_range(1));
        assert!(is_port_in_range(65535));
        assert!(!is_port_in_range(65536));
        assert!(!is_port_in_range(-80));
    }

    #[test]
    fn absolute_paths() {
        assert!(is_absolute_path("/"));
        assert!(is_absolute_path("/healthz"));
        assert!(!is_absolute_path("healthz"));
        assert!(!is_absolute_path(""));
    }

    #[test]
    fn enum_membership_is_exact() {
        assert!(is_one_of("TCP", PROTOCOLS));
        assert!(!is_one_of("tcp", PROTOCOLS));
        assert!(!is_one_of("SCTP", PROTOCOLS));
        assert!(is_one_of("windows", OPERATING_SYSTEMS));
        assert!(is_one_of("v1", API_VERSIONS));
        assert!(is_one_of("Pod", KINDS));
        assert!(!is_one_of("pod", KINDS));
    }

    proptest! {
        #[test]
        fn digits_with_binary_suffix_are_memory(n in 0u64..10_000_000, unit in prop_oneof![Just("Gi"), Just("Mi"), Just("Ki")]) {
            let quantity = format!("{n}{unit}");
            prop_assert!(is_memory_quantity(&quantity));
        }

        #[test]
        fn every_port_in_range_is_accepted(port in 1i64..=65535) {
            prop_assert!(is_port_in_range(port));
            prop_assert_eq!(parse_int(&port.to_string()), Some(port));
        }

        #[test]
        fn ports_above_range_are_rejected(port in 65536i64..10_000_000) {
            prop_assert!(!is_port_in_range(port));
        }

        #[test]
        fn generated_identifiers_are_accepted(words in proptest::collection::vec("[a-z]{1,8}", 1..5)) {
            let name = words.join("_");
            prop_assert!(is_identifier(&name));
        }
    }
}
