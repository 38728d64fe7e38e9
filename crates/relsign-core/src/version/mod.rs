//! Release version handling
//!
//! Versions are compared the lenient way release scripts do: the first
//! three numeric components, missing ones read as zero, suffixes ignored.

mod bump;

use regex::Regex;
use std::sync::LazyLock;

pub use bump::{
    GRADLE_SCRIPT, PUBSPEC_FILE, PubspecVersion, VersionBump, VersionCodeBump, apply_bump,
    bump_version, increment_version_code, read_pubspec_version, write_pubspec_version,
};

static VERSION_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+){0,2}([.-].*)?$").unwrap());

/// Parse a semantic-like version into three integers.
///
/// Components are split on `.`, `+` and `-`. Non-numeric components
/// contribute their leading digits, or nothing. The result is padded with
/// zeros and truncated to three components. A component too large for a
/// `u64` saturates to `u64::MAX` and keeps its position.
pub fn parse_version(version: &str) -> [u64; 3] {
    let mut out = [0; 3];
    for (slot, digits) in out.iter_mut().zip(numeric_components(version)) {
        *slot = digits.parse().unwrap_or(u64::MAX);
    }
    out
}

/// Whether `new` is strictly greater than `current`.
///
/// Components are compared by exact numeric value, however many digits
/// they have.
pub fn is_newer_version(new: &str, current: &str) -> bool {
    magnitudes(new) > magnitudes(current)
}

fn numeric_components(version: &str) -> impl Iterator<Item = &str> {
    version.trim().split(['.', '+', '-']).filter_map(|part| {
        let end = part
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(part.len());
        (end > 0).then(|| &part[..end])
    })
}

/// Digit strings without leading zeros, ordered by length then text.
fn magnitudes(version: &str) -> [(usize, &str); 3] {
    let mut out = [(0, ""); 3];
    for (slot, digits) in out.iter_mut().zip(numeric_components(version)) {
        let significant = digits.trim_start_matches('0');
        *slot = (significant.len(), significant);
    }
    out
}

/// Whether `version` looks like a numeric version (`1`, `1.2`, `1.2.3`, `1.2.3-beta`).
pub fn is_valid_version(version: &str) -> bool {
    VERSION_FORMAT.is_match(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.2.3", [1, 2, 3])]
    #[case("1.4", [1, 4, 0])]
    #[case("2", [2, 0, 0])]
    #[case("1.2.3+45", [1, 2, 3])]
    #[case("1.2.3-beta.1", [1, 2, 3])]
    #[case("1.2rc1.7", [1, 2, 7])]
    #[case("v1.2", [2, 0, 0])]
    #[case(" 3.0.1 ", [3, 0, 1])]
    #[case("", [0, 0, 0])]
    #[case("99999999999999999999.1.2", [u64::MAX, 1, 2])]
    #[case("1.99999999999999999999.0", [1, u64::MAX, 0])]
    #[case("007.08.0009", [7, 8, 9])]
    fn parses_versions(#[case] input: &str, #[case] expected: [u64; 3]) {
        assert_eq!(parse_version(input), expected);
    }

    #[rstest]
    #[case("1.2.4", "1.2.3", true)]
    #[case("1.10.0", "1.9.9", true)]
    #[case("2", "1.99.99", true)]
    #[case("1.2.3", "1.2.3", false)]
    #[case("1.2.3+2", "1.2.3+1", false)]
    #[case("1.2", "1.2.1", false)]
    #[case("1.99999999999999999999.0", "1.5.0", true)]
    #[case("99999999999999999999", "99999999999999999998.9", true)]
    #[case("99999999999999999998", "99999999999999999999", false)]
    #[case("1.002.0", "1.2.0", false)]
    #[case("1.010", "1.9", true)]
    fn compares_versions(#[case] new: &str, #[case] current: &str, #[case] expected: bool) {
        assert_eq!(is_newer_version(new, current), expected);
    }

    #[rstest]
    #[case("1", true)]
    #[case("1.2", true)]
    #[case("1.2.3", true)]
    #[case("1.2.3-beta", true)]
    #[case("1.2.3+7", true)]
    #[case("1.2.3.4", true)]
    #[case("v1.2.3", false)]
    #[case("-1", false)]
    #[case("", false)]
    #[case("latest", false)]
    fn validates_version_format(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_valid_version(input), expected);
    }
}
