//! Ordering of version strings.
//!
//! A version is split into items at `.`, `-` and `_` and wherever digits meet letters, so
//! `1.0-rc2` becomes `[1, 0, rc, 2]`. Numeric items compare numerically and rank above every
//! qualifier; qualifiers compare by a fixed table:
//!
//! `alpha < beta < milestone < rc < snapshot < (release, ga, final, "") < sp < anything else`
//!
//! Unrecognised qualifiers compare lexically among themselves. A missing item compares as the
//! release level, and zero/release items directly before a qualifier or the end of the version are
//! dropped, so `1`, `1.0`, `1.0.0` and `1-ga` are all the same version.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Qualifier {
    Alpha,
    Beta,
    Milestone,
    ReleaseCandidate,
    Snapshot,
    Release,
    ServicePack,
    Other(String),
}

impl Qualifier {
    /// `a`, `b` and `m` are only aliases when a digit follows directly, as in `1.0-b2`.
    fn from_token(token: &str, before_digit: bool) -> Self {
        match token {
            "alpha" => Self::Alpha,
            "a" if before_digit => Self::Alpha,
            "beta" => Self::Beta,
            "b" if before_digit => Self::Beta,
            "milestone" => Self::Milestone,
            "m" if before_digit => Self::Milestone,
            "rc" | "cr" => Self::ReleaseCandidate,
            "snapshot" => Self::Snapshot,
            "" | "ga" | "final" | "release" => Self::Release,
            "sp" => Self::ServicePack,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Item {
    /// Decimal digits with leading zeros stripped; zero is `"0"`.
    Number(String),
    Qualifier(Qualifier),
}

/// What a missing item compares as.
const PADDING: Item = Item::Qualifier(Qualifier::Release);

impl Item {
    fn number(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        Self::Number(if trimmed.is_empty() { "0" } else { trimmed }.to_string())
    }

    fn is_null(&self) -> bool {
        match self {
            Self::Number(digits) => digits == "0",
            Self::Qualifier(qualifier) => *qualifier == Qualifier::Release,
        }
    }
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // Without leading zeros, a longer digit string is a larger number.
            (Self::Number(a), Self::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Self::Number(_), Self::Qualifier(_)) => Ordering::Greater,
            (Self::Qualifier(_), Self::Number(_)) => Ordering::Less,
            (Self::Qualifier(a), Self::Qualifier(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A comparable version string. Every string is a valid version.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    items: Vec<Item>,
}

impl Version {
    pub fn parse<S: AsRef<str>>(version: S) -> Self {
        let raw = version.as_ref().to_string();
        let items = normalize(tokenize(&raw.to_ascii_lowercase()));
        Self { raw, items }
    }

    /// The version exactly as it was written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this is a mutable `-SNAPSHOT` version: `snapshot` (any case) as the whole version or
    /// as a separate trailing item.
    pub fn is_snapshot(&self) -> bool {
        let raw = self.raw.to_ascii_lowercase();
        let delimited = raw
            .strip_suffix("snapshot")
            .is_some_and(|rest| rest.is_empty() || rest.ends_with(['.', '-', '_']));
        delimited && self.items.last() == Some(&Item::Qualifier(Qualifier::Snapshot))
    }
}

fn tokenize(version: &str) -> Vec<Item> {
    fn flush(items: &mut Vec<Item>, token: &mut String, numeric: bool, before_digit: bool) {
        if token.is_empty() {
            return;
        }
        let token = std::mem::take(token);
        items.push(if numeric {
            Item::number(&token)
        } else {
            Item::Qualifier(Qualifier::from_token(&token, before_digit))
        });
    }

    let mut items = Vec::new();
    let mut token = String::new();
    let mut numeric = false;
    for c in version.chars() {
        if matches!(c, '.' | '-' | '_') {
            flush(&mut items, &mut token, numeric, false);
            continue;
        }
        let digit = c.is_ascii_digit();
        if !token.is_empty() && digit != numeric {
            flush(&mut items, &mut token, numeric, digit);
        }
        numeric = digit;
        token.push(c);
    }
    flush(&mut items, &mut token, numeric, false);
    items
}

/// Drop null items that are followed by a qualifier or by nothing at all.
fn normalize(items: Vec<Item>) -> Vec<Item> {
    let mut kept: Vec<Item> = Vec::with_capacity(items.len());
    for item in items.into_iter().rev() {
        let followed_by_number = matches!(kept.last(), Some(Item::Number(_)));
        if item.is_null() && !followed_by_number {
            continue;
        }
        kept.push(item);
    }
    kept.reverse();
    kept
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.items.len().max(other.items.len());
        (0..len)
            .map(|k| {
                let a = self.items.get(k).unwrap_or(&PADDING);
                let b = other.items.get(k).unwrap_or(&PADDING);
                a.cmp(b)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.items.hash(state);
    }
}

impl std::str::FromStr for Version {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod test_version_order {
    use super::*;
    use rstest::rstest;

    const ASCENDING: &[&str] = &[
        "1.0-alpha1",
        "1.0-alpha2",
        "1.0-beta1",
        "1.0-m1",
        "1.0-rc1",
        "1.0-SNAPSHOT",
        "1.0",
        "1.0-sp1",
        "1.0-zeta",
        "1.0.1",
        "1.1",
        "2",
        "10",
        "10.0.0.1",
        "99999999999999999999999",
    ];

    fn v(s: &str) -> Version {
        Version::parse(s)
    }

    #[rstest]
    #[case("1", "1.0")]
    #[case("1.0", "1.0.0")]
    #[case("1-ga", "1")]
    #[case("1.0-final", "1")]
    #[case("1.01", "1.1")]
    #[case("1.0-RC1", "1.0-cr1")]
    #[case("1.0-Alpha-1", "1.0-a1")]
    fn equivalent_versions(#[case] a: &str, #[case] b: &str) {
        assert_eq!(v(a), v(b));
        assert_eq!(v(a).cmp(&v(b)), Ordering::Equal);
    }

    #[rstest]
    #[case("1.0-alpha-1", "1.0-alpha-2")]
    #[case("1.0-alpha", "1.0")]
    #[case("1.0", "1.0-sp")]
    #[case("1.0-sp", "1.0.1")]
    #[case("1.9", "1.10")]
    #[case("1.0-abc", "1.0-abd")]
    #[case("1.0-snapshot", "1.0")]
    fn strictly_ordered(#[case] lower: &str, #[case] higher: &str) {
        assert!(v(lower) < v(higher), "{lower} should be below {higher}");
        assert!(v(higher) > v(lower), "{higher} should be above {lower}");
    }

    #[test]
    fn ascending_table_is_strictly_increasing() {
        for pair in ASCENDING.windows(2) {
            assert!(v(pair[0]) < v(pair[1]), "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn order_is_total_and_antisymmetric() {
        for a in ASCENDING {
            for b in ASCENDING {
                let (a, b) = (v(a), v(b));
                let lt = a < b;
                let gt = b < a;
                if a == b {
                    assert!(!lt && !gt);
                } else {
                    assert!(lt ^ gt, "exactly one of {a} < {b} or {b} < {a}");
                }
            }
        }
    }

    #[test]
    fn order_is_transitive() {
        let versions = ASCENDING.iter().map(|s| v(s)).collect::<Vec<_>>();
        for a in &versions {
            for b in &versions {
                for c in &versions {
                    if a <= b && b <= c {
                        assert!(a <= c, "{a} <= {b} <= {c}");
                    }
                }
            }
        }
    }

    #[test]
    fn sorting_recovers_ascending_order() {
        let mut shuffled = ASCENDING.iter().rev().map(|s| v(s)).collect::<Vec<_>>();
        shuffled.swap(0, 5);
        shuffled.swap(3, 9);
        shuffled.sort();
        let sorted = shuffled.iter().map(Version::as_str).collect::<Vec<_>>();
        assert_eq!(sorted, ASCENDING);
    }

    #[rstest]
    #[case("1.0-SNAPSHOT", true)]
    #[case("2.3.4-snapshot", true)]
    #[case("1.0", false)]
    #[case("1.0-rc1", false)]
    #[case("1.0.SNAPSHOT", true)]
    #[case("1.0-nonsnapshot", false)]
    #[case("1.0snapshot", false)]
    #[case("1.0-snapshot-1", false)]
    fn snapshot_detection(#[case] version: &str, #[case] snapshot: bool) {
        assert_eq!(v(version).is_snapshot(), snapshot);
    }

    #[test]
    fn display_preserves_original_text() {
        assert_eq!(v("1.0-RC1").to_string(), "1.0-RC1");
    }
}
