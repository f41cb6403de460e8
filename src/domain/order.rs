use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Direction used by every time-based comparison in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderingPolicy {
    Ascending,
    #[default]
    Descending,
}

impl OrderingPolicy {
    /// Case-insensitive lookup: `asc`/`ascending` and `desc`/`descending`.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        match name.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(Error::InvalidOrderingName {
                name: name.to_string(),
            }),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Ordering that keeps an already well-placed pair where it is.
    pub fn pass(self) -> Ordering {
        match self {
            Self::Ascending => Ordering::Less,
            Self::Descending => Ordering::Greater,
        }
    }

    /// Ordering that swaps the pair; always `opposite().pass()`.
    pub fn fail(self) -> Ordering {
        self.opposite().pass()
    }

    /// Turns a chronological comparison of `a` against `b` into policy order.
    pub fn apply(self, chronological: Ordering) -> Ordering {
        match chronological {
            Ordering::Equal => Ordering::Equal,
            Ordering::Less => self.pass(),
            Ordering::Greater => self.fail(),
        }
    }
}

impl FromStr for OrderingPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for OrderingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("ascending"),
            Self::Descending => f.write_str("descending"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_insensitive() {
        for name in ["asc", "ASC", "Ascending", "ascending"] {
            assert_eq!(OrderingPolicy::from_name(name), Ok(OrderingPolicy::Ascending));
        }
        for name in ["desc", "DESC", "Descending", "descending"] {
            assert_eq!(OrderingPolicy::from_name(name), Ok(OrderingPolicy::Descending));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = OrderingPolicy::from_name("newest").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidOrderingName {
                name: "newest".into()
            }
        );
        assert!("".parse::<OrderingPolicy>().is_err());
    }

    #[test]
    fn opposite_is_an_involution() {
        for p in [OrderingPolicy::Ascending, OrderingPolicy::Descending] {
            assert_ne!(p.opposite(), p);
            assert_eq!(p.opposite().opposite(), p);
            assert_eq!(p.fail(), p.pass().reverse());
        }
    }

    #[test]
    fn apply_follows_direction() {
        let asc = OrderingPolicy::Ascending;
        let desc = OrderingPolicy::Descending;
        assert_eq!(asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for p in [OrderingPolicy::Ascending, OrderingPolicy::Descending] {
            assert_eq!(p.to_string().parse::<OrderingPolicy>(), Ok(p));
        }
    }
}
