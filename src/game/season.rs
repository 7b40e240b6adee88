use super::boost::Factors;
use chrono::{DateTime, Datelike, Utc};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn of(moment: DateTime<Utc>) -> Self {
        match moment.month() {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Autumn,
            _ => Self::Winter,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Autumn => "Autumn",
            Self::Winter => "Winter",
        }
    }

    pub fn factors(self) -> Factors {
        match self {
            Self::Spring => Factors::new(1.0, 1.1, 1.0),
            Self::Summer => Factors::new(1.2, 1.0, 1.0),
            Self::Autumn => Factors::new(1.0, 1.0, 1.1),
            Self::Winter => Factors::new(0.9, 1.2, 1.0),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn months_map_to_seasons() {
        let at = |month| Utc.with_ymd_and_hms(2026, month, 15, 12, 0, 0).unwrap();
        assert_eq!(Season::of(at(1)), Season::Winter);
        assert_eq!(Season::of(at(3)), Season::Spring);
        assert_eq!(Season::of(at(8)), Season::Summer);
        assert_eq!(Season::of(at(11)), Season::Autumn);
        assert_eq!(Season::of(at(12)), Season::Winter);
    }
}
