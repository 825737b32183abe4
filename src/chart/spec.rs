use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 24-bit RGB color, written as 6 hex digits in chart links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Rgb {
    type Err = ChartSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 6 || !s.is_ascii() {
            return Err(ChartSpecError::InvalidColor(s.to_string()));
        }
        let channel = |range| {
            u8::from_str_radix(&s[range], 16)
                .map_err(|_| ChartSpecError::InvalidColor(s.to_string()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One colored band of a bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSegment {
    pub color: Rgb,
    pub length: u64,
}

/// Why a chart specification was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartSpecError {
    #[error("chart has no segments")]
    NoSegments,

    #[error("segment mismatch: {colors} colors but {lengths} lengths")]
    SegmentMismatch { colors: usize, lengths: usize },

    #[error("invalid color '{0}': expected 6 hex digits")]
    InvalidColor(String),

    #[error("invalid segment length '{0}'")]
    InvalidLength(String),

    #[error("normalization length must be positive")]
    ZeroFullLength,

    #[error("missing division count")]
    MissingDivisions,

    #[error("invalid division count '{0}'")]
    InvalidDivisions(String),

    #[error("division count must be positive")]
    ZeroDivisions,
}

/// Complete description of one proportion bar chart.
///
/// The first segment is the background band: it is drawn across the full
/// canvas and its length is the denominator every other segment is scaled
/// against. The query-string form (`c`/`l`/`d` parameters) is the wire
/// encoding used both by emitted `<img>` links and by the chart endpoint;
/// `decode` and `to_query` are inverses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub segments: Vec<ChartSegment>,
    pub divisions: u32,
}

impl ChartSpec {
    /// Build a spec from raw request parameters.
    ///
    /// `colors` and `lengths` are the repeated `c`/`l` values in order;
    /// `divisions` is the single `d` value. Every malformed input maps to
    /// its own `ChartSpecError` reason; nothing is drawn on failure.
    pub fn decode(
        colors: &[String],
        lengths: &[String],
        divisions: Option<&str>,
    ) -> Result<Self, ChartSpecError> {
        if colors.is_empty() {
            return Err(ChartSpecError::NoSegments);
        }
        if colors.len() != lengths.len() {
            return Err(ChartSpecError::SegmentMismatch {
                colors: colors.len(),
                lengths: lengths.len(),
            });
        }

        let mut segments = Vec::with_capacity(colors.len());
        for (color, length) in colors.iter().zip(lengths) {
            let color = color.parse()?;
            let length = length
                .parse()
                .map_err(|_| ChartSpecError::InvalidLength(length.clone()))?;
            segments.push(ChartSegment { color, length });
        }

        let divisions = divisions.ok_or(ChartSpecError::MissingDivisions)?;
        let divisions = divisions
            .parse()
            .map_err(|_| ChartSpecError::InvalidDivisions(divisions.to_string()))?;

        let spec = Self {
            segments,
            divisions,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check the invariants the renderer relies on.
    pub fn validate(&self) -> Result<(), ChartSpecError> {
        let full = self
            .segments
            .first()
            .ok_or(ChartSpecError::NoSegments)?
            .length;
        if full == 0 {
            return Err(ChartSpecError::ZeroFullLength);
        }
        if self.divisions == 0 {
            return Err(ChartSpecError::ZeroDivisions);
        }
        Ok(())
    }

    /// Normalization denominator: the background segment's length.
    pub fn full_length(&self) -> u64 {
        self.segments.first().map(|s| s.length).unwrap_or(0)
    }

    /// Wire encoding, e.g. `action=chart&c=eeeeee&c=ff0000&l=10&l=3&d=10`.
    pub fn to_query(&self) -> String {
        let mut query = String::from("action=chart");
        for segment in &self.segments {
            query.push_str("&c=");
            query.push_str(&segment.color.to_string());
        }
        for segment in &self.segments {
            query.push_str("&l=");
            query.push_str(&segment.length.to_string());
        }
        query.push_str("&d=");
        query.push_str(&self.divisions.to_string());
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn decodes_a_two_segment_chart() {
        let spec = ChartSpec::decode(
            &strings(&["eeeeee", "0000ff"]),
            &strings(&["100", "37"]),
            Some("10"),
        )
        .unwrap();

        assert_eq!(spec.segments.len(), 2);
        assert_eq!(spec.segments[0].color, Rgb::new(0xee, 0xee, 0xee));
        assert_eq!(spec.segments[1].color, Rgb::new(0, 0, 0xff));
        assert_eq!(spec.full_length(), 100);
        assert_eq!(spec.divisions, 10);
    }

    #[test]
    fn each_failure_has_its_own_reason() {
        let colors = strings(&["eeeeee", "0000ff"]);
        let lengths = strings(&["100", "37"]);

        assert_eq!(
            ChartSpec::decode(&[], &[], Some("10")),
            Err(ChartSpecError::NoSegments)
        );
        assert_eq!(
            ChartSpec::decode(&colors, &strings(&["100"]), Some("10")),
            Err(ChartSpecError::SegmentMismatch {
                colors: 2,
                lengths: 1
            })
        );
        assert_eq!(
            ChartSpec::decode(&strings(&["red", "0000ff"]), &lengths, Some("10")),
            Err(ChartSpecError::InvalidColor("red".to_string()))
        );
        assert_eq!(
            ChartSpec::decode(&colors, &strings(&["100", "-4"]), Some("10")),
            Err(ChartSpecError::InvalidLength("-4".to_string()))
        );
        assert_eq!(
            ChartSpec::decode(&colors, &strings(&["0", "37"]), Some("10")),
            Err(ChartSpecError::ZeroFullLength)
        );
        assert_eq!(
            ChartSpec::decode(&colors, &lengths, None),
            Err(ChartSpecError::MissingDivisions)
        );
        assert_eq!(
            ChartSpec::decode(&colors, &lengths, Some("ten")),
            Err(ChartSpecError::InvalidDivisions("ten".to_string()))
        );
        assert_eq!(
            ChartSpec::decode(&colors, &lengths, Some("0")),
            Err(ChartSpecError::ZeroDivisions)
        );
    }

    #[test]
    fn query_encoding_round_trips() {
        let spec = ChartSpec {
            segments: vec![
                ChartSegment {
                    color: Rgb::new(0xee, 0xee, 0xee),
                    length: 20,
                },
                ChartSegment {
                    color: Rgb::new(0xff, 0, 0),
                    length: 7,
                },
                ChartSegment {
                    color: Rgb::new(0, 0xff, 0),
                    length: 5,
                },
            ],
            divisions: 20,
        };

        let query = spec.to_query();
        assert_eq!(query, "action=chart&c=eeeeee&c=ff0000&c=00ff00&l=20&l=7&l=5&d=20");

        let pairs: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        let colors: Vec<String> = pairs
            .iter()
            .filter(|(k, _)| k == "c")
            .map(|(_, v)| v.clone())
            .collect();
        let lengths: Vec<String> = pairs
            .iter()
            .filter(|(k, _)| k == "l")
            .map(|(_, v)| v.clone())
            .collect();
        let divisions = pairs.iter().find(|(k, _)| k == "d").map(|(_, v)| v.clone());

        let decoded = ChartSpec::decode(&colors, &lengths, divisions.as_deref()).unwrap();
        assert_eq!(decoded, spec);
    }
}
