use crate::chart::{ChartSegment, ChartSpec, Rgb};
use crate::monitor::format;
use crate::pool::types::{PoolDefinition, PoolSnapshot, PoolStatistics};

pub const COLOR_BACKGROUND: Rgb = Rgb::new(0xee, 0xee, 0xee);
pub const COLOR_ACTIVE: Rgb = Rgb::new(0xff, 0x00, 0x00);
pub const COLOR_AVAILABLE: Rgb = Rgb::new(0x00, 0xff, 0x00);
pub const COLOR_ACTIVITY: Rgb = Rgb::new(0x00, 0x00, 0xff);

/// One labelled report row. `Off` marks a feature that is disabled or has
/// no value; the renderer shows it as the dimmed sentinel "off".
#[derive(Debug, Clone, PartialEq)]
pub enum RowValue {
    Off,
    Text(String),
    Connections(ConnectionsCell),
    Activity(ActivityCell),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub label: String,
    pub value: RowValue,
}

impl ReportRow {
    fn new(label: &str, value: RowValue) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }

    fn text(label: &str, value: impl Into<String>) -> Self {
        Self::new(label, RowValue::Text(value.into()))
    }

    /// Text when present, "off" otherwise.
    fn optional(label: &str, value: Option<String>) -> Self {
        match value {
            Some(value) => Self::text(label, value),
            None => Self::new(label, RowValue::Off),
        }
    }
}

/// Composite connection-counts cell with its embedded chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionsCell {
    pub active: u32,
    pub available: u32,
    pub offline: u32,
    pub maximum: u32,
    pub chart: ChartSpec,
}

/// Activity percentage cell with its embedded chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityCell {
    pub percent: u32,
    pub chart: ChartSpec,
}

/// One rendered table: "<heading> <detail>" above rows of label/value.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub heading: String,
    pub detail: String,
    pub rows: Vec<ReportRow>,
}

/// Everything the Stats view shows for one pool.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolReport {
    pub alias: String,
    pub definition: ReportTable,
    pub snapshot: ReportTable,
    pub statistics: Vec<ReportTable>,
}

/// The pool-selection view: one row per known pool.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolList {
    pub selected: Option<String>,
    pub rows: Vec<PoolListRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PoolListRow {
    pub alias: String,
    pub url: String,
}

pub fn definition_table(definition: &PoolDefinition) -> ReportTable {
    let rows = vec![
        ReportRow::text("URL", &definition.url),
        ReportRow::text("Driver", &definition.driver),
        ReportRow::text(
            "Connections",
            format!(
                "{} (min), {} (max)",
                definition.minimum_connection_count, definition.maximum_connection_count
            ),
        ),
        ReportRow::optional(
            "Prototyping",
            (definition.prototype_count > 0).then(|| definition.prototype_count.to_string()),
        ),
        ReportRow::text(
            "Connection lifetime",
            format::elapsed_clock(definition.maximum_connection_lifetime),
        ),
        ReportRow::text(
            "Maximum active time",
            format::elapsed_clock(definition.maximum_active_time),
        ),
        ReportRow::text(
            "Housekeeping sleep",
            format::whole_seconds(definition.house_keeping_sleep_time),
        ),
        ReportRow::optional(
            "Housekeeping test statement",
            definition.house_keeping_test_statement.clone(),
        ),
        ReportRow::optional(
            "Fatal exceptions",
            (!definition.fatal_exceptions.is_empty())
                .then(|| definition.fatal_exceptions.join(", ")),
        ),
        ReportRow::optional("Statistics", definition.statistics.clone()),
    ];

    ReportTable {
        heading: "Definition".to_string(),
        detail: format!("for {}", definition.alias),
        rows,
    }
}

pub fn snapshot_table(snapshot: &PoolSnapshot, definition: &PoolDefinition) -> ReportTable {
    let chart = ChartSpec {
        segments: vec![
            ChartSegment {
                color: COLOR_BACKGROUND,
                length: u64::from(definition.maximum_connection_count),
            },
            ChartSegment {
                color: COLOR_ACTIVE,
                length: u64::from(snapshot.active_connection_count),
            },
            ChartSegment {
                color: COLOR_AVAILABLE,
                length: u64::from(snapshot.available_connection_count),
            },
        ],
        divisions: definition.maximum_connection_count,
    };

    let rows = vec![
        ReportRow::text("Start date", format::full_date(snapshot.date_started)),
        ReportRow::new(
            "Connections",
            RowValue::Connections(ConnectionsCell {
                active: snapshot.active_connection_count,
                available: snapshot.available_connection_count,
                offline: snapshot.offline_connection_count,
                maximum: snapshot.maximum_connection_count,
                chart,
            }),
        ),
        ReportRow::text("Served", snapshot.served_count.to_string()),
        ReportRow::text("Refused", snapshot.refused_count.to_string()),
    ];

    ReportTable {
        heading: "Snapshot".to_string(),
        detail: format!("at {}", format::clock_time(snapshot.snapshot_date)),
        rows,
    }
}

pub fn statistics_tables(
    statistics: &[PoolStatistics],
    snapshot: &PoolSnapshot,
) -> Vec<ReportTable> {
    statistics
        .iter()
        .map(|window| statistics_table(window, snapshot.maximum_connection_count))
        .collect()
}

fn statistics_table(window: &PoolStatistics, maximum_connection_count: u32) -> ReportTable {
    let activity = if maximum_connection_count > 0 {
        let percent =
            (100.0 * window.average_active_count / f64::from(maximum_connection_count)) as u32;
        RowValue::Activity(ActivityCell {
            percent,
            chart: ChartSpec {
                segments: vec![
                    ChartSegment {
                        color: COLOR_BACKGROUND,
                        length: 100,
                    },
                    ChartSegment {
                        color: COLOR_ACTIVITY,
                        length: u64::from(percent),
                    },
                ],
                divisions: 10,
            },
        })
    } else {
        RowValue::Off
    };

    let rows = vec![
        ReportRow::text(
            "Served",
            format!(
                "{} ({}/s)",
                window.served_count,
                format::decimal(window.served_per_second)
            ),
        ),
        ReportRow::text(
            "Refused",
            format!(
                "{} ({}/s)",
                window.refused_count,
                format::decimal(window.refused_per_second)
            ),
        ),
        ReportRow::text(
            "Average active time",
            format::seconds(window.average_active_time),
        ),
        ReportRow::new("Activity level", activity),
    ];

    ReportTable {
        heading: "Statistics".to_string(),
        detail: format!(
            "from {} to {}",
            format::clock_time(window.start_date),
            format::clock_time(window.stop_date)
        ),
        rows,
    }
}
