use crate::monitor::report::{
    definition_table, snapshot_table, statistics_tables, PoolList, PoolListRow, PoolReport,
};
use crate::pool::facade::PoolFacade;
use crate::utils::error::{PoolscopeError, Result};

/// Fully-built monitor view, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorView {
    List(PoolList),
    Stats(PoolReport),
}

/// Decide which view a request gets and build it.
///
/// No alias and exactly one pool: that pool's stats. No alias otherwise,
/// or an alias that doesn't resolve: the pool list. Anything else the
/// facade reports is a real fault and propagates to the caller.
pub fn resolve_view(requested: Option<&str>, facade: &dyn PoolFacade) -> Result<MonitorView> {
    let aliases = facade.aliases();
    let selected = select_alias(requested, &aliases);

    if let Some(alias) = &selected {
        match facade.definition(alias) {
            Ok(_) => return build_stats(alias, facade),
            Err(PoolscopeError::UnknownAlias(_)) => {}
            Err(e) => return Err(e),
        }
    }

    build_list(selected, &aliases, facade)
}

/// Build the pool list directly, keeping the resolved alias highlighted.
/// Used when the request asks for the list explicitly.
pub fn list_view(requested: Option<&str>, facade: &dyn PoolFacade) -> Result<MonitorView> {
    let aliases = facade.aliases();
    let selected = select_alias(requested, &aliases);
    build_list(selected, &aliases, facade)
}

fn select_alias(requested: Option<&str>, aliases: &[String]) -> Option<String> {
    match requested {
        Some(alias) => Some(alias.to_string()),
        None if aliases.len() == 1 => Some(aliases[0].clone()),
        None => None,
    }
}

fn build_stats(alias: &str, facade: &dyn PoolFacade) -> Result<MonitorView> {
    let definition = facade.definition(alias)?;
    let snapshot = facade.snapshot(alias)?;
    let statistics = facade.statistics(alias)?;

    Ok(MonitorView::Stats(PoolReport {
        alias: alias.to_string(),
        definition: definition_table(&definition),
        snapshot: snapshot_table(&snapshot, &definition),
        statistics: statistics_tables(&statistics, &snapshot),
    }))
}

fn build_list(
    selected: Option<String>,
    aliases: &[String],
    facade: &dyn PoolFacade,
) -> Result<MonitorView> {
    let mut rows = Vec::with_capacity(aliases.len());
    for alias in aliases {
        let definition = facade.definition(alias)?;
        rows.push(PoolListRow {
            alias: alias.clone(),
            url: definition.url,
        });
    }
    Ok(MonitorView::List(PoolList { selected, rows }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::types::{PoolDefinition, PoolSnapshot, PoolStatistics};
    use chrono::Utc;
    use std::time::Duration;

    /// Facade stub over a fixed set of aliases.
    struct FixedPools(Vec<String>);

    impl FixedPools {
        fn new(aliases: &[&str]) -> Self {
            Self(aliases.iter().map(|a| a.to_string()).collect())
        }
    }

    impl PoolFacade for FixedPools {
        fn aliases(&self) -> Vec<String> {
            self.0.clone()
        }

        fn definition(&self, alias: &str) -> Result<PoolDefinition> {
            if !self.0.iter().any(|a| a == alias) {
                return Err(PoolscopeError::UnknownAlias(alias.to_string()));
            }
            Ok(PoolDefinition {
                alias: alias.to_string(),
                url: format!("postgres://db/{}", alias),
                driver: "postgres".to_string(),
                minimum_connection_count: 1,
                maximum_connection_count: 5,
                prototype_count: 0,
                maximum_connection_lifetime: Duration::from_secs(3600),
                maximum_active_time: Duration::from_secs(60),
                house_keeping_sleep_time: Duration::from_secs(30),
                house_keeping_test_statement: None,
                fatal_exceptions: Vec::new(),
                statistics: None,
            })
        }

        fn snapshot(&self, alias: &str) -> Result<PoolSnapshot> {
            self.definition(alias)?;
            Ok(PoolSnapshot {
                snapshot_date: Utc::now(),
                date_started: Utc::now(),
                active_connection_count: 0,
                available_connection_count: 0,
                offline_connection_count: 0,
                maximum_connection_count: 5,
                served_count: 0,
                refused_count: 0,
            })
        }

        fn statistics(&self, alias: &str) -> Result<Vec<PoolStatistics>> {
            self.definition(alias)?;
            Ok(Vec::new())
        }
    }

    #[test]
    fn no_alias_and_no_pools_resolves_to_empty_list() {
        let view = resolve_view(None, &FixedPools::new(&[])).unwrap();
        let MonitorView::List(list) = view else {
            panic!("expected the list view");
        };
        assert!(list.rows.is_empty());
        assert_eq!(list.selected, None);
    }

    #[test]
    fn no_alias_with_one_pool_resolves_to_its_stats() {
        let view = resolve_view(None, &FixedPools::new(&["orders"])).unwrap();
        let MonitorView::Stats(report) = view else {
            panic!("expected the stats view");
        };
        assert_eq!(report.alias, "orders");
    }

    #[test]
    fn no_alias_with_many_pools_resolves_to_list() {
        let view = resolve_view(None, &FixedPools::new(&["orders", "billing"])).unwrap();
        let MonitorView::List(list) = view else {
            panic!("expected the list view");
        };
        assert_eq!(list.rows.len(), 2);
        assert_eq!(list.rows[0].alias, "orders");
        assert_eq!(list.rows[0].url, "postgres://db/orders");
    }

    #[test]
    fn unknown_alias_falls_back_to_list() {
        // Regardless of how many pools exist.
        let view = resolve_view(Some("db1"), &FixedPools::new(&["db2"])).unwrap();
        let MonitorView::List(list) = view else {
            panic!("expected the list view");
        };
        assert_eq!(list.rows.len(), 1);
        assert_eq!(list.rows[0].alias, "db2");

        let view = resolve_view(Some("nope"), &FixedPools::new(&["a", "b", "c"])).unwrap();
        assert!(matches!(view, MonitorView::List(_)));
    }

    #[test]
    fn known_alias_resolves_to_its_stats() {
        let view = resolve_view(Some("billing"), &FixedPools::new(&["orders", "billing"])).unwrap();
        let MonitorView::Stats(report) = view else {
            panic!("expected the stats view");
        };
        assert_eq!(report.alias, "billing");
    }
}
