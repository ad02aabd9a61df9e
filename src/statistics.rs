use crate::grid::Position;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Outcome of one navigate call.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationSummary {
    pub planner: String,
    pub start: Position,
    pub target: Position,
    pub route: Vec<Position>,
    pub optimal_route_length: Option<usize>,
    pub nodes_expanded: usize,
    pub planning_time_us: u64,
    pub commands: String,
    pub turns: usize,
    pub stopped_steps: usize,
    pub arrived: bool,
}

impl NavigationSummary {
    pub fn route_length(&self) -> usize {
        self.route.len()
    }

    pub fn planning_time(&self) -> Duration {
        Duration::from_micros(self.planning_time_us)
    }

    /// Route length over the shortest possible length; 1.0 is optimal.
    pub fn route_efficiency(&self) -> Option<f64> {
        match self.optimal_route_length {
            Some(optimal) if optimal > 0 => Some(self.route.len() as f64 / optimal as f64),
            _ => None,
        }
    }
}

impl fmt::Display for NavigationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Planner: {}", self.planner)?;
        writeln!(f, "From {} to {}", self.start, self.target)?;
        writeln!(f, "Route Length: {}", self.route_length())?;
        if let Some(optimal) = self.optimal_route_length {
            writeln!(f, "Optimal Route Length (A*): {}", optimal)?;
        }
        if let Some(efficiency) = self.route_efficiency() {
            writeln!(f, "Route Efficiency: {:.3}", efficiency)?;
            if efficiency > 1.0 {
                writeln!(
                    f,
                    "Extra moves over the shortest route: {}",
                    self.route_length().saturating_sub(self.optimal_route_length.unwrap_or(0))
                )?;
            }
        }
        writeln!(f, "Cells Expanded: {}", self.nodes_expanded)?;
        writeln!(f, "Planning Time: {:.2?}", self.planning_time())?;
        writeln!(f, "Commands Issued: {} ({} turns)", self.commands.len(), self.turns)?;
        if self.stopped_steps > 0 {
            writeln!(f, "Blocked Steps: {}", self.stopped_steps)?;
        }
        writeln!(f, "Arrived: {}", if self.arrived { "yes" } else { "no" })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(route_len: i64, optimal: Option<usize>) -> NavigationSummary {
        NavigationSummary {
            planner: "backtracking".to_string(),
            start: Position::new(0, 0),
            target: Position::new(route_len, 0),
            route: (1..=route_len).map(|x| Position::new(x, 0)).collect(),
            optimal_route_length: optimal,
            nodes_expanded: 12,
            planning_time_us: 1500,
            commands: "RFFF".to_string(),
            turns: 1,
            stopped_steps: 0,
            arrived: true,
        }
    }

    #[test]
    fn efficiency_compares_against_optimal_length() {
        assert_eq!(summary(6, Some(4)).route_efficiency(), Some(1.5));
        assert_eq!(summary(4, Some(4)).route_efficiency(), Some(1.0));
        assert_eq!(summary(0, Some(0)).route_efficiency(), None);
        assert_eq!(summary(3, None).route_efficiency(), None);
    }

    #[test]
    fn display_reports_extra_moves() {
        let text = summary(6, Some(4)).to_string();
        assert!(text.contains("Route Length: 6"));
        assert!(text.contains("Optimal Route Length (A*): 4"));
        assert!(text.contains("Extra moves over the shortest route: 2"));
        assert!(text.contains("Arrived: yes"));
        assert!(!text.contains("Blocked Steps"));
    }
}
