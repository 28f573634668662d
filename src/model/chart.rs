//! Presentation metadata for whatever draws the trajectories.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Compartment {
    Susceptible,
    Exposed,
    Infected,
    Recovered,
}

impl Compartment {
    pub const ALL: [Compartment; 4] = [
        Compartment::Susceptible,
        Compartment::Exposed,
        Compartment::Infected,
        Compartment::Recovered,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Compartment::Susceptible => "Susceptible",
            Compartment::Exposed => "Exposed",
            Compartment::Infected => "Infected",
            Compartment::Recovered => "Recovered",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Compartment::Susceptible => "blue",
            Compartment::Exposed => "yellow",
            Compartment::Infected => "red",
            Compartment::Recovered => "green",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesStyle {
    pub compartment: Compartment,
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<SeriesStyle>,
}

impl ChartSpec {
    pub fn seir() -> Self {
        Self {
            title: "SEIR Model Simulation",
            x_label: "Days",
            y_label: "Population",
            series: Compartment::ALL
                .into_iter()
                .map(|c| SeriesStyle {
                    compartment: c,
                    label: c.label(),
                    color: c.color(),
                })
                .collect(),
        }
    }
}
