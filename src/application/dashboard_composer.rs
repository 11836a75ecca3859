// Dashboard composer - Gauges per period over one grouped bar chart
use crate::domain::error::{ComposeError, GridError};
use crate::domain::figure::{
    AxisStyle, BarSeries, Delta, Figure, Font, Gauge, GaugeAxis, GaugeSpec, GaugeStep, Line,
    Marker, PlotLayout, Template, TemplateLayout, Threshold, Title, Trace,
};
use crate::domain::grid::{CellSpec, FigureLayout, GridOptions};
use crate::domain::sales::{AxisScale, MetricPair, SalesSeries, validate_sequences};
use std::collections::BTreeMap;

pub const DEFAULT_HEADROOM: f64 = 2000.0;

const ACTUAL_COLOR: &str = "rgba(54, 162, 235, 0.7)";
const TARGET_ZONE_COLOR: &str = "rgba(255, 99, 132, 0.5)";
const TARGET_BAR_COLOR: &str = "rgba(255, 99, 132, 0.7)";
const THRESHOLD_COLOR: &str = "red";

const ROW_HEIGHTS: [f64; 2] = [0.5, 0.5];
const VERTICAL_SPACING: f64 = 0.15;

/// Cosmetic settings applied uniformly to the whole figure
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStyle {
    pub bar_title: String,
    pub height: u32,
    pub background: String,
}

impl Default for DashboardStyle {
    fn default() -> Self {
        Self {
            bar_title: "Actual VS Target".to_string(),
            height: 800,
            background: "#1e1e1e".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardComposer {
    headroom: f64,
    style: DashboardStyle,
}

impl Default for DashboardComposer {
    fn default() -> Self {
        Self {
            headroom: DEFAULT_HEADROOM,
            style: DashboardStyle::default(),
        }
    }
}

impl DashboardComposer {
    /// Rejects a headroom that would put the gauge ceiling below a target
    /// or leave it unrepresentable in JSON.
    pub fn new(headroom: f64, style: DashboardStyle) -> Result<Self, ComposeError> {
        if !headroom.is_finite() || headroom < 0.0 {
            return Err(ComposeError::InvalidHeadroom(headroom));
        }
        Ok(Self { headroom, style })
    }

    pub fn headroom(&self) -> f64 {
        self.headroom
    }

    pub fn compose_series(&self, series: &SalesSeries) -> Result<Figure, ComposeError> {
        self.compose(&series.periods, &series.targets, &series.actuals)
    }

    /// Builds one gauge per period on the top row and both bar series on a
    /// full-width bottom row. Every gauge shares the same axis ceiling.
    pub fn compose(
        &self,
        periods: &[String],
        targets: &[f64],
        actuals: &[f64],
    ) -> Result<Figure, ComposeError> {
        validate_sequences(periods, targets, actuals)?;
        let scale = AxisScale::from_targets(targets, self.headroom)?;

        let grid = gauges_over_bar_grid(periods.len())?;
        let mut figure = Figure::new(grid, self.plot_layout());

        for (i, period) in periods.iter().enumerate() {
            let pair = MetricPair::new(targets[i], actuals[i]);
            figure.add_trace(gauge_chart(period, pair, scale), 1, i + 1)?;
        }

        for trace in bar_charts(periods, actuals, targets) {
            figure.add_trace(trace, 2, 1)?;
        }

        figure.add_subplot_title(
            2,
            1,
            self.style.bar_title.clone(),
            Font {
                size: Some(16),
                ..Font::default()
            },
        )?;

        Ok(figure)
    }

    fn plot_layout(&self) -> PlotLayout {
        PlotLayout {
            title: Title {
                text: String::new(),
                font: Some(Font {
                    family: Some("Arial, sans-serif".to_string()),
                    size: Some(24),
                    color: Some("white".to_string()),
                }),
            },
            height: self.style.height,
            showlegend: false,
            barmode: "group".to_string(),
            plot_bgcolor: self.style.background.clone(),
            paper_bgcolor: self.style.background.clone(),
            template: Some(dark_template()),
            annotations: Vec::new(),
            axes: BTreeMap::new(),
        }
    }
}

/// Composes with the default headroom and style.
#[cfg(test)]
pub fn compose(periods: &[String], targets: &[f64], actuals: &[f64]) -> Result<Figure, ComposeError> {
    DashboardComposer::default().compose(periods, targets, actuals)
}

fn gauges_over_bar_grid(columns: usize) -> Result<FigureLayout, GridError> {
    let gauges = vec![Some(CellSpec::domain()); columns];
    let mut bars = vec![None; columns];
    bars[0] = Some(CellSpec::xy().with_colspan(columns));

    FigureLayout::new(
        vec![gauges, bars],
        &GridOptions {
            row_heights: Some(ROW_HEIGHTS.to_vec()),
            vertical_spacing: VERTICAL_SPACING,
            horizontal_spacing: None,
        },
    )
}

fn gauge_chart(period: &str, pair: MetricPair, scale: AxisScale) -> Trace {
    Trace::Gauge(GaugeSpec {
        mode: "gauge+number+delta".to_string(),
        value: pair.actual,
        delta: Delta {
            reference: pair.target,
        },
        gauge: Gauge {
            axis: GaugeAxis {
                range: scale.range(),
            },
            bar: Marker {
                color: ACTUAL_COLOR.to_string(),
            },
            steps: vec![GaugeStep {
                range: [0.0, pair.target],
                color: TARGET_ZONE_COLOR.to_string(),
            }],
            threshold: Threshold {
                line: Line {
                    color: THRESHOLD_COLOR.to_string(),
                    width: 2.0,
                },
                thickness: 0.75,
                value: pair.target,
            },
        },
        title: Title::new(period),
        domain: None,
    })
}

fn bar_charts(periods: &[String], actuals: &[f64], targets: &[f64]) -> [Trace; 2] {
    let series = |name: &str, values: &[f64], color: &str| {
        Trace::Bar(BarSeries {
            name: name.to_string(),
            x: periods.to_vec(),
            y: values.to_vec(),
            marker: Marker {
                color: color.to_string(),
            },
            showlegend: false,
            xaxis: None,
            yaxis: None,
        })
    };

    [
        series("Actual Sales", actuals, ACTUAL_COLOR),
        series("Target Sales", targets, TARGET_BAR_COLOR),
    ]
}

// Colors of plotly's dark template that the dashboard relies on
fn dark_template() -> Template {
    let axis = AxisStyle {
        gridcolor: "#283442".to_string(),
        linecolor: "#506784".to_string(),
        zerolinecolor: "#283442".to_string(),
    };

    Template {
        layout: TemplateLayout {
            font: Font {
                color: Some("#f2f5fa".to_string()),
                ..Font::default()
            },
            xaxis: axis.clone(),
            yaxis: axis,
        },
    }
}
