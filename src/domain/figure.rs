// Figure description - Plotly-compatible chart values placed on a grid
use super::error::GridError;
use super::grid::{CellKind, FigureLayout};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: PlotLayout,
    #[serde(skip)]
    grid: FigureLayout,
}

/// One chart unit. Serializes with the plotly trace `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Trace {
    #[serde(rename = "indicator")]
    Gauge(GaugeSpec),
    #[serde(rename = "bar")]
    Bar(BarSeries),
}

impl Trace {
    fn cell_kind(&self) -> CellKind {
        match self {
            Trace::Gauge(_) => CellKind::Domain,
            Trace::Bar(_) => CellKind::Xy,
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Trace::Gauge(_) => "gauge",
            Trace::Bar(_) => "bar",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeSpec {
    pub mode: String,
    pub value: f64,
    pub delta: Delta,
    pub gauge: Gauge,
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delta {
    pub reference: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    pub axis: GaugeAxis,
    pub bar: Marker,
    pub steps: Vec<GaugeStep>,
    pub threshold: Threshold,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeAxis {
    pub range: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeStep {
    pub range: [f64; 2],
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Threshold {
    pub line: Line,
    pub thickness: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Domain {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub marker: Marker,
    pub showlegend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotLayout {
    pub title: Title,
    pub height: u32,
    pub showlegend: bool,
    pub barmode: String,
    pub plot_bgcolor: String,
    pub paper_bgcolor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    /// `xaxis`, `yaxis`, `xaxis2`, ... keyed as plotly expects
    #[serde(flatten)]
    pub axes: BTreeMap<String, Axis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub layout: TemplateLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateLayout {
    pub font: Font,
    pub xaxis: AxisStyle,
    pub yaxis: AxisStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisStyle {
    pub gridcolor: String,
    pub linecolor: String,
    pub zerolinecolor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub domain: [f64; 2],
    pub anchor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub xref: String,
    pub yref: String,
    pub xanchor: String,
    pub yanchor: String,
    pub showarrow: bool,
    pub font: Font,
}

impl Figure {
    /// Starts an empty figure on `grid`, declaring one axis pair per `Xy` cell.
    pub fn new(grid: FigureLayout, mut layout: PlotLayout) -> Self {
        for cell in grid.cells() {
            if let (Some(x), Some(y)) = (cell.x_axis_ref(), cell.y_axis_ref()) {
                layout.axes.insert(
                    layout_axis_key(&x),
                    Axis {
                        domain: cell.x,
                        anchor: y.clone(),
                    },
                );
                layout.axes.insert(
                    layout_axis_key(&y),
                    Axis {
                        domain: cell.y,
                        anchor: x,
                    },
                );
            }
        }

        Self {
            data: Vec::new(),
            layout,
            grid,
        }
    }

    pub fn grid(&self) -> &FigureLayout {
        &self.grid
    }

    /// Binds `trace` to the cell at (`row`, `col`), both 1-based.
    pub fn add_trace(&mut self, mut trace: Trace, row: usize, col: usize) -> Result<(), GridError> {
        let cell = self.grid.cell(row, col)?;
        if cell.kind != trace.cell_kind() {
            return Err(GridError::KindMismatch {
                row,
                col,
                cell: cell.kind.as_str(),
                trace: trace.kind_name(),
            });
        }

        match &mut trace {
            Trace::Gauge(gauge) => {
                gauge.domain = Some(Domain {
                    x: cell.x,
                    y: cell.y,
                });
            }
            Trace::Bar(bar) => {
                bar.xaxis = cell.x_axis_ref();
                bar.yaxis = cell.y_axis_ref();
            }
        }

        self.data.push(trace);
        Ok(())
    }

    /// Centers a title annotation just above the cell.
    pub fn add_subplot_title(
        &mut self,
        row: usize,
        col: usize,
        text: impl Into<String>,
        font: Font,
    ) -> Result<(), GridError> {
        let cell = self.grid.cell(row, col)?;
        self.layout.annotations.push(Annotation {
            text: text.into(),
            x: (cell.x[0] + cell.x[1]) / 2.0,
            y: cell.y[1],
            xref: "paper".to_string(),
            yref: "paper".to_string(),
            xanchor: "center".to_string(),
            yanchor: "bottom".to_string(),
            showarrow: false,
            font,
        });
        Ok(())
    }

    pub fn gauges(&self) -> impl Iterator<Item = &GaugeSpec> {
        self.data.iter().filter_map(|t| match t {
            Trace::Gauge(g) => Some(g),
            _ => None,
        })
    }

    pub fn bar_series(&self) -> impl Iterator<Item = &BarSeries> {
        self.data.iter().filter_map(|t| match t {
            Trace::Bar(b) => Some(b),
            _ => None,
        })
    }
}

// "x2" -> "xaxis2", "y" -> "yaxis"
fn layout_axis_key(axis_ref: &str) -> String {
    let (letter, n) = axis_ref.split_at(1);
    format!("{}axis{}", letter, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::{CellSpec, GridOptions};
    use serde_json::json;

    fn layout() -> PlotLayout {
        PlotLayout {
            title: Title::default(),
            height: 400,
            showlegend: false,
            barmode: "group".to_string(),
            plot_bgcolor: "#000".to_string(),
            paper_bgcolor: "#000".to_string(),
            template: None,
            annotations: Vec::new(),
            axes: BTreeMap::new(),
        }
    }

    fn gauge(value: f64) -> Trace {
        Trace::Gauge(GaugeSpec {
            mode: "gauge+number".to_string(),
            value,
            delta: Delta { reference: 0.0 },
            gauge: Gauge {
                axis: GaugeAxis { range: [0.0, 10.0] },
                bar: Marker {
                    color: "blue".to_string(),
                },
                steps: vec![],
                threshold: Threshold {
                    line: Line {
                        color: "red".to_string(),
                        width: 2.0,
                    },
                    thickness: 0.75,
                    value: 5.0,
                },
            },
            title: Title::new("g"),
            domain: None,
        })
    }

    fn bar() -> Trace {
        Trace::Bar(BarSeries {
            name: "b".to_string(),
            x: vec!["a".to_string()],
            y: vec![1.0],
            marker: Marker {
                color: "blue".to_string(),
            },
            showlegend: false,
            xaxis: None,
            yaxis: None,
        })
    }

    fn side_by_side() -> Figure {
        let grid = FigureLayout::new(
            vec![vec![Some(CellSpec::domain()), Some(CellSpec::xy())]],
            &GridOptions {
                horizontal_spacing: Some(0.0),
                ..GridOptions::default()
            },
        )
        .unwrap();
        Figure::new(grid, layout())
    }

    #[test]
    fn test_new_declares_axes_for_xy_cells() {
        let figure = side_by_side();
        assert_eq!(
            figure.layout.axes.get("xaxis"),
            Some(&Axis {
                domain: [0.5, 1.0],
                anchor: "y".to_string()
            })
        );
        assert_eq!(figure.layout.axes.get("yaxis").unwrap().anchor, "x");
        assert_eq!(figure.layout.axes.len(), 2);
    }

    #[test]
    fn test_add_trace_binds_cell_position() {
        let mut figure = side_by_side();
        figure.add_trace(gauge(3.0), 1, 1).unwrap();
        figure.add_trace(bar(), 1, 2).unwrap();

        let g = figure.gauges().next().unwrap();
        assert_eq!(
            g.domain,
            Some(Domain {
                x: [0.0, 0.5],
                y: [0.0, 1.0]
            })
        );
        let b = figure.bar_series().next().unwrap();
        assert_eq!(b.xaxis.as_deref(), Some("x"));
        assert_eq!(b.yaxis.as_deref(), Some("y"));
    }

    #[test]
    fn test_add_trace_rejects_wrong_cell_kind() {
        let mut figure = side_by_side();
        assert_eq!(
            figure.add_trace(bar(), 1, 1),
            Err(GridError::KindMismatch {
                row: 1,
                col: 1,
                cell: "domain",
                trace: "bar"
            })
        );
        assert!(figure.data.is_empty());
    }

    #[test]
    fn test_subplot_title_sits_above_cell() {
        let mut figure = side_by_side();
        figure
            .add_subplot_title(1, 2, "Bars", Font::default())
            .unwrap();
        let note = &figure.layout.annotations[0];
        assert_eq!(note.text, "Bars");
        assert_eq!(note.x, 0.75);
        assert_eq!(note.y, 1.0);
    }

    #[test]
    fn test_serializes_with_plotly_keys() {
        let mut figure = side_by_side();
        figure.add_trace(gauge(3.0), 1, 1).unwrap();
        figure.add_trace(bar(), 1, 2).unwrap();

        let value = serde_json::to_value(&figure).unwrap();
        assert_eq!(value["data"][0]["type"], json!("indicator"));
        assert_eq!(value["data"][0]["delta"]["reference"], json!(0.0));
        assert_eq!(value["data"][1]["type"], json!("bar"));
        assert_eq!(value["layout"]["xaxis"]["anchor"], json!("y"));
        assert!(value["layout"].get("annotations").is_none());
        assert!(value.get("grid").is_none());
    }
}
