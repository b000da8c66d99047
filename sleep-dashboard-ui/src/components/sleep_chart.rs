//! Sleep Chart Component
//!
//! Stacked bar chart of sleep and awake hours per day, drawn on an HTML5
//! canvas. Records are first mapped to a [`ChartConfig`]; drawing reads only
//! the config.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::dashboard::SleepRecord;

pub const SLEEP_SERIES_LABEL: &str = "Sleep Time";
pub const AWAKE_SERIES_LABEL: &str = "Awake Time";

const SLEEP_COLOR: &str = "rgba(75, 192, 192, 0.6)";
const AWAKE_COLOR: &str = "rgba(255, 99, 132, 0.6)";

/// Shown instead of the chart when there is nothing to draw
pub const EMPTY_CHART_MESSAGE: &str = "No sleep data available.";

/// Hours in a day; fixed top of the y axis
pub const Y_AXIS_MAX: f64 = 24.0;

/// Y axis gridlines, in hours
const Y_TICKS: [f64; 5] = [0.0, 6.0, 12.0, 18.0, 24.0];

/// Share of each category slot taken by its bar
const BAR_WIDTH_RATIO: f64 = 0.8;

/// Most x-axis labels drawn before labels are thinned out
const MAX_X_LABELS: usize = 12;

/// One series of the bar chart
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub label: &'static str,
    pub data: Vec<f64>,
    pub background_color: &'static str,
}

/// Everything needed to draw the chart
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    /// One category per record, in record order
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub stacked_x: bool,
    pub stacked_y: bool,
    pub y_max: f64,
}

/// Map records to a two-series stacked bar chart
///
/// Dates are used as labels as-is: no sorting, no deduplication.
pub fn build_chart_config(records: &[SleepRecord]) -> ChartConfig {
    ChartConfig {
        labels: records.iter().map(|r| r.date.clone()).collect(),
        datasets: vec![
            Dataset {
                label: SLEEP_SERIES_LABEL,
                data: records.iter().map(|r| r.sleep_time).collect(),
                background_color: SLEEP_COLOR,
            },
            Dataset {
                label: AWAKE_SERIES_LABEL,
                data: records.iter().map(|r| r.awake_time).collect(),
                background_color: AWAKE_COLOR,
            },
        ],
        stacked_x: true,
        stacked_y: true,
        y_max: Y_AXIS_MAX,
    }
}

/// Placeholder text for `records`, or `None` when the chart should be drawn
pub fn chart_placeholder(records: &[SleepRecord]) -> Option<&'static str> {
    records.is_empty().then_some(EMPTY_CHART_MESSAGE)
}

/// Region of the canvas holding the bars
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    /// Canvas y coordinate of a value on the 0..=y_max axis
    fn y_for(&self, value: f64, y_max: f64) -> f64 {
        self.top + self.height * (1.0 - value / y_max)
    }
}

/// A filled rectangle of one series within one bar
#[derive(Clone, Debug, PartialEq)]
pub struct BarSegment {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: &'static str,
}

/// Compute bar rectangles for every category and series
///
/// Segments are clipped to the 0..=y_max axis range; a segment entirely
/// outside it is omitted.
pub fn layout_segments(config: &ChartConfig, area: PlotArea) -> Vec<BarSegment> {
    let count = config.labels.len();
    if count == 0 || config.y_max <= 0.0 {
        return Vec::new();
    }

    let slot = area.width / count as f64;
    let bar_width = slot * BAR_WIDTH_RATIO;
    let mut segments = Vec::new();

    for index in 0..count {
        let x = area.left + index as f64 * slot + (slot - bar_width) / 2.0;
        let mut base = 0.0;

        for dataset in &config.datasets {
            let value = dataset.data.get(index).copied().unwrap_or(0.0);
            let (start, end) = if config.stacked_y {
                (base, base + value)
            } else {
                (0.0, value)
            };
            if config.stacked_y {
                base += value;
            }

            let low = start.min(end).max(0.0);
            let high = start.max(end).min(config.y_max);
            if high <= low {
                continue;
            }

            let top = area.y_for(high, config.y_max);
            let bottom = area.y_for(low, config.y_max);

            segments.push(BarSegment {
                x,
                y: top,
                width: bar_width,
                height: bottom - top,
                color: dataset.background_color,
            });
        }
    }

    segments
}

/// Stacked sleep/awake chart, or a placeholder when there are no records
#[component]
pub fn SleepChart(records: Vec<SleepRecord>) -> impl IntoView {
    if let Some(message) = chart_placeholder(&records) {
        return view! {
            <p class="text-center text-gray-400">{message}</p>
        }
        .into_view();
    }

    let config = build_chart_config(&records);
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &config);
        }
    });

    view! {
        <div class="w-full">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="400"
                class="w-full h-[400px] rounded-lg"
            />
        </div>
    }
    .into_view()
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, config: &ChartConfig) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins
    let area = PlotArea {
        left: 50.0,
        top: 40.0,
        width: width - 50.0 - 20.0,
        height: height - 40.0 - 50.0,
    };

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    // Horizontal grid lines with hour labels
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");

    for tick in Y_TICKS {
        let y = area.y_for(tick, config.y_max);
        ctx.begin_path();
        ctx.move_to(area.left, y);
        ctx.line_to(area.left + area.width, y);
        ctx.stroke();

        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        let _ = ctx.fill_text(&format!("{}h", tick), 10.0, y + 4.0);
    }

    for segment in layout_segments(config, area) {
        ctx.set_fill_style(&segment.color.into());
        ctx.fill_rect(segment.x, segment.y, segment.width, segment.height);
    }

    // X-axis labels, thinned out for long ranges
    let count = config.labels.len();
    let step = count.div_ceil(MAX_X_LABELS).max(1);
    let slot = area.width / count.max(1) as f64;

    ctx.set_fill_style(&"#9ca3af".into());
    for (index, label) in config.labels.iter().enumerate().step_by(step) {
        let center = area.left + (index as f64 + 0.5) * slot;
        let text_width = ctx.measure_text(label).map(|m| m.width()).unwrap_or(0.0);
        let _ = ctx.fill_text(label, center - text_width / 2.0, height - 20.0);
    }

    draw_legend(&ctx, config, width);
}

/// Series legend along the top edge, right aligned
fn draw_legend(ctx: &CanvasRenderingContext2d, config: &ChartConfig, width: f64) {
    ctx.set_font("13px sans-serif");

    let mut x = width - 20.0;
    for dataset in config.datasets.iter().rev() {
        let text_width = ctx
            .measure_text(dataset.label)
            .map(|m| m.width())
            .unwrap_or(0.0);

        x -= text_width;
        ctx.set_fill_style(&"#d1d5db".into()); // gray-300
        let _ = ctx.fill_text(dataset.label, x, 24.0);

        x -= 18.0;
        ctx.set_fill_style(&dataset.background_color.into());
        ctx.fill_rect(x, 13.0, 12.0, 12.0);

        x -= 20.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, sleep_time: f64) -> SleepRecord {
        SleepRecord {
            date: date.to_string(),
            sleep_time,
            awake_time: 24.0 - sleep_time,
        }
    }

    fn area() -> PlotArea {
        PlotArea {
            left: 0.0,
            top: 0.0,
            width: 200.0,
            height: 240.0,
        }
    }

    #[test]
    fn test_config_keeps_record_order() {
        let records = vec![
            record("2024-01-03", 6.0),
            record("2024-01-01", 7.0),
            record("2024-01-03", 8.0),
        ];

        let config = build_chart_config(&records);

        assert_eq!(config.labels, vec!["2024-01-03", "2024-01-01", "2024-01-03"]);
        assert_eq!(config.datasets[0].label, "Sleep Time");
        assert_eq!(config.datasets[0].data, vec![6.0, 7.0, 8.0]);
        assert_eq!(config.datasets[1].label, "Awake Time");
        assert_eq!(config.datasets[1].data, vec![18.0, 17.0, 16.0]);
    }

    #[test]
    fn test_config_axes() {
        let config = build_chart_config(&[record("2024-01-01", 7.0)]);

        assert!(config.stacked_x);
        assert!(config.stacked_y);
        assert_eq!(config.y_max, 24.0);
        assert_eq!(config.datasets[0].background_color, "rgba(75, 192, 192, 0.6)");
        assert_eq!(config.datasets[1].background_color, "rgba(255, 99, 132, 0.6)");
    }

    #[test]
    fn test_placeholder_only_for_no_records() {
        assert_eq!(chart_placeholder(&[]), Some("No sleep data available."));
        assert_eq!(chart_placeholder(&[record("2024-01-01", 7.0)]), None);
    }

    #[test]
    fn test_empty_config_has_no_segments() {
        let config = build_chart_config(&[]);

        assert!(config.labels.is_empty());
        assert!(config.datasets.iter().all(|d| d.data.is_empty()));
        assert!(layout_segments(&config, area()).is_empty());
    }

    #[test]
    fn test_segments_stack_to_full_height() {
        let config = build_chart_config(&[record("2024-01-01", 8.0), record("2024-01-02", 6.0)]);

        let segments = layout_segments(&config, area());

        assert_eq!(segments.len(), 4);

        // First bar: sleep at the bottom, awake directly above it
        let sleep = &segments[0];
        let awake = &segments[1];
        assert_eq!(sleep.height, 80.0);
        assert_eq!(sleep.y, 160.0);
        assert_eq!(awake.y, 0.0);
        assert_eq!(awake.height, 160.0);
        assert_eq!(sleep.color, SLEEP_COLOR);
        assert_eq!(awake.color, AWAKE_COLOR);

        // Bars share a slot width of 100px with 80% fill, centered
        assert_eq!(sleep.width, 80.0);
        assert_eq!(sleep.x, 10.0);
        assert_eq!(segments[2].x, 110.0);
    }

    #[test]
    fn test_out_of_range_values_are_clipped() {
        let config = build_chart_config(&[record("2024-01-01", 25.0), record("2024-01-02", -2.0)]);

        let segments = layout_segments(&config, area());

        // 25h of sleep fills the axis; its -1h awake segment is dropped
        assert_eq!(segments[0].y, 0.0);
        assert_eq!(segments[0].height, 240.0);
        assert_eq!(segments[0].color, SLEEP_COLOR);

        // -2h of sleep is dropped; 26h awake fills the axis
        assert_eq!(segments[1].color, AWAKE_COLOR);
        assert_eq!(segments[1].height, 240.0);
        assert_eq!(segments.len(), 2);
    }
}
