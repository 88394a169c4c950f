use plotly::common::Mode;
use plotly::{Layout, Plot, Scatter};

use linreg_core::solver::LOSS_INTERVAL;

const COLORS: [&str; 4] = [
    "rgba(31, 119, 180, 1.0)",
    "rgba(255, 127, 14, 1.0)",
    "rgba(44, 160, 44, 1.0)",
    "rgba(214, 39, 40, 1.0)",
];

/// One loss curve per solver; entry `k` of a trace was recorded at
/// iteration `(k + 1) * LOSS_INTERVAL`.
pub fn plot_losses(traces: &[(&str, &[f64])]) -> Plot {
    let mut plot = Plot::new();

    for (i, (name, losses)) in traces.iter().enumerate() {
        let iterations: Vec<f64> = (1..=losses.len())
            .map(|k| (k * LOSS_INTERVAL) as f64)
            .collect();
        plot.add_trace(
            Scatter::new(iterations, losses.to_vec())
                .name(*name)
                .mode(Mode::Lines)
                .line(plotly::common::Line::new().color(COLORS[i % COLORS.len()])),
        );
    }

    plot.set_layout(
        Layout::new()
            .title("Training Loss")
            .x_axis(plotly::layout::Axis::new().title("Iteration"))
            .y_axis(
                plotly::layout::Axis::new()
                    .title("Loss")
                    .type_(plotly::layout::AxisType::Log),
            ),
    );

    plot
}
