//! Text sparklines for the benchmark chart.

use crate::domain::simulation::ChartPoint;

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One bar per value, scaled between the series minimum and maximum. A flat
/// series renders at the lowest bar.
pub fn sparkline(values: &[f64]) -> String {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    let top = (BARS.len() - 1) as f64;

    values
        .iter()
        .map(|v| {
            let level = if range > 0.0 {
                ((v - min) / range * top).round() as usize
            } else {
                0
            };
            BARS[level.min(BARS.len() - 1)]
        })
        .collect()
}

fn change_pct(values: &[f64]) -> f64 {
    match (values.first(), values.last()) {
        (Some(&first), Some(&last)) if first > 0.0 => (last / first - 1.0) * 100.0,
        _ => 0.0,
    }
}

pub fn render_chart(points: &[ChartPoint], synthetic: bool) -> String {
    if points.is_empty() {
        return "_No chart data._\n".to_string();
    }

    let series: [(&str, Vec<f64>); 3] = [
        ("NIFTY 50", points.iter().map(|p| p.nifty).collect()),
        ("SENSEX", points.iter().map(|p| p.sensex).collect()),
        ("Portfolio", points.iter().map(|p| p.portfolio).collect()),
    ];

    let mut out = String::from("```text\n");
    for (name, values) in &series {
        out.push_str(&format!(
            "{:<10} {} {:+.2}%\n",
            name,
            sparkline(values),
            change_pct(values)
        ));
    }
    out.push_str("```\n");

    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        out.push_str(&format!("\n{} to {}", first.date, last.date));
    }
    if synthetic {
        out.push_str(" · illustrative simulation, not market data");
    }
    out.push('\n');
    out
}
