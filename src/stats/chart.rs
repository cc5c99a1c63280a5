// Bar charts of the rankings, written as SVG.

use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;

use crate::stats::*;

const CHART_SIZE: (u32, u32) = (1000, 600);
const CAPTION_HEIGHT: i32 = 40;

/// A titled bar chart, one bar per label, in the order given.
#[derive(PartialEq, Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<(String, f64)>,
    /// Fixed upper bound of the value axis. Derived from the data when missing.
    pub y_max: Option<f64>,
    /// A note printed above the chart.
    pub caption: Option<String>,
}

impl BarChart {
    fn y_top(&self) -> f64 {
        match self.y_max {
            Some(y) => y,
            None => {
                let highest = self.bars.iter().map(|(_, v)| *v).fold(1.0, f64::max);
                highest * 1.1
            }
        }
    }
}

pub fn render_bar_chart(chart: &BarChart, path: &Path) -> BStatsResult<()> {
    debug!("render_bar_chart: {:?} -> {:?}", chart.title, path);
    draw(chart, path).context(ChartSnafu {
        path: path.display().to_string(),
    })?;
    info!("Wrote chart {:?}", path);
    Ok(())
}

fn draw(chart: &BarChart, path: &Path) -> Result<(), DrawingAreaErrorKind<std::io::Error>> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let plot_area = match &chart.caption {
        Some(caption) => {
            let (caption_area, plot_area) = root.split_vertically(CAPTION_HEIGHT);
            caption_area.draw(&Text::new(
                caption.clone(),
                (20, 10),
                ("sans-serif", 16).into_font(),
            ))?;
            plot_area
        }
        None => root.clone(),
    };

    let n = chart.bars.len().max(1) as u32;
    let mut ctx = ChartBuilder::on(&plot_area)
        .caption(&chart.title, ("sans-serif", 28).into_font())
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..n).into_segmented(), 0f64..chart.y_top())?;

    let x_fmt = |v: &SegmentValue<u32>| -> String {
        let idx = match v {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => *i as usize,
            SegmentValue::Last => return String::new(),
        };
        chart
            .bars
            .get(idx)
            .map(|(label, _)| label.clone())
            .unwrap_or_default()
    };
    let y_fmt = |y: &f64| -> String {
        if y.fract() == 0.0 {
            format!("{:.0}", y)
        } else {
            format!("{:.1}", y)
        }
    };

    let mut mesh = ctx.configure_mesh();
    mesh.disable_x_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .x_labels(n as usize)
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt);
    if chart.y_max.is_some() {
        mesh.y_labels(11);
    }
    mesh.draw()?;

    ctx.draw_series(chart.bars.iter().enumerate().map(|(idx, (_, value))| {
        let i = idx as u32;
        let mut bar = Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), *value)],
            BLUE.mix(0.7).filled(),
        );
        bar.set_margin(0, 0, 8, 8);
        bar
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(bars: &[(&str, f64)]) -> BarChart {
        BarChart {
            title: "Top mappers".to_string(),
            x_label: "Mapper".to_string(),
            y_label: "Rating".to_string(),
            bars: bars.iter().map(|(l, v)| (l.to_string(), *v)).collect(),
            y_max: None,
            caption: None,
        }
    }

    #[test]
    fn axis_bound() {
        assert!((chart(&[("a", 4.0), ("b", 10.0)]).y_top() - 11.0).abs() < 1e-9);
        assert!((chart(&[]).y_top() - 1.1).abs() < 1e-9);
        let mut c = chart(&[("a", 4.0)]);
        c.y_max = Some(10.0);
        assert_eq!(c.y_top(), 10.0);
    }

    #[test]
    fn render_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapperRating.svg");
        let mut c = chart(&[("eLconn15", 6.6), ("Bob", 6.5)]);
        c.y_max = Some(10.0);
        c.caption = Some("Counting mappers with 5+ maps".to_string());
        render_bar_chart(&c, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
        assert!(content.contains("eLconn15"));
        assert!(content.contains("Top mappers"));
    }

    #[test]
    fn render_empty_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapCount.svg");
        render_bar_chart(&chart(&[]), &path).unwrap();
        assert!(path.exists());
    }
}
