//! Chart lifecycle on the analytics page, plus a sink that draws charts as
//! text.
//!
//! [`ChartRenderer`] owns the live chart handles. Every render disposes the
//! previous chart of the same kind first, so repeated updates never pile up
//! rendering resources. A chart whose target is missing is skipped without
//! affecting the other one.

use std::collections::HashMap;
use std::io::Write;

use finance_core::calculations::common::round_one_decimal;
use finance_core::projection::ChartStyle;
use finance_core::{ChartKind, ChartSeries, FinancialModel, RenderError, RenderSink, project};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, warn};

use crate::utils::format_amount;

/// Outcome of one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub rendered: Vec<ChartKind>,
    pub skipped: Vec<(ChartKind, RenderError)>,
}

pub struct ChartRenderer<S: RenderSink> {
    sink: S,
    live: HashMap<ChartKind, S::Handle>,
}

impl<S: RenderSink> ChartRenderer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            live: HashMap::new(),
        }
    }

    /// Projects `model` and (re)draws both charts.
    pub fn render(
        &mut self,
        model: &FinancialModel,
    ) -> RenderReport {
        let projection = project(model);
        let mut report = RenderReport::default();

        for kind in ChartKind::ALL {
            match self.render_series(projection.series(kind)) {
                Ok(()) => report.rendered.push(kind),
                Err(error) => {
                    warn!(chart = %kind, %error, "chart skipped");
                    report.skipped.push((kind, error));
                }
            }
        }

        report
    }

    fn render_series(
        &mut self,
        series: &ChartSeries,
    ) -> Result<(), RenderError> {
        let kind = series.kind();
        if let Some(previous) = self.live.remove(&kind) {
            debug!(chart = %kind, "disposing previous chart");
            self.sink.dispose(previous);
        }

        let handle = self.sink.render(series)?;
        self.live.insert(kind, handle);
        Ok(())
    }

    /// Disposes every live chart.
    pub fn dispose_all(&mut self) {
        for (_, handle) in self.live.drain() {
            self.sink.dispose(handle);
        }
    }

    pub fn is_live(
        &self,
        kind: ChartKind,
    ) -> bool {
        self.live.contains_key(&kind)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// Width in characters of the longest bar.
const BAR_WIDTH: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChart {
    pub kind: ChartKind,
    pub serial: u64,
}

/// Draws charts as labelled bars on any writer.
pub struct TerminalSink<W: Write> {
    out: W,
    next_serial: u64,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            next_serial: 1,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(
        &mut self,
        series: &ChartSeries,
    ) -> std::io::Result<()> {
        let kind = series.kind();
        writeln!(self.out, "── {} ──", kind.title())?;

        let values = series.values();
        let scale = match kind.style() {
            // Donut slices are shares of the whole.
            ChartStyle::Donut => values.iter().copied().sum::<Decimal>(),
            ChartStyle::HorizontalBar => values
                .iter()
                .map(|v| v.abs())
                .max()
                .unwrap_or(Decimal::ZERO),
        };

        let label_width = series.labels().iter().map(|l| l.len()).max().unwrap_or(0);
        for point in series.points() {
            let bar = bar_length(point.value, scale);
            let suffix = match kind.style() {
                ChartStyle::Donut if scale > Decimal::ZERO => {
                    let share = point.value / scale * Decimal::ONE_HUNDRED;
                    format!(" ({:.1}%)", round_one_decimal(share))
                }
                _ => String::new(),
            };
            let sign = if point.value < Decimal::ZERO { "-" } else { "" };
            writeln!(
                self.out,
                "{:<label_width$}│{}{} ${}{}",
                point.label,
                sign,
                "█".repeat(bar),
                format_amount(point.value),
                suffix,
            )?;
        }
        self.out.flush()
    }
}

fn bar_length(
    value: Decimal,
    scale: Decimal,
) -> usize {
    if scale <= Decimal::ZERO {
        return 0;
    }
    (value.abs() / scale * Decimal::from(BAR_WIDTH))
        .round()
        .to_usize()
        .unwrap_or(0)
}

impl<W: Write> RenderSink for TerminalSink<W> {
    type Handle = TextChart;

    fn render(
        &mut self,
        series: &ChartSeries,
    ) -> Result<TextChart, RenderError> {
        self.draw(series)
            .map_err(|e| RenderError::Backend(e.to_string()))?;

        let handle = TextChart {
            kind: series.kind(),
            serial: self.next_serial,
        };
        self.next_serial += 1;
        Ok(handle)
    }

    fn dispose(
        &mut self,
        handle: TextChart,
    ) {
        // Text already written cannot be erased; just retire the handle.
        debug!(chart = %handle.kind, serial = handle.serial, "text chart retired");
    }
}
