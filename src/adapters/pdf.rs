//! PDF report rendering
//!
//! Fixed A4 layout using the builtin Helvetica fonts. Page one carries the
//! identity blocks, key results, the yearly table and the calculation
//! detail; page two carries both charts drawn as vector lines.

use crate::config::ReportConfig;
use crate::core::chart::{
    benefit_breakdown_series, cash_flow_series, value_bounds, BenefitComponent,
};
use crate::core::format::{
    format_break_even, format_currency, format_months, format_percentage, format_timestamp,
};
use crate::domain::{MedRoiError, Result, RoiInput, RoiProjection};
use chrono::{DateTime, Datelike, FixedOffset};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const BOTTOM_LIMIT: f32 = 20.0;
const PT_PER_MM: f32 = 2.834_646;

/// Renders reports with the settings of the `[report]` section
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    title: String,
    organization: String,
    currency_symbol: String,
    timezone_offset_hours: i32,
}

impl ReportRenderer {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            title: config.title.clone(),
            organization: config.organization.clone(),
            currency_symbol: config.currency_symbol.clone(),
            timezone_offset_hours: config.timezone_offset_hours,
        }
    }

    /// Renders the report and returns the PDF bytes
    ///
    /// # Errors
    ///
    /// Returns [`MedRoiError::Report`] if fonts cannot be registered or the
    /// document cannot be serialized.
    pub fn render(
        &self,
        input: &RoiInput,
        projection: &RoiProjection,
        generated_at: &DateTime<FixedOffset>,
    ) -> Result<Vec<u8>> {
        let title = format!("{} - {}", self.title, input.hospital.name);
        let (doc, page, layer) =
            PdfDocument::new(&title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Summary");
        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
        };

        let mut page_one = PageWriter::new(doc.get_page(page).get_layer(layer), &fonts);
        self.write_summary(&mut page_one, input, projection, generated_at)?;

        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Charts");
        let mut page_two = PageWriter::new(doc.get_page(page).get_layer(layer), &fonts);
        self.write_charts(&mut page_two, projection);
        self.write_footer(&page_two, generated_at);

        save(doc)
    }

    fn write_summary(
        &self,
        w: &mut PageWriter<'_>,
        input: &RoiInput,
        projection: &RoiProjection,
        generated_at: &DateTime<FixedOffset>,
    ) -> Result<()> {
        w.centered(&format!("{} - {}", self.title, input.hospital.name), 16.0, true);
        w.advance(2.0);
        w.centered(
            &format!(
                "Generated: {}",
                format_timestamp(generated_at, self.timezone_offset_hours)
            ),
            10.0,
            false,
        );
        w.advance(8.0);

        w.heading("Consultant Information");
        w.text(&format!("Name: {}", input.consultant.name));
        w.text(&format!("Email: {}", input.consultant.email));
        w.text(&format!("Phone: {}", input.consultant.phone));
        w.advance(4.0);

        w.heading("Hospital Information");
        w.text(&format!("Name: {}", input.hospital.name));
        w.text(&format!("Location: {}", input.hospital.location));
        w.advance(4.0);

        w.heading("Key ROI Results");
        let first_year_net = projection
            .year(1)
            .map(|y| y.net_cash_flow)
            .unwrap_or_default();
        let rows = [
            ("Initial investment", self.money(projection.initial_investment)),
            ("Annual net benefit (year 1)", self.money(first_year_net)),
            ("ROI year 1", format_percentage(projection.first_year_roi)),
            ("ROI 5 years", format_percentage(projection.total_roi)),
            ("Break-even", format_break_even(projection.break_even)),
            ("Payback period (months)", format_months(projection.payback_months)),
        ];
        for (label, value) in rows {
            w.table_row(&[(label, CONTENT_WIDTH / 2.0), (&value, CONTENT_WIDTH / 2.0)], false);
        }
        w.advance(4.0);

        w.heading("Five-Year Projection");
        let col = CONTENT_WIDTH / 6.0;
        w.table_row(
            &[
                ("Year", col),
                ("Revenue uplift", col),
                ("Op. savings", col),
                ("Subscription", col),
                ("Net cash flow", col),
                ("Cumulative", col),
            ],
            true,
        );
        for year in &projection.years {
            let cells = [
                year.year.to_string(),
                self.money(year.revenue_uplift),
                self.money(year.operational_savings),
                self.money(year.subscription_cost),
                self.money(year.net_cash_flow),
                self.money(year.cumulative_cash_flow),
            ];
            let row: Vec<(&str, f32)> = cells.iter().map(|c| (c.as_str(), col)).collect();
            w.table_row(&row, false);
        }
        w.advance(4.0);

        if input.savings_breakdown.is_some() || input.investment_breakdown.is_some() {
            w.heading("Calculation Detail");
        }
        if let Some(savings) = &input.savings_breakdown {
            w.text("Monthly savings components:");
            w.text(&format!(
                "  + Staff cost reduction: {}",
                self.money(savings.staff_savings_monthly)
            ));
            w.text(&format!(
                "  + No-show loss reduction: {}",
                self.money(savings.noshow_savings_monthly)
            ));
            w.text(&format!(
                "  - Monthly maintenance: {}",
                self.money(savings.maintenance_monthly)
            ));
            w.bold_text(&format!(
                "  = Net monthly savings: {}",
                self.money(savings.net_monthly()?)
            ));
            w.advance(2.0);
        }
        if let Some(investment) = &input.investment_breakdown {
            w.text("Initial investment breakdown:");
            w.text(&format!("  - Setup: {}", self.money(investment.setup)));
            w.text(&format!("  - Integration: {}", self.money(investment.integration)));
            w.text(&format!("  - Training: {}", self.money(investment.training)));
            w.bold_text(&format!(
                "  = Total initial investment: {}",
                self.money(investment.total()?)
            ));
        }
        Ok(())
    }

    fn write_charts(&self, w: &mut PageWriter<'_>, projection: &RoiProjection) {
        w.heading("Data Visualization");
        w.advance(4.0);

        w.bold_text("5-Year Cumulative Cash Flow Projection");
        let area = ChartArea::below(w.y, 85.0);
        self.draw_cash_flow(w, projection, &area);
        w.y = area.bottom - 14.0;

        w.bold_text("Annual Benefit Sources");
        let area = ChartArea::below(w.y, 85.0);
        self.draw_benefits(w, projection, &area);
        w.y = area.bottom - 14.0;
    }

    fn draw_cash_flow(&self, w: &PageWriter<'_>, projection: &RoiProjection, area: &ChartArea) {
        let series = cash_flow_series(projection);
        let (lo, hi) = value_bounds(series.points.iter().map(|p| &p.value));
        let scale = ValueScale::new(lo, hi, area);
        let steps = series.points.len().saturating_sub(1).max(1) as f32;
        let x_at = |i: usize| area.left + area.width() * i as f32 / steps;

        area.draw_frame(&w.layer);
        w.stroke(&[(area.left, scale.y(Decimal::ZERO)), (area.right, scale.y(Decimal::ZERO))], GREY, 0.5);

        let points: Vec<(f32, f32)> = series
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (x_at(i), scale.y(p.value)))
            .collect();
        w.stroke(&points, BLUE, 1.5);

        for (i, point) in series.points.iter().enumerate() {
            let (x, y) = points[i];
            w.stroke(&[(x - 0.8, y), (x + 0.8, y)], BLUE, 4.5);
            w.small(&format!("Y{}", point.year), x - 2.0, area.bottom - 5.0);
        }
        w.small(&self.money(hi), area.left + 1.0, area.top - 4.0);
        w.small(&self.money(lo), area.left + 1.0, area.bottom + 2.0);
    }

    fn draw_benefits(&self, w: &PageWriter<'_>, projection: &RoiProjection, area: &ChartArea) {
        let series = benefit_breakdown_series(projection);
        let (lo, hi) = value_bounds(series.iter().flat_map(|s| s.values.iter()));
        let scale = ValueScale::new(lo, hi, area);
        let years = projection.years.len().max(1);
        let group_width = area.width() / years as f32;
        let bar_width = group_width / (series.len() as f32 + 1.0);

        area.draw_frame(&w.layer);
        let baseline = scale.y(Decimal::ZERO);

        for (year_idx, year) in projection.years.iter().enumerate() {
            let group_left = area.left + group_width * year_idx as f32 + bar_width / 2.0;
            for (bar_idx, bars) in series.iter().enumerate() {
                let value = bars.values.get(year_idx).copied().unwrap_or_default();
                let x = group_left + bar_width * (bar_idx as f32 + 0.5);
                let (r, g, b) = bars.component.color();
                w.stroke(
                    &[(x, baseline), (x, scale.y(value))],
                    Rgb::new(r, g, b, None),
                    bar_width * 0.9 * PT_PER_MM,
                );
            }
            w.small(&format!("Y{}", year.year), group_left + bar_width, area.bottom - 5.0);
        }
        w.small(&self.money(hi), area.left + 1.0, area.top - 4.0);

        let mut legend_x = area.left;
        for component in BenefitComponent::ALL {
            let (r, g, b) = component.color();
            let y = area.bottom - 10.0;
            w.stroke(&[(legend_x, y + 1.0), (legend_x + 4.0, y + 1.0)], Rgb::new(r, g, b, None), 8.0);
            w.small(component.label(), legend_x + 6.0, y);
            legend_x += 55.0;
        }
    }

    fn write_footer(&self, w: &PageWriter<'_>, generated_at: &DateTime<FixedOffset>) {
        w.small(
            &format!(
                "(c) {} {} | Analysis generated {}",
                generated_at.year(),
                self.organization,
                format_timestamp(generated_at, self.timezone_offset_hours)
            ),
            MARGIN,
            10.0,
        );
    }

    fn money(&self, amount: Decimal) -> String {
        format_currency(amount, &self.currency_symbol)
    }
}

/// Writes report bytes to `dir/file_name`, creating `dir` if needed
pub fn write_report(dir: impl AsRef<Path>, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|e| {
        MedRoiError::Io(format!("Failed to create output directory {}: {e}", dir.display()))
    })?;
    let path = dir.join(file_name);
    std::fs::write(&path, bytes)
        .map_err(|e| MedRoiError::Io(format!("Failed to write {}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), size_bytes = bytes.len(), "Report written");
    Ok(path)
}

fn save(doc: PdfDocumentReference) -> Result<Vec<u8>> {
    Ok(doc.save_to_bytes()?)
}

const BLACK: Rgb = Rgb {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    icc_profile: None,
};
const GREY: Rgb = Rgb {
    r: 0.6,
    g: 0.6,
    b: 0.6,
    icc_profile: None,
};
const BLUE: Rgb = Rgb {
    r: 0.16,
    g: 0.5,
    b: 0.73,
    icc_profile: None,
};

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Top-down text cursor over one page layer
struct PageWriter<'a> {
    layer: PdfLayerReference,
    fonts: &'a Fonts,
    y: f32,
}

impl<'a> PageWriter<'a> {
    fn new(layer: PdfLayerReference, fonts: &'a Fonts) -> Self {
        Self {
            layer,
            fonts,
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn advance(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn font(&self, bold: bool) -> &IndirectFontRef {
        if bold {
            &self.fonts.bold
        } else {
            &self.fonts.regular
        }
    }

    fn centered(&mut self, text: &str, size: f32, bold: bool) {
        self.advance(size * 0.45);
        let x = ((PAGE_WIDTH - approx_text_width(text, size)) / 2.0).max(MARGIN);
        self.layer.use_text(text, size, Mm(x), Mm(self.y), self.font(bold));
        self.advance(2.0);
    }

    fn heading(&mut self, text: &str) {
        self.advance(7.0);
        self.layer
            .use_text(text, 12.0, Mm(MARGIN), Mm(self.y), self.font(true));
        self.advance(2.0);
        self.stroke(&[(MARGIN, self.y), (PAGE_WIDTH - MARGIN, self.y)], BLACK, 0.5);
        self.advance(1.0);
    }

    fn text(&mut self, text: &str) {
        self.line(text, false);
    }

    fn bold_text(&mut self, text: &str) {
        self.line(text, true);
    }

    fn line(&mut self, text: &str, bold: bool) {
        self.advance(5.5);
        if self.y < BOTTOM_LIMIT {
            tracing::warn!(text, "Report line dropped past the bottom margin");
            return;
        }
        self.layer
            .use_text(text, 10.0, Mm(MARGIN), Mm(self.y), self.font(bold));
    }

    /// Bordered row; the first cell is left-aligned, the rest right-aligned
    fn table_row(&mut self, cells: &[(&str, f32)], bold: bool) {
        let height = 6.5;
        let top = self.y;
        let bottom = top - height;
        let size = if cells.len() > 2 { 8.0 } else { 10.0 };

        let mut x = MARGIN;
        for (i, (text, width)) in cells.iter().enumerate() {
            self.stroke(
                &[(x, top), (x + width, top), (x + width, bottom), (x, bottom), (x, top)],
                BLACK,
                0.3,
            );
            let text_x = if i == 0 {
                x + 1.5
            } else {
                (x + width - 1.5 - approx_text_width(text, size)).max(x + 1.0)
            };
            self.layer
                .use_text(*text, size, Mm(text_x), Mm(bottom + 2.0), self.font(bold));
            x += width;
        }
        self.y = bottom;
    }

    fn small(&self, text: &str, x: f32, y: f32) {
        self.layer.use_text(text, 7.0, Mm(x), Mm(y), &self.fonts.regular);
    }

    fn stroke(&self, points: &[(f32, f32)], color: Rgb, thickness_pt: f32) {
        self.layer.set_outline_color(Color::Rgb(color));
        self.layer.set_outline_thickness(thickness_pt);
        self.layer.add_line(Line {
            points: points
                .iter()
                .map(|(x, y)| (Point::new(Mm(*x), Mm(*y)), false))
                .collect(),
            is_closed: false,
        });
    }
}

/// Average Helvetica glyph width is about half the font size
fn approx_text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5 / PT_PER_MM
}

struct ChartArea {
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
}

impl ChartArea {
    /// Plot area under the cursor, leaving room for axis labels
    fn below(cursor_y: f32, height: f32) -> Self {
        let top = cursor_y - 4.0;
        Self {
            left: MARGIN + 5.0,
            right: PAGE_WIDTH - MARGIN - 5.0,
            top,
            bottom: top - height + 12.0,
        }
    }

    fn width(&self) -> f32 {
        self.right - self.left
    }

    fn draw_frame(&self, layer: &PdfLayerReference) {
        layer.set_outline_color(Color::Rgb(GREY));
        layer.set_outline_thickness(0.5);
        layer.add_line(Line {
            points: vec![
                (Point::new(Mm(self.left), Mm(self.top)), false),
                (Point::new(Mm(self.right), Mm(self.top)), false),
                (Point::new(Mm(self.right), Mm(self.bottom)), false),
                (Point::new(Mm(self.left), Mm(self.bottom)), false),
            ],
            is_closed: true,
        });
    }
}

/// Maps values onto the vertical extent of a chart area
struct ValueScale {
    lo: f32,
    span: f32,
    bottom: f32,
    height: f32,
}

impl ValueScale {
    fn new(lo: Decimal, hi: Decimal, area: &ChartArea) -> Self {
        let lo = lo.to_f32().unwrap_or(0.0);
        let hi = hi.to_f32().unwrap_or(0.0);
        let span = if hi > lo { hi - lo } else { 1.0 };
        Self {
            lo,
            span,
            bottom: area.bottom + 2.0,
            height: area.top - area.bottom - 4.0,
        }
    }

    fn y(&self, value: Decimal) -> f32 {
        let v = value.to_f32().unwrap_or(0.0);
        self.bottom + (v - self.lo) / self.span * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::project;
    use crate::core::format::report_offset;
    use crate::core::scenario::input_from_submission;
    use crate::domain::{ConsultantInfo, Submission};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn generated_at() -> DateTime<FixedOffset> {
        report_offset(7)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 5, 14, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_render_direct_figures() {
        let input = RoiInput::builder()
            .hospital("RS Sehat", "Jakarta")
            .consultant(ConsultantInfo::new("Budi", "budi@example.com", "0812"))
            .initial_investment(dec!(10000))
            .annual_subscription_cost(dec!(1000))
            .annual_revenue_uplift(dec!(3000))
            .annual_operational_savings(dec!(2000))
            .build()
            .unwrap();
        let projection = project(&input).unwrap();

        let renderer = ReportRenderer::new(&ReportConfig::default());
        let bytes = renderer.render(&input, &projection, &generated_at()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_scenario_with_breakdown() {
        let submission = Submission::from_toml(
            r#"
[hospital]
name = "RS Harapan"
location = "Bandung"

[consultant]
name = "Siti"
email = "siti@example.com"
phone = "0813"

[operations]
"#,
        )
        .unwrap();
        let input = input_from_submission(&submission).unwrap();
        let projection = project(&input).unwrap();

        let renderer = ReportRenderer::new(&ReportConfig::default());
        let bytes = renderer.render(&input, &projection, &generated_at()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn test_render_with_zero_investment() {
        let input = RoiInput::builder()
            .hospital("RS Nol", "Depok")
            .consultant(ConsultantInfo::new("Ani", "ani@example.com", "0811"))
            .annual_subscription_cost(dec!(500))
            .build()
            .unwrap();
        let projection = project(&input).unwrap();

        let renderer = ReportRenderer::new(&ReportConfig::default());
        assert!(renderer.render(&input, &projection, &generated_at()).is_ok());
    }

    #[test]
    fn test_write_report_creates_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("reports");
        let path = write_report(&dir, "240305 RS Sehat Jakarta Budi.pdf", b"%PDF-1.3").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.3");
        assert!(path.ends_with("240305 RS Sehat Jakarta Budi.pdf"));
    }

    #[test]
    fn test_value_scale_maps_bounds_to_area() {
        let area = ChartArea {
            left: 0.0,
            right: 100.0,
            top: 104.0,
            bottom: 0.0,
        };
        let scale = ValueScale::new(dec!(-100), dec!(100), &area);
        assert!((scale.y(dec!(-100)) - 2.0).abs() < 1e-4);
        assert!((scale.y(dec!(100)) - 102.0).abs() < 1e-4);
        assert!((scale.y(Decimal::ZERO) - 52.0).abs() < 1e-4);
    }
}
