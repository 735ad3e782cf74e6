use crate::common::*;

use crate::enums::annotation_kind::*;
use crate::model::chart::chart_spec::*;
use crate::model::configs::{chart_config::*, watermark_config::*};
use crate::traits::service_traits::chart_service::*;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use image::{ExtendedColorType, ImageEncoder, codecs::png::PngEncoder};

#[derive(Debug, Clone, Getters)]
pub struct ChartServiceImpl {
    chart_config: ChartConfig,
    watermark_config: WatermarkConfig,
}

impl ChartServiceImpl {
    #[doc = "워터마크 설정은 전역 등록이 아니라 생성자 주입으로 전달받는다."]
    pub fn new(chart_config: &ChartConfig, watermark_config: &WatermarkConfig) -> Self {
        ChartServiceImpl {
            chart_config: chart_config.clone(),
            watermark_config: watermark_config.clone(),
        }
    }
}

#[async_trait]
impl ChartService for ChartServiceImpl {
    #[doc = r#"
        ChartSpec 을 PNG 바이트로 렌더링하는 함수.

        1. plotters 동기 렌더링을 `spawn_blocking` 으로 격리
        2. 설정된 타임아웃(`render_timeout_sec`) 안에 끝나지 않으면 중단 처리
        3. 픽셀 버퍼/백엔드는 블로킹 작업 스코프가 끝나면 항상 해제된다
    "#]
    async fn render_line_chart(&self, spec: &ChartSpec) -> Result<Vec<u8>, ChartError> {
        let spec: ChartSpec = spec.clone();
        let chart_config: ChartConfig = self.chart_config.clone();
        let watermark_config: WatermarkConfig = self.watermark_config.clone();
        let timeout_sec: u64 = *self.chart_config.render_timeout_sec();

        let handle: tokio::task::JoinHandle<Result<Vec<u8>, anyhow::Error>> =
            tokio::task::spawn_blocking(move || {
                draw_chart_png(&spec, &chart_config, &watermark_config)
            });

        let joined = match timeout(Duration::from_secs(timeout_sec), handle).await {
            Ok(joined) => joined,
            Err(_) => {
                warn!(
                    "[ChartServiceImpl->render_line_chart] rendering exceeded {}s budget",
                    timeout_sec
                );
                return Err(ChartError::RenderTimeout(timeout_sec));
            }
        };

        let drawing_result: Result<Vec<u8>, anyhow::Error> = joined.map_err(|e| {
            ChartError::Render(format!("blocking task join failed (panic/cancelled): {}", e))
        })?;

        let png_bytes: Vec<u8> =
            drawing_result.map_err(|e| ChartError::Render(format!("{:?}", e)))?;

        info!(
            "Line chart rendered successfully ({} bytes)",
            png_bytes.len()
        );

        Ok(png_bytes)
    }
}

#[doc = r#"
    동기 렌더링 본체. 픽셀 버퍼에 차트를 그린 뒤 PNG 로 인코딩한다.

    백엔드는 스택에 소유된 RGB 버퍼를 렉시컬 스코프 안에서만 빌리므로,
    오류로 조기 반환하는 경로를 포함한 모든 경로에서 렌더링 자원이 해제된다.
"#]
fn draw_chart_png(
    spec: &ChartSpec,
    chart_config: &ChartConfig,
    watermark_config: &WatermarkConfig,
) -> anyhow::Result<Vec<u8>> {
    let width: u32 = *chart_config.width();
    let height: u32 = *chart_config.height();

    let mut rgb_buf: Vec<u8> = vec![0u8; (width as usize) * (height as usize) * 3];

    {
        let root: DrawingArea<BitMapBackend, Shift> =
            BitMapBackend::with_buffer(&mut rgb_buf, (width, height)).into_drawing_area();

        let [bg_r, bg_g, bg_b] = *chart_config.background_rgb();
        root.fill(&RGBColor(bg_r, bg_g, bg_b))?;

        /* 워터마크는 데이터 아래(beforeDraw)에 깔린다. */
        draw_watermark(&root, watermark_config, width, height)?;

        if let Some(subtitle) = spec.subtitle() {
            let subtitle_style = ("sans-serif", 20)
                .into_font()
                .color(&RGBColor(90, 90, 90))
                .pos(Pos::new(HPos::Center, VPos::Top));
            root.draw(&Text::new(
                subtitle.clone(),
                ((width / 2) as i32, 64),
                subtitle_style,
            ))?;
        }

        let x_last: usize = spec.labels().len() - 1;

        let (y_min, y_max, y_label_cnt) = match spec.y_axis() {
            Some(bounds) => (
                *bounds.min() as f64,
                *bounds.max() as f64,
                ((bounds.max() - bounds.min()) / bounds.tick_step()).unsigned_abs() as usize + 1,
            ),
            None => {
                let (min_v, max_v) = calculate_y_range(spec.series());
                (min_v, max_v, 10)
            }
        };

        let mut builder = ChartBuilder::on(&root);
        builder.margin(30).x_label_area_size(50).y_label_area_size(70);

        if let Some(title) = spec.title() {
            builder.caption(title, ("sans-serif", 32).into_font());
        }

        let mut chart = builder.build_cartesian_2d(0..x_last, y_min..y_max)?;

        {
            let x_label_formatter = |x: &usize| {
                if *x < spec.labels().len() {
                    spec.labels()[*x].clone()
                } else {
                    String::new()
                }
            };
            let y_label_formatter = |y: &f64| format!("{:.0}", y);
            let mut mesh = chart.configure_mesh();
            mesh.x_labels(spec.labels().len().min(10))
                .y_labels(y_label_cnt)
                .x_label_style(("sans-serif", 16).into_font())
                .y_label_style(("sans-serif", 16).into_font())
                .x_label_formatter(&x_label_formatter)
                .y_label_formatter(&y_label_formatter);

            if let Some(axis_label) = spec.axis_label() {
                mesh.y_desc(axis_label.clone());
            }

            mesh.draw()?;
        }

        let line_color: RGBColor = RGBColor(54, 162, 235);

        chart
            .draw_series(
                AreaSeries::new(
                    spec.series().iter().enumerate().map(|(i, &y)| (i, y)),
                    y_min,
                    line_color.mix(0.2),
                )
                .border_style(ShapeStyle::from(&line_color).stroke_width(2)),
            )?
            .label(chart_config.series_label().clone())
            .legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + 20, y)],
                    ShapeStyle::from(&line_color).stroke_width(2),
                )
            });

        for annotation in spec.annotations() {
            let color: RGBColor = match annotation.kind() {
                AnnotationKind::Warning => YELLOW,
                AnnotationKind::Critical => RED,
            };

            chart.draw_series(DashedLineSeries::new(
                vec![(0usize, *annotation.y()), (x_last, *annotation.y())],
                5,
                5,
                ShapeStyle::from(&color).stroke_width(4),
            ))?;

            /* 라벨은 임계선 시작 지점에 붙인다. */
            chart.plotting_area().draw(&Text::new(
                annotation.label().clone(),
                (0usize, *annotation.y()),
                ("sans-serif", 18).into_font().color(&BLACK),
            ))?;
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
    }

    let mut png_bytes: Vec<u8> = Vec::new();
    PngEncoder::new(&mut png_bytes).write_image(&rgb_buf, width, height, ExtendedColorType::Rgb8)?;

    Ok(png_bytes)
}

fn draw_watermark(
    root: &DrawingArea<BitMapBackend, Shift>,
    watermark_config: &WatermarkConfig,
    width: u32,
    height: u32,
) -> anyhow::Result<()> {
    let style = ("sans-serif", *watermark_config.font_size())
        .into_font()
        .color(&RGBAColor(200, 200, 200, *watermark_config.opacity()))
        .pos(Pos::new(HPos::Center, VPos::Center));

    root.draw(&Text::new(
        watermark_config.text().clone(),
        ((width / 2) as i32, (height / 2) as i32),
        style,
    ))?;

    Ok(())
}

#[doc = "임계값이 없는 단순 차트용 y축 범위 산출 (10% 패딩)"]
fn calculate_y_range(values: &[f64]) -> (f64, f64) {
    let mut min_val: f64 = f64::INFINITY;
    let mut max_val: f64 = f64::NEG_INFINITY;

    for value in values {
        min_val = min_val.min(*value);
        max_val = max_val.max(*value);
    }

    if !min_val.is_finite() || !max_val.is_finite() {
        return (0.0, 100.0);
    }

    let padding: f64 = ((max_val - min_val) * 0.1).max(1.0);

    (min_val - padding, max_val + padding)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn test_chart_config(render_timeout_sec: u64) -> ChartConfig {
        ChartConfig {
            width: 400,
            height: 300,
            background_rgb: [255, 255, 255],
            series_label: String::from("Temperatura (°C)"),
            render_timeout_sec,
        }
    }

    fn test_watermark_config() -> WatermarkConfig {
        WatermarkConfig {
            text: String::from("Marca d'Água"),
            font_size: 30,
            opacity: 0.5,
        }
    }

    fn threshold_spec() -> ChartSpec {
        ChartSpec::build(ChartSpecParams {
            min_historic: Some(10.0),
            max_historic: Some(50.0),
            preset_min: Some(8.0),
            preset_max: Some(55.0),
            labels: vec![
                String::from("08:00"),
                String::from("09:00"),
                String::from("10:00"),
            ],
            series: vec![21.5, 23.0, 22.1],
            title: Some(String::from("Temperatura")),
            subtitle: Some(String::from("Câmara fria 01")),
            axis_label: Some(String::from("Temperatura (°C)")),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn renders_basic_spec_to_png() {
        let service: ChartServiceImpl =
            ChartServiceImpl::new(&test_chart_config(10), &test_watermark_config());

        let spec: ChartSpec = ChartSpec::basic(
            vec![
                String::from("08:00"),
                String::from("09:00"),
                String::from("10:00"),
            ],
            vec![10.0, 14.0, 12.0],
        )
        .unwrap();

        let png: Vec<u8> = service.render_line_chart(&spec).await.unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[tokio::test]
    async fn renders_threshold_spec_with_annotations() {
        let service: ChartServiceImpl =
            ChartServiceImpl::new(&test_chart_config(10), &test_watermark_config());

        let png: Vec<u8> = service.render_line_chart(&threshold_spec()).await.unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
        assert!(png.len() > PNG_SIGNATURE.len());
    }

    #[tokio::test]
    async fn zero_timeout_reports_render_timeout() {
        let service: ChartServiceImpl =
            ChartServiceImpl::new(&test_chart_config(0), &test_watermark_config());

        let err: ChartError = service
            .render_line_chart(&threshold_spec())
            .await
            .unwrap_err();

        assert!(matches!(err, ChartError::RenderTimeout(0)));
    }
}
