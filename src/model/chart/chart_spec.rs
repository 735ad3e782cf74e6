use crate::common::*;

use crate::enums::annotation_kind::*;

/* round(max_historic) 가 이 값 이상이면 y축 눈금 간격을 10으로 넓힌다. */
const COARSE_TICK_THRESHOLD: f64 = 60.0;
const COARSE_TICK_STEP: i64 = 10;
const FINE_TICK_STEP: i64 = 5;

const Y_MIN_FACTOR: f64 = 0.8;
const Y_MAX_FACTOR: f64 = 1.2;

#[doc = "차트 생성 과정에서 발생할 수 있는 오류 종류"]
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid field '{field}': {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("chart rendering failed: {0}")]
    Render(String),
    #[error("chart rendering timed out after {0} seconds")]
    RenderTimeout(u64),
}

#[derive(Debug, Clone, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct YAxisBounds {
    pub min: i64,
    pub max: i64,
    pub tick_step: i64,
}

#[derive(Debug, Clone, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct AnnotationLine {
    pub kind: AnnotationKind,
    pub y: f64,
    pub label: String,
}

#[doc = "임계값 차트 빌더에 전달되는 원본 입력 필드 모음"]
#[derive(Debug, Clone, Default)]
pub struct ChartSpecParams {
    pub min_historic: Option<f64>,
    pub max_historic: Option<f64>,
    pub preset_min: Option<f64>,
    pub preset_max: Option<f64>,
    pub labels: Vec<String>,
    pub series: Vec<f64>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub axis_label: Option<String>,
}

#[doc = r#"
    렌더러에 그대로 전달되는, 완전히 해석(resolve)된 라인 차트 명세.

    요청당 한 번 생성되어 렌더러가 한 번 소비하고 버려진다.
    생성 경로는 두 가지이며 둘 다 동일한 타입을 만들어낸다.

    - `build`  : 임계값 경로. y축 경계/눈금 간격을 파생하고 임계선 2개를 구성한다.
    - `basic`  : 단순 경로. 시퀀스 검증만 수행하며 y축은 렌더러가 데이터에서 산출한다.
"#]
#[derive(Debug, Clone, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct ChartSpec {
    pub labels: Vec<String>,
    pub series: Vec<f64>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub axis_label: Option<String>,
    pub y_axis: Option<YAxisBounds>,
    pub annotations: Vec<AnnotationLine>,
}

impl ChartSpec {
    #[doc = r#"
        임계값/제목이 모두 포함된 차트 명세를 파생하는 함수.

        1. 숫자 필드 4종(min/max historic, preset min/max)의 존재 및 유한성 검증
        2. labels/series 의 비어있음/길이 일치 검증, 텍스트 필드 3종 검증
        3. y축 경계 파생:
           - `computed_y_min = round(min(min_historic, preset_min) * 0.8)`
           - `computed_y_max = round(max(max_historic, preset_max) * 1.2)`
        4. 눈금 간격 파생: `round(max_historic) >= 60` 이면 10, 아니면 5
        5. preset_min(warning)/preset_max(critical) 위치에 수평 임계선 2개 구성

        검증 실패 시 어떤 필드도 부분 계산되지 않고 즉시 `ChartError::Validation` 반환.

        # Arguments
        * `params` - 요청에서 추출된 원본 입력 필드

        # Returns
        * `Result<ChartSpec, ChartError>`
    "#]
    pub fn build(params: ChartSpecParams) -> Result<Self, ChartError> {
        let min_historic: f64 = require_number("min_historic", params.min_historic)?;
        let max_historic: f64 = require_number("max_historic", params.max_historic)?;
        let preset_min: f64 = require_number("preset_min", params.preset_min)?;
        let preset_max: f64 = require_number("preset_max", params.preset_max)?;

        check_series_alignment(&params.labels, &params.series)?;

        let title: String = require_text("title", params.title)?;
        let subtitle: String = require_text("subtitle", params.subtitle)?;
        let axis_label: String = require_text("axis_label", params.axis_label)?;

        /* 반올림은 f64::round (ties away from zero) 기준 */
        let computed_y_min: i64 = (min_historic.min(preset_min) * Y_MIN_FACTOR).round() as i64;
        let computed_y_max: i64 = (max_historic.max(preset_max) * Y_MAX_FACTOR).round() as i64;

        let tick_step: i64 = if max_historic.round() >= COARSE_TICK_THRESHOLD {
            COARSE_TICK_STEP
        } else {
            FINE_TICK_STEP
        };

        let annotations: Vec<AnnotationLine> = vec![
            AnnotationLine::new(
                AnnotationKind::Warning,
                preset_min,
                format!("min {}", fmt_threshold(preset_min)),
            ),
            AnnotationLine::new(
                AnnotationKind::Critical,
                preset_max,
                format!("máx {}", fmt_threshold(preset_max)),
            ),
        ];

        Ok(ChartSpec {
            labels: params.labels,
            series: params.series,
            title: Some(title),
            subtitle: Some(subtitle),
            axis_label: Some(axis_label),
            y_axis: Some(YAxisBounds::new(computed_y_min, computed_y_max, tick_step)),
            annotations,
        })
    }

    #[doc = r#"
        임계값 없이 데이터만으로 그려지는 단순 차트 명세를 생성하는 함수.

        labels/series 의 비어있음/길이 일치만 검증하며, y축 경계는
        렌더러가 시리즈 데이터에 패딩을 더해 산출한다.
    "#]
    pub fn basic(labels: Vec<String>, series: Vec<f64>) -> Result<Self, ChartError> {
        check_series_alignment(&labels, &series)?;

        Ok(ChartSpec {
            labels,
            series,
            title: None,
            subtitle: None,
            axis_label: None,
            y_axis: None,
            annotations: Vec::new(),
        })
    }
}

#[doc = r#"
    필수 숫자 필드의 존재/유한성 검증.

    0 은 유효한 임계값이므로 거부하지 않는다. 누락(None)과
    NaN/무한대만 오류로 처리한다.
"#]
fn require_number(field: &'static str, value: Option<f64>) -> Result<f64, ChartError> {
    let value: f64 = value.ok_or_else(|| ChartError::Validation {
        field,
        reason: String::from("field is missing"),
    })?;

    if !value.is_finite() {
        return Err(ChartError::Validation {
            field,
            reason: format!("value {} is not a finite number", value),
        });
    }

    Ok(value)
}

fn require_text(field: &'static str, value: Option<String>) -> Result<String, ChartError> {
    let value: String = value.ok_or_else(|| ChartError::Validation {
        field,
        reason: String::from("field is missing"),
    })?;

    if value.trim().is_empty() {
        return Err(ChartError::Validation {
            field,
            reason: String::from("field is empty"),
        });
    }

    Ok(value)
}

fn check_series_alignment(labels: &[String], series: &[f64]) -> Result<(), ChartError> {
    if labels.is_empty() {
        return Err(ChartError::Validation {
            field: "labels",
            reason: String::from("sequence is empty"),
        });
    }

    if series.is_empty() {
        return Err(ChartError::Validation {
            field: "series",
            reason: String::from("sequence is empty"),
        });
    }

    if labels.len() != series.len() {
        return Err(ChartError::Validation {
            field: "series",
            reason: format!(
                "length {} does not match labels length {}",
                series.len(),
                labels.len()
            ),
        });
    }

    Ok(())
}

#[doc = "임계선 라벨용 숫자 포맷 (정수 값이면 소수점 없이 출력)"]
fn fmt_threshold(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
