use crate::common::*;

use crate::model::chart::chart_spec::*;

#[doc = r#"
    함수형(event-driven) 호출 경로의 요청 본문.

    임계값/제목 필드가 모두 포함된 전체 차트 요청이며, 필드 존재 여부의
    검증은 빌더(`ChartSpec::build`)가 담당하므로 여기서는 전부 Option 으로
    받아들인다.
"#]
#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct ChartRenderRequest {
    #[serde(rename = "minimoHistorico")]
    pub minimo_historico: Option<f64>,
    #[serde(rename = "maximoHistorico")]
    pub maximo_historico: Option<f64>,
    #[serde(rename = "presetMin")]
    pub preset_min: Option<f64>,
    #[serde(rename = "presetMax")]
    pub preset_max: Option<f64>,
    #[serde(rename = "dataTime", default)]
    pub data_time: Vec<String>,
    #[serde(default)]
    pub series: Vec<f64>,
    pub title: Option<String>,
    #[serde(rename = "subTitle")]
    pub sub_title: Option<String>,
    #[serde(rename = "textLegend")]
    pub text_legend: Option<String>,
}

impl ChartRenderRequest {
    #[doc = "요청 필드를 차트 빌더 입력으로 변환"]
    pub fn into_spec_params(self) -> ChartSpecParams {
        ChartSpecParams {
            min_historic: self.minimo_historico,
            max_historic: self.maximo_historico,
            preset_min: self.preset_min,
            preset_max: self.preset_max,
            labels: self.data_time,
            series: self.series,
            title: self.title,
            subtitle: self.sub_title,
            axis_label: self.text_legend,
        }
    }
}
