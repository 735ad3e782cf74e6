use crate::common::*;

#[doc = "POST /grafico-base64 요청 본문"]
#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct ChartBase64Request {
    #[serde(rename = "dataTime", default)]
    pub data_time: Vec<String>,
    #[serde(default)]
    pub series: Vec<f64>,
}
