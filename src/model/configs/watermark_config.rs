use crate::common::*;

#[doc = "차트 위에 겹쳐 그리는 반투명 워터마크 설정"]
#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct WatermarkConfig {
    pub text: String,
    pub font_size: u32,
    pub opacity: f64,
}
